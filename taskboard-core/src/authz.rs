/// Authorization decisions
///
/// Pure decision functions over an authenticated context and a target
/// resource; no storage access and no side effects. The model is
/// deliberately small: a single global `admin` tier plus per-resource
/// ownership through `created_by`.
///
/// Reads are unrestricted for authenticated identities — list and get
/// operations return every resource to any caller holding a valid session.
/// Only project mutation is gated; task mutation is open to any
/// authenticated identity (see [`crate::tasks::TaskService`]).
///
/// # Example
///
/// ```
/// use taskboard_core::auth::authenticator::AuthContext;
/// use taskboard_core::authz::{can_modify, OwnedResource};
/// use taskboard_core::models::user::UserRole;
/// use uuid::Uuid;
///
/// struct Doc { owner: Uuid }
/// impl OwnedResource for Doc {
///     fn created_by(&self) -> Uuid { self.owner }
/// }
///
/// let owner = Uuid::new_v4();
/// let doc = Doc { owner };
///
/// let ctx = AuthContext { id: owner, role: UserRole::User };
/// assert!(can_modify(&ctx, &doc));
///
/// let stranger = AuthContext { id: Uuid::new_v4(), role: UserRole::User };
/// assert!(!can_modify(&stranger, &doc));
/// ```

use crate::auth::authenticator::AuthContext;
use crate::error::{CoreError, CoreResult};
use crate::models::project::Project;
use uuid::Uuid;

/// A resource with an owning identity
pub trait OwnedResource {
    /// The identity that created the resource
    fn created_by(&self) -> Uuid;
}

impl OwnedResource for Project {
    fn created_by(&self) -> Uuid {
        self.created_by
    }
}

/// Decides whether an identity may modify or delete a resource
///
/// True iff the identity is an admin or owns the resource. Membership in a
/// project grants no mutation rights.
pub fn can_modify(auth: &AuthContext, resource: &impl OwnedResource) -> bool {
    auth.role.is_admin() || auth.id == resource.created_by()
}

/// Decides whether an identity may read a resource
///
/// Always true for authenticated identities; there is no membership-based
/// read filtering.
pub fn can_read(_auth: &AuthContext) -> bool {
    true
}

/// Requires modify permission on a resource
///
/// # Errors
///
/// Returns `CoreError::Forbidden` naming the attempted operation when the
/// check fails.
pub fn require_modify(
    auth: &AuthContext,
    resource: &impl OwnedResource,
    operation: &str,
) -> CoreResult<()> {
    if !can_modify(auth, resource) {
        return Err(CoreError::Forbidden(format!(
            "Not authorized to {}",
            operation
        )));
    }
    Ok(())
}
