/// Domain models for taskboard
///
/// This module contains the domain entities and their input types.
///
/// # Models
///
/// - `user`: user accounts and roles
/// - `project`: projects and their member sets
/// - `task`: tasks and the status workflow enums
///
/// Each entity comes with a `Create*` input struct and, where partial
/// updates exist, an `Update*` patch struct whose fields are all `Option`:
/// `None` leaves the stored value unchanged.

pub mod project;
pub mod task;
pub mod user;
