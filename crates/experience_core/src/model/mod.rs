//! Experience domain model.
//!
//! # Responsibility
//! - Define the typed record and form shapes used by store and views.
//!
//! # Invariants
//! - Records are identified by position in the store; an `ExperienceId` is
//!   assigned on append for callers that need to re-resolve positions.

pub mod experience;
