//! Repository layer for the session experience list.
//!
//! # Responsibility
//! - Define the index-addressed store contract used by services and views.
//! - Keep storage details out of form use-cases.
//!
//! # Invariants
//! - The store does not validate record contents.
//! - Index errors are returned as `StoreError::OutOfRange`, never clamped.

pub mod experience_store;
