//! Core use-case services.
//!
//! # Responsibility
//! - Turn form and list interactions into store operations.
//! - Keep UI/FFI layers decoupled from store internals.

pub mod experience_service;
