//! UI-facing bindings over `experience_core`.

pub mod api;
