//! Core domain logic for experience notes.
//! This crate owns the record model, the session store and its use-cases.

pub mod logging;
pub mod model;
pub mod repo;
pub mod route;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LoggingError};
pub use model::experience::{
    format_period, parse_form_date, ExperienceForm, ExperienceId, ExperienceRecord, DATE_FORMAT,
};
pub use repo::experience_store::{
    ExperienceEntry, ExperienceRepository, InMemoryExperienceStore, StoreError, StoreResult,
};
pub use route::{Route, RouteError};
pub use service::experience_service::{
    DeleteConfirmation, ExperienceService, FormMode, FormSession, ServiceError, ServiceResult,
};
pub use view::list_view::{render_card, render_list, ListCard};

/// Minimal health-check API for front-end wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
