//! Core domain logic for quotebook.
//! This crate is the single source of truth for quote invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{parse_log_dir, parse_log_level, ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::quote::{Quote, QuoteId, QuoteValidationError};
pub use repo::quote_repo::{QuoteRepository, RepoError, RepoResult, SqliteQuoteRepository};
pub use service::quote_service::{QuoteService, QuoteServiceError, ServiceResult};

/// Minimal health-check probe.
pub fn ping() -> &'static str {
    "OK"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_ok() {
        assert_eq!(ping(), "OK");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
