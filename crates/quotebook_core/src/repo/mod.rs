//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access capability the service layer consumes.
//! - Isolate SQLite query details from business orchestration.
//!
//! # Invariants
//! - Repository writes enforce `Quote::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod quote_repo;
