//! Domain model for the quote store.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every persisted quote is identified by a store-assigned `QuoteId`.
//! - Deletion is a hard removal; there are no tombstones.

pub mod quote;
