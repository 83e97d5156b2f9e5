//! Record identifiers for the chairside data layer.
//!
//! Every stored record (patient, incident, file attachment) carries a compact
//! identifier derived from its creation time: a one-letter kind prefix
//! followed by the record's millisecond Unix timestamp.
//!
//! This module provides:
//! - A wrapper type ([`RecordId`]) that *guarantees* the canonical format once
//!   constructed.
//! - A per-kind generator ([`RecordIdGenerator`]) that keeps freshly minted
//!   identifiers strictly monotonic even when two records are created within
//!   the same millisecond.
//!
//! ## Canonical id form
//! - First character: the kind prefix (`p` patient, `i` incident, `f` file)
//! - Remainder: one or more ASCII decimal digits
//! - Example: `p1722945600000`
//!
//! Notes:
//! - Seed fixtures use short counters (`p1`, `i1`) rather than timestamps;
//!   these are valid canonical ids and parse like any other.
//! - Canonical form is *required* for externally supplied identifiers. Use
//!   [`RecordId::parse`] to validate an input string.

mod service;

// Re-export public types
pub use service::{RecordId, RecordIdGenerator, RecordKind};

/// Error type for record id operations.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for record id operations.
pub type IdResult<T> = Result<T, IdError>;
