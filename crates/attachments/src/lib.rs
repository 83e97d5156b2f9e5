//! Chairside file attachments
//!
//! This crate turns files selected for a treatment record into self-contained
//! attachment records. An attachment carries its content inline as a base64
//! data URI, so a persisted record never references the filesystem it was
//! ingested from.
//!
//! ## Ingest model
//!
//! A batch of candidate files is processed in two strict phases:
//!
//! 1. **Validate everything.** Every candidate is checked against the size
//!    cap and the accepted-type list before any file content is read. The
//!    first violation fails the whole batch.
//! 2. **Encode everything.** Each file is read and encoded on its own task;
//!    results are joined back in input order.
//!
//! Nothing is encoded for a batch that contains an invalid file, so a caller
//! can treat the returned attachments as all-or-nothing.
//!
//! ## Accepted content
//!
//! - JPEG, PNG and GIF images
//! - PDF documents
//! - Word documents (`.doc`, `.docx`)
//! - At most 10 MiB per file

mod constants;
mod service;

pub use constants::{ACCEPTED_MIME_TYPES, MAX_ATTACHMENT_BYTES};
pub use service::{Attachment, AttachmentService};

/// Errors that can occur during attachment operations
#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    /// File exceeds the per-attachment size cap
    #[error("File too large: '{name}' is {size_bytes} bytes (limit {limit_bytes})")]
    TooLarge {
        name: String,
        size_bytes: u64,
        limit_bytes: u64,
    },

    /// File is not one of the accepted content types
    #[error("Unsupported file type: '{0}'")]
    UnsupportedType(String),

    /// Source path has no usable file name
    #[error("Invalid file name: '{0}'")]
    InvalidName(String),

    /// Stored URL is not a base64 data URI
    #[error("Not a base64 data URI: '{0}'")]
    InvalidDataUri(String),

    /// Base64 payload could not be decoded
    #[error("Base64 decode failed: {0}")]
    Decode(#[from] base64::DecodeError),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A background encode task failed to complete
    #[error("Encode task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
