//! Shared constants for attachment handling.

/// Maximum size of a single attachment in bytes (10 MiB).
pub const MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

/// MIME types an attachment is allowed to carry.
///
/// The legacy `image/jpg` spelling is accepted on input and normalised to
/// `image/jpeg`, so it does not appear here.
pub const ACCEPTED_MIME_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];
