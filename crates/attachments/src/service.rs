//! Attachment ingest service implementation
//!
//! This module provides the core implementation of chairside's attachment
//! handling through the [`AttachmentService`] type. It turns files on disk
//! into [`Attachment`] records whose content travels inline as a base64 data
//! URI.
//!
//! # Ingest Phases
//!
//! The service enforces a strict two-phase batch model:
//!
//! - **Validation** inspects every candidate (file name, size on disk,
//!   declared content type) before a single byte of content is read. A batch
//!   containing any invalid file is rejected whole.
//! - **Encoding** reads and base64-encodes each validated file on its own
//!   task, then joins the results back in input order.
//!
//! # Content Type Detection
//!
//! The declared type comes from the file extension and is what validation
//! checks. During encoding the actual bytes are sniffed and, when the
//! detected type is itself an accepted one, it replaces the declared type.
//! Detection is best-effort and never widens what validation accepted.
//!
//! # Implementation Notes
//!
//! - The service owns the identifier sequence for attachments, so a single
//!   service instance never mints colliding ids.
//! - Encode tasks are independent; the first failure observed in join order
//!   fails the batch.

use crate::{AttachmentError, ACCEPTED_MIME_TYPES, MAX_ATTACHMENT_BYTES};
use base64::{engine::general_purpose, Engine as _};
use chairside_id::{RecordId, RecordIdGenerator, RecordKind};
use chairside_types::NonEmptyText;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// A file attached to a treatment record
///
/// The content is carried inline in `url` as a `data:<mime>;base64,<payload>`
/// URI, so an attachment survives independently of the filesystem it was
/// ingested from and round-trips through the JSON storage slots unchanged.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct Attachment {
    /// Identifier of this attachment (`f` prefix)
    pub id: RecordId,

    /// Original file name from the source path
    pub name: NonEmptyText,

    /// Content type the attachment was stored with
    ///
    /// This is a best-effort detection refined from the declared type and
    /// should not be considered authoritative.
    #[serde(rename = "type")]
    pub content_type: NonEmptyText,

    /// Size of the source file in bytes
    #[serde(rename = "size")]
    pub size_bytes: u64,

    /// Base64 data URI holding the file content
    pub url: NonEmptyText,

    /// UTC timestamp when the attachment was encoded
    #[serde(rename = "uploadDate")]
    pub uploaded_at: DateTime<Utc>,
}

impl Attachment {
    /// Decodes the inline content of this attachment.
    ///
    /// # Returns
    ///
    /// The original file bytes recovered from the data URI.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentError::InvalidDataUri`] if `url` is not a base64
    /// data URI, or [`AttachmentError::Decode`] if the payload is corrupt.
    pub fn decoded_bytes(&self) -> Result<Vec<u8>, AttachmentError> {
        let payload = self
            .url
            .as_str()
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .map(|(_, payload)| payload)
            .ok_or_else(|| AttachmentError::InvalidDataUri(self.name.to_string()))?;
        Ok(general_purpose::STANDARD.decode(payload)?)
    }
}

/// A candidate that has passed validation and is ready to encode
#[derive(Debug)]
struct Candidate {
    path: PathBuf,
    id: RecordId,
    name: NonEmptyText,
    declared: &'static str,
    size_bytes: u64,
}

/// Service for turning selected files into attachment records
///
/// # Design
///
/// - Batch-oriented: a batch is validated in full before any encoding starts
/// - Order-preserving: results come back in the order sources were given
/// - Self-contained: encoded attachments carry their content inline
#[derive(Debug, Default)]
pub struct AttachmentService {
    /// Identifier sequence for attachments minted by this service
    ids: RecordIdGenerator,
}

impl AttachmentService {
    /// Creates a new `AttachmentService` with a fresh identifier sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and encodes a batch of source files.
    ///
    /// Every source is validated (file name, size cap, accepted type) before
    /// any content is read. Once the whole batch has passed, each file is
    /// read and encoded on its own task and the results are joined in input
    /// order.
    ///
    /// # Arguments
    ///
    /// * `sources` - Paths of the files to attach, in presentation order
    ///
    /// # Returns
    ///
    /// One [`Attachment`] per source, in the same order as `sources`.
    ///
    /// # Errors
    ///
    /// Returns `AttachmentError` if:
    /// - A source has no usable file name
    /// - A source exceeds [`MAX_ATTACHMENT_BYTES`]
    /// - A source is not an accepted content type
    /// - A source cannot be read (I/O)
    /// - An encode task fails to complete
    pub async fn encode_batch(
        &mut self,
        sources: &[PathBuf],
    ) -> Result<Vec<Attachment>, AttachmentError> {
        // Phase one: validate every candidate before reading any content
        let mut candidates = Vec::with_capacity(sources.len());
        for path in sources {
            candidates.push(self.validate_source(path).await?);
        }

        // Phase two: encode concurrently, join in input order
        let mut handles = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            handles.push(tokio::spawn(encode_one(candidate)));
        }

        let mut attachments = Vec::with_capacity(handles.len());
        for handle in handles {
            attachments.push(handle.await??);
        }
        Ok(attachments)
    }

    /// Validates a single candidate without reading its content.
    ///
    /// Checks run in the order a user would expect them reported: file name,
    /// then size, then content type.
    async fn validate_source(&mut self, path: &Path) -> Result<Candidate, AttachmentError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AttachmentError::InvalidName(path.display().to_string()))?;
        let name = NonEmptyText::new(name)
            .map_err(|_| AttachmentError::InvalidName(path.display().to_string()))?;

        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            AttachmentError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to stat source file {}: {}", path.display(), e),
            ))
        })?;
        let size_bytes = metadata.len();
        if size_bytes > MAX_ATTACHMENT_BYTES {
            return Err(AttachmentError::TooLarge {
                name: name.to_string(),
                size_bytes,
                limit_bytes: MAX_ATTACHMENT_BYTES,
            });
        }

        let declared = declared_content_type(path)
            .ok_or_else(|| AttachmentError::UnsupportedType(name.to_string()))?;

        Ok(Candidate {
            path: path.to_path_buf(),
            id: self.ids.next(RecordKind::Attachment),
            name,
            declared,
            size_bytes,
        })
    }
}

/// Reads and encodes one validated candidate.
async fn encode_one(candidate: Candidate) -> Result<Attachment, AttachmentError> {
    let buffer = tokio::fs::read(&candidate.path).await.map_err(|e| {
        AttachmentError::Io(std::io::Error::new(
            e.kind(),
            format!(
                "Failed to read source file {}: {}",
                candidate.path.display(),
                e
            ),
        ))
    })?;

    // Sniffed type wins only when it is itself accepted; validation already
    // vouched for the declared one
    let content_type = infer::get(&buffer)
        .map(|kind| kind.mime_type())
        .filter(|mime| is_accepted(mime))
        .unwrap_or(candidate.declared);

    let payload = general_purpose::STANDARD.encode(&buffer);
    let url = NonEmptyText::new(format!("data:{};base64,{}", content_type, payload))
        .expect("data URI is non-empty");

    Ok(Attachment {
        id: candidate.id,
        name: candidate.name,
        content_type: NonEmptyText::new(content_type).expect("mime type is non-empty"),
        size_bytes: candidate.size_bytes,
        url,
        uploaded_at: Utc::now(),
    })
}

/// Returns the content type implied by a file extension, if accepted.
fn declared_content_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        // Legacy "jpg" normalises to the canonical JPEG type
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "pdf" => Some("application/pdf"),
        "doc" => Some("application/msword"),
        "docx" => Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        _ => None,
    }
}

fn is_accepted(mime: &str) -> bool {
    ACCEPTED_MIME_TYPES.contains(&mime)
}
