//! Shared generation contract between the web client, the host proxy, and the CLI.
//!
//! The backend answers `POST /generate` with a rendered file, a JSON body
//! carrying file links, a JSON follow-up question, or an error. This crate
//! owns [`decode_reply`], the one place where status codes, `content-type`
//! substrings, and JSON field probing are turned into a typed
//! [`GenerationReply`]. Everything downstream matches on the enum.


use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Multipart field carrying the topic (or the latest follow-up answer).
pub const TOPIC_FIELD: &str = "topic";

/// MIME type used for PDF previews.
pub const PDF_MIME: &str = "application/pdf";

/// OOXML presentation MIME type (`.pptx`).
pub const PPTX_MIME: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Marker the backend places in `detail` before the user-facing agent text.
pub const AGENT_RESPONSE_MARKER: &str = "Agent response: ";

// =============================================================================
// ERROR
// =============================================================================

/// Why a generation request did not produce a usable reply.
///
/// The `Display` strings are user-facing; the web client shows them verbatim
/// in its notice area and the CLI prints them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplyError {
    /// The backend answered with a non-2xx status.
    #[error("Server error: {status} {body}")]
    Server { status: u16, body: String },

    /// JSON body without `pdfUrl`, `pptUrl`, or a follow-up `status`.
    #[error("Backend returned JSON but no file URLs were found.")]
    NoFileUrls,

    /// A file content type arrived with a zero-length body.
    #[error("Received empty file from server")]
    EmptyFile,

    /// JSON body claimed the file was generated but carried no file.
    #[error("Unexpected response: status is true but no file received")]
    StatusWithoutFile,

    /// Unrecognized content type with nothing to offer as a download.
    #[error("Unexpected response type from server")]
    UnexpectedType,

    /// The body was labelled JSON but did not parse.
    #[error("Invalid JSON from server: {0}")]
    InvalidJson(String),

    /// The request never produced a response (network failure, CORS, abort).
    #[error("{0}")]
    Transport(String),
}

impl ReplyError {
    /// Whether the failure happened below HTTP (no status was received).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

// =============================================================================
// REPLY
// =============================================================================

/// Kind of file carried by a binary reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Renderable PDF preview.
    Pdf,
    /// PowerPoint deck.
    Pptx,
    /// Anything else; offered as an opaque download.
    Binary,
}

impl FileKind {
    /// Classify a response `content-type` header by substring.
    ///
    /// Matching is case-insensitive. PDF wins over presentation markers.
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Self {
        let content_type = content_type.to_ascii_lowercase();
        if content_type.contains(PDF_MIME) {
            Self::Pdf
        } else if content_type.contains("presentation")
            || content_type.contains("powerpoint")
            || content_type.contains(PPTX_MIME)
        {
            Self::Pptx
        } else {
            Self::Binary
        }
    }

    /// MIME type to label a local blob with. `None` means untyped.
    #[must_use]
    pub fn mime(self) -> Option<&'static str> {
        match self {
            Self::Pdf => Some(PDF_MIME),
            Self::Pptx => Some(PPTX_MIME),
            Self::Binary => None,
        }
    }

    /// File extension used for downloads.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Pptx => "pptx",
            Self::Binary => "bin",
        }
    }
}

/// A successfully interpreted backend response. Exactly one per request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationReply {
    /// The backend streamed the file itself.
    File { kind: FileKind, bytes: Vec<u8> },
    /// The backend returned links to hosted files. At least one is set.
    Links { pdf_url: Option<String>, ppt_url: Option<String> },
    /// The backend needs more input before it can produce a file.
    FollowUp(String),
}

/// JSON error body shape (`{"detail": "..."}`), also emitted by the host proxy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into() }
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Interpret one backend response.
///
/// Non-2xx statuses become [`ReplyError::Server`] with the body as text.
/// Otherwise the `content-type` picks the branch: JSON bodies are probed for
/// `pdfUrl` / `pptUrl` and then for a `{status, content}` follow-up; every
/// other content type is treated as a file, classified by [`FileKind`].
///
/// # Errors
///
/// Returns a [`ReplyError`] describing why the response carries nothing the
/// client can show.
pub fn decode_reply(status: u16, content_type: &str, body: Vec<u8>) -> Result<GenerationReply, ReplyError> {
    if !(200..300).contains(&status) {
        return Err(ReplyError::Server { status, body: String::from_utf8_lossy(&body).into_owned() });
    }

    if content_type.to_ascii_lowercase().contains("application/json") {
        return decode_json(&body);
    }

    let kind = FileKind::from_content_type(content_type);
    if body.is_empty() {
        return Err(match kind {
            FileKind::Binary => ReplyError::UnexpectedType,
            FileKind::Pdf | FileKind::Pptx => ReplyError::EmptyFile,
        });
    }
    Ok(GenerationReply::File { kind, bytes: body })
}

fn decode_json(body: &[u8]) -> Result<GenerationReply, ReplyError> {
    // Probed as a loose value: the backend mixes two unrelated JSON shapes on
    // the same endpoint.
    let value: Value = serde_json::from_slice(body).map_err(|e| ReplyError::InvalidJson(e.to_string()))?;

    let pdf_url = non_empty_str(&value, "pdfUrl");
    let ppt_url = non_empty_str(&value, "pptUrl");
    if pdf_url.is_some() || ppt_url.is_some() {
        return Ok(GenerationReply::Links { pdf_url, ppt_url });
    }

    match value.get("status").and_then(Value::as_bool) {
        Some(false) => Ok(GenerationReply::FollowUp(content_text(value.get("content")))),
        Some(true) => Err(ReplyError::StatusWithoutFile),
        None => Err(ReplyError::NoFileUrls),
    }
}

fn non_empty_str(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn content_text(content: Option<&Value>) -> String {
    match content {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

// =============================================================================
// ERROR DETAIL
// =============================================================================

/// Strip everything up to and including [`AGENT_RESPONSE_MARKER`], if present.
#[must_use]
pub fn agent_message(detail: &str) -> &str {
    match detail.find(AGENT_RESPONSE_MARKER) {
        Some(idx) => &detail[idx + AGENT_RESPONSE_MARKER.len()..],
        None => detail,
    }
}

/// Extract the user-facing message from a JSON error body.
///
/// Returns `None` when the text is not JSON or has no non-empty string
/// `detail` field.
#[must_use]
pub fn error_detail(json: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<Value>(json) else {
        return None;
    };
    let detail = value.get("detail").and_then(Value::as_str).filter(|d| !d.is_empty())?;
    Some(agent_message(detail).to_owned())
}

/// Message to show for a non-2xx body: the JSON `detail` when available,
/// else the trimmed raw text.
#[must_use]
pub fn server_error_message(body: &str) -> String {
    error_detail(body).unwrap_or_else(|| body.trim().to_owned())
}

/// Download filename for a generated file, stamped with epoch milliseconds.
#[must_use]
pub fn download_filename(kind: FileKind, millis: u64) -> String {
    format!("presentation-{millis}.{}", kind.extension())
}

/// Milliseconds since the Unix epoch from the system clock.
///
/// Not available on `wasm32-unknown-unknown`; the browser build reads
/// `Date.now()` instead.
#[must_use]
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}
