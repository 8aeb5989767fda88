//! Generation session: conversation, request lifecycle, and produced files.
//!
//! DESIGN
//! ======
//! Every transition is a plain method on [`SessionState`]; the page only wires
//! signals and the network call to them. A session moves through
//! `Idle -> Loading -> {Complete, AwaitingFollowUp, Failed}` and any
//! non-loading phase may submit again.
//!
//! Each submission takes the next `request_seq`. Replies are applied only if
//! they carry the current sequence, so a reset or a newer submission makes an
//! in-flight reply inert. Object URLs created for file replies are owned here
//! and revoked when replaced, on reset, and on release.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use contract::{FileKind, GenerationReply, ReplyError};

use crate::util::object_url::ObjectUrls;

pub const EMPTY_TOPIC_MESSAGE: &str = "Please enter a topic.";
pub const PPTX_RECEIVED_MESSAGE: &str =
    "Received PPTX. If you want a PDF preview, have the backend also return a PDF or pdfUrl.";
pub const UNKNOWN_FILE_MESSAGE: &str = "Received unknown file type. Provided a download link.";

/// Where the session is in its request lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The backend asked a follow-up question.
    AwaitingFollowUp,
    /// A file or file link is available.
    Complete,
    /// The last request failed; the notice explains why.
    Failed,
}

/// Author of a conversation message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// A single conversation message. Never edited after it is appended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self { id: uuid::Uuid::new_v4().to_string(), role, content: content.into() }
    }
}

/// Severity of a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Message shown in the notice area above the results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }
}

/// A produced file, either a local object URL or a backend-hosted link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileLink {
    pub url: String,
    pub kind: FileKind,
    /// Object URL created by this session; must be revoked when dropped.
    pub owned: bool,
}

/// A validated submission the page must now send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingRequest {
    pub seq: u64,
    pub prompt: String,
}

/// State for the generator page.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub input: String,
    pub messages: Vec<Message>,
    pub phase: Phase,
    /// Preview slot.
    pub pdf: Option<FileLink>,
    /// Download slot (PPTX or an unrecognized file).
    pub ppt: Option<FileLink>,
    pub notice: Option<Notice>,
    pub request_seq: u64,
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Validate the current input and start a request.
    ///
    /// Returns `None` without touching the network when a request is already
    /// in flight, or when the input is blank (which sets a validation notice).
    pub fn begin_submit(&mut self, urls: &mut impl ObjectUrls) -> Option<PendingRequest> {
        if self.is_loading() {
            return None;
        }

        let prompt = self.input.trim().to_owned();
        if prompt.is_empty() {
            self.notice = Some(Notice::error(EMPTY_TOPIC_MESSAGE));
            return None;
        }

        self.notice = None;
        self.release_files(urls);
        self.messages.push(Message::new(Role::User, prompt.clone()));
        self.input.clear();
        self.request_seq += 1;
        self.phase = Phase::Loading;
        Some(PendingRequest { seq: self.request_seq, prompt })
    }

    /// Apply the outcome of request `seq`.
    ///
    /// Returns `false` (and changes nothing) when `seq` is stale.
    pub fn apply_reply(
        &mut self,
        seq: u64,
        reply: Result<GenerationReply, ReplyError>,
        urls: &mut impl ObjectUrls,
    ) -> bool {
        if seq != self.request_seq || !self.is_loading() {
            return false;
        }

        match reply {
            Ok(GenerationReply::File { kind, bytes }) => match urls.create(&bytes, kind.mime()) {
                Ok(url) => {
                    let link = FileLink { url, kind, owned: true };
                    match kind {
                        FileKind::Pdf => self.set_pdf(Some(link), urls),
                        FileKind::Pptx => {
                            self.set_ppt(Some(link), urls);
                            self.notice = Some(Notice::info(PPTX_RECEIVED_MESSAGE));
                        }
                        FileKind::Binary => {
                            self.set_ppt(Some(link), urls);
                            self.notice = Some(Notice::info(UNKNOWN_FILE_MESSAGE));
                        }
                    }
                    self.phase = Phase::Complete;
                }
                Err(e) => self.fail(e),
            },
            Ok(GenerationReply::Links { pdf_url, ppt_url }) => {
                let pdf = pdf_url.map(|url| FileLink { url, kind: FileKind::Pdf, owned: false });
                let ppt = ppt_url.map(|url| FileLink { url, kind: FileKind::Pptx, owned: false });
                self.set_pdf(pdf, urls);
                self.set_ppt(ppt, urls);
                self.phase = Phase::Complete;
            }
            Ok(GenerationReply::FollowUp(content)) => {
                self.messages.push(Message::new(Role::Assistant, content));
                self.phase = Phase::AwaitingFollowUp;
            }
            Err(err) => self.fail(err.to_string()),
        }
        true
    }

    /// Clear everything and return to `Idle`. In-flight replies become stale.
    pub fn reset(&mut self, urls: &mut impl ObjectUrls) {
        self.release_files(urls);
        self.input.clear();
        self.messages.clear();
        self.notice = None;
        self.phase = Phase::Idle;
        self.request_seq += 1;
    }

    /// Drop both file slots, revoking any object URLs this session created.
    pub fn release_files(&mut self, urls: &mut impl ObjectUrls) {
        self.set_pdf(None, urls);
        self.set_ppt(None, urls);
    }

    fn set_pdf(&mut self, link: Option<FileLink>, urls: &mut impl ObjectUrls) {
        let previous = std::mem::replace(&mut self.pdf, link);
        revoke_owned(previous, urls);
    }

    fn set_ppt(&mut self, link: Option<FileLink>, urls: &mut impl ObjectUrls) {
        let previous = std::mem::replace(&mut self.ppt, link);
        revoke_owned(previous, urls);
    }

    fn fail(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::error(message));
        self.phase = Phase::Failed;
    }
}

fn revoke_owned(link: Option<FileLink>, urls: &mut impl ObjectUrls) {
    if let Some(link) = link.filter(|l| l.owned) {
        urls.revoke(&link.url);
    }
}
