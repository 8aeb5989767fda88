use super::*;
use crate::util::object_url::MemoryObjectUrls;
use contract::PPTX_MIME;

fn submitted(input: &str, urls: &mut MemoryObjectUrls) -> (SessionState, PendingRequest) {
    let mut state = SessionState { input: input.to_owned(), ..SessionState::default() };
    let pending = state.begin_submit(urls).expect("valid input should start a request");
    (state, pending)
}

fn file(kind: FileKind, bytes: &[u8]) -> Result<GenerationReply, ReplyError> {
    Ok(GenerationReply::File { kind, bytes: bytes.to_vec() })
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn session_state_defaults_to_idle_and_empty() {
    let state = SessionState::default();
    assert_eq!(state.phase, Phase::Idle);
    assert!(state.messages.is_empty());
    assert!(state.pdf.is_none());
    assert!(state.ppt.is_none());
    assert!(state.notice.is_none());
    assert_eq!(state.request_seq, 0);
}

// =============================================================
// begin_submit
// =============================================================

#[test]
fn blank_topic_sets_validation_notice_without_request() {
    let mut urls = MemoryObjectUrls::default();
    let mut state = SessionState { input: "   \t".to_owned(), ..SessionState::default() };
    assert!(state.begin_submit(&mut urls).is_none());
    assert_eq!(state.notice, Some(Notice::error(EMPTY_TOPIC_MESSAGE)));
    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(state.request_seq, 0);
    assert!(state.messages.is_empty());
}

#[test]
fn submit_appends_user_message_clears_input_and_loads() {
    let mut urls = MemoryObjectUrls::default();
    let (state, pending) = submitted("  Ocean currents ", &mut urls);
    assert_eq!(pending, PendingRequest { seq: 1, prompt: "Ocean currents".to_owned() });
    assert!(state.input.is_empty());
    assert!(state.is_loading());
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].role, Role::User);
    assert_eq!(state.messages[0].content, "Ocean currents");
}

#[test]
fn submit_while_loading_is_ignored() {
    let mut urls = MemoryObjectUrls::default();
    let (mut state, _) = submitted("first", &mut urls);
    state.input = "second".to_owned();
    assert!(state.begin_submit(&mut urls).is_none());
    assert_eq!(state.request_seq, 1);
    assert_eq!(state.input, "second");
}

#[test]
fn resubmit_revokes_previous_file_and_clears_notice() {
    let mut urls = MemoryObjectUrls::default();
    let (mut state, pending) = submitted("deck", &mut urls);
    assert!(state.apply_reply(pending.seq, file(FileKind::Pptx, b"PK"), &mut urls));
    let old = state.ppt.clone().unwrap().url;

    state.input = "another".to_owned();
    let next = state.begin_submit(&mut urls).unwrap();
    assert_eq!(next.seq, 2);
    assert!(state.ppt.is_none());
    assert!(state.notice.is_none());
    assert_eq!(urls.revoked, vec![old]);
}

// =============================================================
// apply_reply: files
// =============================================================

#[test]
fn pdf_reply_fills_pdf_slot_only() {
    let mut urls = MemoryObjectUrls::default();
    let (mut state, pending) = submitted("topic", &mut urls);
    assert!(state.apply_reply(pending.seq, file(FileKind::Pdf, b"%PDF"), &mut urls));

    let pdf = state.pdf.clone().unwrap();
    assert!(pdf.owned);
    assert_eq!(pdf.kind, FileKind::Pdf);
    assert_eq!(urls.created[0].1.as_deref(), Some("application/pdf"));
    assert!(state.ppt.is_none());
    assert!(state.notice.is_none());
    assert!(state.is_complete());
}

#[test]
fn pptx_reply_fills_ppt_slot_completes_and_emits_info_notice() {
    let mut urls = MemoryObjectUrls::default();
    let (mut state, pending) = submitted("topic", &mut urls);
    assert!(state.apply_reply(pending.seq, file(FileKind::Pptx, b"PK\x03\x04"), &mut urls));

    assert_eq!(state.ppt.as_ref().map(|l| l.kind), Some(FileKind::Pptx));
    assert_eq!(urls.created[0].1.as_deref(), Some(PPTX_MIME));
    assert!(state.pdf.is_none());
    assert!(state.is_complete());
    let notice = state.notice.unwrap();
    assert_eq!(notice.kind, NoticeKind::Info);
    assert!(notice.text.contains("Received PPTX"));
}

#[test]
fn unknown_binary_reply_offers_untyped_download() {
    let mut urls = MemoryObjectUrls::default();
    let (mut state, pending) = submitted("topic", &mut urls);
    assert!(state.apply_reply(pending.seq, file(FileKind::Binary, b"??"), &mut urls));

    assert_eq!(urls.created[0].1, None);
    assert_eq!(state.ppt.as_ref().map(|l| l.kind), Some(FileKind::Binary));
    assert_eq!(state.notice, Some(Notice::info(UNKNOWN_FILE_MESSAGE)));
}

#[test]
fn object_url_failure_marks_session_failed() {
    let mut urls = MemoryObjectUrls { fail_with: Some("quota exceeded".to_owned()), ..MemoryObjectUrls::default() };
    let (mut state, pending) = submitted("topic", &mut urls);
    assert!(state.apply_reply(pending.seq, file(FileKind::Pdf, b"%PDF"), &mut urls));
    assert_eq!(state.phase, Phase::Failed);
    assert_eq!(state.notice, Some(Notice::error("quota exceeded")));
    assert!(state.pdf.is_none());
}

// =============================================================
// apply_reply: links, follow-ups, errors
// =============================================================

#[test]
fn links_reply_stores_unowned_urls() {
    let mut urls = MemoryObjectUrls::default();
    let (mut state, pending) = submitted("topic", &mut urls);
    let reply = Ok(GenerationReply::Links { pdf_url: Some("https://cdn/x.pdf".to_owned()), ppt_url: None });
    assert!(state.apply_reply(pending.seq, reply, &mut urls));

    assert_eq!(
        state.pdf,
        Some(FileLink { url: "https://cdn/x.pdf".to_owned(), kind: FileKind::Pdf, owned: false })
    );
    assert!(state.ppt.is_none());
    assert!(urls.created.is_empty());

    state.reset(&mut urls);
    assert!(urls.revoked.is_empty());
}

#[test]
fn follow_up_appends_assistant_message_and_awaits() {
    let mut urls = MemoryObjectUrls::default();
    let (mut state, pending) = submitted("topic", &mut urls);
    let reply = Ok(GenerationReply::FollowUp("How many slides?".to_owned()));
    assert!(state.apply_reply(pending.seq, reply, &mut urls));

    assert_eq!(state.phase, Phase::AwaitingFollowUp);
    assert!(!state.is_complete());
    assert_eq!(state.messages.len(), 2);
    assert_eq!(state.messages[1].role, Role::Assistant);
    assert_eq!(state.messages[1].content, "How many slides?");

    state.input = "Five".to_owned();
    let next = state.begin_submit(&mut urls).unwrap();
    assert_eq!(next.prompt, "Five");
    assert_eq!(state.messages.len(), 3);
}

#[test]
fn empty_file_error_does_not_complete() {
    let mut urls = MemoryObjectUrls::default();
    let (mut state, pending) = submitted("topic", &mut urls);
    assert!(state.apply_reply(pending.seq, Err(ReplyError::EmptyFile), &mut urls));
    assert!(!state.is_complete());
    assert_eq!(state.phase, Phase::Failed);
    assert_eq!(state.notice, Some(Notice::error("Received empty file from server")));
}

#[test]
fn server_error_is_displayed_with_status_prefix() {
    let mut urls = MemoryObjectUrls::default();
    let (mut state, pending) = submitted("topic", &mut urls);
    let err = ReplyError::Server { status: 500, body: r#"{"detail":"boom"}"#.to_owned() };
    assert!(state.apply_reply(pending.seq, Err(err), &mut urls));
    assert_eq!(state.notice.unwrap().text, r#"Server error: 500 {"detail":"boom"}"#);
}

#[test]
fn failed_session_can_submit_again() {
    let mut urls = MemoryObjectUrls::default();
    let (mut state, pending) = submitted("topic", &mut urls);
    state.apply_reply(pending.seq, Err(ReplyError::Transport("Failed to fetch".to_owned())), &mut urls);
    state.input = "retry".to_owned();
    assert!(state.begin_submit(&mut urls).is_some());
    assert!(state.is_loading());
}

// =============================================================
// Stale replies and reset
// =============================================================

#[test]
fn stale_reply_after_reset_is_discarded() {
    let mut urls = MemoryObjectUrls::default();
    let (mut state, pending) = submitted("topic", &mut urls);
    state.reset(&mut urls);

    assert!(!state.apply_reply(pending.seq, file(FileKind::Pdf, b"%PDF"), &mut urls));
    assert!(state.pdf.is_none());
    assert!(urls.created.is_empty());
    assert_eq!(state.phase, Phase::Idle);
}

#[test]
fn reply_for_older_sequence_is_discarded() {
    let mut urls = MemoryObjectUrls::default();
    let (mut state, first) = submitted("topic", &mut urls);
    state.apply_reply(first.seq, Ok(GenerationReply::FollowUp("More?".to_owned())), &mut urls);
    state.input = "yes".to_owned();
    let second = state.begin_submit(&mut urls).unwrap();

    assert!(!state.apply_reply(first.seq, Err(ReplyError::EmptyFile), &mut urls));
    assert!(state.notice.is_none());
    assert!(state.apply_reply(second.seq, file(FileKind::Pdf, b"%PDF"), &mut urls));
    assert!(state.is_complete());
}

#[test]
fn reset_revokes_owned_urls_and_clears_everything() {
    let mut urls = MemoryObjectUrls::default();
    let (mut state, pending) = submitted("topic", &mut urls);
    state.apply_reply(pending.seq, file(FileKind::Pptx, b"PK"), &mut urls);
    state.input = "draft".to_owned();

    state.reset(&mut urls);
    assert!(urls.live().is_empty());
    assert!(state.input.is_empty());
    assert!(state.messages.is_empty());
    assert!(state.ppt.is_none());
    assert!(state.notice.is_none());
    assert_eq!(state.phase, Phase::Idle);
}

#[test]
fn message_ids_are_unique() {
    let mut urls = MemoryObjectUrls::default();
    let (mut state, pending) = submitted("topic", &mut urls);
    state.apply_reply(pending.seq, Ok(GenerationReply::FollowUp("?".to_owned())), &mut urls);
    assert_ne!(state.messages[0].id, state.messages[1].id);
}
