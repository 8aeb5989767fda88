//! Notice block for errors and informational messages.
//!
//! `describe_message` turns a raw message into a title and body: the
//! "PPTX ready" notice gets fixed copy, and `Server error:` messages carrying
//! a JSON body are reduced to their `detail` (minus the agent marker).

#[cfg(test)]
#[path = "error_display_test.rs"]
mod error_display_test;

use leptos::prelude::*;

use crate::state::session::{Notice, NoticeKind};

pub const PPTX_READY_TITLE: &str = "PPTX Ready for Download";
pub const PPTX_READY_BODY: &str = "Your presentation has been generated. You can download it using the link provided.";
pub const SERVER_ERROR_TITLE: &str = "Server Error";
pub const GENERIC_ERROR_TITLE: &str = "An Error Occurred";

const PPTX_MARKER: &str = "Received PPTX";
const SERVER_ERROR_PREFIX: &str = "Server error:";

/// What the notice block shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoticeView {
    pub title: String,
    pub body: String,
    pub is_info: bool,
}

/// Classify a raw message. First matching rule wins.
pub fn describe_message(message: &str) -> NoticeView {
    if message.contains(PPTX_MARKER) {
        return NoticeView {
            title: PPTX_READY_TITLE.to_owned(),
            body: PPTX_READY_BODY.to_owned(),
            is_info: true,
        };
    }

    if message.starts_with(SERVER_ERROR_PREFIX) {
        let detail = message.find('{').and_then(|idx| contract::error_detail(&message[idx..]));
        if let Some(body) = detail {
            return NoticeView { title: SERVER_ERROR_TITLE.to_owned(), body, is_info: false };
        }
    }

    NoticeView { title: GENERIC_ERROR_TITLE.to_owned(), body: message.to_owned(), is_info: false }
}

/// Classify a notice; an `Info` notice always renders with the info style.
pub fn describe_notice(notice: &Notice) -> NoticeView {
    let mut view = describe_message(&notice.text);
    if notice.kind == NoticeKind::Info {
        view.is_info = true;
    }
    view
}

#[component]
pub fn ErrorDisplay(notice: Notice) -> impl IntoView {
    let described = describe_notice(&notice);
    let class = if described.is_info { "error-display info" } else { "error-display error" };

    view! {
        <div class=class role="status">
            <div class="error-content">
                <div class="error-title">{described.title}</div>
                <div class="error-body">{described.body}</div>
            </div>
        </div>
    }
}
