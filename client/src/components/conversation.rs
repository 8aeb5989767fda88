//! Conversation transcript between the user and the generator.

use leptos::prelude::*;

use crate::state::session::{Role, SessionState};

/// Message history plus a pending indicator while a request is in flight.
#[component]
pub fn Conversation() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    view! {
        <div class="conversation">
            {move || {
                session
                    .get()
                    .messages
                    .iter()
                    .map(|msg| {
                        let is_assistant = msg.role == Role::Assistant;
                        let role = if is_assistant { "assistant" } else { "you" };
                        let content = msg.content.clone();
                        view! {
                            <div
                                class="conversation__message"
                                class:conversation__message--assistant=is_assistant
                            >
                                <span class="conversation__role">{role}</span>
                                <div class="conversation__content">{content}</div>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
            {move || {
                session
                    .get()
                    .is_loading()
                    .then(|| view! { <div class="conversation__loading">"Generating..."</div> })
            }}
        </div>
    }
}
