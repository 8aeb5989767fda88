//! Generator page: topic input, conversation, and produced files.
//!
//! The page owns the request loop. Submitting asks `SessionState` for a
//! `PendingRequest`, sends it, and hands the decoded reply back together with
//! its sequence number; the session decides whether the reply is still wanted.

#[cfg(test)]
#[path = "generator_test.rs"]
mod generator_test;

#[cfg(any(test, feature = "hydrate"))]
use contract::ReplyError;
use leptos::prelude::*;

use crate::components::conversation::Conversation;
use crate::components::error_display::ErrorDisplay;
use crate::components::file_links::FileLinks;
use crate::state::session::{Phase, SessionState};
use crate::util::object_url::BrowserObjectUrls;

/// Console severity for a failed request.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ConsoleLevel {
    Error,
    Warn,
}

/// Transport failures log as errors; replies that decoded to an error log as
/// warnings.
#[cfg(any(test, feature = "hydrate"))]
fn failure_log(seq: u64, err: &ReplyError) -> (ConsoleLevel, String) {
    if err.is_transport() {
        (ConsoleLevel::Error, format!("generation request {seq} did not reach the backend: {err}"))
    } else {
        (ConsoleLevel::Warn, format!("generation request {seq} was rejected: {err}"))
    }
}

fn submit_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Loading => "Generating...",
        Phase::AwaitingFollowUp => "Send reply",
        Phase::Idle | Phase::Complete | Phase::Failed => "Generate PPT",
    }
}

fn input_placeholder(phase: Phase) -> &'static str {
    match phase {
        Phase::AwaitingFollowUp => "Answer the question above...",
        _ => "Enter a topic...",
    }
}

#[component]
pub fn GeneratorPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    on_cleanup(move || {
        let _ = session.try_update(|s| s.release_files(&mut BrowserObjectUrls));
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let mut pending = None;
        session.update(|s| pending = s.begin_submit(&mut BrowserObjectUrls));
        let Some(pending) = pending else {
            return;
        };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let endpoint = crate::net::api::generate_endpoint(crate::net::api::configured_backend_url());
            let reply = crate::net::api::post_generate(&endpoint, &pending.prompt).await;
            if let Err(e) = &reply {
                match failure_log(pending.seq, e) {
                    (ConsoleLevel::Error, line) => leptos::logging::error!("{line}"),
                    (ConsoleLevel::Warn, line) => leptos::logging::warn!("{line}"),
                }
            }

            let mut applied = false;
            session.update(|s| applied = s.apply_reply(pending.seq, reply, &mut BrowserObjectUrls));
            if !applied {
                leptos::logging::warn!("discarded stale reply for request {}", pending.seq);
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = pending;
        }
    };

    let on_reset = move |_| session.update(|s| s.reset(&mut BrowserObjectUrls));

    let phase = move || session.get().phase;

    view! {
        <div class="container">
            <main class="card">
                <h1>"Presentation Generator"</h1>

                <Conversation/>

                <form class="generator-form" on:submit=on_submit>
                    <label class="label" for="topic">"Topic"</label>
                    <input
                        id="topic"
                        class="input"
                        type="text"
                        placeholder=move || input_placeholder(phase())
                        prop:value=move || session.get().input
                        on:input=move |ev| session.update(|s| s.input = event_target_value(&ev))
                    />
                    <div class="generator-form__actions">
                        <button class="btn" type="submit" disabled=move || session.get().is_loading()>
                            {move || submit_label(phase())}
                        </button>
                        <button class="btn ghost" type="button" on:click=on_reset>
                            "Reset"
                        </button>
                    </div>
                </form>

                {move || session.get().notice.map(|notice| view! { <ErrorDisplay notice=notice/> })}

                <FileLinks/>
            </main>
        </div>
    }
}
