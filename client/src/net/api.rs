//! HTTP helpers for the presentation-generation backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since generation is only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every failure comes back as a `ReplyError` so the page can render it in
//! the notice area; nothing here panics.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use contract::{GenerationReply, ReplyError};

/// Same-origin path served by the host proxy when no backend URL is baked in.
pub const FALLBACK_ENDPOINT: &str = "/api/generate";

/// Backend base URL supplied at build time through `DECKGEN_BACKEND_URL`.
pub fn configured_backend_url() -> Option<&'static str> {
    option_env!("DECKGEN_BACKEND_URL")
}

/// Resolve the generate endpoint from an optional backend base URL.
pub fn generate_endpoint(base_url: Option<&str>) -> String {
    match base_url.map(str::trim).filter(|b| !b.is_empty()) {
        Some(base) => format!("{}/generate", base.trim_end_matches('/')),
        None => FALLBACK_ENDPOINT.to_owned(),
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn transport_error(context: &str, detail: &str) -> ReplyError {
    ReplyError::Transport(format!("{context}: {detail}"))
}

/// `POST` the topic as multipart form data and decode the response.
///
/// # Errors
///
/// Returns a transport error if the request cannot be built or sent, and
/// otherwise whatever [`contract::decode_reply`] reports.
pub async fn post_generate(endpoint: &str, topic: &str) -> Result<GenerationReply, ReplyError> {
    #[cfg(feature = "hydrate")]
    {
        let form = web_sys::FormData::new().map_err(|e| transport_error("form data", &format!("{e:?}")))?;
        form.append_with_str(contract::TOPIC_FIELD, topic)
            .map_err(|e| transport_error("form data", &format!("{e:?}")))?;

        let resp = gloo_net::http::Request::post(endpoint)
            .body(form)
            .map_err(|e| transport_error("request", &e.to_string()))?
            .send()
            .await
            .map_err(|e| transport_error("request failed", &e.to_string()))?;

        let status = resp.status();
        let content_type = resp.headers().get("content-type").unwrap_or_default();
        let body = resp
            .binary()
            .await
            .map_err(|e| transport_error("reading response", &e.to_string()))?;
        contract::decode_reply(status, &content_type, body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (endpoint, topic);
        Err(ReplyError::Transport("not available on server".to_owned()))
    }
}
