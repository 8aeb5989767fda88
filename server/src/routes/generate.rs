//! Same-origin generation proxy.
//!
//! When the page is built without a backend URL it posts to
//! `/api/generate`. This handler reads the `topic` field, forwards it as
//! multipart to `{DECKGEN_UPSTREAM_URL}/generate`, and relays the upstream
//! status, content headers, and body unchanged so the page decodes exactly
//! what the backend sent.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use contract::{ErrorBody, TOPIC_FIELD};

use crate::state::AppState;

/// Headers copied from the upstream reply.
const RELAYED_HEADERS: [header::HeaderName; 2] = [header::CONTENT_TYPE, header::CONTENT_DISPOSITION];

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("generation backend is not configured")]
    NotConfigured,
    #[error("missing `topic` form field")]
    MissingTopic,
    #[error("invalid multipart body: {0}")]
    InvalidForm(String),
    #[error("generation backend unreachable: {0}")]
    Upstream(String),
}

impl ProxyError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::MissingTopic | Self::InvalidForm(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

/// `POST /api/generate`
pub async fn generate(State(state): State<AppState>, mut multipart: Multipart) -> Result<Response, ProxyError> {
    let topic = read_topic(&mut multipart).await?;
    forward_topic(&state, topic).await
}

async fn read_topic(multipart: &mut Multipart) -> Result<String, ProxyError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ProxyError::InvalidForm(e.to_string()))?
    {
        if field.name() == Some(TOPIC_FIELD) {
            return field.text().await.map_err(|e| ProxyError::InvalidForm(e.to_string()));
        }
    }
    Err(ProxyError::MissingTopic)
}

fn upstream_endpoint(base: &str) -> String {
    format!("{}/generate", base.trim_end_matches('/'))
}

/// Send `topic` upstream and mirror the reply.
///
/// # Errors
///
/// Returns [`ProxyError::NotConfigured`] without an upstream URL and
/// [`ProxyError::Upstream`] when the backend cannot be reached or its body
/// cannot be read. Upstream non-2xx statuses are relayed, not errors.
pub async fn forward_topic(state: &AppState, topic: String) -> Result<Response, ProxyError> {
    let Some(base) = state.upstream_url.as_deref() else {
        return Err(ProxyError::NotConfigured);
    };
    let url = upstream_endpoint(base);

    let form = reqwest::multipart::Form::new().text(TOPIC_FIELD, topic);
    let upstream = state.http.post(&url).multipart(form).send().await.map_err(|e| {
        tracing::warn!(%url, error = %e, "generation upstream request failed");
        ProxyError::Upstream(e.to_string())
    })?;

    let status = upstream.status();
    let headers = relayed_headers(upstream.headers());
    let body: Bytes = upstream.bytes().await.map_err(|e| ProxyError::Upstream(e.to_string()))?;
    tracing::info!(status = status.as_u16(), bytes = body.len(), "relayed generation reply");

    Ok((status, headers, body).into_response())
}

fn relayed_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for name in RELAYED_HEADERS {
        if let Some(value) = upstream.get(&name) {
            headers.insert(name, value.clone());
        }
    }
    headers
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
