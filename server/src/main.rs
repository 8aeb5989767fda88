mod config;
mod routes;
mod state;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::HostConfig::from_env().expect("invalid host configuration");
    match config.upstream_url.as_deref() {
        Some(upstream) => tracing::info!(%upstream, "generation proxy enabled"),
        None => tracing::warn!("DECKGEN_UPSTREAM_URL not set, /api/generate will answer 503"),
    }

    let state = state::AppState::new(&config).expect("http client init failed");
    let app = routes::leptos_app(state).expect("leptos app init failed");

    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "deckgen host listening");
    axum::serve(listener, app).await.expect("server failed");
}
