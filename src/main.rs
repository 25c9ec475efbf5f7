mod config;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    // A missing .env file is normal outside local development.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env();
    tracing::info!(
        max_file_size_bytes = config.limits.max_file_size_bytes,
        max_rectangles = config.limits.max_rectangles,
        max_dimension = config.limits.max_dimension,
        parse_timeout_ms = config.limits.parse_timeout_ms,
        parse_retries = config.retry.attempts,
        "parser limits configured"
    );

    let state = state::AppState::new(&config);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "rectscan listening");
    axum::serve(listener, app).await.expect("server failed");
}
