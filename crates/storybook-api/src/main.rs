//! Storybook API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use storybook_api::config::AppConfig;
use storybook_api::routes;
use storybook_api::state::AppState;
use storybook_core::clock::SystemClock;
use storybook_openai::{ImageGenerationClient, TextGenerationClient};
use storybook_pipeline::application::rate_limiter::RateLimiter;
use storybook_pipeline::domain::prompt::PromptComposer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env file is fine; the process environment still applies.
    dotenv::dotenv().ok();

    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Storybook API server");

    // Read configuration from environment.
    let config = AppConfig::from_env()?;
    let addr = config.bind_address()?;

    // One connection pool shared by both provider clients.
    let http = reqwest::Client::builder().build()?;
    let text_generator = Arc::new(TextGenerationClient::new(
        http.clone(),
        config.openai.clone(),
    ));
    let image_generator = Arc::new(ImageGenerationClient::new(http, config.openai.clone()));
    let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit, Arc::new(SystemClock)));

    tracing::info!(
        base_url = %config.openai.base_url(),
        chat_model = %config.chat_model,
        max_requests = config.rate_limit.max_requests(),
        window_secs = config.rate_limit.window().num_seconds(),
        trust_forwarded_for = config.trust_forwarded_for,
        "configuration loaded"
    );

    // Build application state.
    let app_state = AppState::new(
        PromptComposer::new(config.chat_model),
        text_generator,
        image_generator,
        rate_limiter,
    )
    .with_trust_forwarded_for(config.trust_forwarded_for);

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = routes::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server.
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
