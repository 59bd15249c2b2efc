//! Taskflow enhancement server.
//!
//! Serves `POST /api/enhance-task` until interrupted with Ctrl-C.

use mockable::DefaultClock;
use std::sync::Arc;
use taskflow::{
    config::AppConfig,
    enhancement::{
        adapters::gemini::GeminiTextGenerator,
        domain::{RateLimiter, RateLimits},
        services::EnhancementGateway,
    },
    http, telemetry,
};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    telemetry::init()?;
    let config = AppConfig::from_env()?;
    info!(bind = %config.bind, models = ?config.models, "starting taskflow");

    let generator = Arc::new(GeminiTextGenerator::with_base_url(
        config.api_key.clone(),
        config.provider_url.clone(),
    ));
    let limiter = Arc::new(RateLimiter::new(
        Arc::new(DefaultClock),
        RateLimits::default(),
    ));
    let gateway = Arc::new(
        EnhancementGateway::new(generator, limiter, config.models.clone())
            .with_timeout(config.request_timeout),
    );

    let listener = TcpListener::bind(config.bind).await?;
    axum::serve(listener, http::router(gateway))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("taskflow stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "could not listen for Ctrl-C, serving until killed");
        std::future::pending::<()>().await;
    }
}
