//! # Quill Server
//!
//! The Actix-web entry point of the Quill blog.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

#[cfg(feature = "rate-limit")]
use std::sync::Arc;

#[cfg(feature = "rate-limit")]
use quill_core::ports::RateLimiter;
#[cfg(feature = "rate-limit")]
use quill_infra::InMemoryRateLimiter;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[cfg(feature = "rate-limit")]
use middleware::rate_limit::RateLimitMiddleware;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        media_root = %config.media_root.display(),
        "Starting Quill server"
    );

    let state = AppState::new(&config).await.map_err(|e| {
        tracing::error!(error = %e, "Startup failed");
        std::io::Error::other(e)
    })?;
    let state = web::Data::new(state);

    #[cfg(feature = "rate-limit")]
    let limiter: Arc<dyn RateLimiter> = Arc::new(InMemoryRateLimiter::new(config.rate_limit.clone()));

    HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .configure(handlers::configure_routes)
            .default_service(web::to(handlers::not_found));

        #[cfg(feature = "rate-limit")]
        let app = app.wrap(RateLimitMiddleware::new(limiter.clone()));

        app.wrap(TracingLogger::default())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
