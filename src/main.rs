//! ODS gateway server binary.
//!
//! Loads configuration, wires the ODS FHIR client into the query handlers and serves the REST
//! API until SIGINT/SIGTERM, draining in-flight requests before exit.

mod config;
mod telemetry;

use api_rest::{AppState, HttpSettings};
use config::Config;
use ods_core::OdsGatewayApp;
use ods_fhir_client::OdsFhirHttpClient;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Headroom so an upstream deadline reports 504 before the boundary timeout answers 408.
const BOUNDARY_TIMEOUT_HEADROOM: Duration = Duration::from_secs(1);

/// Main entry point for the ODS gateway
///
/// # Environment Variables
/// - `PORT`: listen port on 0.0.0.0 (default: 8080)
/// - `API_KEY`, `API_KEYS_ALLOWED`: accepted API keys
/// - `ODS_FHIR_API_SERVER_URL`: upstream ODS FHIR base URL
/// - `REQUEST_TIMEOUT_SECS`: upstream deadline (default: 30)
/// - `CORS_ALLOWED_ORIGINS`: comma-separated origin patterns
/// - `APP_ENV`, `LOG_LEVEL`: log format and level
///
/// # Errors
/// Returns an error if:
/// - any configuration value is invalid,
/// - the logging configuration cannot be initialised,
/// - the ODS API client cannot be built,
/// - the listen address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    telemetry::init_tracing(config.log_level, config.is_local())?;

    if config.api_keys.is_empty() {
        tracing::warn!("no API keys configured, organisation endpoints will reject every request");
    }

    let fhir_client =
        OdsFhirHttpClient::new(&config.ods_fhir_api_server_url, config.request_timeout)?;
    let app = OdsGatewayApp::new(Arc::new(fhir_client));

    let settings = HttpSettings {
        cors_allowed_origins: config.cors_allowed_origins,
        request_timeout: config.request_timeout + BOUNDARY_TIMEOUT_HEADROOM,
        ..HttpSettings::default()
    };
    let router = api_rest::router(AppState::new(app, config.api_keys), &settings);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(
        upstream = %config.ods_fhir_api_server_url,
        env = %config.app_env,
        "++ Starting ODS gateway on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- ODS gateway stopped");
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received, draining connections");
}
