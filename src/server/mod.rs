//! Browser-facing presentation layer.
//!
//! - [`router`]: Builds the axum router for the upload page and API
//! - [`start_server`]: Binds the listener and serves until Ctrl+C / SIGTERM

mod error;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::signal;
use tower_http::trace::TraceLayer;

use crate::utils::{ConverterError, ConverterResult, validate_save_dir};

pub use error::ApiError;
pub use routes::ConvertResponse;
pub use state::{AppState, ResultStore, StoredArchive};

/// Settings for the HTTP server, built from the command line.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body in bytes
    pub max_upload_bytes: usize,
    /// Number of recent archives kept for download
    pub keep_results: usize,
    /// Directory every archive is also written to
    pub save_dir: Option<PathBuf>,
    /// Prefix of the archive file name, `<label>_<format>.zip`
    pub archive_label: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            max_upload_bytes: 512 * 1024 * 1024,
            keep_results: 16,
            save_dir: None,
            archive_label: "heic_converted".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConverterResult<()> {
        if self.keep_results == 0 {
            return Err(ConverterError::validation("keep-results must be at least 1"));
        }

        if self.archive_label.trim().is_empty() {
            return Err(ConverterError::validation("archive label cannot be empty"));
        }

        if self.archive_label.contains(['/', '\\', '"']) {
            return Err(ConverterError::validation(format!(
                "archive label contains invalid characters: {}",
                self.archive_label
            )));
        }

        if let Some(dir) = &self.save_dir {
            validate_save_dir(dir)?;
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> ConverterResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConverterError::validation(format!("Invalid listen address: {e}")))
    }
}

/// Builds the router for the upload page and API.
pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/api/convert", post(routes::convert_upload))
        .route("/api/results/{id}", get(routes::download_archive))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the upload page until the process is asked to stop.
///
/// The codec must already be initialized.
pub async fn start_server(config: ServerConfig) -> ConverterResult<()> {
    config.validate()?;
    let addr = config.socket_addr()?;

    tracing::info!("Starting server on http://{}", addr);
    tracing::debug!(?config, "Server configuration");

    let app = router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
}
