//! HTTP handlers for the upload page.
//!
//! Provides endpoints for:
//! - Serving the upload form
//! - Converting an uploaded batch
//! - Downloading a retained archive

use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::{ArchiveResult, SourceItem};
use crate::processing::{BatchProcessor, codec_version};
use crate::utils::{ConverterError, parse_settings, save_archive, validate_sources};

use super::error::ApiError;
use super::state::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

// =============================================================================
// Response Types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    pub id: Uuid,
    pub file_name: String,
    pub download_url: String,
    pub entry_count: usize,
    pub archive_size: u64,
    pub archive_size_mb: f64,
    pub entries: Vec<String>,
    pub errors: Vec<String>,
    pub saved_to: Option<String>,
    /// Why the copy in the save directory could not be written
    pub save_error: Option<String>,
}

/// Multipart form as sent by the upload page.
#[derive(Debug, Default)]
struct UploadForm {
    sources: Vec<SourceItem>,
    format: Option<String>,
    quality: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET / - the upload page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "codec": codec_version(),
    }))
}

/// POST /api/convert - convert an uploaded batch (multipart/form-data)
///
/// Fields: `files` (repeatable), `format` (`png` | `jpg`), `quality`
/// (`highest` | `lowest` | 1-100, JPG only).
pub async fn convert_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ConvertResponse>, ApiError> {
    let form = read_form(multipart).await?;
    let config = parse_settings(form.format.as_deref(), form.quality.as_deref())?;
    validate_sources(&form.sources)?;

    let sources = form.sources;
    info!(
        "Received {} file(s) for conversion to {}",
        sources.len(),
        config.output_format.label()
    );

    let processor = BatchProcessor::new(config);
    let result = tokio::task::spawn_blocking(move || {
        processor.process_with_progress(&sources, |progress| debug!("{}", progress.status))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Conversion task panicked: {e}")))??;

    info!(
        "Conversion complete: {} file(s) converted, {} failed, zip is {:.2} MB",
        result.entry_count,
        result.errors.len(),
        result.size_mb()
    );

    let file_name = config.output_format.archive_file_name(&state.config.archive_label);
    let archive_size = result.size_bytes();
    let archive_size_mb = result.size_mb();
    let errors = result.error_messages();
    let ArchiveResult {
        bytes,
        entry_count,
        entry_names,
        ..
    } = result;

    // The download stays available even when the save-dir copy fails
    let bytes = Bytes::from(bytes);
    let id = state.results.insert(file_name.clone(), bytes.clone()).await;

    let (saved_to, save_error) = match &state.config.save_dir {
        Some(dir) => match save_archive(dir, &file_name, &bytes).await {
            Ok(path) => {
                info!("Zip file saved to: {}", path.display());
                (Some(path.display().to_string()), None)
            }
            Err(e) => {
                warn!("Could not save {} to {}: {}", file_name, dir.display(), e);
                (None, Some(e.to_string()))
            }
        },
        None => (None, None),
    };

    Ok(Json(ConvertResponse {
        id,
        file_name,
        download_url: format!("/api/results/{id}"),
        entry_count,
        archive_size,
        archive_size_mb,
        entries: entry_names,
        errors,
        saved_to,
        save_error,
    }))
}

/// GET /api/results/{id} - download a retained archive
pub async fn download_archive(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let stored = state
        .results
        .get(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Result {id}")))?;

    let headers = [
        (header::CONTENT_TYPE, "application/zip".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", stored.file_name),
        ),
    ];

    Ok((headers, stored.bytes))
}

// =============================================================================
// Helpers
// =============================================================================

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ConverterError::validation(format!("Malformed upload: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "files" | "file" => {
                let name = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ConverterError::validation(format!("Failed to read {name}: {e}")))?;

                // An empty file input still submits one nameless part
                if name.is_empty() && data.is_empty() {
                    continue;
                }

                debug!("Uploaded file: {} ({:.2} KB)", name, data.len() as f64 / 1024.0);
                form.sources.push(SourceItem::new(name, data.to_vec()));
            }
            "format" => form.format = Some(read_text(field).await?),
            "quality" => form.quality = Some(read_text(field).await?),
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ConverterError::validation(format!("Malformed form field: {e}")).into())
}
