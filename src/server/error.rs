//! Error-to-HTTP response conversion.
//!
//! Handlers return `Result<T, ApiError>` so batch-level failures reach the
//! browser as JSON with a status the upload page can tell apart.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::utils::ConverterError;

#[derive(Debug)]
pub enum ApiError {
    Converter(ConverterError),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Converter(err) => match err {
                ConverterError::EmptyBatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                ConverterError::Validation(_) => StatusCode::BAD_REQUEST,
                ConverterError::NotInitialized | ConverterError::Init(_) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                ConverterError::ArchiveAssembly(_) | ConverterError::IO(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ConverterError> for ApiError {
    fn from(err: ConverterError) -> Self {
        Self::Converter(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            Self::Converter(err) => {
                let errors: Vec<String> = match err {
                    ConverterError::EmptyBatch { errors } => {
                        errors.iter().map(ToString::to_string).collect()
                    }
                    _ => Vec::new(),
                };
                json!({
                    "error": err.to_string(),
                    "code": err.code(),
                    "errors": errors,
                })
            }
            Self::NotFound(what) => json!({
                "error": format!("{what} not found"),
                "code": "not_found",
                "errors": [],
            }),
            Self::Internal(msg) => json!({
                "error": msg,
                "code": "internal_error",
                "errors": [],
            }),
        };

        if status.is_server_error() {
            let message = body["error"].as_str().unwrap_or_default();
            tracing::error!(status = %status, error = %message, "Server error in API handler");
        }

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConversionError;
    use crate::utils::ItemError;

    #[test]
    fn empty_batch_is_unprocessable() {
        let err = ApiError::from(ConverterError::EmptyBatch {
            errors: vec![ConversionError::new("b.heic", ItemError::decode("bad"))],
        });
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn archive_failure_is_distinct_from_empty_batch() {
        let err = ApiError::from(ConverterError::archive("disk full"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_is_bad_request() {
        let response = ApiError::from(ConverterError::validation("no files")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_codec_is_unavailable() {
        let err = ApiError::from(ConverterError::NotInitialized);
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
