//! Error types for the converter.
//!
//! Per-item failures ([`ItemError`]) never leave a batch; they are recorded as
//! [`ConversionError`] entries. Batch-level failures ([`ConverterError`]) abort
//! the whole call and are what the presentation layer renders as a failed run.

use std::io;
use thiserror::Error;
use serde::Serialize;

use crate::core::ConversionError;

/// Failure of a single source item. Isolated to that item.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", content = "message", rename_all = "lowercase")]
pub enum ItemError {
    /// Source bytes are not a valid or supported image
    #[error("{0}")]
    Decode(String),

    /// Normalization or encoding failed
    #[error("{0}")]
    Encode(String),
}

impl ItemError {
    pub fn decode<T: Into<String>>(msg: T) -> Self {
        Self::Decode(msg.into())
    }

    pub fn encode<T: Into<String>>(msg: T) -> Self {
        Self::Encode(msg.into())
    }
}

/// Main error type for a conversion call.
///
/// All batch-level errors are converted to this type before being returned
/// to the presentation layer.
#[derive(Error, Debug, Serialize)]
pub enum ConverterError {
    /// Not a single source converted; the per-item errors are kept for display
    #[error("No files were successfully converted")]
    EmptyBatch { errors: Vec<ConversionError> },

    /// Writing the zip failed after at least one successful conversion
    #[error("Archive assembly failed: {0}")]
    ArchiveAssembly(String),

    /// `init_codec` was never called in this process
    #[error("Image codec is not initialized")]
    NotInitialized,

    /// The codec runtime refused to start
    #[error("Codec initialization failed: {0}")]
    Init(String),

    /// Invalid conversion settings or request
    #[error("Validation error: {0}")]
    Validation(String),

    /// File IO error
    #[error("IO error: {0}")]
    IO(String),
}

/// Convenience result type for converter operations.
pub type ConverterResult<T> = Result<T, ConverterError>;

impl ConverterError {
    pub fn archive<T: Into<String>>(msg: T) -> Self {
        Self::ArchiveAssembly(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        Self::Validation(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        Self::IO(msg.into())
    }

    /// Short machine-readable code used in JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyBatch { .. } => "empty_batch",
            Self::ArchiveAssembly(_) => "archive_error",
            Self::NotInitialized => "codec_not_initialized",
            Self::Init(_) => "codec_init_error",
            Self::Validation(_) => "validation_error",
            Self::IO(_) => "io_error",
        }
    }
}

impl From<io::Error> for ConverterError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

impl From<zip::result::ZipError> for ConverterError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::ArchiveAssembly(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_error_serializes_with_stage() {
        let json = serde_json::to_value(ItemError::decode("bad header")).unwrap();
        assert_eq!(json["stage"], "decode");
        assert_eq!(json["message"], "bad header");
    }

    #[test]
    fn codes_are_distinct_for_batch_failures() {
        let empty = ConverterError::EmptyBatch { errors: Vec::new() };
        let archive = ConverterError::archive("disk full");
        assert_ne!(empty.code(), archive.code());
        assert_eq!(empty.to_string(), "No files were successfully converted");
        assert_eq!(archive.to_string(), "Archive assembly failed: disk full");
    }

    #[test]
    fn io_errors_convert() {
        let err: ConverterError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, ConverterError::IO(msg) if msg == "gone"));
    }
}
