//! Core types for conversion settings, inputs and results.

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::utils::{ConverterError, ConverterResult, ItemError};

/// One uploaded image: the original file name and its raw bytes.
#[derive(Debug, Clone)]
pub struct SourceItem {
    /// File name as supplied by the uploader
    pub name: String,
    /// Raw container bytes
    pub bytes: Vec<u8>,
}

impl SourceItem {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Target raster format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[serde(alias = "PNG")]
    Png,
    #[serde(alias = "JPG", alias = "jpeg", alias = "JPEG")]
    Jpg,
}

/// The two quality levels offered for JPG output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    Highest,
    Lowest,
}

impl QualityPreset {
    /// Encoder quality for this preset.
    pub fn quality(&self) -> u8 {
        match self {
            Self::Highest => 95,
            Self::Lowest => 10,
        }
    }
}

/// Conversion settings for one batch.
///
/// `quality` only matters for JPG; PNG output is lossless and ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionConfig {
    #[serde(rename = "outputFormat")]
    pub output_format: OutputFormat,
    #[serde(default)]
    pub quality: Option<u8>,
}

impl ConversionConfig {
    pub fn png() -> Self {
        Self {
            output_format: OutputFormat::Png,
            quality: None,
        }
    }

    pub fn jpg(quality: u8) -> Self {
        Self {
            output_format: OutputFormat::Jpg,
            quality: Some(quality),
        }
    }

    pub fn jpg_preset(preset: QualityPreset) -> Self {
        Self::jpg(preset.quality())
    }

    /// Quality passed to the JPEG encoder. Absent quality means the highest preset.
    pub fn jpeg_quality(&self) -> u8 {
        self.quality.unwrap_or(QualityPreset::Highest.quality())
    }

    /// Rejects settings the encoder cannot honour.
    pub fn validate(&self) -> ConverterResult<()> {
        if self.output_format == OutputFormat::Jpg {
            let q = self.jpeg_quality();
            if !(1..=100).contains(&q) {
                return Err(ConverterError::validation(format!(
                    "Invalid quality value: {q}. Must be between 1 and 100"
                )));
            }
        }
        Ok(())
    }
}

/// One successfully encoded output, alive only while the archive is assembled.
#[derive(Debug, Clone)]
pub struct ConvertedItem {
    pub output_name: String,
    pub bytes: Vec<u8>,
}

/// Record of a source item that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionError {
    pub source_name: String,
    /// "decode" or "encode"
    pub stage: &'static str,
    pub message: String,
}

impl ConversionError {
    pub fn new(source_name: impl Into<String>, error: ItemError) -> Self {
        let (stage, message) = match error {
            ItemError::Decode(msg) => ("decode", msg),
            ItemError::Encode(msg) => ("encode", msg),
        };
        Self {
            source_name: source_name.into(),
            stage,
            message,
        }
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source_name, self.message)
    }
}

/// Outcome of one successful pipeline call.
///
/// Invariant: `entry_count + errors.len()` equals the number of sources.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveResult {
    /// Zip archive bytes
    #[serde(skip)]
    pub bytes: Vec<u8>,
    /// Number of entries written to the archive
    pub entry_count: usize,
    /// Archive entry names, in input order
    pub entry_names: Vec<String>,
    /// Per-item failures, in input order
    pub errors: Vec<ConversionError>,
}

impl ArchiveResult {
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Archive size in megabytes, as shown in the "Zip File Size" metric.
    pub fn size_mb(&self) -> f64 {
        self.bytes.len() as f64 / (1024.0 * 1024.0)
    }

    /// Human readable `"<source>: <message>"` lines.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_map_to_fixed_qualities() {
        assert_eq!(QualityPreset::Highest.quality(), 95);
        assert_eq!(QualityPreset::Lowest.quality(), 10);
        assert_eq!(ConversionConfig::jpg_preset(QualityPreset::Lowest).quality, Some(10));
    }

    #[test]
    fn jpg_without_quality_uses_highest() {
        let config = ConversionConfig {
            output_format: OutputFormat::Jpg,
            quality: None,
        };
        assert_eq!(config.jpeg_quality(), 95);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn jpg_quality_out_of_range_is_rejected() {
        assert!(ConversionConfig::jpg(0).validate().is_err());
        assert!(ConversionConfig::jpg(101).validate().is_err());
        assert!(ConversionConfig::jpg(1).validate().is_ok());
        assert!(ConversionConfig::jpg(100).validate().is_ok());
    }

    #[test]
    fn png_ignores_quality() {
        let config = ConversionConfig {
            output_format: OutputFormat::Png,
            quality: Some(0),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_deserializes_from_frontend_json() {
        let config: ConversionConfig =
            serde_json::from_str(r#"{"outputFormat":"JPG","quality":10}"#).unwrap();
        assert_eq!(config, ConversionConfig::jpg(10));

        let config: ConversionConfig = serde_json::from_str(r#"{"outputFormat":"png"}"#).unwrap();
        assert_eq!(config, ConversionConfig::png());
    }

    #[test]
    fn conversion_error_displays_source_and_message() {
        let err = ConversionError::new("b.heic", ItemError::decode("not an image"));
        assert_eq!(err.stage, "decode");
        assert_eq!(err.to_string(), "b.heic: not an image");
    }

    #[test]
    fn size_mb_uses_binary_megabytes() {
        let result = ArchiveResult {
            bytes: vec![0; 1024 * 1024],
            entry_count: 1,
            entry_names: vec!["a.png".into()],
            errors: Vec::new(),
        };
        assert_eq!(result.size_bytes(), 1_048_576);
        assert!((result.size_mb() - 1.0).abs() < f64::EPSILON);
    }
}
