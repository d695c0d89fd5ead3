//! Core conversion types.
//!
//! This module contains the fundamental types used throughout the crate:
//! - [`SourceItem`]: One uploaded image
//! - [`ConversionConfig`]: Target format and quality for a batch
//! - [`ArchiveResult`]: The zip and per-item errors produced by a batch
//! - [`Progress`]: Progress tracking for batch operations

mod types;
mod progress;

pub use types::{
    ArchiveResult, ConversionConfig, ConversionError, ConvertedItem, OutputFormat,
    QualityPreset, SourceItem,
};
pub use progress::{Progress, ProgressType};
