// src/processing/libvips/executor.rs

//! Converts one source item in memory: decode, normalize, encode.
//!
//! Runs synchronously. libvips uses its own internal thread pool for
//! within-image parallelism, so items are handled one at a time by the caller.

use libvips::VipsImage;
use tracing::debug;

use crate::core::{ConversionConfig, OutputFormat, SourceItem};
use crate::utils::ItemError;

use super::formats::encode_as;
use super::normalize::flatten_for_jpeg;
use super::runtime::take_error;

type Result<T> = std::result::Result<T, ItemError>;

/// Loader options: stop on truncated or damaged data instead of padding it.
const LOAD_OPTIONS: &str = "fail_on=error";

/// Decodes the raw container bytes of `source` into memory.
///
/// The loader is chosen by sniffing the content, not the file name. Every
/// pixel is read here, so damaged pixel data fails as a decode error rather
/// than later in the encoder. The returned image no longer borrows `source`.
fn decode(source: &SourceItem) -> Result<VipsImage> {
    if source.bytes.is_empty() {
        return Err(ItemError::decode("empty file"));
    }

    let image = VipsImage::new_from_buffer(&source.bytes, LOAD_OPTIONS)
        .map_err(|e| decode_error(source, e))?;
    let image = VipsImage::image_copy_memory(image).map_err(|e| decode_error(source, e))?;

    debug!(
        "Loaded '{}': {}×{} ({} bands)",
        source.name,
        image.get_width(),
        image.get_height(),
        image.get_bands()
    );

    Ok(image)
}

fn decode_error(source: &SourceItem, err: libvips::error::Error) -> ItemError {
    let detail = take_error().unwrap_or_else(|| err.to_string());
    ItemError::decode(format!("Failed to decode '{}': {detail}", source.name))
}

/// Converts one item and returns the encoded bytes.
pub fn convert_single(source: &SourceItem, config: &ConversionConfig) -> Result<Vec<u8>> {
    let image = decode(source)?;

    let image = match config.output_format {
        OutputFormat::Jpg => flatten_for_jpeg(image)?,
        OutputFormat::Png => image,
    };

    let bytes = encode_as(&image, config)?;

    debug!(
        "'{}' → {} bytes of {}",
        source.name,
        bytes.len(),
        config.output_format.label()
    );

    Ok(bytes)
}
