// src/processing/libvips/formats.rs

//! Maps a [`ConversionConfig`] to libvips format-specific buffer save options.

use libvips::ops::{self, ForeignKeep};
use libvips::VipsImage;

use crate::core::{ConversionConfig, OutputFormat};
use crate::utils::ItemError;

type Result<T> = std::result::Result<T, ItemError>;

/// zlib level 9: smallest lossless output.
const PNG_COMPRESSION: i32 = 9;

/// Encodes `image` as PNG.
///
/// Lossless: no palette quantisation, maximum deflate effort, alpha kept.
pub fn encode_png(image: &VipsImage) -> Result<Vec<u8>> {
    let opts = ops::PngsaveBufferOptions {
        compression: PNG_COMPRESSION,
        palette: false,
        keep: ForeignKeep::None, // strip metadata
        ..ops::PngsaveBufferOptions::default()
    };

    ops::pngsave_buffer_with_opts(image, &opts)
        .map_err(|e| ItemError::encode(format!("PNG save failed: {e}")))
}

/// Encodes `image` as baseline JPEG at `quality` with optimised Huffman tables.
///
/// `image` must already be normalized to three-channel sRGB.
pub fn encode_jpeg(image: &VipsImage, quality: u8) -> Result<Vec<u8>> {
    let opts = ops::JpegsaveBufferOptions {
        q: i32::from(quality),
        optimize_coding: true,
        keep: ForeignKeep::None, // strip metadata
        ..ops::JpegsaveBufferOptions::default()
    };

    ops::jpegsave_buffer_with_opts(image, &opts)
        .map_err(|e| ItemError::encode(format!("JPEG save failed: {e}")))
}

/// Dispatches to the encoder for the configured output format.
pub fn encode_as(image: &VipsImage, config: &ConversionConfig) -> Result<Vec<u8>> {
    match config.output_format {
        OutputFormat::Png => encode_png(image),
        OutputFormat::Jpg => encode_jpeg(image, config.jpeg_quality()),
    }
}
