// src/processing/libvips/mod.rs

//! Native image processing via libvips-rs.
//!
//! # Architecture
//!
//! - [`runtime`]: One-time, process-wide libvips initialization.
//! - [`executor`]: Decodes, normalizes and encodes a single item.
//! - [`normalize`]: Flattens transparency for JPEG output.
//! - [`formats`]: Maps a `ConversionConfig` to `ops::*save_buffer_with_opts` calls.

mod executor;
mod formats;
mod normalize;
mod runtime;

pub use executor::convert_single;
pub use normalize::ColorMode;
pub use runtime::{codec_version, init_codec, is_initialized};
