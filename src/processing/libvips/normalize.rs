// src/processing/libvips/normalize.rs

//! Colour-mode normalization for targets without an alpha channel.
//!
//! libvips expands palette images to explicit bands at load time, so a
//! palette source shows up here as colour or colour+alpha.

use libvips::ops::{self, BandFormat, Interpretation};
use libvips::VipsImage;
use tracing::debug;

use crate::utils::ItemError;

type Result<T> = std::result::Result<T, ItemError>;

/// Band layout of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Luminance,
    LuminanceAlpha,
    Rgb,
    Rgba,
    /// Anything else (CMYK, multiband), identified by its band count
    Other { bands: i32, alpha: bool },
}

impl ColorMode {
    pub fn from_layout(bands: i32, has_alpha: bool) -> Self {
        match (bands, has_alpha) {
            (1, false) => Self::Luminance,
            (2, true) => Self::LuminanceAlpha,
            (3, false) => Self::Rgb,
            (4, true) => Self::Rgba,
            (bands, alpha) => Self::Other { bands, alpha },
        }
    }

    pub fn of(image: &VipsImage) -> Self {
        Self::from_layout(image.get_bands(), image.image_hasalpha())
    }

    /// Whether pixels in this mode can be (partially) transparent.
    pub fn has_transparency(&self) -> bool {
        match self {
            Self::LuminanceAlpha | Self::Rgba => true,
            Self::Other { alpha, .. } => *alpha,
            Self::Luminance | Self::Rgb => false,
        }
    }
}

/// Largest sample value for the image's band format: opaque white.
fn white_level(image: &VipsImage) -> f64 {
    match image.get_format() {
        Ok(BandFormat::Ushort) => 65535.0,
        _ => 255.0,
    }
}

/// Produces the three-channel, 8-bit sRGB image a JPEG encoder needs.
///
/// Transparent modes are composited onto opaque white using their own alpha;
/// opaque modes get a plain colour-space conversion.
pub fn flatten_for_jpeg(image: VipsImage) -> Result<VipsImage> {
    let mode = ColorMode::of(&image);

    let opaque = if mode.has_transparency() {
        let white = white_level(&image);
        debug!("Flattening {:?} image onto white (max alpha {})", mode, white);
        let opts = ops::FlattenOptions {
            background: vec![white],
            max_alpha: white,
        };
        ops::flatten_with_opts(&image, &opts)
            .map_err(|e| ItemError::encode(format!("Flatten failed: {e}")))?
    } else {
        image
    };

    let srgb = ops::colourspace(&opaque, Interpretation::Srgb)
        .map_err(|e| ItemError::encode(format!("Colour conversion failed: {e}")))?;

    let srgb = match srgb.get_format() {
        Ok(BandFormat::Uchar) => srgb,
        _ => ops::cast(&srgb, BandFormat::Uchar)
            .map_err(|e| ItemError::encode(format!("Cast to 8-bit failed: {e}")))?,
    };

    if srgb.get_bands() != 3 {
        return Err(ItemError::encode(format!(
            "Unsupported colour mode {:?} after normalization",
            ColorMode::of(&srgb)
        )));
    }

    Ok(srgb)
}
