//! Shared fixtures for the integration tests.
//!
//! The pipeline picks its decoder by sniffing content, so PNG payloads stand
//! in for HEIC uploads.

#![allow(dead_code)]

use std::io::{Cursor, Read};

use image::{DynamicImage, GrayImage, ImageBuffer, ImageFormat, LumaA, Rgb, RgbImage, Rgba, RgbaImage};
use zip::ZipArchive;

pub const CORRUPT: &[u8] = b"this is definitely not an image";

pub fn encode_png(image: DynamicImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// Opaque 20×10 colour image.
pub fn opaque_rgb() -> Vec<u8> {
    let img: RgbImage = ImageBuffer::from_fn(20, 10, |x, y| Rgb([(x * 12) as u8, (y * 25) as u8, 128]));
    encode_png(DynamicImage::ImageRgb8(img))
}

/// Opaque 16×16 greyscale image.
pub fn opaque_gray() -> Vec<u8> {
    let img: GrayImage = ImageBuffer::from_fn(16, 16, |x, _| image::Luma([(x * 16) as u8]));
    encode_png(DynamicImage::ImageLuma8(img))
}

/// 32×32 colour image: left half fully transparent red, right half opaque blue.
pub fn transparent_rgba() -> Vec<u8> {
    let img: RgbaImage = ImageBuffer::from_fn(32, 32, |x, _| {
        if x < 16 {
            Rgba([255, 0, 0, 0])
        } else {
            Rgba([0, 0, 255, 255])
        }
    });
    encode_png(DynamicImage::ImageRgba8(img))
}

/// 32×32 luminance+alpha image: left half fully transparent black, right half opaque black.
pub fn transparent_luma_alpha() -> Vec<u8> {
    let img: ImageBuffer<LumaA<u8>, Vec<u8>> =
        ImageBuffer::from_fn(32, 32, |x, _| if x < 16 { LumaA([0, 0]) } else { LumaA([0, 255]) });
    encode_png(DynamicImage::ImageLumaA8(img))
}

/// 32×32 indexed-colour image with a `tRNS` chunk: palette entry 0 is
/// transparent red (left half), entry 1 opaque blue (right half).
pub fn transparent_palette() -> Vec<u8> {
    let pixels: Vec<u8> = (0..32 * 32).map(|i| if i % 32 < 16 { 0 } else { 1 }).collect();

    let mut buf = Vec::new();
    let mut encoder = png::Encoder::new(&mut buf, 32, 32);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(vec![255, 0, 0, 0, 0, 255]);
    encoder.set_trns(vec![0, 255]);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(&pixels).unwrap();
    writer.finish().unwrap();
    buf
}

/// 16-bit variant of [`transparent_rgba`].
pub fn transparent_rgba16() -> Vec<u8> {
    let img: ImageBuffer<Rgba<u16>, Vec<u16>> = ImageBuffer::from_fn(32, 24, |x, _| {
        if x < 16 {
            Rgba([65535, 0, 0, 0])
        } else {
            Rgba([0, 0, 65535, 65535])
        }
    });
    encode_png(DynamicImage::ImageRgba16(img))
}

/// 16-bit variant of [`transparent_luma_alpha`].
pub fn transparent_luma_alpha16() -> Vec<u8> {
    let img: ImageBuffer<LumaA<u16>, Vec<u16>> =
        ImageBuffer::from_fn(32, 24, |x, _| if x < 16 { LumaA([0, 0]) } else { LumaA([0, 65535]) });
    encode_png(DynamicImage::ImageLumaA16(img))
}

/// First half of a valid PNG: intact header, cut-off pixel data.
pub fn truncated() -> Vec<u8> {
    let mut bytes = opaque_rgb();
    bytes.truncate(bytes.len() / 2);
    bytes
}

/// Entry names of a zip, in archive order.
pub fn zip_entry_names(bytes: &[u8]) -> Vec<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

/// Decoded image stored under `name` in the zip.
pub fn zip_entry_image(bytes: &[u8], name: &str) -> DynamicImage {
    let mut archive = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut content = Vec::new();
    entry.read_to_end(&mut content).unwrap();
    image::load_from_memory(&content).unwrap()
}
