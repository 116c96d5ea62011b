//! Image compression applied before every image upload.
//!
//! | Step | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, WebP) | `image::ImageReader` with guessed format |
//! | Downscale | `DynamicImage::resize` with `Lanczos3` |
//! | Encode | `image::codecs::jpeg::JpegEncoder`, quality stepped down |
//!
//! CPU-bound. Async callers should run it on a blocking thread.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, GenericImageView, ImageEncoder, ImageReader};

use crate::error::CoreError;

/// Longest edge after compression, in pixels.
pub const MAX_DIMENSION: u32 = 1920;
/// Size the encoder aims for.
pub const TARGET_BYTES: usize = 1024 * 1024;
/// Quality is never lowered below this, even if the target is missed.
pub const MIN_QUALITY: u8 = 40;

const START_QUALITY: u8 = 90;
const QUALITY_STEP: u8 = 10;

/// A re-encoded image ready for upload.
#[derive(Debug, Clone)]
pub struct CompressedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub quality: u8,
}

impl CompressedImage {
    pub const EXTENSION: &'static str = "jpg";
    pub const CONTENT_TYPE: &'static str = "image/jpeg";
}

/// Decode, downscale to [`MAX_DIMENSION`], and re-encode as JPEG with
/// decreasing quality until the result fits [`TARGET_BYTES`].
///
/// When even [`MIN_QUALITY`] does not fit, the smallest attempt is returned.
pub fn compress_image(data: &[u8]) -> Result<CompressedImage, CoreError> {
    let img = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| CoreError::Media(format!("Failed to read image: {e}")))?
        .decode()
        .map_err(|e| CoreError::Media(format!("Unsupported or corrupt image: {e}")))?;

    let img = downscale(img, MAX_DIMENSION);
    // JPEG carries no alpha channel.
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut quality = START_QUALITY;
    loop {
        let bytes = encode_jpeg(rgb.as_raw(), width, height, quality)?;
        if bytes.len() <= TARGET_BYTES || quality <= MIN_QUALITY {
            return Ok(CompressedImage {
                bytes,
                width,
                height,
                quality,
            });
        }
        quality = quality.saturating_sub(QUALITY_STEP).max(MIN_QUALITY);
    }
}

fn downscale(img: DynamicImage, max: u32) -> DynamicImage {
    let (w, h) = img.dimensions();
    if w.max(h) <= max {
        img
    } else {
        img.resize(max, max, FilterType::Lanczos3)
    }
}

fn encode_jpeg(raw: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .write_image(raw, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| CoreError::Media(format!("Failed to encode image: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use image::{ImageFormat, RgbImage, RgbaImage};

    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn large_image_is_downscaled_keeping_aspect() {
        let out = compress_image(&png(3840, 1920)).unwrap();
        assert_eq!((out.width, out.height), (1920, 960));
        assert!(out.bytes.len() <= TARGET_BYTES);
        assert!(out.quality >= MIN_QUALITY);
        // JPEG SOI marker
        assert_eq!(&out.bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn small_image_is_not_upscaled() {
        let out = compress_image(&png(320, 200)).unwrap();
        assert_eq!((out.width, out.height), (320, 200));
        assert_eq!(out.quality, START_QUALITY);
    }

    #[test]
    fn alpha_is_flattened() {
        let img = RgbaImage::from_pixel(64, 64, image::Rgba([10, 20, 30, 0]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        assert!(compress_image(&buf).is_ok());
    }

    #[test]
    fn garbage_is_a_media_error() {
        assert_matches!(compress_image(b"definitely not an image"), Err(CoreError::Media(_)));
    }
}
