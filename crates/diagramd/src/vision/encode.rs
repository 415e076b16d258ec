//! Image preprocessing for model submission.
//!
//! Uploads may be large; the model only needs enough pixels to read the
//! sketch. Everything is normalized to RGB JPEG at quality 85, downscaled so
//! neither dimension exceeds [`MAX_DIMENSION`], and wrapped as a base64 data
//! URL.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

use crate::error::ApiError;

/// Maximum width or height submitted to the model, in pixels.
const MAX_DIMENSION: u32 = 1024;

/// JPEG quality for the re-encoded image.
const JPEG_QUALITY: u8 = 85;

/// Decodes image bytes and re-encodes them as a `data:image/jpeg;base64,...`
/// URL suitable for an OpenAI-compatible `image_url` content part.
pub fn to_data_url(bytes: &[u8]) -> Result<String, ApiError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|_| ApiError::BadRequest("could not process image".to_string()))?;

    // DynamicImage::resize fits within the bounds preserving aspect ratio.
    let decoded = if decoded.width() > MAX_DIMENSION || decoded.height() > MAX_DIMENSION {
        decoded.resize(MAX_DIMENSION, MAX_DIMENSION, FilterType::Lanczos3)
    } else {
        decoded
    };
    let rgb = decoded.to_rgb8();

    let mut jpeg = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
    encoder
        .encode_image(&rgb)
        .map_err(|_| ApiError::BadRequest("could not process image".to_string()))?;

    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(&jpeg)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, image::Rgb([120, 30, 200]));
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn small_image_becomes_jpeg_data_url() {
        let url = to_data_url(&png_bytes(4, 4)).unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn oversized_image_is_downscaled() {
        let url = to_data_url(&png_bytes(2048, 512)).unwrap();
        let b64 = url.strip_prefix("data:image/jpeg;base64,").unwrap();
        let jpeg = STANDARD.decode(b64).unwrap();
        let reopened = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(reopened.width(), 1024);
        assert_eq!(reopened.height(), 256);
    }

    #[test]
    fn garbage_bytes_are_a_processing_failure() {
        assert!(to_data_url(b"not an image").is_err());
    }
}
