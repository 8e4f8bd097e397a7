//! PNG encoding for portraits and converted scans.
//!
//! Uses the `image` crate's PNG encoder with fixed settings, so the same
//! pixels always produce the same bytes. Re-running a batch therefore
//! leaves unchanged outputs byte-identical.

use image::codecs::png::PngEncoder;
use image::{ColorType, DynamicImage, ExtendedColorType, ImageEncoder};
use thiserror::Error;

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode an image to PNG bytes.
///
/// 8- and 16-bit layouts are written as-is. Floating point images are
/// converted to RGBA8 first since PNG cannot store them.
///
/// # Errors
///
/// Returns an error for zero-sized images or if the encoder fails.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let converted;
    let image = match image.color() {
        ColorType::Rgb32F | ColorType::Rgba32F => {
            converted = DynamicImage::ImageRgba8(image.to_rgba8());
            &converted
        }
        _ => image,
    };

    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(
            image.as_bytes(),
            width,
            height,
            ExtendedColorType::from(image.color()),
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer)
}
