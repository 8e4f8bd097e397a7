//! Image decoding.
//!
//! - [`decode_image`]: any supported format, pixels as stored (crop input)
//! - [`decode_jpeg`]: JPEG with EXIF orientation applied (conversion input)
//!
//! Decoding works from in-memory bytes; callers do the file I/O so that
//! read failures and decode failures stay distinguishable.

mod jpeg;
mod types;

use std::io::Cursor;

use image::{DynamicImage, ImageReader};

pub use jpeg::{decode_jpeg, get_orientation};
pub use types::DecodeError;

/// Decode an image of any enabled format, detected from its contents.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognised
/// and `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, ImageFormat, RgbaImage};

    #[test]
    fn test_decode_png() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(7, 3));
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();

        let decoded = decode_image(buffer.get_ref()).unwrap();
        assert_eq!(decoded.dimensions(), (7, 3));
    }

    #[test]
    fn test_decode_unknown_format() {
        let result = decode_image(b"definitely not an image");
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_corrupt_png() {
        // Valid PNG signature, garbage afterwards
        let bytes = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3, 4];
        let result = decode_image(&bytes);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }
}
