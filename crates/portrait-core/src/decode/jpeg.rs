//! JPEG decoding with EXIF orientation handling.
//!
//! Card scans saved from phones or scanners often carry an EXIF orientation
//! tag instead of rotated pixels. The conversion pass bakes that orientation
//! in so the PNG it writes is upright.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::metadata::Orientation;
use image::DynamicImage;

use super::{decode_image, DecodeError};

/// Decode a JPEG scan and rotate/flip its pixels upright.
///
/// # Errors
///
/// Same as [`decode_image`].
pub fn decode_jpeg(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let orientation = get_orientation(bytes);
    let mut img = decode_image(bytes)?;
    img.apply_orientation(orientation);
    Ok(img)
}

/// Read the EXIF orientation tag of a JPEG.
///
/// Missing EXIF, a missing tag and out-of-range tag values all mean the
/// pixels are already upright ([`Orientation::NoTransforms`]).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::NoTransforms;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .and_then(|tag| u8::try_from(tag).ok())
        .and_then(Orientation::from_exif)
        .unwrap_or(Orientation::NoTransforms)
}
