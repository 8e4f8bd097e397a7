//! Image transformation operations.
//!
//! Portraits are cut from full card scans with fixed pixel rectangles, so
//! the only transform needed is [`apply_crop`]. Rectangles are plain
//! configuration data ([`CropRect`]); nothing here infers them from the
//! image content.

mod crop;

pub use crop::{apply_crop, CropError, CropRect};
