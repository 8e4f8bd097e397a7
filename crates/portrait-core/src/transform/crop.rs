//! Fixed-rectangle cropping.
//!
//! Crop rectangles are pixel boxes `(left, top, right, bottom)` with the
//! right and bottom edges exclusive, so a box always yields an image of
//! exactly `right - left` by `bottom - top` pixels.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the source image
//! - Parts of the box outside the source are filled with transparent black
//!
//! # Example
//!
//! ```ignore
//! let rect = CropRect::new(134, 10, 424, 300)?;
//! let portrait = apply_crop(&image, rect);
//! assert_eq!(portrait.dimensions(), (290, 290));
//! ```

use image::{DynamicImage, GenericImageView, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid crop rectangle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid crop rectangle ({left}, {top}, {right}, {bottom}): right/bottom must exceed left/top")]
pub struct CropError {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

/// Axis-aligned pixel box. Serialized as `[left, top, right, bottom]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u32; 4]", into = "[u32; 4]")]
pub struct CropRect {
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
}

impl CropRect {
    /// Create a rectangle from its edges.
    ///
    /// # Errors
    ///
    /// Returns [`CropError`] unless `right > left` and `bottom > top`.
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Result<Self, CropError> {
        if right <= left || bottom <= top {
            return Err(CropError {
                left,
                top,
                right,
                bottom,
            });
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    pub const fn left(&self) -> u32 {
        self.left
    }

    pub const fn top(&self) -> u32 {
        self.top
    }

    pub const fn right(&self) -> u32 {
        self.right
    }

    pub const fn bottom(&self) -> u32 {
        self.bottom
    }

    pub const fn width(&self) -> u32 {
        self.right - self.left
    }

    pub const fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// Output dimensions `(width, height)`.
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Whether the rectangle lies entirely within a `width` x `height` image.
    pub const fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right <= width && self.bottom <= height
    }
}

impl TryFrom<[u32; 4]> for CropRect {
    type Error = CropError;

    fn try_from([left, top, right, bottom]: [u32; 4]) -> Result<Self, Self::Error> {
        CropRect::new(left, top, right, bottom)
    }
}

impl From<CropRect> for [u32; 4] {
    fn from(rect: CropRect) -> Self {
        [rect.left, rect.top, rect.right, rect.bottom]
    }
}

/// Crop `image` to `rect`.
///
/// The output is always `rect.dimensions()`. When the rectangle lies inside
/// the image the source pixel format is preserved; otherwise the result is
/// RGBA with the uncovered area left transparent.
pub fn apply_crop(image: &DynamicImage, rect: CropRect) -> DynamicImage {
    let (src_w, src_h) = image.dimensions();

    // Fast path: plain sub-image copy
    if rect.fits_within(src_w, src_h) {
        return image.crop_imm(rect.left, rect.top, rect.width(), rect.height());
    }

    let mut canvas = RgbaImage::new(rect.width(), rect.height());
    image::imageops::replace(
        &mut canvas,
        &image.to_rgba8(),
        -i64::from(rect.left),
        -i64::from(rect.top),
    );
    DynamicImage::ImageRgba8(canvas)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use image::{Rgb, RgbImage};
    use proptest::prelude::*;

    /// Strategy for generating image dimensions (keep reasonable for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=80, 1u32..=80)
    }

    /// Strategy for generating valid rectangles, possibly past the image edge.
    fn rect_strategy() -> impl Strategy<Value = CropRect> {
        (0u32..=100, 0u32..=100, 1u32..=60, 1u32..=60).prop_map(|(left, top, w, h)| {
            CropRect::new(left, top, left + w, top + h).unwrap()
        })
    }

    fn create_test_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 7])
        }))
    }

    proptest! {
        /// Property: Output dimensions always equal the rectangle size.
        #[test]
        fn prop_output_matches_rect(
            (width, height) in dimensions_strategy(),
            rect in rect_strategy(),
        ) {
            let img = create_test_image(width, height);
            let result = apply_crop(&img, rect);

            prop_assert_eq!(result.dimensions(), rect.dimensions());
        }

        /// Property: Cropping is deterministic.
        #[test]
        fn prop_crop_is_deterministic(
            (width, height) in dimensions_strategy(),
            rect in rect_strategy(),
        ) {
            let img = create_test_image(width, height);

            let result1 = apply_crop(&img, rect);
            let result2 = apply_crop(&img, rect);

            prop_assert_eq!(result1.as_bytes(), result2.as_bytes());
        }

        /// Property: Every in-bounds output pixel is the source pixel at the offset.
        #[test]
        fn prop_in_bounds_pixels_from_source(
            (width, height) in dimensions_strategy(),
            rect in rect_strategy(),
        ) {
            let img = create_test_image(width, height);
            let result = apply_crop(&img, rect).to_rgba8();
            let source = img.to_rgba8();

            for (x, y, pixel) in result.enumerate_pixels() {
                let (sx, sy) = (rect.left() + x, rect.top() + y);
                if sx < width && sy < height {
                    prop_assert_eq!(pixel, source.get_pixel(sx, sy));
                } else {
                    prop_assert_eq!(pixel.0[3], 0);
                }
            }
        }

        /// Property: Array form round-trips for valid rectangles.
        #[test]
        fn prop_array_round_trip(rect in rect_strategy()) {
            let edges: [u32; 4] = rect.into();
            prop_assert_eq!(CropRect::try_from(edges), Ok(rect));
        }
    }
}
