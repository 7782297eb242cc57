//! Synthetic frame painting shared by unit tests.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use image::{Rgb, RgbImage};

use crate::core_modules::frame::Frame;
use crate::core_modules::hsv::{Hsv, HsvRange};

pub const GREEN: [u8; 3] = [0, 255, 0];
pub const BLACK: [u8; 3] = [0, 0, 0];

pub fn solid_frame(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color))
}

/// Views a non-empty test image as a frame.
pub fn frame_of(image: &RgbImage) -> Frame<'_> {
    Frame::try_from(image).unwrap()
}

/// Fills the `width` x `height` rectangle whose top-left pixel is `(x, y)`.
pub fn paint_rect(image: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: [u8; 3]) {
    for py in y..y + height {
        for px in x..x + width {
            image.put_pixel(px, py, Rgb(color));
        }
    }
}

/// Bounds isolating saturated, bright green.
pub fn green_range() -> HsvRange {
    HsvRange::new(Hsv::new(100.0, 0.5, 0.5), Hsv::new(140.0, 1.0, 1.0)).unwrap()
}

pub fn hash_bytes(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}
