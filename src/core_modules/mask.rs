// THEORY:
// Masking is the only stage that looks at colour. Each pixel is converted to
// HSV and tested against the tracker's range; the answer is written into a
// single-channel image as 255 (foreground) or 0 (background). Everything
// downstream (region extraction, area filtering, selection) is purely
// geometric and works on this mask alone.

use image::GrayImage;

use crate::core_modules::frame::Frame;
use crate::core_modules::hsv::{Hsv, HsvRange};

pub const FOREGROUND: u8 = 255;
pub const BACKGROUND: u8 = 0;

/// Builds the binary mask of pixels whose HSV lies inside `range`.
pub fn hsv_mask(frame: &Frame<'_>, range: &HsvRange) -> GrayImage {
    let (width, height) = frame.dimensions();
    let mut mask = GrayImage::new(width, height);
    for (cell, [red, green, blue]) in mask.pixels_mut().zip(frame.rgb_pixels()) {
        cell.0[0] = if range.contains(&Hsv::from_rgb(red, green, blue)) {
            FOREGROUND
        } else {
            BACKGROUND
        };
    }
    mask
}
