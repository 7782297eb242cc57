// THEORY:
// Annotation is an optional debug side effect. When the caller supplies an
// overlay image, the locator draws what it saw: the outline of every region
// the mask produced (secondary colour) and, if it accepted one, a ring marker
// at the reported position (primary colour). The overlay is the caller's
// buffer; the input frame is never drawn on.
//
// The visual constants live in an `AnnotationStyle` owned by each tracker
// rather than in process-wide constants, so two trackers can annotate the
// same stream differently.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_circle_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::core_modules::error::{Result, TrackerError};
use crate::core_modules::region::Region;

pub const DEFAULT_PRIMARY: [u8; 3] = [0, 255, 0];
pub const DEFAULT_SECONDARY: [u8; 3] = [0, 153, 255];
pub const DEFAULT_RADIUS: u32 = 20;
pub const DEFAULT_THICKNESS: u32 = 3;
/// Largest accepted marker radius in pixels.
pub const MAX_RADIUS: u32 = u16::MAX as u32;
/// Largest accepted stroke width in pixels.
pub const MAX_THICKNESS: u32 = u8::MAX as u32;

/// Colours (RGB) and stroke geometry for overlay drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct AnnotationStyle {
    /// Target marker colour.
    pub primary: [u8; 3],
    /// Region outline colour.
    pub secondary: [u8; 3],
    /// Marker radius in pixels.
    pub radius: u32,
    /// Stroke width in pixels for outlines and the marker.
    pub thickness: u32,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PRIMARY,
            secondary: DEFAULT_SECONDARY,
            radius: DEFAULT_RADIUS,
            thickness: DEFAULT_THICKNESS,
        }
    }
}

impl AnnotationStyle {
    /// Rejects zero-width strokes and geometry above `MAX_RADIUS` / `MAX_THICKNESS`.
    pub fn validate(&self) -> Result<()> {
        if self.thickness == 0 {
            return Err(TrackerError::InvalidAnnotation(
                "stroke thickness must be at least 1".to_string(),
            ));
        }
        if self.thickness > MAX_THICKNESS {
            return Err(TrackerError::InvalidAnnotation(format!(
                "stroke thickness {} exceeds {MAX_THICKNESS}",
                self.thickness
            )));
        }
        if self.radius > MAX_RADIUS {
            return Err(TrackerError::InvalidAnnotation(format!(
                "marker radius {} exceeds {MAX_RADIUS}",
                self.radius
            )));
        }
        Ok(())
    }

    /// Offsets covering a stroke of `thickness` pixels centred on zero.
    fn stroke_offsets(&self) -> std::ops::RangeInclusive<i32> {
        let thickness = self.thickness.clamp(1, MAX_THICKNESS) as i32;
        -((thickness - 1) / 2)..=thickness / 2
    }

    fn stroke_width(&self) -> u32 {
        self.thickness.clamp(1, MAX_THICKNESS)
    }
}

/// Outlines every region's boundary polygon.
pub fn draw_region_outlines(
    overlay: &mut RgbImage,
    regions: &[Region],
    color: Rgb<u8>,
    style: &AnnotationStyle,
) {
    let offsets = style.stroke_offsets();
    let half = *offsets.start();
    for region in regions {
        let vertices = region.vertices();
        if let [only] = vertices {
            let width = style.stroke_width();
            let rect = Rect::at(only.x + half, only.y + half).of_size(width, width);
            draw_filled_rect_mut(overlay, rect, color);
            continue;
        }
        for (i, start) in vertices.iter().enumerate() {
            let end = vertices[(i + 1) % vertices.len()];
            for dy in offsets.clone() {
                for dx in offsets.clone() {
                    draw_line_segment_mut(
                        overlay,
                        ((start.x + dx) as f32, (start.y + dy) as f32),
                        ((end.x + dx) as f32, (end.y + dy) as f32),
                        color,
                    );
                }
            }
        }
    }
}

/// Draws the ring marker centred on `center`.
pub fn draw_marker(
    overlay: &mut RgbImage,
    center: (i32, i32),
    color: Rgb<u8>,
    style: &AnnotationStyle,
) {
    let radius = style.radius.min(MAX_RADIUS) as i32;
    for offset in style.stroke_offsets() {
        let ring = radius + offset;
        if ring >= 0 {
            draw_hollow_circle_mut(overlay, center, ring, color);
        }
    }
}
