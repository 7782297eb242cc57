// THEORY:
// The `HueTracker` finds a target purely by colour, independently on every
// frame. It keeps no memory of where the target was: no motion model, no
// region-of-interest narrowing. Each call runs the whole pipeline:
//
// 1.  **Mask**: convert the frame to HSV and keep pixels inside the configured
//     range (see `mask`).
// 2.  **Regions**: extract top-level connected regions from the mask (see
//     `region`).
// 3.  **Filter**: discard every region whose area is at or below `min_area`.
//     Each survivor counts as a candidate.
// 4.  **Select**: the candidate with strictly the largest area wins; on an
//     exact tie the region found first in raster order keeps the win.
// 5.  **Report**: the centre of the winner's bounding box is the position. No
//     winner means no position and the lock drops.
// 6.  **Side effects**: outline every extracted region and mark the winner on
//     the overlay if one was given; publish `best_area` and `candidates` to
//     telemetry on every call.
//
// Configuration (bounds, threshold, annotation style) is validated once and
// frozen at construction; a new configuration needs a new tracker.

use chrono::Utc;
use image::RgbImage;
use log::{debug, trace};

use crate::core_modules::annotation::{AnnotationStyle, draw_marker, draw_region_outlines};
use crate::core_modules::error::{Result, TrackerError};
use crate::core_modules::frame::Frame;
use crate::core_modules::hsv::{Hsv, HsvRange};
use crate::core_modules::mask::hsv_mask;
use crate::core_modules::region::{Region, find_outer_regions};
use crate::core_modules::telemetry::{
    BEST_AREA, CANDIDATES, Measurement, MetricValue, TelemetryChannel, TelemetryRecord, UNIT_PIXELS,
};
use crate::core_modules::tracker::{ObjectTracker, Position};

const TELEMETRY_KEYS: [&str; 2] = [BEST_AREA, CANDIDATES];

#[derive(Debug)]
pub struct HueTracker {
    range: HsvRange,
    /// Regions must be strictly larger than this, in px².
    min_area: f64,
    style: AnnotationStyle,
    locked: bool,
    telemetry: TelemetryChannel,
}

/// Outcome of the area filter over one frame's regions.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Selection {
    /// Index and area of the winning region.
    best: Option<(usize, f64)>,
    candidates: u64,
}

impl HueTracker {
    pub fn new(lower: Hsv, upper: Hsv, min_area: f64) -> Result<Self> {
        Self::with_style(lower, upper, min_area, AnnotationStyle::default())
    }

    pub fn with_style(
        lower: Hsv,
        upper: Hsv,
        min_area: f64,
        style: AnnotationStyle,
    ) -> Result<Self> {
        let range = HsvRange::new(lower, upper)?;
        if !min_area.is_finite() || min_area < 0.0 {
            return Err(TrackerError::InvalidMinArea(min_area));
        }
        style.validate()?;
        Ok(Self {
            range,
            min_area,
            style,
            locked: false,
            telemetry: TelemetryChannel::new(TelemetryRecord::with_keys(&TELEMETRY_KEYS)),
        })
    }

    pub fn range(&self) -> &HsvRange {
        &self.range
    }

    pub fn min_area(&self) -> f64 {
        self.min_area
    }

    pub fn style(&self) -> &AnnotationStyle {
        &self.style
    }

    fn select(&self, regions: &[Region]) -> Selection {
        let mut selection = Selection {
            best: None,
            candidates: 0,
        };
        for (index, region) in regions.iter().enumerate() {
            let area = region.area();
            debug!("found region with area: {area:.1}");
            if area <= self.min_area {
                continue;
            }
            selection.candidates += 1;
            if selection.best.is_none_or(|(_, best_area)| area > best_area) {
                selection.best = Some((index, area));
            }
        }
        selection
    }

    fn publish_telemetry(&self, best_area: f64, candidates: u64) {
        let now = Utc::now();
        let mut record = TelemetryRecord::with_keys(&TELEMETRY_KEYS);
        record.set(
            BEST_AREA,
            Measurement::new(now, MetricValue::Float(best_area), Some(UNIT_PIXELS)),
        );
        record.set(CANDIDATES, Measurement::new(now, MetricValue::Count(candidates), None));
        self.telemetry.publish(record);
    }
}

impl ObjectTracker for HueTracker {
    fn start(&mut self) {
        self.locked = false;
    }

    fn stop(&mut self) {
        self.locked = false;
    }

    fn locate(
        &mut self,
        frame: &Frame<'_>,
        overlay: Option<&mut RgbImage>,
    ) -> Result<Option<Position>> {
        if let Some(overlay) = overlay.as_deref() {
            frame.check_overlay(overlay)?;
        }

        let mask = hsv_mask(frame, &self.range);
        let regions = find_outer_regions(&mask);
        let selection = self.select(&regions);

        let best_area = selection.best.map_or(0.0, |(_, area)| area);
        debug!("best area above threshold: {best_area}");
        self.publish_telemetry(best_area, selection.candidates);

        let position = selection.best.map(|(index, _)| {
            let (x, y) = regions[index].bounding_box().center();
            Position::new(x, y)
        });
        self.locked = position.is_some();
        trace!(
            "{} regions, {} candidates, position {position:?}",
            regions.len(),
            selection.candidates
        );

        if let Some(overlay) = overlay {
            let outline = frame.native_pixel(self.style.secondary);
            draw_region_outlines(overlay, &regions, outline, &self.style);
            if let Some(position) = position {
                let marker = frame.native_pixel(self.style.primary);
                draw_marker(overlay, position.pixel(), marker, &self.style);
            }
        }

        Ok(position)
    }

    fn is_locked(&self) -> bool {
        self.locked
    }

    fn telemetry(&self) -> Option<TelemetryChannel> {
        Some(self.telemetry.clone())
    }
}
