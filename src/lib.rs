// THEORY:
// This file is the entry point for the `hue_lock` library crate. It exposes
// the `Tracker` strategies and the `ObjectTracker` contract as the interface a
// steering or capture loop talks to, together with the value types that cross
// that boundary (frames, HSV bounds, positions, telemetry records, errors).
//
// The per-stage modules (`mask`, `region`, `annotation`) stay reachable under
// `core_modules` for callers that want to run a single stage on its own, but
// the re-exports below are the intended surface.

pub mod config;
pub mod core_modules;

#[cfg(test)]
mod test_utils;

pub use config::{HueTrackerConfig, TrackerConfig};
pub use core_modules::annotation::AnnotationStyle;
pub use core_modules::error::{Result, TrackerError};
pub use core_modules::frame::{ChannelOrder, Frame};
pub use core_modules::hsv::{Hsv, HsvChannel, HsvRange};
pub use core_modules::hue_tracker::HueTracker;
pub use core_modules::telemetry::{
    BEST_AREA, CANDIDATES, Measurement, MetricValue, TelemetryChannel, TelemetryRecord, UNIT_PIXELS,
};
pub use core_modules::tracker::{CenterTracker, NullTracker, ObjectTracker, Position, Tracker};
