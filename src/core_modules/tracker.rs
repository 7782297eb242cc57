// THEORY:
// The `tracker` module defines what it means to be an object locator. A caller
// owns one tracker, calls `start` once, feeds it frames through `locate`, reads
// the lock flag after each call, and calls `stop` when done. Every strategy
// honours that same lifecycle.
//
// Key architectural principles:
// 1.  **Closed set of strategies**: `Tracker` is a sum type over the three
//     strategies the system knows. Dispatch is a `match`, so adding a strategy
//     is a deliberate change to this enum, not an open-ended subclass.
// 2.  **Shared contract**: The `ObjectTracker` trait names the operations. Each
//     strategy implements it, and so does the `Tracker` enum, so generic code
//     can accept either a concrete strategy or the enum.
// 3.  **Stand-ins for downstream testing**: `NullTracker` never finds anything
//     and does no work, measuring the pure overhead of the surrounding loop.
//     `CenterTracker` always "finds" the frame centre, exercising the locked
//     path of a steering loop without a real target.
// 4.  **No history**: None of the strategies remember positions across frames.
//     The only state carried between calls is the lock flag.

use image::RgbImage;
use log::trace;

use crate::core_modules::annotation::{AnnotationStyle, draw_marker};
use crate::core_modules::error::Result;
use crate::core_modules::frame::Frame;
use crate::core_modules::hue_tracker::HueTracker;
use crate::core_modules::telemetry::TelemetryChannel;

/// A located target in pixel coordinates. Both coordinates are always present.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The pixel the position falls in, truncating towards zero.
    pub fn pixel(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }
}

/// The lifecycle and per-frame contract every locating strategy implements.
pub trait ObjectTracker {
    /// Resets transient detection state before a stream begins.
    fn start(&mut self);

    /// Resets transient detection state after a stream ends. Idempotent.
    fn stop(&mut self);

    /// Looks for the target in one frame.
    ///
    /// Returns `Ok(None)` when nothing was found; that is a normal outcome.
    /// When `overlay` is given it is drawn on in the frame's channel order and
    /// must match the frame's dimensions, or the call fails with
    /// `TrackerError::OverlaySizeMismatch` before doing any work.
    /// `NullTracker` is the one exception: it never reads the overlay and
    /// never fails. The frame itself is never modified or retained.
    fn locate(
        &mut self,
        frame: &Frame<'_>,
        overlay: Option<&mut RgbImage>,
    ) -> Result<Option<Position>>;

    /// Whether the most recent `locate` call accepted a target.
    fn is_locked(&self) -> bool;

    /// Reader side of the strategy's telemetry, if it publishes any.
    fn telemetry(&self) -> Option<TelemetryChannel> {
        None
    }
}

/// Never detects anything. Performs no checks on its inputs, so it costs
/// nothing beyond the call itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTracker;

impl NullTracker {
    pub fn new() -> Self {
        Self
    }
}

impl ObjectTracker for NullTracker {
    fn start(&mut self) {}

    fn stop(&mut self) {}

    fn locate(
        &mut self,
        _frame: &Frame<'_>,
        _overlay: Option<&mut RgbImage>,
    ) -> Result<Option<Position>> {
        Ok(None)
    }

    fn is_locked(&self) -> bool {
        false
    }
}

/// Always reports the exact centre of the frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct CenterTracker {
    style: AnnotationStyle,
}

impl CenterTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: AnnotationStyle) -> Result<Self> {
        style.validate()?;
        Ok(Self { style })
    }

    pub fn style(&self) -> &AnnotationStyle {
        &self.style
    }
}

impl ObjectTracker for CenterTracker {
    fn start(&mut self) {}

    fn stop(&mut self) {}

    fn locate(
        &mut self,
        frame: &Frame<'_>,
        overlay: Option<&mut RgbImage>,
    ) -> Result<Option<Position>> {
        let (width, height) = frame.dimensions();
        let center = Position::new(width as f64 / 2.0, height as f64 / 2.0);
        if let Some(overlay) = overlay {
            frame.check_overlay(overlay)?;
            let color = frame.native_pixel(self.style.primary);
            draw_marker(overlay, center.pixel(), color, &self.style);
        }
        Ok(Some(center))
    }

    fn is_locked(&self) -> bool {
        true
    }
}

/// The closed set of locating strategies.
#[derive(Debug)]
pub enum Tracker {
    Hue(HueTracker),
    Null(NullTracker),
    Center(CenterTracker),
}

impl Tracker {
    /// Short strategy name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Tracker::Hue(_) => "hue",
            Tracker::Null(_) => "null",
            Tracker::Center(_) => "center",
        }
    }
}

impl ObjectTracker for Tracker {
    fn start(&mut self) {
        trace!("starting {} tracker", self.kind());
        match self {
            Tracker::Hue(tracker) => tracker.start(),
            Tracker::Null(tracker) => tracker.start(),
            Tracker::Center(tracker) => tracker.start(),
        }
    }

    fn stop(&mut self) {
        trace!("stopping {} tracker", self.kind());
        match self {
            Tracker::Hue(tracker) => tracker.stop(),
            Tracker::Null(tracker) => tracker.stop(),
            Tracker::Center(tracker) => tracker.stop(),
        }
    }

    fn locate(
        &mut self,
        frame: &Frame<'_>,
        overlay: Option<&mut RgbImage>,
    ) -> Result<Option<Position>> {
        match self {
            Tracker::Hue(tracker) => tracker.locate(frame, overlay),
            Tracker::Null(tracker) => tracker.locate(frame, overlay),
            Tracker::Center(tracker) => tracker.locate(frame, overlay),
        }
    }

    fn is_locked(&self) -> bool {
        match self {
            Tracker::Hue(tracker) => tracker.is_locked(),
            Tracker::Null(tracker) => tracker.is_locked(),
            Tracker::Center(tracker) => tracker.is_locked(),
        }
    }

    fn telemetry(&self) -> Option<TelemetryChannel> {
        match self {
            Tracker::Hue(tracker) => tracker.telemetry(),
            Tracker::Null(tracker) => tracker.telemetry(),
            Tracker::Center(tracker) => tracker.telemetry(),
        }
    }
}

impl From<HueTracker> for Tracker {
    fn from(tracker: HueTracker) -> Self {
        Tracker::Hue(tracker)
    }
}

impl From<NullTracker> for Tracker {
    fn from(tracker: NullTracker) -> Self {
        Tracker::Null(tracker)
    }
}

impl From<CenterTracker> for Tracker {
    fn from(tracker: CenterTracker) -> Self {
        Tracker::Center(tracker)
    }
}
