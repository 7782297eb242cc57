// THEORY:
// The `config` module is how a host application chooses and parameterizes a
// locating strategy without naming concrete types. A `TrackerConfig` is plain
// data that can be written by hand, or read from a file when the `serde`
// feature is on. `build` validates it and produces a ready `Tracker`.

use crate::core_modules::annotation::AnnotationStyle;
use crate::core_modules::error::Result;
use crate::core_modules::hsv::Hsv;
use crate::core_modules::hue_tracker::HueTracker;
use crate::core_modules::tracker::{CenterTracker, NullTracker, Tracker};

/// Parameters of a colour-segmentation tracker.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HueTrackerConfig {
    pub lower_hsv: Hsv,
    pub upper_hsv: Hsv,
    /// Minimum region area in px²; regions must be strictly larger.
    pub min_area: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub annotation: AnnotationStyle,
}

impl HueTrackerConfig {
    pub fn new(lower_hsv: Hsv, upper_hsv: Hsv, min_area: f64) -> Self {
        Self {
            lower_hsv,
            upper_hsv,
            min_area,
            annotation: AnnotationStyle::default(),
        }
    }

    pub fn build(&self) -> Result<HueTracker> {
        HueTracker::with_style(self.lower_hsv, self.upper_hsv, self.min_area, self.annotation)
    }
}

/// Selects one of the locating strategies.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum TrackerConfig {
    Hue(HueTrackerConfig),
    Null,
    Center {
        #[cfg_attr(feature = "serde", serde(default))]
        annotation: AnnotationStyle,
    },
}

impl TrackerConfig {
    pub fn build(&self) -> Result<Tracker> {
        let tracker = match self {
            TrackerConfig::Hue(config) => Tracker::Hue(config.build()?),
            TrackerConfig::Null => Tracker::Null(NullTracker::new()),
            TrackerConfig::Center { annotation } => {
                Tracker::Center(CenterTracker::with_style(*annotation)?)
            }
        };
        Ok(tracker)
    }
}
