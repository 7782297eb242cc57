// THEORY:
// The `hsv` module is the colour lens of the locator. A camera delivers RGB (or
// BGR) bytes, but discriminating an object by colour in RGB is fragile: a shadow
// moves all three channels at once. Hue-saturation-value separates the
// chromatic angle (hue) from purity (saturation) and brightness (value), so a
// single box in HSV space describes "this colour under most lighting".
//
// Conventions used throughout the crate:
// - hue is an angle in degrees, [0, 360); achromatic pixels report hue 0
// - saturation is chroma / value, [0, 1]
// - value is the brightest channel, [0, 1]
//
// The conversion works on normalized sRGB channels directly (no linearization):
// it is the fast path suited to running over every pixel of every frame.
//
// An `HsvRange` is the validated pair of bounds a tracker masks with. The range
// is linear on every channel, including hue: a range cannot wrap across 0/360,
// so a red target straddling the wrap needs its bounds chosen on one side.

use std::fmt;
use std::ops::RangeInclusive;

use crate::core_modules::error::{Result, TrackerError};

pub type Hue = f32;
pub type Saturation = f32;
pub type Value = f32;

/// Names one of the three HSV channels, used in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HsvChannel {
    Hue,
    Saturation,
    Value,
}

impl HsvChannel {
    pub const ALL: [HsvChannel; 3] = [HsvChannel::Hue, HsvChannel::Saturation, HsvChannel::Value];

    /// The legal inclusive range of a bound on this channel.
    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            HsvChannel::Hue => 0.0..=360.0,
            HsvChannel::Saturation | HsvChannel::Value => 0.0..=1.0,
        }
    }
}

impl fmt::Display for HsvChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HsvChannel::Hue => "hue",
            HsvChannel::Saturation => "saturation",
            HsvChannel::Value => "value",
        };
        f.write_str(name)
    }
}

/// A single colour in hue-saturation-value space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsv {
    /// Hue angle in degrees, [0, 360).
    pub hue: Hue,
    /// Saturation, [0, 1].
    pub saturation: Saturation,
    /// Value (brightness), [0, 1].
    pub value: Value,
}

impl Hsv {
    pub const fn new(hue: Hue, saturation: Saturation, value: Value) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Converts bounds written in the 8-bit OpenCV convention
    /// (hue 0..180, saturation and value 0..255).
    pub fn from_opencv(hue: u8, saturation: u8, value: u8) -> Self {
        Self {
            hue: hue as f32 * 2.0,
            saturation: saturation as f32 / 255.0,
            value: value as f32 / 255.0,
        }
    }

    /// Converts one 8-bit RGB pixel.
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        let red = red as f32 / 255.0;
        let green = green as f32 / 255.0;
        let blue = blue as f32 / 255.0;

        let maximum_channel = red.max(green.max(blue));
        let minimum_channel = red.min(green.min(blue));
        let chroma = maximum_channel - minimum_channel;

        let hue = if chroma <= 1e-6 {
            0.0
        } else {
            let (base_difference, sector_offset) = if maximum_channel == red {
                (green - blue, 0.0)
            } else if maximum_channel == green {
                (blue - red, 2.0)
            } else {
                (red - green, 4.0)
            };

            let mut hue_degrees = (base_difference / chroma + sector_offset) * 60.0;
            if hue_degrees < 0.0 {
                hue_degrees += 360.0;
            }
            hue_degrees
        };

        let saturation = if maximum_channel <= 1e-6 {
            0.0
        } else {
            chroma / maximum_channel
        };

        Self {
            hue,
            saturation,
            value: maximum_channel,
        }
    }

    pub fn channel(&self, channel: HsvChannel) -> f32 {
        match channel {
            HsvChannel::Hue => self.hue,
            HsvChannel::Saturation => self.saturation,
            HsvChannel::Value => self.value,
        }
    }
}

/// Validated inclusive per-channel bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvRange {
    lower: Hsv,
    upper: Hsv,
}

impl HsvRange {
    /// Builds a range, rejecting bounds that are non-finite, outside the
    /// channel range, or inverted. An inverted range would produce an always
    /// empty mask, so it is refused up front.
    pub fn new(lower: Hsv, upper: Hsv) -> Result<Self> {
        for channel in HsvChannel::ALL {
            let low = lower.channel(channel);
            let high = upper.channel(channel);
            for value in [low, high] {
                if !value.is_finite() {
                    return Err(TrackerError::NonFiniteBound { channel, value });
                }
                if !channel.range().contains(&value) {
                    return Err(TrackerError::BoundOutOfRange { channel, value });
                }
            }
            if low > high {
                return Err(TrackerError::InvertedBound {
                    channel,
                    lower: low,
                    upper: high,
                });
            }
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> Hsv {
        self.lower
    }

    pub fn upper(&self) -> Hsv {
        self.upper
    }

    #[inline]
    pub fn contains(&self, hsv: &Hsv) -> bool {
        hsv.hue >= self.lower.hue
            && hsv.hue <= self.upper.hue
            && hsv.saturation >= self.lower.saturation
            && hsv.saturation <= self.upper.saturation
            && hsv.value >= self.lower.value
            && hsv.value <= self.upper.value
    }
}
