// THEORY:
// Every failure the locator can report falls into one of two families:
// configuration errors, raised once when a tracker is built, and precondition
// violations, raised per call when the caller hands over a frame or overlay
// that does not match the contract. "Nothing found" is a normal outcome and is
// never an error.

use std::fmt;

use crate::core_modules::hsv::HsvChannel;

pub type Result<T, E = TrackerError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// A bound is NaN or infinite.
    NonFiniteBound { channel: HsvChannel, value: f32 },
    /// A bound lies outside the channel's legal range.
    BoundOutOfRange { channel: HsvChannel, value: f32 },
    /// The lower bound of a channel exceeds its upper bound.
    InvertedBound {
        channel: HsvChannel,
        lower: f32,
        upper: f32,
    },
    InvalidMinArea(f64),
    InvalidAnnotation(String),
    UnsupportedChannels(usize),
    EmptyFrame,
    FrameSizeMismatch { expected: usize, actual: usize },
    OverlaySizeMismatch {
        frame: (u32, u32),
        overlay: (u32, u32),
    },
}

impl TrackerError {
    /// True for errors raised while building a tracker, false for per-frame
    /// precondition violations.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            TrackerError::NonFiniteBound { .. }
                | TrackerError::BoundOutOfRange { .. }
                | TrackerError::InvertedBound { .. }
                | TrackerError::InvalidMinArea(_)
                | TrackerError::InvalidAnnotation(_)
        )
    }
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::NonFiniteBound { channel, value } => {
                write!(f, "{channel} bound must be finite, got {value}")
            }
            TrackerError::BoundOutOfRange { channel, value } => write!(
                f,
                "{channel} bound {value} outside of {:?}",
                channel.range()
            ),
            TrackerError::InvertedBound {
                channel,
                lower,
                upper,
            } => write!(
                f,
                "{channel} lower bound {lower} is greater than upper bound {upper}"
            ),
            TrackerError::InvalidMinArea(area) => {
                write!(f, "minimum area must be finite and non-negative, got {area}")
            }
            TrackerError::InvalidAnnotation(reason) => {
                write!(f, "invalid annotation style: {reason}")
            }
            TrackerError::UnsupportedChannels(channels) => {
                write!(f, "expected a 3-channel colour frame, got {channels} channels")
            }
            TrackerError::EmptyFrame => write!(f, "frame has zero width or height"),
            TrackerError::FrameSizeMismatch { expected, actual } => write!(
                f,
                "frame buffer holds {actual} bytes, dimensions require {expected}"
            ),
            TrackerError::OverlaySizeMismatch { frame, overlay } => write!(
                f,
                "overlay is {}x{} but frame is {}x{}",
                overlay.0, overlay.1, frame.0, frame.1
            ),
        }
    }
}

impl std::error::Error for TrackerError {}
