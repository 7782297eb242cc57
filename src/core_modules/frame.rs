// THEORY:
// A `Frame` is a borrowed, read-only view of one decoded colour image. The
// locator never owns or copies the caller's pixels: it reads them for the
// duration of a single `locate` call and lets go. Because the view holds a
// shared borrow, the input cannot be mutated through it.
//
// Frames arrive from many sources. An `image::RgbImage` converts directly; raw
// buffers from a capture library go through `Frame::new`, which checks the
// channel count and the buffer length once, so every later pixel read is in
// bounds. Capture stacks built on OpenCV hand out BGR, hence `ChannelOrder`.

use image::{Rgb, RgbImage};

use crate::core_modules::error::{Result, TrackerError};

pub const CHANNELS: usize = 3;

/// Byte order of the three colour channels in a frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

impl ChannelOrder {
    /// Reorders an RGB colour into this channel order (the swap is its own inverse).
    pub fn arrange(self, color: [u8; 3]) -> [u8; 3] {
        match self {
            ChannelOrder::Rgb => color,
            ChannelOrder::Bgr => [color[2], color[1], color[0]],
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    width: u32,
    height: u32,
    order: ChannelOrder,
    data: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Wraps a tightly packed, row-major buffer of `channels` bytes per pixel.
    pub fn new(
        width: u32,
        height: u32,
        channels: usize,
        order: ChannelOrder,
        data: &'a [u8],
    ) -> Result<Self> {
        if channels != CHANNELS {
            return Err(TrackerError::UnsupportedChannels(channels));
        }
        if width == 0 || height == 0 {
            return Err(TrackerError::EmptyFrame);
        }
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(TrackerError::FrameSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            order,
            data,
        })
    }

    pub fn rgb(width: u32, height: u32, data: &'a [u8]) -> Result<Self> {
        Self::new(width, height, CHANNELS, ChannelOrder::Rgb, data)
    }

    pub fn bgr(width: u32, height: u32, data: &'a [u8]) -> Result<Self> {
        Self::new(width, height, CHANNELS, ChannelOrder::Bgr, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Iterates pixels in raster order as `[red, green, blue]`, whatever the
    /// buffer's channel order.
    pub fn rgb_pixels(&self) -> impl Iterator<Item = [u8; 3]> + 'a {
        let order = self.order;
        self.data
            .chunks_exact(CHANNELS)
            .map(move |px| order.arrange([px[0], px[1], px[2]]))
    }

    /// Fails unless `overlay` has exactly this frame's dimensions.
    pub fn check_overlay(&self, overlay: &RgbImage) -> Result<()> {
        if overlay.dimensions() != self.dimensions() {
            return Err(TrackerError::OverlaySizeMismatch {
                frame: self.dimensions(),
                overlay: overlay.dimensions(),
            });
        }
        Ok(())
    }

    /// Converts an RGB colour into a pixel laid out like this frame.
    pub fn native_pixel(&self, color: [u8; 3]) -> Rgb<u8> {
        Rgb(self.order.arrange(color))
    }
}

impl<'a> TryFrom<&'a RgbImage> for Frame<'a> {
    type Error = TrackerError;

    fn try_from(image: &'a RgbImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        Self::rgb(width, height, image.as_raw())
    }
}
