pub mod frame;

pub use frame::{Frame, MIN_FRAME_DELAY};

use crate::error::{DecodeError, DecodeResult};
use image::RgbaImage;

/// Number of full play-throughs of the frame sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCount {
    /// Repeat forever.
    Infinite,
    /// Exactly this many play-throughs.
    Finite(u32),
}

impl LoopCount {
    pub fn is_infinite(&self) -> bool {
        matches!(self, Self::Infinite)
    }
}

/// Immutable result of decoding an animated image: the ordered frame list,
/// the global loop count, and a poster image shown before animation starts.
///
/// An `AnimatedImage` always holds at least one frame; construction fails
/// otherwise. It is shared read-only between however many [`Playback`]
/// instances are animating it.
///
/// [`Playback`]: crate::playback::Playback
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedImage {
    frames: Vec<Frame>,
    loop_count: LoopCount,
    poster: RgbaImage,
}

impl AnimatedImage {
    /// The poster image is the first frame's image.
    pub fn from_frames(frames: Vec<Frame>, loop_count: LoopCount) -> DecodeResult<Self> {
        let poster = match frames.first() {
            Some(first) => first.image().clone(),
            None => return Err(DecodeError::InvalidData("animation has no frames".into())),
        };
        Ok(Self {
            frames,
            loop_count,
            poster,
        })
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn loop_count(&self) -> LoopCount {
        self.loop_count
    }

    /// Still image to show before any tick has run.
    pub fn poster_image(&self) -> &RgbaImage {
        &self.poster
    }

    pub fn image_at(&self, index: usize) -> Option<&RgbaImage> {
        self.frames.get(index).map(Frame::image)
    }

    pub fn delay_at(&self, index: usize) -> Option<f64> {
        self.frames.get(index).map(Frame::delay)
    }

    /// Duration of one full play-through, in seconds.
    pub fn total_duration(&self) -> f64 {
        self.frames.iter().map(Frame::delay).sum()
    }

    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }
}
