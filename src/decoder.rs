use std::path::Path;

use crate::animation::{AnimatedImage, Frame, LoopCount};
use crate::container::{Container, GifContainer};
use crate::error::{DecodeError, DecodeResult};

/// Delay assumed for the first entry when the container reports none, in
/// seconds. Later entries without a delay inherit the previous resolved one.
pub const DEFAULT_FRAME_DELAY: f64 = 0.1;

/// Decode an animated GIF byte buffer into an [`AnimatedImage`].
///
/// Decoding is a pure function of the input bytes. Individual entries that
/// fail to decode are dropped; the whole decode fails only when the
/// signature is unrecognized, the loop count is missing, or no frame
/// survives.
pub fn decode(data: &[u8]) -> DecodeResult<AnimatedImage> {
    decode_container(GifContainer::open(data)?)
}

/// Convenience wrapper: read `path` and [`decode`] its contents.
pub fn decode_file<P: AsRef<Path>>(path: P) -> DecodeResult<AnimatedImage> {
    let data = std::fs::read(path)?;
    decode(&data)
}

/// Decode any opened [`Container`] into an [`AnimatedImage`].
pub fn decode_container<C: Container>(mut container: C) -> DecodeResult<AnimatedImage> {
    let loop_count = container
        .loop_count()
        .ok_or_else(|| DecodeError::InvalidData("missing loop count".into()))?;

    let entry_count = container.entry_count();
    let mut frames: Vec<Frame> = Vec::with_capacity(entry_count);
    let mut previous_delay = DEFAULT_FRAME_DELAY;

    for index in 0..entry_count {
        let Some(entry) = container.decode_entry(index) else {
            log::debug!("skipping undecodable entry {index}");
            continue;
        };

        let resolved = entry
            .properties
            .unclamped_delay
            .or(entry.properties.delay)
            .unwrap_or(previous_delay);

        let frame = Frame::new(entry.image, resolved);
        previous_delay = frame.delay();
        frames.push(frame);
    }

    log::debug!(
        "decoded {} of {} entries, loop count {}",
        frames.len(),
        entry_count,
        loop_count
    );

    let loop_count = match loop_count {
        0 => LoopCount::Infinite,
        n => LoopCount::Finite(n),
    };

    AnimatedImage::from_frames(frames, loop_count)
}
