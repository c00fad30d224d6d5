use std::sync::Arc;

use image::RgbaImage;

use crate::animation::{AnimatedImage, LoopCount};

/// Playback state. An unbound scheduler is not representable: constructing
/// a [`Playback`] is the bind, so callers that may not have an animation
/// yet hold an `Option<Playback>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Animating,
    Finished,
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome<'a> {
    /// The animation is still running. `frame_changed` is true when the
    /// selected frame differs from the last one reported.
    Advanced {
        frame_changed: bool,
        visible: &'a RgbaImage,
    },
    /// The loop count is exhausted; the last frame stays on screen.
    Finished,
}

/// Drives one animation: which frame is on screen, how much elapsed time is
/// still unspent, and how many play-throughs remain.
///
/// The caller owns the refresh signal and feeds the elapsed interval since
/// the previous callback into [`tick`]; `Playback` itself never touches a
/// clock, which keeps it testable without a timer. Ticks must arrive from
/// one caller at a time. The bound [`AnimatedImage`] is shared read-only,
/// so any number of `Playback` values can animate the same image.
///
/// Elapsed time is carried in a residual accumulator between ticks rather
/// than re-derived from timestamps, so long frame sequences do not drift. A
/// single tick spanning several frame delays advances several frames.
///
/// [`tick`]: Playback::tick
#[derive(Debug, Clone)]
pub struct Playback {
    image: Arc<AnimatedImage>,
    current: usize,
    accumulator: f64,
    remaining: LoopCount,
    pending_repaint: bool,
    state: PlaybackState,
}

impl Playback {
    /// Bind an animation: frame 0 selected, nothing accumulated, the full
    /// loop count ahead. The visible image starts as the poster, which is
    /// frame 0's image.
    pub fn new(image: Arc<AnimatedImage>) -> Self {
        let remaining = match image.loop_count() {
            // A finite count of zero is the wire convention for "forever".
            LoopCount::Finite(0) => LoopCount::Infinite,
            other => other,
        };
        Self {
            image,
            current: 0,
            accumulator: 0.0,
            remaining,
            pending_repaint: false,
            state: PlaybackState::Animating,
        }
    }

    /// Replace the bound animation and reset all progress. This is also how
    /// a finished playback is restarted.
    pub fn bind(&mut self, image: Arc<AnimatedImage>) {
        *self = Self::new(image);
    }

    /// Advance the animation by `elapsed` seconds.
    ///
    /// Never fails: a finished playback keeps reporting
    /// [`TickOutcome::Finished`], negative elapsed time counts as zero, and
    /// the frame index always stays in range. When the last play-through
    /// ends, playback halts on the last frame shown instead of wrapping.
    pub fn tick(&mut self, elapsed: f64) -> TickOutcome<'_> {
        if self.state == PlaybackState::Finished {
            return TickOutcome::Finished;
        }

        self.accumulator += elapsed.max(0.0);

        loop {
            let delay = self.image.frames()[self.current].delay();
            if self.accumulator < delay {
                break;
            }
            self.accumulator -= delay;
            self.current += 1;

            if self.current == self.image.frame_count() {
                if let LoopCount::Finite(n) = self.remaining {
                    let n = n - 1;
                    self.remaining = LoopCount::Finite(n);
                    if n == 0 {
                        // Hold the last frame; do not wrap to frame 0.
                        self.current -= 1;
                        self.state = PlaybackState::Finished;
                        return TickOutcome::Finished;
                    }
                }
                self.current = 0;
            }
            self.pending_repaint = true;
        }

        let frame_changed = std::mem::take(&mut self.pending_repaint);
        TickOutcome::Advanced {
            frame_changed,
            visible: self.image.frames()[self.current].image(),
        }
    }

    /// Image currently selected for display: the poster before any tick,
    /// the last selected frame afterwards.
    pub fn visible_image(&self) -> &RgbaImage {
        self.image.frames()[self.current].image()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == PlaybackState::Finished
    }

    pub fn current_frame_index(&self) -> usize {
        self.current
    }

    /// Play-throughs still ahead, counting the one in flight.
    pub fn remaining_loops(&self) -> LoopCount {
        self.remaining
    }

    pub fn animated_image(&self) -> &Arc<AnimatedImage> {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Frame;

    fn animation(delays: &[f64], loop_count: LoopCount) -> Arc<AnimatedImage> {
        let frames = delays
            .iter()
            .map(|&d| Frame::new(RgbaImage::new(1, 1), d))
            .collect();
        Arc::new(AnimatedImage::from_frames(frames, loop_count).unwrap())
    }

    fn advanced(outcome: TickOutcome<'_>) -> bool {
        match outcome {
            TickOutcome::Advanced { frame_changed, .. } => frame_changed,
            TickOutcome::Finished => panic!("unexpected finish"),
        }
    }

    #[test]
    fn test_visible_image_starts_at_poster() {
        let image = animation(&[0.1, 0.1], LoopCount::Infinite);
        let playback = Playback::new(Arc::clone(&image));
        assert_eq!(playback.visible_image(), image.poster_image());
        assert_eq!(playback.current_frame_index(), 0);
    }

    #[test]
    fn test_zero_elapsed_is_idempotent() {
        let image = animation(&[0.1, 0.1], LoopCount::Infinite);
        let mut playback = Playback::new(image);
        for _ in 0..10 {
            assert!(!advanced(playback.tick(0.0)));
            assert_eq!(playback.current_frame_index(), 0);
        }
    }

    #[test]
    fn test_negative_elapsed_counts_as_zero() {
        let image = animation(&[0.1, 0.1], LoopCount::Infinite);
        let mut playback = Playback::new(image);
        assert!(!advanced(playback.tick(-5.0)));
        assert_eq!(playback.current_frame_index(), 0);
    }

    #[test]
    fn test_advance_only_when_delay_elapsed() {
        let image = animation(&[0.125, 0.25], LoopCount::Infinite);
        let mut playback = Playback::new(image);

        assert!(!advanced(playback.tick(0.0625)));
        assert_eq!(playback.current_frame_index(), 0);

        assert!(advanced(playback.tick(0.0625)));
        assert_eq!(playback.current_frame_index(), 1);
    }

    #[test]
    fn test_large_tick_spans_multiple_frames() {
        let image = animation(&[0.125, 0.125, 0.125, 0.125], LoopCount::Infinite);
        let mut playback = Playback::new(image);

        assert!(advanced(playback.tick(0.375)));
        assert_eq!(playback.current_frame_index(), 3);
    }

    #[test]
    fn test_infinite_loop_wraps_and_never_finishes() {
        // Whole-cycle elapsed time lands back on frame 0, any number of
        // cycles in.
        let image = animation(&[0.125, 0.125, 0.125], LoopCount::Infinite);
        let mut playback = Playback::new(image);

        for _ in 0..5 {
            assert!(advanced(playback.tick(0.375)));
            assert_eq!(playback.current_frame_index(), 0);
        }
        assert_eq!(playback.state(), PlaybackState::Animating);
    }

    #[test]
    fn test_single_playthrough_finishes_once_on_last_frame() {
        // 4 frames of 0.125 s, one play-through, fed in 0.0625 s ticks:
        // finishes after 0.5 s total and never advances past frame 3.
        let image = animation(&[0.125, 0.125, 0.125, 0.125], LoopCount::Finite(1));
        let mut playback = Playback::new(image);

        let mut finishes = 0;
        for _ in 0..9 {
            if matches!(playback.tick(0.0625), TickOutcome::Finished) {
                finishes += 1;
            }
            assert!(playback.current_frame_index() <= 3);
        }
        // Tick 8 crosses the full duration; tick 9 reports Finished again
        // as the terminal state.
        assert_eq!(playback.state(), PlaybackState::Finished);
        assert_eq!(finishes, 2);
        assert_eq!(playback.current_frame_index(), 3);
    }

    #[test]
    fn test_finish_is_granularity_independent() {
        let delays = [0.125, 0.125, 0.125];
        for step in [0.03125, 0.0625, 0.125, 0.25, 1.0] {
            let image = animation(&delays, LoopCount::Finite(2));
            let mut playback = Playback::new(image);
            let mut elapsed = 0.0;
            while !playback.is_finished() {
                playback.tick(step);
                elapsed += step;
                assert!(elapsed < 10.0, "playback never finished");
            }
            // Two full play-throughs of 0.375 s each.
            assert!(elapsed >= 0.75);
            assert_eq!(playback.current_frame_index(), 2);
        }
    }

    #[test]
    fn test_finished_is_terminal_until_rebind() {
        let image = animation(&[0.125], LoopCount::Finite(1));
        let mut playback = Playback::new(Arc::clone(&image));

        assert!(matches!(playback.tick(0.2), TickOutcome::Finished));
        assert!(matches!(playback.tick(10.0), TickOutcome::Finished));
        assert!(playback.is_finished());

        playback.bind(image);
        assert_eq!(playback.state(), PlaybackState::Animating);
        assert_eq!(playback.current_frame_index(), 0);
        assert!(!advanced(playback.tick(0.0625)));
    }

    #[test]
    fn test_finite_zero_treated_as_infinite() {
        let image = animation(&[0.125, 0.125], LoopCount::Finite(0));
        let mut playback = Playback::new(image);
        assert_eq!(playback.remaining_loops(), LoopCount::Infinite);
        for _ in 0..8 {
            assert!(advanced(playback.tick(0.125)));
        }
        assert!(!playback.is_finished());
    }

    #[test]
    fn test_frame_changed_reported_once() {
        let image = animation(&[0.125, 0.125], LoopCount::Infinite);
        let mut playback = Playback::new(image);

        assert!(advanced(playback.tick(0.125)));
        // No further advance, so no further repaint request.
        assert!(!advanced(playback.tick(0.0)));
        assert!(!advanced(playback.tick(0.05)));
    }

    #[test]
    fn test_visible_image_tracks_current_frame() {
        let frames = vec![
            Frame::new(RgbaImage::from_pixel(1, 1, image::Rgba([255, 0, 0, 255])), 0.125),
            Frame::new(RgbaImage::from_pixel(1, 1, image::Rgba([0, 255, 0, 255])), 0.125),
        ];
        let image = Arc::new(AnimatedImage::from_frames(frames, LoopCount::Infinite).unwrap());
        let mut playback = Playback::new(Arc::clone(&image));

        match playback.tick(0.125) {
            TickOutcome::Advanced { visible, .. } => {
                assert_eq!(visible, image.image_at(1).unwrap())
            }
            TickOutcome::Finished => panic!("unexpected finish"),
        }
        assert_eq!(playback.visible_image(), image.image_at(1).unwrap());
    }

    #[test]
    fn test_mixed_delay_two_loop_scenario() {
        // Three frames with delays 0.1, 0.2, 0.05 and two play-throughs,
        // driven by steady 0.1 s ticks. The second cycle exhausts the loop
        // count on the tick that would otherwise wrap a third time.
        let image = animation(&[0.1, 0.2, 0.05], LoopCount::Finite(2));
        let mut playback = Playback::new(image);

        let expected = [1usize, 1, 2, 0, 1, 1];
        for (tick, &index) in expected.iter().enumerate() {
            assert!(
                matches!(playback.tick(0.1), TickOutcome::Advanced { .. }),
                "tick {} finished early",
                tick + 1
            );
            assert_eq!(playback.current_frame_index(), index, "tick {}", tick + 1);
        }
        assert_eq!(playback.remaining_loops(), LoopCount::Finite(1));

        assert!(matches!(playback.tick(0.1), TickOutcome::Finished));
        assert_eq!(playback.remaining_loops(), LoopCount::Finite(0));
        assert_eq!(playback.current_frame_index(), 2);
    }

    #[test]
    fn test_shared_image_many_playbacks() {
        let image = animation(&[0.125, 0.125], LoopCount::Infinite);
        let mut a = Playback::new(Arc::clone(&image));
        let mut b = Playback::new(Arc::clone(&image));

        assert!(advanced(a.tick(0.125)));
        assert_eq!(a.current_frame_index(), 1);
        assert_eq!(b.current_frame_index(), 0);
        assert!(advanced(b.tick(0.25)));
        assert_eq!(b.current_frame_index(), 0);
    }
}
