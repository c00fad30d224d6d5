//! # zoetrope
//!
//! Animated GIF decoding and frame playback scheduling.
//!
//! The crate splits the problem in two:
//! - [`decode`] turns a GIF byte buffer into an immutable [`AnimatedImage`]:
//!   an ordered frame list with per-frame delays, the global loop count, and
//!   a poster image.
//! - [`Playback`] binds an [`AnimatedImage`] and consumes elapsed-time
//!   ticks from whatever refresh signal the caller owns, selecting the
//!   frame that should currently be on screen and reporting when the
//!   animation has run its course.
//!
//! Rendering, timers, and file watching stay outside: feed `tick()` the
//! interval since your last refresh callback and paint
//! [`Playback::visible_image`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use zoetrope::{decode_file, Playback, TickOutcome};
//!
//! let image = Arc::new(decode_file("pulse.gif")?);
//! let mut playback = Playback::new(image);
//!
//! // From your refresh callback:
//! match playback.tick(1.0 / 60.0) {
//!     TickOutcome::Advanced { frame_changed: true, visible } => {
//!         // repaint with `visible`
//!     }
//!     TickOutcome::Advanced { .. } => {}
//!     TickOutcome::Finished => {
//!         // stop delivering ticks
//!     }
//! }
//! # Ok::<(), zoetrope::DecodeError>(())
//! ```

pub mod animation;
pub mod container;
pub mod decoder;
pub mod error;
pub mod playback;

pub use animation::{AnimatedImage, Frame, LoopCount, MIN_FRAME_DELAY};
pub use container::{Container, Entry, EntryProperties, GifContainer};
pub use decoder::{decode, decode_container, decode_file, DEFAULT_FRAME_DELAY};
pub use error::{DecodeError, DecodeResult};
pub use playback::{Playback, PlaybackState, TickOutcome};

pub const VERSION: &str = "0.3.0";
