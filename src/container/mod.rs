pub mod gif;

pub use gif::GifContainer;

use image::RgbaImage;

/// Per-entry timing metadata reported by a container backend.
///
/// Not every container carries every field; resolution order and fallback
/// values are the decoder's business, not the backend's.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EntryProperties {
    /// Delay in seconds as authored, before any viewer-side clamping.
    pub unclamped_delay: Option<f64>,
    /// Standard delay in seconds.
    pub delay: Option<f64>,
}

/// One successfully decoded container entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub image: RgbaImage,
    pub properties: EntryProperties,
}

/// Boundary to the external image codec: a recognized container exposes its
/// global loop count and per-entry decoded pixels plus timing metadata.
///
/// Recognition (the format-signature check) happens when the concrete
/// container is opened, so a value implementing this trait is already known
/// to be a valid container of its format.
pub trait Container {
    /// Global loop count, if the container carries one. A value of 0 means
    /// repeat forever.
    fn loop_count(&self) -> Option<u32>;

    /// Number of entries in the container, decodable or not.
    fn entry_count(&self) -> usize;

    /// Decode the entry at `index`. Returns `None` when the entry's pixel
    /// data or timing metadata cannot be read. Each entry is consumed at
    /// most once.
    fn decode_entry(&mut self, index: usize) -> Option<Entry>;
}
