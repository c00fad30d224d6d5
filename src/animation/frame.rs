use image::RgbaImage;

/// Shortest delay a frame may carry, in seconds. Malformed or zero-delay
/// encodings would otherwise play back at runaway speed.
pub const MIN_FRAME_DELAY: f64 = 0.02;

/// One decoded animation frame: a pixel buffer plus the duration it stays
/// on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    image: RgbaImage,
    delay: f64,
}

impl Frame {
    /// The delay is clamped to [`MIN_FRAME_DELAY`], so a stored delay is
    /// always positive.
    pub fn new(image: RgbaImage, delay: f64) -> Self {
        Self {
            image,
            delay: delay.max(MIN_FRAME_DELAY),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Display duration in seconds.
    pub fn delay(&self) -> f64 {
        self.delay
    }
}
