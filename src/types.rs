// Core types shared by the trail buffer, the renderer and the overlay window.

/// One remembered cursor position.
/// `valid` is false for slots that were never written (trail still filling up).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sample {
    pub x: i32,
    pub y: i32,
    pub valid: bool,
    pub clicked: bool, // a mouse button was held when this was captured
}

/// Straight (not premultiplied) color, every channel in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    /// Fully opaque color.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same color, new opacity.
    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,     // overlay width in pixels (whole screen)
    pub height: usize,    // overlay height in pixels
    pub pixels: Vec<u32>, // 0xAARRGGBB, premultiplied; 0 = fully transparent
}

impl FrameBuffer {
    /// A fully transparent buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Pixel at (x, y), or None outside the buffer.
    #[cfg(test)]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }
}

/// What the pointer looked like at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerState {
    pub x: i32,
    pub y: i32,
    pub buttons: u32, // bit k-1 set while button k is held
}
