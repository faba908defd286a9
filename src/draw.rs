// Overlay window + software drawing utilities.
// Visual effects provided here:
// 1) A borderless, transparent, always-on-top, click-through window covering the screen.
// 2) Wiping that window back to "see-through".
// 3) Translucent round dots blended on top of whatever is already drawn.

use crate::error::Error;
use crate::types::{FrameBuffer, Rgba};
use minifb::{Window, WindowOptions};

/// Anything that can show a finished frame on screen.
/// The tracker loop only talks to this, so tests can swap in a fake.
pub trait Overlay {
    fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error>;
    fn is_open(&self) -> bool;
}

pub struct Drawer {
    window: Window, // the see-through window on top of everything
}

impl Drawer {
    /// Create a screen-sized overlay at the top-left corner.
    /// Visual: nothing appears yet; the window is fully transparent until dots are drawn.
    pub fn overlay(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let options = WindowOptions {
            borderless: true,
            title: false,
            resize: false,
            topmost: true,
            transparency: true,
            none: true,
            ..WindowOptions::default()
        };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_position(0, 0);
        tracing::debug!(width, height, "overlay window created");

        make_click_through(&window);
        Ok(Self { window })
    }
}

/// Visual: without this the overlay would swallow every click meant for the apps below.
#[cfg(target_os = "linux")]
fn make_click_through(window: &Window) {
    if let Err(e) = crate::click_through::enable(window) {
        tracing::warn!("{e}. Overlay will not be click-through.");
    }
}

#[cfg(not(target_os = "linux"))]
fn make_click_through(_window: &Window) {
    tracing::warn!("Click-through is only supported on X11. Overlay will capture input.");
}

impl Overlay for Drawer {
    /// Push the pixels for this frame to the screen.
    /// Visual: the trail on screen jumps to the new frame.
    fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    /// Returns false once the window is gone (so we can stop the loop).
    fn is_open(&self) -> bool {
        self.window.is_open()
    }
}

/* ---------- Software drawing: clear, source-over pixels, filled discs ---------- */

/// Wipe every pixel to fully transparent. Overwrites; nothing from the last frame survives.
pub fn clear(fb: &mut FrameBuffer) {
    fb.pixels.fill(0);
}

/// Convert a straight color (scaled by `coverage`) to premultiplied 0..1 channels.
#[inline]
fn premultiply(color: Rgba) -> [f64; 4] {
    let a = color.a.clamp(0.0, 1.0);
    [color.r.clamp(0.0, 1.0) * a, color.g.clamp(0.0, 1.0) * a, color.b.clamp(0.0, 1.0) * a, a]
}

#[inline]
fn unpack(px: u32) -> [f64; 4] {
    let ch = |shift: u32| ((px >> shift) & 0xFF) as f64 / 255.0;
    [ch(16), ch(8), ch(0), ch(24)]
}

#[inline]
fn pack([r, g, b, a]: [f64; 4]) -> u32 {
    let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
    (q(a) << 24) | (q(r) << 16) | (q(g) << 8) | q(b)
}

/// Blend one premultiplied source pixel over (x,y) if it is inside the buffer.
/// out = src + dst * (1 - src_alpha)
#[inline]
fn blend_over(fb: &mut FrameBuffer, x: i32, y: i32, src: [f64; 4]) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    let dst = unpack(fb.pixels[idx]);
    let keep = 1.0 - src[3];
    fb.pixels[idx] = pack([
        src[0] + dst[0] * keep,
        src[1] + dst[1] * keep,
        src[2] + dst[2] * keep,
        src[3] + dst[3] * keep,
    ]);
}

/// Fill a solid disc centered at (cx,cy), blended over what is already there.
/// A pixel belongs to the disc when its center is within `radius`.
/// Visual: a translucent dot; off-screen parts are simply not drawn.
pub fn fill_disc(fb: &mut FrameBuffer, cx: f64, cy: f64, radius: f64, color: Rgba) {
    if radius <= 0.0 || color.a <= 0.0 {
        return;
    }
    let src = premultiply(color);
    let r2 = radius * radius;

    // Scan just the bounding box, clipped to the buffer
    let x0 = (cx - radius).floor().max(0.0);
    let y0 = (cy - radius).floor().max(0.0);
    let x1 = (cx + radius).ceil().min(fb.width as f64 - 1.0);
    let y1 = (cy + radius).ceil().min(fb.height as f64 - 1.0);
    if x0 > x1 || y0 > y1 {
        return;
    }

    for y in (y0 as i32)..=(y1 as i32) {
        for x in (x0 as i32)..=(x1 as i32) {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            if dx * dx + dy * dy > r2 {
                continue; // outside the circle
            }
            blend_over(fb, x, y, src);
        }
    }
}
