// Trail renderer: turns the ring buffer into translucent dots on the overlay.
// Visual outcomes:
// - The newest dot is the most solid; each older dot is a little fainter.
// - Dots captured while a mouse button was held are red instead of blue.
// - The very oldest (almost invisible) dots are skipped entirely.

use crate::config::{
    CLICK_COLOR, CLICK_OPACITY, FADE_CUTOFF, TRAIL_COLOR, TRAIL_OPACITY, TRAIL_RADIUS,
};
use crate::draw::{clear, fill_disc};
use crate::trail::TrailBuffer;
use crate::types::{FrameBuffer, Rgba, Sample};

/// Everything about how a dot looks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailStyle {
    pub radius: f64,
    pub trail_color: Rgba,
    pub click_color: Rgba,
    pub trail_opacity: f64, // multiplier on the fade for normal dots
    pub click_opacity: f64, // multiplier on the fade for clicked dots
    pub cull_below: f64,    // fade values under this are not drawn
}

impl Default for TrailStyle {
    fn default() -> Self {
        Self {
            radius: TRAIL_RADIUS,
            trail_color: TRAIL_COLOR,
            click_color: CLICK_COLOR,
            trail_opacity: TRAIL_OPACITY,
            click_opacity: CLICK_OPACITY,
            cull_below: FADE_CUTOFF,
        }
    }
}

/// Linear fade by age: 1.0 for the newest sample, down toward 0 for the oldest.
#[inline]
pub fn fade_alpha(age: usize, len: usize) -> f64 {
    1.0 - age as f64 / len as f64
}

/// Color for one sample at `age` in a trail of `len`, or None when it is too faint to draw.
pub fn paint_for(sample: &Sample, age: usize, len: usize, style: &TrailStyle) -> Option<Rgba> {
    let alpha = fade_alpha(age, len);
    if alpha < style.cull_below {
        return None;
    }
    Some(if sample.clicked {
        style.click_color.with_alpha(alpha * style.click_opacity)
    } else {
        style.trail_color.with_alpha(alpha * style.trail_opacity)
    })
}

/// Redraw the whole overlay from the trail.
///
/// The surface is wiped first, so calling this twice on the same trail gives the same pixels.
/// Dots are painted oldest first so the newest one ends up on top where they overlap.
pub fn render<const N: usize>(trail: &TrailBuffer<N>, fb: &mut FrameBuffer, style: &TrailStyle) {
    clear(fb);

    for (age, sample) in trail.iter_by_age().rev() {
        if let Some(color) = paint_for(sample, age, N, style) {
            fill_disc(fb, sample.x as f64, sample.y as f64, style.radius, color);
        }
    }
}
