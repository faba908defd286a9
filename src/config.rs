// Compile-time knobs. There is no config file and no CLI: change a value here and rebuild.
// Visual: every number below is something you can see on screen (length, size, colors, speed).

use std::time::Duration;

use crate::types::Rgba;

/// How many cursor samples the trail remembers (and therefore how long it is).
pub const TRAIL_LENGTH: usize = 50;

/// Radius of each trail dot in pixels.
pub const TRAIL_RADIUS: f64 = 3.0;

/// Normal trail dots: light blue.
pub const TRAIL_COLOR: Rgba = Rgba::rgb(0.2, 0.5, 1.0);

/// Dots captured while a mouse button was held: pure red.
pub const CLICK_COLOR: Rgba = Rgba::rgb(1.0, 0.0, 0.0);

// Opacity multipliers on top of the age fade. Clicked dots stay a bit more solid.
pub const TRAIL_OPACITY: f64 = 0.8;
pub const CLICK_OPACITY: f64 = 0.9;

/// Dots fainter than this are not drawn at all.
pub const FADE_CUTOFF: f64 = 0.05;

/// Pause between frames (~60 samples per second).
pub const UPDATE_INTERVAL: Duration = Duration::from_micros(16_666);

/// Extra pause after the pointer query fails, before trying again.
pub const QUERY_FAILURE_BACKOFF: Duration = Duration::from_millis(100);

/// Buttons 1..=5 (left, middle, right, wheel up, wheel down) count as "clicked".
pub const CLICK_BUTTON_MASK: u32 = 0b1_1111;

/// Sleep durations used by the tracker loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub update_interval: Duration,
    pub failure_backoff: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            update_interval: UPDATE_INTERVAL,
            failure_backoff: QUERY_FAILURE_BACKOFF,
        }
    }
}

impl Timing {
    /// No sleeping at all; lets tests spin the loop at full speed.
    #[cfg(test)]
    pub fn immediate() -> Self {
        Self { update_interval: Duration::ZERO, failure_backoff: Duration::ZERO }
    }
}
