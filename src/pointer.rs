// Where is the mouse, and is a button held?
// Visual expectation: each successful query becomes one new dot at the cursor.

use crate::config::CLICK_BUTTON_MASK;
use crate::error::Error;
use crate::types::PointerState;
use device_query::{DeviceQuery as _, DeviceState};

/// Source of pointer samples. Real builds use [`DeviceQuery`]; tests script their own.
pub trait PointerSource {
    fn query_pointer(&mut self) -> Result<PointerState, Error>;
}

impl PointerState {
    /// True while any of buttons 1..=5 is held.
    /// Visual: the dot captured now will be red.
    pub fn any_button_held(&self) -> bool {
        self.buttons & CLICK_BUTTON_MASK != 0
    }
}

/// Global pointer reader backed by `device_query` (sees the cursor anywhere on screen,
/// not just over our own window).
pub struct DeviceQuery {
    state: DeviceState,
}

impl DeviceQuery {
    /// Open the pointer device. Fails (instead of panicking) when no display is reachable.
    pub fn new() -> Result<Self, Error> {
        let state = require_device(open_device_state())?;
        Ok(Self { state })
    }
}

#[cfg(target_os = "linux")]
fn open_device_state() -> Option<DeviceState> {
    DeviceState::checked_new()
}

#[cfg(not(target_os = "linux"))]
fn open_device_state() -> Option<DeviceState> {
    Some(DeviceState::new())
}

/// Turn a missing device handle into a setup error.
fn require_device<T>(device: Option<T>) -> Result<T, Error> {
    device.ok_or_else(|| Error::PointerInit("Could not access the X display".into()))
}

impl PointerSource for DeviceQuery {
    fn query_pointer(&mut self) -> Result<PointerState, Error> {
        let mouse = self.state.get_mouse();
        Ok(PointerState {
            x: mouse.coords.0,
            y: mouse.coords.1,
            buttons: button_mask(&mouse.button_pressed),
        })
    }
}

/// Pack device_query's per-button flags into a bitmask.
/// Index 0 of `pressed` is unused; index k is button k, which becomes bit k-1.
pub fn button_mask(pressed: &[bool]) -> u32 {
    pressed
        .iter()
        .enumerate()
        .skip(1)
        .take(32)
        .filter(|&(_, &down)| down)
        .fold(0u32, |mask, (k, _)| mask | (1 << (k - 1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_device_is_a_setup_error() {
        let opened: Result<(), Error> = require_device(None);
        assert!(matches!(opened, Err(Error::PointerInit(_))));
        assert!(matches!(require_device(Some(7)), Ok(7)));
    }

    #[test]
    fn mask_ignores_slot_zero() {
        assert_eq!(button_mask(&[true, false, false]), 0);
        assert_eq!(button_mask(&[]), 0);
    }

    #[test]
    fn mask_maps_button_k_to_bit_k_minus_one() {
        assert_eq!(button_mask(&[false, true]), 0b1);
        assert_eq!(button_mask(&[false, false, false, true]), 0b100);
        assert_eq!(button_mask(&[false, true, false, true, false, true]), 0b10101);
    }

    #[test]
    fn only_buttons_one_to_five_count_as_clicks() {
        let held = |buttons| PointerState { x: 0, y: 0, buttons }.any_button_held();
        assert!(!held(0));
        assert!(held(0b1));
        assert!(held(0b1_0000));
        assert!(!held(0b10_0000)); // button 6
    }
}
