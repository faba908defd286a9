// How big is the screen? Asked once at startup; the overlay is sized to match.

use crate::error::Error;
use xcap::Monitor;

/// Width and height of the primary monitor (or the first one, if none is marked primary).
pub fn primary_dimensions() -> Result<(usize, usize), Error> {
    let monitors = Monitor::all().map_err(|e| Error::Screen(format!("List monitors: {e}")))?;

    let monitor = monitors
        .iter()
        .find(|m| m.is_primary().unwrap_or(false))
        .or_else(|| monitors.first())
        .ok_or_else(|| Error::Screen("No monitors found".into()))?;

    let width = monitor.width().map_err(|e| Error::Screen(format!("Monitor width: {e}")))?;
    let height = monitor.height().map_err(|e| Error::Screen(format!("Monitor height: {e}")))?;
    if width == 0 || height == 0 {
        return Err(Error::Screen(format!("Monitor reports empty size {width}x{height}")));
    }

    Ok((width as usize, height as usize))
}
