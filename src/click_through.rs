// Let mouse input fall through the overlay to whatever window is underneath.
// Visual: nothing changes on screen, but clicks land on your apps instead of the trail layer.
//
// X11 only: the overlay's input shape is replaced by an empty XFixes region.

use crate::error::Error;
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use x11rb::connection::Connection;
use x11rb::protocol::shape;
use x11rb::protocol::xfixes::ConnectionExt as _;

/// X11 window id behind a raw handle, or None for non-X11 windows (e.g. Wayland).
pub fn x11_window_id(handle: RawWindowHandle) -> Option<u32> {
    match handle {
        RawWindowHandle::Xlib(h) => u32::try_from(h.window).ok(),
        RawWindowHandle::Xcb(h) => Some(h.window.get()),
        _ => None,
    }
}

/// Give `window` an empty input region so it never receives pointer events.
pub fn enable(window: &impl HasWindowHandle) -> Result<(), Error> {
    let handle = window
        .window_handle()
        .map_err(|e| Error::ClickThrough(format!("Window handle: {e}")))?;
    let id = x11_window_id(handle.as_raw())
        .ok_or_else(|| Error::ClickThrough("Overlay is not an X11 window".into()))?;

    let (conn, _screen) = x11rb::connect(None).map_err(failed("Connect"))?;

    // XFixes refuses requests until a version has been negotiated
    conn.xfixes_query_version(5, 0)
        .map_err(failed("XFixes unavailable"))?
        .reply()
        .map_err(failed("XFixes unavailable"))?;

    let region = conn.generate_id().map_err(failed("Region id"))?;
    conn.xfixes_create_region(region, &[]).map_err(failed("Create region"))?;
    conn.xfixes_set_window_shape_region(id, shape::SK::INPUT, 0, 0, region)
        .map_err(failed("Set input shape"))?;
    conn.xfixes_destroy_region(region).map_err(failed("Destroy region"))?;
    conn.flush().map_err(failed("Flush"))?;

    tracing::debug!(window = id, "overlay input region cleared");
    Ok(())
}

fn failed<E: std::fmt::Display>(what: &'static str) -> impl FnOnce(E) -> Error {
    move |e| Error::ClickThrough(format!("{what}: {e}"))
}
