// What you SEE now:
// • A see-through layer over the whole screen.
// • A short trail of fading blue dots follows the mouse.
// • Dots captured while a mouse button is held are red.
// • The terminal shows the live cursor coordinates on one line. Ctrl+C quits.

#[cfg(target_os = "linux")]
mod click_through;
mod config;
mod draw;
mod error;
mod pointer;
mod render;
mod screen;
mod shutdown;
mod tracker;
mod trail;
mod types;

use draw::Drawer;
use error::Error;
use pointer::DeviceQuery;
use std::io::Write;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tracker::{Tracker, BLANK_LINE};

fn main() -> Result<(), Error> {
    /* --- Logging ---
       Diagnostics go to stderr; stdout is reserved for the coordinate line. */
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cursor_trail=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    /* --- Ctrl+C ---
       Visual: pressing Ctrl+C makes the trail vanish within one frame. */
    let running = shutdown::install()?;

    /* --- Overlay sized to the screen ---
       Visual: an invisible window now covers the whole primary monitor. */
    let (width, height) = screen::primary_dimensions()?;
    tracing::info!(width, height, "screen size");
    let drawer = Drawer::overlay("Cursor Trail", width, height)?;

    let mut tracker: Tracker<_, _, _, { config::TRAIL_LENGTH }> =
        Tracker::new(DeviceQuery::new()?, drawer, std::io::stdout(), width, height);
    tracing::info!(samples = tracker.trail().capacity(), "trail ready");

    println!("Mouse trail overlay started. Press Ctrl+C to exit.");
    print!("{BLANK_LINE}");
    let _ = std::io::stdout().flush();

    /* ------------------------------ Main loop ------------------------------ */
    let frames = tracker.run(running)?;

    println!();
    if shutdown::requested(running) {
        println!("Caught interrupt. Exiting gracefully...");
    }
    tracing::info!(frames, samples = tracker.trail().len(), "stopped");

    println!("Cleaning up resources...");
    drop(tracker); // closes the overlay window
    println!("Exiting.");
    Ok(())
}
