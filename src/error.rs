// One error type for the whole program.
// Every variant states *where* things went wrong.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Screen query error: {0}")]
    Screen(String), // Finding the monitor size failed

    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the overlay window failed

    #[error("Window update error: {0}")]
    WindowUpdate(String), // Pushing a frame to the overlay failed

    #[error("Click-through error: {0}")]
    ClickThrough(String), // Clearing the overlay's input region failed (overlay still works)

    #[error("Pointer init error: {0}")]
    PointerInit(String), // Opening the pointer device failed (no display)

    #[error("Pointer query error: {0}")]
    PointerQuery(String), // Reading the cursor failed (not fatal, the loop retries)

    #[error("Signal setup error: {0}")]
    Signal(String), // Installing the Ctrl+C handler failed
}
