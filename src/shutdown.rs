// Ctrl+C handling. The handler only flips a flag; the main loop notices it on its next pass,
// so shutdown takes at most one frame (plus one backoff pause).

use crate::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};

static RUNNING: AtomicBool = AtomicBool::new(true);

#[cfg(unix)]
extern "C" fn on_signal(_sig: libc::c_int) {
    // Only async-signal-safe work in here
    RUNNING.store(false, Ordering::SeqCst);
}

/// Route SIGINT and SIGTERM to the run flag and hand the flag back to the caller.
#[cfg(unix)]
pub fn install() -> Result<&'static AtomicBool, Error> {
    for sig in [libc::SIGINT, libc::SIGTERM] {
        let handler = on_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;
        // SAFETY: `on_signal` only does an atomic store, which is async-signal-safe.
        let previous = unsafe { libc::signal(sig, handler) };
        if previous == libc::SIG_ERR {
            return Err(Error::Signal(format!("signal({sig}) failed")));
        }
    }
    Ok(&RUNNING)
}

/// No signal plumbing here; closing the overlay window is the only way out.
#[cfg(not(unix))]
pub fn install() -> Result<&'static AtomicBool, Error> {
    Ok(&RUNNING)
}

/// Was the loop told to stop?
pub fn requested(flag: &AtomicBool) -> bool {
    !flag.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requested_tracks_the_flag() {
        let flag = AtomicBool::new(true);
        assert!(!requested(&flag));
        flag.store(false, Ordering::SeqCst);
        assert!(requested(&flag));
    }
}
