// The sample -> store -> render -> present -> sleep loop.
// Visual: once per frame the cursor position becomes a new dot, the whole trail is redrawn,
// and the coordinate line in the terminal updates in place.

use crate::config::Timing;
use crate::draw::Overlay;
use crate::error::Error;
use crate::pointer::PointerSource;
use crate::render::{render, TrailStyle};
use crate::shutdown;
use crate::trail::TrailBuffer;
use crate::types::FrameBuffer;
use std::io::Write;
use std::sync::atomic::AtomicBool;
use std::thread;

/// What one pass of the loop did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Drawn,       // new sample stored and frame presented
    QueryFailed, // nothing stored; caller should back off
}

/// Terminal readout for a successful query (overwrites the current line).
pub fn coordinate_line(x: i32, y: i32) -> String {
    format!("\rMouse Coordinates: X={x:<5} Y={y:<5}")
}

/// Readout shown before the first sample arrives.
pub const BLANK_LINE: &str = "\rMouse Coordinates: X=     Y=     ";

pub const QUERY_FAILED_LINE: &str = "\rMouse Coordinates: Query Failed!   ";

pub struct Tracker<P, O, W, const N: usize> {
    pointer: P,
    overlay: O,
    out: W, // where the coordinate readout goes (stdout in the real program)
    trail: TrailBuffer<N>,
    screen: FrameBuffer,
    style: TrailStyle,
    timing: Timing,
}

impl<P, O, W, const N: usize> Tracker<P, O, W, N>
where
    P: PointerSource,
    O: Overlay,
    W: Write,
{
    pub fn new(pointer: P, overlay: O, out: W, width: usize, height: usize) -> Self {
        Self {
            pointer,
            overlay,
            out,
            trail: TrailBuffer::new(),
            screen: FrameBuffer::new(width, height),
            style: TrailStyle::default(),
            timing: Timing::default(),
        }
    }

    #[cfg(test)]
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn trail(&self) -> &TrailBuffer<N> {
        &self.trail
    }

    /// One pass: read the pointer, store it, redraw, present.
    /// A failed pointer read is reported and skipped; a failed present is returned as an error.
    pub fn step(&mut self) -> Result<Tick, Error> {
        match self.pointer.query_pointer() {
            Ok(p) => {
                self.readout(&coordinate_line(p.x, p.y));

                self.trail.push(p.x, p.y, p.any_button_held());
                render(&self.trail, &mut self.screen, &self.style);
                self.overlay.present(&self.screen)?;
                Ok(Tick::Drawn)
            }
            Err(e) => {
                self.readout(QUERY_FAILED_LINE);
                tracing::warn!("{e}");
                Ok(Tick::QueryFailed)
            }
        }
    }

    /// Keep stepping until `running` is cleared or the overlay window goes away.
    /// Returns how many frames were presented.
    pub fn run(&mut self, running: &AtomicBool) -> Result<u64, Error> {
        let mut frames = 0u64;
        while !shutdown::requested(running) && self.overlay.is_open() {
            match self.step()? {
                Tick::Drawn => frames += 1,
                Tick::QueryFailed => thread::sleep(self.timing.failure_backoff),
            }
            thread::sleep(self.timing.update_interval);
        }
        Ok(frames)
    }

    fn readout(&mut self, line: &str) {
        // Readout is cosmetic; a broken stdout must not stop the overlay.
        let _ = self.out.write_all(line.as_bytes()).and_then(|_| self.out.flush());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PointerState;
    use std::collections::VecDeque;
    use std::sync::atomic::Ordering;

    /// Plays back a fixed list of query results, then keeps failing.
    struct Scripted(VecDeque<Result<PointerState, Error>>);

    impl Scripted {
        fn new(items: Vec<Result<PointerState, Error>>) -> Self {
            Self(items.into())
        }
    }

    impl PointerSource for Scripted {
        fn query_pointer(&mut self) -> Result<PointerState, Error> {
            self.0
                .pop_front()
                .unwrap_or_else(|| Err(Error::PointerQuery("script exhausted".into())))
        }
    }

    /// Counts presented frames and closes itself after `close_after` of them.
    struct Recorder {
        frames: Vec<FrameBuffer>,
        close_after: usize,
        fail_present: bool,
    }

    impl Recorder {
        fn new(close_after: usize) -> Self {
            Self { frames: Vec::new(), close_after, fail_present: false }
        }
    }

    impl Overlay for Recorder {
        fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
            if self.fail_present {
                return Err(Error::WindowUpdate("gone".into()));
            }
            self.frames.push(framebuffer.clone());
            Ok(())
        }

        fn is_open(&self) -> bool {
            self.frames.len() < self.close_after
        }
    }

    fn at(x: i32, y: i32, buttons: u32) -> Result<PointerState, Error> {
        Ok(PointerState { x, y, buttons })
    }

    fn tracker(
        script: Vec<Result<PointerState, Error>>,
        close_after: usize,
    ) -> Tracker<Scripted, Recorder, Vec<u8>, 50> {
        Tracker::new(Scripted::new(script), Recorder::new(close_after), Vec::new(), 64, 64)
            .with_timing(Timing::immediate())
    }

    #[test]
    fn coordinate_line_is_padded() {
        assert_eq!(coordinate_line(7, -12), "\rMouse Coordinates: X=7     Y=-12  ");
        assert_eq!(coordinate_line(123456, 0), "\rMouse Coordinates: X=123456 Y=0    ");
    }

    #[test]
    fn blank_line_has_the_same_layout_as_a_reading() {
        assert_eq!(BLANK_LINE.len(), coordinate_line(0, 0).len());
        assert!(BLANK_LINE.starts_with("\rMouse Coordinates: X="));
        assert!(BLANK_LINE.trim_end().ends_with("Y="));
    }

    #[test]
    fn successful_step_stores_and_presents() {
        let mut t = tracker(vec![at(10, 10, 0), at(20, 20, 0b1)], usize::MAX);
        assert_eq!(t.step().unwrap(), Tick::Drawn);
        assert_eq!(t.step().unwrap(), Tick::Drawn);

        let trail: Vec<(i32, bool)> = t.trail().iter_by_age().map(|(_, s)| (s.x, s.clicked)).collect();
        assert_eq!(trail, vec![(20, true), (10, false)]);
        assert_eq!(t.overlay.frames.len(), 2);
        assert_eq!(t.overlay.frames.last(), Some(&t.screen));

        let printed = String::from_utf8(t.out.clone()).unwrap();
        assert!(printed.ends_with(&coordinate_line(20, 20)));
    }

    #[test]
    fn failed_query_pushes_nothing_and_presents_nothing() {
        let mut t = tracker(vec![at(1, 1, 0), Err(Error::PointerQuery("busy".into()))], usize::MAX);
        t.step().unwrap();
        assert_eq!(t.step().unwrap(), Tick::QueryFailed);

        assert_eq!(t.trail().len(), 1);
        assert_eq!(t.overlay.frames.len(), 1);
        let printed = String::from_utf8(t.out.clone()).unwrap();
        assert!(printed.ends_with(QUERY_FAILED_LINE));
    }

    #[test]
    fn recovers_after_a_failed_query() {
        let mut t = tracker(vec![Err(Error::PointerQuery("busy".into())), at(3, 4, 0)], usize::MAX);
        assert_eq!(t.step().unwrap(), Tick::QueryFailed);
        assert_eq!(t.step().unwrap(), Tick::Drawn);
        assert_eq!(t.trail().latest().map(|s| (s.x, s.y)), Some((3, 4)));
    }

    #[test]
    fn present_failure_is_propagated() {
        let mut t = tracker(vec![at(1, 1, 0)], usize::MAX);
        t.overlay.fail_present = true;
        assert!(matches!(t.step(), Err(Error::WindowUpdate(_))));
    }

    #[test]
    fn run_stops_when_window_closes() {
        let script = (0..10).map(|i| at(i, i, 0)).collect();
        let mut t = tracker(script, 3);
        let running = AtomicBool::new(true);
        assert_eq!(t.run(&running).unwrap(), 3);
        assert_eq!(t.trail().len(), 3);
    }

    #[test]
    fn run_does_nothing_once_stop_was_requested() {
        let mut t = tracker(vec![at(1, 1, 0)], usize::MAX);
        let running = AtomicBool::new(true);
        running.store(false, Ordering::SeqCst);
        assert_eq!(t.run(&running).unwrap(), 0);
        assert!(t.trail().is_empty());
    }

    #[test]
    fn run_keeps_retrying_through_failures() {
        let script = vec![
            Err(Error::PointerQuery("a".into())),
            at(5, 5, 0),
            Err(Error::PointerQuery("b".into())),
            Err(Error::PointerQuery("c".into())),
            at(6, 6, 0),
        ];
        let mut t = tracker(script, 2);
        let running = AtomicBool::new(true);
        assert_eq!(t.run(&running).unwrap(), 2);
        let xs: Vec<i32> = t.trail().iter_by_age().map(|(_, s)| s.x).collect();
        assert_eq!(xs, vec![6, 5]);
    }
}
