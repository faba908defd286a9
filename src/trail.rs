// Fixed-size ring buffer of recent cursor samples.
// Visual: this *is* the trail; the renderer just paints whatever is in here.

use crate::config::TRAIL_LENGTH;
use crate::types::Sample;

/// The last `N` cursor samples. Writing past `N` silently overwrites the oldest one.
pub struct TrailBuffer<const N: usize = TRAIL_LENGTH> {
    slots: [Sample; N],
    head: usize, // next slot to overwrite
}

impl<const N: usize> TrailBuffer<N> {
    /// Empty trail: every slot invalid, nothing drawn yet.
    pub fn new() -> Self {
        const { assert!(N > 0, "trail needs at least one slot") };
        Self { slots: [Sample::default(); N], head: 0 }
    }

    /// Remember a new cursor position. Never fails; coordinates may be anything,
    /// including negative or off-screen values.
    pub fn push(&mut self, x: i32, y: i32, clicked: bool) {
        self.slots[self.head] = Sample { x, y, valid: true, clicked };
        self.head = (self.head + 1) % N;
    }

    /// Valid samples paired with their age, newest (age 0) first.
    /// Invalid slots are skipped but still use up an age, so ages stay tied to slots.
    /// Call `.rev()` to walk oldest first.
    pub fn iter_by_age(&self) -> impl DoubleEndedIterator<Item = (usize, &Sample)> + '_ {
        (0..N)
            .map(move |age| (age, &self.slots[(self.head + N - 1 - age) % N]))
            .filter(|(_, s)| s.valid)
    }

    /// Newest sample, if any was pushed.
    #[cfg(test)]
    pub fn latest(&self) -> Option<&Sample> {
        self.iter_by_age().next().map(|(_, s)| s)
    }

    /// Number of valid samples (at most `N`).
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.valid).count()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for TrailBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
