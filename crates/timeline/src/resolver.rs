use crate::{Timestamp, ValidityInterval};

/// A scheduled override of a slot's base value.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry<T> {
    pub payload: T,
    pub interval: ValidityInterval,
    /// Position in the declaration order supplied by the content source.
    pub ordinal: usize,
}

/// Selects the active value of one slot among its base value and timeline.
///
/// Among the entries containing an instant, the one declared last wins. A
/// narrower entry declared after a broader one therefore overrides it for its
/// own interval only, and the broader entry takes over again once it ends.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalResolver<T> {
    base: T,
    entries: Vec<TimelineEntry<T>>,
}

impl<T> IntervalResolver<T> {
    pub fn new(base: T) -> Self {
        Self {
            base,
            entries: Vec::new(),
        }
    }

    /// Entries must already be sorted by ordinal.
    pub fn with_entries(base: T, entries: Vec<TimelineEntry<T>>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].ordinal < w[1].ordinal));
        Self { base, entries }
    }

    pub fn base(&self) -> &T {
        &self.base
    }

    pub fn entries(&self) -> &[TimelineEntry<T>] {
        &self.entries
    }

    pub(crate) fn replace_base(&mut self, base: T) {
        self.base = base;
    }

    pub(crate) fn replace_entries(&mut self, entries: Vec<TimelineEntry<T>>) {
        debug_assert!(entries.windows(2).all(|w| w[0].ordinal < w[1].ordinal));
        self.entries = entries;
    }

    /// The entry active at `instant`, or `None` when the base value is.
    pub fn select_entry(&self, instant: Timestamp) -> Option<&TimelineEntry<T>> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.interval.contains(instant))
    }

    pub fn select(&self, instant: Timestamp) -> &T {
        self.select_entry(instant)
            .map_or(&self.base, |entry| &entry.payload)
    }

    /// The smallest entry boundary strictly after `instant`, or `None` if the
    /// selection never changes again.
    ///
    /// Boundaries of entries shadowed by a later overlapping entry are still
    /// reported, so the selection may be the same on both sides of the
    /// returned instant. It never changes before it.
    pub fn next_change_instant(&self, instant: Timestamp) -> Option<Timestamp> {
        self.entries
            .iter()
            .filter_map(|entry| entry.interval.next_boundary_after(instant))
            .min()
    }
}
