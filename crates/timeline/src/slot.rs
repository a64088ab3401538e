use crate::{
    IntervalResolver, SlotId, TimeDependent, TimelineEntry, Timestamp, ValidityInterval,
};
use std::cell::Cell;
use tracing::{trace, warn};

/// A timeline entry as delivered by the content source, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineItem<T> {
    pub payload: T,
    pub start: Timestamp,
    pub end: Option<Timestamp>,
}

impl<T> TimelineItem<T> {
    pub fn new(payload: T, start: Timestamp, end: Option<Timestamp>) -> Self {
        Self {
            payload,
            start,
            end,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentUpdate<T> {
    /// New base value and timeline. When `base` equals the current base only
    /// the timeline is replaced.
    Full {
        base: T,
        timeline: Vec<TimelineItem<T>>,
    },
    /// Fresh timeline for the unchanged base.
    TimelineOnly(Vec<TimelineItem<T>>),
}

/// One independently updatable region of the face.
#[derive(Debug)]
pub struct ContentSlot<T> {
    id: SlotId,
    resolver: IntervalResolver<T>,
    /// Last `(instant, entry position)` answered by [`ContentSlot::active`].
    cache: Cell<Option<(Timestamp, Option<usize>)>>,
}

impl<T> ContentSlot<T> {
    pub fn new(id: SlotId, base: T) -> Self {
        Self {
            id,
            resolver: IntervalResolver::new(base),
            cache: Cell::new(None),
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn resolver(&self) -> &IntervalResolver<T> {
        &self.resolver
    }

    /// The value active at `instant`. Repeated queries for the same instant
    /// reuse the previous selection until the next update.
    pub fn active(&self, instant: Timestamp) -> &T {
        let position = match self.cache.get() {
            Some((cached, position)) if cached == instant => position,
            _ => {
                let position = self
                    .resolver
                    .entries()
                    .iter()
                    .rposition(|entry| entry.interval.contains(instant));
                self.cache.set(Some((instant, position)));
                position
            }
        };
        match position {
            Some(index) => &self.resolver.entries()[index].payload,
            None => self.resolver.base(),
        }
    }

    pub fn next_change_instant(&self, instant: Timestamp) -> Option<Timestamp>
    where
        T: TimeDependent,
    {
        let boundary = self.resolver.next_change_instant(instant);
        let content = self.active(instant).next_change(instant);
        match (boundary, content) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Apply an update, discarding the previous timeline. Returns the number
    /// of malformed entries that were dropped.
    pub fn apply(&mut self, update: ContentUpdate<T>) -> usize
    where
        T: PartialEq,
    {
        self.cache.set(None);
        let timeline = match update {
            ContentUpdate::Full { base, timeline } => {
                if *self.resolver.base() == base {
                    trace!(slot = %self.id, "base unchanged, replacing timeline only");
                } else {
                    self.resolver.replace_base(base);
                }
                timeline
            }
            ContentUpdate::TimelineOnly(timeline) => timeline,
        };
        let (entries, dropped) = self.validate(timeline);
        self.resolver.replace_entries(entries);
        dropped
    }

    fn validate(&self, timeline: Vec<TimelineItem<T>>) -> (Vec<TimelineEntry<T>>, usize) {
        let mut dropped = 0;
        let entries = timeline
            .into_iter()
            .enumerate()
            .filter_map(|(ordinal, item)| {
                match ValidityInterval::new(item.start, item.end) {
                    Ok(interval) => Some(TimelineEntry {
                        payload: item.payload,
                        interval,
                        ordinal,
                    }),
                    Err(err) => {
                        warn!(slot = %self.id, ordinal, %err, "dropping malformed timeline entry");
                        dropped += 1;
                        None
                    }
                }
            })
            .collect();
        (entries, dropped)
    }
}
