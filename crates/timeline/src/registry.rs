use crate::{ContentSlot, ContentUpdate, Error, TimeDependent, Timestamp};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Identifier the content source uses to address a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub u32);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

/// Every live content slot of one face.
#[derive(Debug)]
pub struct SlotRegistry<T> {
    slots: BTreeMap<SlotId, ContentSlot<T>>,
}

impl<T> Default for SlotRegistry<T> {
    fn default() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }
}

impl<T> SlotRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot, or reset an existing one to `base` with no timeline.
    pub fn configure(&mut self, id: SlotId, base: T) {
        debug!(slot = %id, "configuring content slot");
        self.slots.insert(id, ContentSlot::new(id, base));
    }

    pub fn remove(&mut self, id: SlotId) -> Option<ContentSlot<T>> {
        self.slots.remove(&id)
    }

    pub fn get(&self, id: SlotId) -> Option<&ContentSlot<T>> {
        self.slots.get(&id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentSlot<T>> {
        self.slots.values()
    }

    pub fn apply(&mut self, id: SlotId, update: ContentUpdate<T>) -> Result<usize, Error>
    where
        T: PartialEq,
    {
        let slot = self.slots.get_mut(&id).ok_or(Error::UnknownSlot(id))?;
        Ok(slot.apply(update))
    }

    /// Apply every update of a batch. Updates for unknown slots are skipped
    /// and reported once the rest of the batch has been applied.
    pub fn apply_batch(
        &mut self,
        batch: impl IntoIterator<Item = (SlotId, ContentUpdate<T>)>,
    ) -> Result<(), Error>
    where
        T: PartialEq,
    {
        let mut unknown = Vec::new();
        for (id, update) in batch {
            match self.slots.get_mut(&id) {
                Some(slot) => {
                    slot.apply(update);
                }
                None => unknown.push(id),
            }
        }
        match unknown.len() {
            0 => Ok(()),
            1 => Err(Error::UnknownSlot(unknown[0])),
            _ => Err(Error::UnknownSlots(unknown)),
        }
    }

    /// The soonest instant after `instant` at which any slot's displayed
    /// content changes.
    pub fn next_change_instant(&self, instant: Timestamp) -> Option<Timestamp>
    where
        T: TimeDependent,
    {
        self.slots
            .values()
            .filter_map(|slot| slot.next_change_instant(instant))
            .min()
    }
}
