use crate::{SlotId, Timestamp};

/// Represents all possible errors that can occur in this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The interval does not satisfy `start < end`.
    #[error("invalid validity interval [{start}, {end})")]
    InvalidInterval { start: Timestamp, end: Timestamp },

    /// An update addressed a slot that was never configured.
    #[error("unknown content slot: {0}")]
    UnknownSlot(SlotId),

    /// Several slots in one batch were unknown. The rest of the batch was applied.
    #[error("unknown content slots: {0:?}")]
    UnknownSlots(Vec<SlotId>),
}
