#![forbid(unsafe_code)]

//! Time-varying content for watch-face slots.
//!
//! A [`ContentSlot`] owns a base value and a list of scheduled overrides
//! ([`TimelineEntry`]). The [`IntervalResolver`] answers which value is active
//! at an instant and when that answer next changes.

pub mod complication;
mod error;
mod interval;
mod registry;
mod resolver;
mod slot;
mod timestamp;

pub use complication::{Complication, ComplicationData, ComplicationText, PersistPolicy};
pub use error::Error;
pub use interval::ValidityInterval;
pub use registry::{SlotId, SlotRegistry};
pub use resolver::{IntervalResolver, TimelineEntry};
pub use slot::{ContentSlot, ContentUpdate, TimelineItem};
pub use timestamp::{TimeDependent, Timestamp};
