//! Payload types carried by watch-face content slots.

use crate::{TimeDependent, Timestamp};

/// Whether an external cache may store the content for warm start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistPolicy {
    #[default]
    Allowed,
    DoNotPersist,
}

/// Text that is either fixed or derived from the current instant.
#[derive(Debug, Clone, PartialEq)]
pub enum ComplicationText {
    Plain(String),
    /// Remaining time until `target`, rounded up to whole seconds.
    CountdownTo { target: Timestamp, prefix: String },
}

impl ComplicationText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    pub fn countdown(target: Timestamp, prefix: impl Into<String>) -> Self {
        Self::CountdownTo {
            target,
            prefix: prefix.into(),
        }
    }

    pub fn text_at(&self, instant: Timestamp) -> String {
        match self {
            Self::Plain(text) => text.clone(),
            Self::CountdownTo { target, prefix } => {
                let seconds = Self::remaining_seconds(instant, *target);
                let (h, m, s) = (seconds / 3600, (seconds / 60) % 60, seconds % 60);
                if h > 0 {
                    format!("{prefix}{h}:{m:02}:{s:02}")
                } else {
                    format!("{prefix}{m:02}:{s:02}")
                }
            }
        }
    }

    fn remaining_seconds(instant: Timestamp, target: Timestamp) -> i64 {
        let remaining = instant.millis_until(target).max(0);
        remaining.saturating_add(999) / 1000
    }
}

impl TimeDependent for ComplicationText {
    fn next_change(&self, after: Timestamp) -> Option<Timestamp> {
        match self {
            Self::Plain(_) => None,
            Self::CountdownTo { target, .. } => {
                let seconds = Self::remaining_seconds(after, *target);
                let back = (seconds - 1).saturating_mul(1000);
                (seconds > 0).then(|| target.saturating_add_millis(back.saturating_neg()))
            }
        }
    }
}

/// The content variants a slot can show. A `NoData` payload is a placeholder;
/// choosing how to draw it is up to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum ComplicationData {
    NoData,
    Empty,
    ShortText {
        text: ComplicationText,
        title: Option<ComplicationText>,
    },
    LongText {
        text: ComplicationText,
        title: Option<ComplicationText>,
    },
    RangedValue {
        value: f32,
        min: f32,
        max: f32,
        text: Option<ComplicationText>,
    },
    SmallImage {
        uri: String,
    },
    Photo {
        uri: String,
    },
}

impl ComplicationData {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::NoData)
    }

    fn texts(&self) -> impl Iterator<Item = &ComplicationText> {
        let (a, b) = match self {
            Self::ShortText { text, title } | Self::LongText { text, title } => {
                (Some(text), title.as_ref())
            }
            Self::RangedValue { text, .. } => (text.as_ref(), None),
            _ => (None, None),
        };
        a.into_iter().chain(b)
    }

    /// Primary text rendered at `instant`, if this variant has one.
    pub fn text_at(&self, instant: Timestamp) -> Option<String> {
        self.texts().next().map(|text| text.text_at(instant))
    }
}

impl TimeDependent for ComplicationData {
    fn next_change(&self, after: Timestamp) -> Option<Timestamp> {
        self.texts().filter_map(|text| text.next_change(after)).min()
    }
}

/// Slot payload: the data plus its cache policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Complication {
    pub data: ComplicationData,
    pub persist_policy: PersistPolicy,
}

impl Complication {
    pub fn new(data: ComplicationData) -> Self {
        Self {
            data,
            persist_policy: PersistPolicy::Allowed,
        }
    }

    pub fn do_not_persist(mut self) -> Self {
        self.persist_policy = PersistPolicy::DoNotPersist;
        self
    }

    pub fn no_data() -> Self {
        Self::new(ComplicationData::NoData)
    }
}

impl TimeDependent for Complication {
    fn next_change(&self, after: Timestamp) -> Option<Timestamp> {
        self.data.next_change(after)
    }
}
