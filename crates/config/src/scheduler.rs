#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::time::Duration;

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Scheduler {
    /// Nominal redraw interval while interactive or muted, in milliseconds.
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    pub interactive_update_interval: Duration,

    /// Redraw interval while the battery is low and not charging, in
    /// milliseconds. Never faster than `interactive_update_interval`.
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    pub low_battery_update_interval: Duration,

    /// Whether an ambient signal may switch the face into ambient mode.
    pub allow_ambient: bool,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            interactive_update_interval: Duration::from_millis(1000),
            low_battery_update_interval: Duration::from_millis(60_000),
            allow_ambient: true,
        }
    }
}

impl Scheduler {
    /// The interval used while the battery is low.
    pub fn effective_low_battery_interval(&self) -> Duration {
        self.low_battery_update_interval
            .max(self.interactive_update_interval)
    }
}
