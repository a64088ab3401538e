#![forbid(unsafe_code)]

/// Notification interruption filter reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterruptionFilter {
    #[default]
    Unknown,
    All,
    Priority,
    Alarms,
    None,
}

impl InterruptionFilter {
    /// True for any do-not-disturb style setting.
    pub fn mutes(self) -> bool {
        !matches!(self, Self::Unknown | Self::All)
    }
}

/// Device state relevant to how the face is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EnvironmentSnapshot {
    pub is_ambient: bool,
    pub is_battery_low_and_not_charging: bool,
    pub interruption_filter: InterruptionFilter,
    pub is_locked: bool,
}
