#![forbid(unsafe_code)]

use crate::EnvironmentSnapshot;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawMode {
    #[default]
    Interactive,
    Ambient,
    LowBatteryInteractive,
    Mute,
}

impl DrawMode {
    /// Whether frames are scheduled continuously in this mode.
    pub fn is_continuous(self) -> bool {
        !matches!(self, Self::Ambient)
    }
}

/// First matching rule wins: ambient, then low battery, then mute.
pub fn select_draw_mode(env: &EnvironmentSnapshot, allow_ambient: bool) -> DrawMode {
    if allow_ambient && env.is_ambient {
        DrawMode::Ambient
    } else if env.is_battery_low_and_not_charging {
        DrawMode::LowBatteryInteractive
    } else if env.interruption_filter.mutes() {
        DrawMode::Mute
    } else {
        DrawMode::Interactive
    }
}

/// Tracks the current mode so callers only act on changes.
#[derive(Debug, Clone)]
pub struct DrawModeSelector {
    allow_ambient: bool,
    current: DrawMode,
}

impl DrawModeSelector {
    pub fn new(allow_ambient: bool) -> Self {
        Self {
            allow_ambient,
            current: DrawMode::default(),
        }
    }

    pub fn current(&self) -> DrawMode {
        self.current
    }

    /// Returns the new mode if it differs from the previous one.
    pub fn update(&mut self, env: &EnvironmentSnapshot) -> Option<DrawMode> {
        let mode = select_draw_mode(env, self.allow_ambient);
        if mode == self.current {
            return None;
        }
        debug!(from = ?self.current, to = ?mode, "draw mode changed");
        self.current = mode;
        Some(mode)
    }
}
