#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Debug time-warp applied to the timestamp handed to the renderer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MockTime {
    pub enabled: bool,

    /// Multiplier applied to real elapsed time.
    pub speed: f64,

    /// Lower bound of the wrap range, epoch milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_time: Option<i64>,

    /// Exclusive upper bound of the wrap range, epoch milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_time: Option<i64>,
}

impl Default for MockTime {
    fn default() -> Self {
        Self {
            enabled: false,
            speed: 1.0,
            min_time: None,
            max_time: None,
        }
    }
}
