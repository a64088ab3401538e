#![forbid(unsafe_code)]

use crate::TimerError;
use timeline::Timestamp;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] config::Error),

    #[error("content error: {0}")]
    Timeline(#[from] timeline::Error),

    #[error("timer error: {0}")]
    Timer(#[from] TimerError),

    #[error("mock time speed must be positive and finite, got {0}")]
    InvalidSpeed(f64),

    #[error("empty mock time wrap range [{min}, {max})")]
    InvalidWrapRange { min: Timestamp, max: Timestamp },
}
