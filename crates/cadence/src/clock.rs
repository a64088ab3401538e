#![forbid(unsafe_code)]

use crate::FrameToken;
use std::time::Duration;
use timeline::Timestamp;

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Single-shot wake-up registration owned by the scheduling thread.
///
/// When a registration fires the owner hands `token` back to
/// [`FrameScheduler::on_frame_callback`](crate::FrameScheduler::on_frame_callback).
pub trait Timer {
    fn schedule(&mut self, token: FrameToken, delay: Duration) -> Result<(), TimerError>;
    fn cancel(&mut self, token: FrameToken);
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    #[error("timer unavailable: {0}")]
    Unavailable(String),

    #[error("timer rejected delay of {0:?}")]
    Rejected(Duration),
}
