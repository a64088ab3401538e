//! Deterministic doubles for the clock, timer and renderer seams.

use crate::{Clock, DrawMode, Frame, FrameToken, Renderer, Timer, TimerError};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use timeline::Timestamp;

/// Clock whose time only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock(Arc<AtomicI64>);

impl ManualClock {
    pub fn new(now: Timestamp) -> Self {
        Self(Arc::new(AtomicI64::new(now.as_millis())))
    }

    pub fn set(&self, now: Timestamp) {
        self.0.store(now.as_millis(), Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        let millis = i64::try_from(by.as_millis()).unwrap_or(i64::MAX);
        self.0.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.0.load(Ordering::SeqCst))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCall {
    Schedule(FrameToken, Duration),
    Cancel(FrameToken),
}

#[derive(Debug, Default)]
struct TimerLog {
    calls: Vec<TimerCall>,
    pending: Option<(FrameToken, Duration)>,
    fail_next: bool,
}

/// Timer that records every call. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingTimer(Arc<Mutex<TimerLog>>);

impl RecordingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<TimerCall> {
        self.0.lock().calls.clone()
    }

    pub fn clear(&self) {
        self.0.lock().calls.clear();
    }

    /// The registration that would fire next, if any.
    pub fn pending(&self) -> Option<(FrameToken, Duration)> {
        self.0.lock().pending
    }

    /// Remove and return the pending registration, as if it fired.
    pub fn fire(&self) -> Option<(FrameToken, Duration)> {
        self.0.lock().pending.take()
    }

    pub fn fail_next(&self) {
        self.0.lock().fail_next = true;
    }
}

impl Timer for RecordingTimer {
    fn schedule(&mut self, token: FrameToken, delay: Duration) -> Result<(), TimerError> {
        let mut log = self.0.lock();
        if std::mem::take(&mut log.fail_next) {
            return Err(TimerError::Unavailable("injected failure".into()));
        }
        log.calls.push(TimerCall::Schedule(token, delay));
        log.pending = Some((token, delay));
        Ok(())
    }

    fn cancel(&mut self, token: FrameToken) {
        let mut log = self.0.lock();
        log.calls.push(TimerCall::Cancel(token));
        if log.pending.is_some_and(|(pending, _)| pending == token) {
            log.pending = None;
        }
    }
}

/// Renderer that records each frame and optionally advances a clock to
/// simulate drawing cost.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<(DrawMode, Timestamp)>,
    cost: Option<(ManualClock, Duration)>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cost(clock: ManualClock, cost: Duration) -> Self {
        Self {
            frames: Vec::new(),
            cost: Some((clock, cost)),
        }
    }
}

impl<P> Renderer<P> for RecordingRenderer {
    fn render(&mut self, frame: &Frame<'_, P>) {
        self.frames.push((frame.mode, frame.content_now));
        if let Some((clock, cost)) = &self.cost {
            clock.advance(*cost);
        }
    }
}
