#![forbid(unsafe_code)]

use crate::{Clock, DrawMode, Error, Frame, MockTime, Renderer, Timer};
use config::Config;
use std::time::Duration;
use timeline::{SlotRegistry, TimeDependent, Timestamp};
use tracing::{debug, trace, warn};

/// Identifies one timer registration. Deliveries carrying any other token
/// than the pending one are stale and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

/// Result of the next-frame computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDelay {
    /// Drawing cannot keep up with the interval; render again right away.
    Immediate,
    After(Duration),
}

impl FrameDelay {
    /// Milliseconds to wait, with `-1` for [`FrameDelay::Immediate`].
    pub fn as_millis(self) -> i64 {
        match self {
            Self::Immediate => -1,
            Self::After(delay) => i64::try_from(delay.as_millis()).unwrap_or(i64::MAX),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleState {
    pub pending: Option<FrameToken>,
    pub last_draw: Option<Timestamp>,
    pub next_draw: Timestamp,
}

impl ScheduleState {
    pub fn is_frame_callback_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub frames: u64,
    /// Frames that started immediately because the previous one overran.
    pub immediate: u64,
}

/// Decides when the next frame is drawn and keeps at most one timer
/// registration outstanding.
///
/// All methods must be called from the thread that owns the timer.
#[derive(Debug)]
pub struct FrameScheduler<C, T> {
    clock: C,
    timer: T,
    mock_time: Option<MockTime>,
    interactive_interval: Duration,
    low_battery_interval: Duration,
    state: ScheduleState,
    next_token: u64,
    destroyed: bool,
    stats: FrameStats,
}

impl<C: Clock, T: Timer> FrameScheduler<C, T> {
    /// Fails when `config` does not validate.
    pub fn new(config: &Config, clock: C, timer: T) -> Result<Self, Error> {
        config.validate()?;
        let mock_time = MockTime::from_config(&config.mock_time, clock.now())?;
        Ok(Self {
            clock,
            timer,
            mock_time,
            interactive_interval: config.scheduler.interactive_update_interval,
            low_battery_interval: config.scheduler.effective_low_battery_interval(),
            state: ScheduleState::default(),
            next_token: 0,
            destroyed: false,
            stats: FrameStats::default(),
        })
    }

    pub fn state(&self) -> &ScheduleState {
        &self.state
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Nominal redraw interval for `mode`, `None` when nothing is scheduled
    /// continuously.
    pub fn update_interval(&self, mode: DrawMode) -> Option<Duration> {
        match mode {
            DrawMode::Interactive | DrawMode::Mute => Some(self.interactive_interval),
            DrawMode::LowBatteryInteractive => Some(self.low_battery_interval),
            DrawMode::Ambient => None,
        }
    }

    /// Display time for the real instant `real`.
    pub fn content_time(&self, real: Timestamp) -> Timestamp {
        self.mock_time.map_or(real, |mock| mock.content_now(real))
    }

    /// Delay from `now` until the next frame.
    ///
    /// `start` is when the frame that just finished began. Frames land on
    /// multiples of `interval` counted from the epoch, and move earlier when
    /// any slot's content changes before that boundary. `content_now` is only
    /// used to look up those content changes.
    pub fn compute_delay_till_next_frame<P: TimeDependent>(
        &mut self,
        interval: Duration,
        start: Timestamp,
        now: Timestamp,
        content_now: Timestamp,
        slots: &SlotRegistry<P>,
    ) -> FrameDelay {
        let interval = i64::try_from(interval.as_millis()).unwrap_or(i64::MAX).max(1);

        if start.millis_until(now) >= interval {
            self.state.next_draw = now;
            return FrameDelay::Immediate;
        }

        // The next frame lands strictly after the pending target, which the
        // timer may deliver slightly early. A target more than one interval
        // ahead of `now` means the clock went backwards.
        let after = if self.state.next_draw >= now
            && now.millis_until(self.state.next_draw) <= interval
        {
            self.state.next_draw
        } else {
            now
        };
        let next = after
            .as_millis()
            .div_euclid(interval)
            .saturating_add(1)
            .saturating_mul(interval);
        let mut next = Timestamp::from_millis(next);

        if let Some(change) = slots.next_change_instant(content_now) {
            let content_delay = content_now.millis_until(change);
            let real_delay = self
                .mock_time
                .map_or(content_delay, |mock| mock.real_delay_millis(content_delay));
            let wake = now.saturating_add_millis(real_delay.max(0));
            if wake < next {
                trace!(%change, %wake, "content change before next boundary");
                next = wake;
            }
        }

        self.state.next_draw = next;
        FrameDelay::After(Duration::from_millis(
            u64::try_from(now.millis_until(next)).unwrap_or(0),
        ))
    }

    /// Render once now and, if `mode` is continuous, arm the next frame.
    pub fn draw_frame<P, R>(
        &mut self,
        mode: DrawMode,
        is_locked: bool,
        slots: &SlotRegistry<P>,
        renderer: &mut R,
    ) -> Result<(), Error>
    where
        P: TimeDependent,
        R: Renderer<P>,
    {
        if self.destroyed {
            trace!("draw after destroy ignored");
            return Ok(());
        }
        let span = tracing::debug_span!("draw_frame", ?mode);
        let _enter = span.enter();

        let start = self.clock.now();
        renderer.render(&Frame {
            mode,
            content_now: self.content_time(start),
            is_locked,
            slots,
        });
        let now = self.clock.now();
        self.state.last_draw = Some(start);
        self.stats.frames += 1;

        let Some(interval) = self.update_interval(mode) else {
            self.cancel();
            return Ok(());
        };
        let content_now = self.content_time(now);
        match self.compute_delay_till_next_frame(interval, start, now, content_now, slots) {
            FrameDelay::Immediate => {
                self.stats.immediate += 1;
                debug!(cost_ms = start.millis_until(now), "frame overran interval");
                self.arm(Duration::ZERO)
            }
            FrameDelay::After(delay) => self.arm(delay),
        }
    }

    /// Handle a timer delivery. Returns whether a frame was drawn.
    pub fn on_frame_callback<P, R>(
        &mut self,
        token: FrameToken,
        mode: DrawMode,
        is_locked: bool,
        slots: &SlotRegistry<P>,
        renderer: &mut R,
    ) -> Result<bool, Error>
    where
        P: TimeDependent,
        R: Renderer<P>,
    {
        if self.destroyed || self.state.pending != Some(token) {
            trace!(?token, "stale frame callback");
            return Ok(false);
        }
        self.state.pending = None;
        self.draw_frame(mode, is_locked, slots, renderer)?;
        Ok(true)
    }

    /// Replace any pending registration with one that fires right away.
    pub fn request_frame(&mut self) -> Result<(), Error> {
        if self.destroyed {
            return Ok(());
        }
        self.state.next_draw = self.clock.now();
        self.arm(Duration::ZERO)
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.state.pending.take() {
            trace!(?token, "cancelling frame callback");
            self.timer.cancel(token);
        }
    }

    /// Cancel the pending registration; every later delivery is a no-op.
    pub fn destroy(&mut self) {
        self.cancel();
        self.destroyed = true;
    }

    fn arm(&mut self, delay: Duration) -> Result<(), Error> {
        self.cancel();
        self.next_token += 1;
        let token = FrameToken(self.next_token);
        if let Err(err) = self.timer.schedule(token, delay) {
            warn!(%err, ?delay, "failed to schedule frame callback");
            return Err(err.into());
        }
        trace!(?token, ?delay, "frame callback scheduled");
        self.state.pending = Some(token);
        Ok(())
    }
}
