#![forbid(unsafe_code)]

//! Render scheduling for an always-on watch face.
//!
//! [`DrawModeSelector`] maps environment signals to a [`DrawMode`];
//! [`FrameScheduler`] decides when the next frame is due, waking early for
//! any content change reported by the [`timeline::SlotRegistry`];
//! [`WatchFaceEngine`] wires both to a renderer.

pub mod clock;
mod draw_mode;
mod engine;
mod environment;
mod error;
mod mock_time;
mod render;
mod scheduler;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use clock::{Clock, SystemClock, Timer, TimerError};
pub use draw_mode::{DrawMode, DrawModeSelector, select_draw_mode};
pub use engine::WatchFaceEngine;
pub use environment::{EnvironmentSnapshot, InterruptionFilter};
pub use error::Error;
pub use mock_time::MockTime;
pub use render::{Frame, Renderer};
pub use scheduler::{FrameDelay, FrameScheduler, FrameStats, FrameToken, ScheduleState};
