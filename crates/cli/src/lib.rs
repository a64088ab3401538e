pub mod cli;
pub mod demo;
pub mod error;
pub mod render;
pub mod signals;
pub mod timer;

use cadence::FrameToken;
use signals::SignalEvent;

/// Everything the scheduling task reacts to, marshalled through one channel.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    Frame(FrameToken),
    Signal(SignalEvent),
}
