#![forbid(unsafe_code)]

use crate::DrawMode;
use timeline::{SlotId, SlotRegistry, Timestamp};

/// Everything the drawing backend needs for one frame.
#[derive(Debug)]
pub struct Frame<'a, P> {
    pub mode: DrawMode,
    /// Time to display, possibly warped by [`MockTime`](crate::MockTime).
    pub content_now: Timestamp,
    pub is_locked: bool,
    pub slots: &'a SlotRegistry<P>,
}

impl<P> Frame<'_, P> {
    /// The value slot `id` shows in this frame.
    pub fn active(&self, id: SlotId) -> Option<&P> {
        self.slots.get(id).map(|slot| slot.active(self.content_now))
    }
}

/// Paints a frame. Must be synchronous and fast; its cost is measured.
pub trait Renderer<P> {
    fn render(&mut self, frame: &Frame<'_, P>);
}
