use cadence::{Frame, Renderer};
use timeline::Complication;
use tracing::{debug, info};

/// Stand-in drawing backend that logs what each frame would show.
#[derive(Debug, Default)]
pub struct TracingRenderer {
    frames: u64,
}

impl TracingRenderer {
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer<Complication> for TracingRenderer {
    fn render(&mut self, frame: &Frame<'_, Complication>) {
        self.frames += 1;
        info!(
            frame = self.frames,
            mode = ?frame.mode,
            content_now = %frame.content_now,
            locked = frame.is_locked,
            "render"
        );
        for slot in frame.slots.iter() {
            let active = slot.active(frame.content_now);
            if active.data.is_placeholder() {
                debug!(slot = %slot.id(), "placeholder");
                continue;
            }
            debug!(
                slot = %slot.id(),
                text = ?active.data.text_at(frame.content_now),
                persist = ?active.persist_policy,
                "slot content"
            );
        }
    }
}
