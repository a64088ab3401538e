#![forbid(unsafe_code)]

use crate::{
    Clock, DrawMode, DrawModeSelector, EnvironmentSnapshot, Error, FrameScheduler, FrameToken,
    Renderer, Timer,
};
use config::Config;
use timeline::{ContentUpdate, SlotId, SlotRegistry, TimeDependent};
use tracing::{debug, info};

/// One watch face: its content slots, draw mode and frame schedule.
///
/// Every call must come from the scheduling thread; environment and content
/// updates arriving elsewhere are marshalled there by the caller.
pub struct WatchFaceEngine<P, C, T, R> {
    scheduler: FrameScheduler<C, T>,
    selector: DrawModeSelector,
    environment: EnvironmentSnapshot,
    slots: SlotRegistry<P>,
    renderer: R,
    visible: bool,
}

impl<P, C, T, R> WatchFaceEngine<P, C, T, R>
where
    P: TimeDependent + PartialEq,
    C: Clock,
    T: Timer,
    R: Renderer<P>,
{
    /// Fails when `config` does not validate.
    pub fn new(config: &Config, clock: C, timer: T, renderer: R) -> Result<Self, Error> {
        Ok(Self {
            scheduler: FrameScheduler::new(config, clock, timer)?,
            selector: DrawModeSelector::new(config.scheduler.allow_ambient),
            environment: EnvironmentSnapshot::default(),
            slots: SlotRegistry::new(),
            renderer,
            visible: false,
        })
    }

    pub fn mode(&self) -> DrawMode {
        self.selector.current()
    }

    pub fn environment(&self) -> &EnvironmentSnapshot {
        &self.environment
    }

    pub fn slots(&self) -> &SlotRegistry<P> {
        &self.slots
    }

    pub fn scheduler(&self) -> &FrameScheduler<C, T> {
        &self.scheduler
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn configure_slot(&mut self, id: SlotId, base: P) -> Result<(), Error> {
        self.slots.configure(id, base);
        self.content_changed()
    }

    pub fn remove_slot(&mut self, id: SlotId) -> Result<(), Error> {
        if self.slots.remove(id).is_some() {
            self.content_changed()?;
        }
        Ok(())
    }

    /// Apply a batch of content updates, then redraw once.
    pub fn apply_content(
        &mut self,
        batch: impl IntoIterator<Item = (SlotId, ContentUpdate<P>)>,
    ) -> Result<(), Error> {
        let applied = self.slots.apply_batch(batch);
        self.content_changed()?;
        applied.map_err(Error::from)
    }

    pub fn set_environment(&mut self, environment: EnvironmentSnapshot) -> Result<(), Error> {
        let lock_changed = self.environment.is_locked != environment.is_locked;
        self.environment = environment;
        let mode = match self.selector.update(&environment) {
            Some(mode) => {
                info!(?mode, "draw mode changed");
                mode
            }
            None if lock_changed => {
                debug!(locked = environment.is_locked, "lock state changed");
                self.mode()
            }
            None => return Ok(()),
        };
        if !self.visible {
            return Ok(());
        }
        if mode.is_continuous() {
            self.scheduler.request_frame()
        } else {
            self.scheduler.cancel();
            self.draw()
        }
    }

    pub fn set_visible(&mut self, visible: bool) -> Result<(), Error> {
        if self.visible == visible {
            return Ok(());
        }
        self.visible = visible;
        debug!(visible, "visibility changed");
        if visible {
            self.draw()
        } else {
            self.scheduler.cancel();
            Ok(())
        }
    }

    /// Coarse wake-up while ambient: draw exactly one frame.
    pub fn ambient_tick(&mut self) -> Result<(), Error> {
        if !self.visible || self.mode().is_continuous() {
            debug!(mode = ?self.mode(), visible = self.visible, "ambient tick ignored");
            return Ok(());
        }
        self.draw()
    }

    /// Deliver a fired timer registration. Returns whether a frame was drawn.
    pub fn on_frame_callback(&mut self, token: FrameToken) -> Result<bool, Error> {
        let mode = self.mode();
        self.scheduler.on_frame_callback(
            token,
            mode,
            self.environment.is_locked,
            &self.slots,
            &mut self.renderer,
        )
    }

    pub fn destroy(&mut self) {
        info!("destroying watch face");
        self.scheduler.destroy();
        self.visible = false;
    }

    fn draw(&mut self) -> Result<(), Error> {
        let mode = self.mode();
        self.scheduler.draw_frame(
            mode,
            self.environment.is_locked,
            &self.slots,
            &mut self.renderer,
        )
    }

    fn content_changed(&mut self) -> Result<(), Error> {
        if self.visible && self.mode().is_continuous() {
            self.scheduler.request_frame()?;
        }
        Ok(())
    }
}
