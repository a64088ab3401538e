use crate::Event;
use cadence::{FrameToken, Timer, TimerError};
use flume::Sender;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::trace;

/// Delivers frame callbacks as [`Event::Frame`] after sleeping on the tokio
/// runtime.
#[derive(Debug)]
pub struct TokioTimer {
    events: Sender<Event>,
    pending: Option<(FrameToken, JoinHandle<()>)>,
}

impl TokioTimer {
    pub fn new(events: Sender<Event>) -> Self {
        Self {
            events,
            pending: None,
        }
    }
}

impl Timer for TokioTimer {
    fn schedule(&mut self, token: FrameToken, delay: Duration) -> Result<(), TimerError> {
        let handle = Handle::try_current().map_err(|err| TimerError::Unavailable(err.to_string()))?;
        if let Some((_, task)) = self.pending.take() {
            task.abort();
        }
        let events = self.events.clone();
        let task = handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if events.send_async(Event::Frame(token)).await.is_err() {
                trace!(?token, "event loop closed before frame callback");
            }
        });
        self.pending = Some((token, task));
        Ok(())
    }

    fn cancel(&mut self, token: FrameToken) {
        if let Some((pending, task)) = self.pending.take() {
            if pending == token {
                task.abort();
            } else {
                self.pending = Some((pending, task));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence::testing::RecordingRenderer;
    use cadence::{SystemClock, WatchFaceEngine};
    use config::Config;

    #[tokio::test(start_paused = true)]
    async fn delivers_frame_after_delay() {
        let (tx, rx) = flume::bounded(4);
        let mut engine: WatchFaceEngine<&str, _, _, _> = WatchFaceEngine::new(
            &Config::new(),
            SystemClock,
            TokioTimer::new(tx),
            RecordingRenderer::new(),
        )
        .unwrap();
        engine.set_visible(true).unwrap();

        let Event::Frame(token) = rx.recv_async().await.unwrap() else {
            panic!("expected a frame event");
        };
        assert!(engine.on_frame_callback(token).unwrap());
        assert_eq!(engine.renderer().frames.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_registration_never_fires() {
        let (tx, rx) = flume::bounded(4);
        let mut engine: WatchFaceEngine<&str, _, _, _> = WatchFaceEngine::new(
            &Config::new(),
            SystemClock,
            TokioTimer::new(tx),
            RecordingRenderer::new(),
        )
        .unwrap();
        engine.set_visible(true).unwrap();
        engine.set_visible(false).unwrap();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(engine.renderer().frames.len(), 1);
    }
}
