use crate::{Event, error::Error};
use flume::Sender;
use tokio::signal::unix::{SignalKind, signal};

/// Indefinitely listens to signals and forwards them to the scheduling task.
pub async fn wait_for_signal(events: &Sender<Event>) -> Result<(), Error> {
    let mut sigusr1 = signal(SignalKind::user_defined1()).map_err(Error::SignalHandler)?;
    let mut sigusr2 = signal(SignalKind::user_defined2()).map_err(Error::SignalHandler)?;

    loop {
        tokio::select! {
            _ = sigusr1.recv() => {
                events.send_async(Event::Signal(SignalEvent::ToggleAmbient)).await?;
            }
            _ = sigusr2.recv() => {
                events.send_async(Event::Signal(SignalEvent::AmbientTick)).await?;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalEvent {
    /// SIGUSR1
    ToggleAmbient,
    /// SIGUSR2
    AmbientTick,
}
