use cadence::{SystemClock, WatchFaceEngine};
use clap::Parser;
use config::Config;
use std::time::Duration;
use tickface::{
    Event, cli::Cli, demo, render::TracingRenderer, signals::SignalEvent,
    signals::wait_for_signal, timer::TokioTimer,
};
use timeline::Timestamp;
use tracing::{debug, info};
use tracing_log::AsTrace;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity.log_level_filter().as_trace())
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    debug!(config = ?cli);

    let config = match &cli.conffile {
        Some(path) => Config::load(path)?,
        _ => Config::new(),
    };

    let (events_tx, events_rx) = flume::bounded(8);

    let signal_tx = events_tx.clone();
    tokio::spawn(async move {
        if let Err(err) = wait_for_signal(&signal_tx).await {
            tracing::error!(error = ?err, "Error while waiting for signal");
        }
    });

    let mut engine = WatchFaceEngine::new(
        &config,
        SystemClock,
        TokioTimer::new(events_tx),
        TracingRenderer::default(),
    )?;
    demo::install(&mut engine, Timestamp::now(), cli.countdown)?;
    engine.set_environment(cli.environment())?;
    engine.set_visible(true)?;

    let deadline = async {
        match cli.run_for {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
            _ = &mut deadline => break,
            res = events_rx.recv_async() => match res? {
                Event::Frame(token) => {
                    engine.on_frame_callback(token)?;
                }
                Event::Signal(SignalEvent::ToggleAmbient) => {
                    let mut env = *engine.environment();
                    env.is_ambient = !env.is_ambient;
                    engine.set_environment(env)?;
                }
                Event::Signal(SignalEvent::AmbientTick) => {
                    engine.ambient_tick()?;
                }
            }
        }
    }

    engine.destroy();
    info!(
        frames = engine.renderer().frames(),
        stats = ?engine.scheduler().stats(),
        "shutting down"
    );
    Ok(())
}
