use cadence::{EnvironmentSnapshot, InterruptionFilter};
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::path::{Path, PathBuf};

/// Tickface: a power-aware watch face simulator
///
/// Drives the watch-face render scheduler against the wall clock and logs
/// every frame. Send SIGUSR1 to toggle ambient mode and SIGUSR2 to deliver an
/// ambient tick.
#[derive(Debug, Parser, Clone)]
#[command(about, long_about, version)]
pub struct Cli {
    /// Path to configuration file.
    #[arg(short, long, value_parser = validate_file)]
    pub conffile: Option<PathBuf>,

    /// Start with the battery low and not charging.
    #[arg(long)]
    pub battery_low: bool,

    /// Start with do-not-disturb enabled.
    #[arg(long)]
    pub mute: bool,

    /// Start in ambient mode.
    #[arg(long)]
    pub ambient: bool,

    /// Seconds until the demo countdown reaches zero.
    #[arg(long, default_value_t = 30)]
    pub countdown: u32,

    /// Stop after this many seconds. Runs until interrupted when omitted.
    #[arg(long)]
    pub run_for: Option<u64>,

    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

impl Cli {
    pub fn environment(&self) -> EnvironmentSnapshot {
        EnvironmentSnapshot {
            is_ambient: self.ambient,
            is_battery_low_and_not_charging: self.battery_low,
            interruption_filter: if self.mute {
                InterruptionFilter::Priority
            } else {
                InterruptionFilter::All
            },
            is_locked: false,
        }
    }
}

/// Check if the file exists.
#[inline(always)]
fn validate_file(file: &str) -> Result<PathBuf, String> {
    let path = Path::new(file);
    if path.exists() {
        Ok(path.to_owned())
    } else {
        Err(format!("File not found: {:?}", path))
    }
}
