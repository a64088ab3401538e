#![forbid(unsafe_code)]

mod error;
mod mock_time;
mod scheduler;

pub use error::Error;
pub use mock_time::MockTime;
pub use scheduler::Scheduler;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix, e.g. `TICKFACE_SCHEDULER__ALLOW_AMBIENT=false`.
pub const ENV_PREFIX: &str = "TICKFACE_";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub scheduler: Scheduler,
    pub mock_time: MockTime,
}

impl Config {
    /// Configuration with every section at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load defaults, then the TOML file at `path`, then `TICKFACE_*`
    /// environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::InvalidPath(path.to_owned()));
        }
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as TOML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let doc = toml_edit::ser::to_string_pretty(self)?;
        std::fs::write(path, doc)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.scheduler.interactive_update_interval.is_zero() {
            return Err(Error::Invalid {
                field: "scheduler.interactive_update_interval",
                reason: "must be greater than zero".into(),
            });
        }
        let speed = self.mock_time.speed;
        if !speed.is_finite() || speed <= 0.0 {
            return Err(Error::Invalid {
                field: "mock_time.speed",
                reason: format!("must be a positive finite number, got {speed}"),
            });
        }
        if let (Some(min), Some(max)) = (self.mock_time.min_time, self.mock_time.max_time)
            && min >= max
        {
            return Err(Error::Invalid {
                field: "mock_time.min_time",
                reason: format!("{min} is not below max_time {max}"),
            });
        }
        Ok(())
    }
}
