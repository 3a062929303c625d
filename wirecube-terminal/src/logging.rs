//! Logger setup for the binary.

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::File;

use crate::config::LogConfig;

/// Install env_logger. `RUST_LOG` takes precedence over the configured level.
///
/// The terminal is in the alternate screen while rendering, so anything
/// beyond errors is best sent to `log.file`.
pub fn init(config: &LogConfig) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(config.level.as_str()));

    if let Some(path) = &config.file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("failed to install logger")
}
