//! Log subscriber setup for the binary

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing::debug;

use crate::config::LogConfig;
use crate::error::{Error, Result};

/// Install the global tracing subscriber described by `config`
///
/// With a file, lines are appended to it without colour codes; otherwise they
/// go to stderr. Can only succeed once per process.
pub fn init(config: &LogConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(config.level.as_tracing())
        .with_target(false);

    match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    }
    .map_err(|e| Error::Logging(e.to_string()))?;

    match &config.file {
        Some(path) => debug!(
            "Setup logging with level {:?} towards {}",
            config.level,
            path.display()
        ),
        None => debug!("Setup logging with level {:?} towards stderr", config.level),
    }
    Ok(())
}
