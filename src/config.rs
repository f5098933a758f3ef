//! Run configuration
//!
//! The binary turns command-line arguments into a [`Config`]; the library only
//! ever sees this typed form. Descriptors are parsed while the configuration
//! is built, so a malformed page list is reported before any file is opened.

use std::path::PathBuf;

use dirs_next::{desktop_dir, home_dir};

use crate::descriptor::{expand_wildcards, FileDescriptor};
use crate::error::{Error, Result};
use crate::operations::WatermarkRequest;

/// File name used when no destination is given
pub const DEFAULT_OUTPUT_NAME: &str = "output.pdf";

/// Everything needed to run one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub operation: Operation,
    pub destination: PathBuf,
    pub log: LogConfig,
}

/// The primary operation; exactly one per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Extract { descriptor: FileDescriptor },
    Merge { descriptors: Vec<FileDescriptor> },
    Watermark { request: WatermarkRequest },
}

impl Operation {
    /// Extract from one raw descriptor such as `report.pdf[2-4]`
    pub fn extract(raw: &str) -> Result<Self> {
        Ok(Operation::Extract {
            descriptor: FileDescriptor::parse(raw)?,
        })
    }

    /// Merge raw descriptors in the order given; paths may use `*` and `?`
    pub fn merge<S: AsRef<str>>(raws: &[S]) -> Result<Self> {
        let parsed = raws
            .iter()
            .map(|raw| FileDescriptor::parse(raw.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let descriptors = expand_wildcards(parsed)?;
        if descriptors.is_empty() {
            return Err(Error::NoInputs);
        }
        Ok(Operation::Merge { descriptors })
    }

    pub fn watermark(request: WatermarkRequest) -> Self {
        Operation::Watermark { request }
    }
}

/// Verbosity, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_tracing(self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
        }
    }
}

/// Where log lines go and how many of them
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogConfig {
    pub level: LogLevel,
    /// Append to this file instead of writing to stderr
    pub file: Option<PathBuf>,
}

/// `output.pdf` on the user's desktop
///
/// Falls back to `~/Desktop`, then to the current directory.
pub fn default_destination() -> PathBuf {
    desktop_dir()
        .or_else(|| home_dir().map(|home| home.join("Desktop")))
        .map(|dir| dir.join(DEFAULT_OUTPUT_NAME))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_NAME))
}
