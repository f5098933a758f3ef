//! pdfextract CLI tool
//!
//! Extract, merge and watermark PDF pages from the command line.

use std::path::PathBuf;
use std::process;

use anyhow::{bail, Result};
use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use tracing::error;

use pdfextract::config::{default_destination, Config, LogConfig, LogLevel, Operation};
use pdfextract::{logging, operations, WatermarkRequest};

/// pdfextract - Extract, merge and watermark PDF pages
#[derive(Parser)]
#[command(name = "pdfextract")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("log").multiple(false)))]
#[command(after_help = "PAGE SUBSETS:
    Append [pages] to a file name to pick pages: single pages and inclusive
    ranges, separated by commas, first page is 1. Order and repeats are kept;
    [] or no brackets means the whole file.

EXAMPLES:
    # Pages 1, 3 to 5, then 2 again
    pdfextract extract \"report.pdf[1,3-5,2]\" -d excerpt.pdf

    # Cover page of one file followed by the whole of another
    pdfextract merge \"cover.pdf[1]\" body.pdf -d book.pdf

    # Stamp text diagonally on every page
    pdfextract watermark report.pdf \"DRAFT\"

    # Stamp the first page of another PDF on every page
    pdfextract watermark report.pdf --source letterhead.pdf

LOGGING:
    -l, -ll, -lll and -llll log errors, warnings, progress or everything to
    stderr, like --error-log, --warning-log, --info-log and --debug-log.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output PDF file path [default: output.pdf on the desktop]
    #[arg(short, long, global = true, value_name = "OUTPUTFILE")]
    destination: Option<PathBuf>,

    /// Log level shortcut: -l errors, -ll warnings, -lll info, -llll debug
    #[arg(short = 'l', group = "log", action = ArgAction::Count)]
    level: u8,

    /// Log errors only, to stderr or to LOGFILE (--error-log=LOGFILE)
    #[arg(long, group = "log", num_args = 0..=1, require_equals = true, value_name = "LOGFILE")]
    error_log: Option<Option<PathBuf>>,

    /// Log warnings and errors, to stderr or to LOGFILE (the default level)
    #[arg(long, group = "log", num_args = 0..=1, require_equals = true, value_name = "LOGFILE")]
    warning_log: Option<Option<PathBuf>>,

    /// Log progress information, to stderr or to LOGFILE
    #[arg(long, group = "log", num_args = 0..=1, require_equals = true, value_name = "LOGFILE")]
    info_log: Option<Option<PathBuf>>,

    /// Log everything including debug details, to stderr or to LOGFILE
    #[arg(long, group = "log", num_args = 0..=1, require_equals = true, value_name = "LOGFILE")]
    debug_log: Option<Option<PathBuf>>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a subset of pages from one PDF
    Extract {
        /// PDF file with optional page subset, e.g. "report.pdf[2,5-7]"
        descriptor: String,
    },

    /// Merge PDFs (each with an optional page subset) in the given order
    Merge {
        /// PDF files with optional page subsets. Supports * and ? in paths
        #[arg(required = true)]
        descriptors: Vec<String>,
    },

    /// Stamp a watermark onto every page of a PDF
    Watermark {
        /// The PDF to watermark, or the watermark text (order does not matter)
        first: String,

        /// The other of the two: watermark text, or the PDF to watermark
        #[arg(required_unless_present = "source", conflicts_with = "source")]
        second: Option<String>,

        /// Use the first page of this PDF as the watermark; FIRST is then the target
        #[arg(short, long, value_name = "WATERMARKFILE")]
        source: Option<PathBuf>,
    },
}

impl Cli {
    fn log_config(&self) -> LogConfig {
        let shortcut = match self.level {
            0 => None,
            1 => Some(LogLevel::Error),
            2 => Some(LogLevel::Warn),
            3 => Some(LogLevel::Info),
            _ => Some(LogLevel::Debug),
        };
        if let Some(level) = shortcut {
            return LogConfig { level, file: None };
        }

        [
            (LogLevel::Error, &self.error_log),
            (LogLevel::Warn, &self.warning_log),
            (LogLevel::Info, &self.info_log),
            (LogLevel::Debug, &self.debug_log),
        ]
        .into_iter()
        .find_map(|(level, flag)| {
            flag.as_ref().map(|file| LogConfig {
                level,
                file: file.clone(),
            })
        })
        .unwrap_or_default()
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match config(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = logging::init(&config.log) {
        eprintln!("Warning: {}", e);
    }

    if let Err(e) = run(&config) {
        if config.log.file.is_some() {
            error!("{:#}", e);
        }
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Turn parsed arguments into a run configuration
fn config(cli: Cli) -> Result<Config> {
    let log = cli.log_config();
    let operation = match cli.command {
        Commands::Extract { descriptor } => Operation::extract(&descriptor)?,
        Commands::Merge { descriptors } => Operation::merge(&descriptors)?,
        Commands::Watermark {
            first,
            second,
            source,
        } => {
            let request = match (second, source) {
                (Some(second), None) => WatermarkRequest::Pair(first, second),
                (None, Some(source)) => WatermarkRequest::Explicit {
                    target: PathBuf::from(first),
                    source,
                },
                _ => bail!("watermark takes either two arguments or one argument and --source"),
            };
            Operation::watermark(request)
        }
    };

    Ok(Config {
        operation,
        destination: cli.destination.unwrap_or_else(default_destination),
        log,
    })
}

fn run(config: &Config) -> Result<()> {
    let summary = operations::run(config)?;

    eprintln!(
        "Wrote {} page(s) from {} document(s) to {}",
        summary.pages,
        summary.documents,
        summary.destination.display()
    );

    Ok(())
}
