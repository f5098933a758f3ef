//! Error types for the pdfextract library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the pdfextract library
///
/// Every variant is terminal for the operation that raised it: nothing is
/// written to the destination once an error has been returned.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed item inside a descriptor's `[...]` page list
    #[error(
        "Invalid page selector '{item}' (item {position}) in '{descriptor}': \
         pages are given as [page,pageStart-pageEnd] and the first page is 1"
    )]
    InvalidSelectorSyntax {
        descriptor: String,
        item: String,
        position: usize,
    },

    /// A referenced document does not exist
    #[error("File not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// A selected page is past the end of the document
    #[error(
        "Wrong page selection from {}: requested page {page} from a file having {total} pages",
        .path.display()
    )]
    PageOutOfRange {
        path: PathBuf,
        page: u32,
        total: u32,
    },

    /// The destination could not be created or written
    #[error("Failed to write {}: {reason}", .path.display())]
    WriteFailure { path: PathBuf, reason: String },

    /// Both watermark arguments name existing files
    #[error(
        "Cannot tell the target from the watermark: both {} and {} exist (use --source)",
        .0.display(),
        .1.display()
    )]
    AmbiguousWatermark(PathBuf, PathBuf),

    /// Neither watermark argument names an existing file
    #[error("No document to watermark: neither '{0}' nor '{1}' is an existing file")]
    NoWatermarkTarget(String, String),

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// Merge called without descriptors
    #[error("No input files provided")]
    NoInputs,

    /// Invalid glob pattern
    #[error("Invalid glob pattern: {0}")]
    InvalidGlob(String),

    /// No files matched pattern
    #[error("No PDF files found matching pattern: {0}")]
    NoFilesMatched(String),

    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Log subscriber could not be installed
    #[error("Logging setup failed: {0}")]
    Logging(String),
}
