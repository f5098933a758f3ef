//! pdfextract library
//!
//! Page-level manipulation of PDF files:
//! - Extract a subset of pages from one document
//! - Merge several documents, each with its own page subset, in a given order
//! - Stamp a watermark page (or text) onto every page of a document
//!
//! Inputs are described with descriptors such as `report.pdf[1,3-5,2]`: a path
//! followed by an optional list of 1-based pages and inclusive ranges. Order and
//! repetition in the list are kept, and an empty or missing list means every page.
//!
//! # Example
//!
//! ```no_run
//! use pdfextract::descriptor::FileDescriptor;
//! use pdfextract::operations::merge;
//! use std::path::Path;
//!
//! let inputs = vec![
//!     FileDescriptor::parse("1. intro.pdf[1-2]").unwrap(),
//!     FileDescriptor::parse("2. advanced.pdf").unwrap(),
//! ];
//!
//! merge(&inputs, Path::new("merged.pdf")).expect("Failed to merge PDFs");
//! ```

pub mod config;
pub mod descriptor;
pub mod error;
pub mod logging;
pub mod operations;
pub mod pdf;
pub mod plan;

// Re-export commonly used items
pub use config::{Config, LogConfig, LogLevel, Operation};
pub use descriptor::{FileDescriptor, PageSelector};
pub use error::{Error, Result};
pub use operations::{OperationSummary, WatermarkRequest, WatermarkRoles, WatermarkSource};
pub use plan::{MergePlan, PagePlan, PlanMode};
