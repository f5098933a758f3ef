//! The three top-level operations: extract, merge and watermark
//!
//! Each operation owns one [`OutputAccumulator`] for its whole run. Documents
//! are handled strictly one after another, and the destination is written only
//! after every source has been opened, validated and copied.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{Config, Operation};
use crate::descriptor::FileDescriptor;
use crate::error::{Error, Result};
use crate::pdf::{text_stamp, OutputAccumulator, SourceDocument};
use crate::plan::{MergePlan, PagePlan, PlanMode};

/// What an operation wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSummary {
    /// Number of input documents pages were taken from
    pub documents: usize,
    /// Number of pages in the output
    pub pages: usize,
    pub destination: PathBuf,
}

/// Where the watermark comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatermarkSource {
    /// First page of an existing PDF
    Document(PathBuf),
    /// Text rendered onto a generated one-page document
    Text(String),
}

/// The two watermark arguments as given by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatermarkRequest {
    /// Order-independent pair; the one naming an existing file is the target
    /// and the other is watermark text
    Pair(String, String),
    /// Target and watermark document named explicitly
    Explicit { target: PathBuf, source: PathBuf },
}

/// Target document and watermark, once the arguments are sorted out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatermarkRoles {
    pub target: PathBuf,
    pub source: WatermarkSource,
}

impl WatermarkRequest {
    /// Decide which argument is the target
    ///
    /// For a pair, exactly one argument must be an existing file. Both or
    /// neither existing is an error rather than a guess by position.
    pub fn resolve(&self) -> Result<WatermarkRoles> {
        match self {
            WatermarkRequest::Pair(a, b) => {
                let (a_path, b_path) = (Path::new(a), Path::new(b));
                match (a_path.is_file(), b_path.is_file()) {
                    (true, true) => Err(Error::AmbiguousWatermark(
                        a_path.to_path_buf(),
                        b_path.to_path_buf(),
                    )),
                    (false, false) => Err(Error::NoWatermarkTarget(a.clone(), b.clone())),
                    (true, false) => Ok(WatermarkRoles {
                        target: a_path.to_path_buf(),
                        source: WatermarkSource::Text(b.clone()),
                    }),
                    (false, true) => Ok(WatermarkRoles {
                        target: b_path.to_path_buf(),
                        source: WatermarkSource::Text(a.clone()),
                    }),
                }
            }
            WatermarkRequest::Explicit { target, source } => {
                for path in [target, source] {
                    if !path.is_file() {
                        return Err(Error::MissingFile(path.clone()));
                    }
                }
                Ok(WatermarkRoles {
                    target: target.clone(),
                    source: WatermarkSource::Document(source.clone()),
                })
            }
        }
    }
}

/// Run the operation named in `config`
pub fn run(config: &Config) -> Result<OperationSummary> {
    match &config.operation {
        Operation::Extract { descriptor } => extract(descriptor, &config.destination),
        Operation::Merge { descriptors } => merge(descriptors, &config.destination),
        Operation::Watermark { request } => {
            let roles = request.resolve()?;
            watermark(&roles, &config.destination)
        }
    }
}

/// Copy the selected pages of one document to `destination`
pub fn extract(descriptor: &FileDescriptor, destination: &Path) -> Result<OperationSummary> {
    info!("Extract pages procedure starts");
    copy_pages(std::slice::from_ref(descriptor), destination)
}

/// Concatenate the selected pages of several documents, in the order given
///
/// # Example
///
/// ```no_run
/// use pdfextract::descriptor::FileDescriptor;
/// use pdfextract::operations::merge;
/// use std::path::Path;
///
/// let inputs = vec![
///     FileDescriptor::parse("cover.pdf[1]").unwrap(),
///     FileDescriptor::parse("body.pdf").unwrap(),
/// ];
/// merge(&inputs, Path::new("merged.pdf")).expect("Failed to merge");
/// ```
pub fn merge(descriptors: &[FileDescriptor], destination: &Path) -> Result<OperationSummary> {
    info!("Merge files procedure starts");
    copy_pages(descriptors, destination)
}

fn copy_pages(descriptors: &[FileDescriptor], destination: &Path) -> Result<OperationSummary> {
    if descriptors.is_empty() {
        return Err(Error::NoInputs);
    }

    let mut output = OutputAccumulator::new();
    let mut merged = MergePlan::new();

    for descriptor in descriptors {
        info!("Merging file {}", descriptor);
        let source = SourceDocument::open(&descriptor.path)?;

        let plan = PagePlan::build(descriptor, source.page_count())?;
        if plan.mode() == PlanMode::WholeDocument {
            warn!("Extracting the whole file {}", descriptor.path.display());
        }

        let imported = output.import(source);
        debug!(
            "Copying {} of {} page(s) from {}",
            plan.len(),
            imported.page_count(),
            imported.path().display()
        );
        for &index in plan.indices() {
            info!("Extracting page {}", index + 1);
            output.append_page(&imported, index)?;
        }
        merged.push(plan);
    }

    info!("Writing output to {}", destination.display());
    let pages = output.write(destination)?;

    Ok(OperationSummary {
        documents: merged.plans().len(),
        pages,
        destination: destination.to_path_buf(),
    })
}

/// Stamp the first page of the watermark onto every page of the target
pub fn watermark(roles: &WatermarkRoles, destination: &Path) -> Result<OperationSummary> {
    info!("PDF watermarking procedure starts");
    warn!("Path to pdf file: {}", roles.target.display());

    let target = SourceDocument::open(&roles.target)?;
    let stamp = match &roles.source {
        WatermarkSource::Document(path) => {
            warn!("Path to pdf watermark: {}", path.display());
            SourceDocument::open(path)?
        }
        WatermarkSource::Text(text) => {
            warn!("Watermark text: {}", text);
            SourceDocument::from_document(format!("<text: {}>", text), text_stamp(text))?
        }
    };

    let target_plan = PagePlan::build(&FileDescriptor::whole(target.path()), target.page_count())?;
    let stamp_plan = PagePlan::watermark(stamp.path(), stamp.page_count())?;

    let mut output = OutputAccumulator::new();
    let imported_stamp = output.import(stamp);
    let overlay = output.prepare_overlay(&imported_stamp, stamp_plan.indices()[0])?;

    let imported_target = output.import(target);
    for &index in target_plan.indices() {
        output.append_overlaid(&imported_target, index, &overlay)?;
    }

    info!("Writing output to {}", destination.display());
    let pages = output.write(destination)?;

    Ok(OperationSummary {
        documents: 1,
        pages,
        destination: destination.to_path_buf(),
    })
}
