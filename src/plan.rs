//! Page plans: the validated, ordered page indices to copy from each document
//!
//! A [`PagePlan`] is built once the page count of its document is known. Plans
//! for several documents are concatenated into a [`MergePlan`], in which every
//! page stays tagged with the document it comes from.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::descriptor::{FileDescriptor, PageSelector};
use crate::error::{Error, Result};

/// How a plan's pages were chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanMode {
    /// No page list was given, so every page is taken in natural order
    WholeDocument,
    /// The descriptor's page list was expanded
    Selected,
}

/// Ordered zero-based page indices to copy from one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePlan {
    path: PathBuf,
    indices: Vec<u32>,
    mode: PlanMode,
}

impl PagePlan {
    /// Resolve `descriptor` against a document of `total_pages` pages
    ///
    /// Validation is all-or-nothing: if the highest page anywhere in the list
    /// exceeds `total_pages`, that page is reported in [`Error::PageOutOfRange`]
    /// and nothing is expanded.
    pub fn build(descriptor: &FileDescriptor, total_pages: u32) -> Result<Self> {
        if descriptor.is_whole_document() {
            return Ok(Self {
                path: descriptor.path.clone(),
                indices: (0..total_pages).collect(),
                mode: PlanMode::WholeDocument,
            });
        }

        // Parsed selectors never contain page 0, so only the upper bound needs checking
        let max_page = descriptor
            .selectors
            .iter()
            .map(PageSelector::last_page)
            .max()
            .unwrap_or(0);
        if max_page > total_pages {
            return Err(Error::PageOutOfRange {
                path: descriptor.path.clone(),
                page: max_page,
                total: total_pages,
            });
        }

        let pages: Vec<u32> = descriptor
            .selectors
            .iter()
            .flat_map(|selector| selector.pages())
            .collect();

        debug!("Page list for {}: {:?}", descriptor.path.display(), pages);

        Ok(Self {
            path: descriptor.path.clone(),
            indices: pages.into_iter().map(|page| page - 1).collect(),
            mode: PlanMode::Selected,
        })
    }

    /// Plan reading only the first page of a watermark document
    ///
    /// The watermark's own page count does not matter beyond having a page.
    pub fn watermark<P: Into<PathBuf>>(path: P, total_pages: u32) -> Result<Self> {
        let path = path.into();
        if total_pages == 0 {
            return Err(Error::EmptyPdf(path));
        }
        Ok(Self {
            path,
            indices: vec![0],
            mode: PlanMode::Selected,
        })
    }

    /// Document this plan reads from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Zero-based page indices in output order
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn mode(&self) -> PlanMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Position of a document in the user's input order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(pub usize);

/// A page to copy: which document, which zero-based page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedPage {
    pub document: DocumentId,
    pub index: u32,
}

/// Concatenation of per-document plans, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    plans: Vec<PagePlan>,
}

impl MergePlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and validate every document's plan, stopping at the first failure
    pub fn build<'a, I>(inputs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a FileDescriptor, u32)>,
    {
        let mut merge = Self::new();
        for (descriptor, total_pages) in inputs {
            merge.push(PagePlan::build(descriptor, total_pages)?);
        }
        Ok(merge)
    }

    /// Append the next document's plan; returns the id it was tagged with
    pub fn push(&mut self, plan: PagePlan) -> DocumentId {
        self.plans.push(plan);
        DocumentId(self.plans.len() - 1)
    }

    pub fn plans(&self) -> &[PagePlan] {
        &self.plans
    }

    /// Every page of every document, in final output order
    pub fn pages(&self) -> impl Iterator<Item = PlannedPage> + '_ {
        self.plans.iter().enumerate().flat_map(|(doc, plan)| {
            plan.indices.iter().map(move |&index| PlannedPage {
                document: DocumentId(doc),
                index,
            })
        })
    }

    /// Total number of output pages
    pub fn page_count(&self) -> usize {
        self.plans.iter().map(PagePlan::len).sum()
    }
}
