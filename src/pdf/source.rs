//! Source documents opened for reading

use std::path::{Path, PathBuf};

use lopdf::{Document, ObjectId};
use tracing::debug;

use crate::error::{Error, Result};

/// A loaded input document
#[derive(Debug)]
pub struct SourceDocument {
    path: PathBuf,
    doc: Document,
}

impl SourceDocument {
    /// Load a PDF from disk
    ///
    /// Fails with [`Error::MissingFile`] before touching the parser when the
    /// path does not exist, and with [`Error::EmptyPdf`] when it has no pages.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::MissingFile(path.to_path_buf()));
        }

        let doc = Document::load(path)?;
        Self::from_document(path, doc)
    }

    /// Wrap an in-memory document; `path` is used for messages only
    pub fn from_document<P: Into<PathBuf>>(path: P, doc: Document) -> Result<Self> {
        let path = path.into();
        if doc.get_pages().is_empty() {
            return Err(Error::EmptyPdf(path));
        }
        let source = Self { path, doc };
        debug!("File {} has {} pages.", source.path.display(), source.page_count());
        Ok(source)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    pub(crate) fn into_parts(self) -> (PathBuf, Document) {
        (self.path, self.doc)
    }
}

/// Page object ids of `doc`, ordered by page number
pub(crate) fn ordered_page_ids(doc: &Document) -> Vec<ObjectId> {
    // get_pages is keyed by 1-based page number, so values are already in order
    doc.get_pages().into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_nonexistent_file() {
        let result = SourceDocument::open(Path::new("nonexistent.pdf"));
        assert!(matches!(result.unwrap_err(), Error::MissingFile(_)));
    }

    #[test]
    fn test_empty_document_rejected() {
        let doc = Document::with_version("1.5");
        let result = SourceDocument::from_document("empty.pdf", doc);
        assert!(matches!(result.unwrap_err(), Error::EmptyPdf(_)));
    }
}
