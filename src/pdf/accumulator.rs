//! The output document being assembled
//!
//! Source documents are imported whole (objects renumbered past everything
//! already held), then individual pages are appended in plan order. The page
//! tree and catalog are only built in [`OutputAccumulator::write`], which is
//! the single point where the destination file is touched.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::debug;

use super::overlay::{self, Overlay};
use super::source::{ordered_page_ids, SourceDocument};
use crate::error::{Error, Result};

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic Parent chains in damaged files
const MAX_TREE_DEPTH: usize = 64;

/// A source whose objects now live inside the accumulator
#[derive(Debug, Clone)]
pub struct ImportedDocument {
    path: PathBuf,
    page_ids: Vec<ObjectId>,
}

impl ImportedDocument {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> u32 {
        self.page_ids.len() as u32
    }

    fn page_id(&self, index: u32) -> Result<ObjectId> {
        self.page_ids
            .get(index as usize)
            .copied()
            .ok_or_else(|| Error::PageOutOfRange {
                path: self.path.clone(),
                page: index + 1,
                total: self.page_count(),
            })
    }
}

/// Pages collected for the output file, in output order
#[derive(Debug)]
pub struct OutputAccumulator {
    doc: Document,
    pages: Vec<ObjectId>,
}

impl Default for OutputAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputAccumulator {
    pub fn new() -> Self {
        Self {
            doc: Document::with_version("1.5"),
            pages: Vec::new(),
        }
    }

    /// Number of pages appended so far
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Move every object of `source` into the output document
    pub fn import(&mut self, source: SourceDocument) -> ImportedDocument {
        let (path, mut doc) = source.into_parts();

        // Renumber objects in this document to avoid conflicts
        doc.renumber_objects_with(self.doc.max_id + 1);
        let page_ids = ordered_page_ids(&doc);

        self.doc.max_id = self.doc.max_id.max(doc.max_id);
        self.doc.objects.extend(doc.objects);

        debug!(
            "Imported {} ({} pages), max object id now {}",
            path.display(),
            page_ids.len(),
            self.doc.max_id
        );

        ImportedDocument { path, page_ids }
    }

    /// Append page `index` (zero-based) of an imported document
    ///
    /// Each call creates a new page object, so selecting a page twice yields
    /// two pages sharing the same content streams.
    pub fn append_page(&mut self, source: &ImportedDocument, index: u32) -> Result<ObjectId> {
        let page = detach_page(&self.doc, source.page_id(index)?)?;
        Ok(self.push_page(page))
    }

    /// Append page `index` of an imported document with `overlay` painted on top
    pub fn append_overlaid(
        &mut self,
        source: &ImportedDocument,
        index: u32,
        overlay: &Overlay,
    ) -> Result<ObjectId> {
        let mut page = detach_page(&self.doc, source.page_id(index)?)?;
        overlay::apply(&mut self.doc, &mut page, overlay);
        Ok(self.push_page(page))
    }

    /// Turn page `index` of an imported document into a reusable overlay
    pub fn prepare_overlay(&mut self, source: &ImportedDocument, index: u32) -> Result<Overlay> {
        let page_id = source.page_id(index)?;
        overlay::from_page(&mut self.doc, page_id)
    }

    fn push_page(&mut self, page: Dictionary) -> ObjectId {
        let id = self.doc.add_object(Object::Dictionary(page));
        self.pages.push(id);
        id
    }

    /// Build the page tree and serialize everything to `destination`
    ///
    /// Consumes the accumulator: an output document is written exactly once.
    pub fn write(mut self, destination: &Path) -> Result<usize> {
        let page_count = self.pages.len();
        let pages_id = self.doc.new_object_id();

        // Update parent references for all pages
        for &page_id in &self.pages {
            if let Ok(Object::Dictionary(dict)) = self.doc.get_object_mut(page_id) {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }

        let kids: Vec<Object> = self.pages.iter().map(|&id| Object::Reference(id)).collect();

        let mut pages_object = Dictionary::new();
        pages_object.set("Type", Object::Name(b"Pages".to_vec()));
        pages_object.set("Count", Object::Integer(page_count as i64));
        pages_object.set("Kids", Object::Array(kids));
        self.doc.objects.insert(pages_id, Object::Dictionary(pages_object));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = self.doc.add_object(Object::Dictionary(catalog));

        self.doc.trailer.set("Root", Object::Reference(catalog_id));

        // Drop source catalogs, unused pages and anything only they referenced
        let pruned = self.doc.prune_objects();
        debug!("Pruned {} unreferenced objects", pruned.len());

        self.doc.compress();

        let write_failure = |reason: String| Error::WriteFailure {
            path: destination.to_path_buf(),
            reason,
        };
        let file = File::create(destination).map_err(|e| write_failure(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        self.doc
            .save_to(&mut writer)
            .map_err(|e| write_failure(e.to_string()))?;
        writer.flush().map_err(|e| write_failure(e.to_string()))?;

        Ok(page_count)
    }
}

/// Copy of a page dictionary with inherited attributes made explicit
///
/// The copy has no Parent; it is re-parented when the output tree is built.
pub(crate) fn detach_page(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let mut page = doc.get_dictionary(page_id)?.clone();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;

    while let Some(parent_id) = parent {
        let Ok(node) = doc.get_dictionary(parent_id) else {
            break;
        };
        for key in INHERITABLE {
            if !page.has(key) {
                if let Ok(value) = node.get(key) {
                    page.set(key.to_vec(), value.clone());
                }
            }
        }

        depth += 1;
        if depth >= MAX_TREE_DEPTH {
            break;
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    page.remove(b"Parent");
    Ok(page)
}
