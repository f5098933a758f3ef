//! Fixture PDFs for integration tests
//!
//! Every generated page shows a marker string `<label>-<page>` so tests can
//! tell which source page ended up where.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Write a PDF with `pages` pages labelled `<label>-1`, `<label>-2`, ...
///
/// Resources and MediaBox live on the Pages node, so the pages depend on
/// inheritance from the page tree.
pub fn write_labelled_pdf(dir: &Path, label: &str, pages: u32) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut font = Dictionary::new();
    font.set("Type", Object::Name(b"Font".to_vec()));
    font.set("Subtype", Object::Name(b"Type1".to_vec()));
    font.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
    let font_id = doc.add_object(Object::Dictionary(font));

    let mut kids = Vec::new();
    for n in 1..=pages {
        let content = format!("BT /F1 24 Tf 72 700 Td ({}-{}) Tj ET", label, n);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        page.set("Contents", Object::Reference(content_id));
        kids.push(Object::Reference(doc.add_object(Object::Dictionary(page))));
    }

    let mut fonts = Dictionary::new();
    fonts.set("F1", Object::Reference(font_id));
    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));

    let mut pages_dict = Dictionary::new();
    pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
    pages_dict.set("Count", Object::Integer(pages as i64));
    pages_dict.set("Kids", Object::Array(kids));
    pages_dict.set("Resources", Object::Dictionary(resources));
    pages_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ]),
    );
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(Object::Dictionary(catalog));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let path = dir.join(format!("{}.pdf", label));
    doc.save(&path).expect("Failed to write fixture PDF");
    path
}

/// Page object ids of a saved PDF, in page order
pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// First parenthesised string drawn by each page's content, in page order
pub fn page_markers(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("Failed to load output PDF");
    page_ids(&doc)
        .into_iter()
        .map(|id| {
            let content = doc.get_page_content(id).expect("Failed to read page content");
            first_string(&String::from_utf8_lossy(&content))
        })
        .collect()
}

/// Decoded content of every Form XObject a page paints
pub fn overlay_contents(doc: &Document, page_id: ObjectId) -> Vec<String> {
    let page = doc.get_dictionary(page_id).expect("page dictionary");
    let resources = match page.get(b"Resources").expect("page resources") {
        Object::Reference(id) => doc.get_dictionary(*id).expect("resources"),
        Object::Dictionary(dict) => dict,
        other => panic!("unexpected resources: {:?}", other),
    };
    let Ok(xobjects) = resources.get(b"XObject") else {
        return Vec::new();
    };
    let xobjects = match xobjects {
        Object::Reference(id) => doc.get_dictionary(*id).expect("xobjects"),
        Object::Dictionary(dict) => dict,
        other => panic!("unexpected xobjects: {:?}", other),
    };

    xobjects
        .iter()
        .filter_map(|(_, value)| value.as_reference().ok())
        .filter_map(|id| doc.get_object(id).ok())
        .filter_map(|object| object.as_stream().ok())
        .map(|stream| {
            let data = stream
                .decompressed_content()
                .unwrap_or_else(|_| stream.content.clone());
            String::from_utf8_lossy(&data).into_owned()
        })
        .collect()
}

fn first_string(content: &str) -> String {
    let start = content.find('(').map(|i| i + 1).unwrap_or(0);
    let end = content[start..]
        .find(')')
        .map(|i| start + i)
        .unwrap_or(content.len());
    content[start..end].to_string()
}
