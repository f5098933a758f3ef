//! Single-layer page overlay
//!
//! The overlay page is captured once as a Form XObject. Every target page then
//! gets its original content wrapped in `q`/`Q`, so transformations left active
//! by that content cannot move the overlay, followed by a short stream that
//! paints the form. Going through a form keeps the overlay's own resource names
//! (fonts, images) from clashing with the page's.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use tracing::debug;

use super::accumulator::detach_page;
use crate::error::Result;

/// US Letter, used when the overlay page has no usable box
const DEFAULT_BBOX: [i64; 4] = [0, 0, 612, 792];

/// Resource name prefix for the overlay form on each page
const NAME_PREFIX: &str = "Wm";

/// An overlay page ready to be stamped onto target pages
#[derive(Debug, Clone, Copy)]
pub struct Overlay {
    form: ObjectId,
    save_state: ObjectId,
}

/// Capture page `page_id` of `doc` as a Form XObject inside `doc`
pub(crate) fn from_page(doc: &mut Document, page_id: ObjectId) -> Result<Overlay> {
    let page = detach_page(doc, page_id)?;
    let content = doc.get_page_content(page_id)?;

    let resources = page
        .get(b"Resources")
        .cloned()
        .unwrap_or_else(|_| Object::Dictionary(Dictionary::new()));
    let bbox = page
        .get(b"CropBox")
        .or_else(|_| page.get(b"MediaBox"))
        .cloned()
        .unwrap_or_else(|_| {
            Object::Array(DEFAULT_BBOX.iter().map(|&v| Object::Integer(v)).collect())
        });

    let mut form_dict = Dictionary::new();
    form_dict.set("Type", Object::Name(b"XObject".to_vec()));
    form_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    form_dict.set("FormType", Object::Integer(1));
    form_dict.set("BBox", bbox);
    form_dict.set("Resources", resources);

    debug!("Overlay form built from {} bytes of page content", content.len());

    let form = doc.add_object(Stream::new(form_dict, content));
    let save_state = doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));

    Ok(Overlay { form, save_state })
}

/// Paint `overlay` on top of `page`
///
/// `page` is a detached page dictionary; its Resources are rewritten as a
/// direct dictionary so resource dictionaries shared with other pages are
/// left untouched.
pub(crate) fn apply(doc: &mut Document, page: &mut Dictionary, overlay: &Overlay) {
    let mut resources = resolve_dictionary(doc, page.get(b"Resources").ok());
    let mut xobjects = resolve_dictionary(doc, resources.get(b"XObject").ok());

    let name = unused_name(&xobjects);
    xobjects.set(name.as_bytes().to_vec(), Object::Reference(overlay.form));
    resources.set("XObject", Object::Dictionary(xobjects));
    page.set("Resources", Object::Dictionary(resources));

    let paint = format!("\nQ\nq /{} Do Q\n", name);
    let paint_id = doc.add_object(Stream::new(Dictionary::new(), paint.into_bytes()));

    let mut contents = vec![Object::Reference(overlay.save_state)];
    match page.get(b"Contents").ok().cloned() {
        Some(Object::Array(existing)) => contents.extend(existing),
        Some(existing) => contents.push(existing),
        None => {}
    }
    contents.push(Object::Reference(paint_id));
    page.set("Contents", Object::Array(contents));
}

/// First `Wm<n>` not already used by the page's XObjects
fn unused_name(xobjects: &Dictionary) -> String {
    (0..)
        .map(|n| format!("{}{}", NAME_PREFIX, n))
        .find(|name| !xobjects.has(name.as_bytes()))
        .unwrap_or_else(|| NAME_PREFIX.to_string())
}

fn resolve_dictionary(doc: &Document, object: Option<&Object>) -> Dictionary {
    match object {
        Some(Object::Dictionary(dict)) => dict.clone(),
        Some(Object::Reference(id)) => doc
            .get_dictionary(*id)
            .cloned()
            .unwrap_or_else(|_| Dictionary::new()),
        _ => Dictionary::new(),
    }
}
