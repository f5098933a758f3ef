//! One-page watermark documents built from plain text

use lopdf::{Dictionary, Document, Object, Stream};

/// US Letter in points
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;

const FONT_SIZE: f32 = 60.0;

/// Grey level of the stamp text (0 = black, 1 = white)
const GREY: f32 = 0.75;

/// Build a one-page document showing `text` diagonally across the page
pub fn text_stamp(text: &str) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(Object::Dictionary(helvetica_font()));

    let content_id = doc.add_object(Stream::new(Dictionary::new(), stamp_content(text)));

    let mut fonts = Dictionary::new();
    fonts.set("F1", Object::Reference(font_id));
    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));

    let mut page = Dictionary::new();
    page.set("Type", Object::Name(b"Page".to_vec()));
    page.set("Parent", Object::Reference(pages_id));
    page.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(PAGE_WIDTH),
            Object::Real(PAGE_HEIGHT),
        ]),
    );
    page.set("Resources", Object::Dictionary(resources));
    page.set("Contents", Object::Reference(content_id));
    let page_id = doc.add_object(Object::Dictionary(page));

    let mut pages = Dictionary::new();
    pages.set("Type", Object::Name(b"Pages".to_vec()));
    pages.set("Count", Object::Integer(1));
    pages.set("Kids", Object::Array(vec![Object::Reference(page_id)]));
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(Object::Dictionary(catalog));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc
}

/// Helvetica is one of the standard 14 fonts, so nothing has to be embedded
fn helvetica_font() -> Dictionary {
    let mut font = Dictionary::new();
    font.set("Type", Object::Name(b"Font".to_vec()));
    font.set("Subtype", Object::Name(b"Type1".to_vec()));
    font.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
    font.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
    font
}

fn stamp_content(text: &str) -> Vec<u8> {
    let encoded = encode_win_ansi(text);
    let half_width = estimate_text_width(encoded.len(), FONT_SIZE) / 2.0;

    // Rotate 45 degrees around the page centre, then centre the line on it
    let mut content = format!(
        "q\n{grey} g\n0.7071 0.7071 -0.7071 0.7071 {cx} {cy} cm\nBT\n/F1 {size} Tf\n{x} {y} Td\n(",
        grey = GREY,
        cx = PAGE_WIDTH / 2.0,
        cy = PAGE_HEIGHT / 2.0,
        size = FONT_SIZE,
        x = -half_width,
        y = -FONT_SIZE / 3.0,
    )
    .into_bytes();
    content.extend(escape_pdf_string(&encoded));
    content.extend_from_slice(b") Tj\nET\nQ\n");
    content
}

/// WinAnsiEncoding agrees with Latin-1 for printable characters; others become '?'
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            0x20..=0x7E | 0xA0..=0xFF => u32::from(c) as u8,
            _ => b'?',
        })
        .collect()
}

/// Escape special characters in PDF strings
fn escape_pdf_string(bytes: &[u8]) -> Vec<u8> {
    let mut escaped = Vec::with_capacity(bytes.len());
    for &b in bytes {
        if matches!(b, b'\\' | b'(' | b')') {
            escaped.push(b'\\');
        }
        escaped.push(b);
    }
    escaped
}

/// Average Helvetica glyph is a little over half an em wide
fn estimate_text_width(chars: usize, font_size: f32) -> f32 {
    chars as f32 * font_size * 0.55
}
