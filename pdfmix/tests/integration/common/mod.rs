//! Shared fixtures for the integration tests.
//!
//! Fixtures are generated with lopdf: every page draws its label as a text
//! string, so a merged page can be traced back to its source page.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use pdfmix::merge::pages::{self, PageGeometry};
use std::path::{Path, PathBuf};

/// US Letter in points.
pub const LETTER: (f32, f32) = (612.0, 792.0);

/// Build a PDF whose pages have the given `(width, height, label)`.
///
/// Pages share one resource dictionary through the page tree, so merges
/// must resolve inherited attributes.
pub fn pdf_with_pages(pages: &[(f32, f32, &str)]) -> Vec<u8> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });

    let kids: Vec<Object> = pages
        .iter()
        .map(|&(width, height, label)| {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), Object::Integer(12)]),
                    Operation::new("Td", vec![Object::Integer(10), Object::Integer(10)]),
                    Operation::new("Tj", vec![Object::string_literal(label)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(
                Dictionary::new(),
                content.encode().expect("encode content"),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(width),
                    Object::Real(height),
                ],
                "Contents" => content_id,
            });
            Object::Reference(page_id)
        })
        .collect();

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(count),
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("save fixture");
    bytes
}

/// A PDF of `count` Letter pages labelled `{prefix}1`..`{prefix}{count}`.
pub fn labelled_pdf(prefix: &str, count: usize) -> Vec<u8> {
    let labels: Vec<String> = (1..=count).map(|n| format!("{prefix}{n}")).collect();
    let pages: Vec<_> = labels
        .iter()
        .map(|label| (LETTER.0, LETTER.1, label.as_str()))
        .collect();
    pdf_with_pages(&pages)
}

/// Write `bytes` to `dir/name` and return the path.
pub fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write fixture");
    path
}

/// Parse a merged output.
pub fn load(bytes: &[u8]) -> Document {
    Document::load_mem(bytes).expect("output should parse")
}

/// First string literal drawn by `content`.
pub fn label_of(content: &[u8]) -> String {
    let text = String::from_utf8_lossy(content);
    let start = text.find('(').expect("content draws a string") + 1;
    let end = start + text[start..].find(')').expect("string is closed");
    text[start..end].to_string()
}

/// Label drawn directly by every page, in page order.
pub fn page_labels(doc: &Document) -> Vec<String> {
    pages::page_ids(doc)
        .into_iter()
        .map(|id| label_of(&doc.get_page_content(id).expect("page content")))
        .collect()
}

/// MediaBox of every page, in page order.
pub fn page_sizes(doc: &Document) -> Vec<PageGeometry> {
    pages::page_ids(doc)
        .into_iter()
        .map(|id| pages::page_geometry(doc, id))
        .collect()
}

/// Id of the form XObject a page draws under `name`.
pub fn xobject(doc: &Document, page_id: ObjectId, name: &str) -> ObjectId {
    let page = doc.get_dictionary(page_id).expect("page dictionary");
    let resources = match page.get(b"Resources").expect("page resources") {
        Object::Reference(id) => doc.get_dictionary(*id).expect("resources"),
        other => other.as_dict().expect("resources dictionary"),
    };
    let xobjects = match resources.get(b"XObject").expect("XObject resources") {
        Object::Reference(id) => doc.get_dictionary(*id).expect("xobjects"),
        other => other.as_dict().expect("XObject dictionary"),
    };
    xobjects
        .get(name.as_bytes())
        .and_then(Object::as_reference)
        .expect("form reference")
}

/// Label drawn by a form XObject.
pub fn form_label(doc: &Document, form_id: ObjectId) -> String {
    let stream = doc
        .get_object(form_id)
        .and_then(Object::as_stream)
        .expect("form stream");
    let content = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());
    label_of(&content)
}
