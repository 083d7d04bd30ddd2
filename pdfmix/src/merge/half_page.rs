//! Half-page merge: the top half of one document over the bottom half of
//! another, page by page.
//!
//! Each output page is sized like the top page. The top page is drawn at
//! the origin, the bottom page is drawn whole but shifted down by half the
//! output height, so the page boundary clips its upper half away. Nothing
//! is cropped explicitly.
//!
//! When one document is shorter, its first page stands in for every
//! missing index.

use std::collections::HashMap;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

use crate::error::{PdfMixError, Result};
use crate::merge::document::{Composed, OutputDocument};
use crate::merge::pages::{self, PageGeometry};

/// Resource name of the top page's form XObject on every output page.
pub const TOP_XOBJECT: &str = "PageTop";

/// Resource name of the bottom page's form XObject on every output page.
pub const BOTTOM_XOBJECT: &str = "PageBottom";

/// Page drawn at `index`, or the first page when `index` is past the end.
pub fn fallback_page<T: Copy>(pages: &[T], index: usize) -> Option<T> {
    pages.get(index).or_else(|| pages.first()).copied()
}

/// Overlay the top half of `top` with the bottom half of `bottom`.
///
/// The output has `max(pages(top), pages(bottom))` pages.
///
/// # Errors
///
/// - [`PdfMixError::Pdf`] when either input fails to parse.
/// - [`PdfMixError::EmptyDocument`] when either input has no pages, since
///   there is then no first page to fall back to.
pub fn overlay_halves(top: &[u8], bottom: &[u8]) -> Result<Composed> {
    let mut top_doc = Document::load_mem(top)?;
    let mut bottom_doc = Document::load_mem(bottom)?;

    let mut output = OutputDocument::new();
    output.adopt_id_space(&mut top_doc);
    output.adopt_id_space(&mut bottom_doc);

    let top_pages = pages::page_ids(&top_doc);
    let bottom_pages = pages::page_ids(&bottom_doc);
    if top_pages.is_empty() {
        return Err(PdfMixError::empty_document("top"));
    }
    if bottom_pages.is_empty() {
        return Err(PdfMixError::empty_document("bottom"));
    }

    let page_count = top_pages.len().max(bottom_pages.len());
    let mut top_embedder = PageEmbedder::new(&top_doc);
    let mut bottom_embedder = PageEmbedder::new(&bottom_doc);

    for index in 0..page_count {
        let top_id = fallback_page(&top_pages, index)
            .ok_or_else(|| PdfMixError::empty_document("top"))?;
        let bottom_id = fallback_page(&bottom_pages, index)
            .ok_or_else(|| PdfMixError::empty_document("bottom"))?;

        let upper = top_embedder.embed(&mut output, top_id)?;
        let lower = bottom_embedder.embed(&mut output, bottom_id)?;

        let width = upper.geometry.width();
        let height = upper.geometry.height();
        let content = Content {
            operations: [
                draw_operations(TOP_XOBJECT, 0.0, 0.0),
                draw_operations(BOTTOM_XOBJECT, 0.0, -height / 2.0),
            ]
            .concat(),
        };
        let content_id = output.add_object(Stream::new(Dictionary::new(), content.encode()?));

        output.add_page(dictionary! {
            "MediaBox" => PageGeometry::sized(width, height).to_object(),
            "Resources" => dictionary! {
                "XObject" => dictionary! {
                    TOP_XOBJECT => upper.id,
                    BOTTOM_XOBJECT => lower.id,
                },
            },
            "Contents" => content_id,
        });

        log::debug!(
            "page {}: top {:?} over bottom {:?} ({width}x{height})",
            index + 1,
            top_id,
            bottom_id
        );
    }

    log::info!(
        "overlaid {} top page(s) with {} bottom page(s) into {} page(s)",
        top_pages.len(),
        bottom_pages.len(),
        page_count
    );

    Ok(Composed {
        document: output.finish(),
        input_pages: vec![top_pages.len(), bottom_pages.len()],
    })
}

/// `q 1 0 0 1 x y cm /name Do Q`
fn draw_operations(name: &str, x: f32, y: f32) -> Vec<Operation> {
    vec![
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![
                Object::Integer(1),
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(1),
                Object::Real(x),
                Object::Real(y),
            ],
        ),
        Operation::new("Do", vec![Object::Name(name.as_bytes().to_vec())]),
        Operation::new("Q", vec![]),
    ]
}

/// A source page wrapped as a form XObject in the output document.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedPage {
    /// Id of the form XObject.
    pub id: ObjectId,
    /// MediaBox of the source page.
    pub geometry: PageGeometry,
}

/// Embeds pages of one source document, each page at most once.
struct PageEmbedder<'a> {
    source: &'a Document,
    embedded: HashMap<ObjectId, EmbeddedPage>,
}

impl<'a> PageEmbedder<'a> {
    fn new(source: &'a Document) -> Self {
        Self {
            source,
            embedded: HashMap::new(),
        }
    }

    /// Wrap `page_id` as a form XObject whose user space starts at the
    /// MediaBox's lower-left corner.
    fn embed(&mut self, output: &mut OutputDocument, page_id: ObjectId) -> Result<EmbeddedPage> {
        if let Some(embedded) = self.embedded.get(&page_id) {
            return Ok(*embedded);
        }

        let geometry = pages::page_geometry(self.source, page_id);
        let content = pages::embeddable_content(self.source, page_id)?;

        let mut form = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "FormType" => Object::Integer(1),
            "BBox" => geometry.to_object(),
            "Matrix" => vec![
                Object::Integer(1),
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(1),
                Object::Real(-geometry.llx),
                Object::Real(-geometry.lly),
            ],
        };
        if let Some(resources) = pages::inherited_attribute(self.source, page_id, b"Resources") {
            output.copy_object_graph(self.source, &resources);
            form.set("Resources", resources);
        }
        for (key, value) in content.encoding.iter() {
            output.copy_object_graph(self.source, value);
            form.set(key.clone(), value.clone());
        }

        let embedded = EmbeddedPage {
            id: output.add_object(Stream::new(form, content.bytes)),
            geometry,
        };
        self.embedded.insert(page_id, embedded);

        Ok(embedded)
    }
}
