//! Page geometry and page tree lookups.
//!
//! Pages are addressed by index only. Attributes that the PDF page tree lets
//! a page inherit from its ancestors are resolved here, so that a page can
//! be moved into another document without losing its size or resources.

use lopdf::{Dictionary, Document, Object, ObjectId};
use serde::Serialize;

use crate::error::{PdfMixError, Result};

/// Page attributes a page may inherit from its ancestors.
pub const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// Guard against `Parent` cycles in malformed page trees.
const MAX_TREE_DEPTH: usize = 64;

/// US Letter, used when a page has no resolvable MediaBox.
const LETTER: PageGeometry = PageGeometry {
    llx: 0.0,
    lly: 0.0,
    urx: 612.0,
    ury: 792.0,
};

/// Rectangle of a page's MediaBox, in default user space units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    /// Lower-left x.
    pub llx: f32,
    /// Lower-left y.
    pub lly: f32,
    /// Upper-right x.
    pub urx: f32,
    /// Upper-right y.
    pub ury: f32,
}

impl PageGeometry {
    /// Geometry of a page with its origin at (0, 0).
    pub fn sized(width: f32, height: f32) -> Self {
        Self {
            llx: 0.0,
            lly: 0.0,
            urx: width,
            ury: height,
        }
    }

    /// Build from the four numbers of a PDF rectangle, normalizing corners.
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            llx: x1.min(x2),
            lly: y1.min(y2),
            urx: x1.max(x2),
            ury: y1.max(y2),
        }
    }

    /// Page width.
    pub fn width(&self) -> f32 {
        self.urx - self.llx
    }

    /// Page height.
    pub fn height(&self) -> f32 {
        self.ury - self.lly
    }

    /// PDF rectangle array for this geometry.
    pub fn to_object(&self) -> Object {
        Object::Array(vec![
            Object::Real(self.llx),
            Object::Real(self.lly),
            Object::Real(self.urx),
            Object::Real(self.ury),
        ])
    }
}

/// Page object ids in page order.
pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// Number of pages in a document.
pub fn page_count(doc: &Document) -> usize {
    doc.get_pages().len()
}

/// Look up `key` on a page, walking up the page tree when the page itself
/// does not carry it.
pub fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;

    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }

        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }

    None
}

/// Effective MediaBox of a page.
///
/// Falls back to US Letter when the page tree has no usable MediaBox.
pub fn page_geometry(doc: &Document, page_id: ObjectId) -> PageGeometry {
    inherited_attribute(doc, page_id, b"MediaBox")
        .and_then(|media_box| rectangle(doc, &media_box))
        .unwrap_or_else(|| {
            log::warn!("page {page_id:?} has no usable MediaBox, assuming US Letter");
            LETTER
        })
}

/// Clone a page dictionary with every inheritable attribute copied onto it
/// and its `Parent` link removed.
pub fn detached_page(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let mut page = doc.get_dictionary(page_id)?.clone();

    for key in INHERITABLE_ATTRIBUTES {
        if !page.has(key)
            && let Some(value) = inherited_attribute(doc, page_id, key)
        {
            page.set(key, value);
        }
    }

    page.remove(b"Parent");
    Ok(page)
}

/// Stream filter keys carried over with bytes that stay encoded.
const ENCODING_KEYS: [&[u8]; 2] = [b"Filter", b"DecodeParms"];

/// Page content ready to become the body of a new stream.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    /// Stream bytes.
    pub bytes: Vec<u8>,
    /// `Filter` and `DecodeParms` that still apply to `bytes`. Empty when
    /// the bytes are plain content.
    pub encoding: Dictionary,
}

/// Decoded content of a page, one stream after another.
///
/// # Errors
///
/// [`PdfMixError::MergeFailed`] when a stream uses a filter that cannot be
/// decoded.
pub fn page_content(doc: &Document, page_id: ObjectId) -> Result<Vec<u8>> {
    let mut content = Vec::new();

    for stream_id in doc.get_page_contents(page_id) {
        let stream = doc.get_object(stream_id)?.as_stream()?;
        let decoded = stream.get_plain_content().map_err(|err| {
            PdfMixError::merge_failed(format!(
                "content stream {stream_id:?} of page {page_id:?} cannot be decoded: {err}"
            ))
        })?;
        content.extend_from_slice(&decoded);
        content.push(b'\n');
    }

    Ok(content)
}

/// Content of a page for embedding in another stream.
///
/// A page with a single content stream in a filter that cannot be decoded
/// keeps its stored bytes together with the stream's `Filter` and
/// `DecodeParms`. Split content must decode, since encoded streams cannot
/// be joined.
pub fn embeddable_content(doc: &Document, page_id: ObjectId) -> Result<PageContent> {
    if let [stream_id] = doc.get_page_contents(page_id).as_slice() {
        let stream = doc.get_object(*stream_id)?.as_stream()?;
        if stream.get_plain_content().is_err() {
            log::debug!("keeping content stream {stream_id:?} of page {page_id:?} encoded");

            let mut encoding = Dictionary::new();
            for key in ENCODING_KEYS {
                if let Ok(value) = stream.dict.get(key) {
                    encoding.set(key, value.clone());
                }
            }
            return Ok(PageContent {
                bytes: stream.content.clone(),
                encoding,
            });
        }
    }

    Ok(PageContent {
        bytes: page_content(doc, page_id)?,
        encoding: Dictionary::new(),
    })
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        _ => object,
    }
}

fn rectangle(doc: &Document, object: &Object) -> Option<PageGeometry> {
    let values = resolve(doc, object).as_array().ok()?;
    if values.len() < 4 {
        return None;
    }

    let mut corners = [0.0_f32; 4];
    for (slot, value) in corners.iter_mut().zip(values) {
        *slot = resolve(doc, value).as_float().ok()?;
    }

    let [x1, y1, x2, y2] = corners;
    Some(PageGeometry::from_corners(x1, y1, x2, y2))
}
