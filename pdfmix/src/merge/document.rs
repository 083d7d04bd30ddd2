//! Construction of the output document.
//!
//! Both merge operations build a brand new document: a catalog and one flat
//! page tree, with pages and the objects they reference copied in from the
//! sources.

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

use crate::error::Result;
use crate::merge::pages;
use crate::utils::copy_references;

/// PDF version written to every output document.
pub const OUTPUT_VERSION: &str = "1.7";

/// A merged document plus the page count of each input that fed it.
#[derive(Debug)]
pub struct Composed {
    /// The finished output document.
    pub document: Document,

    /// Page count of every input, in input order.
    pub input_pages: Vec<usize>,
}

/// Output document under construction.
pub struct OutputDocument {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<ObjectId>,
}

impl OutputDocument {
    /// Create an empty output document.
    pub fn new() -> Self {
        let mut doc = Document::with_version(OUTPUT_VERSION);
        let pages_id = doc.new_object_id();

        Self {
            doc,
            pages_id,
            kids: Vec::new(),
        }
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Move every object id of `source` above the ids used here, so objects
    /// can be copied across without collisions.
    pub fn adopt_id_space(&mut self, source: &mut Document) {
        source.renumber_objects_with(self.doc.max_id + 1);
        self.doc.max_id = self.doc.max_id.max(source.max_id);
    }

    /// Copy everything reachable from `root` out of `source`.
    ///
    /// `source` must have been passed through [`adopt_id_space`](Self::adopt_id_space).
    pub fn copy_object_graph(&mut self, source: &Document, root: &Object) {
        copy_references(&mut self.doc, source, root);
    }

    /// Add a free-standing object and return its id.
    pub fn add_object<T: Into<Object>>(&mut self, object: T) -> ObjectId {
        self.doc.add_object(object)
    }

    /// Copy page `page_id` of `source` to the end of this document.
    ///
    /// The page keeps its content, resources and dimensions, including any
    /// attribute it inherited from the source page tree.
    pub fn import_page(&mut self, source: &Document, page_id: ObjectId) -> Result<ObjectId> {
        let page = pages::detached_page(source, page_id)?;

        // Reserve the id first: annotations pointing back at the page must
        // not pull the source page (and its tree) in a second time.
        self.doc.objects.insert(page_id, Object::Null);
        self.copy_object_graph(source, &Object::Dictionary(page.clone()));

        self.attach_page(page_id, page);
        Ok(page_id)
    }

    /// Append a newly built page dictionary and return its id.
    pub fn add_page(&mut self, page: Dictionary) -> ObjectId {
        let page_id = self.doc.new_object_id();
        self.attach_page(page_id, page);
        page_id
    }

    fn attach_page(&mut self, page_id: ObjectId, mut page: Dictionary) {
        page.set("Type", "Page");
        page.set("Parent", self.pages_id);
        self.doc.objects.insert(page_id, Object::Dictionary(page));
        self.kids.push(page_id);
    }

    /// Write the page tree and catalog and hand back the document.
    pub fn finish(mut self) -> Document {
        let count = self.kids.len() as i64;
        let kids: Vec<Object> = self.kids.into_iter().map(Object::Reference).collect();

        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => Object::Integer(count),
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        self.doc
    }
}

impl Default for OutputDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a document into an in-memory PDF buffer.
pub fn serialize(doc: &mut Document) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}
