//! Full merge: every page of every input, in input order.

use lopdf::Document;

use crate::error::{PdfMixError, Result};
use crate::merge::document::{Composed, OutputDocument};
use crate::merge::pages;

/// Concatenate the pages of all `sources` into a new document.
///
/// # Errors
///
/// - [`PdfMixError::EmptyInput`] when `sources` is empty.
/// - [`PdfMixError::Pdf`] when any input fails to parse. Nothing is
///   returned in that case, not even the pages gathered so far.
pub fn concatenate<S: AsRef<[u8]>>(sources: &[S]) -> Result<Composed> {
    if sources.is_empty() {
        return Err(PdfMixError::EmptyInput);
    }

    let mut output = OutputDocument::new();
    let mut input_pages = Vec::with_capacity(sources.len());

    for (idx, source) in sources.iter().enumerate() {
        let mut doc = Document::load_mem(source.as_ref())?;
        let appended = append_document(&mut output, &mut doc)?;

        log::debug!(
            "[{}/{}] appended {} page(s)",
            idx + 1,
            sources.len(),
            appended
        );
        input_pages.push(appended);
    }

    log::info!(
        "concatenated {} document(s) into {} page(s)",
        sources.len(),
        output.page_count()
    );

    Ok(Composed {
        document: output.finish(),
        input_pages,
    })
}

/// Append every page of `doc` to `output`, returning how many were added.
pub fn append_document(output: &mut OutputDocument, doc: &mut Document) -> Result<usize> {
    output.adopt_id_space(doc);

    let page_ids = pages::page_ids(doc);
    for &page_id in &page_ids {
        output.import_page(doc, page_id)?;
    }

    Ok(page_ids.len())
}
