//! Integration tests for the half-page merge.

use lopdf::content::Content;
use pdfmix::merge::half_page::{BOTTOM_XOBJECT, TOP_XOBJECT};
use pdfmix::merge::pages::{self, PageGeometry};
use pdfmix::merge_half_pages;
use rstest::rstest;

use crate::common::{form_label, labelled_pdf, load, page_sizes, pdf_with_pages, xobject};

/// `(top label, bottom label)` drawn on every output page.
fn drawn_labels(bytes: &[u8]) -> Vec<(String, String)> {
    let doc = load(bytes);
    pages::page_ids(&doc)
        .into_iter()
        .map(|id| {
            (
                form_label(&doc, xobject(&doc, id, TOP_XOBJECT)),
                form_label(&doc, xobject(&doc, id, BOTTOM_XOBJECT)),
            )
        })
        .collect()
}

fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(top, bottom)| (top.to_string(), bottom.to_string()))
        .collect()
}

#[rstest]
#[case(2, 2, 2)]
#[case(3, 1, 3)]
#[case(1, 3, 3)]
fn test_page_count_is_larger_input(
    #[case] top: usize,
    #[case] bottom: usize,
    #[case] expected: usize,
) {
    let merged = merge_half_pages(&labelled_pdf("t", top), &labelled_pdf("b", bottom)).unwrap();
    assert_eq!(pages::page_count(&load(&merged)), expected);
}

#[test]
fn test_short_bottom_falls_back_to_first_page() {
    let merged = merge_half_pages(&labelled_pdf("t", 3), &labelled_pdf("b", 1)).unwrap();

    assert_eq!(
        drawn_labels(&merged),
        pairs(&[("t1", "b1"), ("t2", "b1"), ("t3", "b1")])
    );
}

#[test]
fn test_short_top_falls_back_to_first_page() {
    let merged = merge_half_pages(&labelled_pdf("t", 1), &labelled_pdf("b", 2)).unwrap();

    assert_eq!(drawn_labels(&merged), pairs(&[("t1", "b1"), ("t1", "b2")]));
}

#[test]
fn test_pages_take_top_size() {
    let top = pdf_with_pages(&[(400.0, 500.0, "small"), (800.0, 1000.0, "large")]);
    let bottom = labelled_pdf("b", 3);
    let doc = load(&merge_half_pages(&top, &bottom).unwrap());

    // The third page falls back to the first top page and takes its size.
    assert_eq!(
        page_sizes(&doc),
        vec![
            PageGeometry::sized(400.0, 500.0),
            PageGeometry::sized(800.0, 1000.0),
            PageGeometry::sized(400.0, 500.0),
        ]
    );
}

#[test]
fn test_bottom_drawn_half_a_page_lower() {
    let top = pdf_with_pages(&[(612.0, 1000.0, "t")]);
    let doc = load(&merge_half_pages(&top, &labelled_pdf("b", 1)).unwrap());
    let page_id = pages::page_ids(&doc)[0];

    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
    let offsets: Vec<(f32, f32)> = content
        .operations
        .iter()
        .filter(|op| op.operator == "cm")
        .map(|op| {
            (
                op.operands[4].as_float().unwrap(),
                op.operands[5].as_float().unwrap(),
            )
        })
        .collect();

    assert_eq!(offsets, vec![(0.0, 0.0), (0.0, -500.0)]);
}

#[test]
fn test_same_document_as_both_halves() {
    let source = labelled_pdf("s", 2);
    let merged = merge_half_pages(&source, &source).unwrap();

    assert_eq!(drawn_labels(&merged), pairs(&[("s1", "s1"), ("s2", "s2")]));
}
