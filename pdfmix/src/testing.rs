//! In-memory PDF fixtures for unit tests.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};

/// Build a PDF whose pages have the given `(width, height, label)`.
///
/// Each page draws its label in Helvetica so content can be traced through
/// a merge.
pub fn sample_pdf(pages: &[(f32, f32, &str)]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for &(width, height, label) in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), Object::Integer(24)]),
                Operation::new("Td", vec![Object::Integer(20), Object::Integer(20)]),
                Operation::new("Tj", vec![Object::string_literal(label)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            content.encode().expect("encode fixture content"),
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
            "Resources" => resources_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(count),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize fixture");
    bytes
}

/// A PDF with `count` US Letter pages labelled `{prefix}{n}`, starting at 1.
pub fn letter_pdf(prefix: &str, count: usize) -> Vec<u8> {
    let labels: Vec<String> = (1..=count).map(|n| format!("{prefix}{n}")).collect();
    let pages: Vec<(f32, f32, &str)> = labels
        .iter()
        .map(|label| (612.0, 792.0, label.as_str()))
        .collect();
    sample_pdf(&pages)
}

/// A stream holding `content` hex-encoded under `/ASCIIHexDecode`.
pub fn hex_stream(content: &[u8]) -> Stream {
    let mut encoded: Vec<u8> = content
        .iter()
        .flat_map(|byte| format!("{byte:02X}").into_bytes())
        .collect();
    encoded.push(b'>');
    Stream::new(dictionary! { "Filter" => "ASCIIHexDecode" }, encoded)
}

/// A plain content stream.
pub fn plain_stream(content: &[u8]) -> Stream {
    Stream::new(Dictionary::new(), content.to_vec())
}

/// A one-page PDF with the given MediaBox whose content is split over
/// `streams`, in order.
pub fn pdf_with_streams(media_box: [f32; 4], streams: Vec<Stream>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let contents: Vec<Object> = streams
        .into_iter()
        .map(|stream| Object::Reference(doc.add_object(stream)))
        .collect();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => media_box.iter().map(|&v| Object::Real(v)).collect::<Vec<_>>(),
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        },
        "Contents" => contents,
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => Object::Integer(1),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize fixture");
    bytes
}
