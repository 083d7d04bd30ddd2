//! Integration tests for error handling and edge cases.

use pdfmix::config::MergeMode;
use pdfmix::error::PdfMixError;
use pdfmix::io::PdfReader;
use pdfmix::merge::Merger;
use pdfmix::{merge_all, merge_half_pages};
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{labelled_pdf, write_fixture};

#[test]
fn test_error_empty_input_list() {
    let sources: Vec<Vec<u8>> = Vec::new();
    let err = merge_all(&sources).unwrap_err();

    assert!(matches!(err, PdfMixError::EmptyInput));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_error_malformed_pdf_aborts_merge() {
    let err = merge_all(&[labelled_pdf("a", 1), b"not a pdf at all".to_vec()]).unwrap_err();

    assert!(matches!(err, PdfMixError::Pdf(_)));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_error_half_page_with_malformed_bottom() {
    let err = merge_half_pages(&labelled_pdf("t", 1), b"garbage").unwrap_err();
    assert!(matches!(err, PdfMixError::Pdf(_)));
}

#[test]
fn test_error_half_page_with_empty_document() {
    let err = merge_half_pages(&labelled_pdf("none", 0), &labelled_pdf("b", 2)).unwrap_err();
    assert!(matches!(err, PdfMixError::EmptyDocument { role } if role == "top"));
}

#[test]
fn test_error_half_page_wrong_input_count() {
    let sources = vec![labelled_pdf("a", 1)];
    let err = Merger::new()
        .merge(MergeMode::HalfPage, &sources)
        .unwrap_err();

    assert!(matches!(
        err,
        PdfMixError::WrongInputCount {
            expected: 2,
            actual: 1
        }
    ));
}

#[tokio::test]
async fn test_error_nonexistent_input() {
    let err = PdfReader::new()
        .read_all(&[PathBuf::from("/nonexistent/file.pdf")])
        .await
        .unwrap_err();

    assert!(matches!(err, PdfMixError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_error_input_is_directory() {
    let dir = TempDir::new().unwrap();
    let err = PdfReader::new().read(dir.path()).await.unwrap_err();
    assert!(matches!(err, PdfMixError::NotAFile { .. }));
}

#[tokio::test]
async fn test_error_invalid_pdf_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "fake.pdf", b"This is not a PDF file");

    let err = PdfReader::new().read(&path).await.unwrap_err();
    assert!(matches!(err, PdfMixError::Pdf(_)));
}
