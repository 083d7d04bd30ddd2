//! Integration tests for delivering the merged PDF.

use pdfmix::download::{ObjectUrl, PdfBlob, SaveHost, download_filename, download_pdf, today};
use pdfmix::error::{PdfMixError, Result};
use pdfmix::io::PdfWriter;
use pdfmix::merge_all;
use regex::Regex;
use std::sync::Mutex;
use tempfile::TempDir;

use crate::common::{labelled_pdf, load, page_labels};

/// Records every call made by a download, optionally failing the save.
#[derive(Default)]
struct AuditHost {
    fail_save: bool,
    calls: Mutex<Vec<String>>,
}

impl AuditHost {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl SaveHost for AuditHost {
    fn create_object_url(&self, blob: &PdfBlob) -> Result<ObjectUrl> {
        self.record(format!("create {} {}", blob.mime_type(), blob.len()));
        Ok(ObjectUrl::new("blob:audit"))
    }

    fn save(&self, _url: &ObjectUrl, filename: &str) -> Result<()> {
        self.record(format!("save {filename}"));
        if self.fail_save {
            return Err(PdfMixError::other("save rejected"));
        }
        Ok(())
    }

    fn revoke_object_url(&self, url: &ObjectUrl) {
        self.record(format!("revoke {}", url.location().display()));
    }
}

#[test]
fn test_download_sequence() {
    let host = AuditHost::default();
    download_pdf(&host, vec![0; 42]).unwrap();

    assert_eq!(
        host.calls(),
        vec![
            "create application/pdf 42".to_string(),
            format!("save {}", download_filename(today())),
            "revoke blob:audit".to_string(),
        ]
    );
}

#[test]
fn test_download_revokes_after_failed_save() {
    let host = AuditHost {
        fail_save: true,
        ..Default::default()
    };

    assert!(download_pdf(&host, vec![1]).is_err());

    let calls = host.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls.last().unwrap(), "revoke blob:audit");
    assert_eq!(calls.iter().filter(|c| c.starts_with("revoke")).count(), 1);
}

#[test]
fn test_download_filename_shape() {
    let pattern = Regex::new(r"^merged_\d{4}_\d{2}_\d{2}\.pdf$").unwrap();
    assert!(pattern.is_match(&download_filename(today())));
}

#[tokio::test]
async fn test_merge_and_download_to_directory() {
    let dir = TempDir::new().unwrap();
    let merged = merge_all(&[labelled_pdf("a", 1), labelled_pdf("b", 1)]).unwrap();

    let filename = download_filename(today());
    let stats = PdfWriter::new(dir.path())
        .download(merged, &filename)
        .await
        .unwrap();

    assert_eq!(stats.output_path, dir.path().join(&filename));
    let saved = std::fs::read(&stats.output_path).unwrap();
    assert_eq!(stats.file_size, saved.len() as u64);
    assert_eq!(page_labels(&load(&saved)), vec!["a1", "b1"]);

    let entries = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1, "staging file left behind");
}

#[tokio::test]
async fn test_download_overwrites_existing_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("out.pdf"), b"old").unwrap();

    PdfWriter::new(dir.path())
        .download(b"%PDF-new".to_vec(), "out.pdf")
        .await
        .unwrap();

    assert_eq!(std::fs::read(dir.path().join("out.pdf")).unwrap(), b"%PDF-new");
}
