//! Delivery of a finished PDF to the user.
//!
//! A download wraps the bytes in a [`PdfBlob`], registers it with the host
//! to obtain an [`ObjectUrl`], asks the host to save that URL under a dated
//! file name, and finally revokes the URL. Revocation happens exactly once
//! per download, whether the save succeeded, failed or panicked.

use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// MIME type of every blob handed to the host.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// File name of a download made on `date`: `merged_YYYY_MM_DD.pdf`.
pub fn download_filename(date: NaiveDate) -> String {
    format!("merged_{}.pdf", date.format("%Y_%m_%d"))
}

/// Current date in UTC, the date used for download names.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// PDF bytes tagged with their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfBlob {
    bytes: Vec<u8>,
}

impl PdfBlob {
    /// Wrap serialized PDF bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Always [`PDF_MIME_TYPE`].
    pub fn mime_type(&self) -> &'static str {
        PDF_MIME_TYPE
    }

    /// The wrapped bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the blob is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Handle to a blob staged by a [`SaveHost`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(PathBuf);

impl ObjectUrl {
    /// Create a handle for a staged location.
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self(location.into())
    }

    /// Where the blob is staged.
    pub fn location(&self) -> &Path {
        &self.0
    }
}

/// Environment that can stage a blob and save it under a file name.
pub trait SaveHost {
    /// Stage `blob` and return a handle to it.
    fn create_object_url(&self, blob: &PdfBlob) -> Result<ObjectUrl>;

    /// Save the staged blob as `filename`.
    fn save(&self, url: &ObjectUrl, filename: &str) -> Result<()>;

    /// Release the staged blob. Must not fail; problems are only logged.
    fn revoke_object_url(&self, url: &ObjectUrl);
}

/// Revokes its URL when dropped.
struct ObjectUrlGuard<'a, H: SaveHost + ?Sized> {
    host: &'a H,
    url: ObjectUrl,
}

impl<H: SaveHost + ?Sized> Drop for ObjectUrlGuard<'_, H> {
    fn drop(&mut self) {
        self.host.revoke_object_url(&self.url);
    }
}

/// Save `data` through `host` as `merged_YYYY_MM_DD.pdf` for today (UTC).
pub fn download_pdf<H: SaveHost + ?Sized>(host: &H, data: Vec<u8>) -> Result<()> {
    download_pdf_as(host, data, &download_filename(today()))
}

/// Save `data` through `host` under an explicit file name.
pub fn download_pdf_as<H: SaveHost + ?Sized>(host: &H, data: Vec<u8>, filename: &str) -> Result<()> {
    let blob = PdfBlob::new(data);
    let guard = ObjectUrlGuard {
        host,
        url: host.create_object_url(&blob)?,
    };

    log::debug!(
        "saving {} byte(s) of {} as {filename}",
        blob.len(),
        blob.mime_type()
    );
    host.save(&guard.url, filename)
}
