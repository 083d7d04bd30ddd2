//! Reading input PDFs into memory.
//!
//! Inputs are read one after another, in the order given. [`PdfReader`]
//! rejects files that do not parse, but a merge only ever sees raw bytes;
//! [`PdfSource::inspect`] summarizes a source on demand.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmix::io::reader::PdfReader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> pdfmix::Result<()> {
//! let reader = PdfReader::new();
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let sources = reader.read_all(&paths).await?;
//! let merged = pdfmix::merge_all(&sources)?;
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{PdfMixError, Result};
use crate::merge::pages::{self, PageGeometry};

/// An input PDF read into memory.
#[derive(Debug, Clone)]
pub struct PdfSource {
    /// Where the bytes came from.
    pub path: PathBuf,

    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl PdfSource {
    /// Wrap bytes read from `path`.
    pub fn new(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }

    /// File name used in messages, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Parse the bytes and summarize the document.
    pub fn inspect(&self) -> Result<SourceInfo> {
        let doc = Document::load_mem(&self.bytes)?;
        Ok(SourceInfo::from_document(&self.path, &doc, self.bytes.len() as u64))
    }
}

impl AsRef<[u8]> for PdfSource {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Summary of a parsed input, shown by dry runs.
#[derive(Debug, Clone, Serialize)]
pub struct SourceInfo {
    /// Input path.
    pub path: PathBuf,
    /// Number of pages.
    pub page_count: usize,
    /// PDF version from the header.
    pub version: String,
    /// MediaBox of the first page, if there is one.
    pub first_page: Option<PageGeometry>,
    /// Number of indirect objects.
    pub object_count: usize,
    /// Size in bytes.
    pub file_size: u64,
}

impl SourceInfo {
    fn from_document(path: &Path, doc: &Document, file_size: u64) -> Self {
        let page_ids = pages::page_ids(doc);
        Self {
            path: path.to_path_buf(),
            page_count: page_ids.len(),
            version: doc.version.clone(),
            first_page: page_ids.first().map(|&id| pages::page_geometry(doc, id)),
            object_count: doc.objects.len(),
            file_size,
        }
    }
}

/// Reads input files and checks that each one parses as a PDF.
///
/// A PDF without pages is accepted here. Whether that is an error depends
/// on the merge mode, so the merge decides.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a reader.
    pub fn new() -> Self {
        Self
    }

    /// Read a single input.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path does not exist ([`PdfMixError::FileNotFound`])
    /// - The path is not a regular file ([`PdfMixError::NotAFile`])
    /// - The file cannot be read ([`PdfMixError::FailedToRead`])
    /// - The file does not parse as a PDF ([`PdfMixError::Pdf`])
    pub async fn read(&self, path: &Path) -> Result<PdfSource> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|_| PdfMixError::file_not_found(path.to_path_buf()))?;
        if !metadata.is_file() {
            return Err(PdfMixError::not_a_file(path.to_path_buf()));
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| PdfMixError::FailedToRead {
                path: path.to_path_buf(),
                source,
            })?;
        let source = PdfSource::new(path, bytes);

        let info = source.inspect()?;
        log::debug!(
            "read {} ({} page(s), PDF {})",
            path.display(),
            info.page_count,
            info.version
        );

        Ok(source)
    }

    /// Read every input in order, stopping at the first failure.
    pub async fn read_all(&self, paths: &[PathBuf]) -> Result<Vec<PdfSource>> {
        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            sources.push(self.read(path).await?);
        }
        Ok(sources)
    }
}
