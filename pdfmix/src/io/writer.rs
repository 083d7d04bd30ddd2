//! Writing the merged PDF to disk.
//!
//! [`PdfWriter`] is the filesystem [`SaveHost`]: the bytes are first staged
//! in a hidden file inside the output directory, then moved onto the final
//! name. A staged file that was never moved is removed when its object URL
//! is revoked, so a failed save leaves nothing behind.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmix::io::writer::PdfWriter;
//!
//! # async fn example(merged: Vec<u8>) -> pdfmix::Result<()> {
//! let writer = PdfWriter::new(".");
//! let stats = writer.download(merged, "merged_2024_01_05.pdf").await?;
//! println!("Wrote {} to {}", stats.format_file_size(), stats.output_path.display());
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tokio::task;

use crate::download::{ObjectUrl, PdfBlob, SaveHost, download_pdf_as};
use crate::error::{PdfMixError, Result};
use crate::merge::merger::format_file_size;

static STAGED: AtomicUsize = AtomicUsize::new(0);

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { buffer_size: 8192 }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Saves PDFs into one output directory.
#[derive(Debug, Clone)]
pub struct PdfWriter {
    dir: PathBuf,
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a writer for `dir` with default options.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_options(dir, WriteOptions::default())
    }

    /// Create a writer with custom options.
    pub fn with_options(dir: impl Into<PathBuf>, options: WriteOptions) -> Self {
        Self {
            dir: dir.into(),
            options,
        }
    }

    /// Create a writer for the directory holding `path`, returning it with
    /// the file name to save under.
    ///
    /// # Errors
    ///
    /// [`PdfMixError::InvalidConfig`] if `path` has no file name.
    pub fn for_output(path: &Path) -> Result<(Self, String)> {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                PdfMixError::invalid_config(format!(
                    "Output path has no file name: {}",
                    path.display()
                ))
            })?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok((Self::new(dir), filename))
    }

    /// Directory files are saved into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save `bytes` as `filename` in the output directory.
    ///
    /// Runs the whole download, staging through revocation, on the blocking
    /// pool.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The staging file cannot be created or written
    /// - The staged file cannot be moved onto `filename`
    pub async fn download(&self, bytes: Vec<u8>, filename: &str) -> Result<WriteStatistics> {
        let writer = self.clone();
        let filename = filename.to_string();

        task::spawn_blocking(move || {
            let start = Instant::now();
            let file_size = bytes.len() as u64;
            download_pdf_as(&writer, bytes, &filename)?;

            Ok::<_, PdfMixError>(WriteStatistics {
                write_time: start.elapsed(),
                file_size,
                output_path: writer.dir.join(&filename),
            })
        })
        .await
        .map_err(|e| PdfMixError::other(format!("Write task failed: {e}")))?
    }

    /// Check the output directory exists and is writable.
    pub async fn can_write(&self) -> Result<()> {
        let metadata = tokio::fs::metadata(&self.dir).await.map_err(|_| {
            PdfMixError::invalid_config(format!(
                "Output directory does not exist: {}",
                self.dir.display()
            ))
        })?;

        if !metadata.is_dir() {
            return Err(PdfMixError::invalid_config(format!(
                "Output path is not a directory: {}",
                self.dir.display()
            )));
        }
        if metadata.permissions().readonly() {
            return Err(PdfMixError::invalid_config(format!(
                "Output directory is not writable: {}",
                self.dir.display()
            )));
        }

        Ok(())
    }

    /// Whether `filename` already exists in the output directory.
    pub async fn exists(&self, filename: &str) -> bool {
        tokio::fs::metadata(self.dir.join(filename)).await.is_ok()
    }

    fn staging_path(&self) -> PathBuf {
        let n = STAGED.fetch_add(1, Ordering::Relaxed);
        self.dir
            .join(format!(".pdfmix-{}-{n}.tmp", std::process::id()))
    }
}

impl SaveHost for PdfWriter {
    fn create_object_url(&self, blob: &PdfBlob) -> Result<ObjectUrl> {
        let path = self.staging_path();
        let file = File::create(&path).map_err(|source| PdfMixError::FailedToCreateOutput {
            path: path.clone(),
            source,
        })?;
        // The URL exists from here on, so a failed write must not leak the file.
        let url = ObjectUrl::new(&path);

        let mut writer = BufWriter::with_capacity(self.options.buffer_size, file);
        let written = writer
            .write_all(blob.as_bytes())
            .and_then(|()| writer.flush());
        if let Err(source) = written {
            drop(writer);
            self.revoke_object_url(&url);
            return Err(PdfMixError::FailedToWrite { path, source });
        }

        log::debug!("staged {} byte(s) at {}", blob.len(), path.display());
        Ok(url)
    }

    fn save(&self, url: &ObjectUrl, filename: &str) -> Result<()> {
        // The stage lives in the target directory, so this is a rename on
        // one filesystem.
        let target = self.dir.join(filename);
        std::fs::rename(url.location(), &target).map_err(|source| PdfMixError::FailedToWrite {
            path: target.clone(),
            source,
        })?;

        log::info!("saved {}", target.display());
        Ok(())
    }

    fn revoke_object_url(&self, url: &ObjectUrl) {
        match std::fs::remove_file(url.location()) {
            Ok(()) => log::debug!("removed staging file {}", url.location().display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!(
                "could not remove staging file {}: {e}",
                url.location().display()
            ),
        }
    }
}
