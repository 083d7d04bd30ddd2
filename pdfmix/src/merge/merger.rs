//! Merge entry point shared by both modes.
//!
//! The [`Merger`] runs one of the merge procedures, applies the configured
//! compression, serializes the result and reports statistics.

use lopdf::Document;
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::config::{CompressionLevel, MergeMode};
use crate::error::{PdfMixError, Result};
use crate::merge::concat::concatenate;
use crate::merge::document::{Composed, serialize};
use crate::merge::half_page::overlay_halves;

/// Statistics about a merge operation.
#[derive(Debug, Clone, Serialize)]
pub struct MergeStatistics {
    /// Which operation ran.
    pub mode: MergeMode,

    /// Number of input documents.
    pub files_merged: usize,

    /// Page count of each input, in input order.
    pub input_pages: Vec<usize>,

    /// Number of pages in the output document.
    pub total_pages: usize,

    /// Size of the serialized output in bytes.
    pub output_size: u64,

    /// Time taken to merge and serialize.
    pub merge_time: Duration,

    /// Whether stream compression was applied.
    pub compressed: bool,
}

impl MergeStatistics {
    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }
}

/// Result of a merge operation.
#[derive(Debug)]
pub struct MergeResult {
    /// The serialized output PDF.
    pub bytes: Vec<u8>,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

/// Runs merges and serializes their output.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    compression: CompressionLevel,
}

impl Merger {
    /// Create a merger with standard compression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a merger with the given compression level.
    pub fn with_compression(compression: CompressionLevel) -> Self {
        Self { compression }
    }

    /// Run the merge selected by `mode` over `sources`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `sources` is empty ([`PdfMixError::EmptyInput`])
    /// - `mode` is [`MergeMode::HalfPage`] and there are not exactly two sources
    /// - any source fails to parse
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfmix::config::MergeMode;
    /// # use pdfmix::merge::Merger;
    /// # fn example(a: Vec<u8>, b: Vec<u8>) -> pdfmix::Result<()> {
    /// let result = Merger::new().merge(MergeMode::HalfPage, &[a, b])?;
    /// println!("{} pages", result.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge<S: AsRef<[u8]>>(&self, mode: MergeMode, sources: &[S]) -> Result<MergeResult> {
        match mode {
            MergeMode::Concatenate => self.concatenate(sources),
            MergeMode::HalfPage => match sources {
                [top, bottom] => self.half_pages(top.as_ref(), bottom.as_ref()),
                [] => Err(PdfMixError::EmptyInput),
                _ => Err(PdfMixError::WrongInputCount {
                    expected: 2,
                    actual: sources.len(),
                }),
            },
        }
    }

    /// Full merge of `sources`, in order.
    pub fn concatenate<S: AsRef<[u8]>>(&self, sources: &[S]) -> Result<MergeResult> {
        let start = Instant::now();
        let composed = concatenate(sources)?;
        self.finish(MergeMode::Concatenate, composed, start)
    }

    /// Half-page merge of `top` over `bottom`.
    pub fn half_pages(&self, top: &[u8], bottom: &[u8]) -> Result<MergeResult> {
        let start = Instant::now();
        let composed = overlay_halves(top, bottom)?;
        self.finish(MergeMode::HalfPage, composed, start)
    }

    fn finish(&self, mode: MergeMode, composed: Composed, start: Instant) -> Result<MergeResult> {
        let Composed {
            mut document,
            input_pages,
        } = composed;

        let total_pages = document.get_pages().len();
        let expected_pages = mode.output_pages(&input_pages);
        if total_pages != expected_pages {
            return Err(PdfMixError::merge_failed(format!(
                "output has {total_pages} page(s), expected {expected_pages}"
            )));
        }

        self.apply_compression(&mut document);
        let bytes = serialize(&mut document)?;

        let statistics = MergeStatistics {
            mode,
            files_merged: input_pages.len(),
            input_pages,
            total_pages,
            output_size: bytes.len() as u64,
            merge_time: start.elapsed(),
            compressed: self.compression != CompressionLevel::None,
        };

        log::debug!(
            "serialized {} page(s) into {}",
            statistics.total_pages,
            statistics.format_output_size()
        );

        Ok(MergeResult { bytes, statistics })
    }

    fn apply_compression(&self, document: &mut Document) {
        match self.compression {
            CompressionLevel::None => {}
            CompressionLevel::Standard => {
                document.compress();
            }
            CompressionLevel::Maximum => {
                let pruned = document.prune_objects();
                log::debug!("pruned {} unreferenced object(s)", pruned.len());
                document.compress();
            }
        }

        document.renumber_objects();
    }
}

/// Full merge of `sources` into one serialized PDF.
///
/// # Errors
///
/// [`PdfMixError::EmptyInput`] for an empty list; any parse error from an
/// input is returned unchanged.
pub fn merge_all<S: AsRef<[u8]>>(sources: &[S]) -> Result<Vec<u8>> {
    Ok(Merger::new().concatenate(sources)?.bytes)
}

/// Half-page merge of `top` over `bottom` into one serialized PDF.
pub fn merge_half_pages(top: &[u8], bottom: &[u8]) -> Result<Vec<u8>> {
    Ok(Merger::new().half_pages(top, bottom)?.bytes)
}

/// Format file size as human-readable string.
pub(crate) fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
