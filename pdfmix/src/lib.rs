//! pdfmix - Merge PDF files, whole or by halves.
//!
//! This library combines PDF documents in two ways:
//!
//! - **Full merge**: every page of every input, in input order
//! - **Half-page merge**: each output page shows the top half of a page of
//!   one document over the bottom half of a page of another
//!
//! and delivers the result as a dated `merged_YYYY_MM_DD.pdf` download.
//!
//! # Examples
//!
//! ## Merging in memory
//!
//! ```no_run
//! # fn example(a: Vec<u8>, b: Vec<u8>) -> pdfmix::Result<()> {
//! let merged = pdfmix::merge_all(&[&a, &b])?;
//! let halves = pdfmix::merge_half_pages(&a, &b)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Reading, merging and saving files
//!
//! ```no_run
//! use pdfmix::config::MergeMode;
//! use pdfmix::download::{download_filename, today};
//! use pdfmix::io::{PdfReader, PdfWriter};
//! use pdfmix::merge::Merger;
//! use std::path::PathBuf;
//!
//! # async fn example() -> pdfmix::Result<()> {
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let sources = PdfReader::new().read_all(&paths).await?;
//!
//! let result = Merger::new().merge(MergeMode::Concatenate, &sources)?;
//! let written = PdfWriter::new(".")
//!     .download(result.bytes, &download_filename(today()))
//!     .await?;
//! println!("Wrote {}", written.output_path.display());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod download;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod utils;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::Config;
pub use download::{SaveHost, download_pdf};
pub use error::{PdfMixError, Result};
pub use merge::{merge_all, merge_half_pages};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
