//! File input and output.

pub mod reader;
pub mod writer;

pub use reader::{PdfReader, PdfSource, SourceInfo};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
