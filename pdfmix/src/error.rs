//! Error types for pdfmix.
//!
//! Every failure aborts the whole operation; nothing here is retried and no
//! partial output is ever produced.
//!
//! # Error Categories
//!
//! - **Input Errors**: empty input list, wrong number of inputs, empty documents
//! - **PDF Errors**: anything the PDF library reports, passed through unchanged
//! - **File Errors**: missing inputs, unwritable outputs
//! - **Configuration Errors**: invalid argument combinations

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfmix operations.
pub type Result<T> = std::result::Result<T, PdfMixError>;

/// Main error type for pdfmix operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfMixError {
    /// A full merge was requested with no input documents.
    #[error("No PDF documents to merge")]
    EmptyInput,

    /// The operation needs a fixed number of inputs.
    #[error("Expected exactly {expected} input PDF(s), got {actual}")]
    WrongInputCount {
        /// Number of inputs the operation requires.
        expected: usize,
        /// Number of inputs supplied.
        actual: usize,
    },

    /// A document has no pages to draw from.
    #[error("PDF document '{role}' has no pages")]
    EmptyDocument {
        /// Which input was empty ("top", "bottom", or a file name).
        role: String,
    },

    /// Error reported by the PDF library while parsing or serializing.
    #[error(transparent)]
    Pdf(#[from] lopdf::Error),

    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Input file could not be read into memory.
    #[error("Failed to read file: {}\n  Reason: {source}", path.display())]
    FailedToRead {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  Use --force to overwrite or choose a different output path",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create the output (or its staging file).
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write the output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The output document could not be assembled.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl PdfMixError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create an EmptyDocument error.
    pub fn empty_document(role: impl Into<String>) -> Self {
        Self::EmptyDocument { role: role.into() }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::EmptyInput => 1,
            Self::WrongInputCount { .. } => 1,
            Self::InvalidConfig { .. } => 1,
            Self::Other { .. } => 1,
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FailedToRead { .. } => 2,
            Self::Pdf(_) => 3,
            Self::EmptyDocument { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::Io(_) => 5,
            Self::MergeFailed { .. } => 6,
            Self::Cancelled => 130, // SIGINT convention
        }
    }
}
