//! Configuration module for pdfmix.
//!
//! This module holds the validated, normalized configuration that drives a
//! merge. It handles:
//! - Selection of the merge mode
//! - Validation of argument combinations
//! - Resolution of the output path (explicit or dated download name)

use chrono::NaiveDate;
use serde::Serialize;
use std::{path::PathBuf, str::FromStr};

use crate::download::download_filename;
use crate::error::{PdfMixError, Result};

/// Which merge operation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeMode {
    /// Append every page of every input, in input order.
    #[default]
    Concatenate,
    /// Overlay the top half of input A with the bottom half of input B.
    HalfPage,
}

impl MergeMode {
    /// Number of inputs the mode requires, if it is fixed.
    pub fn required_inputs(&self) -> Option<usize> {
        match self {
            Self::Concatenate => None,
            Self::HalfPage => Some(2),
        }
    }

    /// Page count of the output for inputs with the given page counts.
    pub fn output_pages(&self, input_pages: &[usize]) -> usize {
        match self {
            Self::Concatenate => input_pages.iter().sum(),
            Self::HalfPage => input_pages.iter().copied().max().unwrap_or(0),
        }
    }

    /// Short human-readable name.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Concatenate => "full merge",
            Self::HalfPage => "half-page merge",
        }
    }
}

/// Compression level for the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    /// Leave streams exactly as built.
    None,
    /// Compress content streams.
    #[default]
    Standard,
    /// Compress streams and drop unreferenced objects.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = PdfMixError;

    /// Parse compression level from "none", "standard" or "maximum".
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfMixError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Complete configuration for a merge operation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Merge operation to perform.
    pub mode: MergeMode,

    /// Input PDF file paths (in merge order; top then bottom for half pages).
    pub inputs: Vec<PathBuf>,

    /// Explicit output path. When absent the dated download name is used.
    pub output: Option<PathBuf>,

    /// Directory that receives the dated download name.
    pub output_dir: PathBuf,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compression level for output.
    pub compression: CompressionLevel,

    /// Dry run mode - validate without creating output.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Print a JSON report instead of the human summary.
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: MergeMode::default(),
            inputs: Vec::new(),
            output: None,
            output_dir: PathBuf::from("."),
            overwrite_mode: OverwriteMode::default(),
            compression: CompressionLevel::default(),
            dry_run: false,
            verbose: false,
            quiet: false,
            json: false,
        }
    }
}

impl Config {
    /// Returns a reference to inputs.
    pub fn inputs(&self) -> &[PathBuf] {
        self.inputs.as_ref()
    }

    /// Resolve the file the merged PDF is written to.
    ///
    /// An explicit `output` wins; otherwise the file is
    /// `output_dir/merged_YYYY_MM_DD.pdf` for the given date.
    pub fn output_path(&self, date: NaiveDate) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => self.output_dir.join(download_filename(date)),
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - The mode needs a fixed input count and it does not match
    /// - Verbose and quiet modes are both enabled
    /// - The output path is also an input
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(PdfMixError::EmptyInput);
        }

        if let Some(expected) = self.mode.required_inputs()
            && expected != self.inputs.len()
        {
            return Err(PdfMixError::WrongInputCount {
                expected,
                actual: self.inputs.len(),
            });
        }

        if self.verbose && self.quiet {
            return Err(PdfMixError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if let Some(ref output) = self.output
            && self.inputs.iter().any(|input| input == output)
        {
            return Err(PdfMixError::invalid_config(format!(
                "Output file cannot be the same as an input file: {}",
                output.display()
            )));
        }

        Ok(())
    }

    /// Check if human-readable output should be displayed.
    ///
    /// Returns false in quiet mode (unless doing a dry run) and in JSON mode.
    pub fn should_print(&self) -> bool {
        !self.json && (!self.quiet || self.dry_run)
    }
}
