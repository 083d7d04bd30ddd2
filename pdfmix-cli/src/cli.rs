//! CLI argument parsing for pdfmix.
//!
//! Two subcommands, one per merge mode, sharing the same output options.
//!
//! # Examples
//!
//! ```text
//! pdfmix merge chapter*.pdf -o book.pdf
//! pdfmix halves front.pdf back.pdf --output-dir out/
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use pdfmix::config::{CompressionLevel, Config, MergeMode, OverwriteMode};
use pdfmix::error::{PdfMixError, Result};
use pdfmix::utils::collect_paths_for_patterns;

/// Merge PDF files, whole or by halves.
///
/// The merged document is saved as merged_YYYY_MM_DD.pdf (today's date,
/// UTC) in the output directory unless --output names a file.
#[derive(Parser, Debug)]
#[command(name = "pdfmix")]
#[command(version)]
#[command(about = "Merge PDF files, whole or by halves", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Merge operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Merge operations.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Append every page of every input, in the order given
    ///
    /// Examples:
    ///   pdfmix merge a.pdf b.pdf c.pdf
    ///   pdfmix merge 'scans/*.pdf' -o scans.pdf
    Merge {
        /// Input PDF files or glob patterns, merged in order
        #[arg(required = true, value_name = "FILE")]
        inputs: Vec<String>,

        #[command(flatten)]
        options: OutputArgs,
    },

    /// Put the top half of each TOP page over the bottom half of each BOTTOM page
    ///
    /// Output pages take the size of the TOP page. When one document is
    /// shorter, its first page is reused for the remaining pages.
    Halves {
        /// Document supplying the upper half of every page
        #[arg(value_name = "TOP")]
        top: PathBuf,

        /// Document supplying the lower half of every page
        #[arg(value_name = "BOTTOM")]
        bottom: PathBuf,

        #[command(flatten)]
        options: OutputArgs,
    },
}

/// Options shared by every merge operation.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output PDF file path (replaces the dated file name)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Directory the dated output file is saved in
    #[arg(
        short = 'd',
        long,
        value_name = "DIR",
        default_value = ".",
        env = "PDFMIX_OUTPUT_DIR"
    )]
    pub output_dir: PathBuf,

    /// Dry run - validate inputs and show the merge plan without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output - show details about every input and the result
    #[arg(short, long)]
    pub verbose: bool,

    /// Force overwrite of an existing output file without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite an existing output file
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Compression level for output PDF
    ///
    /// - none: streams are written as built
    /// - standard: compress content streams (default)
    /// - maximum: also drop unreferenced objects
    #[arg(short, long, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Print a machine-readable JSON report instead of messages
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Options of whichever subcommand was given.
    pub fn options(&self) -> &OutputArgs {
        match &self.command {
            Command::Merge { options, .. } | Command::Halves { options, .. } => options,
        }
    }

    /// Merge mode selected by the subcommand.
    pub fn mode(&self) -> MergeMode {
        match self.command {
            Command::Merge { .. } => MergeMode::Concatenate,
            Command::Halves { .. } => MergeMode::HalfPage,
        }
    }

    /// Convert CLI arguments into a validated Config.
    ///
    /// Glob patterns given to `merge` are expanded here, in argument order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A glob pattern is malformed
    /// - Compression level is invalid
    /// - Configuration validation fails
    pub fn to_config(&self) -> Result<Config> {
        let options = self.options();
        let compression = CompressionLevel::from_str(&options.compression)?;

        let overwrite_mode = if options.force {
            OverwriteMode::Force
        } else if options.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let inputs = match &self.command {
            Command::Merge { inputs, .. } => collect_paths_for_patterns(inputs)?,
            Command::Halves { top, bottom, .. } => vec![top.clone(), bottom.clone()],
        };

        let config = Config {
            mode: self.mode(),
            inputs,
            output: options.output.clone(),
            output_dir: options.output_dir.clone(),
            overwrite_mode,
            compression,
            dry_run: options.dry_run,
            verbose: options.verbose,
            quiet: options.quiet,
            json: options.json,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate CLI arguments before touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty input list, an empty output directory
    /// or an unknown compression level.
    pub fn validate(&self) -> Result<()> {
        let options = self.options();

        if let Command::Merge { inputs, .. } = &self.command
            && inputs.is_empty()
        {
            return Err(PdfMixError::EmptyInput);
        }

        if options.output_dir.as_os_str().is_empty() {
            return Err(PdfMixError::invalid_config("Output directory cannot be empty"));
        }

        if !["none", "standard", "maximum"].contains(&options.compression.as_str()) {
            return Err(PdfMixError::invalid_config(format!(
                "Invalid compression level: {}",
                options.compression
            )));
        }

        Ok(())
    }
}
