//! Output formatting and display for pdfmix.
//!
//! This module handles all user-facing output:
//! - Formatted status messages, quiet and verbose aware
//! - The plan printed by a dry run
//! - Merge summaries
//!
//! # Examples
//!
//! ```no_run
//! use pdfmix::output::OutputFormatter;
//! use pdfmix::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Starting merge");
//! formatter.success("Merge completed");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use std::path::Path;

use crate::config::MergeMode;
use crate::io::{SourceInfo, WriteStatistics};
use crate::merge::MergeStatistics;
use crate::merge::merger::format_file_size;

/// One line describing an input: `name (N pages, WxH pt, size)`.
pub fn describe_source(info: &SourceInfo) -> String {
    let name = info
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| info.path.display().to_string());
    let size = match info.first_page {
        Some(page) => format!(", {:.0}x{:.0} pt", page.width(), page.height()),
        None => String::new(),
    };

    format!(
        "{name} ({} page(s){size}, {})",
        info.page_count,
        format_file_size(info.file_size)
    )
}

/// Print what a merge would do without doing it.
pub fn display_merge_plan(
    formatter: &OutputFormatter,
    mode: MergeMode,
    sources: &[SourceInfo],
    output: &Path,
) {
    formatter.section(&format!("Dry run: {}", mode.describe()));

    let roles: &[&str] = match mode {
        MergeMode::HalfPage => &["top", "bottom"],
        MergeMode::Concatenate => &[],
    };
    for (idx, info) in sources.iter().enumerate() {
        let line = describe_source(info);
        match roles.get(idx) {
            Some(role) => formatter.list_item(idx + 1, &format!("{role}: {line}")),
            None => formatter.list_item(idx + 1, &line),
        }
        formatter.detail("PDF version", &info.version);
        formatter.detail("Objects", &info.object_count.to_string());
    }

    let input_pages: Vec<usize> = sources.iter().map(|info| info.page_count).collect();
    formatter.blank_line();
    formatter.info(&format!(
        "Would write {} page(s) to {}",
        mode.output_pages(&input_pages),
        output.display()
    ));
}

/// Print the summary of a finished merge.
pub fn display_statistics(
    formatter: &OutputFormatter,
    stats: &MergeStatistics,
    written: &WriteStatistics,
) {
    formatter.success(&format!(
        "Merged {} file(s) into {} page(s): {}",
        stats.files_merged,
        stats.total_pages,
        written.output_path.display()
    ));
    formatter.detail("Mode", stats.mode.describe());
    formatter.detail("Size", &written.format_file_size());
    formatter.detail(
        "Merge time",
        &format!("{:.2}s", stats.merge_time.as_secs_f64()),
    );
    formatter.detail(
        "Write time",
        &format!("{:.2}s", written.write_time.as_secs_f64()),
    );
}
