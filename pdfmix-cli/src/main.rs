//! pdfmix - Merge PDF files, whole or by halves.

mod cli;

use clap::Parser;
use std::path::Path;
use std::process;

use crate::cli::Cli;
use pdfmix::config::{Config, OverwriteMode};
use pdfmix::download::today;
use pdfmix::error::PdfMixError;
use pdfmix::io::{PdfReader, PdfSource, PdfWriter, SourceInfo};
use pdfmix::merge::Merger;
use pdfmix::output::{OutputFormatter, describe_source, display_merge_plan, display_statistics};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.options().verbose);

    if let Err(err) = run(cli).await {
        OutputFormatter::default().error(&format!("Error: {err}"));
        process::exit(err.exit_code());
    }
}

/// Install the logger. `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfMixError> {
    cli.validate()?;
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);

    formatter.section(&format!(
        "{} v{}: {}",
        pdfmix::NAME,
        pdfmix::VERSION,
        config.mode.describe()
    ));
    formatter.blank_line();

    formatter.info(&format!("Reading {} input file(s)...", config.inputs().len()));
    let sources = PdfReader::new().read_all(config.inputs()).await?;
    let output_path = config.output_path(today());

    if formatter.is_verbose() && !formatter.is_quiet() && !config.dry_run {
        for source in &sources {
            formatter.debug(&describe_source(&source.inspect()?));
        }
    }

    if config.dry_run {
        return dry_run(&config, &sources, &output_path, &formatter);
    }

    let (writer, filename) = PdfWriter::for_output(&output_path)?;
    writer.can_write().await?;
    handle_output_overwrite(&config, &output_path, &formatter)?;

    formatter.info("Merging documents...");
    let merger = Merger::with_compression(config.compression);
    let result = merger.merge(config.mode, &sources)?;
    let statistics = result.statistics;

    formatter.debug(&format!("Saving to: {}", output_path.display()));
    let written = writer.download(result.bytes, &filename).await?;

    if config.json {
        print_json(&serde_json::json!({
            "statistics": statistics,
            "output_path": written.output_path,
            "file_size": written.file_size,
        }))?;
    } else {
        formatter.blank_line();
        display_statistics(&formatter, &statistics, &written);
    }

    Ok(())
}

/// Validate every input and show what would be written.
fn dry_run(
    config: &Config,
    sources: &[PdfSource],
    output_path: &Path,
    formatter: &OutputFormatter,
) -> Result<(), PdfMixError> {
    let infos = sources
        .iter()
        .map(PdfSource::inspect)
        .collect::<Result<Vec<SourceInfo>, _>>()?;
    let input_pages: Vec<usize> = infos.iter().map(|info| info.page_count).collect();

    if config.json {
        return print_json(&serde_json::json!({
            "mode": config.mode,
            "inputs": infos,
            "output_path": output_path,
            "output_pages": config.mode.output_pages(&input_pages),
        }));
    }

    for info in &infos {
        formatter.debug(&describe_source(info));
    }
    display_merge_plan(formatter, config.mode, &infos, output_path);
    formatter.blank_line();
    formatter.success("Dry run completed successfully");
    formatter.info("  Run without --dry-run to create the merged PDF");

    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<(), PdfMixError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| PdfMixError::other(format!("Failed to render JSON: {err}")))?;
    println!("{rendered}");
    Ok(())
}

/// Handle output file overwrite scenarios.
fn handle_output_overwrite(
    config: &Config,
    output_path: &Path,
    formatter: &OutputFormatter,
) -> Result<(), PdfMixError> {
    if !output_path.exists() {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(PdfMixError::output_exists(output_path.to_path_buf())),
        OverwriteMode::Prompt => {
            use std::io::{self, IsTerminal, Write};

            // Nobody to ask: quiet, JSON and piped runs behave like no-clobber.
            if formatter.is_quiet() || !io::stdin().is_terminal() {
                return Err(PdfMixError::output_exists(output_path.to_path_buf()));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                output_path.display()
            ));
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin().read_line(&mut response)?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(PdfMixError::Cancelled)
            }
        }
    }
}
