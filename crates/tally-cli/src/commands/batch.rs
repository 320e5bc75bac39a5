//! Batch command - parse a file of transcripts, one per line.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use tally_core::{InvoiceDraft, InvoiceIntake};

use super::config::load_config;
use super::parse::{build_intake, format_csv, format_text, read_customers, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// File with one transcript per line
    #[arg(required = true)]
    input: PathBuf,

    /// Output file for the drafts (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Date that relative words like 昨天 resolve against (YYYY-MM-DD)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// File of known customer names, one per line
    #[arg(long)]
    customers: Option<PathBuf>,

    /// Also write a per-line summary CSV
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Outcome of one transcript line.
struct LineResult {
    line: usize,
    transcript: String,
    draft: Option<InvoiceDraft>,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(date) = args.date {
        config.parser.reference_date = Some(date);
    }
    if let Some(path) = &args.customers {
        config.intake.known_customers.extend(read_customers(path)?);
    }

    let content = fs::read_to_string(&args.input).map_err(|e| {
        anyhow::anyhow!("Cannot read transcripts from {}: {}", args.input.display(), e)
    })?;

    let transcripts: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    if transcripts.is_empty() {
        anyhow::bail!("No transcripts found in {}", args.input.display());
    }

    eprintln!(
        "{} Found {} transcripts to parse",
        style("ℹ").blue(),
        transcripts.len()
    );

    let intake = build_intake(&config);

    let pb = ProgressBar::new(transcripts.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} lines")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(transcripts.len());

    for (line, transcript) in transcripts {
        let result = process_line(&intake, line, transcript);

        if let Some(message) = &result.error {
            if args.continue_on_error {
                warn!("Line {} rejected: {}", line, message);
            } else {
                error!("Line {} rejected: {}", line, message);
                pb.abandon();
                anyhow::bail!("Line {} rejected: {}", line, message);
            }
        }

        results.push(result);
        pb.inc(1);
    }

    pb.finish_and_clear();

    let drafts: Vec<InvoiceDraft> = results.iter().filter_map(|r| r.draft.clone()).collect();
    let failed: Vec<&LineResult> = results.iter().filter(|r| r.error.is_some()).collect();

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&drafts)?,
        OutputFormat::Csv => format_csv(&drafts)?,
        OutputFormat::Text => drafts
            .iter()
            .map(format_text)
            .collect::<Vec<_>>()
            .join("\n"),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        debug!("Wrote {} drafts to {}", drafts.len(), output_path.display());
    } else {
        println!("{}", output);
    }

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    eprintln!();
    eprintln!(
        "{} Parsed {} transcripts in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} succeeded, {} failed",
        style(drafts.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed lines:").red());
        for result in &failed {
            eprintln!(
                "  - line {}: {}",
                result.line,
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_line(intake: &InvoiceIntake, line: usize, transcript: &str) -> LineResult {
    match intake.process(transcript) {
        Ok(draft) => LineResult {
            line,
            transcript: transcript.to_string(),
            draft: Some(draft),
            error: None,
        },
        Err(e) => LineResult {
            line,
            transcript: transcript.to_string(),
            draft: None,
            error: Some(e.to_string()),
        },
    }
}

fn write_summary(path: &Path, results: &[LineResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "line",
        "status",
        "transcript",
        "customer",
        "total_price",
        "confidence",
        "error",
    ])?;

    for result in results {
        let line = result.line.to_string();

        if let Some(draft) = &result.draft {
            wtr.write_record([
                line.as_str(),
                "success",
                &result.transcript,
                draft.customer.name(),
                &draft.total_price.to_string(),
                &format!("{:.2}", draft.parsed.confidence),
                "",
            ])?;
        } else {
            wtr.write_record([
                line.as_str(),
                "error",
                &result.transcript,
                "",
                "",
                "",
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
