//! Parse command - turn a single transcript into an invoice draft.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use tracing::{debug, info};

use tally_core::{InvoiceDraft, InvoiceIntake, IntakeError, TallyConfig};

use super::config::load_config;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Transcript text
    #[arg(required = true)]
    text: String,

    /// Date that relative words like 昨天 resolve against (YYYY-MM-DD)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// File of known customer names, one per line
    #[arg(long)]
    customers: Option<PathBuf>,

    /// Show extraction confidence
    #[arg(long)]
    show_confidence: bool,

    /// Report validation issues of the draft
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(date) = args.date {
        config.parser.reference_date = Some(date);
    }
    if let Some(path) = &args.customers {
        config.intake.known_customers.extend(read_customers(path)?);
    }

    let intake = build_intake(&config);
    info!("Parsing transcript: {}", args.text);

    let draft = match intake.process(&args.text) {
        Ok(draft) => draft,
        Err(IntakeError::LowConfidence {
            confidence,
            threshold,
            parsed,
        }) => {
            eprintln!("{}", serde_json::to_string_pretty(&parsed)?);
            anyhow::bail!(
                "confidence {:.2} is below the threshold {:.2}",
                confidence,
                threshold
            );
        }
        Err(e) => return Err(e.into()),
    };

    if args.validate {
        let issues = draft.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    let output = format_draft(&draft, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        println!();
        println!(
            "{} Extraction confidence: {:.1}%",
            style("ℹ").blue(),
            draft.parsed.confidence * 100.0
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn build_intake(config: &TallyConfig) -> InvoiceIntake {
    let intake = InvoiceIntake::from_config(config);
    intake.parser().initialize();
    debug!("{} known customers", intake.directory().len());
    intake
}

/// Read customer names, one per line. Blank lines are skipped.
pub fn read_customers(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read customers from {}: {}", path.display(), e))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect())
}

pub fn format_draft(draft: &InvoiceDraft, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(draft)?),
        OutputFormat::Csv => format_csv(std::slice::from_ref(draft)),
        OutputFormat::Text => Ok(format_text(draft)),
    }
}

pub fn format_csv(drafts: &[InvoiceDraft]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "work_date",
        "customer",
        "customer_status",
        "description",
        "quantity",
        "unit_price",
        "total_price",
        "confidence",
    ])?;

    for draft in drafts {
        let work_date = draft.work_date.to_string();
        wtr.write_record([
            work_date.as_str(),
            draft.customer.name(),
            customer_status(draft),
            &draft.description,
            &draft.quantity.to_string(),
            &draft.unit_price.to_string(),
            &draft.total_price.to_string(),
            &format!("{:.2}", draft.parsed.confidence),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(draft: &InvoiceDraft) -> String {
    let mut output = String::new();

    output.push_str(&format!("Date: {}\n", draft.work_date));
    output.push_str(&format!(
        "Customer: {} ({})\n",
        draft.customer.name(),
        customer_status(draft)
    ));
    output.push_str(&format!("Description: {}\n", draft.description));
    output.push('\n');

    output.push_str(&format!("  Quantity:   {}\n", draft.quantity));
    output.push_str(&format!("  Unit price: {}\n", draft.unit_price));
    output.push_str(&format!("  Total:      {}\n", draft.total_price));

    output
}

fn customer_status(draft: &InvoiceDraft) -> &'static str {
    if draft.customer.is_known() {
        "known"
    } else {
        "provisional"
    }
}
