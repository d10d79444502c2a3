use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cad_canvas::consts::SVG_MARGIN;
use cad_canvas::doc::{DocStore, DocumentError, LoadReport, load_entities_str};
use cad_canvas::svg::export_svg;
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("invalid drawing: {0}")]
    Document(#[from] DocumentError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("margin must be a finite, non-negative number, got {0}")]
    InvalidMargin(f64),
    #[error("{0} entities failed to load")]
    Invalid(usize),
}

#[derive(Parser, Debug)]
#[command(name = "open-web-cad", about = "Inspect, validate and export open-web-cad drawings")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export a JSON drawing as SVG.
    ExportSvg {
        input: PathBuf,
        /// Output file; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, env = "OPENCAD_SVG_MARGIN", default_value_t = SVG_MARGIN)]
        margin: f64,
    },
    /// Summarize a drawing: entities per type, skipped entries, bounds.
    Inspect {
        input: PathBuf,
        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Fail if any entity in the drawing cannot be loaded.
    Validate { input: PathBuf },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::ExportSvg { input, output, margin } => run_export(&input, output.as_deref(), margin),
        Command::Inspect { input, json } => run_inspect(&input, json),
        Command::Validate { input } => run_validate(&input),
    }
}

fn load(path: &Path) -> Result<LoadReport, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_owned(), source })?;
    let report = load_entities_str(&text)?;
    tracing::debug!(path = %path.display(), loaded = report.entities.len(), skipped = report.skipped.len(), "drawing loaded");
    Ok(report)
}

fn run_export(input: &Path, output: Option<&Path>, margin: f64) -> Result<(), CliError> {
    if !margin.is_finite() || margin < 0.0 {
        return Err(CliError::InvalidMargin(margin));
    }
    let report = load(input)?;
    let svg = export_svg(&report.entities, margin);
    match output {
        Some(path) => {
            fs::write(path, svg).map_err(|source| CliError::Write { path: path.to_owned(), source })?;
            tracing::info!(path = %path.display(), entities = report.entities.len(), "svg written");
        }
        None => println!("{svg}"),
    }
    Ok(())
}

fn run_inspect(input: &Path, as_json: bool) -> Result<(), CliError> {
    let report = load(input)?;
    let summary = summarize(&report);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if let Some(counts) = summary["counts"].as_object() {
        for (kind, count) in counts {
            println!("{kind}: {count}");
        }
    }
    for skipped in &report.skipped {
        println!("skipped #{}: {}", skipped.index, skipped.error);
    }
    match summary["bounds"].as_array() {
        Some(b) if b.len() == 4 => println!("bounds: ({}, {}) - ({}, {})", b[0], b[1], b[2], b[3]),
        _ => println!("bounds: empty"),
    }
    Ok(())
}

fn run_validate(input: &Path) -> Result<(), CliError> {
    let report = load(input)?;
    for skipped in &report.skipped {
        tracing::warn!(index = skipped.index, error = %skipped.error, "invalid entity");
    }
    if report.skipped.is_empty() {
        println!("ok: {} entities", report.entities.len());
        Ok(())
    } else {
        Err(CliError::Invalid(report.skipped.len()))
    }
}

/// Per-type counts, skipped count and union bounds of a loaded drawing.
fn summarize(report: &LoadReport) -> Value {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entity in &report.entities {
        *counts.entry(entity.entity_type().as_str()).or_default() += 1;
    }

    let mut doc = DocStore::new();
    doc.replace(report.entities.clone());
    let bounds = doc
        .bounding_box()
        .map_or(Value::Null, |b| json!([b.xmin, b.ymin, b.xmax, b.ymax]));

    json!({
        "entities": report.entities.len(),
        "counts": counts,
        "skipped": report.skipped.len(),
        "bounds": bounds,
    })
}
