//! sleepchef - recipe feasibility from ingredient box screenshots
//!
//! Reads recorded OCR responses for one or more screenshots, detects the
//! ingredients and their counts, and prints which dishes can be cooked.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{ArgAction, Parser};
use rayon::prelude::*;
use serde::Serialize;
use sleepchef_core::catalog::Catalog;
use sleepchef_core::layout::ClusterParams;
use sleepchef_core::matching::MatchParams;
use sleepchef_core::ocr::{ImageSource, RecordedOcr};
use sleepchef_core::report::Reply;
use sleepchef_core::{ScanOutcome, Scanner};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Detects ingredients in recorded OCR responses and reports which
/// dishes can be made from them.
#[derive(Parser, Debug)]
#[command(name = "sleepchef")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// One or more saved OCR responses (textAnnotations JSON)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Screenshot width in pixels
    #[arg(long)]
    width: u32,

    /// Screenshot height in pixels
    #[arg(long)]
    height: u32,

    /// Catalog document holding the food list
    #[arg(long, env = "SLEEPCHEF_FOODS_JSON_PATH")]
    foods: PathBuf,

    /// Catalog document holding the dish lists
    #[arg(long, env = "SLEEPCHEF_COOKS_JSON_PATH")]
    cooks: PathBuf,

    /// Request text used to pick the dish category
    #[arg(short = 't', long, default_value = "")]
    text: String,

    /// Minimum neighbourhood size for a fragment to seed a label
    #[arg(long = "min-pts", default_value_t = 1)]
    min_pts: usize,

    /// Maximum normalized gap between fragments of one label
    #[arg(long, default_value_t = 0.01)]
    eps: f64,

    /// Accuracy a name match must exceed
    #[arg(long, default_value_t = 0.5)]
    threshold: f64,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Print the scan outcome and reply as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(Serialize)]
struct FileReport<'a> {
    file: &'a Path,
    outcome: &'a ScanOutcome,
    reply: &'a Reply,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("SLEEPCHEF_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn write_text(out: &mut impl Write, path: &Path, reply: &Reply, header: bool) -> io::Result<()> {
    if header {
        writeln!(out, "==> {} <==", path.display())?;
    }
    for message in reply.messages() {
        writeln!(out, "{message}")?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let catalog = Catalog::load_many([&args.foods, &args.cooks]).context("loading catalog")?;
    let cluster_params = ClusterParams::new(args.min_pts, args.eps)?;
    let scanner = Scanner::new(&catalog)
        .cluster_params(cluster_params)
        .match_params(MatchParams {
            threshold: args.threshold,
        });

    let outcomes: Vec<_> = args
        .files
        .par_iter()
        .map(|path| {
            let image = ImageSource::new(path, args.width, args.height);
            let request = path.display().to_string();
            scanner.scan_image(&request, &RecordedOcr, &image)
        })
        .collect();

    let mut output = BufWriter::new(io::stdout().lock());
    let mut failed = 0usize;
    for (path, outcome) in args.files.iter().zip(&outcomes) {
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(file = %path.display(), "{e}");
                failed += 1;
                continue;
            }
        };
        let reply = scanner.reply(outcome, &args.text);
        if args.json {
            let report = FileReport {
                file: path,
                outcome,
                reply: &reply,
            };
            serde_json::to_writer_pretty(&mut output, &report)?;
            writeln!(output)?;
        } else {
            write_text(&mut output, path, &reply, args.files.len() > 1)?;
        }
    }
    output.flush()?;

    info!(files = args.files.len(), failed, "done");
    if failed > 0 {
        bail!("{failed} of {} files failed", args.files.len());
    }
    Ok(())
}
