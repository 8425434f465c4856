//! Suiteview CLI: JUnit XML results in, HTML report out

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use suiteview::error::ReportError;
use suiteview::processor::ReportProcessor;
use suiteview::status::RagPalette;

/// Generate browsable HTML reports from JUnit-style XML test results
#[derive(Parser, Debug)]
#[command(name = "suiteview")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing TEST-*.xml result files (directly, or one
    /// level of subdirectories)
    #[arg(long, value_name = "DIR", default_value = ".")]
    results_dir: PathBuf,

    /// Directory to write HTML reports under
    #[arg(long, value_name = "DIR", default_value = ".")]
    reports_dir: PathBuf,

    /// Merge all results into a single report instead of one report per
    /// subdirectory
    #[arg(long)]
    aggregated: bool,

    /// Fail when no test result files are found
    #[arg(long)]
    fail_on_empty: bool,

    /// Override the red status display color
    #[arg(long, value_name = "CSS_COLOR")]
    css_red: Option<String>,

    /// Override the amber status display color
    #[arg(long, value_name = "CSS_COLOR")]
    css_amber: Option<String>,

    /// Override the green status display color
    #[arg(long, value_name = "CSS_COLOR")]
    css_green: Option<String>,
}

impl Args {
    fn palette(&self) -> RagPalette {
        let mut palette = RagPalette::default();
        if let Some(ref red) = self.css_red {
            palette.red = red.clone();
        }
        if let Some(ref amber) = self.css_amber {
            palette.amber = amber.clone();
        }
        if let Some(ref green) = self.css_green {
            palette.green = green.clone();
        }
        palette
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let processor = ReportProcessor::new(&args.results_dir, &args.reports_dir)
        .aggregated(args.aggregated)
        .fail_on_empty(args.fail_on_empty)
        .palette(args.palette());

    match processor.run() {
        Ok(outcome) => {
            if outcome.wrote_nothing() {
                println!(
                    "{}",
                    "No test XML results found; no report generated.".yellow()
                );
            } else {
                for path in &outcome.written {
                    println!("{} {}", "Report written to".green(), path.display());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(ReportError::EmptyResults) => {
            eprintln!("{} {}", "error:".red().bold(), ReportError::EmptyResults);
            Ok(ExitCode::from(1))
        }
        Err(e) => Err(e.into()),
    }
}
