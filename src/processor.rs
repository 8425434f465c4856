//! Discovery and aggregation-mode driver.
//!
//! Walks the results directory, classifies entries, parses candidate
//! files, and feeds suites into accumulators. The aggregation mode picks
//! one of two strategies up front: a fresh accumulator per subdirectory
//! written as soon as that directory is exhausted, or a single
//! accumulator for the whole walk written exactly once at the end.

use crate::error::ReportError;
use crate::parser;
use crate::renderer;
use crate::report::Accumulator;
use crate::status::RagPalette;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One invocation's configuration. Constructed fresh per run; no state
/// persists between runs.
pub struct ReportProcessor {
    results_dir: PathBuf,
    reports_dir: PathBuf,
    aggregated: bool,
    fail_on_empty: bool,
    palette: RagPalette,
}

/// What a completed run produced
#[derive(Debug)]
pub struct RunOutcome {
    /// Paths of the report files written, in the order they were written
    pub written: Vec<PathBuf>,
}

impl RunOutcome {
    /// True for the soft empty case: the run succeeded but found no
    /// results to report on
    pub fn wrote_nothing(&self) -> bool {
        self.written.is_empty()
    }
}

impl ReportProcessor {
    pub fn new(results_dir: impl Into<PathBuf>, reports_dir: impl Into<PathBuf>) -> Self {
        ReportProcessor {
            results_dir: results_dir.into(),
            reports_dir: reports_dir.into(),
            aggregated: false,
            fail_on_empty: false,
            palette: RagPalette::default(),
        }
    }

    /// Merge all results into a single report instead of one per
    /// subdirectory
    pub fn aggregated(mut self, aggregated: bool) -> Self {
        self.aggregated = aggregated;
        self
    }

    /// Treat an empty or missing results directory as a failure
    pub fn fail_on_empty(mut self, fail_on_empty: bool) -> Self {
        self.fail_on_empty = fail_on_empty;
        self
    }

    pub fn palette(mut self, palette: RagPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Run the full discover/parse/accumulate/render pass.
    pub fn run(&self) -> Result<RunOutcome, ReportError> {
        if !self.results_dir.is_dir() {
            if self.fail_on_empty {
                return Err(ReportError::Configuration {
                    path: self.results_dir.clone(),
                });
            }
            // Soft success: nothing to walk, nothing written
            return Ok(RunOutcome { written: vec![] });
        }

        let outcome = if self.aggregated {
            self.run_aggregated()?
        } else {
            self.run_per_directory()?
        };

        if outcome.wrote_nothing() && self.fail_on_empty {
            return Err(ReportError::EmptyResults);
        }
        Ok(outcome)
    }

    /// One accumulator for the whole walk; subdirectory names become
    /// categories, matching top-level files join the synthetic group.
    /// Written exactly once, after the walk completes.
    fn run_aggregated(&self) -> Result<RunOutcome, ReportError> {
        let mut acc = Accumulator::new(None);
        for entry in direct_entries(&self.results_dir) {
            let entry = entry?;
            if entry.file_type().is_dir() {
                let category = entry.file_name().to_string_lossy().into_owned();
                self.include_directory(entry.path(), Some(&category), &mut acc)?;
            } else if let Some(name) = candidate_name(entry.file_name()) {
                let suite = self.parse_file(entry.path(), &name)?;
                acc.include(None, suite);
            }
        }

        if acc.is_empty() {
            return Ok(RunOutcome { written: vec![] });
        }
        let report = acc.finalize(&self.palette);
        let path = renderer::write_report(&report, &self.reports_dir)?;
        Ok(RunOutcome {
            written: vec![path],
        })
    }

    /// A fresh accumulator per subdirectory, finalized and written as
    /// soon as that directory's files are exhausted. Top-level files are
    /// not candidates in this mode.
    fn run_per_directory(&self) -> Result<RunOutcome, ReportError> {
        let mut written = Vec::new();
        for entry in direct_entries(&self.results_dir) {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let category = entry.file_name().to_string_lossy().into_owned();
            let mut acc = Accumulator::new(Some(category.clone()));
            self.include_directory(entry.path(), None, &mut acc)?;
            if acc.is_empty() {
                continue;
            }
            let report = acc.finalize(&self.palette);
            let path = renderer::write_report(&report, &self.reports_dir.join(&category))?;
            written.push(path);
        }
        Ok(RunOutcome { written })
    }

    /// Parse every matching file directly inside `dir` into `acc`.
    /// Non-matching files are ignored; nested directories are not
    /// descended into.
    fn include_directory(
        &self,
        dir: &Path,
        category: Option<&str>,
        acc: &mut Accumulator,
    ) -> Result<(), ReportError> {
        for entry in direct_entries(dir) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(name) = candidate_name(entry.file_name()) {
                let suite = self.parse_file(entry.path(), &name)?;
                acc.include(category, suite);
            }
        }
        Ok(())
    }

    /// Read and parse one candidate file. The file is fully read and
    /// closed before the next one is opened; a parse failure is fatal
    /// for the whole run.
    fn parse_file(&self, path: &Path, name: &str) -> Result<crate::TestSuite, ReportError> {
        let content = fs::read_to_string(path)?;
        parser::parse_suite(name, &content)
    }
}

/// Direct children of `dir`, unsorted, in listing order
fn direct_entries(
    dir: &Path,
) -> impl Iterator<Item = Result<walkdir::DirEntry, ReportError>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .map(|entry| entry.map_err(|e| ReportError::Io(e.into())))
}

/// Candidate check plus display-name derivation for one directory entry
fn candidate_name(file_name: &std::ffi::OsStr) -> Option<String> {
    parser::suite_name(file_name.to_str()?).map(str::to_string)
}
