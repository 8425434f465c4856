//! Report accumulation: suites roll up into categories, categories into
//! a report, with RAG status computed from aggregate counts at every
//! level.
//!
//! Each [`Accumulator`] is scoped to exactly one output artifact. The
//! driver decides how many accumulators exist and when each is
//! finalized; accumulators never share state and are never reused
//! across artifacts.

use crate::status::{RagPalette, RagStatus};
use crate::{Counts, TestSuite};
use serde::Serialize;

/// Grouping label for suites found directly in the results directory
/// (aggregated mode only)
pub const NO_CATEGORY: &str = "(no category)";

/// A named grouping of suites that share a source subdirectory
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    pub suites: Vec<SuiteEntry>,
    pub counts: Counts,
    pub status: RagStatus,
}

/// A suite plus its computed status, as it appears in a finalized report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteEntry {
    #[serde(flatten)]
    pub suite: TestSuite,
    pub status: RagStatus,
}

/// The finalized, immutable top-level artifact
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Report heading: the category name in per-directory mode, or a
    /// fixed overall title in aggregated mode
    pub title: String,
    /// Categories in discovery order (not sorted)
    pub categories: Vec<Category>,
    pub counts: Counts,
    pub status: RagStatus,
    pub palette: RagPalette,
    /// RFC 3339 generation timestamp, shown in the report footer
    pub generated_at: String,
}

const AGGREGATED_TITLE: &str = "Test Results";

/// Collects suites for one output artifact.
pub struct Accumulator {
    /// Fixed category label in per-directory mode, `None` when
    /// aggregating across the whole results directory
    category: Option<String>,
    /// Insertion-ordered groups keyed by category name
    groups: Vec<(String, Vec<TestSuite>)>,
    included: usize,
}

impl Accumulator {
    pub fn new(category: Option<String>) -> Self {
        Accumulator {
            category,
            groups: Vec::new(),
            included: 0,
        }
    }

    /// True until the first [`include`](Self::include) call
    pub fn is_empty(&self) -> bool {
        self.included == 0
    }

    /// Append a suite. `subdir` is the source subdirectory name for
    /// aggregated mode; it is ignored when the accumulator carries a
    /// fixed category label. Appends only, never re-derives existing
    /// entries.
    pub fn include(&mut self, subdir: Option<&str>, suite: TestSuite) {
        let group = self
            .category
            .as_deref()
            .or(subdir)
            .unwrap_or(NO_CATEGORY)
            .to_string();
        match self.groups.iter_mut().find(|(name, _)| *name == group) {
            Some((_, suites)) => suites.push(suite),
            None => self.groups.push((group, vec![suite])),
        }
        self.included += 1;
    }

    /// Compute RAG status at every level and return the immutable
    /// snapshot. A zero-include accumulator finalizes into a well-formed
    /// all-zero report; whether that is an error is the driver's call.
    pub fn finalize(self, palette: &RagPalette) -> Report {
        let title = self
            .category
            .clone()
            .unwrap_or_else(|| AGGREGATED_TITLE.to_string());

        let mut totals = Counts::default();
        let categories: Vec<Category> = self
            .groups
            .into_iter()
            .map(|(name, suites)| {
                let mut counts = Counts::default();
                let suites: Vec<SuiteEntry> = suites
                    .into_iter()
                    .map(|suite| {
                        counts.add(&suite.counts);
                        let status = RagStatus::classify(&suite.counts);
                        SuiteEntry { suite, status }
                    })
                    .collect();
                totals.add(&counts);
                let status = RagStatus::classify(&counts);
                Category {
                    name,
                    suites,
                    counts,
                    status,
                }
            })
            .collect();

        let status = RagStatus::classify(&totals);
        Report {
            title,
            categories,
            counts: totals,
            status,
            palette: palette.clone(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CaseStatus, TestCase};

    fn suite(name: &str, statuses: &[CaseStatus]) -> TestSuite {
        let cases: Vec<TestCase> = statuses
            .iter()
            .enumerate()
            .map(|(i, status)| TestCase {
                name: format!("case{i}"),
                classname: None,
                status: *status,
                duration: 0.05,
                message: None,
                detail: None,
            })
            .collect();
        TestSuite::from_cases(name, cases, 0.05 * statuses.len() as f64)
    }

    #[test]
    fn per_directory_accumulator_uses_its_label() {
        let mut acc = Accumulator::new(Some("unit".into()));
        acc.include(None, suite("FooTest", &[CaseStatus::Passed]));
        let report = acc.finalize(&RagPalette::default());
        assert_eq!(report.title, "unit");
        assert_eq!(report.categories.len(), 1);
        assert_eq!(report.categories[0].name, "unit");
        assert_eq!(report.status, RagStatus::Green);
    }

    #[test]
    fn aggregated_accumulator_groups_by_subdir() {
        let mut acc = Accumulator::new(None);
        acc.include(Some("unit"), suite("A", &[CaseStatus::Passed]));
        acc.include(Some("integration"), suite("B", &[CaseStatus::Failed]));
        acc.include(Some("unit"), suite("C", &[CaseStatus::Passed]));
        acc.include(None, suite("TopLevel", &[CaseStatus::Skipped]));

        let report = acc.finalize(&RagPalette::default());
        let names: Vec<&str> = report.categories.iter().map(|c| c.name.as_str()).collect();
        // Insertion order, with the synthetic group for top-level files
        assert_eq!(names, vec!["unit", "integration", NO_CATEGORY]);

        let unit = &report.categories[0];
        assert_eq!(unit.suites.len(), 2);
        assert_eq!(unit.counts.total, 2);
        assert_eq!(unit.status, RagStatus::Green);

        assert_eq!(report.categories[1].status, RagStatus::Red);
        assert_eq!(report.categories[2].status, RagStatus::Amber);
        assert_eq!(report.counts.total, 4);
        assert_eq!(report.status, RagStatus::Red);
    }

    #[test]
    fn rollup_counts_are_element_wise_sums() {
        let s1 = suite("S1", &[CaseStatus::Passed, CaseStatus::Failed]);
        let s2 = suite(
            "S2",
            &[CaseStatus::Error, CaseStatus::Skipped, CaseStatus::Passed],
        );
        let expected_failed = s1.counts.failed + s2.counts.failed;
        let expected_total = s1.counts.total + s2.counts.total;

        let mut acc = Accumulator::new(Some("all".into()));
        acc.include(None, s1);
        acc.include(None, s2);
        let report = acc.finalize(&RagPalette::default());

        let cat = &report.categories[0];
        assert_eq!(cat.counts.total, expected_total);
        assert_eq!(cat.counts.failed, expected_failed);
        assert_eq!(cat.counts.errors, 1);
        assert_eq!(cat.counts.skipped, 1);
        assert_eq!(cat.counts.passed(), 2);
        assert_eq!(report.counts, cat.counts);
    }

    #[test]
    fn empty_accumulator_finalizes_to_all_zero_report() {
        let acc = Accumulator::new(None);
        assert!(acc.is_empty());
        let report = acc.finalize(&RagPalette::default());
        assert_eq!(report.counts, Counts::default());
        assert!(report.categories.is_empty());
        // Zero-total reports are green by convention
        assert_eq!(report.status, RagStatus::Green);
    }

    #[test]
    fn suite_level_status_is_per_suite() {
        let mut acc = Accumulator::new(Some("mixed".into()));
        acc.include(None, suite("Good", &[CaseStatus::Passed]));
        acc.include(None, suite("Bad", &[CaseStatus::Failed]));
        let report = acc.finalize(&RagPalette::default());
        let cat = &report.categories[0];
        assert_eq!(cat.suites[0].status, RagStatus::Green);
        assert_eq!(cat.suites[1].status, RagStatus::Red);
        assert_eq!(cat.status, RagStatus::Red);
    }
}
