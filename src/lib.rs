//! Suiteview: HTML report generation for JUnit-style XML test results
//!
//! This library turns directories of `TEST-*.xml` files (as written by
//! JUnit 4 per-class runners and JUnit platform per-execution runners)
//! into static HTML reports with red/amber/green roll-up statuses.

pub mod error;
pub mod parser;
pub mod processor;
pub mod renderer;
pub mod report;
pub mod status;

use serde::Serialize;

/// Outcome of a single test case, inferred from the case's child elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CaseStatus {
    Passed,
    Failed,
    Error,
    Skipped,
}

/// A single executed test case. Immutable once parsed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Case name (falls back to the classname attribute when absent)
    pub name: String,
    /// Class that declared the case, when the runner recorded one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classname: Option<String>,
    pub status: CaseStatus,
    /// Wall-clock duration in seconds
    pub duration: f64,
    /// Message attribute of the failure/error/skipped child, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Body text of the failure/error child (stack trace or assertion dump)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Aggregate case counts at any level of the report tree.
///
/// `passed` is always derived, never stored, so the invariant
/// `total == failed + errors + skipped + passed` holds by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Counts {
    pub total: usize,
    pub failed: usize,
    pub errors: usize,
    pub skipped: usize,
}

impl Counts {
    /// Tally counts from a case sequence
    pub fn tally(cases: &[TestCase]) -> Self {
        let mut counts = Counts {
            total: cases.len(),
            ..Counts::default()
        };
        for case in cases {
            match case.status {
                CaseStatus::Failed => counts.failed += 1,
                CaseStatus::Error => counts.errors += 1,
                CaseStatus::Skipped => counts.skipped += 1,
                CaseStatus::Passed => {}
            }
        }
        counts
    }

    pub fn passed(&self) -> usize {
        self.total - self.failed - self.errors - self.skipped
    }

    /// Element-wise accumulation
    pub fn add(&mut self, other: &Counts) {
        self.total += other.total;
        self.failed += other.failed;
        self.errors += other.errors;
        self.skipped += other.skipped;
    }
}

/// The normalized record for one result file. Immutable after parsing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuite {
    /// Display name: the file base name with `TEST-` and `.xml` stripped
    pub name: String,
    pub cases: Vec<TestCase>,
    pub counts: Counts,
    /// Total duration in seconds
    pub duration: f64,
}

impl TestSuite {
    /// Build a suite from parsed cases, tallying counts from the cases
    /// themselves rather than trusting any count attributes.
    pub fn from_cases(name: impl Into<String>, cases: Vec<TestCase>, duration: f64) -> Self {
        let counts = Counts::tally(&cases);
        TestSuite {
            name: name.into(),
            cases,
            counts,
            duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(name: &str, status: CaseStatus) -> TestCase {
        TestCase {
            name: name.into(),
            classname: None,
            status,
            duration: 0.1,
            message: None,
            detail: None,
        }
    }

    #[test]
    fn tally_counts_every_status() {
        let cases = vec![
            case("a", CaseStatus::Passed),
            case("b", CaseStatus::Failed),
            case("c", CaseStatus::Error),
            case("d", CaseStatus::Skipped),
            case("e", CaseStatus::Passed),
        ];
        let counts = Counts::tally(&cases);
        assert_eq!(counts.total, 5);
        assert_eq!(counts.failed, 1);
        assert_eq!(counts.errors, 1);
        assert_eq!(counts.skipped, 1);
        assert_eq!(counts.passed(), 2);
    }

    #[test]
    fn counts_identity_holds_for_built_suites() {
        let suite = TestSuite::from_cases(
            "Sample",
            vec![case("a", CaseStatus::Passed), case("b", CaseStatus::Failed)],
            0.2,
        );
        let c = suite.counts;
        assert_eq!(c.total, c.failed + c.errors + c.skipped + c.passed());
    }

    #[test]
    fn add_is_element_wise() {
        let mut a = Counts {
            total: 3,
            failed: 1,
            errors: 0,
            skipped: 1,
        };
        let b = Counts {
            total: 2,
            failed: 0,
            errors: 1,
            skipped: 0,
        };
        a.add(&b);
        assert_eq!(a.total, 5);
        assert_eq!(a.failed, 1);
        assert_eq!(a.errors, 1);
        assert_eq!(a.skipped, 1);
        assert_eq!(a.passed(), 2);
    }
}
