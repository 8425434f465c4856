//! Red/amber/green status policy.
//!
//! Classification is a pure function of aggregate counts and is applied
//! at every level of the report tree (suite, category, whole report).
//! Display colors are a separate concern: the palette can be overridden
//! without affecting classification.

use crate::Counts;
use serde::Serialize;
use std::fmt;

/// Roll-up status for any level of the report tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RagStatus {
    Red,
    Amber,
    Green,
}

impl RagStatus {
    /// Classify aggregate counts. Total for all non-negative inputs:
    /// any failure or error is red, a fully passing set with skipped
    /// cases is amber, everything else (including zero-total counts)
    /// is green.
    pub fn classify(counts: &Counts) -> RagStatus {
        if counts.failed + counts.errors > 0 {
            RagStatus::Red
        } else if counts.skipped > 0 {
            RagStatus::Amber
        } else {
            RagStatus::Green
        }
    }
}

impl fmt::Display for RagStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RagStatus::Red => "red",
            RagStatus::Amber => "amber",
            RagStatus::Green => "green",
        };
        write!(f, "{s}")
    }
}

/// CSS color tokens used to render each status
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RagPalette {
    pub red: String,
    pub amber: String,
    pub green: String,
}

impl Default for RagPalette {
    fn default() -> Self {
        RagPalette {
            red: "#ef4444".into(),
            amber: "#eab308".into(),
            green: "#22c55e".into(),
        }
    }
}

impl RagPalette {
    /// The configured color token for a status
    pub fn color(&self, status: RagStatus) -> &str {
        match status {
            RagStatus::Red => &self.red,
            RagStatus::Amber => &self.amber,
            RagStatus::Green => &self.green,
        }
    }
}
