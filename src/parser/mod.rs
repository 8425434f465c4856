//! Test-result XML parsing.
//!
//! Candidacy (is this file a test-result file at all?) and parsing are
//! separate steps: callers check [`suite_name`] before handing content
//! to [`parse_suite`].

mod junit;

pub use junit::parse_suite;

/// Literal prefix every candidate result file carries
pub const RESULT_FILE_PREFIX: &str = "TEST-";
/// Literal suffix every candidate result file carries
pub const RESULT_FILE_SUFFIX: &str = ".xml";

/// Derive the suite display name from a result file name.
///
/// Returns `None` when the file does not match the `TEST-*.xml` pattern,
/// meaning it is not a candidate for parsing at all.
pub fn suite_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_prefix(RESULT_FILE_PREFIX)?
        .strip_suffix(RESULT_FILE_SUFFIX)
}
