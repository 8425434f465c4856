//! Report rendering: consumes a finalized report model and emits a
//! self-contained HTML document.

mod html;

pub use html::HtmlRenderer;

use crate::error::ReportError;
use crate::report::Report;
use std::fs;
use std::path::{Path, PathBuf};

/// File name every report is written as, under its own directory
pub const REPORT_FILE_NAME: &str = "index.html";

/// Render `report` and write it as `index.html` under `dir`, creating
/// the directory if needed. Returns the path written.
pub fn write_report(report: &Report, dir: &Path) -> Result<PathBuf, ReportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(REPORT_FILE_NAME);
    fs::write(&path, HtmlRenderer::new().render(report))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Accumulator;
    use crate::status::RagPalette;
    use tempfile::TempDir;

    #[test]
    fn write_report_creates_directory_and_index() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("unit");
        let report = Accumulator::new(Some("unit".into())).finalize(&RagPalette::default());

        let path = write_report(&report, &target).unwrap();
        assert_eq!(path, target.join(REPORT_FILE_NAME));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<!DOCTYPE html>"));
    }
}
