//! JUnit XML reader.
//!
//! Accepts both historical layouts with one reader: a root `<testsuite>`
//! (one file per test class, JUnit 4 style) or a root `<testsuites>`
//! wrapping suite elements (one file per execution, JUnit platform
//! style). Both vocabularies normalize into the one canonical
//! [`TestSuite`] shape; the distinction is which attributes are present,
//! not which type the document is.

use crate::error::ReportError;
use crate::{CaseStatus, TestCase, TestSuite};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parse one result file's content into a normalized suite.
///
/// `name` is the already-derived display name (see
/// [`super::suite_name`]); calling this on content from a non-candidate
/// file is a precondition violation, not a recoverable error. Counts are
/// tallied from the parsed cases, never trusted from count attributes.
pub fn parse_suite(name: &str, xml: &str) -> Result<TestSuite, ReportError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut root_seen = false;
    let mut cases: Vec<TestCase> = Vec::new();
    let mut current: Option<PendingCase> = None;
    let mut in_detail = false;
    let mut detail_text = String::new();
    // Explicit suite-level time attributes, when the runner recorded them
    let mut explicit_time: Option<f64> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ReportError::parse(name, e.to_string()))?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let tag = e.name();
                let tag = tag.as_ref();
                if !root_seen {
                    if tag != b"testsuite" && tag != b"testsuites" {
                        return Err(ReportError::parse(
                            name,
                            format!(
                                "unexpected root element <{}>",
                                String::from_utf8_lossy(tag)
                            ),
                        ));
                    }
                    root_seen = true;
                }
                match tag {
                    b"testsuite" => {
                        if let Some(time) = attr_f64(e, b"time") {
                            *explicit_time.get_or_insert(0.0) += time;
                        }
                    }
                    b"testcase" => {
                        let case = PendingCase::open(name, e)?;
                        if matches!(event, Event::Empty(_)) {
                            // Self-closing case: no failure/error/skipped child
                            cases.push(case.close());
                        } else {
                            current = Some(case);
                        }
                    }
                    b"failure" | b"error" | b"skipped" | b"ignored" => {
                        if let Some(ref mut case) = current {
                            case.status = match tag {
                                b"failure" => CaseStatus::Failed,
                                b"error" => CaseStatus::Error,
                                _ => CaseStatus::Skipped,
                            };
                            case.message = attr_string(e, b"message");
                            if matches!(event, Event::Start(_))
                                && (tag == b"failure" || tag == b"error")
                            {
                                in_detail = true;
                                detail_text.clear();
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(ref e) => {
                if in_detail {
                    let text = e
                        .unescape()
                        .map_err(|err| ReportError::parse(name, err.to_string()))?;
                    detail_text.push_str(&text);
                }
            }
            Event::CData(ref e) => {
                if in_detail {
                    detail_text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"testcase" => {
                    if let Some(case) = current.take() {
                        cases.push(case.close());
                    }
                }
                b"failure" | b"error" => {
                    if in_detail {
                        if let Some(ref mut case) = current {
                            if !detail_text.is_empty() {
                                case.detail = Some(std::mem::take(&mut detail_text));
                            }
                        }
                        in_detail = false;
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !root_seen {
        return Err(ReportError::parse(name, "no test-suite root element found"));
    }

    let case_time: f64 = cases.iter().map(|c| c.duration).sum();
    let duration = explicit_time.unwrap_or(case_time);
    Ok(TestSuite::from_cases(name, cases, duration))
}

/// A testcase element that has been opened but not yet closed
struct PendingCase {
    name: String,
    classname: Option<String>,
    status: CaseStatus,
    duration: f64,
    message: Option<String>,
    detail: Option<String>,
}

impl PendingCase {
    fn open(suite: &str, e: &BytesStart<'_>) -> Result<Self, ReportError> {
        let classname = attr_string(e, b"classname");
        // Case name resolution: the name attribute, or the classname as
        // context when the runner omitted it
        let name = match attr_string(e, b"name").or_else(|| classname.clone()) {
            Some(name) => name,
            None => {
                return Err(ReportError::parse(
                    suite,
                    "testcase element has neither a name nor a classname attribute",
                ))
            }
        };
        Ok(PendingCase {
            name,
            classname,
            status: CaseStatus::Passed,
            duration: attr_f64(e, b"time").unwrap_or(0.0),
            message: None,
            detail: None,
        })
    }

    fn close(self) -> TestCase {
        TestCase {
            name: self.name,
            classname: self.classname,
            status: self.status,
            duration: self.duration,
            message: self.message,
            detail: self.detail,
        }
    }
}

fn attr_string(e: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == name)
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}

fn attr_f64(e: &BytesStart<'_>, name: &[u8]) -> Option<f64> {
    attr_string(e, name).and_then(|s| s.parse().ok())
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    /// Generate a well-formed per-class result document with a random
    /// mix of case outcomes.
    fn arbitrary_result_xml() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop::sample::select(vec![
                "<testcase name=\"p\" classname=\"C\" time=\"0.01\"/>\n",
                "<testcase name=\"f\" classname=\"C\" time=\"0.02\"><failure message=\"m\">boom</failure></testcase>\n",
                "<testcase name=\"e\" classname=\"C\"><error message=\"m\"/></testcase>\n",
                "<testcase name=\"s\" classname=\"C\"><skipped/></testcase>\n",
            ]),
            0..40,
        )
        .prop_map(|cases| {
            format!("<testsuite name=\"Gen\">\n{}</testsuite>\n", cases.join(""))
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn parser_never_panics_on_arbitrary_input(ref input in ".{0,500}") {
            let _ = parse_suite("Fuzz", input);
        }

        #[test]
        fn counts_identity_holds_for_every_parsed_file(xml in arbitrary_result_xml()) {
            let suite = parse_suite("Gen", &xml).unwrap();
            let c = suite.counts;
            prop_assert_eq!(c.total, c.failed + c.errors + c.skipped + c.passed());
            prop_assert_eq!(c.total, suite.cases.len());
        }
    }
}
