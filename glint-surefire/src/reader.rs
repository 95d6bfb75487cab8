//! Streaming reader for one surefire document
//!
//! ```text
//!     Every `testsuite` element is visited, nested ones included. The `testcase` elements
//!     directly under a suite are indexed by class name; anything else is skipped. A suite
//!     named after an inner class (its name contains `$`) ends the document: surefire reports
//!     inner-class results again under the outer class.
//!
//!     A test case's status comes from its first child element only: `skipped`, `failure`
//!     or `error`. Failures and errors carry their `message` attribute and all the text below
//!     the element as the stack trace.
//! ```

use crate::index::UnitTestIndex;
use crate::report::{TestStatus, UnitTestResult};
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{self, BufRead};
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed report: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("malformed attribute: {0}")]
    Attr(#[from] AttrError),
    #[error("invalid test duration {0:?}")]
    InvalidTime(String),
    #[error("report ends inside a test case")]
    UnclosedTestCase,
}

/// Index every test case of the document read from `source`.
pub fn read_report<R: BufRead>(source: R, index: &mut UnitTestIndex) -> Result<(), ReportError> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();
    let mut open: Vec<Vec<u8>> = Vec::new();
    let mut suites: Vec<String> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(element) => {
                let name = element.local_name().as_ref().to_vec();
                let opened = match name.as_slice() {
                    b"testsuite" => {
                        let suite = attribute(&element, "name")?.unwrap_or_default();
                        if suite.contains('$') {
                            debug!(suite = %suite, "inner class suite, skipping rest of report");
                            return Ok(());
                        }
                        suites.push(suite);
                        true
                    }
                    b"testcase" if is_suite(open.last()) => {
                        let case = TestCase::from_element(&element, current(&suites))?;
                        let result = read_test_case(&mut reader, case.result)?;
                        index.index(&case.class_name).add(result);
                        false
                    }
                    _ => true,
                };
                if opened {
                    open.push(name);
                }
            }
            Event::Empty(element) => match element.local_name().as_ref() {
                b"testsuite" => {
                    if attribute(&element, "name")?.is_some_and(|suite| suite.contains('$')) {
                        return Ok(());
                    }
                }
                b"testcase" if is_suite(open.last()) => {
                    let case = TestCase::from_element(&element, current(&suites))?;
                    index.index(&case.class_name).add(case.result);
                }
                _ => {}
            },
            Event::End(_) => {
                if open.pop().as_deref() == Some(b"testsuite".as_slice()) {
                    suites.pop();
                }
            }
            Event::Eof => return Ok(()),
            _ => {}
        }
        buf.clear();
    }
}

fn is_suite(element: Option<&Vec<u8>>) -> bool {
    element.is_some_and(|name| name.as_slice() == b"testsuite")
}

fn current(suites: &[String]) -> &str {
    suites.last().map_or("", String::as_str)
}

struct TestCase {
    class_name: String,
    result: UnitTestResult,
}

impl TestCase {
    fn from_element(element: &BytesStart<'_>, suite: &str) -> Result<Self, ReportError> {
        let classname = attribute(element, "classname")?;
        let name = attribute(element, "name")?.unwrap_or_default();
        let time = attribute(element, "time")?;

        Ok(Self {
            class_name: class_name(classname.as_deref(), suite),
            result: UnitTestResult {
                name: test_name(classname.as_deref(), &name),
                duration_ms: duration_ms(time.as_deref())?,
                ..Default::default()
            },
        })
    }
}

/// Consume the rest of a `testcase` element, up to and including its end tag.
fn read_test_case<R: BufRead>(
    reader: &mut Reader<R>,
    mut result: UnitTestResult,
) -> Result<UnitTestResult, ReportError> {
    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut seen_child = false;
    let mut collecting: Option<usize> = None;
    let mut stack = String::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(element) => {
                depth += 1;
                if !seen_child {
                    seen_child = true;
                    if apply_status(&element, &mut result)? {
                        collecting = Some(depth);
                    }
                }
            }
            Event::Empty(element) => {
                if !seen_child {
                    seen_child = true;
                    if apply_status(&element, &mut result)? {
                        result.stack_trace = Some(String::new());
                    }
                }
            }
            Event::Text(text) if collecting.is_some() => stack.push_str(&text.unescape()?),
            Event::CData(text) if collecting.is_some() => {
                stack.push_str(&String::from_utf8_lossy(&text.into_inner()));
            }
            Event::End(_) => {
                if depth == 0 {
                    return Ok(result);
                }
                if collecting == Some(depth) {
                    collecting = None;
                    result.stack_trace = Some(std::mem::take(&mut stack));
                }
                depth -= 1;
            }
            Event::Eof => return Err(ReportError::UnclosedTestCase),
            _ => {}
        }
        buf.clear();
    }
}

/// Set the status from a test case's first child; true when its text is a stack trace.
fn apply_status(element: &BytesStart<'_>, result: &mut UnitTestResult) -> Result<bool, ReportError> {
    let status = match element.local_name().as_ref() {
        b"skipped" => {
            result.status = TestStatus::Skipped;
            // surefire reports bogus times for skipped tests
            result.duration_ms = 0;
            return Ok(false);
        }
        b"failure" => TestStatus::Failure,
        b"error" => TestStatus::Error,
        _ => return Ok(false),
    };
    result.status = status;
    result.message = attribute(element, "message")?;
    Ok(true)
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Result<Option<String>, ReportError> {
    match element.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

/// Parameterized cases (`classname="Foo(1)"`) are cut at the parenthesis; a blank class name
/// falls back to the suite.
fn class_name(classname: Option<&str>, suite: &str) -> String {
    let mut name = classname.unwrap_or_default();
    if name.ends_with(')') {
        if let Some(open) = name.find('(') {
            name = &name[..open];
        }
    }
    if name.trim().is_empty() {
        suite.to_string()
    } else {
        name.to_string()
    }
}

fn test_name(classname: Option<&str>, name: &str) -> String {
    match classname.and_then(|classname| classname.split_once('$')) {
        Some((_, inner)) => format!("{inner}/{name}"),
        None => name.to_string(),
    }
}

/// `time` is in seconds with `.` as decimal separator and optional `,` grouping.
fn duration_ms(time: Option<&str>) -> Result<u64, ReportError> {
    let Some(raw) = time else {
        return Ok(0);
    };
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    let seconds: f64 = cleaned
        .parse()
        .map_err(|_| ReportError::InvalidTime(raw.to_string()))?;
    if seconds.is_nan() {
        return Ok(0);
    }
    let millis = (seconds * 1000.0 * 1000.0).round() / 1000.0;
    Ok(millis as u64)
}
