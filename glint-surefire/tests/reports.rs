//! Reading surefire documents into the index

use glint_surefire::{ReportError, TestStatus, UnitTestIndex};
use rstest::rstest;
use std::fs;

fn parse(xml: &str) -> UnitTestIndex {
    let mut index = UnitTestIndex::new();
    index.parse_reader(xml.as_bytes()).expect("report should parse");
    index
}

const REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuite name="org.acme.CalculatorSpec" tests="4" failures="1" errors="1" skipped="1">
  <properties>
    <property name="java.version" value="17"/>
  </properties>
  <testcase classname="org.acme.CalculatorSpec" name="adds" time="0.012"/>
  <testcase classname="org.acme.CalculatorSpec" name="divides" time="0.5">
    <failure message="expected 2 but was 3" type="org.spockframework.runtime.ConditionNotSatisfiedError">Condition not satisfied:
at org.acme.CalculatorSpec.divides(CalculatorSpec.groovy:12)</failure>
  </testcase>
  <testcase classname="org.acme.CalculatorSpec" name="overflows" time="1.25">
    <error message="boom" type="java.lang.ArithmeticException"><![CDATA[java.lang.ArithmeticException: boom]]></error>
    <system-out>noise</system-out>
  </testcase>
  <testcase classname="org.acme.CalculatorSpec" name="later" time="3.0">
    <skipped/>
  </testcase>
</testsuite>
"#;

#[test]
fn test_full_report() {
    let index = parse(REPORT);
    assert_eq!(index.len(), 1);

    let report = index.get("org.acme.CalculatorSpec").unwrap();
    assert_eq!(report.tests, 4);
    assert_eq!(
        (report.failures, report.errors, report.skipped),
        (1, 1, 1)
    );
    assert_eq!(report.duration_ms, 12 + 500 + 1250);

    let statuses: Vec<_> = report.results.iter().map(|result| result.status).collect();
    assert_eq!(
        statuses,
        vec![
            TestStatus::Ok,
            TestStatus::Failure,
            TestStatus::Error,
            TestStatus::Skipped
        ]
    );

    let failure = &report.results[1];
    assert_eq!(failure.message.as_deref(), Some("expected 2 but was 3"));
    assert!(failure
        .stack_trace
        .as_deref()
        .unwrap()
        .contains("CalculatorSpec.groovy:12"));

    let error = &report.results[2];
    assert_eq!(
        error.stack_trace.as_deref(),
        Some("java.lang.ArithmeticException: boom")
    );
    assert_eq!(report.results[3].duration_ms, 0);
}

#[test]
fn test_inner_class_suite_stops_the_document() {
    let index = parse(
        r#"<testsuites>
  <testsuite name="a.Outer">
    <testcase classname="a.Outer" name="one"/>
  </testsuite>
  <testsuite name="a.Outer$Inner">
    <testcase classname="a.Outer$Inner" name="two"/>
  </testsuite>
  <testsuite name="a.Other">
    <testcase classname="a.Other" name="three"/>
  </testsuite>
</testsuites>"#,
    );

    assert_eq!(index.len(), 1);
    assert_eq!(index.get("a.Outer").unwrap().tests, 1);
}

#[rstest]
#[case::plain("a.B", "works", "a.B", "works")]
#[case::parameterized("a.B(int)", "works", "a.B", "works")]
#[case::inner_class("a.B$C", "works", "a.B$C", "C/works")]
#[case::blank("", "works", "a.Suite", "works")]
fn test_case_naming(
    #[case] classname: &str,
    #[case] name: &str,
    #[case] class_key: &str,
    #[case] test_name: &str,
) {
    let xml = format!(
        r#"<testsuite name="a.Suite"><testcase classname="{classname}" name="{name}" time="0.001"/></testsuite>"#
    );
    let index = parse(&xml);
    let report = index.get(class_key).unwrap();
    assert_eq!(report.results[0].name, test_name);
    assert_eq!(report.duration_ms, 1);
}

#[test]
fn test_only_direct_children_are_indexed() {
    let index = parse(
        r#"<testsuite name="a.S">
  <wrapper><testcase classname="a.Hidden" name="x"/></wrapper>
  <testcase classname="a.S" name="y"/>
</testsuite>"#,
    );
    assert!(index.get("a.Hidden").is_none());
    assert_eq!(index.get("a.S").unwrap().tests, 1);
}

#[test]
fn test_invalid_time_is_an_error() {
    let mut index = UnitTestIndex::new();
    let err = index
        .parse_reader(
            r#"<testsuite name="a.S"><testcase classname="a.S" name="y" time="soon"/></testsuite>"#
                .as_bytes(),
        )
        .unwrap_err();
    assert!(matches!(err, ReportError::InvalidTime(_)));
}

#[test]
fn test_directory_merges_reports() {
    let dir = tempfile::tempdir().unwrap();
    let first = r#"<testsuite name="a.S"><testcase classname="a.S" name="one" time="1"/></testsuite>"#;
    let second = r#"<testsuite name="a.T"><testcase classname="a.S" name="two" time="2"/></testsuite>"#;
    fs::write(dir.path().join("TEST-a.S.xml"), first).unwrap();
    fs::write(dir.path().join("TEST-a.T.xml"), second).unwrap();
    fs::write(dir.path().join("TEST-broken.xml"), "<testsuite name=\"a.S\"><testcase").unwrap();
    fs::write(dir.path().join("summary.xml"), first).unwrap();

    let index = UnitTestIndex::from_dir(dir.path()).unwrap();
    let report = index.get("a.S").unwrap();
    assert_eq!(report.tests, 2);
    assert_eq!(report.duration_ms, 3000);
    assert_eq!(index.len(), 1);
}

#[test]
fn test_missing_directory() {
    let err = UnitTestIndex::from_dir("/nonexistent/surefire-reports").unwrap_err();
    assert!(matches!(err, ReportError::Io { .. }));
}

#[test]
fn test_serializes_by_class() {
    let index = parse(r#"<testsuite name="a.S"><testcase classname="a.S" name="y"/></testsuite>"#);
    let json = serde_json::to_value(&index).unwrap();
    assert_eq!(json["a.S"]["tests"], 1);
    assert_eq!(json["a.S"]["results"][0]["status"], "ok");
}
