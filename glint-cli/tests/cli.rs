use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let main = dir.path().join("src/main/groovy");
    let test = dir.path().join("src/test/groovy");
    fs::create_dir_all(&main).unwrap();
    fs::create_dir_all(&test).unwrap();
    fs::write(
        main.join("App.groovy"),
        "// licence\npackage app\n\n/**\n * Entry point\n */\nclass App {\n  def run() { 1 }\n}\n",
    )
    .unwrap();
    fs::write(
        test.join("AppSpec.groovy"),
        "class AppSpec {\n  def 'runs'() { expect: new App().run() == 1 }\n}\n",
    )
    .unwrap();
    dir
}

fn source(dir: &Path) -> String {
    dir.join("src/main/groovy/App.groovy").display().to_string()
}

#[test]
fn summary_for_a_project() {
    let dir = project();
    let mut cmd = cargo_bin_cmd!("glint");
    cmd.arg(dir.path());

    cmd.assert().success().stdout(
        predicate::str::contains("2 files analyzed, 0 failed, 0 abandoned")
            .and(predicate::str::contains("App.groovy: ncloc=4 comments=1"))
            .and(predicate::str::contains("total: ncloc=7 comments=1")),
    );
}

#[test]
fn include_headers_counts_the_licence() {
    let dir = project();
    let mut cmd = cargo_bin_cmd!("glint");
    cmd.arg(source(dir.path())).arg("--include-headers");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("App.groovy: ncloc=4 comments=2"));
}

#[test]
fn json_output_skips_cpd_tokens_for_tests() {
    let dir = project();
    let mut cmd = cargo_bin_cmd!("glint");
    cmd.arg(dir.path()).arg("--format").arg("json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let files = value["files"].as_object().unwrap();
    assert_eq!(files.len(), 2);
    for (file, report) in files {
        assert!(report["highlighting"].is_array());
        assert_eq!(report["cpd_tokens"].is_array(), !file.ends_with("AppSpec.groovy"));
    }
}

#[test]
fn lex_failures_do_not_fail_the_run() {
    let dir = project();
    fs::write(dir.path().join("Broken.groovy"), "def x = `nope`\n").unwrap();
    let mut cmd = cargo_bin_cmd!("glint");
    cmd.arg(dir.path());

    cmd.assert().success().stdout(
        predicate::str::contains("2 files analyzed, 1 failed")
            .and(predicate::str::contains("Broken.groovy (lex)")),
    );
}

#[test]
fn complexity_results_are_folded_in() {
    let dir = project();
    let results = dir.path().join("complexity.json");
    let classes = serde_json::json!([
        {
            "name": "app.App",
            "methods": ["run", "main"],
            "metrics": [{"name": "CyclomaticComplexity", "values": {"total": 3}}]
        }
    ]);
    let body = serde_json::Value::Object([(source(dir.path()), classes)].into_iter().collect());
    fs::write(&results, body.to_string()).unwrap();

    let mut cmd = cargo_bin_cmd!("glint");
    cmd.arg(source(dir.path())).arg("--complexity").arg(&results);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("classes=1 functions=2 complexity=3"));
}

#[test]
fn surefire_reports_are_summarized() {
    let dir = project();
    let reports = dir.path().join("target/test-results");
    fs::create_dir_all(&reports).unwrap();
    fs::write(
        reports.join("TEST-app.AppSpec.xml"),
        r#"<testsuite name="app.AppSpec"><testcase classname="app.AppSpec" name="runs" time="0.25"/></testsuite>"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("glint");
    cmd.arg(source(dir.path())).arg("--surefire").arg(&reports);

    cmd.assert().success().stdout(predicate::str::contains(
        "tests: classes=1 tests=1 failures=0 errors=0 skipped=0 duration_ms=250",
    ));
}

#[test]
fn surefire_directory_with_spaces() {
    let dir = project();
    let reports = dir.path().join("build/test results");
    fs::create_dir_all(&reports).unwrap();
    fs::write(
        reports.join("TEST-app.AppSpec.xml"),
        r#"<testsuite name="app.AppSpec"><testcase classname="app.AppSpec" name="runs"/></testsuite>"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("glint");
    cmd.arg(source(dir.path())).arg("--surefire").arg(&reports);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("tests: classes=1 tests=1"));
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = project();
    let mut cmd = cargo_bin_cmd!("glint");
    cmd.arg(dir.path())
        .arg("--config")
        .arg(dir.path().join("missing.toml"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("configuration error"));
}

#[test]
fn unknown_format_is_rejected() {
    let mut cmd = cargo_bin_cmd!("glint");
    cmd.arg(".").arg("--format").arg("xml");

    cmd.assert().failure();
}
