//! Tests for the `article-schema` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn cli() -> Command {
    Command::cargo_bin("article-schema").unwrap()
}

#[test]
fn test_normalize_prints_canonical_markup() {
    let expected = fs::read_to_string(fixture("article.canonical.xhtml")).unwrap();

    cli()
        .arg("normalize")
        .arg(fixture("article.xhtml"))
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_normalize_is_stable_on_canonical_markup() {
    let canonical = fs::read_to_string(fixture("article.canonical.xhtml")).unwrap();

    cli()
        .arg("normalize")
        .arg(fixture("article.canonical.xhtml"))
        .assert()
        .success()
        .stdout(canonical);
}

#[test]
fn test_normalize_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.xhtml");

    cli()
        .arg("normalize")
        .arg(fixture("article.xhtml"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved to:"));

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("<h2>Spring update</h2>"));
}

#[test]
fn test_decode_prints_json() {
    cli()
        .arg("decode")
        .arg(fixture("article.xhtml"))
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type": "doc""#))
        .stdout(predicate::str::contains(r#""source_id": "abc""#));
}

#[test]
fn test_encode_json_document() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("doc.json");
    fs::write(
        &input,
        r#"{"type": "doc", "content": [{"type": "horizontal_rule", "attrs": {"style": "4"}}]}"#,
    )
    .unwrap();

    cli()
        .arg("encode")
        .arg(&input)
        .assert()
        .success()
        .stdout("<hr data-style=\"4\"/>\n");
}

#[test]
fn test_encode_excluded_mark_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("doc.json");
    fs::write(
        &input,
        r#"{"type": "doc", "content": [{"type": "paragraph", "content": [
            {"type": "text", "text": "x", "marks": [{"type": "em"}]}
        ]}]}"#,
    )
    .unwrap();

    cli()
        .arg("encode")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown mark type 'em'"));

    cli()
        .arg("encode")
        .arg(&input)
        .arg("--config")
        .arg(fixture("all_marks.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("<em>x</em>"));
}

#[test]
fn test_check_reports_invalid_content() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("doc.json");
    fs::write(&input, r#"{"type": "doc"}"#).unwrap();

    cli()
        .arg("check")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid content for 'doc'"));
}

#[test]
fn test_catalog_lists_active_types() {
    cli()
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("table_header"))
        .stdout(predicate::str::contains("underline"))
        .stdout(predicate::str::contains("font_size").not());

    cli()
        .args(["catalog", "--config"])
        .arg(fixture("all_marks.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("font_size"));
}

#[test]
fn test_missing_input_file() {
    cli()
        .args(["normalize", "/nonexistent/article.xhtml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}
