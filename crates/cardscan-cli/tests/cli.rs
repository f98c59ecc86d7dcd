use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SAMPLE: &str = r#"{
    "blocks": [
        {
            "lines": [
                {"text": "4532 0151 1283 0366", "confidence": 0.95,
                 "cornerPoints": [{"x": 12, "y": 40}, {"x": 260, "y": 40}, {"x": 260, "y": 62}, {"x": 12, "y": 62}],
                 "boundingBox": {"width": 248, "height": 22}},
                {"text": "VALID THRU 09/2031", "confidence": 0.9},
                {"text": "John Smith", "confidence": 0.3}
            ]
        }
    ]
}"#;

fn cardscan() -> Command {
    Command::cargo_bin("cardscan").unwrap()
}

fn write_sample(dir: &TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, SAMPLE).unwrap();
    path
}

#[test]
fn scan_outputs_json() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir, "card.json");

    let output = cardscan().arg("scan").arg(&input).output().unwrap();
    assert!(output.status.success());

    let cards: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let cards = cards.as_array().unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0]["cardNumber"], "4532015112830366");
    assert_eq!(cards[0]["size"]["width"], 248.0);
    assert_eq!(cards[1]["expiryDate"], "09/31");
}

#[test]
fn scan_threshold_override() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir, "card.json");

    cardscan()
        .args(["scan", "--threshold", "0.2", "--format", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Name:    John Smith"));
}

#[test]
fn scan_masked_csv() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir, "card.json");

    cardscan()
        .args(["scan", "--mask", "--format", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("************0366,Visa"))
        .stdout(predicate::str::contains("4532015112830366").not());
}

#[test]
fn scan_missing_file() {
    cardscan()
        .args(["scan", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    write_sample(&dir, "a.json");
    write_sample(&dir, "b.json");
    let out = dir.path().join("out");

    let pattern = dir.path().join("*.json");
    cardscan()
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .arg("--output-dir")
        .arg(&out)
        .arg("--summary")
        .assert()
        .success();

    assert!(out.join("a.cards.json").exists());
    assert!(out.join("b.cards.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,lines_scanned"));
    assert!(summary.contains("a.json,success,2,1,2,1,"));
}

#[test]
fn check_valid_number() {
    cardscan()
        .args(["check", "4532 0151 1283 0366"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**** **** **** 0366"))
        .stdout(predicate::str::contains("Visa"));
}

#[test]
fn check_invalid_number() {
    cardscan()
        .args(["check", "4532015112830367"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Luhn"));
}

#[test]
fn check_expired_card() {
    cardscan()
        .args(["check", "4111111111111111", "--expiry", "01/20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expired"));
}

#[test]
fn config_init_and_get() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    cardscan()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();

    cardscan()
        .arg("--config")
        .arg(&path)
        .args(["config", "set", "extraction.confidence_threshold", "0.75"])
        .assert()
        .success();

    cardscan()
        .arg("--config")
        .arg(&path)
        .args(["config", "get", "extraction.confidence_threshold"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.75"));

    cardscan()
        .arg("--config")
        .arg(&path)
        .args(["config", "set", "extraction.confidence_threshold", "3"])
        .assert()
        .failure();
}
