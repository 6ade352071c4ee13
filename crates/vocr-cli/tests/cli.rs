use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

const RECEIPT: &str = "Voucher No: 4521
Date: 12/05/2023
Supplier Code: K9
3 x 10.50 = 31.50
2 x 25.00 = 50.00
Gross Total: 81.50
Commission: 1.50
";

/// Temp dir with an empty config so the user's own config is never read.
fn workspace() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.json"), "{}").unwrap();
    dir
}

fn vocr(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vocr").unwrap();
    cmd.current_dir(dir)
        .arg("--config")
        .arg(dir.join("config.json"));
    cmd
}

#[test]
fn parse_text_file_as_json() {
    let dir = workspace();
    fs::write(dir.path().join("receipt.txt"), RECEIPT).unwrap();

    vocr(dir.path())
        .args(["parse", "receipt.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"voucher_no\": \"4521\""))
        .stdout(predicate::str::contains("\"voucher_date\": \"12-05-2023\""))
        .stdout(predicate::str::contains("\"net_total\": \"80.00\""));
}

#[test]
fn parse_stdin_as_text() {
    let dir = workspace();

    vocr(dir.path())
        .args(["parse", "-", "--format", "text"])
        .write_stdin("Commission: 5.00\nUnloading: 3.00\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Supplier: A"))
        .stdout(predicate::str::contains("Deductions: 8.00"))
        .stderr(predicate::str::contains("Could not extract voucher number"));
}

#[test]
fn parse_saves_corrected_text_once() {
    let dir = workspace();
    fs::write(dir.path().join("edited.txt"), RECEIPT.replace("4521", "4522")).unwrap();

    vocr(dir.path())
        .args(["parse", "edited.txt", "--save", "--file-name", "v1.jpg", "--store", "vouchers.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved voucher 1"));

    vocr(dir.path())
        .args(["parse", "edited.txt", "--save", "--file-name", "v1.jpg", "--store", "vouchers.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file already saved: v1.jpg"));

    vocr(dir.path())
        .args(["store", "show", "1", "--store", "vouchers.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4522"));
}

#[test]
fn parse_save_requires_file_name() {
    let dir = workspace();
    fs::write(dir.path().join("edited.txt"), RECEIPT).unwrap();

    vocr(dir.path())
        .args(["parse", "edited.txt", "--save", "--store", "vouchers.json"])
        .assert()
        .failure();
    assert!(!dir.path().join("vouchers.json").exists());
}

#[test]
fn process_with_sidecar_and_save_once() {
    let dir = workspace();
    fs::write(dir.path().join("v1.jpg"), b"jpeg bytes").unwrap();
    fs::write(dir.path().join("v1.jpg.txt"), RECEIPT).unwrap();

    vocr(dir.path())
        .args(["process", "v1.jpg", "--format", "csv", "--save", "--store", "vouchers.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4521,12-05-2023,K9,5,2,81.50,1.50,80.00"))
        .stdout(predicate::str::contains("Saved voucher 1"));

    vocr(dir.path())
        .args(["process", "v1.jpg", "--save", "--store", "vouchers.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file already saved: v1.jpg"));

    vocr(dir.path())
        .args(["store", "list", "--store", "vouchers.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("v1.jpg"))
        .stdout(predicate::str::contains("4521"));

    vocr(dir.path())
        .args(["store", "clear", "--store", "vouchers.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1 vouchers"));
}

#[test]
fn process_missing_transcription_fails() {
    let dir = workspace();
    fs::write(dir.path().join("lonely.png"), b"png").unwrap();

    vocr(dir.path())
        .args(["process", "lonely.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no transcription available"));
}

#[test]
fn process_rejects_unknown_mode() {
    let dir = workspace();
    fs::write(dir.path().join("v.jpg"), b"jpg").unwrap();

    vocr(dir.path())
        .args(["process", "v.jpg", "--mode", "cursive"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown OCR mode"));
}

#[test]
fn batch_writes_summary() {
    let dir = workspace();
    fs::write(dir.path().join("a.txt"), RECEIPT).unwrap();
    fs::write(dir.path().join("b.txt"), "Voucher No: 77\n1 5 5").unwrap();

    vocr(dir.path())
        .args(["batch", "*.txt", "--output-dir", "out", "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful, 0 failed"));

    let summary = fs::read_to_string(dir.path().join("out/summary.csv")).unwrap();
    assert!(summary.contains("a.txt,success,4521"));
    assert!(summary.contains("b.txt,success,77"));
    assert!(dir.path().join("out/a.json").exists());
}

#[test]
fn config_set_and_get() {
    let dir = workspace();

    vocr(dir.path())
        .args(["config", "set", "ocr.mode", "printed"])
        .assert()
        .success();

    vocr(dir.path())
        .args(["config", "get", "ocr.mode"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"printed\""));

    vocr(dir.path())
        .args(["config", "set", "ocr.mode", "cursive"])
        .assert()
        .failure();
}
