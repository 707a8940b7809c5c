use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn iso_amt() -> Command {
    let mut cmd = Command::cargo_bin("iso-amt").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_calc_uses_form_defaults() {
    iso_amt()
        .arg("calc")
        .assert()
        .success()
        .stdout(predicate::str::contains("ISO exercise estimate for 2024 (Single)"))
        .stdout(predicate::str::contains("$21,918.00"))
        .stdout(predicate::str::contains("Standard deduction: $14,600.00"))
        .stdout(predicate::str::contains("Taxable income: $135,400.00"))
        .stdout(predicate::str::contains("Total tax: $25,539.00"));
}

#[test]
fn test_calc_keeps_exponent_before_trailing_text() {
    // 20000 shares: (25 - 5) * 20000 + 150000 = 550000 AMT income
    iso_amt()
        .args(["calc", "--isos", "2e4 shares"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$400,000.00"))
        .stdout(predicate::str::contains("$130,004.00"));
}

#[test]
fn test_calc_with_flags_reports_amt() {
    iso_amt()
        .args(["calc", "--tax-year", "2025", "--filing-status", "MFJ"])
        .args(["--income", "240,000", "--isos", "12000"])
        .args(["--strike", "1.25", "--share-value", "40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(Married Filing Jointly)"))
        .stdout(predicate::str::contains("$159,040.00"))
        .stdout(predicate::str::contains("AMT owed: $122,946.00"));
}

#[test]
fn test_calc_unparsable_income_counts_as_zero() {
    iso_amt()
        .args(["calc", "--income", "lots", "--isos", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Payable tax"))
        .stdout(predicate::str::contains("breakdown").not());
}

#[test]
fn test_calc_rejects_unknown_filing_status() {
    iso_amt()
        .args(["calc", "--filing-status", "QSS"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("QSS"));
}

#[test]
fn test_calc_reads_config_defaults() {
    iso_amt()
        .arg("--config")
        .arg(fixture("config.toml"))
        .arg("calc")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ISO exercise estimate for 2025 (Married Filing Jointly)",
        ));
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[defaults]\ntax_year = \"1999\"\n").unwrap();

    iso_amt()
        .arg("--config")
        .arg(&path)
        .arg("calc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}

#[test]
fn test_batch_writes_csv_to_stdout() {
    iso_amt()
        .arg("batch")
        .arg("--input")
        .arg(fixture("scenarios.csv"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("tax_year,filing_status,income,"))
        .stdout(predicate::str::contains(
            "2024,Single,150000,20000,170000,85700,84300,21918,25539,25539",
        ));
}

#[test]
fn test_batch_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("results.csv");

    iso_amt()
        .arg("batch")
        .arg("--input")
        .arg(fixture("scenarios.csv"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written.lines().count(), 4);
}

#[test]
fn test_batch_missing_file_fails() {
    iso_amt()
        .args(["batch", "--input", "no-such-file.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load scenarios"));
}

#[test]
fn test_tables_for_one_year() {
    iso_amt()
        .args(["tables", "--tax-year", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tax year 2024"))
        .stdout(predicate::str::contains("Tax year 2025").not())
        .stdout(predicate::str::contains("$116,300.00"));
}

#[test]
fn test_log_file_receives_records() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("iso-amt.log");

    iso_amt()
        .args(["--log-level", "debug", "--log-file"])
        .arg(&log)
        .arg("calc")
        .assert()
        .success();

    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(contents.contains("calculated ISO exercise tax"));
}
