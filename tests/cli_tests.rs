//! End-to-end runs of the `zahlung` binary.
//!
//! Run with: `cargo test --features cli --test cli_tests`

#![cfg(feature = "cli")]

use std::path::Path;
use std::process::{Command, Output};

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use zahlung::core::*;
use zahlung::pain;

fn zahlung(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_zahlung"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write_transfer(path: &Path) {
    let mut msg = SepaMessage::new("MSG-CLI-001", "ACME GmbH").unwrap();
    let block = msg
        .add_payment_info(
            PaymentInfoBuilder::credit_transfer(
                "PMT-CLI-001",
                "ACME GmbH",
                "DE89370400440532013000",
                NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            )
            .build(),
        )
        .unwrap();
    msg.add_transaction(
        block,
        TransactionBuilder::new("RE-1", dec!(250.00), "Lieferant GmbH", "NL91ABNA0417164300").build(),
    )
    .unwrap();
    msg.to_file(path).unwrap();
}

fn batch_json(records: &str) -> String {
    format!(
        r#"{{
  "msg_id": "BATCH-2024-07",
  "kind": "credit_transfer",
  "date": "2024-07-01",
  "config": {{
    "name": "ACME GmbH",
    "iban": "DE89 3704 0044 0532 0130 00",
    "bic": "COBADEFFXXX"
  }},
  "records": [{records}]
}}"#
    )
}

const GOOD_RECORD: &str = r#"{
    "name": "Lieferant GmbH",
    "iban": "NL91ABNA0417164300",
    "amount": "1190.00",
    "remittance_info": "Rechnung RE-4711",
    "invoice_number": "RE-4711"
  }"#;

const BAD_IBAN_RECORD: &str = r#"{
    "name": "Kunde AG",
    "iban": "DE89370400440532013001",
    "amount": "50.00",
    "invoice_number": "RE-4712"
  }"#;

const BAD_AMOUNT_RECORD: &str = r#"{
    "name": "Kunde AG",
    "iban": "NL91ABNA0417164300",
    "amount": "-5.00",
    "invoice_number": "RE-4713"
  }"#;

// --- validate ---

#[test]
fn validate_accepts_generated_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pain001.xml");
    write_transfer(&path);

    let output = zahlung(&["--validate", path.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stdout(&output));
    let out = stdout(&output);
    assert!(out.contains("OK: pain.001 credit transfer 'MSG-CLI-001'"), "{out}");
    assert!(out.contains("control sum 250.00"), "{out}");
}

#[test]
fn validate_rejects_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.xml");
    std::fs::write(
        &path,
        r#"<Document xmlns="urn:iso:std:iso:20022:tech:xsd:pain.001.001.09"><GrpHdr></Document>"#,
    )
    .unwrap();

    let output = zahlung(&["--validate", path.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("INVALID:"));
}

#[test]
fn validate_rejects_trailing_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pain001.xml");
    write_transfer(&path);
    let mut xml = std::fs::read_to_string(&path).unwrap();
    xml.push_str("trailing garbage");
    std::fs::write(&path, xml).unwrap();

    let output = zahlung(&["--validate", path.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("INVALID:"));
}

#[test]
fn validate_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.xml");
    let output = zahlung(&["--validate", path.to_str().unwrap()]);
    assert!(!output.status.success());
}

// --- generate ---

#[test]
fn generate_skips_bad_records() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("batch.json");
    let output_path = dir.path().join("out.xml");
    std::fs::write(
        &input,
        batch_json(&format!("{GOOD_RECORD}, {BAD_IBAN_RECORD}")),
    )
    .unwrap();

    let output = zahlung(&[
        "generate",
        "--input",
        input.to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", stdout(&output));
    assert!(stdout(&output).contains("1 skipped"));

    let report = pain::inspect_file(&output_path).unwrap();
    assert!(report.is_valid(), "{}", report.status_line());
    assert_eq!(report.msg_id.as_deref(), Some("BATCH-2024-07"));
    assert_eq!(report.number_of_transactions, Some(1));
    assert_eq!(report.control_sum, Some(dec!(1190.00)));

    let xml = std::fs::read_to_string(&output_path).unwrap();
    assert!(xml.contains("<EndToEndId>RE-4711</EndToEndId>"));
    assert!(!xml.contains("RE-4712"));
}

#[test]
fn generate_fails_when_every_record_is_bad() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("batch.json");
    let output_path = dir.path().join("out.xml");
    std::fs::write(
        &input,
        batch_json(&format!("{BAD_IBAN_RECORD}, {BAD_AMOUNT_RECORD}")),
    )
    .unwrap();

    let output = zahlung(&[
        "generate",
        "--input",
        input.to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("2 skipped"));
    assert!(!output_path.exists());
    // only the batch file is left in the directory
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn generate_rejects_unreadable_batch() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("batch.json");
    let output_path = dir.path().join("out.xml");
    std::fs::write(&input, "{ not json").unwrap();

    let output = zahlung(&[
        "generate",
        "--input",
        input.to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(!output_path.exists());
}

// --- bank data ---

#[test]
fn iban_and_de_iban_commands() {
    let output = zahlung(&["iban", "DE89 3704 0044 0532 0130 00"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("BLZ:        37040044"));

    let output = zahlung(&["iban", "DE89370400440532013001"]);
    assert!(!output.status.success());

    let output = zahlung(&["de-iban", "37040044", "532013000"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("DE89370400440532013000"));
}
