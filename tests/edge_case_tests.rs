//! Edge cases around identifiers, dates and document inspection.

#![cfg(feature = "xml")]

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal_macros::dec;
use zahlung::core::*;
use zahlung::pain;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn created() -> NaiveDateTime {
    date(2024, 6, 15).and_hms_opt(9, 0, 0).unwrap()
}

#[test]
fn iban_with_letters_in_bban() {
    let iban = validate_iban("FR14 2004 1010 0505 0001 3M02 606").unwrap();
    assert_eq!(iban.as_str(), "FR1420041010050500013M02606");
    assert_eq!(iban.bban(), "20041010050500013M02606");
}

#[test]
fn shortest_and_longest_registered_ibans() {
    assert!(validate_iban("NO9386011117947").is_ok());
    assert_eq!(countries::iban_length("NO"), Some(15));
    assert!(countries::iban_length("MT").unwrap() > 30);
}

#[test]
fn german_iban_with_letters_rejected() {
    assert!(matches!(
        validate_iban("DE89370400440532O13000"),
        Err(SepaError::Format { .. })
    ));
}

#[test]
fn german_zero_account() {
    let iban = construct_german_iban("10000000", "0").unwrap();
    assert_eq!(iban.as_str(), "DE77100000000000000000");
    assert_eq!(iban.account_number(), Some("0"));
}

#[test]
fn bic_outside_sepa_rejected() {
    assert!(validate_bic("CITIUS33").is_err());
    assert!(validate_bic("DEUTDEFF").is_ok());
}

#[test]
fn bic_with_lowercase_and_spaces() {
    let bic = validate_bic(" cobadeff xxx ").unwrap();
    assert_eq!(bic.as_str(), "COBADEFFXXX");
    assert_eq!(Bic::parse("COBADEFF").unwrap().to_bic11(), "COBADEFFXXX");
}

#[test]
fn mandate_signed_on_creation_day_is_accepted() {
    let mut msg = SepaMessage::with_creation_time("MSG-1", "ACME GmbH", created()).unwrap();
    let block = msg
        .add_payment_info(
            PaymentInfoBuilder::direct_debit(
                "PMT-1",
                "ACME GmbH",
                "DE89370400440532013000",
                date(2024, 7, 1),
                "DE98ZZZ09999999999",
                "FRST",
            )
            .build(),
        )
        .unwrap();
    msg.add_transaction(
        block,
        TransactionBuilder::new("E1", dec!(10), "Kunde", "NL91ABNA0417164300")
            .mandate("MND-1", date(2024, 6, 15))
            .build(),
    )
    .unwrap();
    let tomorrow = TransactionBuilder::new("E2", dec!(10), "Kunde", "NL91ABNA0417164300")
        .mandate("MND-2", date(2024, 6, 16))
        .build();
    assert!(matches!(msg.add_transaction(block, tomorrow), Err(SepaError::State(_))));
}

#[test]
fn overlong_identifiers_rejected() {
    let long = "X".repeat(36);
    let mut msg = SepaMessage::with_creation_time("MSG-1", "ACME GmbH", created()).unwrap();
    assert!(matches!(
        msg.add_payment_info(
            PaymentInfoBuilder::credit_transfer(&long, "ACME GmbH", "DE89370400440532013000", date(2024, 7, 1))
                .build()
        ),
        Err(SepaError::State(_))
    ));
    let block = msg
        .add_payment_info(
            PaymentInfoBuilder::credit_transfer("PMT-1", "ACME GmbH", "DE89370400440532013000", date(2024, 7, 1))
                .build(),
        )
        .unwrap();
    let tx = TransactionBuilder::new(&long, dec!(1), "Kunde", "NL91ABNA0417164300").build();
    assert!(matches!(msg.add_transaction(block, tx), Err(SepaError::State(_))));
}

#[test]
fn currency_must_be_iso_code() {
    let mut msg = SepaMessage::with_creation_time("MSG-1", "ACME GmbH", created()).unwrap();
    let block = msg
        .add_payment_info(
            PaymentInfoBuilder::credit_transfer("PMT-1", "ACME GmbH", "DE89370400440532013000", date(2024, 7, 1))
                .build(),
        )
        .unwrap();
    let tx = TransactionBuilder::new("E1", dec!(1), "Kunde", "NL91ABNA0417164300")
        .currency("euro")
        .build();
    assert!(matches!(msg.add_transaction(block, tx), Err(SepaError::Format { .. })));
}

#[test]
fn control_characters_in_remittance() {
    let mut msg = SepaMessage::with_creation_time("MSG-1", "ACME GmbH", created()).unwrap();
    let block = msg
        .add_payment_info(
            PaymentInfoBuilder::credit_transfer("PMT-1", "ACME GmbH", "DE89370400440532013000", date(2024, 7, 1))
                .build(),
        )
        .unwrap();
    msg.add_transaction(
        block,
        TransactionBuilder::new("E1", dec!(1), "Kunde", "NL91ABNA0417164300")
            .remittance_info("Zeile 1\nZeile 2\t")
            .build(),
    )
    .unwrap();
    let xml = msg.to_xml().unwrap();
    assert!(xml.contains("<Ustrd>Zeile 1 Zeile 2</Ustrd>"));
}

#[test]
fn whitespace_only_remittance_is_omitted() {
    let mut msg = SepaMessage::with_creation_time("MSG-1", "ACME GmbH", created()).unwrap();
    let block = msg
        .add_payment_info(
            PaymentInfoBuilder::credit_transfer("PMT-1", "ACME GmbH", "DE89370400440532013000", date(2024, 7, 1))
                .build(),
        )
        .unwrap();
    msg.add_transaction(
        block,
        TransactionBuilder::new("E1", dec!(1), "Kunde", "NL91ABNA0417164300")
            .remittance_info("   ")
            .build(),
    )
    .unwrap();
    assert!(!msg.to_xml().unwrap().contains("<RmtInf>"));
}

#[test]
fn many_blocks_share_one_header() {
    let mut msg = SepaMessage::with_creation_time("MSG-1", "ACME GmbH", created()).unwrap();
    for i in 0..5 {
        let block = msg
            .add_payment_info(
                PaymentInfoBuilder::credit_transfer(
                    format!("PMT-{i}"),
                    "ACME GmbH",
                    "DE89370400440532013000",
                    date(2024, 7, 1),
                )
                .build(),
            )
            .unwrap();
        msg.add_transaction(
            block,
            TransactionBuilder::new(format!("E-{i}"), dec!(0.10), "Kunde", "NL91ABNA0417164300").build(),
        )
        .unwrap();
    }
    let xml = msg.to_xml().unwrap();
    assert_eq!(xml.matches("<GrpHdr>").count(), 1);
    assert_eq!(xml.matches("<PmtInf>").count(), 5);
    assert!(xml.contains("<CtrlSum>0.50</CtrlSum>"));
    assert!(pain::inspect_document(&xml).is_valid());
}

// --- Inspection of foreign documents ---

#[test]
fn inspect_rejects_other_root() {
    let report = pain::inspect_document(
        r#"<Invoice xmlns="urn:oasis:names:specification:ubl:schema:xsd:Invoice-2"/>"#,
    );
    assert!(!report.is_valid());
    assert!(report.problems.iter().any(|p| p.field == "Document"));
}

#[test]
fn inspect_detects_count_mismatch() {
    let xml = r#"<Document xmlns="urn:iso:std:iso:20022:tech:xsd:pain.008.001.08">
  <CstmrDrctDbtInitn>
    <GrpHdr>
      <MsgId>MSG-1</MsgId>
      <NbOfTxs>2</NbOfTxs>
      <CtrlSum>5.00</CtrlSum>
    </GrpHdr>
    <PmtInf>
      <DrctDbtTxInf><InstdAmt Ccy="EUR">5.00</InstdAmt></DrctDbtTxInf>
    </PmtInf>
  </CstmrDrctDbtInitn>
</Document>"#;
    let report = pain::inspect_document(xml);
    assert_eq!(report.kind, Some(PaymentMethod::DirectDebit));
    assert!(report.problems.iter().any(|p| p.field == "GrpHdr.NbOfTxs"));
}

#[test]
fn inspect_bad_control_sum_text() {
    let xml = r#"<Document xmlns="urn:iso:std:iso:20022:tech:xsd:pain.001.001.09">
  <CstmrCdtTrfInitn>
    <GrpHdr>
      <MsgId>MSG-1</MsgId>
      <CtrlSum>zwölf</CtrlSum>
    </GrpHdr>
  </CstmrCdtTrfInitn>
</Document>"#;
    let report = pain::inspect_document(xml);
    let ctrl: Vec<_> = report
        .problems
        .iter()
        .filter(|p| p.field == "GrpHdr.CtrlSum")
        .collect();
    assert_eq!(ctrl.len(), 1);
    assert!(ctrl[0].message.contains("not a decimal"));
}

#[test]
fn inspect_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        pain::inspect_file(dir.path().join("absent.xml")),
        Err(SepaError::Io(_))
    ));
}
