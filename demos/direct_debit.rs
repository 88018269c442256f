use chrono::NaiveDate;
use rust_decimal_macros::dec;
use zahlung::core::*;
use zahlung::pain;

fn main() {
    let config = SepaConfigBuilder::new("Sportverein Musterstadt e.V.", "DE89370400440532013000")
        .bic("COBADEFFXXX")
        .creditor_id("DE98ZZZ09999999999")
        .build();

    let mut msg = SepaMessage::new("DD-2024-07", &config.name).unwrap();
    let block = msg
        .add_payment_info(
            config
                .direct_debit("DD-2024-07-RCUR", NaiveDate::from_ymd_opt(2024, 7, 5).unwrap(), "RCUR")
                .unwrap()
                .build(),
        )
        .unwrap();

    // Membership fees from an invoicing export
    let records = vec![
        PaymentRecord {
            name: "Erika Mustermann".into(),
            iban: "DE89 3704 0044 0532 0130 00".into(),
            bic: None,
            amount: dec!(12.50),
            remittance_info: Some("Mitgliedsbeitrag Juli".into()),
            invoice_number: "MB-2024-07-001".into(),
            mandate_id: Some("MANDAT-001".into()),
            mandate_signing_date: NaiveDate::from_ymd_opt(2021, 3, 1),
        },
        PaymentRecord {
            name: "Max Mustermann".into(),
            iban: "DE89370400440532013001".into(),
            bic: None,
            amount: dec!(12.50),
            remittance_info: Some("Mitgliedsbeitrag Juli".into()),
            invoice_number: "MB-2024-07-002".into(),
            mandate_id: Some("MANDAT-002".into()),
            mandate_signing_date: NaiveDate::from_ymd_opt(2022, 9, 15),
        },
    ];

    for record in records {
        let invoice = record.invoice_number.clone();
        match msg.add_transaction(block, record.into()) {
            Ok(()) => println!("  accepted {invoice}"),
            Err(e) => println!("  skipped {invoice}: {e}"),
        }
    }

    let xml = msg.to_xml().unwrap();
    let report = pain::inspect_document(&xml);
    println!("{}", report.status_line());
}
