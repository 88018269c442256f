use chrono::NaiveDate;
use rust_decimal_macros::dec;
use zahlung::core::*;

fn main() {
    let config = SepaConfigBuilder::new("ACME GmbH", "DE89 3704 0044 0532 0130 00")
        .bic("COBADEFFXXX")
        .batch_booking(true)
        .build();

    let mut msg = SepaMessage::new("MSG-2024-06-001", &config.name).unwrap();
    let block = msg
        .add_payment_info(
            config
                .credit_transfer("PMT-2024-06-001", NaiveDate::from_ymd_opt(2024, 7, 1).unwrap())
                .build(),
        )
        .unwrap();

    // ── Supplier payments ───────────────────────────────────────────────
    msg.add_transaction(
        block,
        TransactionBuilder::new("RE-4711", dec!(1190.00), "Lieferant GmbH", "NL91ABNA0417164300")
            .bic("ABNANL2A")
            .remittance_info("Rechnung RE-4711 vom 03.06.2024")
            .build(),
    )
    .unwrap();
    msg.add_transaction(
        block,
        TransactionBuilder::new("RE-4712", dec!(238.50), "Büro & Bedarf KG", "AT611904300234573201")
            .remittance_info("Rechnung RE-4712")
            .build(),
    )
    .unwrap();

    println!(
        "{} transaction(s), control sum {}",
        msg.number_of_transactions(),
        msg.control_sum()
    );

    let xml = msg.to_xml().unwrap();
    println!("{xml}");

    let path = std::env::temp_dir().join("zahlung-pain001.xml");
    msg.to_file(&path).unwrap();
    println!("written to {}", path.display());
}
