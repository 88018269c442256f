use chrono::NaiveDate;
use rust_decimal_macros::dec;
use zahlung::core::*;

fn main() {
    let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();

    // ── 1. Invalid account on the payment block ───────────────────────
    println!("=== Payment Info Error ===");
    let mut msg = SepaMessage::new("MSG-ERR-001", "ACME GmbH").unwrap();
    let result = msg.add_payment_info(
        PaymentInfoBuilder::credit_transfer("PMT-1", "ACME GmbH", "DE89370400440532013001", date).build(),
    );
    if let Err(e) = result {
        println!("  {e} (field: {})", e.field().unwrap_or("-"));
    }

    // ── 2. Transaction errors leave the message untouched ─────────────
    println!("\n=== Transaction Errors ===");
    let block = msg
        .add_payment_info(
            PaymentInfoBuilder::credit_transfer("PMT-1", "ACME GmbH", "DE89370400440532013000", date).build(),
        )
        .unwrap();
    let attempts = [
        TransactionBuilder::new("E1", dec!(-5), "Kunde", "NL91ABNA0417164300").build(),
        TransactionBuilder::new("E2", dec!(10.005), "Kunde", "NL91ABNA0417164300").build(),
        TransactionBuilder::new("E3", dec!(10), "Kunde", "NL91ABNA0417164301").build(),
        TransactionBuilder::new("E4", dec!(10), "", "NL91ABNA0417164300").build(),
    ];
    for request in attempts {
        match msg.add_transaction(block, request) {
            Ok(()) => println!("  accepted"),
            Err(SepaError::Range { field, message }) => println!("  range:    {field}: {message}"),
            Err(SepaError::Checksum { field, message }) => println!("  checksum: {field}: {message}"),
            Err(e) => println!("  other:    {e}"),
        }
    }
    println!(
        "  message still holds {} transaction(s)",
        msg.number_of_transactions()
    );

    // ── 3. Serializing an incomplete message ──────────────────────────
    println!("\n=== Serialization Error ===");
    match msg.to_xml() {
        Ok(_) => println!("  unexpected success"),
        Err(e) => println!("  {e}"),
    }
}
