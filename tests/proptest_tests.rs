//! Property-based tests for identifier checks and message totals.
//!
//! Run with: `cargo test --features all --test proptest_tests`

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use rust_decimal::Decimal;
use zahlung::core::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn created() -> NaiveDateTime {
    date(2024, 6, 15).and_hms_opt(9, 0, 0).unwrap()
}

/// Amounts between 0.01 and 999999999.99 in cents.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..=99_999_999_999i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_blz() -> impl Strategy<Value = String> {
    "[0-9]{8}"
}

fn arb_account() -> impl Strategy<Value = String> {
    "[0-9]{1,10}"
}

proptest! {
    /// Every BLZ/account pair yields an IBAN that passes validation.
    #[test]
    fn german_iban_always_validates(blz in arb_blz(), account in arb_account()) {
        let iban = construct_german_iban(&blz, &account).unwrap();
        prop_assert_eq!(iban.as_str().len(), 22);
        prop_assert!(iban.as_str().starts_with("DE"));
        prop_assert!(validate_iban(iban.as_str()).is_ok());
        prop_assert_eq!(iban.bank_code(), Some(blz.as_str()));
    }

    /// The account number comes back without its zero padding.
    #[test]
    fn german_iban_account_roundtrip(blz in arb_blz(), account in 1u64..=9_999_999_999u64) {
        let iban = construct_german_iban(&blz, &account.to_string()).unwrap();
        let expected = account.to_string();
        prop_assert_eq!(iban.account_number(), Some(expected.as_str()));
    }

    /// Changing any single BBAN digit breaks the checksum.
    #[test]
    fn single_digit_substitution_detected(
        blz in arb_blz(),
        account in arb_account(),
        pos in 4usize..22,
        shift in 1u8..10,
    ) {
        let iban = construct_german_iban(&blz, &account).unwrap();
        let mut bytes = iban.as_str().as_bytes().to_vec();
        bytes[pos] = b'0' + (bytes[pos] - b'0' + shift) % 10;
        let mutated = String::from_utf8(bytes).unwrap();
        prop_assert!(
            matches!(validate_iban(&mutated), Err(SepaError::Checksum { .. })),
            "{} should fail", mutated
        );
    }

    /// Spacing and letter case never change the validation result.
    #[test]
    fn iban_normalization_is_transparent(blz in arb_blz(), account in arb_account()) {
        let iban = construct_german_iban(&blz, &account).unwrap();
        let spaced = iban.formatted().to_lowercase();
        let reparsed = validate_iban(&spaced).unwrap();
        prop_assert_eq!(reparsed, iban);
    }

    /// Arbitrary input never panics the validators.
    #[test]
    fn validators_never_panic(input in "\\PC{0,40}") {
        let _ = validate_iban(&input);
        let _ = validate_bic(&input);
        let _ = validate_creditor_id(&input);
        let _ = sanitize_remittance(&input);
    }

    /// Sanitized text never exceeds its limit.
    #[test]
    fn sanitized_text_respects_limit(input in "\\PC{0,300}", max in 1usize..200) {
        let out = sanitize_text(&input, max);
        prop_assert!(out.chars().count() <= max);
        prop_assert!(!out.chars().any(char::is_control));
    }

    /// Counts and control sums equal the sum over accepted transactions.
    #[test]
    fn control_sum_matches_transactions(amounts in prop::collection::vec(arb_amount(), 1..20)) {
        let mut msg = SepaMessage::with_creation_time("MSG-P", "ACME GmbH", created()).unwrap();
        let block = msg
            .add_payment_info(
                PaymentInfoBuilder::credit_transfer(
                    "PMT-P",
                    "ACME GmbH",
                    "DE89370400440532013000",
                    date(2024, 7, 1),
                )
                .build(),
            )
            .unwrap();
        for (i, amount) in amounts.iter().enumerate() {
            msg.add_transaction(
                block,
                TransactionBuilder::new(format!("E-{i}"), *amount, "Kunde", "NL91ABNA0417164300").build(),
            )
            .unwrap();
        }
        let expected: Decimal = amounts.iter().copied().sum();
        prop_assert_eq!(msg.number_of_transactions(), amounts.len());
        prop_assert_eq!(msg.control_sum(), expected);
        prop_assert_eq!(msg.payment_infos()[0].control_sum(), expected);
        prop_assert!(msg.validate());
    }

    /// Rejected amounts leave the totals untouched.
    #[test]
    fn rejected_amount_changes_nothing(good in arb_amount(), bad in -1_000_000i64..=0i64) {
        let mut msg = SepaMessage::with_creation_time("MSG-P", "ACME GmbH", created()).unwrap();
        let block = msg
            .add_payment_info(
                PaymentInfoBuilder::credit_transfer(
                    "PMT-P",
                    "ACME GmbH",
                    "DE89370400440532013000",
                    date(2024, 7, 1),
                )
                .build(),
            )
            .unwrap();
        msg.add_transaction(block, TransactionBuilder::new("E-1", good, "Kunde", "NL91ABNA0417164300").build())
            .unwrap();
        let result = msg.add_transaction(
            block,
            TransactionBuilder::new("E-2", Decimal::new(bad, 2), "Kunde", "NL91ABNA0417164300").build(),
        );
        prop_assert!(matches!(result, Err(SepaError::Range { .. })), "expected a range error");
        prop_assert_eq!(msg.number_of_transactions(), 1);
        prop_assert_eq!(msg.control_sum(), good);
    }
}
