//! German IBAN derivation from Bankleitzahl and Kontonummer.

use super::error::SepaError;
use super::iban::{Iban, compute_check_digits, validate_iban};

/// Derive a German IBAN from an 8-digit BLZ and an account number of up to 10 digits.
///
/// The account number is left-padded with zeros. This performs the plain
/// ISO 13616 conversion; bank-specific IBAN rules (account number
/// substitutions some German banks publish) are not applied.
///
/// ```
/// use zahlung::core::construct_german_iban;
///
/// let iban = construct_german_iban("37040044", "532013000").unwrap();
/// assert_eq!(iban.as_str(), "DE89370400440532013000");
/// assert_eq!(iban.formatted(), "DE89 3704 0044 0532 0130 00");
/// ```
pub fn construct_german_iban(blz: &str, account: &str) -> Result<Iban, SepaError> {
    let blz = blz.trim();
    let account = account.trim();

    if blz.len() != 8 || !blz.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SepaError::range(
            "blz",
            format!("Bankleitzahl must be exactly 8 digits, got '{blz}'"),
        ));
    }
    if account.is_empty() || !account.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SepaError::range(
            "account",
            format!("account number must be digits only, got '{account}'"),
        ));
    }
    if account.len() > 10 {
        return Err(SepaError::range(
            "account",
            format!("account number must have at most 10 digits, got {}", account.len()),
        ));
    }

    let bban = format!("{blz}{account:0>10}");
    let check = compute_check_digits(&bban, "DE");
    validate_iban(&format!("DE{check}{bban}"))
}
