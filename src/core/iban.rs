//! IBAN normalization and validation (ISO 13616, ISO 7064 MOD 97-10).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::countries;
use super::error::SepaError;

/// A validated, normalized IBAN in electronic format (e.g. "DE89370400440532013000").
///
/// The only way to obtain an `Iban` is through validation, so holding one
/// guarantees a known country, the registry length and a correct checksum.
///
/// ```
/// use zahlung::core::Iban;
///
/// let iban: Iban = "de89 3704 0044 0532 0130 00".parse().unwrap();
/// assert_eq!(iban.as_str(), "DE89370400440532013000");
/// assert_eq!(iban.bank_code(), Some("37040044"));
/// assert_eq!(iban.formatted(), "DE89 3704 0044 0532 0130 00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iban(String);

impl Iban {
    /// Validate `input` and return the normalized IBAN.
    pub fn parse(input: &str) -> Result<Self, SepaError> {
        validate_iban(input)
    }

    /// Electronic format, no spaces.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// ISO 3166-1 alpha-2 country code.
    pub fn country_code(&self) -> &str {
        &self.0[..2]
    }

    pub fn check_digits(&self) -> &str {
        &self.0[2..4]
    }

    /// Basic Bank Account Number (everything after the check digits).
    pub fn bban(&self) -> &str {
        &self.0[4..]
    }

    /// German bank code (Bankleitzahl). `None` for non-German IBANs.
    pub fn bank_code(&self) -> Option<&str> {
        (self.country_code() == "DE").then(|| &self.bban()[..8])
    }

    /// German account number without leading zeros. `None` for non-German IBANs.
    pub fn account_number(&self) -> Option<&str> {
        if self.country_code() != "DE" {
            return None;
        }
        let account = &self.bban()[8..];
        let trimmed = account.trim_start_matches('0');
        Some(if trimmed.is_empty() {
            &account[account.len() - 1..]
        } else {
            trimmed
        })
    }

    /// Print format: groups of four separated by a space.
    pub fn formatted(&self) -> String {
        group_by_four(&self.0)
    }
}

impl fmt::Display for Iban {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Iban {
    type Err = SepaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_iban(s)
    }
}

impl TryFrom<String> for Iban {
    type Error = SepaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_iban(&value)
    }
}

impl From<Iban> for String {
    fn from(iban: Iban) -> Self {
        iban.0
    }
}

impl AsRef<str> for Iban {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strip all whitespace and upper-case the input.
pub fn normalize_iban(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Validate an IBAN: characters, country, registry length, then the mod-97 checksum.
///
/// Returns the normalized [`Iban`] on success. Structural problems are
/// [`SepaError::Format`]; a well-formed IBAN with wrong check digits is
/// [`SepaError::Checksum`].
pub fn validate_iban(input: &str) -> Result<Iban, SepaError> {
    let iban = normalize_iban(input);

    if iban.is_empty() {
        return Err(SepaError::format("iban", "IBAN must not be empty"));
    }
    if let Some(c) = iban.chars().find(|c| !c.is_ascii_uppercase() && !c.is_ascii_digit()) {
        return Err(SepaError::format(
            "iban",
            format!("IBAN contains invalid character '{c}'"),
        ));
    }
    if iban.len() < 4 {
        return Err(SepaError::format(
            "iban",
            format!("IBAN '{iban}' is too short"),
        ));
    }

    let country = &iban[..2];
    let Some(expected_len) = countries::iban_length(country) else {
        return Err(SepaError::format(
            "iban",
            format!("unknown IBAN country code '{country}'"),
        ));
    };
    if iban.len() != expected_len {
        return Err(SepaError::format(
            "iban",
            format!(
                "IBAN for {country} must have {expected_len} characters, got {}",
                iban.len()
            ),
        ));
    }
    if !iban[2..4].bytes().all(|b| b.is_ascii_digit()) {
        return Err(SepaError::format(
            "iban",
            "IBAN check digits must be numeric",
        ));
    }
    // German BBANs are Bankleitzahl (8) + Kontonummer (10), digits only.
    if country == "DE" && !iban[4..].bytes().all(|b| b.is_ascii_digit()) {
        return Err(SepaError::format("iban", "German BBAN must be numeric"));
    }

    let rearranged = iban[4..].bytes().chain(iban[..4].bytes());
    if mod97(rearranged) != 1 {
        return Err(SepaError::checksum(
            "iban",
            format!("IBAN '{iban}' fails the mod-97 check"),
        ));
    }

    Ok(Iban(iban))
}

/// ISO 7064 MOD 97-10 remainder of an alphanumeric string.
///
/// Letters expand to two digits (A=10 … Z=35). The number is reduced one
/// digit group at a time, so arbitrarily long inputs never overflow.
/// Input must be `[0-9A-Z]`.
pub(crate) fn mod97(chars: impl IntoIterator<Item = u8>) -> u32 {
    chars.into_iter().fold(0u32, |rem, b| match b {
        b'0'..=b'9' => (rem * 10 + u32::from(b - b'0')) % 97,
        _ => (rem * 100 + u32::from(b - b'A') + 10) % 97,
    })
}

/// Check digits `98 - (payload + country + "00") mod 97`, zero-padded.
pub(crate) fn compute_check_digits(payload: &str, country: &str) -> String {
    let rem = mod97(payload.bytes().chain(country.bytes()).chain(*b"00"));
    format!("{:02}", 98 - rem)
}

fn group_by_four(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 4);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}
