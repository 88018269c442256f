//! SEPA creditor identifier (Gläubiger-Identifikationsnummer) validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::countries;
use super::error::SepaError;
use super::iban::{compute_check_digits, normalize_iban};

/// Maximum length of a creditor identifier (`Max35Text`).
const MAX_LEN: usize = 35;

/// A validated creditor scheme identifier, e.g. "DE98ZZZ09999999999".
///
/// Layout: country (2) + check digits (2) + creditor business code (3) +
/// national identifier. The business code is not part of the checksum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CreditorId(String);

impl CreditorId {
    pub fn parse(input: &str) -> Result<Self, SepaError> {
        validate_creditor_id(input)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn country_code(&self) -> &str {
        &self.0[..2]
    }

    /// Creditor business code ("ZZZ" when unused).
    pub fn business_code(&self) -> &str {
        &self.0[4..7]
    }

    pub fn national_id(&self) -> &str {
        &self.0[7..]
    }
}

impl fmt::Display for CreditorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CreditorId {
    type Error = SepaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_creditor_id(&value)
    }
}

impl From<CreditorId> for String {
    fn from(id: CreditorId) -> Self {
        id.0
    }
}

pub fn normalize_creditor_id(input: &str) -> String {
    normalize_iban(input)
}

/// Validate a creditor identifier and return its normalized form.
pub fn validate_creditor_id(input: &str) -> Result<CreditorId, SepaError> {
    let id = normalize_creditor_id(input);

    if id.is_empty() {
        return Err(SepaError::format("creditor_id", "creditor id must not be empty"));
    }
    if id.chars().count() > MAX_LEN {
        return Err(SepaError::format(
            "creditor_id",
            format!("creditor id must not exceed {MAX_LEN} characters"),
        ));
    }
    if let Some(c) = id.chars().find(|c| !c.is_ascii_uppercase() && !c.is_ascii_digit()) {
        return Err(SepaError::format(
            "creditor_id",
            format!("creditor id contains invalid character '{c}'"),
        ));
    }
    if id.len() < 8 {
        return Err(SepaError::format(
            "creditor_id",
            format!("creditor id '{id}' is too short"),
        ));
    }
    let country = &id[..2];
    if !countries::is_sepa_country(country) {
        return Err(SepaError::format(
            "creditor_id",
            format!("creditor id country '{country}' is not a SEPA country"),
        ));
    }
    if !id[2..4].bytes().all(|b| b.is_ascii_digit()) {
        return Err(SepaError::format(
            "creditor_id",
            "creditor id check digits must be numeric",
        ));
    }

    let expected = compute_check_digits(&id[7..], country);
    if expected != id[2..4] {
        return Err(SepaError::checksum(
            "creditor_id",
            format!("creditor id '{id}' fails the mod-97 check"),
        ));
    }

    Ok(CreditorId(id))
}
