//! BIC (ISO 9362) normalization and structural validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::countries;
use super::error::SepaError;
use super::iban::normalize_iban;

/// A validated BIC, stored as entered (8 or 11 characters, upper-case).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bic(String);

impl Bic {
    pub fn parse(input: &str) -> Result<Self, SepaError> {
        validate_bic(input)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Institution code (characters 1–4).
    pub fn bank_code(&self) -> &str {
        &self.0[..4]
    }

    /// Country code (characters 5–6).
    pub fn country_code(&self) -> &str {
        &self.0[4..6]
    }

    /// Location code (characters 7–8).
    pub fn location_code(&self) -> &str {
        &self.0[6..8]
    }

    /// Branch code (characters 9–11), "XXX" for the 8-character form.
    pub fn branch_code(&self) -> &str {
        if self.0.len() == 11 { &self.0[8..] } else { "XXX" }
    }

    /// The 11-character form, with "XXX" appended to 8-character BICs.
    pub fn to_bic11(&self) -> String {
        format!("{}{}", &self.0[..8], self.branch_code())
    }
}

impl fmt::Display for Bic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Bic {
    type Err = SepaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_bic(s)
    }
}

impl TryFrom<String> for Bic {
    type Error = SepaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_bic(&value)
    }
}

impl From<Bic> for String {
    fn from(bic: Bic) -> Self {
        bic.0
    }
}

impl AsRef<str> for Bic {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strip whitespace and upper-case.
pub fn normalize_bic(input: &str) -> String {
    normalize_iban(input)
}

/// Validate a BIC and return its normalized form.
pub fn validate_bic(input: &str) -> Result<Bic, SepaError> {
    let bic = normalize_bic(input);

    if bic.len() != 8 && bic.len() != 11 {
        return Err(SepaError::format(
            "bic",
            format!("BIC must have 8 or 11 characters, got {}", bic.chars().count()),
        ));
    }
    if !bic.is_ascii() {
        return Err(SepaError::format("bic", "BIC must be ASCII"));
    }
    if !bic[..4].bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(SepaError::format(
            "bic",
            format!("BIC bank code '{}' must be letters", &bic[..4]),
        ));
    }
    let country = &bic[4..6];
    if !countries::is_sepa_country(country) {
        return Err(SepaError::format(
            "bic",
            format!("BIC country code '{country}' is not a SEPA country"),
        ));
    }
    if !bic[6..8].bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(SepaError::format(
            "bic",
            format!("BIC location code '{}' must be alphanumeric", &bic[6..8]),
        ));
    }
    if !bic[8..].bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(SepaError::format(
            "bic",
            format!("BIC branch code '{}' must be alphanumeric", &bic[8..]),
        ));
    }

    Ok(Bic(bic))
}
