//! Free-text sanitization for ISO 20022 text fields.
//!
//! Reserved XML characters are left alone here; the XML writer escapes
//! them as entities on output.

/// `Max140Text`: unstructured remittance information.
pub const MAX_REMITTANCE_LEN: usize = 140;

/// `Max70Text`: party names.
pub const MAX_NAME_LEN: usize = 70;

/// `Max35Text`: message, payment-info, end-to-end and mandate identifiers.
pub const MAX_ID_LEN: usize = 35;

/// Trim, replace control characters with spaces and truncate to `max_chars`.
///
/// Truncation counts Unicode scalar values, never splitting a character.
pub fn sanitize_text(input: &str, max_chars: usize) -> String {
    let cleaned: String = input
        .trim()
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .take(max_chars)
        .collect();
    cleaned.trim_end().to_string()
}

/// Sanitize remittance text to at most 140 characters.
pub fn sanitize_remittance(input: &str) -> String {
    sanitize_text(input, MAX_REMITTANCE_LEN)
}
