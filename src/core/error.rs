use thiserror::Error;

/// Errors that can occur while validating bank data or building a SEPA message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SepaError {
    /// Malformed IBAN, BIC, creditor id or currency code.
    #[error("format error: {field}: {message}")]
    Format { field: String, message: String },

    /// Structurally valid input whose mod-97 check digits do not match.
    #[error("checksum error: {field}: {message}")]
    Checksum { field: String, message: String },

    /// Amount, bank code or account number outside the allowed range.
    #[error("range error: {field}: {message}")]
    Range { field: String, message: String },

    /// Operation not allowed in the current message state.
    #[error("state error: {0}")]
    State(String),

    /// XML generation error.
    #[error("XML error: {0}")]
    Xml(String),

    /// File output error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SepaError {
    pub fn format(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn checksum(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Checksum {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn range(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Range {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn state(message: impl Into<String>) -> Self {
        Self::State(message.into())
    }

    /// Re-label the field of a validator error, e.g. `iban` → `debtor_iban`.
    ///
    /// Errors without a field are returned unchanged.
    pub fn in_field(self, name: impl Into<String>) -> Self {
        match self {
            Self::Format { message, .. } => Self::Format {
                field: name.into(),
                message,
            },
            Self::Checksum { message, .. } => Self::Checksum {
                field: name.into(),
                message,
            },
            Self::Range { message, .. } => Self::Range {
                field: name.into(),
                message,
            },
            other => other,
        }
    }

    /// The offending field, if the error carries one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Format { field, .. } | Self::Checksum { field, .. } | Self::Range { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }
}

/// A single problem found while inspecting a document, with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Path to the offending element (e.g. "GrpHdr.CtrlSum").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
