use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bic::Bic;
use super::creditor_id::CreditorId;
use super::iban::Iban;

/// Payment method of a payment-information block (`PmtMtd`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// TRF: SEPA credit transfer (pain.001).
    CreditTransfer,
    /// DD: SEPA direct debit (pain.008).
    DirectDebit,
}

impl PaymentMethod {
    pub fn code(&self) -> &'static str {
        match self {
            Self::CreditTransfer => "TRF",
            Self::DirectDebit => "DD",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "TRF" => Some(Self::CreditTransfer),
            "DD" => Some(Self::DirectDebit),
            _ => None,
        }
    }
}

/// Direct debit sequence type (`SeqTp`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SequenceType {
    /// FRST: first collection of a recurring mandate.
    First,
    /// RCUR: follow-up collection.
    Recurring,
    /// OOFF: one-off collection.
    OneOff,
    /// FNAL: last collection of a recurring mandate.
    Final,
}

impl SequenceType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::First => "FRST",
            Self::Recurring => "RCUR",
            Self::OneOff => "OOFF",
            Self::Final => "FNAL",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "FRST" => Some(Self::First),
            "RCUR" => Some(Self::Recurring),
            "OOFF" => Some(Self::OneOff),
            "FNAL" => Some(Self::Final),
            _ => None,
        }
    }
}

/// Direct debit scheme (`LclInstrm/Cd`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocalInstrument {
    /// CORE: consumer direct debit.
    #[default]
    Core,
    /// B2B: business-to-business direct debit.
    B2b,
}

impl LocalInstrument {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Core => "CORE",
            Self::B2b => "B2B",
        }
    }
}

/// Account holder with validated bank details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account holder name.
    pub name: String,
    pub iban: Iban,
    /// Optional for IBAN-only SEPA payments.
    pub bic: Option<Bic>,
}

/// Mandate reference of a direct debit transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mandate {
    /// Mandate reference (`MndtId`).
    pub id: String,
    /// Date the debtor signed the mandate (`DtOfSgntr`).
    pub signing_date: NaiveDate,
}

/// Scheme-specific data of a payment-information block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentScheme {
    CreditTransfer,
    DirectDebit {
        creditor_id: CreditorId,
        sequence_type: SequenceType,
        local_instrument: LocalInstrument,
    },
}

/// One accepted transaction of a payment-information block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// End-to-end identification, "NOTPROVIDED" if none was given.
    pub end_to_end_id: String,
    /// Instructed amount, positive with at most two fractional digits.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Creditor (credit transfer) or debtor (direct debit).
    pub counterparty: Account,
    /// Unstructured remittance information, already sanitized.
    pub remittance_info: Option<String>,
    /// Present for direct debit transactions only.
    pub mandate: Option<Mandate>,
}

/// A payment-information block (`PmtInf`) and its transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    /// `PmtInfId`.
    pub id: String,
    /// Debtor (credit transfer) or creditor (direct debit).
    pub party: Account,
    /// Requested execution date or collection date.
    pub date: NaiveDate,
    /// `BtchBookg`; omitted from the XML when `None`.
    pub batch_booking: Option<bool>,
    pub scheme: PaymentScheme,
    pub transactions: Vec<Transaction>,
}

impl PaymentInfo {
    pub fn method(&self) -> PaymentMethod {
        match self.scheme {
            PaymentScheme::CreditTransfer => PaymentMethod::CreditTransfer,
            PaymentScheme::DirectDebit { .. } => PaymentMethod::DirectDebit,
        }
    }

    pub fn number_of_transactions(&self) -> usize {
        self.transactions.len()
    }

    /// Exact sum of the block's transaction amounts.
    pub fn control_sum(&self) -> Decimal {
        self.transactions.iter().map(|t| t.amount).sum()
    }
}

/// Handle addressing a payment-information block within its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaymentInfoId(pub(crate) usize);

impl PaymentInfoId {
    /// Position of the block in the message.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Payment data as supplied by an invoicing or accounting system.
///
/// The invoice number doubles as the end-to-end id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub name: String,
    pub iban: String,
    #[serde(default)]
    pub bic: Option<String>,
    pub amount: Decimal,
    #[serde(default)]
    pub remittance_info: Option<String>,
    pub invoice_number: String,
    /// Direct debit only.
    #[serde(default)]
    pub mandate_id: Option<String>,
    /// Direct debit only.
    #[serde(default)]
    pub mandate_signing_date: Option<NaiveDate>,
}
