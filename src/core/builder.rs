use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::*;

/// Unvalidated input for [`SepaMessage::add_payment_info`](super::SepaMessage::add_payment_info).
///
/// Obtained from [`PaymentInfoBuilder`]; validation happens when the block
/// is added to a message.
#[derive(Debug, Clone)]
pub struct PaymentInfoRequest {
    pub(crate) id: String,
    pub(crate) method: PaymentMethod,
    pub(crate) name: String,
    pub(crate) iban: String,
    pub(crate) bic: Option<String>,
    pub(crate) date: NaiveDate,
    pub(crate) batch_booking: Option<bool>,
    pub(crate) creditor_id: Option<String>,
    pub(crate) sequence_type: Option<String>,
    pub(crate) local_instrument: LocalInstrument,
}

/// Builder for payment-information blocks.
///
/// ```
/// use zahlung::core::*;
/// use chrono::NaiveDate;
///
/// let block = PaymentInfoBuilder::direct_debit(
///     "PMT-2024-06",
///     "ACME GmbH",
///     "DE89370400440532013000",
///     NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     "DE98ZZZ09999999999",
///     "RCUR",
/// )
/// .bic("COBADEFFXXX")
/// .build();
/// ```
pub struct PaymentInfoBuilder {
    request: PaymentInfoRequest,
}

impl PaymentInfoBuilder {
    /// Credit transfer block paid from the debtor's account.
    pub fn credit_transfer(
        id: impl Into<String>,
        debtor_name: impl Into<String>,
        debtor_iban: impl Into<String>,
        execution_date: NaiveDate,
    ) -> Self {
        Self {
            request: PaymentInfoRequest {
                id: id.into(),
                method: PaymentMethod::CreditTransfer,
                name: debtor_name.into(),
                iban: debtor_iban.into(),
                bic: None,
                date: execution_date,
                batch_booking: None,
                creditor_id: None,
                sequence_type: None,
                local_instrument: LocalInstrument::Core,
            },
        }
    }

    /// Direct debit block collected to the creditor's account.
    ///
    /// `sequence_type` is one of FRST, RCUR, OOFF, FNAL; it is checked when
    /// the block is added to a message.
    pub fn direct_debit(
        id: impl Into<String>,
        creditor_name: impl Into<String>,
        creditor_iban: impl Into<String>,
        collection_date: NaiveDate,
        creditor_id: impl Into<String>,
        sequence_type: impl Into<String>,
    ) -> Self {
        Self {
            request: PaymentInfoRequest {
                id: id.into(),
                method: PaymentMethod::DirectDebit,
                name: creditor_name.into(),
                iban: creditor_iban.into(),
                bic: None,
                date: collection_date,
                batch_booking: None,
                creditor_id: Some(creditor_id.into()),
                sequence_type: Some(sequence_type.into()),
                local_instrument: LocalInstrument::Core,
            },
        }
    }

    pub fn bic(mut self, bic: impl Into<String>) -> Self {
        self.request.bic = Some(bic.into());
        self
    }

    pub fn batch_booking(mut self, batch: bool) -> Self {
        self.request.batch_booking = Some(batch);
        self
    }

    /// Direct debit scheme (CORE by default). Ignored for credit transfers.
    pub fn local_instrument(mut self, instrument: LocalInstrument) -> Self {
        self.request.local_instrument = instrument;
        self
    }

    pub fn build(self) -> PaymentInfoRequest {
        self.request
    }
}

/// Unvalidated input for [`SepaMessage::add_transaction`](super::SepaMessage::add_transaction).
#[derive(Debug, Clone)]
pub struct TransactionRequest {
    pub(crate) end_to_end_id: String,
    pub(crate) amount: Decimal,
    pub(crate) currency: String,
    pub(crate) name: String,
    pub(crate) iban: String,
    pub(crate) bic: Option<String>,
    pub(crate) remittance_info: Option<String>,
    pub(crate) mandate_id: Option<String>,
    pub(crate) mandate_signing_date: Option<NaiveDate>,
}

/// Builder for transactions.
///
/// The counterparty is the creditor for credit transfers and the debtor
/// for direct debits.
pub struct TransactionBuilder {
    request: TransactionRequest,
}

impl TransactionBuilder {
    pub fn new(
        end_to_end_id: impl Into<String>,
        amount: Decimal,
        counterparty_name: impl Into<String>,
        counterparty_iban: impl Into<String>,
    ) -> Self {
        Self {
            request: TransactionRequest {
                end_to_end_id: end_to_end_id.into(),
                amount,
                currency: "EUR".to_string(),
                name: counterparty_name.into(),
                iban: counterparty_iban.into(),
                bic: None,
                remittance_info: None,
                mandate_id: None,
                mandate_signing_date: None,
            },
        }
    }

    /// Start from an upstream payment record; the invoice number becomes the end-to-end id.
    pub fn from_record(record: PaymentRecord) -> Self {
        let mut builder = Self::new(record.invoice_number, record.amount, record.name, record.iban);
        builder.request.bic = record.bic;
        builder.request.remittance_info = record.remittance_info;
        builder.request.mandate_id = record.mandate_id;
        builder.request.mandate_signing_date = record.mandate_signing_date;
        builder
    }

    pub fn bic(mut self, bic: impl Into<String>) -> Self {
        self.request.bic = Some(bic.into());
        self
    }

    pub fn remittance_info(mut self, text: impl Into<String>) -> Self {
        self.request.remittance_info = Some(text.into());
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.request.currency = code.into();
        self
    }

    /// Mandate reference and signing date (direct debit only).
    pub fn mandate(mut self, id: impl Into<String>, signing_date: NaiveDate) -> Self {
        self.request.mandate_id = Some(id.into());
        self.request.mandate_signing_date = Some(signing_date);
        self
    }

    pub fn build(self) -> TransactionRequest {
        self.request
    }
}

impl From<PaymentRecord> for TransactionRequest {
    fn from(record: PaymentRecord) -> Self {
        TransactionBuilder::from_record(record).build()
    }
}
