//! The SEPA message aggregate: payment-information blocks and their transactions.

use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;

use super::bic::validate_bic;
use super::builder::{PaymentInfoRequest, TransactionRequest};
use super::creditor_id::validate_creditor_id;
use super::error::SepaError;
use super::iban::validate_iban;
use super::text::{MAX_ID_LEN, MAX_NAME_LEN, sanitize_remittance, sanitize_text};
use super::types::*;

/// Largest amount a single SEPA transaction may carry.
pub const MAX_AMOUNT: Decimal = dec!(999999999.99);

/// End-to-end id used when the caller has none.
pub const NOT_PROVIDED: &str = "NOTPROVIDED";

/// A SEPA payment message under construction.
///
/// Blocks and transactions are validated as they are added; a failed call
/// leaves the message untouched. Transaction count and control sum are kept
/// up to date on every mutation.
///
/// ```
/// use zahlung::core::*;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let mut msg = SepaMessage::new("MSG-2024-001", "ACME GmbH").unwrap();
/// let block = msg
///     .add_payment_info(
///         PaymentInfoBuilder::credit_transfer(
///             "PMT-1",
///             "ACME GmbH",
///             "DE89370400440532013000",
///             NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///         )
///         .build(),
///     )
///     .unwrap();
/// msg.add_transaction(
///     block,
///     TransactionBuilder::new("RE-2024-001", dec!(1000.00), "Lieferant GmbH", "GB82WEST12345698765432")
///         .remittance_info("Rechnung RE-2024-001")
///         .build(),
/// )
/// .unwrap();
///
/// assert!(msg.validate());
/// assert_eq!(msg.control_sum(), dec!(1000.00));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct SepaMessage {
    msg_id: String,
    initiator_name: String,
    creation_date_time: NaiveDateTime,
    payment_infos: Vec<PaymentInfo>,
    number_of_transactions: usize,
    control_sum: Decimal,
}

impl SepaMessage {
    /// Create an empty message stamped with the current local time.
    pub fn new(
        msg_id: impl Into<String>,
        initiator_name: impl Into<String>,
    ) -> Result<Self, SepaError> {
        Self::with_creation_time(msg_id, initiator_name, Local::now().naive_local())
    }

    /// Create an empty message with an explicit creation timestamp.
    pub fn with_creation_time(
        msg_id: impl Into<String>,
        initiator_name: impl Into<String>,
        creation_date_time: NaiveDateTime,
    ) -> Result<Self, SepaError> {
        let msg_id = msg_id.into().trim().to_string();
        let initiator_name = sanitize_text(&initiator_name.into(), MAX_NAME_LEN);

        if msg_id.is_empty() {
            return Err(SepaError::state("message id must not be empty"));
        }
        check_identifier("message id", &msg_id)?;
        if initiator_name.is_empty() {
            return Err(SepaError::state("initiator name must not be empty"));
        }

        Ok(Self {
            msg_id,
            initiator_name,
            creation_date_time,
            payment_infos: Vec::new(),
            number_of_transactions: 0,
            control_sum: Decimal::ZERO,
        })
    }

    pub fn msg_id(&self) -> &str {
        &self.msg_id
    }

    pub fn initiator_name(&self) -> &str {
        &self.initiator_name
    }

    pub fn creation_date_time(&self) -> NaiveDateTime {
        self.creation_date_time
    }

    /// Credit transfer or direct debit; `None` until the first block is added.
    pub fn kind(&self) -> Option<PaymentMethod> {
        self.payment_infos.first().map(PaymentInfo::method)
    }

    pub fn payment_infos(&self) -> &[PaymentInfo] {
        &self.payment_infos
    }

    pub fn payment_info(&self, id: PaymentInfoId) -> Option<&PaymentInfo> {
        self.payment_infos.get(id.0)
    }

    /// `NbOfTxs` across all blocks.
    pub fn number_of_transactions(&self) -> usize {
        self.number_of_transactions
    }

    /// `CtrlSum` across all blocks, exact.
    pub fn control_sum(&self) -> Decimal {
        self.control_sum
    }

    /// Validate and append a new, empty payment-information block.
    pub fn add_payment_info(
        &mut self,
        request: PaymentInfoRequest,
    ) -> Result<PaymentInfoId, SepaError> {
        let id = request.id.trim().to_string();
        if id.is_empty() {
            return Err(SepaError::state("payment info id must not be empty"));
        }
        check_identifier("payment info id", &id)?;
        if self.payment_infos.iter().any(|p| p.id == id) {
            return Err(SepaError::state(format!(
                "payment info id '{id}' is already used in this message"
            )));
        }
        if let Some(kind) = self.kind() {
            if kind != request.method {
                return Err(SepaError::state(format!(
                    "cannot add a {} block to a {} message",
                    request.method.code(),
                    kind.code()
                )));
            }
        }

        let party_field = match request.method {
            PaymentMethod::CreditTransfer => "debtor",
            PaymentMethod::DirectDebit => "creditor",
        };
        let party = validate_account(party_field, &request.name, &request.iban, request.bic.as_deref())?;

        let scheme = match request.method {
            PaymentMethod::CreditTransfer => PaymentScheme::CreditTransfer,
            PaymentMethod::DirectDebit => {
                let code = request.sequence_type.as_deref().unwrap_or("").trim();
                let sequence_type = SequenceType::from_code(code).ok_or_else(|| {
                    SepaError::state(format!(
                        "invalid sequence type '{code}', expected one of FRST, RCUR, OOFF, FNAL"
                    ))
                })?;
                let creditor_id = request
                    .creditor_id
                    .as_deref()
                    .ok_or_else(|| SepaError::state("direct debit requires a creditor id"))
                    .and_then(validate_creditor_id)?;
                PaymentScheme::DirectDebit {
                    creditor_id,
                    sequence_type,
                    local_instrument: request.local_instrument,
                }
            }
        };

        self.payment_infos.push(PaymentInfo {
            id,
            party,
            date: request.date,
            batch_booking: request.batch_booking,
            scheme,
            transactions: Vec::new(),
        });
        let handle = PaymentInfoId(self.payment_infos.len() - 1);
        debug!(
            msg_id = %self.msg_id,
            payment_info = handle.0,
            method = request.method.code(),
            "payment info added"
        );
        Ok(handle)
    }

    /// Validate a transaction and append it to the addressed block.
    pub fn add_transaction(
        &mut self,
        target: PaymentInfoId,
        request: TransactionRequest,
    ) -> Result<(), SepaError> {
        let creation_date = self.creation_date_time.date();
        let block = self.payment_infos.get(target.0).ok_or_else(|| {
            SepaError::state(format!("no payment info block with index {}", target.0))
        })?;
        let transaction = validate_transaction(block.method(), creation_date, request)?;
        let amount = transaction.amount;

        let block = &mut self.payment_infos[target.0];
        block.transactions.push(transaction);
        self.number_of_transactions += 1;
        self.control_sum += amount;

        debug!(
            msg_id = %self.msg_id,
            payment_info = target.0,
            %amount,
            number_of_transactions = self.number_of_transactions,
            "transaction added"
        );
        Ok(())
    }

    /// True iff the message has at least one block and every block has a transaction.
    pub fn validate(&self) -> bool {
        !self.payment_infos.is_empty() && self.payment_infos.iter().all(|p| !p.transactions.is_empty())
    }

    /// Like [`validate`](Self::validate), but says what is missing.
    pub fn ensure_valid(&self) -> Result<(), SepaError> {
        if self.payment_infos.is_empty() {
            return Err(SepaError::state(format!(
                "message '{}' has no payment information",
                self.msg_id
            )));
        }
        if let Some(empty) = self.payment_infos.iter().find(|p| p.transactions.is_empty()) {
            return Err(SepaError::state(format!(
                "payment info '{}' has no transactions",
                empty.id
            )));
        }
        Ok(())
    }
}

/// `Max35Text` identifiers: no control characters, at most 35 characters.
fn check_identifier(what: &str, id: &str) -> Result<(), SepaError> {
    if id.chars().any(char::is_control) {
        return Err(SepaError::state(format!(
            "{what} {id:?} contains control characters"
        )));
    }
    if id.chars().count() > MAX_ID_LEN {
        return Err(SepaError::state(format!(
            "{what} '{id}' exceeds {MAX_ID_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_account(
    field: &str,
    name: &str,
    iban: &str,
    bic: Option<&str>,
) -> Result<Account, SepaError> {
    let iban = validate_iban(iban).map_err(|e| e.in_field(format!("{field}_iban")))?;
    let bic = bic
        .filter(|b| !b.trim().is_empty())
        .map(validate_bic)
        .transpose()
        .map_err(|e| e.in_field(format!("{field}_bic")))?;
    let name = sanitize_text(name, MAX_NAME_LEN);
    if name.is_empty() {
        return Err(SepaError::state(format!("{field}_name must not be empty")));
    }
    Ok(Account {
        name,
        iban,
        bic,
    })
}

fn validate_amount(amount: Decimal) -> Result<(), SepaError> {
    if amount <= Decimal::ZERO {
        return Err(SepaError::range(
            "amount",
            format!("amount must be greater than zero, got {amount}"),
        ));
    }
    if amount > MAX_AMOUNT {
        return Err(SepaError::range(
            "amount",
            format!("amount must not exceed {MAX_AMOUNT}, got {amount}"),
        ));
    }
    if amount.normalize().scale() > 2 {
        return Err(SepaError::range(
            "amount",
            format!("amount must not have more than 2 decimal places, got {amount}"),
        ));
    }
    Ok(())
}

fn validate_currency(code: &str) -> Result<String, SepaError> {
    let code = code.trim();
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(SepaError::format(
            "currency",
            format!("currency must be a 3-letter ISO 4217 code, got '{code}'"),
        ));
    }
    Ok(code.to_string())
}

fn validate_transaction(
    method: PaymentMethod,
    creation_date: chrono::NaiveDate,
    request: TransactionRequest,
) -> Result<Transaction, SepaError> {
    validate_amount(request.amount)?;
    let currency = validate_currency(&request.currency)?;

    let counterparty_field = match method {
        PaymentMethod::CreditTransfer => "creditor",
        PaymentMethod::DirectDebit => "debtor",
    };
    let counterparty = validate_account(
        counterparty_field,
        &request.name,
        &request.iban,
        request.bic.as_deref(),
    )?;

    let end_to_end_id = match request.end_to_end_id.trim() {
        "" => NOT_PROVIDED.to_string(),
        id => id.to_string(),
    };
    check_identifier("end-to-end id", &end_to_end_id)?;

    let mandate = match method {
        PaymentMethod::CreditTransfer => {
            if request.mandate_id.is_some() || request.mandate_signing_date.is_some() {
                return Err(SepaError::state(
                    "mandate fields are only allowed on direct debit transactions",
                ));
            }
            None
        }
        PaymentMethod::DirectDebit => {
            let id = request.mandate_id.as_deref().unwrap_or("").trim();
            if id.is_empty() {
                return Err(SepaError::state("mandate_id must not be empty"));
            }
            check_identifier("mandate id", id)?;
            let signing_date = request
                .mandate_signing_date
                .ok_or_else(|| SepaError::state("mandate_signing_date is required"))?;
            if signing_date > creation_date {
                return Err(SepaError::state(format!(
                    "mandate_signing_date {signing_date} is in the future (message created {creation_date})"
                )));
            }
            Some(Mandate {
                id: id.to_string(),
                signing_date,
            })
        }
    };

    let remittance_info = request
        .remittance_info
        .as_deref()
        .map(sanitize_remittance)
        .filter(|t| !t.is_empty());

    Ok(Transaction {
        end_to_end_id,
        amount: request.amount,
        currency,
        counterparty,
        remittance_info,
        mandate,
    })
}
