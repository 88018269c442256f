//! ISO 20022 pain XML generation and inspection.
//!
//! # Supported messages
//!
//! - **pain.001.001.09**: SEPA credit transfer initiation
//! - **pain.008.001.08**: SEPA direct debit initiation
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use zahlung::core::*;
//!
//! let mut msg = SepaMessage::new("MSG-2024-06", "ACME GmbH").unwrap();
//! let block = msg
//!     .add_payment_info(
//!         PaymentInfoBuilder::credit_transfer(
//!             "PMT-2024-06",
//!             "ACME GmbH",
//!             "DE89370400440532013000",
//!             NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
//!         )
//!         .build(),
//!     )
//!     .unwrap();
//! msg.add_transaction(
//!     block,
//!     TransactionBuilder::new("RE-1", dec!(99.95), "Lieferant GmbH", "NL91ABNA0417164300").build(),
//! )
//! .unwrap();
//!
//! let xml = msg.to_xml().unwrap();
//! assert!(xml.contains("<CtrlSum>99.95</CtrlSum>"));
//! msg.to_file("sepa-2024-06.xml").unwrap();
//! ```

mod file;
mod inspect;
mod pain001;
mod pain008;
pub(crate) mod xml_utils;

use std::path::Path;

use crate::core::*;
use xml_utils::XmlWriter;

pub use file::write_atomic;
pub use inspect::{DocumentReport, inspect_document, inspect_file};
pub use xml_utils::format_amount;

/// Namespace of SEPA credit transfer initiation messages.
pub const PAIN_001: &str = "urn:iso:std:iso:20022:tech:xsd:pain.001.001.09";

/// Namespace of SEPA direct debit initiation messages.
pub const PAIN_008: &str = "urn:iso:std:iso:20022:tech:xsd:pain.008.001.08";

pub(crate) const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Namespace the message will be serialized with, `None` while it has no blocks.
pub fn namespace_for(msg: &SepaMessage) -> Option<&'static str> {
    msg.kind().map(|kind| match kind {
        PaymentMethod::CreditTransfer => PAIN_001,
        PaymentMethod::DirectDebit => PAIN_008,
    })
}

/// Serialize a message to pain.001 or pain.008, depending on its kind.
///
/// Fails with [`SepaError::State`] unless [`SepaMessage::validate`] holds.
pub fn to_xml(msg: &SepaMessage) -> Result<String, SepaError> {
    msg.ensure_valid()?;
    match msg.kind() {
        Some(PaymentMethod::CreditTransfer) => pain001::write_pain001(msg),
        Some(PaymentMethod::DirectDebit) => pain008::write_pain008(msg),
        None => Err(SepaError::state("message has no payment information")),
    }
}

impl SepaMessage {
    /// Serialize the message. See [`to_xml`](crate::pain::to_xml).
    pub fn to_xml(&self) -> Result<String, SepaError> {
        to_xml(self)
    }

    /// Serialize and write the message to `path`.
    ///
    /// The document goes to a temporary file next to `path` first and is
    /// renamed into place, so `path` never holds a partial document.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), SepaError> {
        let xml = self.to_xml()?;
        write_atomic(path.as_ref(), xml.as_bytes())?;
        tracing::info!(
            msg_id = %self.msg_id(),
            path = %path.as_ref().display(),
            number_of_transactions = self.number_of_transactions(),
            "SEPA message written"
        );
        Ok(())
    }
}

fn write_group_header(w: &mut XmlWriter, msg: &SepaMessage) -> Result<(), SepaError> {
    w.start_element("GrpHdr")?;
    w.text_element("MsgId", msg.msg_id())?;
    w.text_element(
        "CreDtTm",
        &msg.creation_date_time().format("%Y-%m-%dT%H:%M:%S").to_string(),
    )?;
    w.text_element("NbOfTxs", &msg.number_of_transactions().to_string())?;
    w.text_element("CtrlSum", &format_amount(msg.control_sum()))?;
    w.start_element("InitgPty")?;
    w.name_element(msg.initiator_name())?;
    w.end_element("InitgPty")?;
    w.end_element("GrpHdr")?;
    Ok(())
}

fn write_remittance(w: &mut XmlWriter, tx: &Transaction) -> Result<(), SepaError> {
    if let Some(text) = tx.remittance_info.as_deref() {
        w.start_element("RmtInf")?;
        w.text_element("Ustrd", text)?;
        w.end_element("RmtInf")?;
    }
    Ok(())
}
