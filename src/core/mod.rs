//! Bank data validation and SEPA message construction.
//!
//! IBAN, BIC and creditor id validation, German IBAN derivation, text
//! sanitization, and the [`SepaMessage`] aggregate that collects
//! payment-information blocks and transactions.

mod bic;
mod builder;
mod config;
pub mod countries;
mod creditor_id;
mod error;
mod german;
mod iban;
mod message;
mod text;
mod types;

pub use bic::*;
pub use builder::*;
pub use config::*;
pub use creditor_id::*;
pub use error::*;
pub use german::*;
pub use iban::{Iban, normalize_iban, validate_iban};
pub use message::*;
pub use text::*;
pub use types::*;
