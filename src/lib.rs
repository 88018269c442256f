//! # zahlung
//!
//! SEPA payment instructions: IBAN and BIC validation, German IBAN
//! derivation from Bankleitzahl and account number, and ISO 20022 XML for
//! SEPA credit transfers (pain.001.001.09) and direct debits (pain.008.001.08).
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Every input is validated when it is added, so a [`core::SepaMessage`]
//! never holds invalid data.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use zahlung::core::*;
//! use rust_decimal_macros::dec;
//!
//! let mut msg = SepaMessage::new("MSG-2024-001", "ACME GmbH").unwrap();
//! let block = msg
//!     .add_payment_info(
//!         PaymentInfoBuilder::credit_transfer(
//!             "PMT-2024-001",
//!             "ACME GmbH",
//!             "DE89 3704 0044 0532 0130 00",
//!             NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
//!         )
//!         .bic("COBADEFFXXX")
//!         .build(),
//!     )
//!     .unwrap();
//!
//! msg.add_transaction(
//!     block,
//!     TransactionBuilder::new("RE-2024-001", dec!(1000.00), "Lieferant GmbH", "NL91ABNA0417164300")
//!         .build(),
//! )
//! .unwrap();
//! msg.add_transaction(
//!     block,
//!     TransactionBuilder::new("RE-2024-002", dec!(2000.50), "Lieferant GmbH", "NL91ABNA0417164300")
//!         .build(),
//! )
//! .unwrap();
//!
//! assert_eq!(msg.number_of_transactions(), 2);
//! assert_eq!(msg.control_sum(), dec!(3000.50));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | IBAN/BIC/creditor id validation, German IBANs, message builder |
//! | `xml` | pain.001/pain.008 generation, atomic file output, document inspection |
//! | `cli` | the `zahlung` command-line tool |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "xml")]
pub mod pain;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
