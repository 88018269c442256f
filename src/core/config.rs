use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::builder::PaymentInfoBuilder;
use super::error::SepaError;
use super::types::LocalInstrument;

/// Account settings of the party that initiates payments.
///
/// Holds what stays the same from batch to batch: the company name, its
/// account and, for direct debits, its creditor identifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SepaConfig {
    /// Account holder name, also used as initiating party.
    pub name: String,
    pub iban: String,
    #[serde(default)]
    pub bic: Option<String>,
    /// SEPA creditor identifier, required for direct debits.
    #[serde(default)]
    pub creditor_id: Option<String>,
    #[serde(default)]
    pub local_instrument: LocalInstrument,
    #[serde(default)]
    pub batch_booking: Option<bool>,
}

impl SepaConfig {
    /// Credit transfer block paid from the configured account.
    pub fn credit_transfer(
        &self,
        payment_info_id: impl Into<String>,
        execution_date: NaiveDate,
    ) -> PaymentInfoBuilder {
        let builder = PaymentInfoBuilder::credit_transfer(
            payment_info_id,
            self.name.clone(),
            self.iban.clone(),
            execution_date,
        );
        self.apply_options(builder)
    }

    /// Direct debit block collected to the configured account.
    pub fn direct_debit(
        &self,
        payment_info_id: impl Into<String>,
        collection_date: NaiveDate,
        sequence_type: impl Into<String>,
    ) -> Result<PaymentInfoBuilder, SepaError> {
        let creditor_id = self
            .creditor_id
            .clone()
            .ok_or_else(|| SepaError::state("configuration has no creditor id for direct debits"))?;
        let builder = PaymentInfoBuilder::direct_debit(
            payment_info_id,
            self.name.clone(),
            self.iban.clone(),
            collection_date,
            creditor_id,
            sequence_type,
        )
        .local_instrument(self.local_instrument);
        Ok(self.apply_options(builder))
    }

    fn apply_options(&self, mut builder: PaymentInfoBuilder) -> PaymentInfoBuilder {
        if let Some(bic) = &self.bic {
            builder = builder.bic(bic.clone());
        }
        if let Some(batch) = self.batch_booking {
            builder = builder.batch_booking(batch);
        }
        builder
    }
}

/// Builder for [`SepaConfig`].
///
/// # Example
///
/// ```
/// use zahlung::core::SepaConfigBuilder;
///
/// let config = SepaConfigBuilder::new("ACME GmbH", "DE89370400440532013000")
///     .bic("COBADEFFXXX")
///     .creditor_id("DE98ZZZ09999999999")
///     .build();
/// assert_eq!(config.creditor_id.as_deref(), Some("DE98ZZZ09999999999"));
/// ```
pub struct SepaConfigBuilder {
    config: SepaConfig,
}

impl SepaConfigBuilder {
    pub fn new(name: impl Into<String>, iban: impl Into<String>) -> Self {
        Self {
            config: SepaConfig {
                name: name.into(),
                iban: iban.into(),
                ..SepaConfig::default()
            },
        }
    }

    pub fn bic(mut self, bic: impl Into<String>) -> Self {
        self.config.bic = Some(bic.into());
        self
    }

    pub fn creditor_id(mut self, id: impl Into<String>) -> Self {
        self.config.creditor_id = Some(id.into());
        self
    }

    pub fn local_instrument(mut self, instrument: LocalInstrument) -> Self {
        self.config.local_instrument = instrument;
        self
    }

    pub fn batch_booking(mut self, batch: bool) -> Self {
        self.config.batch_booking = Some(batch);
        self
    }

    pub fn build(self) -> SepaConfig {
        self.config
    }
}
