//! Currencies

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when validating a currency record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurrencyError {
    /// Exchange rates must be strictly positive for conversion to be defined.
    #[error("currency {code} has a non-positive exchange rate of {rate}")]
    NonPositiveRate {
        /// Code of the offending currency.
        code: String,
        /// The rejected rate.
        rate: Decimal,
    },
}

/// A display currency and its exchange rate against the canonical USD prices.
///
/// Catalog prices are stored in USD; `rate` is the number of local units per
/// 1 USD, applied on display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CurrencyWire", into = "CurrencyWire")]
pub struct Currency {
    /// Opaque, caller-unique identifier.
    pub id: String,
    /// Short unique code, e.g. `USD`.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Symbol appended to formatted prices.
    pub symbol: String,
    /// Local units per 1 USD. Strictly positive.
    pub rate: Decimal,
    /// Deactivated currencies are hidden from buyer-facing selectors but may
    /// remain as historical data.
    pub is_active: bool,
}

impl Currency {
    /// Code of the base currency every catalog price is stored in.
    pub const BASE_CODE: &'static str = "USD";

    /// Whether this is the base currency. The base currency is never
    /// removable from a catalog.
    #[must_use]
    pub fn is_base(&self) -> bool {
        self.code == Self::BASE_CODE
    }

    /// Check the record invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::NonPositiveRate`] if `rate` is zero or
    /// negative.
    pub fn validate(&self) -> Result<(), CurrencyError> {
        if self.rate <= Decimal::ZERO {
            return Err(CurrencyError::NonPositiveRate {
                code: self.code.clone(),
                rate: self.rate,
            });
        }

        Ok(())
    }
}

/// Stored layout of a [`Currency`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrencyWire {
    id: String,
    code: String,
    name: String,
    symbol: String,
    rate: Decimal,
    is_active: bool,
}

impl TryFrom<CurrencyWire> for Currency {
    type Error = CurrencyError;

    fn try_from(wire: CurrencyWire) -> Result<Self, Self::Error> {
        let currency = Currency {
            id: wire.id,
            code: wire.code,
            name: wire.name,
            symbol: wire.symbol,
            rate: wire.rate,
            is_active: wire.is_active,
        };

        currency.validate()?;

        Ok(currency)
    }
}

impl From<Currency> for CurrencyWire {
    fn from(currency: Currency) -> Self {
        CurrencyWire {
            id: currency.id,
            code: currency.code,
            name: currency.name,
            symbol: currency.symbol,
            rate: currency.rate,
            is_active: currency.is_active,
        }
    }
}
