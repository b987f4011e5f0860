//! Products

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when validating a product record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    /// A unit-priced product without a minimum order quantity.
    #[error("product {0} is unit-priced but has no minimum quantity")]
    MissingMinQuantity(String),

    /// Minimum order quantities start at one.
    #[error("product {0} has a minimum quantity of zero")]
    ZeroMinQuantity(String),

    /// A unit-priced product without a price.
    #[error("product {0} is unit-priced but has no price")]
    MissingUnitPrice(String),

    /// Unit prices cannot be negative.
    #[error("product {0} has a negative price")]
    NegativeUnitPrice(String),

    /// Tier prices cannot be negative.
    #[error("tier {tier} of product {product} has a negative price")]
    NegativeTierPrice {
        /// Id of the product the tier belongs to.
        product: String,
        /// Id of the offending tier.
        tier: String,
    },
}

/// A named, individually priced package of a tiered product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Opaque, caller-unique identifier.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Absolute price of this package in USD, not a per-unit rate.
    #[serde(rename = "priceUSD")]
    pub price_usd: Decimal,
}

/// How a product is priced.
///
/// The two shapes are mutually exclusive by construction: a product is
/// either sold in fixed packages or by quantity, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum Pricing {
    /// Fixed, named packages, each with its own absolute price.
    ///
    /// Order matters: the first tier is the default selection, and the
    /// cheapest tier is the advertised starting price.
    Tiered {
        /// The packages, in display order.
        tiers: Vec<Tier>,
    },
    /// Linear per-unit pricing anchored at a minimum order size.
    Unit {
        /// Smallest orderable quantity.
        min_quantity: NonZeroU32,
        /// Price in USD for exactly `min_quantity` units.
        price_per_min_usd: Decimal,
    },
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProductWire", into = "ProductWire")]
pub struct Product {
    /// Opaque, caller-unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Id of the owning category. A weak reference: it may dangle.
    pub category_id: String,
    /// Image URI shown on product cards.
    pub image: String,
    /// How this product is priced.
    pub pricing: Pricing,
    /// Outbound messaging contact orders for this product are sent to.
    pub contact_number: String,
}

impl Product {
    /// The default tier selection: the first listed tier, if any.
    #[must_use]
    pub fn default_tier(&self) -> Option<&Tier> {
        match &self.pricing {
            Pricing::Tiered { tiers } => tiers.first(),
            Pricing::Unit { .. } => None,
        }
    }

    /// Check the record invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] if any tier or unit price is negative.
    pub fn validate(&self) -> Result<(), ProductError> {
        match &self.pricing {
            Pricing::Tiered { tiers } => {
                for tier in tiers {
                    if tier.price_usd < Decimal::ZERO {
                        return Err(ProductError::NegativeTierPrice {
                            product: self.id.clone(),
                            tier: tier.id.clone(),
                        });
                    }
                }

                Ok(())
            }
            Pricing::Unit {
                price_per_min_usd, ..
            } => {
                if *price_per_min_usd < Decimal::ZERO {
                    return Err(ProductError::NegativeUnitPrice(self.id.clone()));
                }

                Ok(())
            }
        }
    }
}

/// Join a dialing code and a locally formatted subscriber number into one
/// stored contact address, dropping the local part's leading zeros.
///
/// `+967` with `0735670700` and `+967` with `735670700` both produce
/// `+967735670700`.
#[must_use]
pub fn compose_contact_number(dialing_code: &str, local_number: &str) -> String {
    format!("{dialing_code}{}", local_number.trim_start_matches('0'))
}

/// Stored layout of a [`Product`].
///
/// The stored document keeps one loosely shaped record for both pricing
/// modes, discriminated by `hasTiers`; converting through this struct is
/// what keeps the in-memory [`Pricing`] shapes mutually exclusive. Stray
/// fields of the unselected mode are ignored rather than rejected so that
/// older documents load unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductWire {
    id: String,
    name: String,
    category_id: String,
    image: String,
    has_tiers: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tiers: Option<Vec<Tier>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_quantity: Option<u32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        rename = "pricePerMinUSD"
    )]
    price_per_min_usd: Option<Decimal>,
    #[serde(rename = "whatsappNumber")]
    contact_number: String,
}

impl TryFrom<ProductWire> for Product {
    type Error = ProductError;

    fn try_from(wire: ProductWire) -> Result<Self, Self::Error> {
        let pricing = if wire.has_tiers {
            Pricing::Tiered {
                tiers: wire.tiers.unwrap_or_default(),
            }
        } else {
            let units = wire
                .min_quantity
                .ok_or_else(|| ProductError::MissingMinQuantity(wire.id.clone()))?;
            let min_quantity = NonZeroU32::new(units)
                .ok_or_else(|| ProductError::ZeroMinQuantity(wire.id.clone()))?;
            let price_per_min_usd = wire
                .price_per_min_usd
                .ok_or_else(|| ProductError::MissingUnitPrice(wire.id.clone()))?;

            Pricing::Unit {
                min_quantity,
                price_per_min_usd,
            }
        };

        let product = Product {
            id: wire.id,
            name: wire.name,
            category_id: wire.category_id,
            image: wire.image,
            pricing,
            contact_number: wire.contact_number,
        };

        product.validate()?;

        Ok(product)
    }
}

impl From<Product> for ProductWire {
    fn from(product: Product) -> Self {
        let (has_tiers, tiers, min_quantity, price_per_min_usd) = match product.pricing {
            Pricing::Tiered { tiers } => (true, Some(tiers), None, None),
            Pricing::Unit {
                min_quantity,
                price_per_min_usd,
            } => (
                false,
                None,
                Some(min_quantity.get()),
                Some(price_per_min_usd),
            ),
        };

        ProductWire {
            id: product.id,
            name: product.name,
            category_id: product.category_id,
            image: product.image,
            has_tiers,
            tiers,
            min_quantity,
            price_per_min_usd,
            contact_number: product.contact_number,
        }
    }
}
