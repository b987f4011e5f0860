//! Prices

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

use crate::products::{Pricing, Product};

/// Errors raised while validating a buyer's selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// The requested quantity is below the product's minimum order.
    #[error("the minimum order quantity is {minimum}")]
    BelowMinimumQuantity {
        /// The smallest quantity the product can be ordered in.
        minimum: u32,
    },
}

/// What the buyer picked on a product page: one of a tiered product's
/// tiers, or a quantity of a per-unit product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A pick of a named tier.
    Tier {
        /// Id of the picked tier.
        tier_id: String,
    },
    /// A pick of a unit quantity.
    Quantity {
        /// The requested number of units.
        quantity: u32,
    },
}

impl Selection {
    /// A pick of the tier with the given id.
    pub fn tier(tier_id: impl Into<String>) -> Self {
        Self::Tier {
            tier_id: tier_id.into(),
        }
    }

    /// A pick of a unit quantity.
    #[must_use]
    pub fn quantity(quantity: u32) -> Self {
        Self::Quantity { quantity }
    }

    /// The selection a product page starts from: the first tier of a tiered
    /// product, or the minimum quantity of a per-unit product. `None` for a
    /// tiered product with no tiers.
    #[must_use]
    pub fn default_for(product: &Product) -> Option<Self> {
        match &product.pricing {
            Pricing::Tiered { .. } => product.default_tier().map(|tier| Self::tier(&tier.id)),
            Pricing::Unit { min_quantity, .. } => Some(Self::quantity(min_quantity.get())),
        }
    }
}

/// The base-currency total of a selection.
///
/// A tier pick resolves to that tier's exact listed price. A quantity pick
/// scales the per-minimum price linearly: `quantity × price ÷ minimum`,
/// multiplying before dividing so exact results stay exact. A selection
/// that does not fit the product's pricing mode totals zero.
#[must_use]
pub fn total_usd(product: &Product, selection: &Selection) -> Decimal {
    match (&product.pricing, selection) {
        (Pricing::Tiered { tiers }, Selection::Tier { tier_id }) => tiers
            .iter()
            .find(|tier| &tier.id == tier_id)
            .map_or_else(
                || {
                    warn!(product = %product.id, tier = %tier_id, "unknown tier priced at zero");
                    Decimal::ZERO
                },
                |tier| tier.price_usd,
            ),
        (
            Pricing::Unit {
                min_quantity,
                price_per_min_usd,
            },
            Selection::Quantity { quantity },
        ) => Decimal::from(*quantity) * *price_per_min_usd / Decimal::from(min_quantity.get()),
        _ => {
            warn!(product = %product.id, "selection does not match the pricing mode, priced at zero");
            Decimal::ZERO
        }
    }
}

/// The cheapest base-currency price a product can be bought at: the least
/// tier price, or the per-minimum price. Zero for a tiered product with no
/// tiers.
#[must_use]
pub fn starting_price_usd(product: &Product) -> Decimal {
    match &product.pricing {
        Pricing::Tiered { tiers } => tiers
            .iter()
            .map(|tier| tier.price_usd)
            .min()
            .unwrap_or(Decimal::ZERO),
        Pricing::Unit {
            price_per_min_usd, ..
        } => *price_per_min_usd,
    }
}

/// Step a per-unit quantity up or down by `delta` steps of `step` units,
/// clamping at the product's minimum. Tiered products are returned
/// unchanged.
#[must_use]
pub fn adjust_quantity(product: &Product, current: u32, delta: i32, step: u32) -> u32 {
    let Pricing::Unit { min_quantity, .. } = &product.pricing else {
        return current;
    };

    let stepped = i64::from(current) + i64::from(delta) * i64::from(step);
    let clamped = stepped.max(i64::from(min_quantity.get()));

    u32::try_from(clamped).unwrap_or(u32::MAX)
}

/// Check that a selection can be ordered.
///
/// # Errors
///
/// Returns [`SelectionError::BelowMinimumQuantity`] for a quantity pick
/// below a per-unit product's minimum.
pub fn validate_selection(product: &Product, selection: &Selection) -> Result<(), SelectionError> {
    if let Pricing::Unit { min_quantity, .. } = &product.pricing
        && let Selection::Quantity { quantity } = selection
        && *quantity < min_quantity.get()
    {
        return Err(SelectionError::BelowMinimumQuantity {
            minimum: min_quantity.get(),
        });
    }

    Ok(())
}
