//! Souk prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogError},
    categories::{Category, CategoryKind},
    config::{Navigation, StoreConfig},
    currencies::{Currency, CurrencyError},
    exchange::{convert, format_price},
    fixtures::{FixtureError, seed},
    order::{Order, OrderError, OrderRequest, UNSPECIFIED, compose},
    payments::{DisclosedField, PaymentMethod},
    pricing::{
        Selection, SelectionError, adjust_quantity, starting_price_usd, total_usd,
        validate_selection,
    },
    products::{Pricing, Product, ProductError, Tier, compose_contact_number},
    session::{DetectionSignals, Session, Theme},
};
