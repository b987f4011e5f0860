//! Souk
//!
//! Souk is the catalog, pricing and order-composition core of a storefront for digital top-up products, quoting USD-based prices in admin-defined display currencies.

pub mod catalog;
pub mod categories;
pub mod config;
pub mod currencies;
pub mod exchange;
pub mod fixtures;
pub mod order;
pub mod payments;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod session;
