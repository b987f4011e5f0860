//! Catalog

use std::{fs, path::Path};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    categories::Category,
    currencies::{Currency, CurrencyError},
    fixtures,
    payments::PaymentMethod,
    products::{Product, ProductError},
};

/// Errors raised by catalog validation and administrative operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The base currency can never be removed.
    #[error("currency {0} is the base currency and cannot be removed")]
    BaseCurrency(String),

    /// Currency codes are unique within a catalog.
    #[error("duplicate currency code {0}")]
    DuplicateCurrencyCode(String),

    /// Ids are unique within each collection.
    #[error("duplicate {kind} id {id}")]
    DuplicateId {
        /// Collection the duplicate was found in.
        kind: &'static str,
        /// The repeated id.
        id: String,
    },

    /// Invalid currency record.
    #[error(transparent)]
    Currency(#[from] CurrencyError),

    /// Invalid product record.
    #[error(transparent)]
    Product(#[from] ProductError),

    /// Malformed snapshot document.
    #[error("failed to parse catalog snapshot")]
    Snapshot(#[source] serde_json::Error),

    /// IO error reading or writing a snapshot file.
    #[error("failed to read or write catalog snapshot")]
    Io(#[from] std::io::Error),
}

/// The aggregate the storefront works against: currencies, categories,
/// products and payment methods, persisted and handed around as one unit.
///
/// Collections keep their listed order; lookups are by opaque string id.
/// Mutation goes through the administrative operations, which enforce the
/// base-currency guard, code uniqueness and the category cascade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatalogWire", into = "CatalogWire")]
pub struct Catalog {
    pub(crate) currencies: Vec<Currency>,
    pub(crate) categories: Vec<Category>,
    pub(crate) products: Vec<Product>,
    pub(crate) payments: Vec<PaymentMethod>,
}

impl Catalog {
    /// Build a catalog from its collections, checking every record and the
    /// cross-record invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on an invalid record, a duplicated id or a
    /// duplicated currency code.
    pub fn new(
        currencies: Vec<Currency>,
        categories: Vec<Category>,
        products: Vec<Product>,
        payments: Vec<PaymentMethod>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            currencies,
            categories,
            products,
            payments,
        };

        catalog.validate()?;

        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut codes = FxHashSet::default();

        for currency in &self.currencies {
            currency.validate()?;

            if !codes.insert(currency.code.as_str()) {
                return Err(CatalogError::DuplicateCurrencyCode(currency.code.clone()));
            }
        }

        for product in &self.products {
            product.validate()?;
        }

        unique_ids("currency", self.currencies.iter().map(|c| c.id.as_str()))?;
        unique_ids("category", self.categories.iter().map(|c| c.id.as_str()))?;
        unique_ids("product", self.products.iter().map(|p| p.id.as_str()))?;
        unique_ids("payment", self.payments.iter().map(|p| p.id.as_str()))?;

        Ok(())
    }

    /// All currencies, in listed order.
    #[must_use]
    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    /// Currencies offered in buyer-facing selectors.
    pub fn active_currencies(&self) -> impl Iterator<Item = &Currency> {
        self.currencies.iter().filter(|currency| currency.is_active)
    }

    /// Look up a currency by id.
    #[must_use]
    pub fn currency(&self, id: &str) -> Option<&Currency> {
        self.currencies.iter().find(|currency| currency.id == id)
    }

    /// Look up a currency by code.
    #[must_use]
    pub fn currency_by_code(&self, code: &str) -> Option<&Currency> {
        self.currencies.iter().find(|currency| currency.code == code)
    }

    /// All categories, in listed order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by id.
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// All products, in listed order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// The products of one category, in listed order.
    pub fn products_in_category<'a>(
        &'a self,
        category_id: &'a str,
    ) -> impl Iterator<Item = &'a Product> {
        self.products
            .iter()
            .filter(move |product| product.category_id == category_id)
    }

    /// All payment methods, in listed order.
    #[must_use]
    pub fn payments(&self) -> &[PaymentMethod] {
        &self.payments
    }

    /// Look up a payment method by id.
    #[must_use]
    pub fn payment(&self, id: &str) -> Option<&PaymentMethod> {
        self.payments.iter().find(|payment| payment.id == id)
    }

    /// Payment methods offered in buyer-facing selectors. The first one is
    /// the default checkout selection.
    pub fn active_payments(&self) -> impl Iterator<Item = &PaymentMethod> {
        self.payments.iter().filter(|payment| payment.is_active)
    }

    /// Insert a currency, or replace the one sharing its id.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when the rate is not positive or the code
    /// is already taken by a different currency.
    pub fn upsert_currency(&mut self, currency: Currency) -> Result<(), CatalogError> {
        currency.validate()?;

        let code_taken = self
            .currencies
            .iter()
            .any(|existing| existing.code == currency.code && existing.id != currency.id);

        if code_taken {
            return Err(CatalogError::DuplicateCurrencyCode(currency.code));
        }

        upsert(&mut self.currencies, currency, |a, b| a.id == b.id);

        Ok(())
    }

    /// Remove a currency by id. Removing an id that is not present is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::BaseCurrency`] when the currency is the base
    /// currency; the catalog is left unchanged.
    pub fn remove_currency(&mut self, id: &str) -> Result<(), CatalogError> {
        if let Some(currency) = self.currency(id)
            && currency.is_base()
        {
            return Err(CatalogError::BaseCurrency(currency.code.clone()));
        }

        self.currencies.retain(|currency| currency.id != id);

        Ok(())
    }

    /// Insert a category, or replace the one sharing its id.
    pub fn upsert_category(&mut self, category: Category) {
        upsert(&mut self.categories, category, |a, b| a.id == b.id);
    }

    /// Remove a category by id, cascading to every product that references
    /// it. Removing an id that is not present is a no-op.
    pub fn remove_category(&mut self, id: &str) {
        let owned = self
            .products
            .iter()
            .filter(|product| product.category_id == id)
            .count();

        debug!(category = id, products = owned, "removing category and its products");

        self.categories.retain(|category| category.id != id);
        self.products.retain(|product| product.category_id != id);
    }

    /// Insert a product, or replace the one sharing its id.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when a tier or unit price is negative.
    pub fn upsert_product(&mut self, product: Product) -> Result<(), CatalogError> {
        product.validate()?;

        upsert(&mut self.products, product, |a, b| a.id == b.id);

        Ok(())
    }

    /// Remove a product by id. Removing an id that is not present is a
    /// no-op.
    pub fn remove_product(&mut self, id: &str) {
        self.products.retain(|product| product.id != id);
    }

    /// Insert a payment method, or replace the one sharing its id.
    pub fn upsert_payment(&mut self, payment: PaymentMethod) {
        upsert(&mut self.payments, payment, |a, b| a.id == b.id);
    }

    /// Remove a payment method by id. Removing an id that is not present is
    /// a no-op.
    pub fn remove_payment(&mut self, id: &str) {
        self.payments.retain(|payment| payment.id != id);
    }

    /// Serialize the catalog into its snapshot document.
    ///
    /// Decimal values are stored as strings; [`Catalog::from_json`] accepts
    /// both the string and the plain numeric form.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Snapshot`] if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        serde_json::to_string(self).map_err(CatalogError::Snapshot)
    }

    /// Parse a snapshot document.
    ///
    /// Missing collections default to empty, so a partial or empty document
    /// loads as a partial catalog rather than failing.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Snapshot`] on malformed JSON or a record that
    /// fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(json).map_err(CatalogError::Snapshot)
    }

    /// Read and parse a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_json(&contents)
    }

    /// Write the snapshot file.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if serialization or the write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        fs::write(path, self.to_json()?)?;

        Ok(())
    }

    /// Read a snapshot file, falling back to the seed catalog when the file
    /// is missing or unreadable.
    #[must_use]
    pub fn load_or_seed(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            debug!(path = %path.display(), "no catalog snapshot, starting from the seed catalog");
            return fixtures::seed();
        }

        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(err) => {
                warn!(%err, path = %path.display(), "unreadable catalog snapshot, starting from the seed catalog");
                fixtures::seed()
            }
        }
    }
}

fn unique_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = FxHashSet::default();

    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_owned(),
            });
        }
    }

    Ok(())
}

fn upsert<T>(records: &mut Vec<T>, record: T, same: impl Fn(&T, &T) -> bool) {
    match records.iter_mut().find(|existing| same(existing, &record)) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
}

/// Stored layout of a [`Catalog`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogWire {
    #[serde(default)]
    currencies: Vec<Currency>,
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    payments: Vec<PaymentMethod>,
}

impl TryFrom<CatalogWire> for Catalog {
    type Error = CatalogError;

    fn try_from(wire: CatalogWire) -> Result<Self, Self::Error> {
        Catalog::new(wire.currencies, wire.categories, wire.products, wire.payments)
    }
}

impl From<Catalog> for CatalogWire {
    fn from(catalog: Catalog) -> Self {
        CatalogWire {
            currencies: catalog.currencies,
            categories: catalog.categories,
            products: catalog.products,
            payments: catalog.payments,
        }
    }
}
