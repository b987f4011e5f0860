//! Store configuration

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// How a composed order link should be opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Navigation {
    /// Open the link in a new tab or window.
    #[default]
    NewTab,
    /// Navigate the current page to the link.
    Redirect,
}

/// Storefront settings: branding, the messaging service orders are sent
/// through, and quantity stepping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name shown in the order message header.
    pub store_name: String,
    /// Host the order deep link points at.
    pub messaging_domain: String,
    /// How the order link is opened.
    pub navigation: Navigation,
    /// Categories whose per-unit products step in bulk increments.
    pub bulk_quantity_categories: FxHashSet<String>,
    /// The bulk increment, in units.
    pub bulk_quantity_step: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_name: "ترند كارد (Trend Card)".to_owned(),
            messaging_domain: "wa.me".to_owned(),
            navigation: Navigation::default(),
            bulk_quantity_categories: ["apps".to_owned()].into_iter().collect(),
            bulk_quantity_step: 1000,
        }
    }
}

impl StoreConfig {
    /// The quantity increment for products of `category_id`: the bulk step
    /// for bulk categories, one unit otherwise.
    #[must_use]
    pub fn quantity_step(&self, category_id: Option<&str>) -> u32 {
        let bulk = category_id
            .is_some_and(|id| self.bulk_quantity_categories.contains(id));

        if bulk { self.bulk_quantity_step } else { 1 }
    }
}
