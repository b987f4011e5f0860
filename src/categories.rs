//! Categories

use serde::{Deserialize, Serialize};

/// A catalog category.
///
/// Categories own their products by reference: a product names the category
/// it belongs to via `categoryId`. Removing a category removes its products
/// with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Opaque, caller-unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Image URI shown on category cards.
    pub image: String,
}

/// Which family of order-message labels a category uses.
///
/// The seed catalog ships well-known `games` and `apps` categories with
/// their own wording; every other category gets the general labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    /// Game credit top-ups.
    Games,
    /// App credit top-ups.
    Apps,
    /// Anything else, including products whose category reference dangles.
    General,
}

impl CategoryKind {
    /// Classify a category id.
    #[must_use]
    pub fn of(category_id: &str) -> Self {
        match category_id {
            "games" => Self::Games,
            "apps" => Self::Apps,
            _ => Self::General,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_seed_category_ids_have_their_own_kinds() {
        assert_eq!(CategoryKind::of("games"), CategoryKind::Games);
        assert_eq!(CategoryKind::of("apps"), CategoryKind::Apps);
    }

    #[test]
    fn unknown_category_ids_are_general() {
        assert_eq!(CategoryKind::of("cards"), CategoryKind::General);
        assert_eq!(CategoryKind::of(""), CategoryKind::General);
    }
}
