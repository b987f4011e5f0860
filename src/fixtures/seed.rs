//! The catalog a fresh install starts from.

use std::num::NonZeroU32;

use rust_decimal::Decimal;

use crate::{
    catalog::Catalog,
    categories::Category,
    currencies::Currency,
    payments::PaymentMethod,
    products::{Pricing, Product, Tier},
};

/// Placeholder artwork for seeded categories and products.
const DEFAULT_IMAGE: &str = "https://i.ibb.co/rRq8TGwg/image.jpg";

/// Outbound contact address of the seeded products.
const DEFAULT_CONTACT: &str = "+967735670700";

/// The built-in seed catalog: the base currency plus the Yemeni and Saudi
/// rials, three storefront sections, one tiered and one per-unit product,
/// and three payment methods.
#[must_use]
pub fn seed() -> Catalog {
    Catalog {
        currencies: vec![
            currency("1", "USD", "دولار أمريكي", "$", Decimal::ONE),
            currency("2", "YER", "ريال يمني", "ر.ي", Decimal::from(535)),
            currency("3", "SAR", "ريال سعودي", "ر.س", Decimal::new(375, 2)),
        ],
        categories: vec![
            category("games", "شحن الألعاب"),
            category("apps", "شحن البرامج"),
            category("cards", "البطاقات الإلكترونية"),
        ],
        products: vec![
            Product {
                id: "p1".to_owned(),
                name: "شدات ببجي".to_owned(),
                category_id: "games".to_owned(),
                image: DEFAULT_IMAGE.to_owned(),
                pricing: Pricing::Tiered {
                    tiers: vec![
                        tier("t1", "60 شدة", Decimal::new(99, 2)),
                        tier("t2", "325 شدة", Decimal::new(499, 2)),
                        tier("t3", "660 شدة", Decimal::new(999, 2)),
                    ],
                },
                contact_number: DEFAULT_CONTACT.to_owned(),
            },
            Product {
                id: "p2".to_owned(),
                name: "شحن يويو (Yoyo)".to_owned(),
                category_id: "apps".to_owned(),
                image: DEFAULT_IMAGE.to_owned(),
                pricing: Pricing::Unit {
                    min_quantity: min_quantity(1000),
                    price_per_min_usd: Decimal::new(8053, 4),
                },
                contact_number: DEFAULT_CONTACT.to_owned(),
            },
        ],
        payments: vec![
            payment("1", "كريمي"),
            payment("2", "النجم"),
            payment("3", "تحويل يدوي"),
        ],
    }
}

fn currency(id: &str, code: &str, name: &str, symbol: &str, rate: Decimal) -> Currency {
    Currency {
        id: id.to_owned(),
        code: code.to_owned(),
        name: name.to_owned(),
        symbol: symbol.to_owned(),
        rate,
        is_active: true,
    }
}

fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_owned(),
        name: name.to_owned(),
        image: DEFAULT_IMAGE.to_owned(),
    }
}

fn tier(id: &str, name: &str, price_usd: Decimal) -> Tier {
    Tier {
        id: id.to_owned(),
        name: name.to_owned(),
        price_usd,
    }
}

fn payment(id: &str, name: &str) -> PaymentMethod {
    PaymentMethod {
        id: id.to_owned(),
        name: name.to_owned(),
        is_active: true,
        recipient_name: None,
        account_number: None,
        transfer_number: None,
    }
}

fn min_quantity(units: u32) -> NonZeroU32 {
    NonZeroU32::new(units).unwrap_or(NonZeroU32::MIN)
}
