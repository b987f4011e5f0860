//! Order composition

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    categories::{Category, CategoryKind},
    config::{Navigation, StoreConfig},
    currencies::Currency,
    exchange::format_price,
    payments::PaymentMethod,
    pricing::{Selection, SelectionError, total_usd, validate_selection},
    products::{Pricing, Product},
};

/// Placeholder rendered when no payment method was picked or a referenced
/// tier no longer resolves.
pub const UNSPECIFIED: &str = "غير محددة";

/// Separator line between the message header, body and footer.
const SEPARATOR: &str = "--------------------------";

/// Everything outside the unreserved set is percent-encoded, so the
/// message survives as a URL query value.
const MESSAGE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Errors raised while composing an order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// The buyer left the account identifier blank.
    #[error("an account identifier is required")]
    MissingAccountId,

    /// The selection cannot be ordered.
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Everything an order is composed from.
#[derive(Debug, Clone, Copy)]
pub struct OrderRequest<'a> {
    /// The ordered product.
    pub product: &'a Product,
    /// The product's category, when it still exists.
    pub category: Option<&'a Category>,
    /// The buyer's tier or quantity pick.
    pub selection: &'a Selection,
    /// Currency the total is quoted in.
    pub currency: &'a Currency,
    /// The buyer's payment method, if picked.
    pub payment: Option<&'a PaymentMethod>,
    /// The buyer's account identifier in the topped-up service.
    pub account_id: &'a str,
    /// Storefront settings.
    pub config: &'a StoreConfig,
}

/// A composed order: the human-readable message, the deep link carrying
/// it, and how the link should be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    text: String,
    url: String,
    navigation: Navigation,
}

impl Order {
    /// The plain-text order message.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Deep link opening the messaging service with the message prefilled.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// How the link should be opened.
    #[must_use]
    pub fn navigation(&self) -> Navigation {
        self.navigation
    }
}

/// Compose the order message and its deep link.
///
/// The destination is the product's outbound contact address with every
/// non-digit character stripped; the message is percent-encoded into the
/// link's `text` query parameter.
///
/// # Errors
///
/// Returns an [`OrderError`] when the account identifier is blank or the
/// selection fails [`validate_selection`].
pub fn compose(request: &OrderRequest<'_>) -> Result<Order, OrderError> {
    if request.account_id.trim().is_empty() {
        return Err(OrderError::MissingAccountId);
    }

    validate_selection(request.product, request.selection)?;

    let total = total_usd(request.product, request.selection);
    let price = format_price(total, request.currency);
    let text = message_text(request, &price);

    let digits: String = request
        .product
        .contact_number
        .chars()
        .filter(char::is_ascii_digit)
        .collect();

    let encoded = utf8_percent_encode(&text, MESSAGE_ENCODE_SET);
    let url = format!(
        "https://{}/{digits}?text={encoded}",
        request.config.messaging_domain
    );

    Ok(Order {
        text,
        url,
        navigation: request.config.navigation,
    })
}

/// Lay the message out line by line: a bold store header, a separator, the
/// category and product block, the selection, the price, payment and
/// account lines, and a closing request.
fn message_text(request: &OrderRequest<'_>, price: &str) -> String {
    let product = request.product;
    let mut lines: SmallVec<[String; 12]> = SmallVec::new();

    lines.push(format!("*{}*", request.config.store_name));
    lines.push(SEPARATOR.to_owned());

    let kind = request
        .category
        .map_or(CategoryKind::General, |category| {
            CategoryKind::of(&category.id)
        });

    match kind {
        CategoryKind::Games => {
            lines.push("💎 القسم: شحن الألعاب".to_owned());
            lines.push(format!("🎮 اسم المنتج: {}", product.name));
        }
        CategoryKind::Apps => {
            lines.push("📱 القسم: شحن البرامج".to_owned());
            lines.push(format!("🏷️ اسم المنتج: {}", product.name));
        }
        CategoryKind::General => {
            let name = request
                .category
                .map(|category| category.name.as_str())
                .filter(|name| !name.is_empty())
                .unwrap_or("عام");

            lines.push(format!("📁 القسم: {name}"));
            lines.push(format!("🏷️ اسم المنتج: {}", product.name));
        }
    }

    lines.push(selection_line(product, request.selection));
    lines.push(format!("💰 السعر: {price}"));

    let payment = request
        .payment
        .map_or(UNSPECIFIED, |payment| payment.name.as_str());

    lines.push(format!("💳 وسيلة الدفع: {payment}"));
    lines.push(format!("🆔 ID الحساب: {}", request.account_id));
    lines.push(SEPARATOR.to_owned());
    lines.push("يرجى مراجعة طلبي وتأكيد الشحن.".to_owned());

    lines.join("\n")
}

/// The line describing what was picked: the tier's name, or the unit
/// quantity. A tier that no longer resolves reads as unspecified.
fn selection_line(product: &Product, selection: &Selection) -> String {
    match selection {
        Selection::Tier { tier_id } => {
            let name = match &product.pricing {
                Pricing::Tiered { tiers } => tiers
                    .iter()
                    .find(|tier| &tier.id == tier_id)
                    .map_or(UNSPECIFIED, |tier| tier.name.as_str()),
                Pricing::Unit { .. } => UNSPECIFIED,
            };

            format!("📦 الفئة المختارة: {name}")
        }
        Selection::Quantity { quantity } => format!("🔢 الكمية: {quantity}"),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{catalog::Catalog, fixtures::seed};

    struct Checkout {
        catalog: Catalog,
        config: StoreConfig,
    }

    impl Checkout {
        fn new() -> Self {
            Self {
                catalog: seed(),
                config: StoreConfig::default(),
            }
        }

        fn compose(
            &self,
            product_id: &str,
            selection: &Selection,
            payment_id: Option<&str>,
            account_id: &str,
        ) -> TestResult<Order> {
            let product = self
                .catalog
                .product(product_id)
                .ok_or("product missing from the seed catalog")?;
            let currency = self
                .catalog
                .currency_by_code("USD")
                .ok_or("USD missing from the seed catalog")?;
            let payment = payment_id.and_then(|id| self.catalog.payment(id));

            let order = compose(&OrderRequest {
                product,
                category: self.catalog.category(&product.category_id),
                selection,
                currency,
                payment,
                account_id,
                config: &self.config,
            })?;

            Ok(order)
        }
    }

    fn count_lines_with(text: &str, needle: &str) -> usize {
        text.lines().filter(|line| line.contains(needle)).count()
    }

    #[test]
    fn a_tier_order_states_each_fact_on_exactly_one_line() -> TestResult {
        let checkout = Checkout::new();

        let order = checkout.compose("p1", &Selection::tier("t1"), Some("1"), "12345")?;
        let text = order.text();

        assert_eq!(count_lines_with(text, "60 شدة"), 1);
        assert_eq!(count_lines_with(text, "0.99 $"), 1);
        assert_eq!(count_lines_with(text, "كريمي"), 1);
        assert_eq!(count_lines_with(text, "12345"), 1);

        Ok(())
    }

    #[test]
    fn the_message_is_framed_by_the_header_and_the_closing_line() -> TestResult {
        let checkout = Checkout::new();

        let order = checkout.compose("p1", &Selection::tier("t1"), Some("1"), "12345")?;
        let text = order.text();

        assert!(text.starts_with("*ترند كارد (Trend Card)*\n"));
        assert!(text.ends_with("\nيرجى مراجعة طلبي وتأكيد الشحن."));
        assert_eq!(
            text.lines().filter(|line| *line == SEPARATOR).count(),
            2,
            "the body must sit between two separator lines"
        );

        Ok(())
    }

    #[test]
    fn game_orders_use_the_games_section_labels() -> TestResult {
        let checkout = Checkout::new();

        let order = checkout.compose("p1", &Selection::tier("t1"), None, "12345")?;
        let text = order.text();

        assert_eq!(count_lines_with(text, "💎 القسم: شحن الألعاب"), 1);
        assert_eq!(count_lines_with(text, "🎮 اسم المنتج: شدات ببجي"), 1);
        assert_eq!(count_lines_with(text, "📦 الفئة المختارة: 60 شدة"), 1);

        Ok(())
    }

    #[test]
    fn app_orders_use_the_apps_section_labels_and_a_quantity_line() -> TestResult {
        let checkout = Checkout::new();

        let order = checkout.compose("p2", &Selection::quantity(2000), None, "u-1")?;
        let text = order.text();

        assert_eq!(count_lines_with(text, "📱 القسم: شحن البرامج"), 1);
        assert_eq!(count_lines_with(text, "🏷️ اسم المنتج: شحن يويو (Yoyo)"), 1);
        assert_eq!(count_lines_with(text, "🔢 الكمية: 2000"), 1);
        assert_eq!(count_lines_with(text, "💰 السعر: 1.61 $"), 1);
        assert_eq!(count_lines_with(text, "📦"), 0);

        Ok(())
    }

    #[test]
    fn orders_outside_the_known_sections_fall_back_to_the_general_labels() -> TestResult {
        let checkout = Checkout::new();
        let product = checkout
            .catalog
            .product("p1")
            .ok_or("p1 missing from the seed catalog")?;
        let currency = checkout
            .catalog
            .currency_by_code("USD")
            .ok_or("USD missing from the seed catalog")?;
        let selection = Selection::tier("t1");

        let order = compose(&OrderRequest {
            product,
            category: checkout.catalog.category("cards"),
            selection: &selection,
            currency,
            payment: None,
            account_id: "12345",
            config: &checkout.config,
        })?;

        assert_eq!(
            count_lines_with(order.text(), "📁 القسم: البطاقات الإلكترونية"),
            1
        );
        assert_eq!(count_lines_with(order.text(), "🏷️ اسم المنتج: شدات ببجي"), 1);

        Ok(())
    }

    #[test]
    fn a_dangling_category_reads_as_the_general_section() -> TestResult {
        let checkout = Checkout::new();
        let product = checkout
            .catalog
            .product("p1")
            .ok_or("p1 missing from the seed catalog")?;
        let currency = checkout
            .catalog
            .currency_by_code("USD")
            .ok_or("USD missing from the seed catalog")?;
        let selection = Selection::tier("t1");

        let order = compose(&OrderRequest {
            product,
            category: None,
            selection: &selection,
            currency,
            payment: None,
            account_id: "12345",
            config: &checkout.config,
        })?;

        assert_eq!(count_lines_with(order.text(), "📁 القسم: عام"), 1);

        Ok(())
    }

    #[test]
    fn an_unpicked_payment_reads_as_unspecified() -> TestResult {
        let checkout = Checkout::new();

        let order = checkout.compose("p1", &Selection::tier("t1"), None, "12345")?;

        assert_eq!(
            count_lines_with(order.text(), "💳 وسيلة الدفع: غير محددة"),
            1
        );

        Ok(())
    }

    #[test]
    fn an_unresolved_tier_reads_as_unspecified_and_prices_at_zero() -> TestResult {
        let checkout = Checkout::new();

        let order = checkout.compose("p1", &Selection::tier("gone"), None, "12345")?;
        let text = order.text();

        assert_eq!(count_lines_with(text, "📦 الفئة المختارة: غير محددة"), 1);
        assert_eq!(count_lines_with(text, "💰 السعر: 0 $"), 1);

        Ok(())
    }

    #[test]
    fn the_deep_link_targets_the_contact_digits() -> TestResult {
        let checkout = Checkout::new();

        let order = checkout.compose("p1", &Selection::tier("t1"), Some("1"), "12345")?;

        assert!(
            order.url().starts_with("https://wa.me/967735670700?text="),
            "unexpected deep link {}",
            order.url()
        );

        Ok(())
    }

    #[test]
    fn every_non_digit_is_stripped_from_the_contact_address() -> TestResult {
        let checkout = Checkout::new();
        let mut product = checkout
            .catalog
            .product("p1")
            .ok_or("p1 missing from the seed catalog")?
            .clone();
        product.contact_number = "+1 (555) 123-4567".to_owned();
        let currency = checkout
            .catalog
            .currency_by_code("USD")
            .ok_or("USD missing from the seed catalog")?;
        let selection = Selection::tier("t1");

        let order = compose(&OrderRequest {
            product: &product,
            category: None,
            selection: &selection,
            currency,
            payment: None,
            account_id: "12345",
            config: &checkout.config,
        })?;

        assert!(order.url().starts_with("https://wa.me/15551234567?text="));

        Ok(())
    }

    #[test]
    fn the_message_is_percent_encoded_into_the_link() -> TestResult {
        let checkout = Checkout::new();

        let order = checkout.compose("p1", &Selection::tier("t1"), Some("1"), "12345")?;
        let url = order.url();

        assert!(!url.contains(' '), "spaces must be encoded in {url}");
        assert!(!url.contains('\n'), "newlines must be encoded in {url}");
        assert!(
            url.contains("?text=*"),
            "the unreserved set must survive encoding in {url}"
        );
        assert!(url.contains("%0A"), "line breaks must encode as %0A in {url}");

        Ok(())
    }

    #[test]
    fn a_blank_account_identifier_is_rejected() -> TestResult {
        let checkout = Checkout::new();
        let product = checkout
            .catalog
            .product("p1")
            .ok_or("p1 missing from the seed catalog")?;
        let currency = checkout
            .catalog
            .currency_by_code("USD")
            .ok_or("USD missing from the seed catalog")?;
        let selection = Selection::tier("t1");

        for account_id in ["", "   ", "\t\n"] {
            let result = compose(&OrderRequest {
                product,
                category: None,
                selection: &selection,
                currency,
                payment: None,
                account_id,
                config: &checkout.config,
            });

            assert!(
                matches!(result, Err(OrderError::MissingAccountId)),
                "account id {account_id:?} must be rejected"
            );
        }

        Ok(())
    }

    #[test]
    fn a_below_minimum_quantity_blocks_composition() -> TestResult {
        let checkout = Checkout::new();
        let product = checkout
            .catalog
            .product("p2")
            .ok_or("p2 missing from the seed catalog")?;
        let currency = checkout
            .catalog
            .currency_by_code("USD")
            .ok_or("USD missing from the seed catalog")?;
        let selection = Selection::quantity(999);

        let result = compose(&OrderRequest {
            product,
            category: None,
            selection: &selection,
            currency,
            payment: None,
            account_id: "u-1",
            config: &checkout.config,
        });

        assert!(matches!(
            result,
            Err(OrderError::Selection(
                SelectionError::BelowMinimumQuantity { minimum: 1000 }
            ))
        ));

        Ok(())
    }

    #[test]
    fn the_configured_navigation_mode_is_carried_through() -> TestResult {
        let mut checkout = Checkout::new();
        checkout.config.navigation = Navigation::Redirect;

        let order = checkout.compose("p1", &Selection::tier("t1"), None, "12345")?;

        assert_eq!(order.navigation(), Navigation::Redirect);

        Ok(())
    }
}
