//! Conversion from base-currency prices to display prices.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::currencies::Currency;

/// Convert a base-currency amount into `currency` at its stored rate.
///
/// The result is exact; rounding happens only at display time in
/// [`format_price`].
#[must_use]
pub fn convert(price_usd: Decimal, currency: &Currency) -> Decimal {
    price_usd * currency.rate
}

/// Convert `price_usd` into `currency` and render it for display: at most
/// two decimal places, half-up, trailing zeros dropped, digits grouped in
/// thousands, followed by the currency symbol.
///
/// ```
/// use rust_decimal::Decimal;
/// use souk::{currencies::Currency, exchange::format_price};
///
/// let usd = Currency {
///     id: "1".into(),
///     code: "USD".into(),
///     name: "US Dollar".into(),
///     symbol: "$".into(),
///     rate: Decimal::ONE,
///     is_active: true,
/// };
///
/// assert_eq!(format_price(Decimal::new(99, 2), &usd), "0.99 $");
/// ```
#[must_use]
pub fn format_price(price_usd: Decimal, currency: &Currency) -> String {
    let amount = convert(price_usd, currency)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    format!("{} {}", group_thousands(amount), currency.symbol)
}

/// Render a decimal with commas between thousands groups of the integer
/// part. The fractional part, if any, is carried through untouched.
fn group_thousands(amount: Decimal) -> String {
    let rendered = amount.to_string();

    let (with_sign, fraction) = match rendered.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (rendered.as_str(), None),
    };

    let (sign, integer) = match with_sign.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", with_sign),
    };

    let count = integer.chars().count();
    let mut grouped = String::with_capacity(rendered.len() + count / 3);

    grouped.push_str(sign);

    for (idx, digit) in integer.chars().enumerate() {
        if idx > 0 && (count - idx) % 3 == 0 {
            grouped.push(',');
        }

        grouped.push(digit);
    }

    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    grouped
}
