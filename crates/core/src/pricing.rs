//! Prices

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, MXN, USD},
};

/// Price of `quantity` units at `unit` price.
///
/// Saturates at `i64::MAX` minor units instead of overflowing.
pub fn line_total<'a>(unit: &Money<'a, Currency>, quantity: u32) -> Money<'a, Currency> {
    let minor_units = unit
        .to_minor_units()
        .saturating_mul(i64::from(quantity));

    Money::from_minor(minor_units, unit.currency())
}

/// Sum of `prices`, all expressed in `currency`.
///
/// An empty iterator yields zero in `currency`.
pub fn total_price<'a>(
    currency: &'a Currency,
    prices: impl IntoIterator<Item = Money<'a, Currency>>,
) -> Money<'a, Currency> {
    let minor_units = prices
        .into_iter()
        .map(|price| price.to_minor_units())
        .fold(0_i64, i64::saturating_add);

    Money::from_minor(minor_units, currency)
}

/// Convert a decimal amount (e.g. `19.99`) into minor units of `currency`.
///
/// Returns `None` when the scaled amount does not fit into an `i64`.
pub fn minor_units_from_decimal(amount: Decimal, currency: &Currency) -> Option<i64> {
    amount
        .checked_mul(scale(currency)?)
        .and_then(|value| value.round_dp(0).to_i64())
}

/// Decimal amount of `money` (e.g. `1999` minor MXN becomes `19.99`).
pub fn decimal_from_money(money: &Money<'_, Currency>) -> Decimal {
    Decimal::new(money.to_minor_units(), money.currency().exponent)
}

/// Catalog currency for an ISO alpha code (`MXN`, `USD`, `EUR`, `GBP`).
pub fn currency_from_code(code: &str) -> Option<&'static Currency> {
    match code.trim().to_ascii_uppercase().as_str() {
        "MXN" => Some(MXN),
        "USD" => Some(USD),
        "EUR" => Some(EUR),
        "GBP" => Some(GBP),
        _ => None,
    }
}

fn scale(currency: &Currency) -> Option<Decimal> {
    10_i64.checked_pow(currency.exponent).map(Decimal::from)
}
