//! Cart and payment scenarios

use jiff::civil::date;
use reptitrack::prelude::*;
use rusty_money::{
    Money,
    iso::{Currency, USD},
};
use testresult::TestResult;

fn product(id: i64, price: i64, currency: &'static Currency) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Sensor {id}"),
        description: None,
        price: Money::from_minor(price, currency),
        stock: 25,
        status: ProductStatus::ACTIVE,
    }
}

#[test]
fn repeated_adds_sum_into_one_line() -> TestResult {
    let mut cart = Cart::new(USD);
    let quantities = [1_u32, 4, 2, 7];

    for quantity in quantities {
        cart.add(product(5, 1_00, USD), quantity)?;
    }

    assert_eq!(cart.len(), 1);
    assert_eq!(
        cart.line(ProductId::new(5)).map(LineItem::quantity),
        Some(quantities.iter().sum::<u32>())
    );

    Ok(())
}

#[test]
fn two_line_cart_totals() -> TestResult {
    let mut cart = Cart::new(USD);

    cart.add(product(1, 10_00, USD), 2)?;
    cart.add(product(2, 5_00, USD), 1)?;

    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.total(), Money::from_minor(25_00, USD));

    Ok(())
}

#[test]
fn total_tracks_quantity_updates() -> TestResult {
    let mut cart = Cart::new(USD);

    cart.add(product(1, 10_00, USD), 2)?;
    cart.add(product(2, 5_00, USD), 1)?;

    cart.update_quantity(ProductId::new(1), 1);
    assert_eq!(cart.total(), Money::from_minor(15_00, USD));

    cart.update_quantity(ProductId::new(2), 0);
    assert_eq!(cart.total(), Money::from_minor(10_00, USD));
    assert_eq!(cart.len(), 1);

    Ok(())
}

#[test]
fn removing_absent_product_leaves_cart_unchanged() -> TestResult {
    let mut cart = Cart::new(USD);
    cart.add(product(1, 10_00, USD), 2)?;
    let before = cart.clone();

    assert!(cart.remove(ProductId::new(99)).is_none());
    assert_eq!(cart, before);

    Ok(())
}

#[test]
fn payment_form_march_2025() {
    let today = date(2025, 3, 1);

    let mut details = CardDetails {
        card_number: "4111111111111111".to_string(),
        cardholder_name: "Luis".to_string(),
        expiry_month: "2".to_string(),
        expiry_year: "2025".to_string(),
        cvv: "1234".to_string(),
    };

    let errors = validate(&details, today).err().unwrap_or_default();
    assert_eq!(errors.get(PaymentField::ExpiryDate), Some(PaymentFieldError::Expired));
    assert_eq!(errors.len(), 1);

    details.expiry_month = "3".to_string();
    assert!(validate(&details, today).is_ok());

    details.expiry_month = "1".to_string();
    details.expiry_year = "2026".to_string();
    assert!(validate(&details, today).is_ok());

    details.cvv = "12".to_string();
    let errors = validate(&details, today).err().unwrap_or_default();
    assert_eq!(errors.get(PaymentField::Cvv), Some(PaymentFieldError::InvalidCvv));
}
