use std::fmt;

use clap::Args;
use jiff::Timestamp;
use reptitrack::{payment::CardDetails, products::ProductId};
use reptitrack_app::{
    cart::PurchaseError,
    checkout::CheckoutFlowError,
    context::AppContext,
};
use tracing::warn;

use crate::cli::render::{cart_table, report_table};

#[derive(Args)]
pub(crate) struct CheckoutArgs {
    /// Product and quantity to buy, as `ID:QTY` (repeatable)
    #[arg(long = "item", value_parser = parse_item, required = true)]
    items: Vec<(ProductId, u32)>,

    /// Card number, 16 digits
    #[arg(long)]
    card_number: String,

    /// Name on the card
    #[arg(long)]
    cardholder: String,

    /// Expiry month (1-12)
    #[arg(long)]
    expiry_month: String,

    /// Expiry year (four digits)
    #[arg(long)]
    expiry_year: String,

    /// Card verification value
    #[arg(long, env = "CARD_CVV", hide_env_values = true)]
    cvv: String,
}

impl fmt::Debug for CheckoutArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutArgs")
            .field("items", &self.items)
            .field("cardholder", &self.cardholder)
            .finish_non_exhaustive()
    }
}

pub(crate) async fn run(ctx: &AppContext, args: CheckoutArgs) -> Result<(), String> {
    if !ctx.session.is_logged_in(Timestamp::now()) {
        return Err("not signed in: set API_TOKEN or run `reptitrack login`".to_string());
    }

    for &(id, quantity) in &args.items {
        let product = ctx
            .products
            .get_product(id)
            .await
            .map_err(|error| format!("failed to load product {id}: {error}"))?;

        if !product.is_purchasable() {
            warn!(product_id = %id, stock = product.stock, "product may not be available");
        }

        ctx.cart
            .add_to_cart(product, quantity)
            .map_err(|error| format!("cannot add product {id}: {error}"))?;
    }

    println!("{}", cart_table(&ctx.cart.snapshot()));

    ctx.checkout.begin().map_err(|error| error.to_string())?;

    let details = CardDetails {
        card_number: args.card_number,
        cardholder_name: args.cardholder,
        expiry_month: args.expiry_month,
        expiry_year: args.expiry_year,
        cvv: args.cvv,
    };

    match ctx.checkout.submit(details).await {
        Ok(report) => {
            println!("{}", report_table(&report));

            if let Some(message) = ctx.cart.success() {
                println!("{message}");
            }

            Ok(())
        }
        Err(CheckoutFlowError::Invalid(errors)) => {
            for (field, error) in errors.iter() {
                println!("{field}: {error}");
            }

            Err("payment details are invalid".to_string())
        }
        Err(CheckoutFlowError::Purchase(PurchaseError::Partial(report))) => {
            println!("{}", report_table(&report));

            Err(ctx
                .cart
                .error()
                .unwrap_or_else(|| "purchase failed".to_string()))
        }
        Err(error) => Err(error.to_string()),
    }
}

fn parse_item(value: &str) -> Result<(ProductId, u32), String> {
    let (id, quantity) = value
        .split_once(':')
        .unwrap_or((value, "1"));

    let id = id
        .trim()
        .parse::<i64>()
        .map_err(|error| format!("invalid product id `{id}`: {error}"))?;

    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("invalid quantity `{quantity}`: {error}"))?;

    if quantity == 0 {
        return Err("quantity must be at least 1".to_string());
    }

    Ok((ProductId::new(id), quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_with_quantity() {
        assert_eq!(parse_item("12:3"), Ok((ProductId::new(12), 3)));
    }

    #[test]
    fn item_without_quantity_buys_one() {
        assert_eq!(parse_item("12"), Ok((ProductId::new(12), 1)));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        assert!(parse_item("12:0").is_err());
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        assert!(parse_item("lamp:2").is_err());
    }
}
