//! Table rendering for command output.

use std::ops::Range;

use reptitrack::{
    cart::Cart,
    products::{Product, ProductStatus},
    sales::Sale,
};
use reptitrack_app::cart::{LineOutcome, PurchaseReport};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

pub(crate) fn products_table(products: &[Product]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Price", "Stock", "Status"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.price.to_string(),
            product.stock.to_string(),
            status_label(product.status),
        ]);
    }

    finish(builder, 2..4)
}

pub(crate) fn cart_table(cart: &Cart) -> String {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Product", "Qty", "Unit price", "Line total"]);

    for line in cart.lines() {
        let product = line.product();

        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            line.quantity().to_string(),
            product.price.to_string(),
            line.line_total().to_string(),
        ]);
    }

    builder.push_record([
        String::new(),
        "Total".to_string(),
        cart.item_count().to_string(),
        String::new(),
        cart.total().to_string(),
    ]);

    finish(builder, 2..5)
}

pub(crate) fn sales_table(sales: &[Sale]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Product", "Qty", "Total", "Date", "Status"]);

    for sale in sales {
        let product = sale
            .product
            .as_ref()
            .map_or_else(|| sale.product_id.to_string(), |product| product.name.clone());

        builder.push_record([
            sale.id.to_string(),
            product,
            sale.quantity.to_string(),
            sale.total.to_string(),
            sale.sale_date.clone(),
            sale.status.to_string(),
        ]);
    }

    finish(builder, 2..4)
}

pub(crate) fn report_table(report: &PurchaseReport) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Product", "Qty", "Result"]);

    for line in report.lines() {
        let result = match &line.outcome {
            LineOutcome::Succeeded => "recorded".to_string(),
            LineOutcome::Failed(reason) => format!("failed: {reason}"),
        };

        builder.push_record([line.product_id.to_string(), line.quantity.to_string(), result]);
    }

    finish(builder, 1..2)
}

fn status_label(status: ProductStatus) -> String {
    match status {
        ProductStatus::ACTIVE => "active".to_string(),
        ProductStatus::INACTIVE => "inactive".to_string(),
        other => other.code().to_string(),
    }
}

fn finish(builder: Builder, numeric: Range<usize>) -> String {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(numeric), Alignment::right());

    table.to_string()
}
