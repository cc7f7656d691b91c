use clap::{Args, Subcommand};
use reptitrack::products::ProductId;
use reptitrack_app::context::AppContext;

use crate::cli::render::products_table;

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List the catalog
    List,

    /// Show one product
    Show {
        /// Product identifier
        #[arg(long)]
        id: i64,
    },
}

pub(crate) async fn run(ctx: &AppContext, command: ProductsCommand) -> Result<(), String> {
    match command.command {
        ProductsSubcommand::List => {
            let products = ctx
                .products
                .list_products()
                .await
                .map_err(|error| format!("failed to list products: {error}"))?;

            if products.is_empty() {
                println!("no products found");
                return Ok(());
            }

            println!("{}", products_table(&products));
        }
        ProductsSubcommand::Show { id } => {
            let product = ctx
                .products
                .get_product(ProductId::new(id))
                .await
                .map_err(|error| format!("failed to load product {id}: {error}"))?;

            println!("{}", products_table(std::slice::from_ref(&product)));

            if let Some(description) = &product.description {
                println!("{description}");
            }
        }
    }

    Ok(())
}
