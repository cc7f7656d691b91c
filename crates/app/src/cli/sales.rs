use clap::{Args, Subcommand};
use reptitrack_app::context::AppContext;

use crate::cli::render::sales_table;

#[derive(Debug, Args)]
pub(crate) struct SalesCommand {
    #[command(subcommand)]
    command: SalesSubcommand,
}

#[derive(Debug, Subcommand)]
enum SalesSubcommand {
    /// List sales
    List {
        /// Only the signed-in client's sales
        #[arg(long)]
        mine: bool,
    },

    /// Show one sale
    Show {
        /// Sale identifier
        #[arg(long)]
        id: i64,
    },
}

pub(crate) async fn run(ctx: &AppContext, command: SalesCommand) -> Result<(), String> {
    let sales = match command.command {
        SalesSubcommand::List { mine: true } => ctx.sales.list_my_sales().await,
        SalesSubcommand::List { mine: false } => ctx.sales.list_sales().await,
        SalesSubcommand::Show { id } => ctx.sales.get_sale(id).await.map(|sale| vec![sale]),
    }
    .map_err(|error| format!("failed to load sales: {error}"))?;

    if sales.is_empty() {
        println!("no sales found");
        return Ok(());
    }

    println!("{}", sales_table(&sales));

    Ok(())
}
