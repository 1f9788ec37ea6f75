//! Marque CLI - Catalog inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Every make with its category and product totals
//! marque-cli catalog makes
//!
//! # The nested category tree
//! marque-cli catalog tree
//!
//! # Products under a make (descendants included), one category, or all
//! marque-cli catalog products --make bmw
//! marque-cli catalog products --category x5-g05
//! marque-cli catalog products --all
//! ```
//!
//! Reads the same `WOOCOMMERCE_*` environment variables as the storefront
//! and prints JSON to stdout. Logs go to stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "marque-cli")]
#[command(author, version, about = "Marque catalog tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the upstream catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List makes with category and product totals
    Makes,
    /// Print the nested category tree
    Tree,
    /// List products
    Products(ProductFilter),
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ProductFilter {
    /// Make slug or name; includes every category below it
    #[arg(long)]
    make: Option<String>,

    /// Exact category slug
    #[arg(long)]
    category: Option<String>,

    /// Every published product
    #[arg(long)]
    all: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing; stdout is reserved for JSON output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marque_storefront=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => {
            let catalog = commands::catalog::connect()?;
            match action {
                CatalogAction::Makes => commands::catalog::makes(&catalog).await?,
                CatalogAction::Tree => commands::catalog::tree(&catalog).await?,
                CatalogAction::Products(filter) => {
                    let filter = match (filter.make, filter.category) {
                        (Some(make), _) => commands::catalog::ProductFilter::Make(make),
                        (None, Some(category)) => commands::catalog::ProductFilter::Category(category),
                        (None, None) => commands::catalog::ProductFilter::All,
                    };
                    commands::catalog::products(&catalog, &filter).await?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_products_requires_exactly_one_filter() {
        assert!(Cli::try_parse_from(["marque-cli", "catalog", "products"]).is_err());
        assert!(
            Cli::try_parse_from(["marque-cli", "catalog", "products", "--make", "bmw", "--all"])
                .is_err()
        );
        assert!(Cli::try_parse_from(["marque-cli", "catalog", "products", "--category", "x5"]).is_ok());
    }
}
