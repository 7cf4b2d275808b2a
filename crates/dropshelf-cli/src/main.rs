mod output;
mod source;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dropshelf_catalog::{apply_filters, build_catalog, size_match, DropSelector, FilterSpec};
use dropshelf_core::{Catalog, Environment, Product};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dropshelf")]
#[command(about = "Browse the product catalog kept in the import spreadsheet")]
struct Cli {
    /// Read rows from a JSON file instead of the spreadsheet
    #[arg(long, global = true, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List drops with their product counts
    Drops,
    /// List products with facet counts
    Products {
        /// Drop number, or "unsorted" for products without one
        #[arg(long)]
        drop: Option<String>,
        /// Exact product category (e.g., Hoodie)
        #[arg(long)]
        category: Option<String>,
        /// Exact variant colour (e.g., Washed Black)
        #[arg(long)]
        color: Option<String>,
    },
    /// Show one product's details, or every product's when no handle is given
    Show {
        /// Product handle (e.g., boxy-tee-1042)
        handle: Option<String>,
    },
    /// Show sized variants and size-chart images per product
    SizeMatch,
}

impl Commands {
    fn filter_spec(&self) -> FilterSpec {
        let Commands::Products {
            drop,
            category,
            color,
        } = self
        else {
            return FilterSpec::default();
        };

        let mut spec = FilterSpec::default();
        if let Some(drop) = drop {
            spec = spec.with_drop(DropSelector::from(drop.as_str()));
        }
        if let Some(category) = category {
            spec = spec.with_category(category.as_str());
        }
        if let Some(color) = color {
            spec = spec.with_color(color.as_str());
        }
        spec
    }
}

/// Products for the detail view: the one named by `handle`, or all of them.
fn select_products<'a>(
    catalog: &'a Catalog,
    handle: Option<&str>,
) -> anyhow::Result<Vec<&'a Product>> {
    match handle {
        Some(handle) => catalog
            .product(handle)
            .map(|product| vec![product])
            .ok_or_else(|| anyhow::anyhow!("product '{handle}' not found")),
        None => Ok(catalog.products.iter().collect()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = dropshelf_core::load_app_config().context("failed to load configuration")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.env != Environment::Production)
        .init();

    let rows = source::load_rows(cli.input.as_deref(), &config).await?;
    let catalog = build_catalog(rows);

    match &cli.command {
        Commands::Drops => output::print_drops(&catalog, cli.json)?,
        command @ Commands::Products { .. } => {
            let view = apply_filters(&catalog.products, &command.filter_spec());
            output::print_products(&view, cli.json)?;
        }
        Commands::Show { handle } => {
            let products = select_products(&catalog, handle.as_deref())?;
            output::print_product_details(&products, cli.json)?;
        }
        Commands::SizeMatch => output::print_size_match(&size_match(&catalog.products), cli.json)?,
    }

    Ok(())
}
