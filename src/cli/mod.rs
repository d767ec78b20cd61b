pub mod backup;
pub mod browse;
pub mod demo;
pub mod init;
pub mod products;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rusqlite::Connection;
use tracing::debug;

use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::fmt::CurrencyFormat;
use crate::settings::load_settings;
use crate::status::DisplayCategory;

/// Metadata key for the shop name printed above listings.
pub(crate) const SHOP_NAME_KEY: &str = "shop_name";

/// Open the configured database, creating the data dir and schema on first use.
pub(crate) fn open_db() -> Result<Connection> {
    let settings = load_settings();
    std::fs::create_dir_all(PathBuf::from(&settings.data_dir))?;
    let db_path = settings.db_path();
    debug!(path = %db_path.display(), "opening database");
    let conn = get_connection(&db_path)?;
    init_db(&conn)?;
    Ok(conn)
}

/// Currency format from `--locale`, falling back to the saved setting.
pub(crate) fn currency_format(locale: Option<&str>) -> CurrencyFormat {
    match locale {
        Some(tag) => CurrencyFormat::for_locale(tag),
        None => load_settings().currency_format(),
    }
}

#[derive(Parser)]
#[command(name = "stockroom", about = "Back-office product list for small shop catalogs.")]
pub struct Cli {
    /// Locale for price display, e.g. vi-VN or en-US (default: from settings)
    #[arg(long, global = true)]
    pub locale: Option<String>,
    /// Print debug logs to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up stockroom: choose a data directory and initialize the database.
    Init {
        /// Path for stockroom data (default: ~/Documents/stockroom)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Shop name shown above product listings
        #[arg(long = "shop-name")]
        shop_name: Option<String>,
    },
    /// Manage products.
    Products {
        #[command(subcommand)]
        command: ProductsCommands,
    },
    /// Interactively browse, edit and delete products.
    Browse,
    /// Load sample products to explore stockroom.
    Demo,
    /// Show current database and stock summary.
    Status,
    /// Back up the database.
    Backup {
        /// Output path (default: <data_dir>/backups/stockroom-YYYYMMDD-HHMMSS.db)
        #[arg(long)]
        output: Option<String>,
    },
}

/// Display bucket filter for `products list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    Hidden,
    OutOfStock,
    LowStock,
    InStock,
}

impl From<StatusFilter> for DisplayCategory {
    fn from(f: StatusFilter) -> Self {
        match f {
            StatusFilter::Hidden => DisplayCategory::Hidden,
            StatusFilter::OutOfStock => DisplayCategory::OutOfStock,
            StatusFilter::LowStock => DisplayCategory::LowStock,
            StatusFilter::InStock => DisplayCategory::InStock,
        }
    }
}

#[derive(Subcommand)]
pub enum ProductsCommands {
    /// List products with price and stock status.
    List {
        /// Only show products in this bucket
        #[arg(long, value_enum)]
        status: Option<StatusFilter>,
        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a product.
    Add {
        /// Product name
        name: String,
        /// Unit price
        #[arg(long)]
        price: f64,
        /// Units in stock
        #[arg(long)]
        stock: u32,
        /// Short code shown to staff (default: the product id)
        #[arg(long)]
        slug: Option<String>,
        /// Category name
        #[arg(long)]
        category: Option<String>,
        /// Image URL
        #[arg(long)]
        image: Option<String>,
        /// Status: ACTIVE, INACTIVE, OUT_OF_STOCK
        #[arg(long, default_value = "ACTIVE")]
        status: String,
    },
    /// Update an existing product.
    Edit {
        /// Product id or slug
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        stock: Option<u32>,
        /// New slug (empty to clear)
        #[arg(long)]
        slug: Option<String>,
        /// New category (empty to clear)
        #[arg(long)]
        category: Option<String>,
        /// Status: ACTIVE, INACTIVE, OUT_OF_STOCK
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete a product by id or slug.
    Delete {
        /// Product id or slug
        id: String,
    },
    /// Import products from a CSV file.
    Import {
        /// CSV with header name,slug,category,price,stock,status,image_url
        file: String,
    },
}
