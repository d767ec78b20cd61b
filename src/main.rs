mod browser;
mod catalog;
mod cli;
mod db;
mod error;
mod fmt;
mod importer;
mod list_view;
mod logging;
mod models;
mod settings;
mod status;
mod text;
mod tui;

use clap::Parser;

use cli::{Cli, Commands, ProductsCommands};
use models::NewProduct;
use status::StatusTag;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let format = cli::currency_format(cli.locale.as_deref());

    let result = match cli.command {
        Commands::Init { data_dir, shop_name } => cli::init::run(data_dir, shop_name, cli.locale),
        Commands::Products { command } => match command {
            ProductsCommands::List { status, json } => cli::products::list(status, json, format),
            ProductsCommands::Add {
                name,
                price,
                stock,
                slug,
                category,
                image,
                status,
            } => cli::products::add(
                NewProduct {
                    name,
                    slug,
                    image_url: image,
                    category_name: category,
                    price,
                    stock_quantity: stock,
                    status: StatusTag::parse(&status),
                },
                format,
            ),
            ProductsCommands::Edit {
                id,
                name,
                price,
                stock,
                slug,
                category,
                status,
            } => cli::products::edit(&id, name, price, stock, slug, category, status),
            ProductsCommands::Delete { id } => cli::products::delete(&id),
            ProductsCommands::Import { file } => cli::products::import(&file),
        },
        Commands::Browse => cli::browse::run(format),
        Commands::Demo => cli::demo::run(),
        Commands::Status => cli::status::run(format),
        Commands::Backup { output } => cli::backup::run(output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
