use std::path::Path;

use rusqlite::Connection;

use crate::catalog;
use crate::cli::{open_db, StatusFilter, SHOP_NAME_KEY};
use crate::db::get_metadata;
use crate::error::{Result, StockroomError};
use crate::fmt::{currency, CurrencyFormat};
use crate::importer::import_csv;
use crate::list_view::{ProductListView, RowActions};
use crate::models::{NewProduct, ProductId, ProductUpdate};
use crate::status::{DisplayCategory, StatusTag};
use crate::text;

/// Render the product list for `conn` as text or JSON.
pub(crate) fn render_list(
    conn: &Connection,
    status: Option<StatusFilter>,
    json: bool,
    format: CurrencyFormat,
) -> Result<String> {
    let mut products = catalog::list_products(conn)?;
    if let Some(filter) = status {
        let wanted = DisplayCategory::from(filter);
        products.retain(|p| p.display_category() == wanted);
    }

    let view = ProductListView::new(products, false, format, RowActions::none());
    let state = view.state();
    if json {
        return text::render_json(&state);
    }
    let shop = get_metadata(conn, SHOP_NAME_KEY).unwrap_or_default();
    Ok(text::with_header(&shop, text::render(&state)))
}

pub fn list(status: Option<StatusFilter>, json: bool, format: CurrencyFormat) -> Result<()> {
    let conn = open_db()?;
    println!("{}", render_list(&conn, status, json, format)?);
    Ok(())
}

pub fn add(product: NewProduct, format: CurrencyFormat) -> Result<()> {
    let conn = open_db()?;
    let id = catalog::insert_product(&conn, &product)?;
    println!(
        "Added product #{id}: {} ({})",
        product.name,
        currency(product.price, &format)
    );
    Ok(())
}

pub fn edit(
    id: &str,
    name: Option<String>,
    price: Option<f64>,
    stock: Option<u32>,
    slug: Option<String>,
    category: Option<String>,
    status: Option<String>,
) -> Result<()> {
    let update = ProductUpdate {
        name,
        slug,
        category_name: category,
        price,
        stock_quantity: stock,
        status: status.as_deref().map(StatusTag::parse),
    };
    if update.is_empty() {
        return Err(StockroomError::InvalidInput(
            "nothing to change; pass at least one of --name, --price, --stock, --slug, --category, --status".into(),
        ));
    }
    let conn = open_db()?;
    let product = catalog::update_product(&conn, &ProductId::parse(id), &update)?;
    println!(
        "Updated {} ({}): {}",
        product.sku(),
        product.name,
        product.display_category()
    );
    Ok(())
}

pub fn delete(id: &str) -> Result<()> {
    let conn = open_db()?;
    let product = catalog::delete_product(&conn, &ProductId::parse(id))?;
    println!("Deleted {} ({})", product.sku(), product.name);
    Ok(())
}

pub fn import(file: &str) -> Result<()> {
    let conn = open_db()?;
    let result = import_csv(&conn, Path::new(file))?;
    println!("Imported {} products from {file}", result.imported);
    if !result.skipped.is_empty() {
        println!("Skipped {} rows:", result.skipped.len());
        for (line, reason) in &result.skipped {
            println!("  line {line}: {reason}");
        }
    }
    Ok(())
}
