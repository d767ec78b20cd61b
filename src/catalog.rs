use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use crate::error::{Result, StockroomError};
use crate::models::{NewProduct, Product, ProductId, ProductUpdate};
use crate::status::{DisplayCategory, StatusTag};

const PRODUCT_COLUMNS: &str =
    "id, name, slug, image_url, category_name, price, stock_quantity, status";

fn product_from_row(row: &Row) -> rusqlite::Result<Product> {
    let status: String = row.get(7)?;
    Ok(Product {
        id: ProductId::Int(row.get(0)?),
        name: row.get(1)?,
        slug: row.get(2)?,
        image_url: row.get(3)?,
        category_name: row.get(4)?,
        price: row.get(5)?,
        stock_quantity: row.get(6)?,
        status: StatusTag::parse(&status),
    })
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(StockroomError::InvalidInput(format!(
            "price must be a non-negative number, got {price}"
        )));
    }
    Ok(())
}

/// Numeric arguments always resolve to row ids, so a slug must not be all
/// digits.
fn validate_slug(slug: Option<&str>) -> Result<()> {
    if let Some(slug) = slug.map(str::trim) {
        if !slug.is_empty() && slug.chars().all(|c| c.is_ascii_digit()) {
            return Err(StockroomError::InvalidInput(format!(
                "slug '{slug}' would be read as a product id; include a letter"
            )));
        }
    }
    Ok(())
}

pub fn list_products(conn: &Connection) -> Result<Vec<Product>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name COLLATE NOCASE, id"
    ))?;
    let rows = stmt
        .query_map([], product_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    debug!(count = rows.len(), "loaded products");
    Ok(rows)
}

/// Look up a product by numeric id, or by slug for text ids.
pub fn get_product(conn: &Connection, id: &ProductId) -> Result<Product> {
    let found = match id {
        ProductId::Int(n) => conn
            .query_row(
                &format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"),
                [n],
                product_from_row,
            )
            .optional()?,
        ProductId::Text(slug) => conn
            .query_row(
                &format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE slug = ?1"),
                [slug],
                product_from_row,
            )
            .optional()?,
    };
    found.ok_or_else(|| StockroomError::UnknownProduct(id.to_string()))
}

pub fn insert_product(conn: &Connection, product: &NewProduct) -> Result<i64> {
    if product.name.trim().is_empty() {
        return Err(StockroomError::InvalidInput("product name is required".into()));
    }
    validate_price(product.price)?;
    validate_slug(product.slug.as_deref())?;
    conn.execute(
        "INSERT INTO products (name, slug, image_url, category_name, price, stock_quantity, status) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            product.name.trim(),
            product.slug,
            product.image_url,
            product.category_name,
            product.price,
            product.stock_quantity,
            product.status.as_str(),
        ],
    )?;
    let id = conn.last_insert_rowid();
    info!(id, name = %product.name, "product added");
    Ok(id)
}

pub fn update_product(conn: &Connection, id: &ProductId, update: &ProductUpdate) -> Result<Product> {
    let mut product = get_product(conn, id)?;
    if let Some(price) = update.price {
        validate_price(price)?;
        product.price = price;
    }
    if let Some(ref name) = update.name {
        if name.trim().is_empty() {
            return Err(StockroomError::InvalidInput("product name is required".into()));
        }
        product.name = name.trim().to_string();
    }
    if let Some(ref slug) = update.slug {
        validate_slug(Some(slug.as_str()))?;
        product.slug = Some(slug.clone()).filter(|s| !s.trim().is_empty());
    }
    if let Some(ref category) = update.category_name {
        product.category_name = Some(category.clone()).filter(|s| !s.trim().is_empty());
    }
    if let Some(qty) = update.stock_quantity {
        product.stock_quantity = qty;
    }
    if let Some(ref status) = update.status {
        product.status = status.clone();
    }

    let ProductId::Int(row_id) = product.id else {
        return Err(StockroomError::UnknownProduct(id.to_string()));
    };
    conn.execute(
        "UPDATE products SET name = ?1, slug = ?2, category_name = ?3, price = ?4, \
         stock_quantity = ?5, status = ?6, updated_at = datetime('now') WHERE id = ?7",
        params![
            product.name,
            product.slug,
            product.category_name,
            product.price,
            product.stock_quantity,
            product.status.as_str(),
            row_id,
        ],
    )?;
    info!(id = row_id, "product updated");
    Ok(product)
}

/// Remove a product. Returns the removed record.
pub fn delete_product(conn: &Connection, id: &ProductId) -> Result<Product> {
    let product = get_product(conn, id)?;
    if let ProductId::Int(row_id) = product.id {
        conn.execute("DELETE FROM products WHERE id = ?1", [row_id])?;
        info!(id = row_id, name = %product.name, "product deleted");
    }
    Ok(product)
}

/// Product count per display category, in `DisplayCategory::ALL` order.
pub fn count_by_category(conn: &Connection) -> Result<Vec<(DisplayCategory, usize)>> {
    let products = list_products(conn)?;
    Ok(DisplayCategory::ALL
        .iter()
        .map(|cat| {
            let n = products.iter().filter(|p| p.display_category() == *cat).count();
            (*cat, n)
        })
        .collect())
}
