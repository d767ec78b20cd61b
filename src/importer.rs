use std::path::Path;

use rusqlite::Connection;
use serde::Deserialize;
use tracing::warn;

use crate::catalog::insert_product;
use crate::error::Result;
use crate::models::NewProduct;
use crate::status::StatusTag;

/// One line of a product CSV. Quantities come in as text so that a bad value
/// skips the row instead of aborting the whole file.
#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    category: Option<String>,
    price: String,
    stock: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
}

#[derive(Debug, Default)]
pub struct ImportResult {
    pub imported: usize,
    pub skipped: Vec<(usize, String)>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn parse_row(row: CsvRow) -> std::result::Result<NewProduct, String> {
    let name = row.name.trim().to_string();
    if name.is_empty() {
        return Err("missing name".into());
    }
    let price: f64 = row
        .price
        .trim()
        .parse()
        .map_err(|_| format!("bad price '{}'", row.price.trim()))?;
    if !price.is_finite() || price < 0.0 {
        return Err(format!("invalid price {price}"));
    }
    let stock: i64 = row
        .stock
        .trim()
        .parse()
        .map_err(|_| format!("bad stock '{}'", row.stock.trim()))?;
    let stock_quantity =
        u32::try_from(stock).map_err(|_| format!("stock out of range: {stock}"))?;

    Ok(NewProduct {
        name,
        slug: non_empty(row.slug),
        image_url: non_empty(row.image_url),
        category_name: non_empty(row.category),
        price,
        stock_quantity,
        status: non_empty(row.status)
            .map(|s| StatusTag::parse(&s))
            .unwrap_or_default(),
    })
}

/// Import products from a CSV with a `name,slug,category,price,stock,status,image_url`
/// header. Rows that fail to parse or insert are reported, not fatal.
pub fn import_csv(conn: &Connection, file_path: &Path) -> Result<ImportResult> {
    let file = std::fs::File::open(file_path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));

    let mut result = ImportResult::default();
    let tx = conn.unchecked_transaction()?;
    for (i, record) in rdr.deserialize::<CsvRow>().enumerate() {
        // header is line 1
        let line = i + 2;
        let parsed = match record {
            Ok(row) => parse_row(row),
            Err(e) => Err(e.to_string()),
        };
        let product = match parsed {
            Ok(p) => p,
            Err(reason) => {
                warn!(line, %reason, "skipping product row");
                result.skipped.push((line, reason));
                continue;
            }
        };
        match insert_product(&tx, &product) {
            Ok(_) => result.imported += 1,
            Err(e) => {
                warn!(line, error = %e, "skipping product row");
                result.skipped.push((line, e.to_string()));
            }
        }
    }
    tx.commit()?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::list_products;
    use crate::db::test_db;

    fn write_csv(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("products.csv");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_import_csv() {
        let (dir, conn) = test_db();
        let path = write_csv(
            &dir,
            "name,slug,category,price,stock,status,image_url\n\
             Áo thun,AT-01,Thời trang,150000,12,ACTIVE,\n\
             Mũ lưỡi trai,,,90000,0,,https://cdn.example/mu.png\n\
             Giày,GI-01,Giày dép,450000,3,inactive,\n",
        );
        let result = import_csv(&conn, &path).unwrap();
        assert_eq!(result.imported, 3);
        assert!(result.skipped.is_empty());

        let products = list_products(&conn).unwrap();
        assert_eq!(products.len(), 3);
        let cap = products.iter().find(|p| p.name == "Mũ lưỡi trai").unwrap();
        assert_eq!(cap.slug, None);
        assert_eq!(cap.status, StatusTag::Active);
        assert_eq!(cap.image_url.as_deref(), Some("https://cdn.example/mu.png"));
        let shoes = products.iter().find(|p| p.name == "Giày").unwrap();
        assert_eq!(shoes.status, StatusTag::Inactive);
    }

    #[test]
    fn test_import_skips_bad_rows() {
        let (dir, conn) = test_db();
        let path = write_csv(
            &dir,
            "name,slug,category,price,stock,status,image_url\n\
             Good,,,1000,5,,\n\
             Negative stock,,,1000,-2,,\n\
             Bad price,,,abc,5,,\n\
             ,,,1000,5,,\n",
        );
        let result = import_csv(&conn, &path).unwrap();
        assert_eq!(result.imported, 1);
        let lines: Vec<usize> = result.skipped.iter().map(|(l, _)| *l).collect();
        assert_eq!(lines, vec![3, 4, 5]);
        assert!(result.skipped[0].1.contains("-2"));
    }

    #[test]
    fn test_duplicate_slug_is_skipped() {
        let (dir, conn) = test_db();
        let path = write_csv(
            &dir,
            "name,slug,category,price,stock,status,image_url\n\
             One,DUP,,1000,5,,\n\
             Two,DUP,,2000,5,,\n",
        );
        let result = import_csv(&conn, &path).unwrap();
        assert_eq!(result.imported, 1);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].0, 3);
    }

    #[test]
    fn test_numeric_slug_is_skipped() {
        let (dir, conn) = test_db();
        let path = write_csv(
            &dir,
            "name,slug,category,price,stock,status,image_url\n\
             Ly,2024,,1000,5,,\n\
             Đĩa,D-2024,,1000,5,,\n",
        );
        let result = import_csv(&conn, &path).unwrap();
        assert_eq!(result.imported, 1);
        assert_eq!(result.skipped[0].0, 2);
        assert!(result.skipped[0].1.contains("2024"));
    }
}
