use rusqlite::Connection;

use crate::catalog::{insert_product, list_products};
use crate::cli::{open_db, SHOP_NAME_KEY};
use crate::db::{get_metadata, set_metadata};
use crate::error::Result;
use crate::models::NewProduct;
use crate::status::StatusTag;

const SHOP_NAME: &str = "Tiệm Nhà Mây";

struct DemoProduct {
    name: &'static str,
    slug: Option<&'static str>,
    category: Option<&'static str>,
    price: f64,
    stock: u32,
    status: &'static str,
}

/// One product per interesting row state: healthy, low, empty, hidden,
/// explicitly out of stock, and records missing their optional fields.
const PRODUCTS: &[DemoProduct] = &[
    DemoProduct { name: "Cà phê rang xay Cầu Đất 500g", slug: Some("CF-CD-500"), category: Some("Cà phê"), price: 185_000.0, stock: 64, status: "ACTIVE" },
    DemoProduct { name: "Trà ô long Bảo Lộc 200g", slug: Some("TR-OL-200"), category: Some("Trà"), price: 120_000.0, stock: 5, status: "ACTIVE" },
    DemoProduct { name: "Phin nhôm pha cà phê", slug: Some("PH-NH-01"), category: Some("Dụng cụ"), price: 45_000.0, stock: 0, status: "ACTIVE" },
    DemoProduct { name: "Bình giữ nhiệt inox 750ml", slug: Some("BN-IN-750"), category: Some("Dụng cụ"), price: 329_000.0, stock: 18, status: "OUT_OF_STOCK" },
    DemoProduct { name: "Ly sứ Bát Tràng men lam", slug: Some("LY-BT-01"), category: Some("Gốm sứ"), price: 95_000.0, stock: 2, status: "ACTIVE" },
    DemoProduct { name: "Hộp quà Tết 2024", slug: Some("QT-2024"), category: Some("Quà tặng"), price: 1_250_000.0, stock: 30, status: "INACTIVE" },
    DemoProduct { name: "Mật ong hoa cà phê 350ml", slug: None, category: None, price: 150_000.0, stock: 12, status: "ACTIVE" },
    DemoProduct { name: "Cacao nguyên chất Bến Tre 250g", slug: Some("CC-BT-250"), category: Some("Cacao"), price: 98_000.0, stock: 7, status: "PREORDER" },
    DemoProduct { name: "Máy xay cà phê tay gốm", slug: Some("MX-TAY-01"), category: Some("Dụng cụ"), price: 1_000_000.0, stock: 1, status: "ACTIVE" },
];

/// Insert the demo products, skipping any already present by slug or name.
pub(crate) fn load_demo(conn: &Connection) -> Result<usize> {
    let existing = list_products(conn)?;
    let mut added = 0;
    for demo in PRODUCTS {
        let present = existing
            .iter()
            .any(|p| p.name == demo.name || (demo.slug.is_some() && p.slug.as_deref() == demo.slug));
        if present {
            continue;
        }
        insert_product(
            conn,
            &NewProduct {
                name: demo.name.to_string(),
                slug: demo.slug.map(str::to_string),
                image_url: demo
                    .slug
                    .map(|s| format!("https://cdn.example.com/products/{}.jpg", s.to_lowercase())),
                category_name: demo.category.map(str::to_string),
                price: demo.price,
                stock_quantity: demo.stock,
                status: StatusTag::parse(demo.status),
            },
        )?;
        added += 1;
    }
    if get_metadata(conn, SHOP_NAME_KEY).is_none() {
        set_metadata(conn, SHOP_NAME_KEY, SHOP_NAME)?;
    }
    Ok(added)
}

pub fn run() -> Result<()> {
    let conn = open_db()?;
    let added = load_demo(&conn)?;
    println!("Loaded {added} demo products.");
    println!("Try `stockroom products list` or `stockroom browse`.");
    Ok(())
}
