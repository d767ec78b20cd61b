use crate::browser::ProductBrowser;
use crate::cli::{open_db, SHOP_NAME_KEY};
use crate::db::get_metadata;
use crate::error::Result;
use crate::fmt::CurrencyFormat;

pub fn run(format: CurrencyFormat) -> Result<()> {
    let conn = open_db()?;
    let title = match get_metadata(&conn, SHOP_NAME_KEY) {
        Some(shop) if !shop.is_empty() => format!("{shop} \u{2014} Products"),
        _ => "Products".to_string(),
    };
    let mut browser = ProductBrowser::new(title, format);
    browser.run(&conn)
}
