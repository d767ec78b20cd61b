use crate::catalog::count_by_category;
use crate::cli::{open_db, SHOP_NAME_KEY};
use crate::db::get_metadata;
use crate::error::Result;
use crate::fmt::{format_bytes, CurrencyFormat};
use crate::settings::load_settings;

pub fn run(format: CurrencyFormat) -> Result<()> {
    let settings = load_settings();
    let db_path = settings.db_path();

    println!("Data dir:   {}", settings.data_dir);
    println!("Database:   {}", db_path.display());
    println!("Currency:   {} ({})", format.code, format.locale);

    if !db_path.exists() {
        println!();
        println!("Database not found. Run `stockroom init` to set up.");
        return Ok(());
    }

    let size = std::fs::metadata(&db_path)?.len();
    println!("DB size:    {}", format_bytes(size));

    let conn = open_db()?;
    let shop = get_metadata(&conn, SHOP_NAME_KEY);
    println!("Shop:       {}", shop.as_deref().unwrap_or("(not set)"));

    let counts = count_by_category(&conn)?;
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    println!();
    println!("Products:   {total}");
    for (category, n) in counts {
        println!("  {:<10}{n}", category.label());
    }
    Ok(())
}
