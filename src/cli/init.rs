use std::path::PathBuf;

use crate::cli::SHOP_NAME_KEY;
use crate::db::{get_connection, init_db, set_metadata, DB_FILE};
use crate::error::Result;
use crate::fmt::CurrencyFormat;
use crate::settings::{load_settings, save_settings, shellexpand_path};

pub fn run(data_dir: Option<String>, shop_name: Option<String>, locale: Option<String>) -> Result<()> {
    let mut settings = load_settings();

    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }
    if let Some(tag) = locale {
        settings.locale = CurrencyFormat::for_locale(&tag).locale.to_string();
    }

    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&resolved)?;
    std::fs::create_dir_all(resolved.join("backups"))?;

    let conn = get_connection(&resolved.join(DB_FILE))?;
    init_db(&conn)?;
    if let Some(name) = shop_name {
        set_metadata(&conn, SHOP_NAME_KEY, name.trim())?;
    }

    println!("Initialized stockroom at {}", resolved.display());
    println!("Prices shown as {}", settings.currency_format().code);
    Ok(())
}
