use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::backup::Backup;
use rusqlite::Connection;
use tracing::info;

use crate::cli::open_db;
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::settings::get_data_dir;

/// `<data_dir>/backups/stockroom-<timestamp>.db`
fn timestamped_path(data_dir: &Path) -> Result<PathBuf> {
    let dir = data_dir.join("backups");
    std::fs::create_dir_all(&dir)?;
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    Ok(dir.join(format!("stockroom-{stamp}.db")))
}

/// Copy the live catalog into `dest` with SQLite's online backup. Returns the
/// size of the written file.
pub(crate) fn backup_to(conn: &Connection, dest: &Path) -> Result<u64> {
    let mut target = Connection::open(dest)?;
    Backup::new(conn, &mut target)?.run_to_completion(100, Duration::from_millis(10), None)?;
    drop(target);
    let size = std::fs::metadata(dest)?.len();
    info!(path = %dest.display(), size, "backup written");
    Ok(size)
}

pub fn run(output: Option<String>) -> Result<()> {
    let conn = open_db()?;
    let dest = match output {
        Some(p) => PathBuf::from(p),
        None => timestamped_path(&get_data_dir())?,
    };
    let size = backup_to(&conn, &dest)?;
    println!("Backup saved to {} ({})", dest.display(), format_bytes(size));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{insert_product, list_products};
    use crate::db::test_db;
    use crate::models::NewProduct;

    #[test]
    fn test_backup_copies_products() {
        let (dir, conn) = test_db();
        insert_product(&conn, &NewProduct { name: "Ấm trà".into(), stock_quantity: 3, ..Default::default() })
            .unwrap();

        let dest = dir.path().join("copy.db");
        let size = backup_to(&conn, &dest).unwrap();
        assert!(size > 0);

        let copy = Connection::open(&dest).unwrap();
        let products = list_products(&copy).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Ấm trà");
    }

    #[test]
    fn test_timestamped_path_creates_backups_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = timestamped_path(dir.path()).unwrap();
        assert!(dir.path().join("backups").is_dir());
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("stockroom-") && name.ends_with(".db"));
    }
}
