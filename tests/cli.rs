use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Run stockroom with a throwaway home directory so settings and the
/// database never touch the real ones.
fn stockroom(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stockroom").unwrap();
    cmd.env("HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn list_on_fresh_install_shows_placeholder() {
    let home = TempDir::new().unwrap();
    stockroom(&home)
        .args(["products", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No products found.").count(1));
}

#[test]
fn add_then_list_json() {
    let home = TempDir::new().unwrap();
    stockroom(&home)
        .args(["products", "add", "Áo thun", "--price", "1000000", "--stock", "3", "--slug", "AT-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added product #1"));

    stockroom(&home)
        .args(["products", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sku\": \"AT-01\""))
        .stdout(predicate::str::contains("1.000.000"))
        .stdout(predicate::str::contains("LOW_STOCK"));
}

#[test]
fn locale_flag_switches_currency() {
    let home = TempDir::new().unwrap();
    stockroom(&home)
        .args(["products", "add", "Mug", "--price", "12.5", "--stock", "40"])
        .assert()
        .success();

    stockroom(&home)
        .args(["products", "list", "--locale", "en-US"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$12.50"));
}

#[test]
fn demo_then_filter_out_of_stock() {
    let home = TempDir::new().unwrap();
    stockroom(&home).arg("demo").assert().success();

    stockroom(&home)
        .args(["products", "list", "--status", "out-of-stock", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PH-NH-01"))
        .stdout(predicate::str::contains("BN-IN-750"))
        .stdout(predicate::str::contains("CF-CD-500").not());
}

#[test]
fn edit_and_delete_by_slug() {
    let home = TempDir::new().unwrap();
    stockroom(&home)
        .args(["products", "add", "Trà", "--price", "120000", "--stock", "9", "--slug", "TRA-1"])
        .assert()
        .success();

    stockroom(&home)
        .args(["products", "edit", "TRA-1", "--stock", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hết hàng"));

    stockroom(&home)
        .args(["products", "delete", "TRA-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted TRA-1"));

    stockroom(&home)
        .args(["products", "delete", "TRA-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown product: TRA-1"));
}

#[test]
fn edit_without_changes_fails() {
    let home = TempDir::new().unwrap();
    stockroom(&home)
        .args(["products", "edit", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to change"));
}

#[test]
fn import_reports_skipped_rows() {
    let home = TempDir::new().unwrap();
    let csv = home.path().join("products.csv");
    std::fs::write(
        &csv,
        "name,slug,category,price,stock,status,image_url\n\
         Phin,PH-1,Dụng cụ,45000,0,,\n\
         Broken,,,abc,1,,\n",
    )
    .unwrap();

    stockroom(&home)
        .args(["products", "import"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 products"))
        .stdout(predicate::str::contains("line 3"));
}

#[test]
fn status_counts_products() {
    let home = TempDir::new().unwrap();
    stockroom(&home).arg("demo").assert().success();
    stockroom(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Products:   9"))
        .stdout(predicate::str::contains("Tiệm Nhà Mây"));
}

#[test]
fn init_creates_database_with_shop_name() {
    let home = TempDir::new().unwrap();
    let data_dir = home.path().join("shop-data");
    stockroom(&home)
        .args(["init", "--shop-name", "Gốm Bát Tràng", "--data-dir"])
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized stockroom"));

    assert!(data_dir.join("stockroom.db").is_file());
    assert!(data_dir.join("backups").is_dir());

    stockroom(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Shop:       Gốm Bát Tràng"))
        .stdout(predicate::str::contains(data_dir.to_string_lossy().to_string()));
}

#[test]
fn backup_to_output_path() {
    let home = TempDir::new().unwrap();
    stockroom(&home)
        .args(["products", "add", "Ấm trà", "--price", "250000", "--stock", "4", "--slug", "AT-1"])
        .assert()
        .success();

    let dest = home.path().join("b.db");
    stockroom(&home)
        .args(["backup", "--output"])
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup saved to"));

    assert!(dest.is_file());
    let copy = rusqlite::Connection::open(&dest).unwrap();
    let (count, slug): (i64, String) = copy
        .query_row("SELECT COUNT(*), MAX(slug) FROM products", [], |r| Ok((r.get(0)?, r.get(1)?)))
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(slug, "AT-1");
}

#[test]
fn add_requires_stock() {
    let home = TempDir::new().unwrap();
    stockroom(&home)
        .args(["products", "add", "Mug", "--price", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--stock"));
}
