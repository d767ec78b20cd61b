use colored::{ColoredString, Colorize};
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::list_view::{ListState, ProductRow, EMPTY_TEXT, LOADING_TEXT};
use crate::status::{DisplayCategory, Urgency};

const HEADER: [&str; 6] = ["SKU", "Product", "Category", "Price", "Stock", "Status"];

/// Prepend shop name as a header line if non-empty.
pub fn with_header(shop_name: &str, body: String) -> String {
    if shop_name.is_empty() {
        body
    } else {
        format!("{shop_name}\n{body}")
    }
}

fn badge(status: DisplayCategory) -> ColoredString {
    let label = status.label();
    match status.urgency() {
        Urgency::Highest => label.red().bold(),
        Urgency::Medium => label.yellow(),
        Urgency::Neutral => label.dimmed(),
        Urgency::None => label.green(),
    }
}

fn row_cells(row: &ProductRow) -> Vec<Cell> {
    vec![
        Cell::new(&row.sku),
        Cell::new(&row.name),
        Cell::new(&row.category),
        Cell::new(&row.price),
        Cell::new(row.stock_quantity),
        Cell::new(badge(row.status)),
    ]
}

/// Plain-text rendering of the product list.
pub fn render(state: &ListState) -> String {
    let rows = match state {
        ListState::Loading => return LOADING_TEXT.to_string(),
        ListState::Empty => {
            let mut table = Table::new();
            table.set_header(HEADER.to_vec());
            let mut placeholder = vec![Cell::new(EMPTY_TEXT)];
            placeholder.extend((1..HEADER.len()).map(|_| Cell::new("")));
            table.add_row(placeholder);
            return format!("Products\n{table}");
        }
        ListState::Rows(rows) => rows,
    };

    let mut table = Table::new();
    table.set_header(HEADER.to_vec());
    for row in rows {
        table.add_row(row_cells(row));
    }
    format!("Products ({})\n{table}", rows.len())
}

/// JSON rendering: an array of rows, empty while loading or when there is
/// nothing to show.
pub fn render_json(state: &ListState) -> Result<String> {
    Ok(serde_json::to_string_pretty(state.rows())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fmt::CurrencyFormat;
    use crate::list_view::{ProductListView, RowActions};
    use crate::models::{Product, ProductId};
    use crate::status::StatusTag;

    fn products() -> Vec<Product> {
        vec![
            Product {
                id: ProductId::Int(1),
                name: "Áo thun".to_string(),
                slug: Some("AT-01".to_string()),
                image_url: None,
                category_name: Some("Thời trang".to_string()),
                price: 1_000_000.0,
                stock_quantity: 4,
                status: StatusTag::Active,
            },
            Product {
                id: ProductId::Int(2),
                name: "Mũ".to_string(),
                slug: None,
                image_url: None,
                category_name: None,
                price: 90_000.0,
                stock_quantity: 20,
                status: StatusTag::Active,
            },
        ]
    }

    fn state(products: Vec<Product>, loading: bool) -> ListState {
        ProductListView::new(products, loading, CurrencyFormat::VI_VN, RowActions::none()).state()
    }

    #[test]
    fn test_render_loading() {
        let out = render(&state(products(), true));
        assert_eq!(out, LOADING_TEXT);
        assert!(!out.contains("Áo thun"));
    }

    #[test]
    fn test_render_empty_has_single_placeholder() {
        let out = render(&state(vec![], false));
        assert_eq!(out.matches(EMPTY_TEXT).count(), 1);
        assert!(out.contains("SKU"));
    }

    #[test]
    fn test_render_rows() {
        let out = render(&state(products(), false));
        assert!(out.starts_with("Products (2)"));
        assert!(out.contains("AT-01"));
        assert!(out.contains("1.000.000"));
        assert!(out.contains(DisplayCategory::LowStock.label()));
        assert!(out.contains(DisplayCategory::InStock.label()));
        assert!(!out.contains(EMPTY_TEXT));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&state(products(), false)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["sku"], "AT-01");
        assert_eq!(rows[0]["status"], "LOW_STOCK");
        assert_eq!(rows[1]["sku"], "2");
        assert_eq!(rows[1]["stockQuantity"], 20);

        let loading = render_json(&state(products(), true)).unwrap();
        assert_eq!(loading, "[]");
    }

    #[test]
    fn test_with_header() {
        assert_eq!(with_header("", "body".into()), "body");
        assert_eq!(with_header("Shop", "body".into()), "Shop\nbody");
    }
}
