//! The product list as a renderer-agnostic view.
//!
//! `ProductListView` owns the products, the loading flag and the row
//! callbacks. `state()` turns them into a `ListState` that the text table and
//! the interactive browser both draw from; `edit`/`delete` fire the callbacks
//! for a rendered row.

use serde::Serialize;

use crate::fmt::{currency, CurrencyFormat};
use crate::models::{Product, ProductId};
use crate::status::DisplayCategory;

pub const LOADING_TEXT: &str = "Loading products...";
pub const EMPTY_TEXT: &str = "No products found.";

pub type EditCallback<'a> = Box<dyn FnMut(&Product) + 'a>;
pub type DeleteCallback<'a> = Box<dyn FnMut(&ProductId) + 'a>;

/// Row action callbacks. Either may be absent, in which case triggering that
/// action does nothing.
#[derive(Default)]
pub struct RowActions<'a> {
    pub on_edit: Option<EditCallback<'a>>,
    pub on_delete: Option<DeleteCallback<'a>>,
}

impl<'a> RowActions<'a> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn on_edit(mut self, f: impl FnMut(&Product) + 'a) -> Self {
        self.on_edit = Some(Box::new(f));
        self
    }

    pub fn on_delete(mut self, f: impl FnMut(&ProductId) + 'a) -> Self {
        self.on_delete = Some(Box::new(f));
        self
    }
}

/// One display row, with every derived value already computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub image_url: Option<String>,
    pub category: String,
    pub price: String,
    pub stock_quantity: u32,
    pub status: DisplayCategory,
    pub status_label: &'static str,
}

impl ProductRow {
    pub fn from_product(product: &Product, format: &CurrencyFormat) -> Self {
        let status = product.display_category();
        Self {
            id: product.id.clone(),
            sku: product.sku(),
            name: product.name.clone(),
            image_url: product.image_url.clone(),
            category: product.category_display().to_string(),
            price: currency(product.price, format),
            stock_quantity: product.stock_quantity,
            status,
            status_label: status.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    /// Data hasn't arrived; no table body.
    Loading,
    /// Loaded, nothing to show; a single placeholder entry.
    Empty,
    Rows(Vec<ProductRow>),
}

impl ListState {
    pub fn rows(&self) -> &[ProductRow] {
        match self {
            ListState::Rows(rows) => rows,
            _ => &[],
        }
    }
}

pub struct ProductListView<'a> {
    products: Vec<Product>,
    loading: bool,
    format: CurrencyFormat,
    actions: RowActions<'a>,
}

impl<'a> ProductListView<'a> {
    pub fn new(
        products: Vec<Product>,
        loading: bool,
        format: CurrencyFormat,
        actions: RowActions<'a>,
    ) -> Self {
        Self {
            products,
            loading,
            format,
            actions,
        }
    }

    /// A view with no data yet, showing the loading indicator.
    pub fn loading(format: CurrencyFormat, actions: RowActions<'a>) -> Self {
        Self::new(Vec::new(), true, format, actions)
    }

    /// Replace the data and clear the loading flag.
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
        self.loading = false;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn state(&self) -> ListState {
        if self.loading {
            return ListState::Loading;
        }
        if self.products.is_empty() {
            return ListState::Empty;
        }
        ListState::Rows(
            self.products
                .iter()
                .map(|p| ProductRow::from_product(p, &self.format))
                .collect(),
        )
    }

    /// Number of rendered data rows.
    pub fn row_count(&self) -> usize {
        if self.loading {
            0
        } else {
            self.products.len()
        }
    }

    fn rendered(&self, index: usize) -> Option<&Product> {
        if self.loading {
            return None;
        }
        self.products.get(index)
    }

    /// Fire `on_edit` for the row at `index`. Returns whether a callback ran.
    pub fn edit(&mut self, index: usize) -> bool {
        let Some(product) = self.rendered(index) else {
            return false;
        };
        let product = product.clone();
        match self.actions.on_edit.as_mut() {
            Some(on_edit) => {
                on_edit(&product);
                true
            }
            None => false,
        }
    }

    /// Fire `on_delete` with the id of the row at `index`. Returns whether a
    /// callback ran.
    pub fn delete(&mut self, index: usize) -> bool {
        let Some(product) = self.rendered(index) else {
            return false;
        };
        let id = product.id.clone();
        match self.actions.on_delete.as_mut() {
            Some(on_delete) => {
                on_delete(&id);
                true
            }
            None => false,
        }
    }
}
