use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    DefaultTerminal, Frame,
};
use rusqlite::Connection;
use tracing::debug;

use crate::catalog;
use crate::error::Result;
use crate::fmt::CurrencyFormat;
use crate::list_view::{
    ListState, ProductListView, ProductRow, RowActions, EMPTY_TEXT, LOADING_TEXT,
};
use crate::models::{Product, ProductId, ProductUpdate};
use crate::tui::{self, FOOTER_STYLE, HEADER_STYLE, PROMPT_STYLE, SELECTED_STYLE, WARNING_STYLE};

const PAGE_SIZE: usize = 20;

/// What a row callback asked the browser to do.
#[derive(Debug, Clone, PartialEq)]
enum RowRequest {
    Edit(Product),
    Delete(ProductId),
}

enum BrowseMode {
    Normal,
    ConfirmDelete,
    EditPrice { product: Product, input: String },
    EditStock { product: Product, price: f64, input: String },
}

#[derive(Debug, PartialEq)]
pub enum BrowseAction {
    Continue,
    Close,
    Reload,
    Commit(ProductId, ProductUpdate),
    Delete(ProductId),
}

pub struct ProductBrowser {
    view: ProductListView<'static>,
    requests: Rc<RefCell<Option<RowRequest>>>,
    title: String,
    offset: usize,
    visible_count: usize,
    selected: usize,
    mode: BrowseMode,
    status_message: Option<String>,
    table_state: TableState,
}

impl ProductBrowser {
    /// A browser in the loading state. The row callbacks only record the
    /// request; the event loop turns it into a prompt or a catalog call.
    pub fn new(title: impl Into<String>, format: CurrencyFormat) -> Self {
        let requests = Rc::new(RefCell::new(None));
        let edit_requests = Rc::clone(&requests);
        let delete_requests = Rc::clone(&requests);
        let actions = RowActions::none()
            .on_edit(move |p: &Product| {
                *edit_requests.borrow_mut() = Some(RowRequest::Edit(p.clone()));
            })
            .on_delete(move |id: &ProductId| {
                *delete_requests.borrow_mut() = Some(RowRequest::Delete(id.clone()));
            });
        Self {
            view: ProductListView::loading(format, actions),
            requests,
            title: title.into(),
            offset: 0,
            visible_count: PAGE_SIZE,
            selected: 0,
            mode: BrowseMode::Normal,
            status_message: None,
            table_state: TableState::default(),
        }
    }

    pub fn run(&mut self, conn: &Connection) -> Result<()> {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            ratatui::restore();
            hook(info);
        }));

        let mut terminal = ratatui::init();
        let result = self.event_loop(&mut terminal, conn);
        ratatui::restore();
        result
    }

    /// Replace the rows, keeping the selection in range.
    pub fn load(&mut self, products: Vec<Product>) {
        self.view.set_products(products);
        let count = self.view.row_count();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
        if self.offset > self.selected {
            self.offset = self.selected;
        }
    }

    fn reload(&mut self, conn: &Connection) -> Result<()> {
        let products = catalog::list_products(conn)?;
        debug!(count = products.len(), "browser reloaded");
        self.load(products);
        Ok(())
    }

    fn take_request(&self) -> Option<RowRequest> {
        self.requests.borrow_mut().take()
    }

    /// Draw the browser into the given frame.
    pub fn draw_frame(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let narrow = area.width < 100;

        let areas = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Fill(1),   // table
            Constraint::Length(1), // prompt
            Constraint::Length(1), // status
            Constraint::Length(1), // keys
        ])
        .split(area);
        let (title_area, table_area, prompt_area, status_area, keys_area) =
            (areas[0], areas[1], areas[2], areas[3], areas[4]);

        frame.render_widget(Paragraph::new(self.title.as_str()).style(HEADER_STYLE), title_area);

        let state = self.view.state();
        let rows: &[ProductRow] = match &state {
            ListState::Loading => {
                frame.render_widget(Paragraph::new(LOADING_TEXT).style(FOOTER_STYLE), table_area);
                frame.render_widget(Paragraph::new("q:quit").style(FOOTER_STYLE), keys_area);
                return;
            }
            ListState::Empty => {
                frame.render_widget(Paragraph::new(EMPTY_TEXT), table_area);
                &[]
            }
            ListState::Rows(rows) => rows.as_slice(),
        };

        if !rows.is_empty() {
            let fixed_cols: u16 = if narrow { 12 + 16 + 7 + 10 } else { 12 + 18 + 16 + 7 + 10 };
            let num_cols: u16 = if narrow { 5 } else { 6 };
            let name_width = table_area
                .width
                .saturating_sub(fixed_cols + num_cols - 1) as usize;
            let name_width = name_width.max(10);

            let header_overhead = 2u16;
            let available_height = table_area.height.saturating_sub(header_overhead) as usize;
            let mut rendered_rows = Vec::new();
            let mut total_height = 0usize;
            let mut vis = 0usize;

            for row in rows.iter().skip(self.offset) {
                let (wrapped_name, line_count) = tui::wrap_text(&row.name, name_width);
                let h = line_count as usize;
                if total_height + h > available_height && vis > 0 {
                    break;
                }
                let mut cells = vec![Cell::from(row.sku.clone()), Cell::from(wrapped_name)];
                if !narrow {
                    cells.push(Cell::from(row.category.clone()));
                }
                cells.push(Cell::from(row.price.clone()));
                cells.push(Cell::from(row.stock_quantity.to_string()));
                cells.push(Cell::from(tui::badge_span(row.status)));

                rendered_rows.push(Row::new(cells).height(line_count));
                total_height += h;
                vis += 1;
            }
            self.visible_count = vis.max(1);

            let (widths, header_cells): (Vec<Constraint>, Vec<&str>) = if narrow {
                (
                    vec![
                        Constraint::Length(12),
                        Constraint::Fill(1),
                        Constraint::Length(16),
                        Constraint::Length(7),
                        Constraint::Length(10),
                    ],
                    vec!["SKU", "Product", "Price", "Stock", "Status"],
                )
            } else {
                (
                    vec![
                        Constraint::Length(12),
                        Constraint::Fill(1),
                        Constraint::Length(18),
                        Constraint::Length(16),
                        Constraint::Length(7),
                        Constraint::Length(10),
                    ],
                    vec!["SKU", "Product", "Category", "Price", "Stock", "Status"],
                )
            };

            self.table_state.select(Some(self.selected.saturating_sub(self.offset)));
            let table = Table::new(rendered_rows, widths)
                .header(Row::new(header_cells).style(HEADER_STYLE).bottom_margin(1))
                .column_spacing(1)
                .row_highlight_style(SELECTED_STYLE);
            frame.render_stateful_widget(table, table_area, &mut self.table_state);
        }

        // Prompt
        let prompt: Option<Line> = match &self.mode {
            BrowseMode::Normal => None,
            BrowseMode::ConfirmDelete => self.view.products().get(self.selected).map(|p| {
                Line::from(Span::styled(
                    format!("  Delete '{}' ({})? y/n", p.name, p.sku()),
                    WARNING_STYLE,
                ))
            }),
            BrowseMode::EditPrice { product, input } => Some(Line::from(Span::styled(
                format!("  Price for '{}': {input}\u{2588}", product.name),
                PROMPT_STYLE,
            ))),
            BrowseMode::EditStock { product, input, .. } => Some(Line::from(Span::styled(
                format!("  Stock for '{}': {input}\u{2588}", product.name),
                PROMPT_STYLE,
            ))),
        };
        if let Some(line) = prompt {
            frame.render_widget(Paragraph::new(line), prompt_area);
        }

        // Status line
        let total = rows.len();
        let range = if total == 0 {
            "No rows".to_string()
        } else {
            let end_row = (self.offset + self.visible_count).min(total);
            format!("Rows {}-{} of {}", self.offset + 1, end_row, total)
        };
        let status = match self.status_message {
            Some(ref msg) => format!("{range} | {msg}"),
            None => range,
        };
        frame.render_widget(Paragraph::new(status).style(FOOTER_STYLE), status_area);

        let keys = match self.mode {
            BrowseMode::Normal => {
                "\u{2191}/\u{2193}:select  e:edit  d:delete  r:reload  n/p:page  q:quit"
            }
            BrowseMode::ConfirmDelete => "y:delete  any other key:cancel",
            BrowseMode::EditPrice { .. } | BrowseMode::EditStock { .. } => {
                "Enter=confirm, Esc=cancel"
            }
        };
        frame.render_widget(Paragraph::new(keys).style(FOOTER_STYLE), keys_area);
    }

    /// Handle a key event. Returns a BrowseAction indicating what the caller should do.
    pub fn handle_key_event(&mut self, code: KeyCode) -> BrowseAction {
        self.status_message = None;

        match self.mode {
            BrowseMode::Normal => self.handle_normal_key(code),
            BrowseMode::ConfirmDelete => self.handle_confirm_key(code),
            BrowseMode::EditPrice { .. } | BrowseMode::EditStock { .. } => {
                self.handle_edit_key(code)
            }
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> BrowseAction {
        let count = self.view.row_count();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return BrowseAction::Close,
            KeyCode::Char('r') => return BrowseAction::Reload,
            KeyCode::Down if self.selected + 1 < count => {
                self.selected += 1;
                if self.selected >= self.offset + self.visible_count {
                    self.offset += 1;
                }
            }
            KeyCode::Up if self.selected > 0 => {
                self.selected -= 1;
                if self.selected < self.offset {
                    self.offset = self.selected;
                }
            }
            KeyCode::Char('n') | KeyCode::PageDown => {
                let new_offset = self.offset + self.visible_count;
                if new_offset < count {
                    self.offset = new_offset;
                    self.selected = new_offset;
                }
            }
            KeyCode::Char('p') | KeyCode::PageUp => {
                self.offset = self.offset.saturating_sub(self.visible_count);
                self.selected = self.offset;
            }
            KeyCode::Home => {
                self.offset = 0;
                self.selected = 0;
            }
            KeyCode::End => {
                self.selected = count.saturating_sub(1);
                self.offset = count.saturating_sub(self.visible_count);
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if self.view.edit(self.selected) {
                    if let Some(RowRequest::Edit(product)) = self.take_request() {
                        let input = format!("{}", product.price);
                        self.mode = BrowseMode::EditPrice { product, input };
                    }
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if self.selected < count {
                    self.mode = BrowseMode::ConfirmDelete;
                }
            }
            _ => {}
        }
        BrowseAction::Continue
    }

    fn handle_confirm_key(&mut self, code: KeyCode) -> BrowseAction {
        self.mode = BrowseMode::Normal;
        if code != KeyCode::Char('y') {
            self.status_message = Some("Delete cancelled".into());
            return BrowseAction::Continue;
        }
        if self.view.delete(self.selected) {
            if let Some(RowRequest::Delete(id)) = self.take_request() {
                return BrowseAction::Delete(id);
            }
        }
        BrowseAction::Continue
    }

    fn handle_edit_key(&mut self, code: KeyCode) -> BrowseAction {
        match code {
            KeyCode::Esc => {
                self.mode = BrowseMode::Normal;
                self.status_message = Some("Edit cancelled".into());
            }
            KeyCode::Backspace => {
                if let BrowseMode::EditPrice { input, .. } | BrowseMode::EditStock { input, .. } =
                    &mut self.mode
                {
                    input.pop();
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                if let BrowseMode::EditPrice { input, .. } | BrowseMode::EditStock { input, .. } =
                    &mut self.mode
                {
                    input.push(c);
                }
            }
            KeyCode::Enter => return self.submit_edit(),
            _ => {}
        }
        BrowseAction::Continue
    }

    fn submit_edit(&mut self) -> BrowseAction {
        let mode = std::mem::replace(&mut self.mode, BrowseMode::Normal);
        match mode {
            BrowseMode::EditPrice { product, input } => match input.trim().parse::<f64>() {
                Ok(price) if price.is_finite() && price >= 0.0 => {
                    let input = product.stock_quantity.to_string();
                    self.mode = BrowseMode::EditStock { product, price, input };
                }
                _ => {
                    self.status_message = Some(format!("Invalid price '{input}'"));
                    self.mode = BrowseMode::EditPrice { product, input };
                }
            },
            BrowseMode::EditStock { product, price, input } => match input.trim().parse::<u32>() {
                Ok(qty) => {
                    let update = ProductUpdate {
                        price: Some(price),
                        stock_quantity: Some(qty),
                        ..Default::default()
                    };
                    return BrowseAction::Commit(product.id, update);
                }
                Err(_) => {
                    self.status_message = Some(format!("Invalid stock '{input}'"));
                    self.mode = BrowseMode::EditStock { product, price, input };
                }
            },
            other => self.mode = other,
        }
        BrowseAction::Continue
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal, conn: &Connection) -> Result<()> {
        loop {
            if self.view.is_loading() {
                terminal.draw(|frame| self.draw_frame(frame))?;
                self.reload(conn)?;
            }
            terminal.draw(|frame| self.draw_frame(frame))?;

            if let Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) = event::read()?
            {
                if kind != KeyEventKind::Press {
                    continue;
                }

                if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
                    break;
                }

                match self.handle_key_event(code) {
                    BrowseAction::Close => break,
                    BrowseAction::Continue => {}
                    BrowseAction::Reload => self.view.set_loading(true),
                    BrowseAction::Commit(id, update) => {
                        match catalog::update_product(conn, &id, &update) {
                            Ok(p) => {
                                self.view.set_loading(true);
                                self.status_message = Some(format!("Updated '{}'", p.name));
                            }
                            Err(e) => self.status_message = Some(format!("Edit failed: {e}")),
                        }
                    }
                    BrowseAction::Delete(id) => match catalog::delete_product(conn, &id) {
                        Ok(p) => {
                            self.view.set_loading(true);
                            self.status_message = Some(format!("Deleted '{}'", p.name));
                        }
                        Err(e) => self.status_message = Some(format!("Delete failed: {e}")),
                    },
                }
            }
        }
        Ok(())
    }
}
