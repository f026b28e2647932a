//! Composable UI component renderers.
//!
//! Each component appends one region of the screen to a frame buffer and
//! returns the next free row where that is meaningful.
//!
//! # Components
//!
//! - [`header`]: title bar with the current query string
//! - [`search`]: search input box
//! - [`toolbar`]: result count, sort and view labels
//! - [`table`]: one row per repository
//! - [`grid`]: one card per repository
//! - [`empty`]: centered loading / no-results message
//! - [`pagination`]: page navigation
//! - [`footer`]: keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Toolbar]
//! [Body: table, grid, message or nothing]
//! [Pagination]
//! [Border]
//! [Footer]
//! [blank line]
//! ```

mod empty;
mod footer;
pub mod grid;
mod header;
pub mod pagination;
mod search;
pub mod table;
mod toolbar;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ResultBody, UIViewModel};

use empty::render_empty_state;
use footer::render_footer;
use grid::render_grid;
use header::render_header;
use pagination::render_pagination;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};
use toolbar::render_toolbar;

/// Rows above the body: blank, header, border, search box, toolbar.
pub const TOP_CHROME_ROWS: usize = 7;

/// Rows below the body: pagination, border, footer, trailing blank.
pub const BOTTOM_CHROME_ROWS: usize = 4;

/// Blank rows kept above a centered loading / no-results message.
const MESSAGE_OFFSET: usize = 2;

/// Rows available to the result body for a terminal `rows` high.
#[must_use]
pub const fn body_rows(rows: usize) -> usize {
    rows.saturating_sub(TOP_CHROME_ROWS + BOTTOM_CHROME_ROWS)
}

/// Table rows that fit in the body, after its column header line.
#[must_use]
pub const fn table_capacity(rows: usize) -> usize {
    body_rows(rows).saturating_sub(1)
}

/// Card rows that fit in the body, at least one.
#[must_use]
pub const fn grid_row_capacity(rows: usize) -> usize {
    let n = body_rows(rows) / grid::CARD_HEIGHT;
    if n == 0 {
        1
    } else {
        n
    }
}

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders a complete frame.
///
/// The body region is filled by exactly one of the [`ResultBody`] variants.
/// Bottom chrome is anchored to the terminal's last rows regardless of how
/// much the body used.
pub fn render_frame(out: &mut String, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2; // row 1 stays blank

    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);
    current_row = render_search_bar(out, current_row, &vm.search_bar, theme, cols);
    if let Some(toolbar) = &vm.toolbar {
        render_toolbar(out, current_row, toolbar, theme, cols);
    }
    current_row += 1;

    match &vm.body {
        ResultBody::Idle => {}
        ResultBody::Loading(message) | ResultBody::NoResults(message) => {
            render_empty_state(out, current_row + MESSAGE_OFFSET, message, theme, cols);
        }
        ResultBody::Grid { columns, items } => {
            render_grid(out, current_row, items, *columns, theme);
        }
        ResultBody::Table { items } => {
            current_row = render_table_headers(out, current_row, theme, cols);
            render_table_rows(out, current_row, items, theme, cols);
        }
    }

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let pagination_row = border_row.saturating_sub(1);

    if let Some(pagination) = &vm.pagination {
        render_pagination(out, pagination_row, pagination, theme, cols);
    }
    render_border(out, border_row, &theme.colors.border, cols);
    render_footer(out, footer_row, &vm.footer, theme, cols);
}
