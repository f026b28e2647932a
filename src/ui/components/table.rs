//! Table component renderer.
//!
//! One repository per row with NAME, STARS, FORKS, LANGUAGE, UPDATED and
//! DESCRIPTION columns. The description takes whatever width is left.

use crate::ui::helpers::{self, char_len, position_cursor, push_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Width of the NAME column. Names are truncated to this before rendering.
pub const TABLE_NAME_WIDTH: usize = 34;
const STARS_WIDTH: usize = 7;
const FORKS_WIDTH: usize = 7;
const LANGUAGE_WIDTH: usize = 12;
const UPDATED_WIDTH: usize = 10;

/// Total width of everything left of the DESCRIPTION column, separators
/// included.
const FIXED_WIDTH: usize =
    TABLE_NAME_WIDTH + 1 + STARS_WIDTH + 1 + FORKS_WIDTH + 1 + LANGUAGE_WIDTH + 1 + UPDATED_WIDTH + 1;

/// Renders the bold column header line and returns the next free row.
pub fn render_table_headers(out: &mut String, row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));

    let mut line = String::new();
    push_padded(&mut line, "NAME", TABLE_NAME_WIDTH + 1);
    push_padded(&mut line, "STARS", STARS_WIDTH + 1);
    push_padded(&mut line, "FORKS", FORKS_WIDTH + 1);
    push_padded(&mut line, "LANGUAGE", LANGUAGE_WIDTH + 1);
    push_padded(&mut line, "UPDATED", UPDATED_WIDTH + 1);
    line.push_str("DESCRIPTION");

    push_padded(out, &line, cols);
    out.push_str(Theme::reset());
    row + 1
}

/// Renders `items` one per line starting at `row` and returns the next free
/// row.
pub fn render_table_rows(out: &mut String, row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(out, current_row, item, theme, cols);
    }
    current_row
}

/// Renders a single row.
///
/// A selected row gets the selection colors across the full terminal width
/// and no match highlighting. Otherwise stars use the accent color and the
/// description is dimmed.
fn render_table_row(out: &mut String, row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);

    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    out.push_str(&base);

    helpers::push_highlighted_text(out, &item.name, &item.highlight_ranges, theme, item.is_selected);
    out.push_str(&" ".repeat((TABLE_NAME_WIDTH + 1).saturating_sub(char_len(&item.name))));

    recolor(out, item.is_selected, &theme.colors.accent_fg);
    push_padded(out, &item.stars, STARS_WIDTH + 1);
    recolor(out, item.is_selected, &theme.colors.text_normal);
    push_padded(out, &item.forks, FORKS_WIDTH + 1);
    push_padded(out, &item.language, LANGUAGE_WIDTH + 1);
    push_padded(out, &item.updated, UPDATED_WIDTH + 1);

    recolor(out, item.is_selected, &theme.colors.text_dim);
    push_padded(out, &item.description, cols.saturating_sub(FIXED_WIDTH));

    out.push_str(Theme::reset());
    row + 1
}

/// Switches the foreground color unless the selection colors are active.
fn recolor(out: &mut String, is_selected: bool, fg: &str) {
    if !is_selected {
        out.push_str(&Theme::fg(fg));
    }
}
