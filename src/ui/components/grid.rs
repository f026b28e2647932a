//! Grid component renderer.
//!
//! Repositories are drawn as bordered cards, left to right then top to
//! bottom, in result order.
//!
//! ```text
//! ┌──────────────────────────────────┐  ┌──────────────────────────────────┐
//! │ rust-lang/rust                   │  │ tokio-rs/tokio                   │
//! │ Empowering everyone to build re… │  │ A runtime for writing reliable … │
//! │ ★ 98.1k · 12.7k forks · Rust     │  │ ★ 27.4k · 2.5k forks · Rust      │
//! └──────────────────────────────────┘  └──────────────────────────────────┘
//! ```

use crate::ui::helpers::{self, char_len, position_cursor, push_padded, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Outer width of one card, borders included.
pub const CARD_WIDTH: usize = 36;

/// Outer height of one card, borders included.
pub const CARD_HEIGHT: usize = 5;

/// Blank columns between neighboring cards.
pub const CARD_GAP: usize = 2;

/// Text width inside a card: borders plus one space of padding each side.
pub const CARD_CONTENT_WIDTH: usize = CARD_WIDTH - 4;

/// Number of cards that fit side by side in `cols`, at least one.
#[must_use]
pub const fn grid_columns(cols: usize) -> usize {
    let n = (cols + CARD_GAP) / (CARD_WIDTH + CARD_GAP);
    if n == 0 {
        1
    } else {
        n
    }
}

/// Renders `items` as cards starting at `row`, `columns` per row.
///
/// Returns the row after the last card row.
pub fn render_grid(out: &mut String, row: usize, items: &[DisplayItem], columns: usize, theme: &Theme) -> usize {
    let columns = columns.max(1);
    let mut current_row = row;

    for chunk in items.chunks(columns) {
        for (i, item) in chunk.iter().enumerate() {
            let col = 1 + i * (CARD_WIDTH + CARD_GAP);
            render_card(out, current_row, col, item, theme);
        }
        current_row += CARD_HEIGHT;
    }

    current_row
}

fn render_card(out: &mut String, row: usize, col: usize, item: &DisplayItem, theme: &Theme) {
    let inner = CARD_WIDTH - 2;
    let frame = if item.is_selected {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(out, row, col);
    out.push_str(&Theme::fg(frame));
    out.push_str(&format!("┌{}┐", "─".repeat(inner)));

    // name
    position_cursor(out, row + 1, col);
    out.push_str(&Theme::fg(frame));
    out.push('│');
    if item.is_selected {
        out.push_str(Theme::bold());
        out.push_str(&Theme::fg(&theme.colors.selection_fg));
        out.push_str(&Theme::bg(&theme.colors.selection_bg));
    } else {
        out.push_str(Theme::bold());
        out.push_str(&Theme::fg(&theme.colors.text_normal));
    }
    out.push(' ');
    helpers::push_highlighted_text(out, &item.name, &item.highlight_ranges, theme, item.is_selected);
    out.push_str(&" ".repeat((CARD_CONTENT_WIDTH + 1).saturating_sub(char_len(&item.name))));
    out.push_str(Theme::reset());
    out.push_str(&Theme::fg(frame));
    out.push('│');

    // description
    position_cursor(out, row + 2, col);
    out.push('│');
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push(' ');
    push_padded(out, &item.description, CARD_CONTENT_WIDTH);
    out.push(' ');
    out.push_str(&Theme::fg(frame));
    out.push('│');

    // stats
    position_cursor(out, row + 3, col);
    out.push('│');
    out.push(' ');
    let stars = format!("★ {}", item.stars);
    let rest = format!(" · {} forks · {} · {}", item.forks, item.language, item.updated);
    if char_len(&stars) + char_len(&rest) <= CARD_CONTENT_WIDTH {
        out.push_str(&Theme::fg(&theme.colors.accent_fg));
        out.push_str(&stars);
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        push_padded(out, &rest, CARD_CONTENT_WIDTH - char_len(&stars));
    } else {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&truncate(&format!("{stars}{rest}"), CARD_CONTENT_WIDTH));
        let len = char_len(&stars) + char_len(&rest);
        out.push_str(&" ".repeat(CARD_CONTENT_WIDTH.saturating_sub(len)));
    }
    out.push(' ');
    out.push_str(&Theme::fg(frame));
    out.push('│');

    position_cursor(out, row + 4, col);
    out.push_str(&format!("└{}┘", "─".repeat(inner)));
    out.push_str(Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::{frame_lines, strip_ansi};

    fn card(name: &str) -> DisplayItem {
        DisplayItem {
            name: name.to_string(),
            description: "desc".to_string(),
            language: "Rust".to_string(),
            stars: "5".to_string(),
            forks: "1".to_string(),
            updated: "2d ago".to_string(),
            is_selected: false,
            highlight_ranges: vec![],
        }
    }

    #[test]
    fn column_count_follows_width() {
        assert_eq!(grid_columns(10), 1);
        assert_eq!(grid_columns(CARD_WIDTH), 1);
        assert_eq!(grid_columns(2 * CARD_WIDTH + CARD_GAP), 2);
        assert_eq!(grid_columns(2 * CARD_WIDTH + CARD_GAP - 1), 1);
    }

    #[test]
    fn cards_keep_result_order() {
        let items = [card("a/first"), card("b/second"), card("c/third")];
        let mut out = String::new();
        let next = render_grid(&mut out, 8, &items, 2, &Theme::default());
        assert_eq!(next, 8 + 2 * CARD_HEIGHT);

        let plain = strip_ansi(&out);
        let first = plain.find("a/first").unwrap();
        let second = plain.find("b/second").unwrap();
        let third = plain.find("c/third").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn card_lines_have_fixed_width() {
        let mut long = card("owner/an-extremely-long-repository-name-x");
        long.name = truncate(&long.name, CARD_CONTENT_WIDTH);
        long.description = "d".repeat(100);
        long.stars = "123.4k".to_string();
        long.forks = "99.9k".to_string();
        long.language = "JavaScript".to_string();
        long.updated = "11mo ago".to_string();

        let mut out = String::new();
        render_card(&mut out, 1, 1, &long, &Theme::default());
        let lines = frame_lines(&out);
        assert_eq!(lines.len(), CARD_HEIGHT);
        for line in lines {
            assert_eq!(line.chars().count(), CARD_WIDTH, "{line:?}");
        }
    }
}
