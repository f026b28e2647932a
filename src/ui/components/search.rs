//! Search bar component renderer.
//!
//! The box is always drawn. Its border switches to the highlight color while
//! keystrokes edit the query.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Label drawn before the query.
const PROMPT: &str = " Search: ";

/// Cursor glyph appended while focused.
const CURSOR: char = '▏';

/// Renders the 3-line search box at `row` and returns the next free row.
///
/// # Layout
///
/// ```text
/// [margin] ┌─────────────────────┐ [margin]
/// [margin] │ Search: rust tui▏   │ [margin]
/// [margin] └─────────────────────┘ [margin]
/// ```
///
/// Queries longer than the box show their tail, so the text being typed
/// stays visible.
pub fn render_search_bar(out: &mut String, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border_color = if search.is_focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(out, row, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&Theme::fg(border_color));
    out.push_str(&format!("┌{}┐", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    position_cursor(out, row + 1, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&Theme::fg(border_color));
    out.push('│');
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(PROMPT);

    let room = inner_width.saturating_sub(char_len(PROMPT) + 1);
    let used = if search.query.is_empty() && !search.placeholder.is_empty() {
        let placeholder: String = search.placeholder.chars().take(room).collect();
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&placeholder);
        char_len(&placeholder)
    } else {
        let visible = tail(&search.query, room);
        out.push_str(&visible);
        char_len(&visible)
    };

    let mut line_len = char_len(PROMPT) + used;
    if search.is_focused && line_len < inner_width {
        out.push_str(&Theme::fg(&theme.colors.search_bar_border));
        out.push(CURSOR);
        line_len += 1;
    }

    out.push_str(&" ".repeat(inner_width.saturating_sub(line_len)));
    out.push_str(&Theme::fg(border_color));
    out.push('│');
    out.push_str(Theme::reset());

    position_cursor(out, row + 2, 1);
    out.push_str(&" ".repeat(SEARCH_BOX_MARGIN));
    out.push_str(&Theme::fg(border_color));
    out.push_str(&format!("└{}┘", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    row + 3
}

/// Last `width` characters of `text`.
fn tail(text: &str, width: usize) -> String {
    let len = char_len(text);
    text.chars().skip(len.saturating_sub(width)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    fn bar(query: &str, is_focused: bool) -> SearchBarInfo {
        SearchBarInfo {
            query: query.to_string(),
            is_focused,
            placeholder: "Search GitHub repositories".to_string(),
        }
    }

    #[test]
    fn placeholder_shown_for_empty_query() {
        let mut out = String::new();
        let next = render_search_bar(&mut out, 4, &bar("", false), &Theme::default(), 80);
        assert_eq!(next, 7);
        assert!(strip_ansi(&out).contains("Search: Search GitHub repositories"));
    }

    #[test]
    fn long_query_shows_its_tail() {
        let query = format!("{}END", "x".repeat(200));
        let mut out = String::new();
        render_search_bar(&mut out, 4, &bar(&query, true), &Theme::default(), 40);
        let plain = strip_ansi(&out);
        assert!(plain.contains("END"));
        assert!(!plain.contains(&"x".repeat(40)));
    }

    #[test]
    fn focus_changes_border_color() {
        let theme = Theme::default();
        let mut focused = String::new();
        render_search_bar(&mut focused, 4, &bar("rust", true), &theme, 80);
        assert!(focused.contains(&Theme::fg(&theme.colors.search_bar_border)));
        assert!(focused.contains(CURSOR));

        let mut idle = String::new();
        render_search_bar(&mut idle, 4, &bar("rust", false), &theme, 80);
        assert!(!idle.contains(CURSOR));
    }
}
