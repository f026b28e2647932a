//! Result summary line between the search box and the results.

use crate::ui::helpers::{char_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToolbarInfo;

/// Renders the summary on the left and the sort, view and page labels on
/// the right.
///
/// On narrow terminals the summary is truncated before the labels are.
pub fn render_toolbar(out: &mut String, row: usize, toolbar: &ToolbarInfo, theme: &Theme, cols: usize) {
    let labels = format!(
        "{}  {}  {} ",
        toolbar.sort_label, toolbar.view_label, toolbar.page_label
    );
    let labels_len = char_len(&labels);
    let summary_room = cols.saturating_sub(labels_len + 2);
    let summary = truncate(&format!(" {}", toolbar.summary), summary_room);
    let summary_len = char_len(&summary);

    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(&summary);

    if summary_len + labels_len <= cols {
        out.push_str(&" ".repeat(cols - summary_len - labels_len));
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&labels);
    } else {
        out.push_str(&" ".repeat(cols.saturating_sub(summary_len)));
    }
    out.push_str(Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    fn toolbar() -> ToolbarInfo {
        ToolbarInfo {
            summary: "1,234 results found for rust".to_string(),
            sort_label: "sort: desc".to_string(),
            view_label: "view: grid".to_string(),
            page_label: "page 2/13".to_string(),
        }
    }

    #[test]
    fn labels_are_right_aligned() {
        let mut out = String::new();
        render_toolbar(&mut out, 7, &toolbar(), &Theme::default(), 100);
        let plain = strip_ansi(&out);
        assert_eq!(plain.chars().count(), 100);
        assert!(plain.starts_with(" 1,234 results found for rust"));
        assert!(plain.ends_with("sort: desc  view: grid  page 2/13 "));
    }

    #[test]
    fn summary_gives_way_on_narrow_terminals() {
        let mut out = String::new();
        render_toolbar(&mut out, 7, &toolbar(), &Theme::default(), 50);
        let plain = strip_ansi(&out);
        assert_eq!(plain.chars().count(), 50);
        assert!(plain.ends_with("page 2/13 "));
        assert!(plain.contains("..."));
    }
}
