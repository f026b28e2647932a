//! Header component renderer.
//!
//! Draws the title centered and, when there is room for both, the current
//! query string right-aligned on the same line.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Minimum spaces kept between the title and the location.
const LOCATION_GAP: usize = 2;

/// Renders the header title bar at `row` and returns the next free row.
///
/// # Layout
///
/// ```text
/// [padding] TITLE [padding]          ?page=1&query=rust
/// ```
///
/// The location is omitted when it would touch the title.
pub fn render_header(out: &mut String, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = char_len(&header.title);
    let padding = (cols.saturating_sub(title_len)) / 2;

    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }

    out.push_str(&" ".repeat(padding));
    out.push_str(&header.title);

    let used = padding + title_len;
    let location_len = char_len(&header.location);
    let fits = location_len > 0 && used + LOCATION_GAP + location_len + 1 <= cols;

    if fits {
        let gap = cols - used - location_len - 1;
        out.push_str(&" ".repeat(gap));
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&header.location);
        out.push(' ');
    } else {
        out.push_str(&" ".repeat(cols.saturating_sub(used)));
    }

    out.push_str(Theme::reset());
    row + 1
}
