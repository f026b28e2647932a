//! Pagination bar renderer.
//!
//! ```text
//!             ‹ prev   1 … 4 [5] 6 … 13   next ›
//! ```

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{PageSlot, PaginationInfo};

/// Page counts up to this are listed in full.
const FULL_LIST_MAX: u32 = 7;

/// Pages to draw for `current` out of `total`.
///
/// Short ranges are listed in full. Longer ones keep the first page, the
/// last page and the neighbors of `current`, with a [`PageSlot::Gap`] where
/// two or more pages are skipped. A single skipped page is shown instead of
/// a gap.
#[must_use]
pub fn page_slots(current: u32, total: u32) -> Vec<PageSlot> {
    if total <= FULL_LIST_MAX {
        return (1..=total).map(PageSlot::Page).collect();
    }

    let current = current.clamp(1, total);
    let mut pages = vec![1, current.saturating_sub(1), current, current.saturating_add(1), total];
    pages.retain(|p| (1..=total).contains(p));
    pages.sort_unstable();
    pages.dedup();

    let mut slots = Vec::with_capacity(pages.len() * 2);
    let mut prev: Option<u32> = None;
    for page in pages {
        match prev {
            Some(p) if page - p == 2 => slots.push(PageSlot::Page(p + 1)),
            Some(p) if page - p > 2 => slots.push(PageSlot::Gap),
            _ => {}
        }
        slots.push(PageSlot::Page(page));
        prev = Some(page);
    }
    slots
}

/// Renders the pagination bar centered at `row`.
pub fn render_pagination(out: &mut String, row: usize, info: &PaginationInfo, theme: &Theme, cols: usize) {
    let has_prev = info.current > 1;
    let has_next = info.current < info.total;

    let mut segments: Vec<(String, Style)> = Vec::new();
    segments.push(("‹ prev".to_string(), if has_prev { Style::Normal } else { Style::Dim }));
    segments.push(("  ".to_string(), Style::Normal));
    for slot in &info.slots {
        segments.push((" ".to_string(), Style::Normal));
        match slot {
            PageSlot::Page(p) if *p == info.current => segments.push((format!("[{p}]"), Style::Current)),
            PageSlot::Page(p) => segments.push((p.to_string(), Style::Normal)),
            PageSlot::Gap => segments.push(("…".to_string(), Style::Dim)),
        }
    }
    segments.push(("   ".to_string(), Style::Normal));
    segments.push(("next ›".to_string(), if has_next { Style::Normal } else { Style::Dim }));

    let width: usize = segments.iter().map(|(text, _)| char_len(text)).sum();
    let padding = cols.saturating_sub(width) / 2;

    position_cursor(out, row, 1);
    out.push_str(&" ".repeat(padding));
    for (text, style) in &segments {
        match style {
            Style::Normal => out.push_str(&Theme::fg(&theme.colors.text_normal)),
            Style::Dim => out.push_str(&Theme::fg(&theme.colors.text_dim)),
            Style::Current => {
                out.push_str(Theme::bold());
                out.push_str(&Theme::fg(&theme.colors.accent_fg));
            }
        }
        out.push_str(text);
        out.push_str(Theme::reset());
    }
    out.push_str(&" ".repeat(cols.saturating_sub(padding + width)));
}

#[derive(Clone, Copy)]
enum Style {
    Normal,
    Dim,
    Current,
}
