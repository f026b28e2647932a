//! Shared rendering utilities and helpers.
//!
//! Components write ANSI output into a `String` frame buffer instead of
//! printing directly, so a whole frame can be inspected before it reaches the
//! terminal. Everything here measures text in characters, not bytes.
//!
//! # Example
//!
//! ```rust
//! use reposcope::ui::helpers::{push_highlighted_text, truncate};
//! use reposcope::ui::Theme;
//!
//! let theme = Theme::default();
//! let mut out = String::new();
//! push_highlighted_text(&mut out, "rust-lang/rust", &[(0, 4)], &theme, false);
//! assert!(out.contains("rust"));
//!
//! assert_eq!(truncate("a-very-long-repository-name", 10), "a-very-...");
//! ```

use crate::ui::theme::Theme;

/// Appends an ANSI cursor move to `row`, `col` (both 1-indexed).
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    out.push_str(&format!("\u{1b}[{row};{col}H"));
}

/// Number of characters in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `width` characters, ending in `...` when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if char_len(text) <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut cut: String = text.chars().take(width - 3).collect();
    cut.push_str("...");
    cut
}

/// Appends `text` left-aligned in a field of `width` characters, truncating
/// if it is longer.
pub fn push_padded(out: &mut String, text: &str, width: usize) {
    let shown = truncate(text, width);
    let len = char_len(&shown);
    out.push_str(&shown);
    out.push_str(&" ".repeat(width.saturating_sub(len)));
}

/// Formats a count the way GitHub does: `999`, `1.2k`, `12.3k`, `1.5m`.
#[must_use]
pub fn compact_count(n: u64) -> String {
    match n {
        0..=999 => n.to_string(),
        1_000..=999_999 => format_scaled(n, 1_000, "k"),
        _ => format_scaled(n, 1_000_000, "m"),
    }
}

/// `unit` must be a multiple of 10.
fn format_scaled(n: u64, unit: u64, suffix: &str) -> String {
    let tenths = n / (unit / 10);
    let (whole, frac) = (tenths / 10, tenths % 10);
    if frac == 0 {
        format!("{whole}{suffix}")
    } else {
        format!("{whole}.{frac}{suffix}")
    }
}

/// Formats an integer with thousands separators: `1234567` becomes `1,234,567`.
#[must_use]
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Appends text with highlighted character ranges for query matches.
///
/// Ranges are `(start, end)` character indices, end exclusive, sorted and
/// non-overlapping. Out-of-range indices are clamped. Selected items are
/// written plain so the selection colors stay intact.
pub fn push_highlighted_text(
    out: &mut String,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(current_pos, chars.len());
        let end = end.clamp(start, chars.len());

        out.extend(&chars[current_pos..start]);
        if start < end {
            out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
            out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
            out.extend(&chars[start..end]);
            out.push_str(Theme::reset());
            out.push_str(&Theme::fg(&theme.colors.text_normal));
        }

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
}

/// Removes ANSI escape sequences, leaving only visible text.
#[cfg(test)]
pub(crate) fn strip_ansi(s: &str) -> String {
    let mut plain = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for t in chars.by_ref() {
                if t.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            plain.push(c);
        }
    }
    plain
}

/// Splits a frame into the visible text written after each cursor move.
#[cfg(test)]
pub(crate) fn frame_lines(frame: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = None;
    let mut chars = frame.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            let mut seq = String::new();
            for t in chars.by_ref() {
                seq.push(t);
                if t.is_ascii_alphabetic() {
                    break;
                }
            }
            if seq.ends_with('H') {
                if let Some(line) = current.take() {
                    lines.push(line);
                }
                current = Some(String::new());
            }
        } else if let Some(line) = current.as_mut() {
            line.push(c);
        }
    }
    lines.extend(current);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("日本語のリポジトリ", 6), "日本語...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn compact_counts() {
        assert_eq!(compact_count(0), "0");
        assert_eq!(compact_count(999), "999");
        assert_eq!(compact_count(1_000), "1k");
        assert_eq!(compact_count(1_234), "1.2k");
        assert_eq!(compact_count(98_765), "98.7k");
        assert_eq!(compact_count(2_500_000), "2.5m");
    }

    #[test]
    fn compact_count_handles_largest_value() {
        assert_eq!(compact_count(u64::MAX), "18446744073709.5m");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(7), "7");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn highlights_survive_out_of_range_indices() {
        let theme = Theme::default();
        let mut out = String::new();
        push_highlighted_text(&mut out, "abc", &[(1, 2), (5, 9)], &theme, false);
        assert_eq!(strip_ansi(&out), "abc");
        assert!(out.contains(&Theme::bg(&theme.colors.match_highlight_bg)));
    }

    #[test]
    fn selected_text_is_not_highlighted() {
        let theme = Theme::default();
        let mut out = String::new();
        push_highlighted_text(&mut out, "abc", &[(0, 3)], &theme, true);
        assert_eq!(out, "abc");
    }

    #[test]
    fn padding_fills_field_width() {
        let mut out = String::new();
        push_padded(&mut out, "ab", 5);
        assert_eq!(out, "ab   ");
    }
}
