//! Top-level rendering coordinator.
//!
//! Rendering is split in two steps:
//!
//! 1. [`select_view`] decides which result view a frame shows. It is a pure
//!    function of the fetched page, the view mode and the loading flag.
//! 2. `AppState::compute_viewmodel` fills that view with display data and
//!    [`render_to_string`] composes the ANSI frame.
//!
//! # Example
//!
//! ```rust
//! use reposcope::domain::ViewMode;
//! use reposcope::ui::renderer::{select_view, ResultView};
//!
//! assert_eq!(select_view(0, ViewMode::Grid, true, true), ResultView::Loading);
//! assert_eq!(select_view(2, ViewMode::Table, false, true), ResultView::Table);
//! assert_eq!(select_view(0, ViewMode::Table, false, true), ResultView::NoResults);
//! assert_eq!(select_view(0, ViewMode::Grid, false, false), ResultView::Idle);
//! ```

use crate::app::AppState;
use crate::domain::ViewMode;
use crate::ui::components;

/// Which result view a frame shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultView {
    /// A fetch is outstanding.
    Loading,
    /// Non-empty results as cards.
    Grid,
    /// Non-empty results as rows.
    Table,
    /// A query produced nothing, or its fetch failed.
    NoResults,
    /// No query has been made: draw nothing.
    Idle,
}

/// Chooses the result view.
///
/// Loading wins over everything; otherwise results are shown in the
/// requested layout, and an empty page is a "no results" message only when
/// there is a query it answers.
#[must_use]
pub const fn select_view(result_count: usize, view_mode: ViewMode, loading: bool, has_query: bool) -> ResultView {
    if loading {
        return ResultView::Loading;
    }
    if result_count > 0 {
        return match view_mode {
            ViewMode::Grid => ResultView::Grid,
            ViewMode::Table => ResultView::Table,
        };
    }
    if has_query {
        ResultView::NoResults
    } else {
        ResultView::Idle
    }
}

/// Composes the full ANSI frame for `state` at the given terminal size.
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    let mut out = String::new();
    components::render_frame(&mut out, &viewmodel, &state.theme, rows, cols);
    out
}

/// Renders the plugin UI to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    print!("{}", render_to_string(state, rows, cols));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_hides_stale_results() {
        assert_eq!(select_view(5, ViewMode::Grid, true, true), ResultView::Loading);
        assert_eq!(select_view(5, ViewMode::Table, true, false), ResultView::Loading);
    }

    #[test]
    fn results_follow_view_mode() {
        assert_eq!(select_view(1, ViewMode::Grid, false, true), ResultView::Grid);
        assert_eq!(select_view(1, ViewMode::Table, false, true), ResultView::Table);
    }

    #[test]
    fn empty_page_depends_on_query() {
        assert_eq!(select_view(0, ViewMode::Grid, false, true), ResultView::NoResults);
        assert_eq!(select_view(0, ViewMode::Table, false, false), ResultView::Idle);
    }
}
