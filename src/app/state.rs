//! Application state management and view model computation.
//!
//! [`AppState`] wraps the [`QueryController`] with the purely interactive
//! state the controller does not care about: which mode keystrokes are in,
//! which result is selected, and the color theme.
//!
//! # View Model Computation
//!
//! `compute_viewmodel` turns a state snapshot into a
//! [`UIViewModel`]: it picks the result view, windows the result page to the
//! terminal height, truncates names, highlights query matches, and formats
//! counts and dates.

use super::controller::QueryController;
use super::modes::InputMode;
use crate::domain::{RepositorySummary, SortOrder, ViewMode};
use crate::ui::components::{grid, table, table_capacity, grid_row_capacity};
use crate::ui::helpers::{compact_count, group_thousands, truncate};
use crate::ui::renderer::{select_view, ResultView};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, PaginationInfo, ResultBody, SearchBarInfo,
    ToolbarInfo, UIViewModel,
};
use chrono::{DateTime, Utc};
use fuzzy_matcher::skim::SkimMatcherV2;

const TITLE: &str = " GitHub Repository Search ";
const PLACEHOLDER: &str = "Search GitHub repositories (try: language:rust stars:>1000)";

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Search query, current result page and fetch ordering.
    pub controller: QueryController,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Zero-based index of the selected repository within the current page.
    ///
    /// Wraps around during navigation and resets to 0 whenever a new page
    /// of results is accepted.
    pub selected_index: usize,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Whether every edit of the query text issues a fetch. When `false`,
    /// only submitting does.
    pub live_search: bool,
}

impl AppState {
    /// Creates state in normal mode with nothing selected.
    #[must_use]
    pub const fn new(controller: QueryController, theme: Theme, live_search: bool) -> Self {
        Self {
            controller,
            input_mode: InputMode::Normal,
            selected_index: 0,
            theme,
            live_search,
        }
    }

    fn item_count(&self) -> usize {
        self.controller.result().items.len()
    }

    /// Moves selection down by one, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.item_count();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves selection up by one, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.item_count();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Selects the first result.
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
    }

    /// The selected repository, if the current page has any.
    #[must_use]
    pub fn selected_repository(&self) -> Option<&RepositorySummary> {
        self.controller.result().items.get(self.selected_index)
    }

    /// Computes the view model for a terminal `rows` x `cols`, using the
    /// current time for "updated" ages.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        self.compute_viewmodel_at(rows, cols, Utc::now())
    }

    /// Computes the view model with ages measured from `now`.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Work out how many table rows, or card rows, fit in the body
    /// 2. Center the window on the selected row
    /// 3. Shift the window back if it would run past the end
    #[must_use]
    pub fn compute_viewmodel_at(&self, rows: usize, cols: usize, now: DateTime<Utc>) -> UIViewModel {
        let query = self.controller.query();
        let result = self.controller.result();
        let view = select_view(
            result.items.len(),
            query.view_mode,
            self.controller.is_loading(),
            query.has_text(),
        );

        tracing::trace!(view = ?view, rows = rows, cols = cols, "computing view model");

        let matcher = query.has_text().then(SkimMatcherV2::default);
        let terms = highlight_terms(&query.normalized_text());

        let body = match view {
            ResultView::Idle => ResultBody::Idle,
            ResultView::Loading => ResultBody::Loading(EmptyState {
                message: "Loading...".to_string(),
                subtitle: format!("Searching for \"{}\"", query.normalized_text()),
            }),
            ResultView::NoResults => ResultBody::NoResults(EmptyState {
                message: "No results found".to_string(),
                subtitle: "Try a different query".to_string(),
            }),
            ResultView::Table => {
                let capacity = table_capacity(rows).max(1);
                let (start, end) = visible_window(self.selected_index, result.items.len(), capacity);
                let items = (start..end)
                    .map(|idx| {
                        self.compute_display_item(idx, table::TABLE_NAME_WIDTH, now, matcher.as_ref(), &terms)
                    })
                    .collect();
                ResultBody::Table { items }
            }
            ResultView::Grid => {
                let columns = grid::grid_columns(cols);
                let len = result.items.len();
                let card_rows = len / columns + usize::from(len % columns != 0);
                let (first_row, last_row) =
                    visible_window(self.selected_index / columns, card_rows, grid_row_capacity(rows));
                let start = first_row * columns;
                let end = (last_row * columns).min(len);
                let items = (start..end)
                    .map(|idx| {
                        self.compute_display_item(idx, grid::CARD_CONTENT_WIDTH, now, matcher.as_ref(), &terms)
                    })
                    .collect();
                ResultBody::Grid { columns, items }
            }
        };

        let shows_results = matches!(view, ResultView::Grid | ResultView::Table);

        UIViewModel {
            header: HeaderInfo {
                title: TITLE.to_string(),
                location: query.location(),
            },
            search_bar: SearchBarInfo {
                query: query.text.clone(),
                is_focused: self.input_mode == InputMode::Search,
                placeholder: PLACEHOLDER.to_string(),
            },
            toolbar: shows_results.then(|| self.compute_toolbar()),
            body,
            pagination: if shows_results { self.compute_pagination() } else { None },
            footer: self.compute_footer(),
        }
    }

    fn compute_display_item(
        &self,
        idx: usize,
        name_width: usize,
        now: DateTime<Utc>,
        matcher: Option<&SkimMatcherV2>,
        terms: &[String],
    ) -> DisplayItem {
        let repo = &self.controller.result().items[idx];
        let name = truncate(&repo.display_name(), name_width);
        let highlight_ranges = matcher.map_or_else(Vec::new, |m| compute_highlight_ranges(&name, terms, m));

        DisplayItem {
            description: repo
                .description
                .as_deref()
                .map(|d| d.split_whitespace().collect::<Vec<_>>().join(" "))
                .unwrap_or_default(),
            language: repo.language.clone().unwrap_or_else(|| "-".to_string()),
            stars: compact_count(repo.stargazers_count),
            forks: compact_count(repo.forks_count),
            updated: repo.updated_ago(now),
            is_selected: idx == self.selected_index,
            highlight_ranges,
            name,
        }
    }

    fn compute_toolbar(&self) -> ToolbarInfo {
        let query = self.controller.query();
        let total = self.controller.result().total_count;
        let noun = if total == 1 { "result" } else { "results" };
        let sort_label = match query.sort {
            Some(SortOrder::Asc) => "sort: asc",
            Some(SortOrder::Desc) => "sort: desc",
            None => "sort: best match",
        };

        ToolbarInfo {
            summary: format!("{} {noun} found for {}", group_thousands(total), query.normalized_text()),
            sort_label: sort_label.to_string(),
            view_label: format!("view: {}", query.view_mode.as_str()),
            page_label: format!("page {}/{}", query.page, self.controller.total_pages()),
        }
    }

    fn compute_pagination(&self) -> Option<PaginationInfo> {
        let total = self.controller.total_pages();
        if total <= 1 {
            return None;
        }
        let current = self.controller.query().page;
        Some(PaginationInfo {
            current,
            total,
            slots: crate::ui::components::pagination::page_slots(current, total),
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, self.controller.query().view_mode) {
            (InputMode::Search, _) => {
                "Enter: search  ESC: done  Ctrl+u: clear  Ctrl+n/p: navigate  Type to edit"
            }
            (InputMode::Normal, ViewMode::Grid) => {
                "j/k: select  n/p: page  s: sort  t: table  r: refresh  /: search  Enter: open  q: quit"
            }
            (InputMode::Normal, ViewMode::Table) => {
                "j/k: select  n/p: page  s: sort  g: grid  r: refresh  /: search  Enter: open  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Window `[start, end)` of at most `capacity` entries out of `len`, centered
/// on `selected` and shifted back from the end when needed.
fn visible_window(selected: usize, len: usize, capacity: usize) -> (usize, usize) {
    let mut start = selected.saturating_sub(capacity / 2);
    let end = (start + capacity).min(len);

    if end - start.min(end) < capacity && len >= capacity {
        start = end.saturating_sub(capacity);
    }

    (start.min(end), end)
}

/// Query words worth highlighting: qualifiers such as `language:rust` match
/// metadata, not names, and are skipped.
fn highlight_terms(normalized: &str) -> Vec<String> {
    normalized
        .split(' ')
        .filter(|t| !t.is_empty() && !t.contains(':'))
        .map(str::to_lowercase)
        .collect()
}

/// Character ranges of `text` matched by any of `terms`, coalesced into
/// contiguous `(start, end)` runs.
fn compute_highlight_ranges(text: &str, terms: &[String], matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let mut indices: Vec<usize> = terms
        .iter()
        .filter_map(|term| matcher.fuzzy_indices(text, term))
        .flat_map(|(_score, idx)| idx)
        .collect();
    indices.sort_unstable();
    indices.dedup();

    let mut ranges = Vec::new();
    let mut start = None;
    let mut prev = None;

    for &idx in &indices {
        match (start, prev) {
            (None, _) => {
                start = Some(idx);
                prev = Some(idx);
            }
            (Some(_), Some(p)) if idx == p + 1 => {
                prev = Some(idx);
            }
            (Some(s), Some(p)) => {
                ranges.push((s, p + 1));
                start = Some(idx);
                prev = Some(idx);
            }
            _ => {}
        }
    }

    if let (Some(s), Some(p)) = (start, prev) {
        ranges.push((s, p + 1));
    }

    ranges
}
