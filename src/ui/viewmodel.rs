//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data:
//! truncated strings, formatted counts, highlight ranges and selection flags.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Title bar.
    pub header: HeaderInfo,

    /// Query input box, always present.
    pub search_bar: SearchBarInfo,

    /// Result summary line, present only when a non-empty page is shown.
    pub toolbar: Option<ToolbarInfo>,

    /// What fills the space between the toolbar and the pagination bar.
    pub body: ResultBody,

    /// Page navigation, present only when there is more than one page.
    pub pagination: Option<PaginationInfo>,

    /// Keybinding hints.
    pub footer: FooterInfo,
}

/// The result area.
///
/// Exactly one variant is shown per frame; see
/// [`select_view`](crate::ui::renderer::select_view).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultBody {
    /// No query yet: nothing is drawn.
    Idle,
    /// A fetch is outstanding.
    Loading(EmptyState),
    /// A query was answered with zero items, or the fetch failed.
    NoResults(EmptyState),
    /// Cards laid out `columns` per row, in result order.
    Grid {
        /// Cards per row for the current width.
        columns: usize,
        /// Visible cards.
        items: Vec<DisplayItem>,
    },
    /// One row per repository, in result order.
    Table {
        /// Visible rows.
        items: Vec<DisplayItem>,
    },
}

/// Display information for a single repository.
///
/// Rendered either as a table row or as a grid card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// `owner/name`, already truncated to fit.
    pub name: String,

    /// Description, empty when the repository has none.
    pub description: String,

    /// Primary language, `-` when unknown.
    pub language: String,

    /// Star count, compact form (`1.2k`).
    pub stars: String,

    /// Fork count, compact form.
    pub forks: String,

    /// Time since last update (`3d ago`).
    pub updated: String,

    /// Whether this item is currently selected.
    pub is_selected: bool,

    /// Character ranges of `name` matching the query.
    ///
    /// Each tuple is `(start, end)` in character indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text, centered.
    pub title: String,

    /// Shareable query string for the current state, drawn right-aligned
    /// when it fits.
    pub location: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Centered message for the loading and no-results states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message.
    pub message: String,

    /// Secondary text, may be empty.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current query text as typed.
    pub query: String,

    /// Whether keystrokes currently edit the query.
    pub is_focused: bool,

    /// Shown dimmed when the query is empty.
    pub placeholder: String,
}

/// Result summary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarInfo {
    /// `"1,234 results found for rust"`.
    pub summary: String,

    /// `"sort: desc"`, `"sort: best match"`.
    pub sort_label: String,

    /// `"view: grid"` or `"view: table"`.
    pub view_label: String,

    /// `"page 2/13"`.
    pub page_label: String,
}

/// Page navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    /// Current page, 1-based.
    pub current: u32,

    /// Number of pages.
    pub total: u32,

    /// Page numbers to draw, with gaps where pages are elided.
    pub slots: Vec<PageSlot>,
}

/// One cell of the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    /// A page number.
    Page(u32),
    /// Elided pages, drawn as `…`.
    Gap,
}
