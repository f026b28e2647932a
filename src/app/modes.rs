//! Input mode state for the application.
//!
//! The plugin is either in **Normal** mode, where single keys drive
//! navigation, paging, sorting and layout, or in **Search** mode, where keys
//! edit the query text.
//!
//! The result layout ([`ViewMode`]) and sort order ([`SortOrder`]) are part of
//! the search query itself and are re-exported here for convenience.

pub use crate::domain::{SortOrder, ViewMode};

/// Current input handling mode.
///
/// Controls which keybindings are active, whether the search box is drawn
/// as focused, and the footer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation and command mode.
    ///
    /// Available keybindings: j/k (select), n/p (page), s (sort), g/t/v
    /// (layout), r (refresh), / (search), enter (open), q (quit).
    #[default]
    Normal,

    /// The search box has focus and characters edit the query.
    Search,
}
