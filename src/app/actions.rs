//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to the host directly. It returns a list of
//! [`Action`]s and the plugin shim turns each one into a Zellij call.
//!
//! # Example
//!
//! ```rust
//! use reposcope::app::Action;
//!
//! let actions = vec![Action::OpenUrl { url: "https://github.com/zellij-org/zellij".into() }];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::github::SearchRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues one HTTP GET to the search API.
    ///
    /// The response comes back later as a separate event carrying the
    /// request's context map.
    Fetch(SearchRequest),

    /// Opens a repository page with the configured opener command.
    OpenUrl {
        /// Repository `html_url`.
        url: String,
    },
}
