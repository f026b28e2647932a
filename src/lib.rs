//! Reposcope: GitHub repository search inside a Zellij pane.
//!
//! Type a query, and the plugin searches GitHub's repository index and
//! shows the current page of results as a card grid or a table:
//! - Query state (text, sort, page, view) seeded from plugin configuration
//! - Fetches through the host's web request API, newest request wins
//! - Grid and table layouts with match highlighting and pagination
//! - Catppuccin themes or a custom TOML theme
//! - OpenTelemetry spans exported to a rotating OTLP JSON file

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Host calls
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Query controller                                 │
//! │  - Event handling / action dispatching              │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────────────┐         ┌───────────────────────┐
//! │ GitHub (github/)      │         │ UI Layer (ui/)        │
//! │ - Request building    │         │ - Result renderer     │
//! │ - Response decoding   │         │ - Grid / table        │
//! └───────────────────────┘         │ - Theming             │
//!                                   └───────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Search query, repositories, errors               │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The library never calls into the host. Everything the host must do is
//! returned from [`handle_event`] as an [`Action`], which keeps the whole
//! crate testable natively.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/reposcope.wasm" {
//!         query "language:rust tui"
//!         sort "desc"
//!         columns "table"
//!         github_token "ghp_..."
//!         live_search "false"
//!         theme "catppuccin-latte"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use reposcope::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//!
//! let mut fetches = 0;
//! for event in [Event::SearchMode, Event::Char('z'), Event::Char('j'), Event::Submit] {
//!     let (_render, actions) = handle_event(&mut state, &event)?;
//!     fetches += actions.iter().filter(|a| matches!(a, Action::Fetch(_))).count();
//! }
//! assert!(fetches > 0);
//! assert_eq!(state.controller.query().text, "zj");
//! # Ok::<(), reposcope::ReposcopeError>(())
//! ```

pub mod app;
pub mod domain;
pub mod github;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode, QueryController, SortOrder, ViewMode};
pub use domain::{ReposcopeError, RepositorySummary, Result, SearchQuery, SearchResult};
pub use github::{SearchRequest, UpstreamConfig};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::path::Path;

/// Opener used for `Enter` when `open_command` is not configured.
pub const DEFAULT_OPEN_COMMAND: &str = "xdg-open";

/// Trace filter used when `trace_level` is not configured.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone)]
pub struct Config {
    /// Query state to start from (`query`, `sort`, `page`, `columns`).
    pub initial_query: SearchQuery,

    /// API base URL and token.
    pub upstream: UpstreamConfig,

    /// Refetch after every edit of the search text. Default: `true`
    pub live_search: bool,

    /// Command that receives the repository URL when `Enter` is pressed.
    pub open_command: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file, `~` already expanded.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for exported spans. Default: `"info"`
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_query: SearchQuery::default(),
            upstream: UpstreamConfig::default(),
            live_search: true,
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: DEFAULT_TRACE_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Parses configuration, reading `GITHUB_TOKEN` from the process
    /// environment when no `github_token` key is given.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use reposcope::{Config, ViewMode};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("query".to_string(), "ratatui".to_string());
    /// map.insert("columns".to_string(), "table".to_string());
    /// map.insert("page".to_string(), "0".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.initial_query.text, "ratatui");
    /// assert_eq!(config.initial_query.view_mode, ViewMode::Table);
    /// assert_eq!(config.initial_query.page, 1);
    /// assert!(config.live_search);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        Self::from_zellij_with_env(config, infrastructure::process_env)
    }

    /// [`Config::from_zellij`] with an injected environment lookup.
    #[must_use]
    pub fn from_zellij_with_env<F>(config: &BTreeMap<String, String>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let upstream = UpstreamConfig {
            api_base: non_blank("api_base")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| github::DEFAULT_API_BASE.to_string()),
            token: infrastructure::resolve_token(config.get("github_token").map(String::as_str), env),
        };

        let live_search = match non_blank("live_search").map(|v| v.to_ascii_lowercase()).as_deref() {
            Some("false" | "no" | "0") => false,
            Some("true" | "yes" | "1") | None => true,
            Some(other) => {
                tracing::warn!(value = %other, "unrecognized live_search value, using true");
                true
            }
        };

        Self {
            initial_query: SearchQuery::from_params(config),
            upstream,
            live_search,
            open_command: non_blank("open_command").unwrap_or_else(|| DEFAULT_OPEN_COMMAND.to_string()),
            theme_name: non_blank("theme"),
            theme_file: non_blank("theme_file").map(|f| infrastructure::expand_tilde(&f)),
            trace_level: non_blank("trace_level").unwrap_or_else(|| DEFAULT_TRACE_LEVEL.to_string()),
        }
    }
}

/// Builds the initial [`AppState`]: theme resolved, query seeded, nothing
/// fetched yet.
///
/// The first fetch is issued by the handler once the host grants
/// permissions.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(query = %config.initial_query.location(), "initializing reposcope plugin");

    if config.upstream.token.is_none() {
        tracing::warn!(
            env_var = infrastructure::TOKEN_ENV_VAR,
            "no GitHub token configured, sending unauthenticated requests"
        );
    }

    let theme = Theme::resolve(
        config.theme_name.as_deref(),
        config.theme_file.as_deref().map(Path::new),
    );

    let controller = QueryController::new(config.initial_query.clone(), config.upstream.clone());
    AppState::new(controller, theme, config.live_search)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_when_empty() {
        let config = Config::from_zellij_with_env(&BTreeMap::new(), no_env);

        assert_eq!(config.initial_query, SearchQuery::default());
        assert_eq!(config.upstream, UpstreamConfig::default());
        assert!(config.live_search);
        assert_eq!(config.open_command, "xdg-open");
        assert_eq!(config.trace_level, "info");
        assert!(config.theme_name.is_none());
        assert!(config.theme_file.is_none());
    }

    #[test]
    fn parses_query_params() {
        let config = Config::from_zellij_with_env(
            &map(&[("query", "tokio"), ("sort", "asc"), ("page", "3"), ("columns", "table")]),
            no_env,
        );

        assert_eq!(config.initial_query.text, "tokio");
        assert_eq!(config.initial_query.sort, Some(SortOrder::Asc));
        assert_eq!(config.initial_query.page, 3);
        assert_eq!(config.initial_query.view_mode, ViewMode::Table);
    }

    #[test]
    fn configured_token_wins_over_env() {
        let env = |_: &str| Some("from-env".to_string());

        let configured = Config::from_zellij_with_env(&map(&[("github_token", "from-config")]), env);
        assert_eq!(configured.upstream.token.as_deref(), Some("from-config"));

        let fallback = Config::from_zellij_with_env(&BTreeMap::new(), env);
        assert_eq!(fallback.upstream.token.as_deref(), Some("from-env"));
    }

    #[test]
    fn api_base_trailing_slash_is_trimmed() {
        let config = Config::from_zellij_with_env(&map(&[("api_base", "https://ghe.example.com/api/v3/")]), no_env);
        assert_eq!(config.upstream.api_base, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn live_search_can_be_disabled() {
        for value in ["false", "FALSE", "no", "0"] {
            let config = Config::from_zellij_with_env(&map(&[("live_search", value)]), no_env);
            assert!(!config.live_search, "{value}");
        }
        let config = Config::from_zellij_with_env(&map(&[("live_search", "maybe")]), no_env);
        assert!(config.live_search);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = Config::from_zellij_with_env(
            &map(&[("open_command", "  "), ("trace_level", ""), ("theme", " ")]),
            no_env,
        );
        assert_eq!(config.open_command, "xdg-open");
        assert_eq!(config.trace_level, "info");
        assert!(config.theme_name.is_none());
    }

    #[test]
    fn initialize_seeds_controller_without_fetching() {
        let config = Config::from_zellij_with_env(&map(&[("query", "zellij"), ("theme", "catppuccin-latte")]), no_env);
        let state = initialize(&config);

        assert_eq!(state.controller.query().text, "zellij");
        assert!(!state.controller.is_loading());
        assert_eq!(state.theme.name, "catppuccin-latte");
        assert_eq!(state.input_mode, InputMode::Normal);
    }
}
