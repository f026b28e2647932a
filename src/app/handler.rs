//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where user input and host responses
//! change [`AppState`]. It returns whether the frame must be redrawn and the
//! [`Action`]s the plugin shim should execute.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `NextPage`, `PrevPage`
//! - **Query**: `Char`, `Backspace`, `ClearQuery`, `Submit`, `CycleSort`, `Refresh`
//! - **Layout**: `ShowGrid`, `ShowTable`, `ToggleView`
//! - **Mode switching**: `SearchMode`, `ExitSearch`
//! - **Host**: `SearchResponse`, `PermissionsGranted`, `PermissionsDenied`
//!
//! # Example
//!
//! ```rust
//! use reposcope::app::{handle_event, Action, AppState, Event, QueryController};
//! use reposcope::domain::SearchQuery;
//! use reposcope::github::UpstreamConfig;
//! use reposcope::ui::Theme;
//!
//! let controller = QueryController::new(SearchQuery::default(), UpstreamConfig::default());
//! let mut state = AppState::new(controller, Theme::default(), true);
//!
//! handle_event(&mut state, &Event::SearchMode)?;
//! let (_, actions) = handle_event(&mut state, &Event::Char('r'))?;
//! assert!(matches!(actions.as_slice(), [Action::Fetch(_)]));
//! # Ok::<(), reposcope::ReposcopeError>(())
//! ```

use super::modes::InputMode;
use crate::app::{Action, AppState};
use crate::domain::{Result, SortOrder};
use crate::github::FetchOutcome;
use crate::observability::TraceContext;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Events triggered by user input or host responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves selection down by one (wraps to top).
    KeyDown,
    /// Moves selection up by one (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,
    /// Opens the selected repository in the configured opener.
    OpenSelected,

    /// Fetches the next page, if there is one.
    NextPage,
    /// Fetches the previous page, if there is one.
    PrevPage,
    /// Cycles sort order (best match, desc, asc) and refetches.
    CycleSort,
    /// Refetches the current query unchanged.
    Refresh,

    /// Shows results as cards. Never fetches.
    ShowGrid,
    /// Shows results as rows. Never fetches.
    ShowTable,
    /// Switches between grid and table. Never fetches.
    ToggleView,

    /// Gives the search box keyboard focus.
    SearchMode,
    /// Returns focus to the results, keeping the query text.
    ExitSearch,
    /// Appends a character to the query.
    Char(char),
    /// Removes the last character of the query.
    Backspace,
    /// Empties the query.
    ClearQuery,
    /// Fetches the query as typed and returns to normal mode.
    Submit,

    /// A search request completed.
    ///
    /// Status `0` means the host could not perform the request at all.
    SearchResponse {
        /// Sequence number echoed back from the request context.
        seq: u64,
        /// HTTP status.
        status: u16,
        /// Raw response body.
        body: Vec<u8>,
        /// Trace context echoed back from the request, if one was attached.
        trace: Option<TraceContext>,
    },

    /// Web access was granted; the initial query may now be fetched.
    PermissionsGranted,
    /// The user refused the requested permissions.
    PermissionsDenied,
}

/// Processes an event, mutates application state, and returns whether to
/// re-render along with the actions to execute.
///
/// # Errors
///
/// Returns an error if a search request cannot be built from the configured
/// API base. Upstream failures are not errors: they become empty results.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::OpenSelected => {
            let Some(repo) = state.selected_repository() else {
                tracing::debug!("no repository selected");
                return Ok((false, vec![]));
            };
            if repo.html_url.is_empty() {
                tracing::warn!(repository = %repo.display_name(), "selected repository has no html_url");
                return Ok((false, vec![]));
            }
            tracing::debug!(url = %repo.html_url, "opening repository");
            Ok((false, vec![Action::OpenUrl { url: repo.html_url.clone() }]))
        }
        Event::NextPage => {
            let current = state.controller.query().page;
            let total = state.controller.total_pages();
            if total == 0 || current >= total {
                tracing::debug!(page = current, total_pages = total, "already on last page");
                return Ok((false, vec![]));
            }
            state.controller.set_page(current + 1);
            refetch(state)
        }
        Event::PrevPage => {
            let current = state.controller.query().page;
            if current <= 1 {
                return Ok((false, vec![]));
            }
            state.controller.set_page(current - 1);
            refetch(state)
        }
        Event::CycleSort => {
            let next = SortOrder::cycle(state.controller.query().sort);
            state.controller.set_sort(next);
            tracing::debug!(sort = ?next, "sort order changed");
            refetch(state)
        }
        Event::Refresh => refetch(state),
        Event::ShowGrid => set_view_mode(state, crate::domain::ViewMode::Grid),
        Event::ShowTable => set_view_mode(state, crate::domain::ViewMode::Table),
        Event::ToggleView => {
            let toggled = state.controller.query().view_mode.toggled();
            set_view_mode(state, toggled)
        }
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.controller.query().text, "exiting search mode");
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            state.controller.query_text_mut().push(*c);
            tracing::trace!(query = %state.controller.query().text, char = %c, "search query updated");
            query_edited(state)
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            if state.controller.query_text_mut().pop().is_none() {
                return Ok((false, vec![]));
            }
            query_edited(state)
        }
        Event::ClearQuery => {
            if state.controller.query().text.is_empty() {
                return Ok((false, vec![]));
            }
            state.controller.set_query(String::new());
            query_edited(state)
        }
        Event::Submit => {
            state.input_mode = InputMode::Normal;
            state.controller.set_page(1);
            refetch(state)
        }
        Event::SearchResponse { seq, status, body, trace } => {
            let span = tracing::debug_span!("search_response", seq = seq, status = status);
            if let Some(parent) = trace.as_ref().and_then(TraceContext::to_context) {
                span.set_parent(parent);
            }
            let _span = span.entered();

            let outcome = FetchOutcome::from_response(*status, body);
            if state.controller.complete(*seq, outcome) {
                state.reset_selection();
                Ok((true, vec![]))
            } else {
                Ok((false, vec![]))
            }
        }
        Event::PermissionsGranted => {
            tracing::debug!(
                has_query = state.controller.query().has_text(),
                "permissions granted, issuing initial search"
            );
            refetch(state)
        }
        Event::PermissionsDenied => {
            tracing::warn!("web access denied, searches cannot be performed");
            Ok((false, vec![]))
        }
    }
}

/// Follow-up after the query text changed: back to page 1, and a fetch when
/// live search is on.
fn query_edited(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    state.controller.set_page(1);
    if state.live_search {
        refetch(state)
    } else {
        Ok((true, vec![]))
    }
}

/// Issues a fetch for the current query. An empty query clears the results
/// instead.
fn refetch(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    state.reset_selection();
    let actions = state.controller.refetch()?.map(Action::Fetch).into_iter().collect();
    Ok((true, actions))
}

/// Layout changes only affect rendering of the page already held.
fn set_view_mode(state: &mut AppState, view_mode: crate::domain::ViewMode) -> Result<(bool, Vec<Action>)> {
    if state.controller.query().view_mode == view_mode {
        return Ok((false, vec![]));
    }
    tracing::debug!(view_mode = view_mode.as_str(), "view mode changed");
    state.controller.set_view_mode(view_mode);
    Ok((true, vec![]))
}

/// Span label without the payload, so response bodies stay out of traces.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::CloseFocus => "CloseFocus",
        Event::OpenSelected => "OpenSelected",
        Event::NextPage => "NextPage",
        Event::PrevPage => "PrevPage",
        Event::CycleSort => "CycleSort",
        Event::Refresh => "Refresh",
        Event::ShowGrid => "ShowGrid",
        Event::ShowTable => "ShowTable",
        Event::ToggleView => "ToggleView",
        Event::SearchMode => "SearchMode",
        Event::ExitSearch => "ExitSearch",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::ClearQuery => "ClearQuery",
        Event::Submit => "Submit",
        Event::SearchResponse { .. } => "SearchResponse",
        Event::PermissionsGranted => "PermissionsGranted",
        Event::PermissionsDenied => "PermissionsDenied",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::QueryController;
    use crate::domain::{SearchQuery, ViewMode};
    use crate::github::{SearchRequest, UpstreamConfig};
    use crate::ui::Theme;

    fn state(text: &str) -> AppState {
        let query = SearchQuery {
            text: text.to_string(),
            ..SearchQuery::default()
        };
        AppState::new(
            QueryController::new(query, UpstreamConfig::default()),
            Theme::default(),
            true,
        )
    }

    fn fetched(actions: &[Action]) -> &SearchRequest {
        match actions {
            [Action::Fetch(request)] => request,
            other => panic!("expected one fetch, got {other:?}"),
        }
    }

    fn respond(state: &mut AppState, request: &SearchRequest, body: &str) -> bool {
        let event = Event::SearchResponse {
            seq: request.context.seq,
            status: 200,
            body: body.as_bytes().to_vec(),
            trace: None,
        };
        handle_event(state, &event).unwrap().0
    }

    fn page_body(total_count: u64, names: &[&str]) -> String {
        let items: Vec<String> = names
            .iter()
            .map(|n| format!(r#"{{"full_name": "{n}", "html_url": "https://github.com/{n}"}}"#))
            .collect();
        format!(r#"{{"total_count": {total_count}, "items": [{}]}}"#, items.join(","))
    }

    #[test]
    fn initial_fetch_waits_for_permission() {
        let mut s = state("rust");
        let (_, actions) = handle_event(&mut s, &Event::PermissionsGranted).unwrap();
        let request = fetched(&actions);
        assert!(request.url.contains("q=rust"));
        assert!(s.controller.is_loading());
    }

    #[test]
    fn empty_initial_query_fetches_nothing() {
        let mut s = state("");
        let (_, actions) = handle_event(&mut s, &Event::PermissionsGranted).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn typing_outside_search_mode_is_ignored() {
        let mut s = state("");
        assert_eq!(handle_event(&mut s, &Event::Char('x')).unwrap(), (false, vec![]));
        assert_eq!(s.controller.query().text, "");
    }

    #[test]
    fn live_search_fetches_each_edit_and_resets_page() {
        let mut s = state("rus");
        s.controller.set_page(4);
        handle_event(&mut s, &Event::SearchMode).unwrap();

        let (_, actions) = handle_event(&mut s, &Event::Char('t')).unwrap();
        let request = fetched(&actions);
        assert!(request.url.ends_with("q=rust&page=1"));
        assert_eq!(s.controller.query().page, 1);
    }

    #[test]
    fn without_live_search_only_submit_fetches() {
        let mut s = state("");
        s.live_search = false;
        handle_event(&mut s, &Event::SearchMode).unwrap();
        for c in "tokio".chars() {
            let (_, actions) = handle_event(&mut s, &Event::Char(c)).unwrap();
            assert!(actions.is_empty());
        }
        let (_, actions) = handle_event(&mut s, &Event::Submit).unwrap();
        assert!(fetched(&actions).url.contains("q=tokio"));
        assert_eq!(s.input_mode, InputMode::Normal);
    }

    #[test]
    fn clearing_the_query_clears_results() {
        let mut s = state("rust");
        let (_, actions) = handle_event(&mut s, &Event::Refresh).unwrap();
        respond(&mut s, fetched(&actions), &page_body(1, &["a/b"]));

        let (_, actions) = handle_event(&mut s, &Event::ClearQuery).unwrap();
        assert!(actions.is_empty());
        assert!(s.controller.result().is_empty());
    }

    #[test]
    fn view_toggles_never_fetch() {
        let mut s = state("rust");
        let (_, actions) = handle_event(&mut s, &Event::Refresh).unwrap();
        respond(&mut s, fetched(&actions), &page_body(2, &["a/x", "a/y"]));

        for event in [Event::ToggleView, Event::ShowGrid, Event::ShowTable, Event::ToggleView] {
            let (_, actions) = handle_event(&mut s, &event).unwrap();
            assert!(actions.is_empty(), "{event:?} issued {actions:?}");
        }
        assert_eq!(s.controller.query().view_mode, ViewMode::Grid);
        assert!(!s.controller.is_loading());
    }

    #[test]
    fn paging_stays_within_bounds() {
        let mut s = state("rust");
        let (_, actions) = handle_event(&mut s, &Event::Refresh).unwrap();
        respond(&mut s, fetched(&actions), &page_body(150, &["a/b"]));
        assert_eq!(s.controller.total_pages(), 2);

        assert_eq!(handle_event(&mut s, &Event::PrevPage).unwrap(), (false, vec![]));

        let (_, actions) = handle_event(&mut s, &Event::NextPage).unwrap();
        let request = fetched(&actions).clone();
        assert!(request.url.ends_with("page=2"));
        respond(&mut s, &request, &page_body(150, &["c/d"]));

        assert_eq!(handle_event(&mut s, &Event::NextPage).unwrap(), (false, vec![]));
        assert_eq!(s.controller.query().page, 2);
    }

    #[test]
    fn stale_response_does_not_render() {
        let mut s = state("ru");
        let (_, first) = handle_event(&mut s, &Event::Refresh).unwrap();
        let first = fetched(&first).clone();
        s.controller.set_query("rust");
        let (_, second) = handle_event(&mut s, &Event::Refresh).unwrap();
        let second = fetched(&second).clone();

        assert!(respond(&mut s, &second, &page_body(1, &["new/one"])));
        assert!(!respond(&mut s, &first, &page_body(1, &["old/one"])));
        assert_eq!(s.controller.result().items[0].full_name, "new/one");
    }

    #[test]
    fn failed_response_renders_empty() {
        let mut s = state("rust");
        let (_, actions) = handle_event(&mut s, &Event::Refresh).unwrap();
        let request = fetched(&actions);
        let event = Event::SearchResponse {
            seq: request.context.seq,
            status: 403,
            body: br#"{"message": "API rate limit exceeded"}"#.to_vec(),
            trace: None,
        };
        assert!(handle_event(&mut s, &event).unwrap().0);
        assert!(s.controller.result().is_empty());
        assert!(!s.controller.is_loading());
    }

    #[test]
    fn sort_cycles_and_refetches() {
        let mut s = state("rust");
        let (_, actions) = handle_event(&mut s, &Event::CycleSort).unwrap();
        assert!(fetched(&actions).url.contains("sort=desc"));
        let (_, actions) = handle_event(&mut s, &Event::CycleSort).unwrap();
        assert!(fetched(&actions).url.contains("sort=asc"));
        let (_, actions) = handle_event(&mut s, &Event::CycleSort).unwrap();
        assert!(!fetched(&actions).url.contains("sort="));
    }

    #[test]
    fn open_selected_emits_url() {
        let mut s = state("rust");
        let (_, actions) = handle_event(&mut s, &Event::Refresh).unwrap();
        respond(&mut s, fetched(&actions), &page_body(2, &["a/x", "a/y"]));

        handle_event(&mut s, &Event::KeyDown).unwrap();
        let (_, actions) = handle_event(&mut s, &Event::OpenSelected).unwrap();
        assert_eq!(
            actions,
            vec![Action::OpenUrl {
                url: "https://github.com/a/y".to_string()
            }]
        );
    }

    #[test]
    fn exit_search_keeps_text() {
        let mut s = state("");
        handle_event(&mut s, &Event::SearchMode).unwrap();
        handle_event(&mut s, &Event::Char('a')).unwrap();
        handle_event(&mut s, &Event::ExitSearch).unwrap();
        assert_eq!(s.input_mode, InputMode::Normal);
        assert_eq!(s.controller.query().text, "a");
    }
}
