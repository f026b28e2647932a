//! Construction of repository search requests.
//!
//! A [`SearchRequest`] is a plain description of one HTTP GET: the plugin
//! shim hands it to the host's `web_request` call. The [`RequestContext`]
//! rides along in the host's context map and comes back untouched with the
//! response, which is how responses are matched to the request that issued
//! them.

use crate::domain::{Result, SearchQuery};
use crate::observability::TraceContext;
use std::collections::BTreeMap;
use url::Url;

/// Default GitHub REST API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Path of the repository search endpoint.
const SEARCH_PATH: &str = "search/repositories";

/// Media type requested from the API.
const ACCEPT_HEADER: &str = "application/vnd.github+json";

/// User agent sent with every request; GitHub rejects requests without one.
const USER_AGENT: &str = "reposcope";

/// Context map key carrying the request sequence number.
const CONTEXT_SEQ: &str = "reposcope.seq";
/// Context map key carrying the issuing trace ID.
const CONTEXT_TRACE_ID: &str = "reposcope.trace_id";
/// Context map key carrying the issuing span ID.
const CONTEXT_SPAN_ID: &str = "reposcope.span_id";

/// Where and how to reach the search API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// API base URL, without a trailing `/search/...` path.
    pub api_base: String,
    /// Personal access token, if configured.
    pub token: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token: None,
        }
    }
}

/// Metadata echoed back by the host with the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Monotonically increasing sequence number of the fetch.
    pub seq: u64,
    /// Trace context of the span that issued the fetch.
    pub trace: Option<TraceContext>,
}

impl RequestContext {
    /// Creates a context for `seq`, capturing the active trace if any.
    #[must_use]
    pub fn new(seq: u64) -> Self {
        Self {
            seq,
            trace: TraceContext::from_current(),
        }
    }

    /// Serializes into the string map the host carries.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(CONTEXT_SEQ.to_string(), self.seq.to_string());
        if let Some(trace) = &self.trace {
            map.insert(CONTEXT_TRACE_ID.to_string(), trace.trace_id.clone());
            map.insert(CONTEXT_SPAN_ID.to_string(), trace.parent_span_id.clone());
        }
        map
    }

    /// Restores a context from the host's map.
    ///
    /// Returns `None` when the map does not belong to a search request, for
    /// example a response to some other plugin-issued request.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Option<Self> {
        let seq = map.get(CONTEXT_SEQ)?.parse::<u64>().ok()?;
        let trace = match (map.get(CONTEXT_TRACE_ID), map.get(CONTEXT_SPAN_ID)) {
            (Some(trace_id), Some(span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: span_id.clone(),
            }),
            _ => None,
        };
        Some(Self { seq, trace })
    }
}

/// A fully described search request ready to hand to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Absolute URL including the encoded query string.
    pub url: String,
    /// Request headers.
    pub headers: BTreeMap<String, String>,
    /// Context echoed back with the response.
    pub context: RequestContext,
}

/// Builds the search request for `query`.
///
/// The text is normalized before encoding; `sort` is only sent when set and
/// `page` is always sent and at least 1.
///
/// # Errors
///
/// Returns [`ReposcopeError::Request`](crate::ReposcopeError::Request) if the
/// configured API base is not a valid URL.
///
/// # Example
///
/// ```
/// use reposcope::domain::SearchQuery;
/// use reposcope::github::{build_search_request, UpstreamConfig};
///
/// let query = SearchQuery { text: " rust  tui ".into(), ..SearchQuery::default() };
/// let request = build_search_request(&UpstreamConfig::default(), &query, 1)?;
/// assert_eq!(
///     request.url,
///     "https://api.github.com/search/repositories?q=rust+tui&page=1"
/// );
/// # Ok::<(), reposcope::ReposcopeError>(())
/// ```
pub fn build_search_request(
    upstream: &UpstreamConfig,
    query: &SearchQuery,
    seq: u64,
) -> Result<SearchRequest> {
    let base = format!("{}/", upstream.api_base.trim_end_matches('/'));
    let mut url = Url::parse(&base)?.join(SEARCH_PATH)?;

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("q", &query.normalized_text());
        if let Some(sort) = query.sort {
            pairs.append_pair("sort", sort.as_str());
        }
        pairs.append_pair("page", &query.page.max(1).to_string());
    }

    let mut headers = BTreeMap::new();
    headers.insert("Accept".to_string(), ACCEPT_HEADER.to_string());
    headers.insert("User-Agent".to_string(), USER_AGENT.to_string());
    if let Some(token) = upstream.token.as_deref().filter(|t| !t.is_empty()) {
        headers.insert("Authorization".to_string(), format!("token {token}"));
    }

    Ok(SearchRequest {
        url: url.to_string(),
        headers,
        context: RequestContext::new(seq),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SortOrder, ViewMode};

    fn query(text: &str) -> SearchQuery {
        SearchQuery {
            text: text.to_string(),
            ..SearchQuery::default()
        }
    }

    #[test]
    fn text_is_normalized_before_encoding() {
        let request = build_search_request(&UpstreamConfig::default(), &query("\n  foo \t  bar  "), 1).unwrap();
        let url = Url::parse(&request.url).unwrap();
        let q: Vec<_> = url.query_pairs().filter(|(k, _)| k == "q").map(|(_, v)| v.into_owned()).collect();
        assert_eq!(q, vec!["foo bar".to_string()]);
    }

    #[test]
    fn sort_and_page_are_appended() {
        let search = SearchQuery {
            text: "language:rust".to_string(),
            sort: Some(SortOrder::Desc),
            page: 4,
            view_mode: ViewMode::Table,
        };
        let request = build_search_request(&UpstreamConfig::default(), &search, 9).unwrap();
        assert_eq!(
            request.url,
            "https://api.github.com/search/repositories?q=language%3Arust&sort=desc&page=4"
        );
        assert_eq!(request.context.seq, 9);
    }

    #[test]
    fn page_zero_is_sent_as_one() {
        let search = SearchQuery { page: 0, ..query("x") };
        let request = build_search_request(&UpstreamConfig::default(), &search, 1).unwrap();
        assert!(request.url.ends_with("&page=1"));
    }

    #[test]
    fn token_adds_authorization_header() {
        let upstream = UpstreamConfig {
            token: Some("ghp_secret".to_string()),
            ..UpstreamConfig::default()
        };
        let request = build_search_request(&upstream, &query("x"), 1).unwrap();
        assert_eq!(request.headers.get("Authorization").map(String::as_str), Some("token ghp_secret"));
        assert_eq!(
            request.headers.get("Accept").map(String::as_str),
            Some("application/vnd.github+json")
        );
    }

    #[test]
    fn missing_token_omits_authorization_header() {
        let request = build_search_request(&UpstreamConfig::default(), &query("x"), 1).unwrap();
        assert!(!request.headers.contains_key("Authorization"));
    }

    #[test]
    fn custom_base_with_path_is_respected() {
        let upstream = UpstreamConfig {
            api_base: "https://ghe.example.com/api/v3/".to_string(),
            token: None,
        };
        let request = build_search_request(&upstream, &query("x"), 1).unwrap();
        assert!(request.url.starts_with("https://ghe.example.com/api/v3/search/repositories?"));
    }

    #[test]
    fn invalid_base_is_an_error() {
        let upstream = UpstreamConfig {
            api_base: "not a url".to_string(),
            token: None,
        };
        assert!(build_search_request(&upstream, &query("x"), 1).is_err());
    }

    #[test]
    fn context_map_round_trips_sequence() {
        let context = RequestContext {
            seq: 42,
            trace: Some(TraceContext {
                trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
                parent_span_id: "00f067aa0ba902b7".to_string(),
            }),
        };
        assert_eq!(RequestContext::from_map(&context.to_map()), Some(context));
    }

    #[test]
    fn foreign_context_map_is_ignored() {
        let mut map = BTreeMap::new();
        map.insert("other".to_string(), "1".to_string());
        assert_eq!(RequestContext::from_map(&map), None);
    }
}
