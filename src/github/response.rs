//! Decoding of repository search responses.
//!
//! The host reports every completed request as `(status, body)`. Three kinds
//! of failure are distinguished here for logging purposes, but all of them
//! reduce to an empty [`SearchResult`] before reaching the renderer.

use crate::domain::{ReposcopeError, Result, SearchResult};
use serde::Deserialize;

/// Status codes at or above this value are not successes.
const FIRST_NON_SUCCESS_STATUS: u16 = 300;

/// Why a fetch produced no usable result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The host could not complete the request.
    Transport(String),
    /// The API answered with a non-2xx status.
    Status(u16),
    /// The body was not a search result object.
    Malformed(String),
}

/// Outcome of a completed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A well-formed result page, possibly with zero items.
    Results(SearchResult),
    /// The fetch failed; rendered exactly like zero results.
    Failed(FetchFailure),
}

impl FetchOutcome {
    /// Classifies a raw host response.
    ///
    /// Status `0` carries no HTTP meaning and is treated as a transport
    /// failure, with the body holding the host's error text.
    #[must_use]
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        match decode_search_response(status, body) {
            Ok(result) => Self::Results(result),
            Err(ReposcopeError::Transport(message)) => Self::Failed(FetchFailure::Transport(message)),
            Err(ReposcopeError::UpstreamStatus(code)) => Self::Failed(FetchFailure::Status(code)),
            Err(e) => Self::Failed(FetchFailure::Malformed(e.to_string())),
        }
    }

    /// Collapses the outcome into the result page shown to the user.
    #[must_use]
    pub fn into_result(self) -> SearchResult {
        match self {
            Self::Results(result) => result,
            Self::Failed(_) => SearchResult::empty(),
        }
    }
}

/// Wire shape of the search response. Both fields are required: anything
/// else is treated as malformed.
#[derive(Debug, Deserialize)]
struct SearchResponseBody {
    items: Vec<crate::domain::RepositorySummary>,
    total_count: u64,
}

/// Decodes a search response body.
///
/// # Errors
///
/// - [`ReposcopeError::Transport`] for status `0`, carrying the host's error
///   text from the body
/// - [`ReposcopeError::UpstreamStatus`] for any other status outside `200..300`
/// - [`ReposcopeError::MalformedResponse`] if the body is not a JSON object
///   with an `items` array and a numeric `total_count`
pub fn decode_search_response(status: u16, body: &[u8]) -> Result<SearchResult> {
    if status == 0 {
        return Err(ReposcopeError::Transport(String::from_utf8_lossy(body).into_owned()));
    }
    if !(200..FIRST_NON_SUCCESS_STATUS).contains(&status) {
        return Err(ReposcopeError::UpstreamStatus(status));
    }

    let decoded: SearchResponseBody = serde_json::from_slice(body)?;
    Ok(SearchResult {
        items: decoded.items,
        total_count: decoded.total_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ITEMS: &str = r#"{
        "total_count": 2,
        "incomplete_results": false,
        "items": [
            {
                "id": 1,
                "name": "x",
                "full_name": "octo/x",
                "owner": { "login": "octo" },
                "html_url": "https://github.com/octo/x",
                "description": "first",
                "language": "Rust",
                "stargazers_count": 10,
                "forks_count": 2,
                "updated_at": "2024-01-02T03:04:05Z"
            },
            { "id": 2, "name": "y", "full_name": "octo/y" }
        ]
    }"#;

    #[test]
    fn decodes_items_in_response_order() {
        let result = decode_search_response(200, TWO_ITEMS.as_bytes()).unwrap();
        assert_eq!(result.total_count, 2);
        let names: Vec<_> = result.items.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, ["octo/x", "octo/y"]);
        assert_eq!(result.items[0].language.as_deref(), Some("Rust"));
        assert!(result.items[1].updated_at.is_none());
    }

    #[test]
    fn empty_page_is_a_result_not_a_failure() {
        let outcome = FetchOutcome::from_response(200, br#"{"items": [], "total_count": 0}"#);
        assert_eq!(outcome, FetchOutcome::Results(SearchResult::empty()));
    }

    #[test]
    fn non_success_status_is_classified() {
        let outcome = FetchOutcome::from_response(401, br#"{"message": "Bad credentials"}"#);
        assert_eq!(outcome, FetchOutcome::Failed(FetchFailure::Status(401)));
        assert_eq!(outcome.into_result(), SearchResult::empty());
    }

    #[test]
    fn status_zero_is_a_transport_failure() {
        let outcome = FetchOutcome::from_response(0, b"connection refused");
        assert_eq!(
            outcome,
            FetchOutcome::Failed(FetchFailure::Transport("connection refused".to_string()))
        );
    }

    #[test]
    fn decode_reports_status_zero_as_transport_error() {
        let err = decode_search_response(0, b"dns failure").unwrap_err();
        assert!(matches!(err, ReposcopeError::Transport(ref m) if m == "dns failure"));
        assert!(matches!(
            decode_search_response(503, b""),
            Err(ReposcopeError::UpstreamStatus(503))
        ));
    }

    #[test]
    fn unexpected_shapes_collapse_to_empty() {
        let bodies: [&[u8]; 4] = [
            b"not json",
            br#"{"message": "Validation Failed"}"#,
            br#"{"items": {}, "total_count": 3}"#,
            b"[]",
        ];
        for body in bodies {
            let outcome = FetchOutcome::from_response(200, body);
            assert!(matches!(outcome, FetchOutcome::Failed(FetchFailure::Malformed(_))));
            assert_eq!(outcome.into_result(), SearchResult::empty());
        }
    }
}
