//! Repository summaries and search results.
//!
//! These types mirror the subset of GitHub's `/search/repositories` payload
//! that the plugin displays. Every field is lenient: a missing value falls
//! back to its default rather than rejecting the whole response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of results GitHub is assumed to return per page.
pub const PAGE_SIZE: u64 = 100;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Number of days in one (approximate) month.
const DAYS_PER_MONTH: i64 = 30;

/// Number of days in one (approximate) year.
const DAYS_PER_YEAR: i64 = 365;

/// Repository owner as returned by the search API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub login: String,
}

/// A single repository from a search response.
///
/// Passed through to the renderer unchanged; the plugin never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub owner: Owner,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RepositorySummary {
    /// Name shown in lists: `owner/name`, rebuilt if `full_name` is absent.
    #[must_use]
    pub fn display_name(&self) -> String {
        if !self.full_name.is_empty() {
            return self.full_name.clone();
        }
        if self.owner.login.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.owner.login, self.name)
        }
    }

    /// Human-readable age of the last update relative to `now`.
    ///
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - Less than 30 days: "Xd ago"
    /// - Less than a year: "Xmo ago"
    /// - Otherwise: "Xy ago"
    ///
    /// Returns `"-"` if the repository carries no timestamp.
    #[must_use]
    pub fn updated_ago(&self, now: DateTime<Utc>) -> String {
        let Some(updated_at) = self.updated_at else {
            return "-".to_string();
        };

        let diff = (now - updated_at).num_seconds().max(0);

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("{}m ago", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("{}h ago", diff / SECONDS_PER_HOUR)
        } else {
            let days = diff / SECONDS_PER_DAY;
            if days < DAYS_PER_MONTH {
                format!("{days}d ago")
            } else if days < DAYS_PER_YEAR {
                format!("{}mo ago", days / DAYS_PER_MONTH)
            } else {
                format!("{}y ago", days / DAYS_PER_YEAR)
            }
        }
    }
}

/// One page of search results, replaced wholesale on every accepted fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub items: Vec<RepositorySummary>,
    pub total_count: u64,
}

impl SearchResult {
    /// Result with no items and a zero total.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the page holds no repositories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of pages: `ceil(total_count / PAGE_SIZE)`.
    ///
    /// ```
    /// use reposcope::domain::SearchResult;
    ///
    /// let result = SearchResult { items: vec![], total_count: 201 };
    /// assert_eq!(result.total_pages(), 3);
    /// ```
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        let pages = self.total_count / PAGE_SIZE + u64::from(self.total_count % PAGE_SIZE != 0);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}
