//! Search query model and parameter parsing.
//!
//! A [`SearchQuery`] is created once from the plugin configuration map (the
//! plugin's equivalent of a page URL), mutated in place by user interaction,
//! and rendered back into a parameter map for display as a shareable location.

use std::collections::BTreeMap;
use std::fmt;

/// Parameter key holding the raw query text.
pub const PARAM_QUERY: &str = "query";
/// Parameter key holding the sort order.
pub const PARAM_SORT: &str = "sort";
/// Parameter key holding the 1-based page number.
pub const PARAM_PAGE: &str = "page";
/// Parameter key holding the result layout.
pub const PARAM_COLUMNS: &str = "columns";

/// Sort order forwarded to the search API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortOrder {
    /// Parses `"asc"` or `"desc"`; anything else yields `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    /// Wire representation of the sort order.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Advances through unsorted, descending, ascending and back.
    #[must_use]
    pub const fn cycle(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(Self::Desc),
            Some(Self::Desc) => Some(Self::Asc),
            Some(Self::Asc) => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout used to present search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Cards laid out in as many columns as the pane allows.
    #[default]
    Grid,
    /// One row per repository.
    Table,
}

impl ViewMode {
    /// Parses `"grid"` or `"table"`; anything else yields `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "grid" => Some(Self::Grid),
            "table" => Some(Self::Table),
            _ => None,
        }
    }

    /// Wire representation of the layout.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Table => "table",
        }
    }

    /// Returns the other layout.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Grid => Self::Table,
            Self::Table => Self::Grid,
        }
    }
}

/// Canonical search state owned by the query controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Raw text as typed. Normalized only when a request is built.
    pub text: String,
    /// Optional sort order.
    pub sort: Option<SortOrder>,
    /// 1-based page number, never zero.
    pub page: u32,
    /// Result layout.
    pub view_mode: ViewMode,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            sort: None,
            page: 1,
            view_mode: ViewMode::Grid,
        }
    }
}

impl SearchQuery {
    /// Builds a query from a parameter map.
    ///
    /// Unknown `sort` and `columns` values are ignored. A missing, zero or
    /// non-numeric `page` falls back to 1.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use reposcope::domain::{SearchQuery, ViewMode};
    ///
    /// let mut params = BTreeMap::new();
    /// params.insert("query".to_string(), "  rust   tui ".to_string());
    /// params.insert("page".to_string(), "abc".to_string());
    /// params.insert("columns".to_string(), "table".to_string());
    ///
    /// let query = SearchQuery::from_params(&params);
    /// assert_eq!(query.normalized_text(), "rust tui");
    /// assert_eq!(query.page, 1);
    /// assert_eq!(query.view_mode, ViewMode::Table);
    /// ```
    #[must_use]
    pub fn from_params(params: &BTreeMap<String, String>) -> Self {
        Self {
            text: params.get(PARAM_QUERY).cloned().unwrap_or_default(),
            sort: params.get(PARAM_SORT).and_then(|s| SortOrder::parse(s)),
            page: parse_page(params.get(PARAM_PAGE).map(String::as_str)),
            view_mode: params
                .get(PARAM_COLUMNS)
                .and_then(|c| ViewMode::parse(c))
                .unwrap_or_default(),
        }
    }

    /// Renders the query back into a parameter map.
    ///
    /// Empty text and an absent sort are left out; `page` and `columns` are
    /// always present.
    #[must_use]
    pub fn to_params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        let text = self.normalized_text();
        if !text.is_empty() {
            params.insert(PARAM_QUERY.to_string(), text);
        }
        if let Some(sort) = self.sort {
            params.insert(PARAM_SORT.to_string(), sort.as_str().to_string());
        }
        params.insert(PARAM_PAGE.to_string(), self.page.to_string());
        params.insert(PARAM_COLUMNS.to_string(), self.view_mode.as_str().to_string());
        params
    }

    /// Formats the parameter map as a `?key=value&...` location string.
    #[must_use]
    pub fn location(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.to_params() {
            serializer.append_pair(&key, &value);
        }
        format!("?{}", serializer.finish())
    }

    /// Text with surrounding whitespace trimmed and inner runs collapsed.
    #[must_use]
    pub fn normalized_text(&self) -> String {
        normalize_query(&self.text)
    }

    /// Whether the normalized text is non-empty.
    #[must_use]
    pub fn has_text(&self) -> bool {
        self.text.split_whitespace().next().is_some()
    }
}

/// Trims the text and collapses every whitespace run to a single space.
///
/// ```
/// use reposcope::domain::normalize_query;
///
/// assert_eq!(normalize_query("\t hello \n  world  "), "hello world");
/// assert_eq!(normalize_query("   "), "");
/// ```
#[must_use]
pub fn normalize_query(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses a page parameter, defaulting to 1 for missing, zero or invalid input.
#[must_use]
pub fn parse_page(value: Option<&str>) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn missing_parameters_produce_defaults() {
        let query = SearchQuery::from_params(&BTreeMap::new());
        assert_eq!(query, SearchQuery::default());
        assert!(!query.has_text());
    }

    #[test]
    fn page_falls_back_to_one() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-3")), 1);
        assert_eq!(parse_page(Some("two")), 1);
        assert_eq!(parse_page(Some(" 7 ")), 7);
    }

    #[test]
    fn unknown_sort_and_columns_are_ignored() {
        let query = SearchQuery::from_params(&params(&[("sort", "stars"), ("columns", "list")]));
        assert_eq!(query.sort, None);
        assert_eq!(query.view_mode, ViewMode::Grid);
    }

    #[test]
    fn sort_cycles_through_all_states() {
        let first = SortOrder::cycle(None);
        let second = SortOrder::cycle(first);
        let third = SortOrder::cycle(second);
        assert_eq!(first, Some(SortOrder::Desc));
        assert_eq!(second, Some(SortOrder::Asc));
        assert_eq!(third, None);
    }

    #[test]
    fn location_reflects_current_state() {
        let query = SearchQuery {
            text: " zellij  plugin ".to_string(),
            sort: Some(SortOrder::Asc),
            page: 3,
            view_mode: ViewMode::Table,
        };
        assert_eq!(query.location(), "?columns=table&page=3&query=zellij+plugin&sort=asc");
    }

    #[test]
    fn whitespace_only_text_is_not_a_query() {
        let query = SearchQuery {
            text: " \t\n".to_string(),
            ..SearchQuery::default()
        };
        assert!(!query.has_text());
        assert_eq!(query.normalized_text(), "");
    }
}
