//! Domain layer for the Reposcope plugin.
//!
//! Core types independent of Zellij APIs: the search query, the repository
//! summaries returned by GitHub, and the crate's error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`query`]: Search query state and parameter parsing
//! - [`repository`]: Repository summaries and search result pages

pub mod error;
pub mod query;
pub mod repository;

pub use error::{ReposcopeError, Result};
pub use query::{normalize_query, parse_page, SearchQuery, SortOrder, ViewMode};
pub use repository::{Owner, RepositorySummary, SearchResult, PAGE_SIZE};
