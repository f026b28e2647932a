//! GitHub repository search: request construction and response decoding.
//!
//! The HTTP transport itself belongs to the Zellij host. This module only
//! describes what to send and interprets what comes back.
//!
//! - [`request`]: URL, headers and echoed context for one search
//! - [`response`]: status and body classification

pub mod request;
pub mod response;

pub use request::{
    build_search_request, RequestContext, SearchRequest, UpstreamConfig, DEFAULT_API_BASE,
};
pub use response::{decode_search_response, FetchFailure, FetchOutcome};
