//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the domain, GitHub and UI
//! layers. Data flows one way:
//!
//! ```text
//! Key / host event → Event → handle_event → state change → Actions → host calls
//!                                 ↑                                      ↓
//!                                 └──────── SearchResponse ──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects requested by the handler
//! - [`controller`]: search query, result page and fetch ordering
//! - [`handler`]: event processing
//! - [`modes`]: input mode
//! - [`state`]: interactive state and view model computation

pub mod actions;
pub mod controller;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use controller::QueryController;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, SortOrder, ViewMode};
pub use state::AppState;
