//! User interface rendering layer with component-based architecture.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render_frame → ANSI frame
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready frame description
//! - [`renderer`]: view selection and frame entry points
//! - [`components`]: per-region renderers and layout constants
//! - [`helpers`]: text measuring, truncation, number formatting, highlighting
//! - [`theme`]: color schemes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_to_string, select_view, ResultView};
pub use theme::Theme;
pub use viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, PageSlot, PaginationInfo, ResultBody,
    SearchBarInfo, ToolbarInfo, UIViewModel,
};
