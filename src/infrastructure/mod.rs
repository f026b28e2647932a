//! Infrastructure layer for filesystem and environment interactions.
//!
//! The plugin runs in Zellij's WASI sandbox: the host filesystem sits under
//! `/host`, and the process environment is whatever Zellij forwards.

pub mod env;
pub mod paths;

pub use env::{process_env, resolve_token, TOKEN_ENV_VAR};
pub use paths::{data_dir, expand_tilde, trace_file_path, TRACE_FILE_NAME};
