//! Environment lookups.

/// Environment variable consulted when no `github_token` is configured.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Picks the GitHub token: the configured value if non-blank, else the
/// value of [`TOKEN_ENV_VAR`] as returned by `lookup`.
///
/// `lookup` is injected so callers can pass `std::env::var` or a fixture.
///
/// ```
/// use reposcope::infrastructure::resolve_token;
///
/// let no_env = |_: &str| None;
/// assert_eq!(resolve_token(Some(" ghp_abc "), no_env), Some("ghp_abc".to_string()));
/// assert_eq!(resolve_token(Some(""), |_: &str| Some("ghp_env".to_string())), Some("ghp_env".to_string()));
/// assert_eq!(resolve_token(None, no_env), None);
/// ```
#[must_use]
pub fn resolve_token<F>(configured: Option<&str>, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    configured
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .or_else(|| lookup(TOKEN_ENV_VAR).map(|t| t.trim().to_string()))
        .filter(|t| !t.is_empty())
}

/// Reads the token variable from the process environment.
#[must_use]
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
