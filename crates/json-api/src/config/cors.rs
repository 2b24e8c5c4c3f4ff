//! Cross-origin settings for browser clients.

use clap::Args;

/// Origin wildcard accepted in `CORS_ALLOWED_ORIGINS`.
pub const ANY_ORIGIN: &str = "*";

#[derive(Debug, Args)]
pub struct CorsConfig {
    /// Comma-separated origins allowed to call the API, or `*`
    #[arg(
        long,
        env = "CORS_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = ANY_ORIGIN
    )]
    pub cors_allowed_origins: Vec<String>,
}

impl CorsConfig {
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins
            .iter()
            .any(|origin| origin.trim() == ANY_ORIGIN)
    }

    /// Configured origins with blanks removed.
    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.cors_allowed_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
    }
}
