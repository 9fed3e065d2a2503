//! Configuration options for the Bookline client

use crate::i18n::Locale;

/// Production API endpoint, used when nothing else is configured
pub const DEFAULT_API_URL: &str = "https://api.bookline.app";

/// Environment variable consulted when no explicit base URL is given
pub const API_URL_ENV: &str = "BOOKLINE_API_URL";

/// Resolve the backend base URL.
///
/// Priority order: an explicit override from the host application, then the
/// `BOOKLINE_API_URL` environment variable, then the hardcoded production
/// fallback. A trailing slash is stripped so paths can be joined verbatim.
pub fn resolve_base_url(override_url: Option<&str>) -> String {
    if let Some(url) = override_url {
        return url.trim_end_matches('/').to_string();
    }

    if let Ok(url) = std::env::var(API_URL_ENV) {
        if !url.trim().is_empty() {
            return url.trim_end_matches('/').to_string();
        }
    }

    DEFAULT_API_URL.to_string()
}

/// Configuration options for the Bookline client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Whether sessions are written to the storage backend
    pub persist_session: bool,

    /// Locale used for schedule labels when the caller gives none
    pub default_locale: Locale,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            persist_session: true,
            default_locale: Locale::En,
        }
    }
}

impl ClientOptions {
    /// Set whether to persist the session
    pub fn with_persist_session(mut self, value: bool) -> Self {
        self.persist_session = value;
        self
    }

    /// Set the default locale
    pub fn with_default_locale(mut self, value: Locale) -> Self {
        self.default_locale = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_priority_chain() {
        // explicit override wins over everything, trailing slash stripped
        assert_eq!(
            resolve_base_url(Some("http://localhost:4000/")),
            "http://localhost:4000"
        );

        // env var beats the fallback
        std::env::set_var(API_URL_ENV, "https://staging.bookline.app");
        assert_eq!(resolve_base_url(None), "https://staging.bookline.app");
        assert_eq!(
            resolve_base_url(Some("http://localhost:4000")),
            "http://localhost:4000"
        );

        // blank env var is ignored
        std::env::set_var(API_URL_ENV, "");
        assert_eq!(resolve_base_url(None), DEFAULT_API_URL);

        std::env::remove_var(API_URL_ENV);
        assert_eq!(resolve_base_url(None), DEFAULT_API_URL);
    }
}
