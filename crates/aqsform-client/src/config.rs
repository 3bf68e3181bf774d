//! Client configuration.

use std::time::Duration;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.aqsform.io/v1";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default lifetime of a cached form-list page.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Locale codes the forms service understands. When configured, every
/// request carries a `lang` query pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Locale {
    Rw,
    Fr,
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Rw => "rw",
            Locale::Fr => "fr",
            Locale::En => "en",
        }
    }
}

/// Configuration for [`FormsClient`].
///
/// [`FormsClient`]: crate::client::FormsClient
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub cache_ttl: Duration,
    pub locale: Option<Locale>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
            locale: None,
            user_agent: format!("aqsform-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
