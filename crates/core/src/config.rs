use std::time::Duration;

pub const WEBHOOK_URL_VAR: &str = "SETTLE_WEBHOOK_URL";
pub const LEGACY_WEBHOOK_URL_VAR: &str = "MAKE_WEBHOOK_URL";

pub const DEFAULT_API_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_SOURCE_TAG: &str = "notion-embed";

#[derive(Debug, Clone)]
pub struct Settings {
    pub webhook_url: Option<String>,
    pub api_bind: String,
    pub settle_env: String,
    pub enrich: bool,
    pub source_tag: String,
    pub webhook_timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            webhook_url: None,
            api_bind: DEFAULT_API_BIND.to_string(),
            settle_env: "development".to_string(),
            enrich: true,
            source_tag: DEFAULT_SOURCE_TAG.to_string(),
            webhook_timeout: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup. Missing or unparsable
    /// values fall back to their defaults; an empty webhook URL counts as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let webhook_url = non_empty(WEBHOOK_URL_VAR).or_else(|| non_empty(LEGACY_WEBHOOK_URL_VAR));
        let api_bind = lookup("SETTLE_API_BIND").unwrap_or(defaults.api_bind);
        let settle_env = lookup("SETTLE_ENV").unwrap_or(defaults.settle_env);
        let enrich = lookup("SETTLE_ENRICH")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.enrich);
        let source_tag = lookup("SETTLE_SOURCE_TAG")
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.source_tag);
        let webhook_timeout = lookup("SETTLE_WEBHOOK_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self {
            webhook_url,
            api_bind,
            settle_env,
            enrich,
            source_tag,
            webhook_timeout,
        }
    }

    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}
