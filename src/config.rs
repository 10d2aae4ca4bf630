//! Configuration types.

use std::collections::HashMap;
use std::time::Duration;

use secrecy::SecretString;

/// Wizard configuration.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Sliding session lifetime — every accepted or rejected turn extends it.
    pub session_ttl: Duration,
    /// Total profile save attempts (first try included).
    pub save_max_attempts: u32,
    /// Base delay for the save backoff schedule.
    pub save_base_delay: Duration,
    /// Hard per-attempt timeout for profile store requests.
    pub save_request_timeout: Duration,
    /// Community path URL lookup.
    pub paths: PathLinks,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::from_secs(3600), // 1 hour
            save_max_attempts: 3,
            save_base_delay: Duration::from_millis(500),
            save_request_timeout: Duration::from_secs(10),
            paths: PathLinks::default(),
        }
    }
}

impl WizardConfig {
    /// Build a config from `WAYFINDER_*` environment variables, falling back
    /// to defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            session_ttl: env_secs("WAYFINDER_SESSION_TTL_SECS", defaults.session_ttl),
            save_max_attempts: std::env::var("WAYFINDER_SAVE_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.save_max_attempts),
            save_base_delay: defaults.save_base_delay,
            save_request_timeout: env_secs(
                "WAYFINDER_SAVE_TIMEOUT_SECS",
                defaults.save_request_timeout,
            ),
            paths: PathLinks::from_env(),
        }
    }
}

fn env_secs(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

/// Connection settings for the durable profile store.
#[derive(Debug, Clone)]
pub struct ProfileApiConfig {
    /// Endpoint the flattened profile record is POSTed to.
    pub endpoint: String,
    /// Service API key, sent as a bearer token. Never logged.
    pub api_key: SecretString,
}

/// Maps a community path name to its landing URL.
///
/// Unconfigured paths resolve to a deterministic URL derived from the base,
/// so path determination never fails on a missing entry.
#[derive(Debug, Clone)]
pub struct PathLinks {
    base_url: String,
    overrides: HashMap<String, String>,
}

impl Default for PathLinks {
    fn default() -> Self {
        Self {
            base_url: "https://community.andromedaprotocol.io".to_string(),
            overrides: HashMap::new(),
        }
    }
}

impl PathLinks {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            overrides: HashMap::new(),
        }
    }

    /// Read the base URL and any `WAYFINDER_PATH_URL_<NAME>` overrides.
    pub fn from_env() -> Self {
        let mut links = match std::env::var("WAYFINDER_COMMUNITY_BASE_URL") {
            Ok(base) if !base.trim().is_empty() => Self::new(base.trim().trim_end_matches('/')),
            _ => Self::default(),
        };
        for name in [
            "Contractor",
            "Hacker",
            "Visionary",
            "AI Initiatives",
            "Ambassador",
            "Explorer",
        ] {
            let key = format!(
                "WAYFINDER_PATH_URL_{}",
                name.to_uppercase().replace([' ', '/'], "_")
            );
            if let Ok(url) = std::env::var(&key) {
                if !url.trim().is_empty() {
                    links.set_url(name, url.trim());
                }
            }
        }
        links
    }

    /// Override the URL for a single path name.
    pub fn set_url(&mut self, path_name: &str, url: impl Into<String>) {
        self.overrides.insert(path_name.to_string(), url.into());
    }

    /// Resolve a path name to its URL.
    pub fn url_for(&self, path_name: &str) -> String {
        if let Some(url) = self.overrides.get(path_name) {
            return url.clone();
        }
        let slug: String = path_name
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect();
        format!("{}/paths/{}", self.base_url, slug.trim_matches('-'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_for_uses_override() {
        let mut links = PathLinks::new("https://example.org");
        links.set_url("Explorer", "https://example.org/welcome/explorer");
        assert_eq!(links.url_for("Explorer"), "https://example.org/welcome/explorer");
    }

    #[test]
    fn url_for_falls_back_to_derived_slug() {
        let links = PathLinks::new("https://example.org");
        assert_eq!(links.url_for("Explorer"), "https://example.org/paths/explorer");
        assert_eq!(
            links.url_for("AI Initiatives"),
            "https://example.org/paths/ai-initiatives"
        );
    }

    #[test]
    fn default_config_values() {
        let config = WizardConfig::default();
        assert_eq!(config.session_ttl, Duration::from_secs(3600));
        assert_eq!(config.save_max_attempts, 3);
        assert_eq!(config.save_request_timeout, Duration::from_secs(10));
    }
}
