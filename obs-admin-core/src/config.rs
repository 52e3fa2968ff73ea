use log::warn;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8878/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const PAGE_SIZES: [usize; 5] = [5, 10, 20, 40, 100];
pub const DEFAULT_PAGE_SIZE: usize = 5;

const BASE_URL_ENV: &str = "OBS_API_BASE_URL";
const TIMEOUT_ENV: &str = "OBS_API_TIMEOUT_SECS";

/// Connection and paging settings shared by the GUI and the CLI
#[derive(Debug, Clone, PartialEq)]
pub struct AdminConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub page_sizes: Vec<usize>,
    pub default_page_size: usize,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_sizes: PAGE_SIZES.to_vec(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AdminConfig {
    /// Build a config from `OBS_API_BASE_URL` / `OBS_API_TIMEOUT_SECS`, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(BASE_URL_ENV) {
            let url = url.trim();
            if url.is_empty() {
                warn!("{} is empty, using {}", BASE_URL_ENV, DEFAULT_BASE_URL);
            } else {
                config.base_url = url.to_string();
            }
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => warn!(
                    "Ignoring invalid {}={:?}, using {}s",
                    TIMEOUT_ENV, raw, DEFAULT_TIMEOUT_SECS
                ),
            }
        }

        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Join a resource path onto the base url without doubling slashes
    pub fn endpoint(&self, resource: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            resource.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = AdminConfig::from_lookup(|_| None);
        assert_eq!(config, AdminConfig::default());
        assert_eq!(config.default_page_size, 5);
        assert_eq!(config.page_sizes, vec![5, 10, 20, 40, 100]);
    }

    #[test]
    fn test_env_overrides() {
        let config = AdminConfig::from_lookup(lookup_from(&[
            ("OBS_API_BASE_URL", "https://backoffice.example.com/v2/"),
            ("OBS_API_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(config.base_url, "https://backoffice.example.com/v2/");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(
            config.endpoint("items"),
            "https://backoffice.example.com/v2/items"
        );
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = AdminConfig::from_lookup(lookup_from(&[
            ("OBS_API_BASE_URL", "   "),
            ("OBS_API_TIMEOUT_SECS", "soon"),
        ]));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
