//! Runtime settings: defaults first, then environment overrides.
//!
//! | Variable                 | Setting                          | Default                     |
//! |--------------------------|----------------------------------|-----------------------------|
//! | `LIST_QUERY_DEBOUNCE_MS` | [`ControllerConfig::debounce`]   | 500                         |
//! | `LIST_QUERY_TIMEOUT_MS`  | [`ControllerConfig::request_timeout`] | 10000                  |
//! | `LIST_QUERY_BUFFER`      | [`ControllerConfig::buffer_size`] | 32                         |
//! | `HOSTEL_API_URL`         | [`ApiConfig::base_url`]          | `http://localhost:5000/api` |
//! | `HOSTEL_API_TOKEN`       | [`ApiConfig::token`]             | none                        |

use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    /// Quiet period after the last input change before a fetch starts.
    pub debounce: Duration,
    /// Upper bound on a single remote call.
    pub request_timeout: Duration,
    /// Capacity of the controller's request channel.
    pub buffer_size: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            request_timeout: Duration::from_secs(10),
            buffer_size: 32,
        }
    }
}

impl ControllerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(ms) = parse_var::<u64>(&lookup, "LIST_QUERY_DEBOUNCE_MS") {
            config.debounce = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "LIST_QUERY_TIMEOUT_MS") {
            config.request_timeout = Duration::from_millis(ms.max(1));
        }
        if let Some(size) = parse_var::<usize>(&lookup, "LIST_QUERY_BUFFER") {
            config.buffer_size = size.max(1);
        }
        config
    }
}

/// Where the backend lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".into(),
            token: None,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("HOSTEL_API_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        config.token = lookup("HOSTEL_API_TOKEN").filter(|t| !t.is_empty());
        config
    }
}

fn parse_var<V: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<V> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable setting");
            None
        }
    }
}
