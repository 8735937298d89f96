use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Limits for downloading images that get inlined as base64
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    /// When disabled, images are always referenced by URL
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Timeout for a single download, e.g. `"10s"`
    #[serde(default = "default_timeout", deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
    /// Largest accepted response body in bytes
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
    /// Downloads in flight at once within one conversion
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
    /// Hosts that may be fetched; empty allows any host
    #[serde(default)]
    pub allowed_hosts: Vec<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            timeout: default_timeout(),
            max_bytes: default_max_bytes(),
            max_concurrent: default_max_concurrent(),
            allowed_hosts: Vec::new(),
        }
    }
}

impl FetchConfig {
    /// Whether `host` passes the allow-list
    ///
    /// Entries match the host exactly or any of its subdomains.
    pub fn host_allowed(&self, host: &str) -> bool {
        if self.allowed_hosts.is_empty() {
            return true;
        }

        let host = host.to_ascii_lowercase();
        self.allowed_hosts.iter().any(|allowed| {
            let allowed = allowed.to_ascii_lowercase();
            host == allowed || host.strip_suffix(&allowed).is_some_and(|rest| rest.ends_with('.'))
        })
    }
}

const fn default_enabled() -> bool {
    true
}

const fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

// Anthropic rejects images above 5 MiB
const fn default_max_bytes() -> u64 {
    5 * 1024 * 1024
}

const fn default_max_concurrent() -> usize {
    4
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    duration_str::parse(&raw).map_err(|e| serde::de::Error::custom(format!("invalid duration '{raw}': {e}")))
}
