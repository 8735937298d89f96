//! Programmatic fetch configuration for integration tests

use std::time::Duration;

use parley_config::FetchConfig;

/// Builder for constructing test fetch configurations
pub struct FetchConfigBuilder {
    config: FetchConfig,
}

impl FetchConfigBuilder {
    /// Defaults with a short timeout so failing cases finish quickly
    pub fn new() -> Self {
        Self {
            config: FetchConfig {
                timeout: Duration::from_secs(2),
                ..FetchConfig::default()
            },
        }
    }

    /// Turn downloads off
    pub fn disabled(mut self) -> Self {
        self.config.enabled = false;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the response size cap
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.config.max_bytes = max_bytes;
        self
    }

    /// Restrict downloads to the given hosts
    pub fn with_allowed_hosts(mut self, hosts: &[&str]) -> Self {
        self.config.allowed_hosts = hosts.iter().map(|&host| host.to_owned()).collect();
        self
    }

    /// Build the final config
    pub fn build(self) -> FetchConfig {
        self.config
    }
}
