use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Expands `{{ env.VAR }}` placeholders before parsing, then validates.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a placeholder cannot be
    /// expanded, the TOML is malformed, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if a placeholder cannot be expanded, the TOML is
    /// malformed, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns an error if fetch limits are zero or an allowed host is blank
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_fetch_config()?;
        Ok(())
    }

    fn validate_fetch_config(&self) -> anyhow::Result<()> {
        let fetch = &self.fetch;

        if fetch.timeout.is_zero() {
            anyhow::bail!("fetch.timeout must be greater than 0");
        }

        if fetch.max_bytes == 0 {
            anyhow::bail!("fetch.max_bytes must be greater than 0");
        }

        if fetch.max_concurrent == 0 {
            anyhow::bail!("fetch.max_concurrent must be greater than 0");
        }

        if let Some(index) = fetch.allowed_hosts.iter().position(|host| host.trim().is_empty()) {
            anyhow::bail!("fetch.allowed_hosts[{index}] must not be empty");
        }

        Ok(())
    }
}
