use std::net::SocketAddr;
use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded file
    ///
    /// Diagnostics can only be switched on here, never off.
    #[must_use]
    pub fn with_overrides(mut self, listen_address: Option<SocketAddr>, diagnostics: bool) -> Self {
        if let Some(listen_address) = listen_address {
            self.server.listen_address = Some(listen_address);
        }
        self.api.diagnostics |= diagnostics;
        self
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the failure status is not an HTTP error status
    /// or the health path is unusable
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_api_config()?;
        self.validate_health_config()?;
        Ok(())
    }

    fn validate_api_config(&self) -> anyhow::Result<()> {
        let status = self.api.fail_status;
        if !(400..=599).contains(&status) {
            anyhow::bail!("api.fail_status must be an HTTP error status (400-599), got {status}");
        }

        Ok(())
    }

    fn validate_health_config(&self) -> anyhow::Result<()> {
        let health = &self.server.health;
        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/', got '{}'", health.path);
        }

        Ok(())
    }
}
