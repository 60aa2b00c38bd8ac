//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use envelope_config::{Config, HealthConfig, ServerConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with the demo routes mounted
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                    demo: true,
                },
                ..Config::default()
            },
        }
    }

    /// Default code for failures that omit one
    pub fn with_fail_code(mut self, code: i64) -> Self {
        self.config.api.fail_code = Some(code);
        self
    }

    /// Default status for failures that omit one
    pub fn with_fail_status(mut self, status: u16) -> Self {
        self.config.api.fail_status = status;
        self
    }

    /// Expose unexpected error details
    pub fn with_diagnostics(mut self) -> Self {
        self.config.api.diagnostics = true;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
