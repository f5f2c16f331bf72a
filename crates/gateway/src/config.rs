//! Gateway configuration.

use common::{DatabaseConfig, ServerConfig};

/// Gateway configuration.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    /// Listener address
    pub server: ServerConfig,
    /// User store connection
    pub database: DatabaseConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
        }
    }

    /// Override the listener address, keeping env values for anything not given.
    pub fn with_listener(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self
    }
}
