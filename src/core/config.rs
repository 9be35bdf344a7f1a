//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::transport::TransportConfig;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Tool dispatch configuration.
    pub tools: ToolsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,

    /// Usage instructions sent during the handshake.
    pub instructions: Option<String>,
}

/// Configuration for tool validation and execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Deadline for a single tool call, in milliseconds. `None` disables it.
    pub timeout_ms: Option<u64>,

    /// Reject arguments that a tool's schema does not declare.
    pub strict_arguments: bool,

    /// Seed for handler randomness. `None` seeds from OS entropy.
    pub random_seed: Option<u64>,
}

impl ToolsConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "mcp-marketing-agency".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                instructions: Some(
                    "Outils marketing digital : idées de contenu, hashtags, calendrier de \
                     publication, analyse de performance et stratégies d'engagement."
                        .to_string(),
                ),
            },
            tools: ToolsConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_TOOL_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(value) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = parse_flag(&value).unwrap_or(true);
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Some(timeout_ms) = parse_env::<u64>("MCP_TOOL_TIMEOUT_MS") {
            config.tools.timeout_ms = (timeout_ms > 0).then_some(timeout_ms);
            info!("Tool timeout: {:?}", config.tools.timeout());
        }

        if let Ok(value) = std::env::var("MCP_STRICT_ARGUMENTS") {
            config.tools.strict_arguments = parse_flag(&value).unwrap_or(false);
            info!("Strict argument validation: {}", config.tools.strict_arguments);
        }

        if let Some(seed) = parse_env::<u64>("MCP_RANDOM_SEED") {
            config.tools.random_seed = Some(seed);
            info!("Tool randomness seeded with {}", seed);
        }

        config
    }
}

/// Read and parse an environment variable, warning on unparsable values.
fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.name, "mcp-marketing-agency");
        assert_eq!(config.server.version, "1.0.0");
        assert!(config.tools.timeout().is_none());
        assert!(!config.tools.strict_arguments);
        assert!(config.tools.random_seed.is_none());
    }

    #[test]
    fn test_tools_config_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TOOL_TIMEOUT_MS", "1500");
            std::env::set_var("MCP_STRICT_ARGUMENTS", "true");
            std::env::set_var("MCP_RANDOM_SEED", "42");
        }
        let config = Config::from_env();
        assert_eq!(config.tools.timeout(), Some(Duration::from_millis(1500)));
        assert!(config.tools.strict_arguments);
        assert_eq!(config.tools.random_seed, Some(42));
        unsafe {
            std::env::remove_var("MCP_TOOL_TIMEOUT_MS");
            std::env::remove_var("MCP_STRICT_ARGUMENTS");
            std::env::remove_var("MCP_RANDOM_SEED");
        }
    }

    #[test]
    fn test_invalid_env_values_fall_back() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TOOL_TIMEOUT_MS", "soon");
            std::env::set_var("MCP_RANDOM_SEED", "-1");
        }
        let config = Config::from_env();
        assert!(config.tools.timeout().is_none());
        assert!(config.tools.random_seed.is_none());
        unsafe {
            std::env::remove_var("MCP_TOOL_TIMEOUT_MS");
            std::env::remove_var("MCP_RANDOM_SEED");
        }
    }

    #[test]
    fn test_zero_timeout_disables_deadline() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TOOL_TIMEOUT_MS", "0");
        }
        let config = Config::from_env();
        assert!(config.tools.timeout().is_none());
        unsafe {
            std::env::remove_var("MCP_TOOL_TIMEOUT_MS");
        }
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
