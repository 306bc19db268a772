use serde::{Deserialize, Serialize};

use super::blocklist::BlocklistConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::response::ResponseConfig;
use super::server::ServerConfig;
use crate::dns_record::RecordType;
use crate::dnsbl_zone::DnsblZone;

const LOCAL_CONFIG: &str = "ferrous-dnsbl.toml";
const SYSTEM_CONFIG: &str = "/etc/ferrous-dnsbl/config.toml";
const MAX_TXT_STRING: usize = 255;

/// Main configuration structure for Ferrous DNSBL
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (address, port, transports)
    #[serde(default)]
    pub server: ServerConfig,

    /// Blocklist store and matching policy
    #[serde(default)]
    pub blocklist: BlocklistConfig,

    /// Response shaping
    #[serde(default)]
    pub response: ResponseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-dnsbl.toml in current directory
    /// 3. /etc/ferrous-dnsbl/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(tcp) = overrides.tcp_enabled {
            self.server.tcp_enabled = tcp;
        }
        if let Some(max) = overrides.max_queries {
            self.server.max_queries = max;
        }
        if let Some(path) = overrides.blocklist_path {
            self.blocklist.path = path;
        }
        if let Some(hierarchical) = overrides.hierarchical {
            self.blocklist.hierarchical = hierarchical;
        }
        if let Some(zone) = overrides.zone {
            self.blocklist.zone = Some(zone);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }
        self.server.socket_addr()?;

        if self.blocklist.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Blocklist path cannot be empty".to_string(),
            ));
        }
        if self.blocklist.lookup_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "lookup_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if let Some(zone) = self.blocklist.zone() {
            DnsblZone::new(zone)
                .map_err(|e| ConfigError::Validation(format!("Invalid zone: {}", e)))?;
        }

        self.validate_response()
    }

    fn validate_response(&self) -> Result<(), ConfigError> {
        let response = &self.response;

        if response.ttl > i32::MAX as u32 {
            return Err(ConfigError::Validation(format!(
                "TTL {} exceeds {}",
                response.ttl,
                i32::MAX
            )));
        }
        if response.answerable_types.is_empty() {
            return Err(ConfigError::Validation(
                "answerable_types cannot be empty".to_string(),
            ));
        }

        let mut needs_sentinel: Vec<RecordType> = response
            .answerable_types
            .iter()
            .copied()
            .filter(|rt| *rt != RecordType::ANY)
            .collect();
        if response.is_answerable(RecordType::ANY) {
            needs_sentinel.push(response.any_type);
        }

        for record_type in needs_sentinel {
            if !record_type.has_sentinel_form() {
                return Err(ConfigError::Validation(format!(
                    "No sentinel answer can be built for record type {}",
                    record_type
                )));
            }
            if response.sentinel_for(record_type).is_none() {
                return Err(ConfigError::Validation(format!(
                    "Record type {} is answerable but has no sentinel configured",
                    record_type
                )));
            }
        }

        if let Some(text) = &response.sentinel_txt {
            if text.len() > MAX_TXT_STRING {
                return Err(ConfigError::Validation(format!(
                    "sentinel_txt is longer than {} octets",
                    MAX_TXT_STRING
                )));
            }
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG).exists() {
            Some(LOCAL_CONFIG.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG).exists() {
            Some(SYSTEM_CONFIG.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub dns_port: Option<u16>,
    pub tcp_enabled: Option<bool>,
    pub max_queries: Option<u64>,
    pub blocklist_path: Option<String>,
    pub hierarchical: Option<bool>,
    pub zone: Option<String>,
    pub log_level: Option<String>,
}
