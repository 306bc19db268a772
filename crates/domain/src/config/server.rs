use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    #[serde(default = "default_true")]
    pub tcp_enabled: bool,

    /// Number of queries to serve before shutting down; 0 means unlimited.
    #[serde(default)]
    pub max_queries: u64,
}

impl ServerConfig {
    /// Accepts a bare IP (`::1`, `127.0.0.1`) or a bracketed IPv6 literal.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let host = self
            .bind_address
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']');
        let ip: IpAddr = host.parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::InvalidAddress(self.bind_address.clone(), e.to_string())
        })?;
        Ok(SocketAddr::new(ip, self.dns_port))
    }

    pub fn query_budget(&self) -> Option<u64> {
        (self.max_queries > 0).then_some(self.max_queries)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            dns_port: default_dns_port(),
            tcp_enabled: true,
            max_queries: 0,
        }
    }
}

fn default_bind_address() -> String {
    "::1".to_string()
}

fn default_dns_port() -> u16 {
    5353
}

fn default_true() -> bool {
    true
}
