use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BlocklistBackend {
    /// One file per listed name inside `path`.
    #[default]
    Directory,

    /// A domain-per-line (or hosts-format) list loaded at startup.
    File,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlocklistConfig {
    #[serde(default)]
    pub backend: BlocklistBackend,

    #[serde(default = "default_path")]
    pub path: String,

    /// A listed domain also lists every name beneath it.
    #[serde(default = "default_true")]
    pub hierarchical: bool,

    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,

    /// Optional DNSBL zone apex; queries outside it are refused.
    #[serde(default)]
    pub zone: Option<String>,
}

impl BlocklistConfig {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }

    /// The configured zone, treating an empty string as unset.
    pub fn zone(&self) -> Option<&str> {
        self.zone
            .as_deref()
            .map(str::trim)
            .filter(|zone| !zone.is_empty())
    }
}

impl Default for BlocklistConfig {
    fn default() -> Self {
        Self {
            backend: BlocklistBackend::default(),
            path: default_path(),
            hierarchical: true,
            lookup_timeout_ms: default_lookup_timeout_ms(),
            zone: None,
        }
    }
}

fn default_path() -> String {
    "var/dnsbl".to_string()
}

fn default_true() -> bool {
    true
}

fn default_lookup_timeout_ms() -> u64 {
    2000
}
