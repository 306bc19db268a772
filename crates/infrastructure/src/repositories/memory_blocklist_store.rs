//! In-memory blocklist, optionally loaded from a list file.

use async_trait::async_trait;
use ferrous_dnsbl_application::ports::BlocklistStore;
use ferrous_dnsbl_domain::{DomainError, NormalizedName};
use rustc_hash::FxHashSet;
use std::net::IpAddr;
use std::path::Path;
use tracing::{debug, info};

/// Hosts-file names that never make sense as blocklist entries.
const SKIP_NAMES: &[&str] = &[
    "localhost",
    "localhost.localdomain",
    "local",
    "broadcasthost",
    "ip6-localhost",
    "ip6-loopback",
];

#[derive(Debug, Default)]
pub struct MemoryBlocklistStore {
    entries: FxHashSet<NormalizedName>,
}

impl MemoryBlocklistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from names, silently skipping any that do not normalize.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = names
            .into_iter()
            .filter_map(|name| NormalizedName::parse(name.as_ref()).ok())
            .filter(|name| !name.is_root())
            .collect();
        Self { entries }
    }

    /// Loads a domain-per-line or hosts-format list file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::StoreFailure(format!(
                "Cannot read blocklist file {}: {}",
                path.display(),
                e
            ))
        })?;

        let store = Self::from_names(parse_list(&content));
        info!(path = %path.display(), entries = store.len(), "Blocklist file loaded into memory");
        Ok(store)
    }

    pub fn insert(&mut self, name: NormalizedName) -> bool {
        self.entries.insert(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl BlocklistStore for MemoryBlocklistStore {
    async fn contains(&self, name: &NormalizedName) -> Result<bool, DomainError> {
        Ok(self.entries.contains(name))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// Extracts names from list-file content.
///
/// Accepts plain `domain` lines and hosts lines (`0.0.0.0 a.example b.example`).
/// `#` and `!` start comments.
pub fn parse_list(content: &str) -> Vec<&str> {
    let mut names = Vec::new();

    for line in content.lines() {
        let line = line
            .split(['#', '!'])
            .next()
            .unwrap_or_default()
            .trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace().peekable();
        let hosts_format = fields
            .peek()
            .is_some_and(|first| first.parse::<IpAddr>().is_ok());
        if hosts_format {
            fields.next();
        }

        for field in fields {
            if SKIP_NAMES.contains(&field.to_ascii_lowercase().as_str()) {
                debug!(name = field, "Skipping reserved hosts name");
                continue;
            }
            names.push(field);
            if !hosts_format {
                break;
            }
        }
    }

    names
}
