use anyhow::Context;
use ferrous_dnsbl_application::ports::BlocklistStore;
use ferrous_dnsbl_domain::{BlocklistBackend, BlocklistConfig};
use ferrous_dnsbl_infrastructure::repositories::{DirectoryBlocklistStore, MemoryBlocklistStore};
use std::sync::Arc;
use tracing::info;

pub async fn build_store(config: &BlocklistConfig) -> anyhow::Result<Arc<dyn BlocklistStore>> {
    let store: Arc<dyn BlocklistStore> = match config.backend {
        BlocklistBackend::Directory => Arc::new(
            DirectoryBlocklistStore::open(&config.path)
                .await
                .context("Failed to open blocklist directory")?,
        ),
        BlocklistBackend::File => Arc::new(
            MemoryBlocklistStore::load(&config.path)
                .await
                .context("Failed to load blocklist file")?,
        ),
    };

    info!(
        backend = store.backend_name(),
        path = %config.path,
        hierarchical = config.hierarchical,
        "Blocklist store ready"
    );
    Ok(store)
}
