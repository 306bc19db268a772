#![allow(dead_code)]
use async_trait::async_trait;
use ferrous_dnsbl_application::ports::BlocklistStore;
use ferrous_dnsbl_domain::{DomainError, NormalizedName};
use std::time::Duration;

/// Store whose every lookup fails.
pub struct FailingStore;

#[async_trait]
impl BlocklistStore for FailingStore {
    async fn contains(&self, _name: &NormalizedName) -> Result<bool, DomainError> {
        Err(DomainError::StoreFailure("disk unavailable".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

/// Store that takes longer than any lookup timeout used in tests.
pub struct HangingStore;

#[async_trait]
impl BlocklistStore for HangingStore {
    async fn contains(&self, _name: &NormalizedName) -> Result<bool, DomainError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(true)
    }

    fn backend_name(&self) -> &'static str {
        "hanging"
    }
}
