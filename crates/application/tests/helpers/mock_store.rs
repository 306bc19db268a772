#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_dnsbl_application::ports::BlocklistStore;
use ferrous_dnsbl_domain::{DomainError, NormalizedName};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

#[derive(Clone, Default)]
pub struct MockBlocklistStore {
    entries: Arc<RwLock<HashSet<String>>>,
    lookups: Arc<RwLock<Vec<String>>>,
    should_fail: Arc<AtomicBool>,
    delay_ms: Arc<AtomicUsize>,
}

impl MockBlocklistStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: &[&str]) -> Self {
        let store = Self::new();
        for entry in entries {
            store.add(entry);
        }
        store
    }

    pub fn add(&self, name: &str) {
        self.entries.write().unwrap().insert(name.to_string());
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay: Duration) {
        self.delay_ms
            .store(delay.as_millis() as usize, Ordering::SeqCst);
    }

    /// Names passed to `contains`, in call order.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.read().unwrap().clone()
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.read().unwrap().len()
    }
}

#[async_trait]
impl BlocklistStore for MockBlocklistStore {
    async fn contains(&self, name: &NormalizedName) -> Result<bool, DomainError> {
        self.lookups.write().unwrap().push(name.as_str().to_string());

        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay as u64)).await;
        }

        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::StoreFailure("mock store failure".to_string()));
        }

        Ok(self.entries.read().unwrap().contains(name.as_str()))
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}
