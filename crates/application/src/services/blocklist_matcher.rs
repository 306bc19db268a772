use ferrous_dnsbl_domain::{DomainError, NormalizedName};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::ports::BlocklistStore;

/// Decides whether a name is listed, either exactly or through one of its
/// parent domains.
pub struct BlocklistMatcher {
    store: Arc<dyn BlocklistStore>,
    hierarchical: bool,
}

impl BlocklistMatcher {
    pub fn new(store: Arc<dyn BlocklistStore>, hierarchical: bool) -> Self {
        Self {
            store,
            hierarchical,
        }
    }

    pub async fn is_listed(&self, name: &NormalizedName) -> Result<bool, DomainError> {
        Ok(self.find_listing(name).await?.is_some())
    }

    /// Returns the store entry that lists `name`: the name itself, or with
    /// hierarchical matching the closest listed ancestor. The walk stops
    /// before the top-level label, so listing `net` never lists `example.net`.
    #[instrument(skip_all, fields(name = %name))]
    pub async fn find_listing(
        &self,
        name: &NormalizedName,
    ) -> Result<Option<NormalizedName>, DomainError> {
        if name.is_root() {
            return Ok(None);
        }

        if self.store.contains(name).await? {
            return Ok(Some(name.clone()));
        }

        if !self.hierarchical {
            return Ok(None);
        }

        let mut candidate = name.parent();
        while let Some(ancestor) = candidate {
            if ancestor.label_count() < 2 {
                break;
            }
            if self.store.contains(&ancestor).await? {
                debug!(listed_ancestor = %ancestor, "Listed through parent domain");
                return Ok(Some(ancestor));
            }
            candidate = ancestor.parent();
        }

        Ok(None)
    }
}
