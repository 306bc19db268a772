use anyhow::Context;
use ferrous_dnsbl_application::ports::BlocklistStore;
use ferrous_dnsbl_application::services::BlocklistMatcher;
use ferrous_dnsbl_application::use_cases::HandleDnsQueryUseCase;
use ferrous_dnsbl_domain::{Config, DnsblZone};
use ferrous_dnsbl_infrastructure::dns::DnsServerHandler;
use std::sync::Arc;
use tracing::info;

pub fn build_handler(
    config: &Config,
    store: Arc<dyn BlocklistStore>,
) -> anyhow::Result<DnsServerHandler> {
    let matcher = Arc::new(BlocklistMatcher::new(store, config.blocklist.hierarchical));
    let mut use_case = HandleDnsQueryUseCase::new(
        matcher,
        config.response.clone(),
        config.blocklist.lookup_timeout(),
    );

    if let Some(zone) = config.blocklist.zone() {
        let zone = DnsblZone::new(zone).context("Invalid DNSBL zone")?;
        info!(zone = %zone.apex(), "Answering only within DNSBL zone");
        use_case = use_case.with_zone(zone);
    }

    Ok(DnsServerHandler::new(Arc::new(use_case)))
}
