use anyhow::Context;
use ferrous_dnsbl_domain::ServerConfig;
use ferrous_dnsbl_infrastructure::dns::{
    DnsServerHandler, QueryBudget, TcpDnsListener, UdpDnsListener,
};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{info, warn};

/// Serves until Ctrl-C or until the query budget is spent, then waits for
/// in-flight requests to finish.
pub async fn start_dns_server(
    config: &ServerConfig,
    handler: DnsServerHandler,
) -> anyhow::Result<()> {
    let socket_addr = config.socket_addr()?;
    let shutdown = CancellationToken::new();
    let budget = QueryBudget::new(config.query_budget(), shutdown.clone());
    let tracker = TaskTracker::new();
    let mut listeners: JoinSet<()> = JoinSet::new();

    let udp = UdpDnsListener::bind(socket_addr, handler.clone())
        .with_context(|| format!("Failed to bind UDP {}", socket_addr))?;
    listeners.spawn(udp.run(tracker.clone(), budget.clone()));

    if config.tcp_enabled {
        let tcp = TcpDnsListener::bind(socket_addr, handler)
            .with_context(|| format!("Failed to bind TCP {}", socket_addr))?;
        listeners.spawn(tcp.run(tracker.clone(), budget.clone()));
    }

    info!(
        bind_address = %socket_addr,
        tcp = config.tcp_enabled,
        max_queries = config.max_queries,
        "DNSBL server ready"
    );

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!(error = %e, "Failed to listen for Ctrl-C");
            }
            info!("Shutdown requested");
        }
        _ = shutdown.cancelled() => {
            info!("Query budget exhausted");
        }
    }

    shutdown.cancel();
    while listeners.join_next().await.is_some() {}

    tracker.close();
    tracker.wait().await;
    Ok(())
}
