use anyhow::Context;
use clap::Parser;
use ferrous_dnsbl_domain::{CliOverrides, Config, DnsblZone};
use std::net::Ipv4Addr;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "ferrous-dnsbl")]
#[command(version)]
#[command(about = "Ferrous DNSBL - DNS blocklist responder")]
struct Cli {
    /// Number of queries to serve before exiting (0 = unlimited)
    #[arg(value_name = "QUERIES")]
    queries: Option<u64>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long, env = "DNSBL_HOST")]
    bind: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long, env = "DNSBL_PORT")]
    dns_port: Option<u16>,

    /// Blocklist directory (or list file with the file backend)
    #[arg(long, value_name = "PATH", env = "DNSBL_DIRECTORY")]
    directory: Option<String>,

    /// DNSBL zone; names outside it are refused
    #[arg(long, env = "DNSBL_DOMAIN")]
    zone: Option<String>,

    /// Match exact names only, without walking parent domains
    #[arg(long)]
    exact: bool,

    /// Disable the TCP listener
    #[arg(long)]
    no_tcp: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the DNSBL query name for an IPv4 address and exit
    #[arg(long, value_name = "IPV4")]
    print_query_name: Option<Ipv4Addr>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            bind_address: self.bind.clone(),
            dns_port: self.dns_port,
            tcp_enabled: self.no_tcp.then_some(false),
            max_queries: self.queries,
            blocklist_path: self.directory.clone(),
            hierarchical: self.exact.then_some(false),
            zone: self.zone.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;

    if let Some(ip) = cli.print_query_name {
        println!("{}", query_name_for(&config, ip)?);
        return Ok(());
    }

    bootstrap::init_logging(&config);

    info!("Starting Ferrous DNSBL v{}", env!("CARGO_PKG_VERSION"));
    match cli.config.clone().or_else(Config::get_config_path) {
        Some(path) => info!(path = %path, "Using configuration file"),
        None => info!("No configuration file found, using defaults"),
    }

    let store = di::build_store(&config.blocklist).await?;
    let handler = di::build_handler(&config, store)?;

    server::start_dns_server(&config.server, handler).await?;

    info!("Server shutdown complete");
    Ok(())
}

fn query_name_for(config: &Config, ip: Ipv4Addr) -> anyhow::Result<String> {
    let zone = config
        .blocklist
        .zone()
        .context("No DNSBL zone configured (set --zone or blocklist.zone)")?;
    let zone = DnsblZone::new(zone)?;
    Ok(zone.query_name(ip)?.to_string())
}
