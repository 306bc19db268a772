pub mod codec;
pub mod listener;
pub mod server;

pub use listener::{QueryBudget, TcpDnsListener, UdpDnsListener};
pub use server::DnsServerHandler;
