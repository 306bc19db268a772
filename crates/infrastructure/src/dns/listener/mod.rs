//! Inbound UDP and TCP listeners.

mod budget;
mod socket;
mod tcp;
mod udp;

pub use budget::QueryBudget;
pub use tcp::{TcpDnsListener, TCP_IDLE_TIMEOUT};
pub use udp::UdpDnsListener;
