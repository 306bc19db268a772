use super::budget::QueryBudget;
use super::socket::create_udp_socket;
use crate::dns::codec::MAX_UDP_RESPONSE;
use crate::dns::server::DnsServerHandler;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

/// Large enough for any datagram; oversize queries are still decoded.
const RECV_BUF_SIZE: usize = 65535;

pub struct UdpDnsListener {
    socket: Arc<UdpSocket>,
    handler: DnsServerHandler,
}

impl UdpDnsListener {
    pub fn bind(addr: SocketAddr, handler: DnsServerHandler) -> io::Result<Self> {
        let socket = create_udp_socket(addr)?;
        Ok(Self {
            socket: Arc::new(socket),
            handler,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Receives until the budget's shutdown token fires. Each datagram is
    /// answered on its own task registered with `tracker`.
    pub async fn run(self, tracker: TaskTracker, budget: QueryBudget) {
        let shutdown = budget.shutdown_token().clone();
        let mut recv_buf = vec![0u8; RECV_BUF_SIZE];

        if let Ok(addr) = self.local_addr() {
            info!(bind_address = %addr, "UDP listener started");
        }

        loop {
            let received = tokio::select! {
                _ = shutdown.cancelled() => break,
                received = self.socket.recv_from(&mut recv_buf) => received,
            };

            let (len, peer) = match received {
                Ok(received) => received,
                Err(e) => {
                    warn!(error = %e, "UDP recv error");
                    continue;
                }
            };

            if !budget.try_acquire() {
                break;
            }

            let packet: Arc<[u8]> = Arc::from(&recv_buf[..len]);
            let socket = self.socket.clone();
            let handler = self.handler.clone();
            tracker.spawn(async move {
                let Some(response) = handler.handle_raw(&packet, peer, MAX_UDP_RESPONSE).await
                else {
                    return;
                };
                if let Err(e) = socket.send_to(&response, peer).await {
                    warn!(client = %peer, error = %e, "UDP send failed");
                }
            });
        }

        debug!("UDP listener stopped");
    }
}
