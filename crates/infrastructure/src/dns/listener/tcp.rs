use super::budget::QueryBudget;
use super::socket::create_tcp_listener;
use crate::dns::codec::MAX_TCP_RESPONSE;
use crate::dns::server::DnsServerHandler;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

pub const TCP_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TcpDnsListener {
    listener: TcpListener,
    handler: DnsServerHandler,
    idle_timeout: Duration,
}

impl TcpDnsListener {
    pub fn bind(addr: SocketAddr, handler: DnsServerHandler) -> io::Result<Self> {
        let listener = create_tcp_listener(addr)?;
        Ok(Self {
            listener,
            handler,
            idle_timeout: TCP_IDLE_TIMEOUT,
        })
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts until the budget's shutdown token fires; each connection is
    /// served on its own task registered with `tracker`.
    pub async fn run(self, tracker: TaskTracker, budget: QueryBudget) {
        let shutdown = budget.shutdown_token().clone();

        if let Ok(addr) = self.local_addr() {
            info!(bind_address = %addr, "TCP listener started");
        }

        loop {
            let accepted = tokio::select! {
                _ = shutdown.cancelled() => break,
                accepted = self.listener.accept() => accepted,
            };

            let (stream, peer) = match accepted {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "TCP accept error");
                    continue;
                }
            };

            let connection = TcpConnection {
                stream,
                peer,
                handler: self.handler.clone(),
                budget: budget.clone(),
                idle_timeout: self.idle_timeout,
            };
            tracker.spawn(connection.serve(shutdown.clone()));
        }

        debug!("TCP listener stopped");
    }
}

struct TcpConnection {
    stream: TcpStream,
    peer: SocketAddr,
    handler: DnsServerHandler,
    budget: QueryBudget,
    idle_timeout: Duration,
}

impl TcpConnection {
    async fn serve(mut self, shutdown: CancellationToken) {
        debug!(client = %self.peer, "TCP connection opened");

        loop {
            let message = tokio::select! {
                _ = shutdown.cancelled() => break,
                message = tokio::time::timeout(self.idle_timeout, read_message(&mut self.stream)) => message,
            };

            let message = match message {
                Err(_) => {
                    debug!(client = %self.peer, "TCP connection idle, closing");
                    break;
                }
                Ok(Ok(Some(message))) => message,
                Ok(Ok(None)) => break,
                Ok(Err(e)) => {
                    debug!(client = %self.peer, error = %e, "TCP read error");
                    break;
                }
            };

            if !self.budget.try_acquire() {
                break;
            }

            let Some(response) = self
                .handler
                .handle_raw(&message, self.peer, MAX_TCP_RESPONSE)
                .await
            else {
                continue;
            };

            if let Err(e) = send_with_length_prefix(&mut self.stream, &response).await {
                debug!(client = %self.peer, error = %e, "TCP write error");
                break;
            }
        }

        debug!(client = %self.peer, "TCP connection closed");
    }
}

/// Reads one length-prefixed message; `None` on clean EOF before a prefix.
async fn read_message(stream: &mut TcpStream) -> io::Result<Option<Vec<u8>>> {
    let mut len_buf = [0u8; 2];
    match stream.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }

    let len = u16::from_be_bytes(len_buf) as usize;
    let mut message = vec![0u8; len];
    stream.read_exact(&mut message).await?;
    Ok(Some(message))
}

async fn send_with_length_prefix(stream: &mut TcpStream, message: &[u8]) -> io::Result<()> {
    let len = u16::try_from(message.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "DNS message too large for TCP"))?;
    let mut framed = Vec::with_capacity(2 + message.len());
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(message);
    stream.write_all(&framed).await?;
    stream.flush().await
}
