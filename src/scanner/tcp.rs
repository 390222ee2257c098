//! TCP connect prober.
//!
//! Uses the operating system's socket API to complete a handshake and then
//! drops the connection without exchanging data.

use crate::scanner::traits::{PortState, Prober};
use crate::types::Port;
use async_trait::async_trait;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// TCP connect prober.
///
/// Does not require elevated privileges. Hostnames are resolved as part of
/// the connect attempt, and resolution counts against the timeout.
#[derive(Debug, Clone)]
pub struct TcpProber {
    timeout: Duration,
}

impl TcpProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, host: &str, port: Port) -> PortState {
        match timeout(self.timeout, TcpStream::connect((host, port.as_u16()))).await {
            Ok(Ok(stream)) => {
                drop(stream);
                PortState::Open
            }
            Ok(Err(e)) => {
                trace!(host, port = port.as_u16(), error = %e, "connect failed");
                PortState::Closed
            }
            Err(_) => {
                trace!(host, port = port.as_u16(), "connect timed out");
                PortState::Closed
            }
        }
    }
}
