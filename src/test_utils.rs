//! Helpers shared by the integration and property test suites.

use crate::config::ResponderConfig;
use crate::server::Responder;
use crate::{Result, ShoutError};
use std::net::SocketAddr;
use tokio::task::JoinHandle;

/// Spawns a responder on an ephemeral loopback port.
///
/// Returns the serve-loop handle, the bound address and a shutdown
/// sender. The listener is bound before the task is spawned, so the
/// address is immediately connectable — no startup sleep needed.
pub fn spawn_test_responder() -> Result<(
    JoinHandle<Result<()>>,
    SocketAddr,
    tokio::sync::broadcast::Sender<()>,
)> {
    let config = ResponderConfig {
        bind_addr: "127.0.0.1:0"
            .parse()
            .map_err(|e| ShoutError::Config(format!("bad loopback address: {e}")))?,
        ..Default::default()
    };

    let responder = Responder::bind(config)?;
    let addr = responder.local_addr()?;
    let shutdown = responder.shutdown_signal();

    let handle = tokio::spawn(async move { responder.run().await });

    Ok((handle, addr, shutdown))
}
