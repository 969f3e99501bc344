use crate::config::ResponderConfig;
use crate::session;
use crate::{Result, ShoutError};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpSocket};
use tokio::signal;
use tracing::{Instrument, error, info};

/// Sequential TCP responder.
///
/// Owns the listening socket for its whole lifetime and serves exactly
/// one client at a time: the next `accept` does not happen until the
/// current session is fully closed, so connections queue in the OS
/// backlog while a session is in flight. This ordering is part of the
/// observable contract, not an implementation accident — do not move
/// session handling onto a spawned task.
///
/// # Examples
///
/// ```no_run
/// use shoutsrv::{Responder, ResponderConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let responder = Responder::bind(ResponderConfig::wildcard(9876, 5))?;
///     responder.run().await?;
///     Ok(())
/// }
/// ```
///
/// Running in the background with graceful shutdown:
///
/// ```no_run
/// use shoutsrv::{Responder, ResponderConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let responder = Responder::bind(ResponderConfig::default())?;
///     let shutdown = responder.shutdown_signal();
///
///     let handle = tokio::spawn(async move { responder.run().await });
///
///     // Do other work...
///
///     let _ = shutdown.send(());
///     handle.await??;
///     Ok(())
/// }
/// ```
pub struct Responder {
    listener: TcpListener,
    config: ResponderConfig,
    shutdown_signal: Arc<tokio::sync::broadcast::Sender<()>>,
}

impl Responder {
    /// Creates the listening socket with the configured backlog.
    ///
    /// Any failure here is a [`ShoutError::Bind`] and should be treated
    /// as fatal by the caller; there is no retry.
    pub fn bind(config: ResponderConfig) -> Result<Self> {
        let socket = match config.bind_addr {
            SocketAddr::V4(_) => TcpSocket::new_v4(),
            SocketAddr::V6(_) => TcpSocket::new_v6(),
        }
        .map_err(ShoutError::Bind)?;

        socket.bind(config.bind_addr).map_err(ShoutError::Bind)?;
        let listener = socket.listen(config.backlog).map_err(ShoutError::Bind)?;

        let (shutdown_signal, _) = tokio::sync::broadcast::channel(1);
        Ok(Self {
            listener,
            config,
            shutdown_signal: Arc::new(shutdown_signal),
        })
    }

    /// The address the listener actually bound to. Useful when the
    /// config asked for port 0.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener.local_addr().map_err(ShoutError::Bind)
    }

    /// Returns a shutdown signal sender that can be used to stop the
    /// serve loop between sessions.
    pub fn shutdown_signal(&self) -> tokio::sync::broadcast::Sender<()> {
        self.shutdown_signal.as_ref().clone()
    }

    /// Runs the unbounded serve loop.
    ///
    /// Each iteration accepts one connection, serves it inline and
    /// closes it before accepting the next. Session errors (connection
    /// reset, invalid UTF-8, write failure) are logged and swallowed so
    /// a misbehaving client can never terminate the process. Shutdown
    /// (ctrl-c or the internal signal) is only observed while waiting
    /// in `accept`, never mid-session.
    pub async fn run(self) -> Result<()> {
        let addr = self.local_addr()?;
        info!(address = %addr, backlog = self.config.backlog, "Responder listening");

        let mut shutdown_rx = self.shutdown_signal.subscribe();

        loop {
            let (stream, peer) = tokio::select! {
                accept_result = self.listener.accept() => {
                    match accept_result {
                        Ok(pair) => pair,
                        Err(e) => {
                            error!(error = %e, "Failed to accept connection");
                            continue;
                        }
                    }
                }
                _ = signal::ctrl_c() => {
                    info!("Received shutdown signal, stopping responder");
                    break;
                }
                _ = shutdown_rx.recv() => {
                    info!("Received internal shutdown signal, stopping responder");
                    break;
                }
            };

            info!(%peer, "Accepted connection");

            let span = tracing::info_span!("session", %peer);
            // Served inline: `serve` owns the stream and drops it on
            // every path, so the session is closed before the loop can
            // accept again.
            if let Err(e) = session::serve(stream, peer, &self.config)
                .instrument(span)
                .await
            {
                error!(%peer, error = %e, "Error handling session");
            }
            info!(%peer, "Connection closed");
        }

        info!("Responder stopped");
        Ok(())
    }
}
