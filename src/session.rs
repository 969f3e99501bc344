use crate::Result;
use crate::config::ResponderConfig;
use bytes::BytesMut;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::info;

/// Builds the acknowledgement sent back to a client.
///
/// The format is fixed wire behavior: the uppercased message followed by
/// the peer address in its standard `SocketAddr` display form.
pub fn acknowledgement(message: &str, peer: SocketAddr) -> String {
    format!(
        "Server received your message: {}, client: {}",
        message.to_uppercase(),
        peer
    )
}

/// Serves one accepted connection to completion.
///
/// Reads until the peer closes its send side (a zero-length read is the
/// end-of-message signal — there is no framing), decodes the bytes as
/// UTF-8, uppercases them and writes the acknowledgement back. There is
/// deliberately no read or write timeout: a slow client occupies the
/// server until its own I/O completes or fails.
///
/// The stream is owned here and dropped on every exit path, so the
/// session is closed whether or not an error occurred.
pub async fn serve(mut stream: TcpStream, peer: SocketAddr, config: &ResponderConfig) -> Result<()> {
    let mut message = BytesMut::with_capacity(config.buffer_size);
    let mut buffer = vec![0u8; config.buffer_size];

    loop {
        let n = stream.read(&mut buffer).await?;
        if n == 0 {
            // Peer closed its send side: message complete
            break;
        }
        message.extend_from_slice(&buffer[..n]);
    }

    let text = String::from_utf8(message.to_vec())?;
    info!(%peer, size = text.len(), message = %text, "Received message");

    let reply = acknowledgement(&text, peer);
    stream.write_all(reply.as_bytes()).await?;
    stream.flush().await?;
    info!(%peer, size = reply.len(), "Sent acknowledgement");

    Ok(())
}
