use crate::{Result, ShoutError};
use bytes::BytesMut;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Configuration for [`ShoutClient`]
///
/// The responder itself never times out; these limits exist purely on
/// the client side so a test or tool talking to a wedged server fails
/// instead of hanging.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Timeout for each read while collecting the reply
    pub read_timeout: Duration,
    /// Timeout for writing the message
    pub write_timeout: Duration,
    /// Chunk size for reading the reply
    pub buffer_size: usize,
    /// Maximum reply size to prevent memory exhaustion
    pub max_response_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
            write_timeout: Duration::from_secs(30),
            buffer_size: 1024,
            max_response_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

/// One-shot client for the responder.
///
/// The wire exchange is a single request/reply per connection: send the
/// message, half-close the write side to mark it complete, then read
/// the acknowledgement until the server closes. Because the connection
/// is spent after one exchange, [`ShoutClient::request`] consumes the
/// client.
///
/// # Examples
///
/// ```no_run
/// use shoutsrv::ShoutClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ShoutClient::connect("127.0.0.1:9876".parse()?).await?;
///     let reply = client.request_string("hello").await?;
///     println!("{reply}");
///     Ok(())
/// }
/// ```
pub struct ShoutClient {
    stream: TcpStream,
    config: ClientConfig,
}

impl ShoutClient {
    /// Connect with custom configuration
    pub async fn connect_with_config(addr: SocketAddr, config: ClientConfig) -> Result<Self> {
        let stream = timeout(config.connect_timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| ShoutError::Timeout("connection timeout".to_string()))??;
        Ok(Self { stream, config })
    }

    /// Connect with default configuration
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        Self::connect_with_config(addr, ClientConfig::default()).await
    }

    /// The local (address, port) pair of this connection, as the server
    /// will observe it.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.stream.local_addr()?)
    }

    /// Sends `data`, half-closes the write side and collects the reply
    /// until the server closes the connection.
    ///
    /// An empty reply means the server closed without acknowledging,
    /// which is what it does when the message fails to decode.
    pub async fn request(mut self, data: &[u8]) -> Result<Vec<u8>> {
        timeout(self.config.write_timeout, self.stream.write_all(data))
            .await
            .map_err(|_| ShoutError::Timeout("write timeout".to_string()))??;
        timeout(self.config.write_timeout, self.stream.flush())
            .await
            .map_err(|_| ShoutError::Timeout("flush timeout".to_string()))??;

        // FIN on the write half is the end-of-message signal
        self.stream.shutdown().await?;

        let mut response = BytesMut::with_capacity(self.config.buffer_size);
        let mut buffer = vec![0u8; self.config.buffer_size];

        loop {
            let n = timeout(self.config.read_timeout, self.stream.read(&mut buffer))
                .await
                .map_err(|_| ShoutError::Timeout("read timeout".to_string()))??;

            if n == 0 {
                // Server closed the connection: reply complete
                break;
            }

            if response.len() + n > self.config.max_response_size {
                return Err(ShoutError::Config(format!(
                    "reply too large: {} bytes, max allowed: {}",
                    response.len() + n,
                    self.config.max_response_size
                )));
            }
            response.extend_from_slice(&buffer[..n]);
        }

        Ok(response.to_vec())
    }

    /// Sends a string message and decodes the reply as UTF-8.
    pub async fn request_string(self, message: &str) -> Result<String> {
        let reply = self.request(message.as_bytes()).await?;
        String::from_utf8(reply).map_err(ShoutError::Utf8)
    }
}

/// Builder for client configuration
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_timeout = timeout;
        self
    }

    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.config.write_timeout = timeout;
        self
    }

    pub fn buffer_size(mut self, size: usize) -> Self {
        self.config.buffer_size = size;
        self
    }

    pub fn max_response_size(mut self, size: usize) -> Self {
        self.config.max_response_size = size;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
