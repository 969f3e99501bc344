use std::net::{Ipv4Addr, SocketAddr};

/// Default port of the original responder.
pub const DEFAULT_PORT: u16 = 9876;

/// Default pending-connection queue length.
pub const DEFAULT_BACKLOG: u32 = 5;

/// Configuration for the responder
///
/// # Examples
///
/// ```
/// use shoutsrv::ResponderConfig;
///
/// let config = ResponderConfig {
///     bind_addr: "127.0.0.1:9876".parse().unwrap(),
///     backlog: 5,
///     buffer_size: 1024,
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ResponderConfig {
    /// Address to bind the listening socket to
    pub bind_addr: SocketAddr,
    /// Maximum length of the OS queue of not-yet-accepted connections
    pub backlog: u32,
    /// Chunk size for reading data from a session
    pub buffer_size: usize,
}

impl ResponderConfig {
    /// Config bound to the wildcard interface on `port`, matching the
    /// original deployment shape.
    pub fn wildcard(port: u16, backlog: u32) -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
            backlog,
            ..Self::default()
        }
    }
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            backlog: DEFAULT_BACKLOG,
            buffer_size: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ResponderConfig::default();
        assert_eq!(config.bind_addr.port(), DEFAULT_PORT);
        assert!(config.bind_addr.ip().is_unspecified());
        assert_eq!(config.backlog, DEFAULT_BACKLOG);
        assert_eq!(config.buffer_size, 1024);
    }

    #[test]
    fn test_wildcard_constructor() {
        let config = ResponderConfig::wildcard(7777, 16);
        assert_eq!(config.bind_addr.port(), 7777);
        assert!(config.bind_addr.ip().is_unspecified());
        assert_eq!(config.backlog, 16);
    }
}
