use thiserror::Error;

/// Error types for the shoutsrv library
#[derive(Error, Debug)]
pub enum ShoutError {
    /// Startup failures: the listening socket could not be created, bound
    /// or put into listening state. Fatal — never retried.
    #[error("bind error: {0}")]
    Bind(std::io::Error),

    /// Per-session I/O errors (read, write, connect)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The accumulated message was not valid UTF-8
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Client-side timeout errors
    #[error("timeout error: {0}")]
    Timeout(String),
}

/// Result type for the shoutsrv library
pub type Result<T> = std::result::Result<T, ShoutError>;

pub mod client;
pub mod config;
pub mod server;
pub mod session;
pub mod test_utils;

// Re-export main types for convenience
pub use client::{ClientConfig, ClientConfigBuilder, ShoutClient};
pub use config::ResponderConfig;
pub use server::Responder;
