//! Server configuration.

use std::net::SocketAddr;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address and port to listen on.
    pub listen: SocketAddr,
    /// Origins allowed by CORS. Empty means any origin.
    pub allowed_origins: Vec<String>,
    /// Echo raw upstream error messages to clients in 500 responses.
    ///
    /// Off by default: upstream errors are logged and the client only gets
    /// a stable category string.
    pub expose_error_details: bool,
}
