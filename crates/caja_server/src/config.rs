//! Server configuration.

use std::net::SocketAddr;

/// Configuration for the API server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: SocketAddr,
    /// Maximum number of records accepted in one sync batch.
    pub max_sync_batch: usize,
    /// Page size used when a sale listing omits `page_size`.
    pub default_page_size: u32,
    /// Upper bound on client-requested page sizes.
    pub max_page_size: u32,
}

impl ServerConfig {
    /// Creates a configuration bound to the given address.
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            max_sync_batch: 500,
            default_page_size: 50,
            max_page_size: 200,
        }
    }

    /// Sets the maximum sync batch size.
    pub fn with_max_sync_batch(mut self, size: usize) -> Self {
        self.max_sync_batch = size;
        self
    }

    /// Sets the default page size for sale listings.
    pub fn with_default_page_size(mut self, size: u32) -> Self {
        self.default_page_size = size;
        self
    }

    /// Sets the maximum page size for sale listings.
    pub fn with_max_page_size(mut self, size: u32) -> Self {
        self.max_page_size = size;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from(([127, 0, 0, 1], 8080)))
    }
}
