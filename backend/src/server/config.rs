//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use guest_list::inbound::http::RejectionStatus;
use guest_list::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) rejection_status: RejectionStatus,
}

impl ServerConfig {
    /// Construct a server configuration bound to `bind_addr` and storing
    /// guests through `db_pool`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            bind_addr,
            db_pool,
            rejection_status: RejectionStatus::default(),
        }
    }

    /// Choose how rule violations are reflected in the status code.
    #[must_use]
    pub fn with_rejection_status(mut self, rejection_status: RejectionStatus) -> Self {
        self.rejection_status = rejection_status;
        self
    }
}
