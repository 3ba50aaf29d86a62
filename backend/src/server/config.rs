//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use user_registry::domain::validation::DEFAULT_MIN_AGE;
use user_registry::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) min_age: u32,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration listening on `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            min_age: DEFAULT_MIN_AGE,
            db_pool: None,
        }
    }

    /// Set the minimum age enforced on create and update.
    #[must_use]
    pub fn with_min_age(mut self, min_age: u32) -> Self {
        self.min_age = min_age;
        self
    }

    /// Attach a database connection pool for the user repository.
    ///
    /// Without one, users are kept in process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "Exercised by server bootstrap tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
