//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
}

impl HttpState {
    /// Construct state from the two driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use user_registry::domain::UserService;
    /// use user_registry::inbound::http::state::HttpState;
    /// use user_registry::outbound::memory::InMemoryUserRepository;
    ///
    /// let service = Arc::new(UserService::new(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     Arc::new(DefaultClock),
    ///     18,
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// let _users = state.users.clone();
    /// ```
    pub fn new(users: Arc<dyn UsersQuery>, users_command: Arc<dyn UsersCommand>) -> Self {
        Self {
            users,
            users_command,
        }
    }

    /// Construct state from one implementation serving both ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: UsersQuery + UsersCommand + 'static,
    {
        Self::new(service.clone(), service)
    }
}
