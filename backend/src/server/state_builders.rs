//! Builders wiring the user repository and service into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::{info, warn};

use user_registry::domain::UserService;
use user_registry::domain::ports::UserRepository;
use user_registry::inbound::http::state::HttpState;
use user_registry::outbound::memory::InMemoryUserRepository;
use user_registry::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

fn state_over<R>(repository: R, min_age: u32) -> web::Data<HttpState>
where
    R: UserRepository + 'static,
{
    let service = UserService::new(Arc::new(repository), Arc::new(DefaultClock), min_age);
    web::Data::new(HttpState::from_service(Arc::new(service)))
}

/// Build HTTP state over PostgreSQL when a pool is configured, otherwise over
/// an in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    match &config.db_pool {
        Some(pool) => {
            info!(min_age = config.min_age, "serving users from PostgreSQL");
            state_over(DieselUserRepository::new(pool.clone()), config.min_age)
        }
        None => {
            warn!(
                min_age = config.min_age,
                "no database configured; users are kept in memory and lost on restart"
            );
            state_over(InMemoryUserRepository::new(), config.min_age)
        }
    }
}
