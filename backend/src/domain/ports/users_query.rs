//! Driving port for user listings.
//!
//! Inbound adapters (HTTP handlers) use this port to page through users
//! without importing outbound persistence concerns.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, UserRecord, UserSortKey};

/// Domain use-case port for listing users.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return one page of users, optionally restricted to a birth-date range.
    ///
    /// The range applies only when both `from` and `to` are present and
    /// non-empty; otherwise every user is eligible.
    async fn list_users(
        &self,
        from: Option<&str>,
        to: Option<&str>,
        page: PageRequest<UserSortKey>,
    ) -> Result<Page<UserRecord>, Error>;
}
