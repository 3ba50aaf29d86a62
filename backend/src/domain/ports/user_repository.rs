//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;
use chrono::NaiveDate;
use pagination::{Page, PageRequest};

use crate::domain::{UserDraft, UserId, UserRecord, UserSortKey};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Paginated storage for user records.
///
/// Sorting follows the request verbatim; with an unsorted request the store's
/// natural order applies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch one page of all users.
    async fn find_all(
        &self,
        page: &PageRequest<UserSortKey>,
    ) -> Result<Page<UserRecord>, UserPersistenceError>;

    /// Fetch one page of users born within `[from, to]`, both bounds inclusive.
    async fn find_by_birth_date_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        page: &PageRequest<UserSortKey>,
    ) -> Result<Page<UserRecord>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, UserPersistenceError>;

    /// Store a new user; the store assigns the identifier.
    async fn insert(&self, draft: &UserDraft) -> Result<UserRecord, UserPersistenceError>;

    /// Overwrite an existing user's mutable fields.
    async fn save(&self, record: &UserRecord) -> Result<UserRecord, UserPersistenceError>;

    /// Whether a user with `id` exists.
    async fn exists_by_id(&self, id: UserId) -> Result<bool, UserPersistenceError>;

    /// Remove the user with `id`. Removing a missing user is not an error.
    async fn delete_by_id(&self, id: UserId) -> Result<(), UserPersistenceError>;
}
