//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserInput, UserRecord};

/// Domain use-case port for creating, updating and deleting users.
///
/// Input arrives unvalidated; implementations validate it before touching
/// storage.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate and store a new user.
    async fn create_user(&self, input: UserInput) -> Result<UserRecord, Error>;

    /// Validate `input` and overwrite every mutable field of user `id`.
    async fn update_user_by_id(&self, id: UserId, input: UserInput) -> Result<UserRecord, Error>;

    /// Remove user `id`.
    async fn delete_user_by_id(&self, id: UserId) -> Result<(), Error>;
}
