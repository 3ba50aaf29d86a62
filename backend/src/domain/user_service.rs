//! User registry domain service.
//!
//! Implements the [`UsersQuery`] and [`UsersCommand`] driving ports on top of
//! a [`UserRepository`]. Listing resolves the optional birth-date filter
//! before any store access; mutations validate their input against the
//! injected clock and configured minimum age.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use pagination::{Page, PageRequest};
use tracing::{debug, info};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::validation::validate_user;
use crate::domain::{DateRange, Error, UserDraft, UserId, UserInput, UserRecord, UserSortKey};

/// Message returned when updating a user that does not exist.
fn missing_on_update(id: UserId) -> Error {
    Error::not_found(format!("User not found with ID: {id}"))
}

/// Message returned when deleting a user that does not exist.
const MISSING_ON_DELETE: &str = "User with this id not found!";

/// User registry service implementing the driving ports.
#[derive(Clone)]
pub struct UserService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    min_age: u32,
}

impl<R> UserService<R> {
    /// Create a service over `repository`, judging ages against `clock`.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>, min_age: u32) -> Self {
        Self {
            repository,
            clock,
            min_age,
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }

    fn validate(&self, input: UserInput) -> Result<UserDraft, Error> {
        validate_user(input, self.today(), self.min_age)
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(
        &self,
        from: Option<&str>,
        to: Option<&str>,
        page: PageRequest<UserSortKey>,
    ) -> Result<Page<UserRecord>, Error> {
        let users = match DateRange::from_query(from, to)? {
            None => self.repository.find_all(&page).await,
            Some(range) => {
                debug!(from = %range.from(), to = %range.to(), "listing users by birth date");
                self.repository
                    .find_by_birth_date_between(range.from(), range.to(), &page)
                    .await
            }
        };
        users.map_err(map_persistence_error)
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, input: UserInput) -> Result<UserRecord, Error> {
        let draft = self.validate(input)?;
        let record = self
            .repository
            .insert(&draft)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %record.id, "user created");
        Ok(record)
    }

    async fn update_user_by_id(&self, id: UserId, input: UserInput) -> Result<UserRecord, Error> {
        let draft = self.validate(input)?;
        let mut record = self
            .repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| missing_on_update(id))?;
        record.apply(draft);
        let saved = self
            .repository
            .save(&record)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %id, "user updated");
        Ok(saved)
    }

    async fn delete_user_by_id(&self, id: UserId) -> Result<(), Error> {
        // Check-then-delete is two round trips and not atomic.
        let exists = self
            .repository
            .exists_by_id(id)
            .await
            .map_err(map_persistence_error)?;
        if !exists {
            return Err(Error::not_found(MISSING_ON_DELETE));
        }
        self.repository
            .delete_by_id(id)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
