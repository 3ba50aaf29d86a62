//! Internal Diesel row structs for the `users` table.
//!
//! These types never leave the persistence layer.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::{UserDraft, UserId, UserRecord};

use super::schema::users;

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birth_date: NaiveDate,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            birth_date: row.birth_date,
        }
    }
}

/// Insertable struct for creating user records; the id comes from the
/// sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub birth_date: NaiveDate,
}

impl<'a> From<&'a UserDraft> for NewUserRow<'a> {
    fn from(draft: &'a UserDraft) -> Self {
        Self {
            first_name: &draft.first_name,
            last_name: &draft.last_name,
            email: &draft.email,
            birth_date: draft.birth_date,
        }
    }
}

/// Changeset overwriting every mutable column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub birth_date: NaiveDate,
}

impl<'a> From<&'a UserRecord> for UserUpdate<'a> {
    fn from(record: &'a UserRecord) -> Self {
        Self {
            first_name: &record.first_name,
            last_name: &record.last_name,
            email: &record.email,
            birth_date: record.birth_date,
        }
    }
}
