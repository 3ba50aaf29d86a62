//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Page reads issue two statements on one pooled connection: the `OFFSET` /
//! `LIMIT` slice and a `COUNT(*)` over the same filter.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use pagination::{Direction, Page, PageRequest, Sort};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{UserDraft, UserId, UserRecord, UserSortKey};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::DbPool;
use super::schema::users;

type BoxedUsers<'a> = users::BoxedQuery<'a, Pg>;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Append the requested orders; an unsorted request adds no `ORDER BY`.
fn apply_sort<'a>(query: BoxedUsers<'a>, sort: &Sort<UserSortKey>) -> BoxedUsers<'a> {
    sort.orders()
        .iter()
        .fold(query, |query, order| match (order.key(), order.direction()) {
            (UserSortKey::Id, Direction::Asc) => query.then_order_by(users::id.asc()),
            (UserSortKey::Id, Direction::Desc) => query.then_order_by(users::id.desc()),
            (UserSortKey::FirstName, Direction::Asc) => {
                query.then_order_by(users::first_name.asc())
            }
            (UserSortKey::FirstName, Direction::Desc) => {
                query.then_order_by(users::first_name.desc())
            }
            (UserSortKey::LastName, Direction::Asc) => query.then_order_by(users::last_name.asc()),
            (UserSortKey::LastName, Direction::Desc) => {
                query.then_order_by(users::last_name.desc())
            }
            (UserSortKey::Email, Direction::Asc) => query.then_order_by(users::email.asc()),
            (UserSortKey::Email, Direction::Desc) => query.then_order_by(users::email.desc()),
            (UserSortKey::BirthDate, Direction::Asc) => {
                query.then_order_by(users::birth_date.asc())
            }
            (UserSortKey::BirthDate, Direction::Desc) => {
                query.then_order_by(users::birth_date.desc())
            }
        })
}

fn birth_date_filter(range: Option<(NaiveDate, NaiveDate)>) -> BoxedUsers<'static> {
    let query = users::table.into_boxed();
    match range {
        Some((from, to)) => query.filter(users::birth_date.between(from, to)),
        None => query,
    }
}

fn offset_and_limit(page: &PageRequest<UserSortKey>) -> Result<(i64, i64), UserPersistenceError> {
    let offset = i64::try_from(page.offset())
        .map_err(|_| UserPersistenceError::query("page offset exceeds i64 range"))?;
    Ok((offset, i64::from(page.size())))
}

async fn load_page(
    conn: &mut AsyncPgConnection,
    range: Option<(NaiveDate, NaiveDate)>,
    page: &PageRequest<UserSortKey>,
) -> Result<Page<UserRecord>, UserPersistenceError> {
    let (offset, limit) = offset_and_limit(page)?;

    let rows = apply_sort(birth_date_filter(range), page.sort())
        .select(UserRow::as_select())
        .offset(offset)
        .limit(limit)
        .load::<UserRow>(conn)
        .await
        .map_err(map_diesel_error)?;

    let total: i64 = birth_date_filter(range)
        .count()
        .get_result(conn)
        .await
        .map_err(map_diesel_error)?;
    let total = u64::try_from(total)
        .map_err(|_| UserPersistenceError::query("negative row count"))?;

    let content = rows.into_iter().map(UserRecord::from).collect();
    Ok(Page::new(content, page, total))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_all(
        &self,
        page: &PageRequest<UserSortKey>,
    ) -> Result<Page<UserRecord>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_page(&mut conn, None, page).await
    }

    async fn find_by_birth_date_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        page: &PageRequest<UserSortKey>,
    ) -> Result<Page<UserRecord>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_page(&mut conn, Some((from, to)), page).await
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(UserRecord::from))
    }

    async fn insert(&self, draft: &UserDraft) -> Result<UserRecord, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(users::table)
            .values(NewUserRow::from(draft))
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn save(&self, record: &UserRecord) -> Result<UserRecord, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(users::table.find(record.id.get()))
            .set(UserUpdate::from(record))
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn exists_by_id(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(users::table.find(id.get())))
            .get_result::<bool>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(users::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
