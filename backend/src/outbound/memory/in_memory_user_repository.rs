//! `UserRepository` backed by an ordered map behind a mutex.
//!
//! Mirrors the Diesel adapter's semantics: identifiers come from a sequence
//! starting at one, the birth-date filter is inclusive on both ends, and an
//! unsorted request returns rows in identifier order.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::NaiveDate;
use pagination::{Direction, Order, Page, PageRequest, Sort};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{UserDraft, UserId, UserRecord, UserSortKey};

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    rows: BTreeMap<UserId, UserRecord>,
}

/// In-memory implementation of the `UserRepository` port.
///
/// # Examples
/// ```
/// use user_registry::outbound::memory::InMemoryUserRepository;
///
/// let repo = InMemoryUserRepository::new();
/// assert!(repo.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: Mutex<Store>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    /// Whether no users are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().rows.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        // A panic mid-operation leaves the map itself consistent.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn page_where<F>(&self, page: &PageRequest<UserSortKey>, keep: F) -> Page<UserRecord>
    where
        F: Fn(&UserRecord) -> bool,
    {
        let mut matching: Vec<UserRecord> = self
            .lock()
            .rows
            .values()
            .filter(|record| keep(record))
            .cloned()
            .collect();
        sort_records(&mut matching, page.sort());

        let total = u64::try_from(matching.len()).unwrap_or(u64::MAX);
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(page.size()).unwrap_or(usize::MAX);
        let content = matching.into_iter().skip(offset).take(size).collect();
        Page::new(content, page, total)
    }
}

fn compare(a: &UserRecord, b: &UserRecord, order: &Order<UserSortKey>) -> Ordering {
    let ordering = match order.key() {
        UserSortKey::Id => a.id.cmp(&b.id),
        UserSortKey::FirstName => a.first_name.cmp(&b.first_name),
        UserSortKey::LastName => a.last_name.cmp(&b.last_name),
        UserSortKey::Email => a.email.cmp(&b.email),
        UserSortKey::BirthDate => a.birth_date.cmp(&b.birth_date),
    };
    match order.direction() {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    }
}

fn sort_records(records: &mut [UserRecord], sort: &Sort<UserSortKey>) {
    if sort.is_unsorted() {
        return;
    }
    // Stable sort keeps identifier order among ties.
    records.sort_by(|a, b| {
        sort.orders()
            .iter()
            .map(|order| compare(a, b, order))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(
        &self,
        page: &PageRequest<UserSortKey>,
    ) -> Result<Page<UserRecord>, UserPersistenceError> {
        Ok(self.page_where(page, |_| true))
    }

    async fn find_by_birth_date_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        page: &PageRequest<UserSortKey>,
    ) -> Result<Page<UserRecord>, UserPersistenceError> {
        Ok(self.page_where(page, |record| {
            from <= record.birth_date && record.birth_date <= to
        }))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, UserPersistenceError> {
        Ok(self.lock().rows.get(&id).cloned())
    }

    async fn insert(&self, draft: &UserDraft) -> Result<UserRecord, UserPersistenceError> {
        let mut store = self.lock();
        store.next_id = store
            .next_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("user id sequence exhausted"))?;
        let record = UserRecord::from_draft(UserId::new(store.next_id), draft.clone());
        store.rows.insert(record.id, record.clone());
        Ok(record)
    }

    async fn save(&self, record: &UserRecord) -> Result<UserRecord, UserPersistenceError> {
        let mut store = self.lock();
        let stored = store
            .rows
            .get_mut(&record.id)
            .ok_or_else(|| UserPersistenceError::query("record not found"))?;
        stored.clone_from(record);
        Ok(record.clone())
    }

    async fn exists_by_id(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        Ok(self.lock().rows.contains_key(&id))
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), UserPersistenceError> {
        self.lock().rows.remove(&id);
        Ok(())
    }
}
