//! User data model.
//!
//! [`UserInput`] is the unvalidated shape accepted by create and update
//! use-cases; validation turns it into a [`UserDraft`]. Stored rows are
//! [`UserRecord`]s, which add the store-assigned [`UserId`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw user fields as submitted by a client, before validation.
///
/// Every field is optional so validation can report all missing values in one
/// pass instead of failing on the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInput {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Contact address.
    pub email: Option<String>,
    /// Calendar birth date.
    pub birth_date: Option<NaiveDate>,
}

/// Validated mutable user fields, without identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    /// Given name; never blank.
    pub first_name: String,
    /// Family name; never blank.
    pub last_name: String,
    /// Well-formed contact address.
    pub email: String,
    /// Birth date satisfying the configured minimum age at validation time.
    pub birth_date: NaiveDate,
}

/// A persisted user.
///
/// The age rule is enforced only on input; stored rows are never re-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Immutable store-assigned identifier.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact address.
    pub email: String,
    /// Calendar birth date.
    pub birth_date: NaiveDate,
}

impl UserRecord {
    /// Combine an identifier with validated fields.
    #[must_use]
    pub fn from_draft(id: UserId, draft: UserDraft) -> Self {
        let UserDraft {
            first_name,
            last_name,
            email,
            birth_date,
        } = draft;
        Self {
            id,
            first_name,
            last_name,
            email,
            birth_date,
        }
    }

    /// Overwrite every mutable field with `draft`, keeping the identifier.
    pub fn apply(&mut self, draft: UserDraft) {
        let UserDraft {
            first_name,
            last_name,
            email,
            birth_date,
        } = draft;
        self.first_name = first_name;
        self.last_name = last_name;
        self.email = email;
        self.birth_date = birth_date;
    }
}

/// Properties a user listing may be ordered by.
///
/// Parsed from and rendered as the camelCase names used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserSortKey {
    /// Store-assigned identifier.
    Id,
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Contact address.
    Email,
    /// Birth date.
    BirthDate,
}

impl UserSortKey {
    /// Wire name of the property.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::BirthDate => "birthDate",
        }
    }
}

/// Raised when a sort property is not one of [`UserSortKey`]'s names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown user sort property: {0}")]
pub struct UnknownSortKey(pub String);

impl FromStr for UserSortKey {
    type Err = UnknownSortKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "id" => Ok(Self::Id),
            "firstName" => Ok(Self::FirstName),
            "lastName" => Ok(Self::LastName),
            "email" => Ok(Self::Email),
            "birthDate" => Ok(Self::BirthDate),
            other => Err(UnknownSortKey(other.to_owned())),
        }
    }
}

impl fmt::Display for UserSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
