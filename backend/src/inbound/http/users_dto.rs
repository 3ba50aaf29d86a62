//! Wire types for the users endpoints and their conversions.
//!
//! Dates travel as `YYYY-MM-DD`. A `birthDate` of any other shape fails the
//! whole body with the date format message; a missing or `null` one is left
//! for field validation to report.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::validation::{DATE_FORMAT_MESSAGE, is_date_shaped};
use crate::domain::{UserInput, UserRecord};

/// Request body for creating or replacing a user.
///
/// Example JSON:
/// `{"firstName":"Ada","lastName":"Lovelace","email":"ada@example.com","birthDate":"1990-01-01"}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    /// Given name; must not be blank.
    #[serde(default)]
    #[schema(example = "Ada")]
    pub first_name: Option<String>,
    /// Family name; must not be blank.
    #[serde(default)]
    #[schema(example = "Lovelace")]
    pub last_name: Option<String>,
    /// Well-formed contact address.
    #[serde(default)]
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    /// Birth date meeting the configured minimum age.
    #[serde(default, deserialize_with = "deserialize_birth_date")]
    #[schema(value_type = Option<String>, format = Date, example = "1990-01-01")]
    pub birth_date: Option<NaiveDate>,
}

fn deserialize_birth_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if !is_date_shaped(&raw) {
        return Err(serde::de::Error::custom(DATE_FORMAT_MESSAGE));
    }
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| serde::de::Error::custom(DATE_FORMAT_MESSAGE))
}

impl From<UserRequest> for UserInput {
    fn from(value: UserRequest) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            birth_date: value.birth_date,
        }
    }
}

/// A stored user as returned by every users endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    /// Server-assigned identifier; read-only.
    #[schema(example = 1)]
    pub id: i64,
    /// Given name.
    #[schema(example = "Ada")]
    pub first_name: String,
    /// Family name.
    #[schema(example = "Lovelace")]
    pub last_name: String,
    /// Contact address.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Birth date.
    #[schema(value_type = String, format = Date, example = "1990-01-01")]
    pub birth_date: NaiveDate,
}

impl From<UserRecord> for UserDto {
    fn from(value: UserRecord) -> Self {
        Self {
            id: value.id.get(),
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            birth_date: value.birth_date,
        }
    }
}

/// Query parameters accepted by `GET /users`.
///
/// `sort` may repeat, so it is read separately from the raw query string
/// and ignored here.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Inclusive lower birth-date bound, `YYYY-MM-DD`.
    pub from: Option<String>,
    /// Inclusive upper birth-date bound, `YYYY-MM-DD`.
    pub to: Option<String>,
    /// Zero-based page index.
    #[serde(default)]
    #[param(default = 0, minimum = 0)]
    pub page: i64,
    /// Page size.
    #[serde(default = "default_page_size")]
    #[param(default = 4, minimum = 1)]
    pub size: i64,
}

const DEFAULT_PAGE_SIZE: i64 = 4;

const fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}
