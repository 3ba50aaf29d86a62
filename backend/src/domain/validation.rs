//! Request validation rules applied before any data access.
//!
//! Date bounds are shape-checked against `YYYY-MM-DD` here and parsed later,
//! so `2022-13-99` passes the shape check and fails at parse time. User input
//! is checked field by field and every violation is reported together.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use super::error::{Error, FieldViolation};
use super::user::{UserDraft, UserInput};

/// Message reported when a date is not shaped `YYYY-MM-DD`.
pub const DATE_FORMAT_MESSAGE: &str = "Date should be in format YYYY-MM-dd";

/// Minimum age applied when configuration does not override it.
pub const DEFAULT_MIN_AGE: u32 = 18;

const NOT_BLANK: &str = "must not be blank";
const NOT_NULL: &str = "must not be null";
const MALFORMED_EMAIL: &str = "must be a well-formed email address";

static DATE_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn date_regex() -> &'static Regex {
    DATE_RE.get_or_init(|| {
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$")
            .unwrap_or_else(|error| panic!("date regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Dot-atom local part, dot-separated LDH labels for the domain.
        let pattern = concat!(
            r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
            r"@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*$",
        );
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Whether `value` is shaped exactly `dddd-dd-dd` with ASCII digits. No
/// calendar check.
#[must_use]
pub fn is_date_shaped(value: &str) -> bool {
    date_regex().is_match(value)
}

/// Require both bounds of a date range to be shaped `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns an `InvalidArgument` error carrying [`DATE_FORMAT_MESSAGE`] when
/// either bound has the wrong shape.
///
/// # Examples
/// ```
/// use user_registry::domain::validation::validate_date_range_format;
///
/// assert!(validate_date_range_format("2022-01-01", "2022-12-31").is_ok());
/// assert!(validate_date_range_format("2022/01/01", "2022-12-31").is_err());
/// ```
pub fn validate_date_range_format(from: &str, to: &str) -> Result<(), Error> {
    if is_date_shaped(from) && is_date_shaped(to) {
        Ok(())
    } else {
        Err(Error::invalid_argument(DATE_FORMAT_MESSAGE))
    }
}

/// Parse a shape-checked `YYYY-MM-DD` string into a calendar date.
///
/// # Errors
///
/// Returns an `InvalidArgument` error carrying the date parser's own message
/// when the text is not a real calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|err| Error::invalid_argument(err.to_string()))
}

/// Whether at least `min_years` whole calendar years separate `birth_date`
/// from `today`.
///
/// A year counts once its anniversary month and day are reached. Birth dates
/// after `today` never qualify, even with a minimum of zero and a birth date
/// less than a year away.
#[must_use]
pub fn validate_age(birth_date: NaiveDate, today: NaiveDate, min_years: u32) -> bool {
    today
        .years_since(birth_date)
        .is_some_and(|years| years >= min_years)
}

/// Message reported for a birth date below the minimum age.
#[must_use]
pub fn age_message(min_years: u32) -> String {
    format!("User must be older than {min_years} years old")
}

/// Whether `email` is a plausible address. Empty input is left to the
/// not-blank rule.
#[must_use]
pub fn is_well_formed_email(email: &str) -> bool {
    email.is_empty() || email_regex().is_match(email)
}

fn require_not_blank(
    field: &'static str,
    value: Option<String>,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Some(text),
        _ => {
            violations.push(FieldViolation::new(field, NOT_BLANK));
            None
        }
    }
}

/// Validate raw user fields, collecting every violation in field order.
///
/// # Errors
///
/// Returns a `FieldValidation` error listing each violated constraint as
/// `Field name {field} {message}`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use user_registry::domain::UserInput;
/// use user_registry::domain::validation::validate_user;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
/// let err = validate_user(UserInput::default(), today, 18).expect_err("empty input");
/// assert_eq!(err.messages().len(), 4);
/// ```
pub fn validate_user(input: UserInput, today: NaiveDate, min_age: u32) -> Result<UserDraft, Error> {
    let UserInput {
        first_name,
        last_name,
        email,
        birth_date,
    } = input;
    let mut violations = Vec::new();

    let first_name = require_not_blank("firstName", first_name, &mut violations);
    let last_name = require_not_blank("lastName", last_name, &mut violations);
    let email = require_not_blank("email", email, &mut violations);
    if email.as_deref().is_some_and(|value| !is_well_formed_email(value)) {
        violations.push(FieldViolation::new("email", MALFORMED_EMAIL));
    }
    match birth_date {
        None => violations.push(FieldViolation::new("birthDate", NOT_NULL)),
        Some(date) if !validate_age(date, today, min_age) => {
            violations.push(FieldViolation::new("birthDate", age_message(min_age)));
        }
        Some(_) => {}
    }

    let mut violations = violations.into_iter();
    match (violations.next(), first_name, last_name, email, birth_date) {
        (None, Some(first_name), Some(last_name), Some(email), Some(birth_date)) => Ok(UserDraft {
            first_name,
            last_name,
            email,
            birth_date,
        }),
        (Some(first), ..) => Err(Error::field_validation(first, violations)),
        (None, ..) => Err(Error::internal("user validation dropped a field")),
    }
}
