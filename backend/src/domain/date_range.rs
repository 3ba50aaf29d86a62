//! Birth-date range filter for user listings.

use chrono::NaiveDate;

use super::error::Error;
use super::validation::{parse_date, validate_date_range_format};

/// Message reported when the lower bound is not strictly before the upper.
pub const DATE_ORDER_MESSAGE: &str = "From date must be less than To date";

/// Inclusive birth-date interval with `from` strictly before `to`.
///
/// # Examples
/// ```
/// use user_registry::domain::DateRange;
///
/// let range = DateRange::parse("2022-01-01", "2022-12-31").expect("valid range");
/// assert!(range.contains(range.to()));
/// assert!(DateRange::parse("2022-01-01", "2022-01-01").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Build a range from already parsed bounds.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error when `from` is not strictly before
    /// `to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, Error> {
        if from < to {
            Ok(Self { from, to })
        } else {
            Err(Error::invalid_argument(DATE_ORDER_MESSAGE))
        }
    }

    /// Shape-check, parse and order-check textual bounds, in that order.
    ///
    /// # Errors
    ///
    /// Propagates the first failing step as an `InvalidArgument` error.
    pub fn parse(from: &str, to: &str) -> Result<Self, Error> {
        validate_date_range_format(from, to)?;
        let from = parse_date(from)?;
        let to = parse_date(to)?;
        Self::new(from, to)
    }

    /// Resolve optional query bounds.
    ///
    /// Returns `Ok(None)` when either bound is absent or empty, in which case
    /// no validation happens at all.
    ///
    /// # Errors
    ///
    /// See [`DateRange::parse`].
    pub fn from_query(from: Option<&str>, to: Option<&str>) -> Result<Option<Self>, Error> {
        match (from, to) {
            (Some(from), Some(to)) if !from.is_empty() && !to.is_empty() => {
                Self::parse(from, to).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn from(&self) -> NaiveDate {
        self.from
    }

    /// Inclusive upper bound.
    #[must_use]
    pub const fn to(&self) -> NaiveDate {
        self.to
    }

    /// Whether `date` falls within the inclusive bounds.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}
