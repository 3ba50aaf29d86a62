//! Offset pagination primitives shared by listing endpoints.
//!
//! A [`PageRequest`] carries a zero-based page index, a positive page size and
//! an optional [`Sort`] made of ordered [`Order`] entries. Storage adapters
//! translate the request into `OFFSET`/`LIMIT` queries and answer with a
//! [`Page`], which knows the total element count and derives the remaining
//! paging metadata from it.
//!
//! Sort keys are generic so each resource can restrict ordering to the
//! properties it actually exposes:
//!
//! ```
//! use std::str::FromStr;
//!
//! use pagination::{Direction, PageRequest, PaginationError, Sort};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Key {
//!     Name,
//! }
//!
//! impl FromStr for Key {
//!     type Err = ();
//!
//!     fn from_str(value: &str) -> Result<Self, Self::Err> {
//!         match value {
//!             "name" => Ok(Self::Name),
//!             _ => Err(()),
//!         }
//!     }
//! }
//!
//! # fn main() -> Result<(), PaginationError> {
//! let sort = Sort::<Key>::parse(["name,desc"])?;
//! let request = PageRequest::try_new(2, 10)?.with_sort(sort);
//! assert_eq!(request.offset(), 20);
//! assert_eq!(request.sort().orders()[0].direction(), Direction::Desc);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Errors raised while building page requests or parsing sort specifications.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// The page index was negative.
    #[error("Page index must not be less than zero")]
    NegativePage,
    /// The page size was zero or negative.
    #[error("Page size must not be less than one")]
    NonPositiveSize,
    /// The page index or size does not fit the supported range.
    #[error("Page index and size must not exceed {max}")]
    OutOfRange {
        /// Largest accepted index or size.
        max: u32,
    },
    /// The page index times the page size lies past the largest offset
    /// storage can address.
    #[error("Page offset must not exceed {max}")]
    OffsetOverflow {
        /// Largest accepted offset.
        max: u64,
    },
    /// A sort specification named a property the resource does not expose.
    #[error("No sortable property '{property}'")]
    UnknownProperty {
        /// Property name as supplied by the caller.
        property: String,
    },
}

/// Sort direction for a single [`Order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Smallest values first.
    #[default]
    Asc,
    /// Largest values first.
    Desc,
}

impl Direction {
    /// Parse a direction token case-insensitively, returning `None` when the
    /// token is not `asc` or `desc`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }

    /// Whether this direction sorts ascending.
    #[must_use]
    pub const fn is_ascending(self) -> bool {
        matches!(self, Self::Asc)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("ASC"),
            Self::Desc => f.write_str("DESC"),
        }
    }
}

/// A single ordering instruction: a sort key and its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Order<K> {
    key: K,
    direction: Direction,
}

impl<K> Order<K> {
    /// Order by `key` ascending.
    #[must_use]
    pub const fn asc(key: K) -> Self {
        Self {
            key,
            direction: Direction::Asc,
        }
    }

    /// Order by `key` descending.
    #[must_use]
    pub const fn desc(key: K) -> Self {
        Self {
            key,
            direction: Direction::Desc,
        }
    }

    /// The property being ordered on.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// The direction of this order.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

/// Ordered list of [`Order`] instructions. Empty means "unsorted": adapters
/// must not impose an ordering of their own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sort<K> {
    orders: Vec<Order<K>>,
}

impl<K> Default for Sort<K> {
    fn default() -> Self {
        Self::unsorted()
    }
}

impl<K> Sort<K> {
    /// A sort with no orders.
    #[must_use]
    pub const fn unsorted() -> Self {
        Self { orders: Vec::new() }
    }

    /// Build a sort from explicit orders.
    #[must_use]
    pub const fn by(orders: Vec<Order<K>>) -> Self {
        Self { orders }
    }

    /// Whether no ordering was requested.
    #[must_use]
    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }

    /// The orders in priority order.
    #[must_use]
    pub fn orders(&self) -> &[Order<K>] {
        &self.orders
    }
}

impl<K: FromStr> Sort<K> {
    /// Parse `property[,property...][,asc|desc]` specifications.
    ///
    /// Each specification contributes one order per property; a trailing
    /// direction token applies to every property of that specification and
    /// defaults to ascending when absent. Blank tokens are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::UnknownProperty`] when a property does not
    /// parse as `K`.
    pub fn parse<I, S>(specs: I) -> Result<Self, PaginationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut orders = Vec::new();
        for spec in specs {
            let tokens: Vec<&str> = spec
                .as_ref()
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .collect();
            let (direction, properties) = match tokens.split_last() {
                Some((last, rest)) => match Direction::from_token(last) {
                    Some(direction) => (direction, rest),
                    None => (Direction::Asc, tokens.as_slice()),
                },
                None => continue,
            };
            for property in properties {
                let key = K::from_str(property).map_err(|_| PaginationError::UnknownProperty {
                    property: (*property).to_owned(),
                })?;
                orders.push(Order { key, direction });
            }
        }
        Ok(Self { orders })
    }
}

/// Largest offset a request may address, the range of a signed 64-bit SQL
/// `OFFSET`.
pub const MAX_OFFSET: u64 = i64::MAX.unsigned_abs();

/// Request for one page of results.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageRequest<K> {
    page: u32,
    size: NonZeroU32,
    sort: Sort<K>,
}

impl<K> PageRequest<K> {
    /// Build an unsorted request from raw, possibly negative, query values.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::NegativePage`] for a negative index,
    /// [`PaginationError::NonPositiveSize`] for a size below one, and
    /// [`PaginationError::OutOfRange`] when either value exceeds `u32::MAX`
    /// and [`PaginationError::OffsetOverflow`] when the resulting offset
    /// exceeds [`MAX_OFFSET`].
    pub fn try_new(page: i64, size: i64) -> Result<Self, PaginationError> {
        if page < 0 {
            return Err(PaginationError::NegativePage);
        }
        if size < 1 {
            return Err(PaginationError::NonPositiveSize);
        }
        let out_of_range = |_| PaginationError::OutOfRange { max: u32::MAX };
        let page = u32::try_from(page).map_err(out_of_range)?;
        let size = u32::try_from(size).map_err(out_of_range)?;
        let size = NonZeroU32::new(size).ok_or(PaginationError::NonPositiveSize)?;
        if u64::from(page) * u64::from(size.get()) > MAX_OFFSET {
            return Err(PaginationError::OffsetOverflow { max: MAX_OFFSET });
        }
        Ok(Self {
            page,
            size,
            sort: Sort::unsorted(),
        })
    }

    /// Replace the sort specification.
    #[must_use]
    pub fn with_sort(mut self, sort: Sort<K>) -> Self {
        self.sort = sort;
        self
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Requested page size.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size.get()
    }

    /// Requested ordering.
    #[must_use]
    pub const fn sort(&self) -> &Sort<K> {
        &self.sort
    }

    /// Number of elements to skip before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size.get())
    }
}

/// One page of results plus the total number of matching elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    content: Vec<T>,
    page: u32,
    size: u32,
    total_elements: u64,
}

impl<T> Page<T> {
    /// Assemble a page answering `request`.
    #[must_use]
    pub fn new<K>(content: Vec<T>, request: &PageRequest<K>, total_elements: u64) -> Self {
        Self {
            content,
            page: request.page(),
            size: request.size(),
            total_elements,
        }
    }

    /// Items on this page, in order.
    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Consume the page, returning its items.
    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Zero-based index of this page.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.page
    }

    /// Requested page size.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Total number of elements across all pages.
    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Total number of pages; zero when nothing matched.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(u64::from(self.size.max(1)))
    }

    /// Number of items on this page.
    #[must_use]
    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    /// Whether this is the first page.
    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.page == 0
    }

    /// Whether a page follows this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) + 1 < self.total_pages()
    }

    /// Whether this is the last page.
    #[must_use]
    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    /// Whether this page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Convert every item, keeping the paging metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

impl<T: Serialize> Serialize for Page<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Page", 9)?;
        state.serialize_field("content", &self.content)?;
        state.serialize_field("totalElements", &self.total_elements)?;
        state.serialize_field("totalPages", &self.total_pages())?;
        state.serialize_field("number", &self.page)?;
        state.serialize_field("size", &self.size)?;
        state.serialize_field("numberOfElements", &self.number_of_elements())?;
        state.serialize_field("first", &self.is_first())?;
        state.serialize_field("last", &self.is_last())?;
        state.serialize_field("empty", &self.is_empty())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for page requests, sort parsing and page metadata.

    use super::*;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Key {
        Name,
        Born,
    }

    impl FromStr for Key {
        type Err = ();

        fn from_str(value: &str) -> Result<Self, Self::Err> {
            match value {
                "name" => Ok(Self::Name),
                "born" => Ok(Self::Born),
                _ => Err(()),
            }
        }
    }

    fn request(page: i64, size: i64) -> PageRequest<Key> {
        PageRequest::try_new(page, size).expect("valid page request")
    }

    #[rstest]
    #[case(-1, 4, PaginationError::NegativePage)]
    #[case(0, 0, PaginationError::NonPositiveSize)]
    #[case(0, -5, PaginationError::NonPositiveSize)]
    #[case(i64::from(u32::MAX) + 1, 4, PaginationError::OutOfRange { max: u32::MAX })]
    #[case(
        i64::from(u32::MAX),
        i64::from(u32::MAX),
        PaginationError::OffsetOverflow { max: MAX_OFFSET }
    )]
    fn try_new_rejects_invalid_bounds(
        #[case] page: i64,
        #[case] size: i64,
        #[case] expected: PaginationError,
    ) {
        let err = PageRequest::<Key>::try_new(page, size).expect_err("invalid request");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn error_messages_match_the_public_contract() {
        assert_eq!(
            PaginationError::NegativePage.to_string(),
            "Page index must not be less than zero"
        );
        assert_eq!(
            PaginationError::NonPositiveSize.to_string(),
            "Page size must not be less than one"
        );
    }

    #[rstest]
    #[case(0, 4, 0)]
    #[case(3, 4, 12)]
    #[case(2, 25, 50)]
    #[case(i64::from(u32::MAX), 4, 4 * u64::from(u32::MAX))]
    fn offset_is_page_times_size(#[case] page: i64, #[case] size: i64, #[case] offset: u64) {
        assert_eq!(request(page, size).offset(), offset);
    }

    #[rstest]
    fn parse_defaults_to_ascending() {
        let sort = Sort::<Key>::parse(["name"]).expect("sort parses");
        assert_eq!(sort.orders(), &[Order::asc(Key::Name)]);
    }

    #[rstest]
    fn parse_applies_trailing_direction_to_every_property() {
        let sort = Sort::<Key>::parse(["name,born,DESC"]).expect("sort parses");
        assert_eq!(sort.orders(), &[Order::desc(Key::Name), Order::desc(Key::Born)]);
    }

    #[rstest]
    fn parse_keeps_specification_order_across_parameters() {
        let sort = Sort::<Key>::parse(["born,desc", "name"]).expect("sort parses");
        assert_eq!(sort.orders(), &[Order::desc(Key::Born), Order::asc(Key::Name)]);
    }

    #[rstest]
    fn parse_ignores_blank_specifications() {
        let sort = Sort::<Key>::parse(["", " , "]).expect("sort parses");
        assert!(sort.is_unsorted());
    }

    #[rstest]
    fn parse_rejects_unknown_property() {
        let err = Sort::<Key>::parse(["password,asc"]).expect_err("unknown property");
        assert_eq!(
            err,
            PaginationError::UnknownProperty {
                property: "password".to_owned()
            }
        );
    }

    #[rstest]
    #[case(0, 0, 0, true, true)]
    #[case(10, 0, 3, true, false)]
    #[case(10, 2, 3, false, true)]
    #[case(8, 1, 2, false, true)]
    fn page_metadata_derives_from_total(
        #[case] total: u64,
        #[case] page: i64,
        #[case] total_pages: u64,
        #[case] first: bool,
        #[case] last: bool,
    ) {
        let page = Page::new(Vec::<u8>::new(), &request(page, 4), total);
        assert_eq!(page.total_pages(), total_pages);
        assert_eq!(page.is_first(), first);
        assert_eq!(page.is_last(), last);
    }

    #[rstest]
    fn map_preserves_metadata() {
        let page = Page::new(vec![1, 2], &request(1, 2), 5).map(|value| value * 10);
        assert_eq!(page.content(), &[10, 20]);
        assert_eq!(page.number(), 1);
        assert_eq!(page.size(), 2);
        assert_eq!(page.total_elements(), 5);
    }

    #[rstest]
    fn serializes_camel_case_envelope() {
        let page = Page::new(vec!["a"], &request(0, 4), 1);
        let value = serde_json::to_value(&page).expect("page serializes");
        assert_eq!(
            value,
            json!({
                "content": ["a"],
                "totalElements": 1,
                "totalPages": 1,
                "number": 0,
                "size": 4,
                "numberOfElements": 1,
                "first": true,
                "last": true,
                "empty": false,
            })
        );
        assert!(matches!(value.get("content"), Some(Value::Array(_))));
    }
}
