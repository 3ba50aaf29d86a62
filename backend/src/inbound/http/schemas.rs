//! OpenAPI schema definitions for types the adapter cannot annotate directly.
//!
//! `pagination::Page` lives in a framework-free crate and serialises by hand,
//! so it does not derive `ToSchema`. The wrapper here mirrors its wire shape
//! for the users listing.

use utoipa::ToSchema;

use crate::inbound::http::users_dto::UserDto;

/// OpenAPI schema for `pagination::Page<UserDto>`.
///
/// One page of users plus the paging metadata clients need to walk the rest.
#[derive(ToSchema)]
#[schema(as = UserPage, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserPageSchema {
    /// Users on this page, in the requested order.
    content: Vec<UserDto>,
    /// Number of users matching the request across all pages.
    #[schema(example = 5)]
    total_elements: u64,
    /// Number of pages at the requested size.
    #[schema(example = 2)]
    total_pages: u64,
    /// Zero-based index of this page.
    #[schema(example = 0)]
    number: u32,
    /// Requested page size.
    #[schema(example = 4)]
    size: u32,
    /// Number of users on this page.
    #[schema(example = 4)]
    number_of_elements: u32,
    /// Whether this is the first page.
    first: bool,
    /// Whether this is the last page.
    last: bool,
    /// Whether this page holds no users.
    empty: bool,
}
