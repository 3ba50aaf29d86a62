//! Domain primitives, rules and services for the user registry.
//!
//! Purpose: Define the user model, the validation and date-range rules that
//! run before any data access, and the service implementing the driving
//! ports. Nothing here depends on HTTP or persistence frameworks.
//!
//! Public surface:
//! - Error / ErrorCode / FieldViolation: transport-agnostic failures.
//! - UserRecord / UserDraft / UserInput / UserId / UserSortKey: user model.
//! - DateRange: inclusive birth-date filter.
//! - UserService: implementation of `UsersQuery` and `UsersCommand`.
//! - TraceId: request-scoped correlation identifier.

pub mod date_range;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
mod user_service;
pub mod validation;

pub use self::date_range::{DATE_ORDER_MESSAGE, DateRange};
pub use self::error::{Error, ErrorCode, FieldViolation};
pub use self::trace_id::TraceId;
pub use self::user::{UnknownSortKey, UserDraft, UserId, UserInput, UserRecord, UserSortKey};
pub use self::user_service::UserService;

/// HTTP header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
