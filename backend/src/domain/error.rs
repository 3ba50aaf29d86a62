//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map each
//! [`ErrorCode`] to a protocol status and render the ordered message list.

use std::fmt;

use super::trace_id::TraceId;
use super::validation::DATE_FORMAT_MESSAGE;

/// Stable error category describing why an operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The requested record does not exist.
    NotFound,
    /// A request argument is malformed or violates a business rule.
    InvalidArgument,
    /// One or more request body fields failed declarative validation.
    FieldValidation,
    /// The request body could not be decoded.
    MalformedBody,
    /// A backing store is unreachable.
    ServiceUnavailable,
    /// An unexpected failure inside the service.
    Internal,
}

impl ErrorCode {
    /// Generic message used when a caller supplies a blank one.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::NotFound => "Resource not found",
            Self::InvalidArgument => "Invalid argument",
            Self::FieldValidation => "Invalid field value",
            Self::MalformedBody => "Malformed request body",
            Self::ServiceUnavailable => "Service temporarily unavailable",
            Self::Internal => "Internal server error",
        }
    }
}

/// A single declarative constraint violation on a request body field.
///
/// # Examples
/// ```
/// use user_registry::domain::FieldViolation;
///
/// let violation = FieldViolation::new("email", "must not be blank");
/// assert_eq!(violation.to_string(), "Field name email must not be blank");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    field: &'static str,
    message: String,
}

impl FieldViolation {
    /// Record that `field` violated a constraint described by `message`.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// External (wire) name of the offending field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Constraint message without the field prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field name {} {}", self.field, self.message)
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `messages` is non-empty and every entry is non-blank.
/// - `trace_id` is the [`TraceId`] in scope when the error was built.
///
/// # Examples
/// ```
/// use user_registry::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("User not found with ID: 7");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.messages(), ["User not found with ID: 7"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    messages: Vec<String>,
    trace_id: Option<TraceId>,
}

impl Error {
    /// Create an error with a single message.
    ///
    /// Blank messages are replaced by [`ErrorCode::default_message`]. The
    /// trace identifier of the current request, if any, is captured.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.default_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            messages: vec![message],
            trace_id: TraceId::current(),
        }
    }

    /// Error category.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Ordered, human-readable messages.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Correlation identifier for the request that produced this error.
    #[must_use]
    pub const fn trace_id(&self) -> Option<TraceId> {
        self.trace_id
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidArgument`].
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, message)
    }

    /// Build a [`ErrorCode::FieldValidation`] error from at least one
    /// violation. Messages keep the order the violations were recorded in.
    #[must_use]
    pub fn field_validation(
        first: FieldViolation,
        rest: impl IntoIterator<Item = FieldViolation>,
    ) -> Self {
        let messages = std::iter::once(first)
            .chain(rest)
            .map(|violation| violation.to_string())
            .collect();
        Self {
            code: ErrorCode::FieldValidation,
            messages,
            trace_id: TraceId::current(),
        }
    }

    /// Convenience constructor for [`ErrorCode::MalformedBody`].
    ///
    /// A decoding failure caused by a badly shaped date collapses to the fixed
    /// date format message; any other cause is reported verbatim.
    #[must_use]
    pub fn malformed_body(cause: impl Into<String>) -> Self {
        let cause = cause.into();
        if cause.contains(DATE_FORMAT_MESSAGE) {
            Self::new(ErrorCode::MalformedBody, DATE_FORMAT_MESSAGE)
        } else {
            Self::new(ErrorCode::MalformedBody, cause)
        }
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    #[must_use]
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::Internal`].
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages.join("; "))
    }
}

impl std::error::Error for Error {}
