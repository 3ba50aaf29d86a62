//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while turning every
//! failure, including extractor failures, into the same
//! `{"localDateTime": ..., "errors": [...]}` body and a status derived from
//! its [`ErrorCode`].

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER, TraceId};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const INTERNAL_MESSAGE: &str = "Internal server error";
const UNAVAILABLE_MESSAGE: &str = "Service temporarily unavailable";

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDto {
    /// Server-local time the error payload was created.
    #[schema(value_type = String, example = "2024-06-15T12:00:00.123456")]
    pub local_date_time: NaiveDateTime,
    /// Human-readable messages, never empty.
    #[schema(example = json!(["User with this id not found!"]))]
    pub errors: Vec<String>,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidArgument | ErrorCode::FieldValidation | ErrorCode::MalformedBody => {
            StatusCode::BAD_REQUEST
        }
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn public_messages(error: &Error) -> Vec<String> {
    match error.code() {
        ErrorCode::Internal => vec![INTERNAL_MESSAGE.to_owned()],
        ErrorCode::ServiceUnavailable => vec![UNAVAILABLE_MESSAGE.to_owned()],
        _ => error.messages().to_vec(),
    }
}

/// Map a domain error to its HTTP status and response body.
///
/// Store failures are redacted: clients never see driver or query detail.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use chrono::NaiveDate;
/// use user_registry::domain::Error;
/// use user_registry::inbound::http::error::error_payload;
///
/// let at = NaiveDate::from_ymd_opt(2024, 6, 15)
///     .and_then(|d| d.and_hms_opt(12, 0, 0))
///     .expect("valid timestamp");
/// let (status, body) = error_payload(&Error::not_found("User with this id not found!"), at);
/// assert_eq!(status, StatusCode::NOT_FOUND);
/// assert_eq!(body.errors, ["User with this id not found!"]);
/// ```
#[must_use]
pub fn error_payload(error: &Error, timestamp: NaiveDateTime) -> (StatusCode, ErrorDto) {
    (
        status_for(error.code()),
        ErrorDto {
            local_date_time: timestamp,
            errors: public_messages(error),
        },
    )
}

fn log_error(error: &Error) {
    let trace_id = error
        .trace_id()
        .or_else(TraceId::current)
        .map(|id| id.to_string());
    match error.code() {
        ErrorCode::Internal => error!(trace_id = ?trace_id, %error, "internal error"),
        ErrorCode::ServiceUnavailable => {
            warn!(trace_id = ?trace_id, %error, "backing store unavailable");
        }
        _ => {}
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        log_error(self);
        let (status, body) = error_payload(self, Local::now().naive_local());
        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_string()));
        }
        builder.json(body)
    }
}

/// Route JSON body failures into [`ErrorCode::MalformedBody`].
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let cause = match err {
        JsonPayloadError::Deserialize(inner) => inner.to_string(),
        other => other.to_string(),
    };
    Error::malformed_body(cause).into()
}

/// Route query string failures into [`ErrorCode::InvalidArgument`].
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match err {
        QueryPayloadError::Deserialize(inner) => inner.to_string(),
        other => other.to_string(),
    };
    Error::invalid_argument(message).into()
}

/// Route path segment failures into [`ErrorCode::InvalidArgument`].
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let message = match err {
        PathError::Deserialize(inner) => inner.to_string(),
        other => other.to_string(),
    };
    Error::invalid_argument(message).into()
}

#[cfg(test)]
mod tests {
    //! Tests for HTTP error mapping.

    use super::*;
    use crate::domain::FieldViolation;
    use actix_web::body::to_bytes;
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    #[fixture]
    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .and_then(|d| d.and_hms_micro_opt(12, 30, 5, 250))
            .expect("valid timestamp")
    }

    #[rstest]
    #[case(Error::not_found("User not found with ID: 3"), StatusCode::NOT_FOUND, "User not found with ID: 3")]
    #[case(Error::invalid_argument("From date must be less than To date"), StatusCode::BAD_REQUEST, "From date must be less than To date")]
    #[case(Error::malformed_body("expected value at line 1 column 1"), StatusCode::BAD_REQUEST, "expected value at line 1 column 1")]
    #[case(Error::service_unavailable("connection refused on 10.0.0.5"), StatusCode::SERVICE_UNAVAILABLE, UNAVAILABLE_MESSAGE)]
    #[case(Error::internal("relation users does not exist"), StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE)]
    fn single_message_errors_map_to_status_and_body(
        timestamp: NaiveDateTime,
        #[case] error: Error,
        #[case] status: StatusCode,
        #[case] message: &str,
    ) {
        let (actual_status, body) = error_payload(&error, timestamp);
        assert_eq!(actual_status, status);
        assert_eq!(body.errors, [message]);
        assert_eq!(body.local_date_time, timestamp);
    }

    #[rstest]
    fn field_violations_keep_every_message(timestamp: NaiveDateTime) {
        let error = Error::field_validation(
            FieldViolation::new("email", "must not be blank"),
            [FieldViolation::new("birthDate", "must not be null")],
        );
        let (status, body) = error_payload(&error, timestamp);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body.errors,
            [
                "Field name email must not be blank",
                "Field name birthDate must not be null"
            ]
        );
    }

    #[rstest]
    fn payload_serialises_with_wire_names(timestamp: NaiveDateTime) {
        let (_, body) = error_payload(&Error::not_found("gone"), timestamp);
        let value = serde_json::to_value(&body).expect("serialises");
        assert_eq!(
            value,
            serde_json::json!({
                "localDateTime": "2024-06-15T12:30:05.000250",
                "errors": ["gone"],
            })
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn error_response_carries_trace_header_and_redacted_body() {
        let trace_id = TraceId::generate();
        let error = TraceId::scope(trace_id, async { Error::internal("secret detail") }).await;
        let response = ResponseError::error_response(&error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|v| v.to_str().ok()),
            Some(trace_id.to_string().as_str())
        );
        let bytes = to_bytes(response.into_body())
            .await
            .expect("reading response body succeeds");
        let body: ErrorDto = serde_json::from_slice(&bytes).expect("error body");
        assert_eq!(body.errors, [INTERNAL_MESSAGE]);
    }

    #[rstest]
    fn error_without_trace_id_omits_header() {
        let response = ResponseError::error_response(&Error::not_found("gone"));
        assert!(response.headers().get(TRACE_ID_HEADER).is_none());
    }
}
