//! HTTP presentation of domain errors.
//!
//! Two presentations exist. Failures the visitor can act on (duplicate
//! e-mail, bad credentials, no stock) replace the page with a short text
//! line and a `200`; everything else becomes a JSON envelope whose status
//! follows the [`ErrorCode`].

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header::ContentType};
use tracing::error;

use crate::domain::{ApiResult, Error, ErrorCode, TRACE_ID_HEADER};

/// Prefix placed in front of inline failure messages.
pub const INLINE_FAILURE_PREFIX: &str = "❌ ";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict | ErrorCode::VaccineUnavailable => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    let redacted = Error::internal("Internal server error");
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

/// Whether `code` is answered inline rather than with an error status.
pub fn is_inline(code: ErrorCode) -> bool {
    matches!(
        code,
        ErrorCode::Conflict | ErrorCode::Unauthorized | ErrorCode::VaccineUnavailable
    )
}

/// Replace the page with the failure message when the visitor can act on it.
///
/// Any other error is passed through for the JSON envelope.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use vaccine_portal::domain::Error;
/// use vaccine_portal::inbound::http::error::inline_failure;
///
/// let page = inline_failure(Error::vaccine_unavailable("Vaccine not available.")).unwrap();
/// assert_eq!(page.status(), StatusCode::OK);
///
/// assert!(inline_failure(Error::invalid_request("bad date")).is_err());
/// ```
pub fn inline_failure(error: Error) -> ApiResult<HttpResponse> {
    if !is_inline(error.code()) {
        return Err(error);
    }
    let mut builder = HttpResponse::Ok();
    builder.content_type(ContentType::plaintext());
    if let Some(id) = error.trace_id() {
        builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
    }
    Ok(builder.body(format!("{INLINE_FAILURE_PREFIX}{}", error.message())))
}
