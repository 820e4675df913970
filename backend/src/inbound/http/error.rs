//! HTTP adapter mapping for domain errors.
//!
//! Domain failures and repository errors become JSON bodies with a status
//! derived from the error code. Internal failures are redacted before they
//! reach the client; the trace identifier is kept so logs can be correlated.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::ports::{DashboardRepositoryError, InvoiceRepositoryError};
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    let redacted = Error::internal(REDACTED_MESSAGE);
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
        if self.code() == ErrorCode::InternalError {
            error!(trace_id = ?self.trace_id(), message = %self.message(), "internal error");
        }
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
        Error::internal(REDACTED_MESSAGE)
    }
}

impl From<DashboardRepositoryError> for Error {
    fn from(err: DashboardRepositoryError) -> Self {
        match err {
            DashboardRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("dashboard data unavailable: {message}"))
            }
            DashboardRepositoryError::Query { message } => {
                Error::internal(format!("dashboard query failed: {message}"))
            }
        }
    }
}

impl From<InvoiceRepositoryError> for Error {
    fn from(err: InvoiceRepositoryError) -> Self {
        match err {
            InvoiceRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("invoice store unavailable: {message}"))
            }
            InvoiceRepositoryError::Query { message } => {
                Error::internal(format!("invoice query failed: {message}"))
            }
        }
    }
}
