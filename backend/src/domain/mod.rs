//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed entities behind the dashboard (users,
//! sessions, invoices, read models) and the services that implement the
//! driving ports. Nothing here depends on Actix or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - LoginCredentials / AuthError / CredentialsVerifier: login checks.
//! - Session / SessionAuthority: session claims and their lifetime.
//! - InvoiceForm / ValidInvoice / InvoiceMutationService: invoice writes.
//! - CardData / RevenueChart / LatestInvoice / InvoiceSummary: page reads.

pub mod auth;
pub mod credentials_verifier;
pub mod dashboard;
pub mod error;
pub mod invoice;
pub mod invoice_service;
pub mod money;
pub mod password;
pub mod ports;
pub mod session;
pub mod trace_id;
pub mod user;

pub use self::auth::{AuthError, LoginCredentials, LoginValidationError, PASSWORD_MIN_LENGTH};
pub use self::credentials_verifier::CredentialsVerifier;
pub use self::dashboard::{
    AmountMatchRow, CardData, CardTotals, CustomerField, Invoice, InvoiceFormData,
    InvoiceSummary, LATEST_INVOICES_LIMIT, LatestInvoice, LatestInvoiceRow, QUERY_AMOUNT,
    Revenue, RevenueChart,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::invoice::{
    CustomerId, FIELD_AMOUNT, FIELD_CUSTOMER_ID, FIELD_STATUS, FieldErrors, InvoiceDraft,
    InvoiceForm, InvoiceId, InvoiceStatus, ValidInvoice,
};
pub use self::invoice_service::InvoiceMutationService;
pub use self::money::{AmountError, Cents, format_currency, to_major_units};
pub use self::password::PasswordHash;
pub use self::session::{DEFAULT_SESSION_TTL_MINUTES, Session, SessionAuthority};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserId, UserRecord, UserValidationError};

/// Convenient result alias for fallible domain operations.
///
/// # Examples
/// ```
/// use dashboard::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<()> {
///     Err(Error::not_found("invoice not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
