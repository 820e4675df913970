//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, InvoiceId};

const INVALID_UUID: &str = "invalid_uuid";

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }
}

pub(crate) const INVOICE_ID_FIELD: FieldName = FieldName::new("id");

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let FieldName(field) = field;
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": INVALID_UUID,
    }))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

/// Parse an invoice id taken from a route segment.
pub(crate) fn parse_invoice_id(value: &str) -> Result<InvoiceId, Error> {
    parse_uuid(value, INVOICE_ID_FIELD).map(InvoiceId::from)
}
