//! Invoice records and the validation applied to submitted invoice forms.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::money::Cents;

/// Form field carrying the customer reference.
pub const FIELD_CUSTOMER_ID: &str = "customerId";
/// Form field carrying the decimal amount.
pub const FIELD_AMOUNT: &str = "amount";
/// Form field carrying the status literal.
pub const FIELD_STATUS: &str = "status";

const SELECT_CUSTOMER: &str = "Please select a customer.";
const SELECT_STATUS: &str = "Please select an invoice status.";

/// Server-generated invoice identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, format = Uuid)]
pub struct InvoiceId(Uuid);

impl InvoiceId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for InvoiceId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for InvoiceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Opaque customer reference; non-empty once trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String)]
pub struct CustomerId(String);

impl CustomerId {
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for CustomerId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<CustomerId> for String {
    fn from(value: CustomerId) -> Self {
        value.0
    }
}

impl TryFrom<String> for CustomerId {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(SELECT_CUSTOMER)
    }
}

/// Invoice payment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl FromStr for InvoiceStatus {
    type Err = ();

    /// Exact, case-sensitive match on `pending` or `paid`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            _ => Err(()),
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw invoice form submission; every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceForm {
    pub customer_id: Option<String>,
    pub amount: Option<String>,
    pub status: Option<String>,
}

impl InvoiceForm {
    pub fn new(
        customer_id: impl Into<String>,
        amount: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: Some(customer_id.into()),
            amount: Some(amount.into()),
            status: Some(status.into()),
        }
    }
}

/// Per-field validation messages keyed by form field name.
pub type FieldErrors = BTreeMap<&'static str, Vec<String>>;

/// A form that passed validation, with the amount already in cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidInvoice {
    pub customer_id: CustomerId,
    pub amount: Cents,
    pub status: InvoiceStatus,
}

impl ValidInvoice {
    /// Validate every field, collecting all failures.
    ///
    /// # Examples
    /// ```
    /// use dashboard::domain::{InvoiceForm, ValidInvoice};
    ///
    /// let valid = ValidInvoice::from_form(&InvoiceForm::new("c1", "12.345", "paid")).unwrap();
    /// assert_eq!(valid.amount.get(), 1235);
    ///
    /// let errors = ValidInvoice::from_form(&InvoiceForm::new("c1", "0", "unknown")).unwrap_err();
    /// assert_eq!(errors.len(), 2);
    /// ```
    pub fn from_form(form: &InvoiceForm) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let customer_id = form.customer_id.as_deref().and_then(CustomerId::new);
        if customer_id.is_none() {
            errors
                .entry(FIELD_CUSTOMER_ID)
                .or_default()
                .push(SELECT_CUSTOMER.to_owned());
        }

        let amount = Cents::parse(form.amount.as_deref().unwrap_or_default());
        if let Err(err) = &amount {
            errors
                .entry(FIELD_AMOUNT)
                .or_default()
                .push(err.to_string());
        }

        let status = form
            .status
            .as_deref()
            .and_then(|raw| raw.parse::<InvoiceStatus>().ok());
        if status.is_none() {
            errors
                .entry(FIELD_STATUS)
                .or_default()
                .push(SELECT_STATUS.to_owned());
        }

        match (customer_id, amount, status) {
            (Some(customer_id), Ok(amount), Some(status)) => Ok(Self {
                customer_id,
                amount,
                status,
            }),
            _ => Err(errors),
        }
    }
}

/// Normalised row ready to be written: validated fields plus the date stamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDraft {
    pub customer_id: CustomerId,
    pub amount: Cents,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

impl InvoiceDraft {
    pub fn new(valid: ValidInvoice, date: NaiveDate) -> Self {
        Self {
            customer_id: valid.customer_id,
            amount: valid.amount,
            status: valid.status,
            date,
        }
    }
}
