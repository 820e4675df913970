//! Driving port for invoice form submissions.
//!
//! Outcomes are values, not errors: a rejected submission carries the form
//! state the page re-renders with.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{FieldErrors, InvoiceForm, InvoiceId};

/// Why a submission was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// One or more fields failed validation; nothing was written.
    Validation,
    /// The store rejected the statement.
    Persistence,
}

/// Form state returned to the page after a rejected submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FormState {
    #[serde(skip_serializing_if = "FieldErrors::is_empty")]
    #[schema(value_type = Object)]
    pub errors: FieldErrors,
    pub message: String,
    #[serde(skip)]
    pub kind: RejectionKind,
}

impl FormState {
    pub fn validation(errors: FieldErrors, message: impl Into<String>) -> Self {
        Self {
            errors,
            message: message.into(),
            kind: RejectionKind::Validation,
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self {
            errors: FieldErrors::new(),
            message: message.into(),
            kind: RejectionKind::Persistence,
        }
    }
}

/// Result of an invoice mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Written; navigate to the given path.
    Redirect(&'static str),
    /// Deleted; show the confirmation message.
    Deleted { message: String },
    /// Not written; re-render with this state.
    Rejected(FormState),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvoiceCommand: Send + Sync {
    /// Validate, normalise and insert a new invoice.
    async fn create(&self, form: InvoiceForm) -> MutationOutcome;

    /// Validate, normalise and overwrite invoice `id`.
    async fn update(&self, id: InvoiceId, form: InvoiceForm) -> MutationOutcome;

    /// Remove invoice `id`.
    async fn delete(&self, id: InvoiceId) -> MutationOutcome;
}

/// Fixture command that accepts every submission without writing.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureInvoiceCommand;

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl InvoiceCommand for FixtureInvoiceCommand {
    async fn create(&self, _form: InvoiceForm) -> MutationOutcome {
        MutationOutcome::Redirect(super::INVOICES_VIEW)
    }

    async fn update(&self, _id: InvoiceId, _form: InvoiceForm) -> MutationOutcome {
        MutationOutcome::Redirect(super::INVOICES_VIEW)
    }

    async fn delete(&self, _id: InvoiceId) -> MutationOutcome {
        MutationOutcome::Deleted {
            message: "Invoice deleted successfully.".to_owned(),
        }
    }
}
