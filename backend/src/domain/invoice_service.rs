//! Invoice mutation pipeline: validate, normalise, persist, invalidate,
//! redirect.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::ports::{
    FormState, INVOICES_VIEW, InvoiceCommand, InvoiceRepository, MutationOutcome, ViewCache,
};
use crate::domain::{InvoiceDraft, InvoiceForm, InvoiceId, ValidInvoice};

const CREATE_INVALID: &str = "Missing or invalid fields. Failed to create invoice.";
const UPDATE_INVALID: &str = "Missing or invalid fields. Failed to update invoice.";
const CREATE_FAILED: &str = "Database error. Could not create invoice.";
const UPDATE_FAILED: &str = "Database error. Could not update invoice.";
const DELETE_FAILED: &str = "Database error. Failed to delete invoice.";
const DELETED: &str = "Invoice deleted successfully.";

/// [`InvoiceCommand`] implementation over an invoice repository and a view
/// cache.
#[derive(Clone)]
pub struct InvoiceMutationService<R, C> {
    invoices: Arc<R>,
    views: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<R, C> InvoiceMutationService<R, C> {
    /// Create the service. `clock` supplies the invoice date.
    pub fn new(invoices: Arc<R>, views: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            invoices,
            views,
            clock,
        }
    }
}

impl<R, C> InvoiceMutationService<R, C>
where
    R: InvoiceRepository,
    C: ViewCache,
{
    fn draft(&self, form: &InvoiceForm, summary: &str) -> Result<InvoiceDraft, MutationOutcome> {
        let valid = ValidInvoice::from_form(form)
            .map_err(|errors| MutationOutcome::Rejected(FormState::validation(errors, summary)))?;
        Ok(InvoiceDraft::new(valid, self.clock.utc().date_naive()))
    }

    fn written(&self) -> MutationOutcome {
        self.views.invalidate(INVOICES_VIEW);
        MutationOutcome::Redirect(INVOICES_VIEW)
    }
}

#[async_trait]
impl<R, C> InvoiceCommand for InvoiceMutationService<R, C>
where
    R: InvoiceRepository,
    C: ViewCache,
{
    async fn create(&self, form: InvoiceForm) -> MutationOutcome {
        let draft = match self.draft(&form, CREATE_INVALID) {
            Ok(draft) => draft,
            Err(rejected) => return rejected,
        };

        match self.invoices.insert(&draft).await {
            Ok(id) => {
                info!(invoice_id = %id, "invoice created");
                self.written()
            }
            Err(err) => {
                error!(error = %err, "invoice insert failed");
                MutationOutcome::Rejected(FormState::persistence(CREATE_FAILED))
            }
        }
    }

    async fn update(&self, id: InvoiceId, form: InvoiceForm) -> MutationOutcome {
        let draft = match self.draft(&form, UPDATE_INVALID) {
            Ok(draft) => draft,
            Err(rejected) => return rejected,
        };

        match self.invoices.update(&id, &draft).await {
            Ok(0) => {
                warn!(invoice_id = %id, "invoice update matched no rows");
                self.written()
            }
            Ok(_) => {
                info!(invoice_id = %id, "invoice updated");
                self.written()
            }
            Err(err) => {
                error!(invoice_id = %id, error = %err, "invoice update failed");
                MutationOutcome::Rejected(FormState::persistence(UPDATE_FAILED))
            }
        }
    }

    async fn delete(&self, id: InvoiceId) -> MutationOutcome {
        match self.invoices.delete(&id).await {
            Ok(rows) => {
                if rows == 0 {
                    warn!(invoice_id = %id, "invoice delete matched no rows");
                } else {
                    info!(invoice_id = %id, "invoice deleted");
                }
                self.views.invalidate(INVOICES_VIEW);
                MutationOutcome::Deleted {
                    message: DELETED.to_owned(),
                }
            }
            Err(err) => {
                error!(invoice_id = %id, error = %err, "invoice delete failed");
                MutationOutcome::Rejected(FormState::persistence(DELETE_FAILED))
            }
        }
    }
}

#[cfg(test)]
#[path = "invoice_service_tests.rs"]
mod tests;
