//! PostgreSQL-backed invoice writes. One statement per call, no transactions.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{InvoiceRepository, InvoiceRepositoryError};
use crate::domain::{InvoiceDraft, InvoiceId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{InvoiceChangeset, NewInvoiceRow};
use super::pool::DbPool;
use super::schema::invoices;

/// Diesel implementation of [`InvoiceRepository`].
#[derive(Clone)]
pub struct DieselInvoiceRepository {
    pool: DbPool,
}

impl DieselInvoiceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: diesel::result::Error, operation: &'static str) -> InvoiceRepositoryError {
    map_basic_diesel_error(
        error,
        operation,
        InvoiceRepositoryError::query,
        InvoiceRepositoryError::connection,
    )
}

/// The store keys customers by UUID; any other id cannot reference a row.
fn customer_uuid(draft: &InvoiceDraft) -> Result<Uuid, InvoiceRepositoryError> {
    let raw = draft.customer_id.as_str();
    Uuid::parse_str(raw)
        .map_err(|_| InvoiceRepositoryError::query(format!("customer id '{raw}' is not a uuid")))
}

fn changeset(draft: &InvoiceDraft) -> Result<InvoiceChangeset<'_>, InvoiceRepositoryError> {
    Ok(InvoiceChangeset {
        customer_id: customer_uuid(draft)?,
        amount: draft.amount.get(),
        status: draft.status.as_str(),
        date: draft.date,
    })
}

#[async_trait]
impl InvoiceRepository for DieselInvoiceRepository {
    async fn insert(&self, draft: &InvoiceDraft) -> Result<InvoiceId, InvoiceRepositoryError> {
        let customer_id = customer_uuid(draft)?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, InvoiceRepositoryError::connection))?;
        let id = Uuid::new_v4();
        let row = NewInvoiceRow {
            id,
            customer_id,
            amount: draft.amount.get(),
            status: draft.status.as_str(),
            date: draft.date,
        };
        diesel::insert_into(invoices::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "invoice insert"))?;
        Ok(InvoiceId::from(id))
    }

    async fn update(
        &self,
        id: &InvoiceId,
        draft: &InvoiceDraft,
    ) -> Result<usize, InvoiceRepositoryError> {
        let changes = changeset(draft)?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, InvoiceRepositoryError::connection))?;
        diesel::update(invoices::table.find(*id.as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "invoice update"))
    }

    async fn delete(&self, id: &InvoiceId) -> Result<usize, InvoiceRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, InvoiceRepositoryError::connection))?;
        diesel::delete(invoices::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "invoice delete"))
    }
}
