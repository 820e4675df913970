//! Driven port for the fixed-shape dashboard read queries.

use async_trait::async_trait;

use crate::domain::{
    AmountMatchRow, CardTotals, CustomerField, Invoice, InvoiceId, InvoiceSummary,
    LatestInvoiceRow, Revenue,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by dashboard read adapters.
    pub enum DashboardRepositoryError => "dashboard repository";
}

/// Port for dashboard page data. Every method runs one parameterised query.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Invoice and customer counts plus paid/pending totals in cents.
    async fn card_totals(&self) -> Result<CardTotals, DashboardRepositoryError>;

    /// Every revenue month in stored order.
    async fn revenue(&self) -> Result<Vec<Revenue>, DashboardRepositoryError>;

    /// Most recent invoices by date, at most `limit`.
    async fn latest_invoices(
        &self,
        limit: i64,
    ) -> Result<Vec<LatestInvoiceRow>, DashboardRepositoryError>;

    /// All invoices joined to their customer, newest first.
    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, DashboardRepositoryError>;

    /// A single invoice by id.
    async fn find_invoice(&self, id: &InvoiceId)
    -> Result<Option<Invoice>, DashboardRepositoryError>;

    /// Customer id/name pairs ordered by name.
    async fn customers(&self) -> Result<Vec<CustomerField>, DashboardRepositoryError>;

    /// Invoices whose amount equals `amount`, with the customer name.
    async fn invoices_with_amount(
        &self,
        amount: i32,
    ) -> Result<Vec<AmountMatchRow>, DashboardRepositoryError>;
}

/// Fixture implementation returning empty data sets.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDashboardRepository;

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl DashboardRepository for FixtureDashboardRepository {
    async fn card_totals(&self) -> Result<CardTotals, DashboardRepositoryError> {
        Ok(CardTotals::default())
    }

    async fn revenue(&self) -> Result<Vec<Revenue>, DashboardRepositoryError> {
        Ok(Vec::new())
    }

    async fn latest_invoices(
        &self,
        _limit: i64,
    ) -> Result<Vec<LatestInvoiceRow>, DashboardRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, DashboardRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_invoice(
        &self,
        _id: &InvoiceId,
    ) -> Result<Option<Invoice>, DashboardRepositoryError> {
        Ok(None)
    }

    async fn customers(&self) -> Result<Vec<CustomerField>, DashboardRepositoryError> {
        Ok(Vec::new())
    }

    async fn invoices_with_amount(
        &self,
        _amount: i32,
    ) -> Result<Vec<AmountMatchRow>, DashboardRepositoryError> {
        Ok(Vec::new())
    }
}
