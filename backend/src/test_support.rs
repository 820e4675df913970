//! Test utilities for the dashboard crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and when the `test-support` feature is enabled.

use std::sync::{Mutex, MutexGuard, PoisonError};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ports::{
    DashboardRepository, DashboardRepositoryError, InvoiceRepository, InvoiceRepositoryError,
};
use crate::domain::{
    AmountMatchRow, CardTotals, CustomerField, CustomerId, Invoice, InvoiceDraft, InvoiceId,
    InvoiceStatus, InvoiceSummary, LatestInvoiceRow, Revenue,
};

/// Clock whose current time only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Cookie session middleware with a throwaway key and `Secure` disabled so
/// plain HTTP test requests keep the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set on `res`, if any.
pub fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Customer seeded into an [`InMemoryInvoiceStore`].
#[derive(Debug, Clone)]
pub struct StoredCustomer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

impl StoredCustomer {
    pub fn new(id: &str, name: &str) -> Self {
        let id = CustomerId::new(id).unwrap_or_else(|| panic!("blank customer id"));
        let slug = name.to_ascii_lowercase().replace(' ', "-");
        Self {
            id,
            name: name.to_owned(),
            email: format!("{slug}@example.com"),
            image_url: format!("/customers/{slug}.png"),
        }
    }
}

#[derive(Default)]
struct StoreState {
    customers: Vec<StoredCustomer>,
    invoices: Vec<Invoice>,
    revenue: Vec<Revenue>,
    statements: usize,
    failing: bool,
}

/// In-memory invoice store implementing both the write and the read port.
///
/// Counts every statement it executes so tests can assert that rejected
/// input never reaches the store. `fail_with_query_errors` makes every call
/// fail as a broken statement would.
#[derive(Default)]
pub struct InMemoryInvoiceStore {
    state: Mutex<StoreState>,
}

impl InMemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_customer(self, customer: StoredCustomer) -> Self {
        self.lock().customers.push(customer);
        self
    }

    #[must_use]
    pub fn with_revenue(self, month: &str, revenue: i32) -> Self {
        self.lock().revenue.push(Revenue {
            month: month.to_owned(),
            revenue,
        });
        self
    }

    /// Seed an invoice directly, bypassing the statement counter.
    pub fn seed_invoice(&self, invoice: Invoice) {
        self.lock().invoices.push(invoice);
    }

    pub fn invoices(&self) -> Vec<Invoice> {
        self.lock().invoices.clone()
    }

    pub fn statements(&self) -> usize {
        self.lock().statements
    }

    pub fn fail_with_query_errors(&self) {
        self.lock().failing = true;
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn statement(&self) -> Result<MutexGuard<'_, StoreState>, String> {
        let mut state = self.lock();
        state.statements += 1;
        if state.failing {
            return Err("statement failed".to_owned());
        }
        Ok(state)
    }
}

impl StoreState {
    fn customer(&self, id: &CustomerId) -> Option<&StoredCustomer> {
        self.customers.iter().find(|customer| &customer.id == id)
    }

    fn newest_first(&self) -> Vec<&Invoice> {
        let mut invoices: Vec<&Invoice> = self.invoices.iter().collect();
        invoices.sort_by(|a, b| b.date.cmp(&a.date));
        invoices
    }

    fn total(&self, status: InvoiceStatus) -> i64 {
        self.invoices
            .iter()
            .filter(|invoice| invoice.status == status)
            .map(|invoice| i64::from(invoice.amount))
            .sum()
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceStore {
    async fn insert(&self, draft: &InvoiceDraft) -> Result<InvoiceId, InvoiceRepositoryError> {
        let mut state = self.statement().map_err(InvoiceRepositoryError::query)?;
        let id = InvoiceId::random();
        state.invoices.push(Invoice {
            id,
            customer_id: draft.customer_id.clone(),
            amount: draft.amount.get(),
            status: draft.status,
            date: draft.date,
        });
        Ok(id)
    }

    async fn update(
        &self,
        id: &InvoiceId,
        draft: &InvoiceDraft,
    ) -> Result<usize, InvoiceRepositoryError> {
        let mut state = self.statement().map_err(InvoiceRepositoryError::query)?;
        let Some(invoice) = state.invoices.iter_mut().find(|invoice| &invoice.id == id) else {
            return Ok(0);
        };
        invoice.customer_id = draft.customer_id.clone();
        invoice.amount = draft.amount.get();
        invoice.status = draft.status;
        invoice.date = draft.date;
        Ok(1)
    }

    async fn delete(&self, id: &InvoiceId) -> Result<usize, InvoiceRepositoryError> {
        let mut state = self.statement().map_err(InvoiceRepositoryError::query)?;
        let before = state.invoices.len();
        state.invoices.retain(|invoice| &invoice.id != id);
        Ok(before - state.invoices.len())
    }
}

#[async_trait]
impl DashboardRepository for InMemoryInvoiceStore {
    async fn card_totals(&self) -> Result<CardTotals, DashboardRepositoryError> {
        let state = self.statement().map_err(DashboardRepositoryError::query)?;
        Ok(CardTotals {
            invoice_count: state.invoices.len() as i64,
            customer_count: state.customers.len() as i64,
            total_paid: state.total(InvoiceStatus::Paid),
            total_pending: state.total(InvoiceStatus::Pending),
        })
    }

    async fn revenue(&self) -> Result<Vec<Revenue>, DashboardRepositoryError> {
        let state = self.statement().map_err(DashboardRepositoryError::query)?;
        Ok(state.revenue.clone())
    }

    async fn latest_invoices(
        &self,
        limit: i64,
    ) -> Result<Vec<LatestInvoiceRow>, DashboardRepositoryError> {
        let state = self.statement().map_err(DashboardRepositoryError::query)?;
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(state
            .newest_first()
            .into_iter()
            .filter_map(|invoice| {
                let customer = state.customer(&invoice.customer_id)?;
                Some(LatestInvoiceRow {
                    id: invoice.id,
                    name: customer.name.clone(),
                    email: customer.email.clone(),
                    image_url: customer.image_url.clone(),
                    amount: invoice.amount,
                })
            })
            .take(limit)
            .collect())
    }

    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, DashboardRepositoryError> {
        let state = self.statement().map_err(DashboardRepositoryError::query)?;
        Ok(state
            .newest_first()
            .into_iter()
            .filter_map(|invoice| {
                let customer = state.customer(&invoice.customer_id)?;
                Some(InvoiceSummary {
                    id: invoice.id,
                    customer_id: invoice.customer_id.clone(),
                    name: customer.name.clone(),
                    email: customer.email.clone(),
                    image_url: customer.image_url.clone(),
                    date: invoice.date,
                    amount: invoice.amount,
                    status: invoice.status,
                })
            })
            .collect())
    }

    async fn find_invoice(
        &self,
        id: &InvoiceId,
    ) -> Result<Option<Invoice>, DashboardRepositoryError> {
        let state = self.statement().map_err(DashboardRepositoryError::query)?;
        Ok(state
            .invoices
            .iter()
            .find(|invoice| &invoice.id == id)
            .cloned())
    }

    async fn customers(&self) -> Result<Vec<CustomerField>, DashboardRepositoryError> {
        let state = self.statement().map_err(DashboardRepositoryError::query)?;
        let mut customers: Vec<CustomerField> = state
            .customers
            .iter()
            .map(|customer| CustomerField {
                id: customer.id.clone(),
                name: customer.name.clone(),
            })
            .collect();
        customers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(customers)
    }

    async fn invoices_with_amount(
        &self,
        amount: i32,
    ) -> Result<Vec<AmountMatchRow>, DashboardRepositoryError> {
        let state = self.statement().map_err(DashboardRepositoryError::query)?;
        Ok(state
            .invoices
            .iter()
            .filter(|invoice| invoice.amount == amount)
            .filter_map(|invoice| {
                state.customer(&invoice.customer_id).map(|customer| AmountMatchRow {
                    amount: invoice.amount,
                    name: customer.name.clone(),
                })
            })
            .collect())
    }
}
