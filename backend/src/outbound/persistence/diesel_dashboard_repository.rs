//! PostgreSQL-backed dashboard reads.
//!
//! Every query is fixed in shape; only values are bound. Rows whose stored
//! status or customer id break domain invariants fail the whole read.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::dsl::sum;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{DashboardRepository, DashboardRepositoryError};
use crate::domain::{
    AmountMatchRow, CardTotals, CustomerField, CustomerId, Invoice, InvoiceId, InvoiceStatus,
    InvoiceSummary, LatestInvoiceRow, Revenue,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CustomerFieldRow, InvoiceRow, RevenueRow};
use super::pool::DbPool;
use super::schema::{customers, invoices, revenue};

/// Diesel implementation of [`DashboardRepository`].
#[derive(Clone)]
pub struct DieselDashboardRepository {
    pool: DbPool,
}

impl DieselDashboardRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(
    error: diesel::result::Error,
    operation: &'static str,
) -> DashboardRepositoryError {
    map_basic_diesel_error(
        error,
        operation,
        DashboardRepositoryError::query,
        DashboardRepositoryError::connection,
    )
}

fn map_pool_error(error: super::pool::PoolError) -> DashboardRepositoryError {
    map_basic_pool_error(error, DashboardRepositoryError::connection)
}

fn parse_status(raw: &str) -> Result<InvoiceStatus, DashboardRepositoryError> {
    raw.parse()
        .map_err(|_| DashboardRepositoryError::query(format!("unknown invoice status '{raw}'")))
}

fn parse_customer_id(raw: Uuid) -> Result<CustomerId, DashboardRepositoryError> {
    CustomerId::new(raw.to_string())
        .ok_or_else(|| DashboardRepositoryError::query("blank customer id"))
}

type SummaryTuple = (Uuid, Uuid, String, String, String, NaiveDate, i32, String);

fn summary_from_tuple(row: SummaryTuple) -> Result<InvoiceSummary, DashboardRepositoryError> {
    let (id, customer_id, name, email, image_url, date, amount, status) = row;
    Ok(InvoiceSummary {
        id: InvoiceId::from(id),
        customer_id: parse_customer_id(customer_id)?,
        name,
        email,
        image_url,
        date,
        amount,
        status: parse_status(&status)?,
    })
}

fn invoice_from_row(row: InvoiceRow) -> Result<Invoice, DashboardRepositoryError> {
    Ok(Invoice {
        id: InvoiceId::from(row.id),
        customer_id: parse_customer_id(row.customer_id)?,
        amount: row.amount,
        status: parse_status(&row.status)?,
        date: row.date,
    })
}

#[async_trait]
impl DashboardRepository for DieselDashboardRepository {
    async fn card_totals(&self) -> Result<CardTotals, DashboardRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let invoice_count: i64 = invoices::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "invoice count"))?;
        let customer_count: i64 = customers::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "customer count"))?;
        let total_paid: Option<i64> = invoices::table
            .filter(invoices::status.eq(InvoiceStatus::Paid.as_str()))
            .select(sum(invoices::amount))
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "paid total"))?;
        let total_pending: Option<i64> = invoices::table
            .filter(invoices::status.eq(InvoiceStatus::Pending.as_str()))
            .select(sum(invoices::amount))
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "pending total"))?;

        Ok(CardTotals {
            invoice_count,
            customer_count,
            total_paid: total_paid.unwrap_or(0),
            total_pending: total_pending.unwrap_or(0),
        })
    }

    async fn revenue(&self) -> Result<Vec<Revenue>, DashboardRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RevenueRow> = revenue::table
            .select(RevenueRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "revenue read"))?;
        Ok(rows
            .into_iter()
            .map(|row| Revenue {
                month: row.month,
                revenue: row.revenue,
            })
            .collect())
    }

    async fn latest_invoices(
        &self,
        limit: i64,
    ) -> Result<Vec<LatestInvoiceRow>, DashboardRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(Uuid, String, String, String, i32)> = invoices::table
            .inner_join(customers::table)
            .select((
                invoices::id,
                customers::name,
                customers::email,
                customers::image_url,
                invoices::amount,
            ))
            .order(invoices::date.desc())
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "latest invoices read"))?;
        Ok(rows
            .into_iter()
            .map(|(id, name, email, image_url, amount)| LatestInvoiceRow {
                id: InvoiceId::from(id),
                name,
                email,
                image_url,
                amount,
            })
            .collect())
    }

    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, DashboardRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<SummaryTuple> = invoices::table
            .inner_join(customers::table)
            .select((
                invoices::id,
                invoices::customer_id,
                customers::name,
                customers::email,
                customers::image_url,
                invoices::date,
                invoices::amount,
                invoices::status,
            ))
            .order(invoices::date.desc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "invoice list read"))?;
        rows.into_iter().map(summary_from_tuple).collect()
    }

    async fn find_invoice(
        &self,
        id: &InvoiceId,
    ) -> Result<Option<Invoice>, DashboardRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<InvoiceRow> = invoices::table
            .find(*id.as_uuid())
            .select(InvoiceRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "invoice read"))?;
        row.map(invoice_from_row).transpose()
    }

    async fn customers(&self) -> Result<Vec<CustomerField>, DashboardRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CustomerFieldRow> = customers::table
            .select(CustomerFieldRow::as_select())
            .order(customers::name.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "customer read"))?;
        rows.into_iter()
            .map(|row| -> Result<CustomerField, DashboardRepositoryError> {
                Ok(CustomerField {
                    id: parse_customer_id(row.id)?,
                    name: row.name,
                })
            })
            .collect()
    }

    async fn invoices_with_amount(
        &self,
        amount: i32,
    ) -> Result<Vec<AmountMatchRow>, DashboardRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(i32, String)> = invoices::table
            .inner_join(customers::table)
            .filter(invoices::amount.eq(amount))
            .select((invoices::amount, customers::name))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "amount query read"))?;
        Ok(rows
            .into_iter()
            .map(|(amount, name)| AmountMatchRow { amount, name })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const CUSTOMER: &str = "3958dc9e-712f-4377-85e9-fec4b6a6442a";

    fn invoice_row(status: &str) -> InvoiceRow {
        InvoiceRow {
            id: Uuid::nil(),
            customer_id: CUSTOMER.parse().expect("customer uuid"),
            amount: 1235,
            status: status.to_owned(),
            date: NaiveDate::from_ymd_opt(2024, 6, 30).expect("date"),
        }
    }

    #[rstest]
    fn stored_rows_convert_to_invoices() {
        let invoice = invoice_from_row(invoice_row("paid")).expect("valid row");
        assert_eq!(invoice.status, InvoiceStatus::Paid);
        assert_eq!(invoice.customer_id.as_str(), CUSTOMER);
        assert_eq!(invoice.amount, 1235);
    }

    #[rstest]
    #[case("overdue")]
    #[case("Paid")]
    #[case("")]
    fn rows_breaking_invariants_are_query_errors(#[case] status: &str) {
        let err = invoice_from_row(invoice_row(status)).expect_err("invalid row");
        assert!(matches!(err, DashboardRepositoryError::Query { .. }));
    }

    #[rstest]
    fn revenue_reads_the_stored_revenue_column() {
        let sql = diesel::debug_query::<diesel::pg::Pg, _>(
            &revenue::table.select(RevenueRow::as_select()),
        )
        .to_string();
        assert!(
            sql.contains("\"revenue\".\"month\", \"revenue\".\"revenue\""),
            "{sql}"
        );
    }
}
