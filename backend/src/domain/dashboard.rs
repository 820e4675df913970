//! Read models served to the dashboard pages.
//!
//! Repositories return amounts in cents; the view types here carry the
//! presentation-ready values (formatted currency, major units, axis labels).

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::money::{format_currency, to_major_units};
use super::{CustomerId, InvoiceId, InvoiceStatus};

/// Number of rows shown in the latest invoices panel.
pub const LATEST_INVOICES_LIMIT: i64 = 5;
/// Amount matched by the public `/query` endpoint, in stored units.
pub const QUERY_AMOUNT: i32 = 666;

const Y_AXIS_STEP: i64 = 1000;

/// Aggregates backing the summary cards, amounts in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardTotals {
    pub invoice_count: i64,
    pub customer_count: i64,
    pub total_paid: i64,
    pub total_pending: i64,
}

/// Summary cards with currency totals formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    pub number_of_invoices: i64,
    pub number_of_customers: i64,
    pub total_paid_invoices: String,
    pub total_pending_invoices: String,
}

impl From<CardTotals> for CardData {
    fn from(totals: CardTotals) -> Self {
        Self {
            number_of_invoices: totals.invoice_count,
            number_of_customers: totals.customer_count,
            total_paid_invoices: format_currency(totals.total_paid),
            total_pending_invoices: format_currency(totals.total_pending),
        }
    }
}

/// Monthly revenue in whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Revenue {
    pub month: String,
    pub revenue: i32,
}

/// Revenue series plus the y-axis scale used to chart it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueChart {
    pub revenue: Vec<Revenue>,
    pub y_axis_labels: Vec<String>,
    pub top_label: i64,
}

impl RevenueChart {
    /// Build the chart; the axis tops out at the highest month rounded up to
    /// the next thousand and steps down to `$0K`.
    ///
    /// # Examples
    /// ```
    /// use dashboard::domain::{Revenue, RevenueChart};
    ///
    /// let chart = RevenueChart::new(vec![Revenue { month: "Jan".into(), revenue: 2400 }]);
    /// assert_eq!(chart.top_label, 3000);
    /// assert_eq!(chart.y_axis_labels, ["$3K", "$2K", "$1K", "$0K"]);
    /// ```
    pub fn new(revenue: Vec<Revenue>) -> Self {
        let highest = revenue
            .iter()
            .map(|month| i64::from(month.revenue))
            .max()
            .unwrap_or(0)
            .max(0);
        let top_label = (highest + Y_AXIS_STEP - 1) / Y_AXIS_STEP * Y_AXIS_STEP;
        let y_axis_labels = (0..=top_label / Y_AXIS_STEP)
            .rev()
            .map(|thousands| format!("${thousands}K"))
            .collect();
        Self {
            revenue,
            y_axis_labels,
            top_label,
        }
    }
}

/// Latest invoice row as stored, amount in cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestInvoiceRow {
    pub id: InvoiceId,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub amount: i32,
}

/// Latest invoice with its amount formatted as currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LatestInvoice {
    pub id: InvoiceId,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub amount: String,
}

impl From<LatestInvoiceRow> for LatestInvoice {
    fn from(row: LatestInvoiceRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            image_url: row.image_url,
            amount: format_currency(i64::from(row.amount)),
        }
    }
}

/// Invoice joined to its customer for the invoice table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub id: InvoiceId,
    pub customer_id: CustomerId,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub date: NaiveDate,
    /// Amount in cents.
    pub amount: i32,
    pub status: InvoiceStatus,
}

/// Stored invoice row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    pub id: InvoiceId,
    pub customer_id: CustomerId,
    pub amount: i32,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Invoice values used to pre-populate the edit form.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceFormData {
    pub id: InvoiceId,
    pub customer_id: CustomerId,
    /// Amount in major units.
    pub amount: f64,
    pub status: InvoiceStatus,
}

impl From<Invoice> for InvoiceFormData {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id,
            customer_id: invoice.customer_id,
            amount: to_major_units(i64::from(invoice.amount)),
            status: invoice.status,
        }
    }
}

/// Customer option for the invoice form selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CustomerField {
    pub id: CustomerId,
    pub name: String,
}

/// Row returned by the fixed-amount query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AmountMatchRow {
    pub amount: i32,
    pub name: String,
}
