//! Internal Diesel row structs.
//!
//! Rows never leave the persistence layer; repositories convert them into
//! domain types and reject rows that break domain invariants.

use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{customers, invoices, revenue, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = invoices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct InvoiceRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: i32,
    pub status: String,
    pub date: NaiveDate,
}

/// Insertable invoice; the id is generated by the adapter.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = invoices)]
pub(crate) struct NewInvoiceRow<'a> {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: i32,
    pub status: &'a str,
    pub date: NaiveDate,
}

/// Full-row overwrite of the mutable invoice columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = invoices)]
pub(crate) struct InvoiceChangeset<'a> {
    pub customer_id: Uuid,
    pub amount: i32,
    pub status: &'a str,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = revenue)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RevenueRow {
    pub month: String,
    #[diesel(column_name = amount)]
    pub revenue: i32,
}

/// Customer option; only the columns the form needs.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CustomerFieldRow {
    pub id: Uuid,
    pub name: String,
}
