//! PostgreSQL persistence adapters using Diesel and `diesel-async`.
//!
//! Adapters translate between Diesel rows and domain types and map driver
//! failures onto each port's `Connection`/`Query` error variants. Rows and
//! schema definitions stay private to this module.

mod diesel_basic_error_mapping;
mod diesel_dashboard_repository;
mod diesel_invoice_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_dashboard_repository::DieselDashboardRepository;
pub use diesel_invoice_repository::DieselInvoiceRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
