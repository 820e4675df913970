//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports (`LoginService`, `InvoiceCommand`) are called by inbound
//! adapters; driven ports (repositories, `ViewCache`) are implemented by
//! outbound adapters. Each driven port exposes a typed error so adapters map
//! failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod dashboard_repository;
mod invoice_command;
mod invoice_repository;
mod login_service;
mod user_repository;
mod view_cache;

#[cfg(test)]
pub use dashboard_repository::MockDashboardRepository;
pub use dashboard_repository::{DashboardRepository, DashboardRepositoryError};
#[cfg(test)]
pub use invoice_command::MockInvoiceCommand;
pub use invoice_command::{FormState, InvoiceCommand, MutationOutcome, RejectionKind};
#[cfg(test)]
pub use invoice_repository::MockInvoiceRepository;
pub use invoice_repository::{InvoiceRepository, InvoiceRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use view_cache::MockViewCache;
pub use view_cache::{INVOICES_VIEW, ViewCache};

/// Stand-in adapters for tests and the `test-support` feature. The server
/// never wires these.
#[cfg(any(test, feature = "test-support"))]
pub use self::{
    dashboard_repository::FixtureDashboardRepository,
    invoice_command::FixtureInvoiceCommand,
    invoice_repository::FixtureInvoiceRepository,
    user_repository::{FIXTURE_EMAIL, FIXTURE_PASSWORD, FixtureUserRepository},
    view_cache::FixtureViewCache,
};
