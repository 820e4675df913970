//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle through `actix_web::web::Data` and depend
//! only on domain ports, so they can be exercised without a database.

use std::sync::Arc;

use crate::domain::SessionAuthority;
use crate::domain::ports::{DashboardRepository, InvoiceCommand, LoginService, ViewCache};

/// Parameter object bundling the port implementations used by handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub invoices: Arc<dyn InvoiceCommand>,
    pub dashboard: Arc<dyn DashboardRepository>,
    pub views: Arc<dyn ViewCache>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub invoices: Arc<dyn InvoiceCommand>,
    pub dashboard: Arc<dyn DashboardRepository>,
    pub views: Arc<dyn ViewCache>,
    pub sessions: SessionAuthority,
}

impl HttpState {
    /// Construct state from a ports bundle and the session authority.
    pub fn new(ports: HttpStatePorts, sessions: SessionAuthority) -> Self {
        let HttpStatePorts {
            login,
            invoices,
            dashboard,
            views,
        } = ports;
        Self {
            login,
            invoices,
            dashboard,
            views,
            sessions,
        }
    }
}
