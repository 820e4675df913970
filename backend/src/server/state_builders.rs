//! Builders wiring the Diesel adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use dashboard::domain::{CredentialsVerifier, InvoiceMutationService, SessionAuthority};
use dashboard::inbound::http::state::{HttpState, HttpStatePorts};
use dashboard::outbound::cache::InMemoryViewCache;
use dashboard::outbound::persistence::{
    DbPool, DieselDashboardRepository, DieselInvoiceRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Store-backed ports over one pool.
///
/// `views` is shared so invalidations by the mutation service are visible to
/// the list endpoint.
fn store_ports(pool: &DbPool, views: Arc<InMemoryViewCache>) -> HttpStatePorts {
    let clock = Arc::new(DefaultClock);
    HttpStatePorts {
        login: Arc::new(CredentialsVerifier::new(Arc::new(
            DieselUserRepository::new(pool.clone()),
        ))),
        invoices: Arc::new(InvoiceMutationService::new(
            Arc::new(DieselInvoiceRepository::new(pool.clone())),
            views.clone(),
            clock,
        )),
        dashboard: Arc::new(DieselDashboardRepository::new(pool.clone())),
        views,
    }
}

/// Build the shared HTTP state from the configured pool.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = store_ports(&config.db_pool, Arc::new(InMemoryViewCache::new()));
    let sessions = SessionAuthority::new(Arc::new(DefaultClock), config.session_ttl);
    web::Data::new(HttpState::new(ports, sessions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use actix_web::cookie::{Key, SameSite};
    use chrono::TimeDelta;
    use dashboard::domain::ports::{INVOICES_VIEW, LoginService, ViewCache};
    use dashboard::inbound::http::session_config::SessionSettings;
    use dashboard::outbound::persistence::PoolConfig;
    use rstest::rstest;

    // Nothing listens on port 1, so every checkout fails fast.
    async fn unreachable_pool() -> DbPool {
        DbPool::new(
            PoolConfig::new("postgres://user@127.0.0.1:1/dashboard")
                .with_connection_timeout(Duration::from_millis(200)),
        )
        .await
        .expect("pool builds lazily")
    }

    fn config(pool: DbPool) -> ServerConfig {
        let settings = SessionSettings {
            key: Key::generate(),
            cookie_secure: true,
            same_site: SameSite::Lax,
            ttl: TimeDelta::minutes(15),
        };
        ServerConfig::new(
            settings,
            "127.0.0.1:0".parse().expect("socket address"),
            pool,
        )
    }

    #[rstest]
    #[tokio::test]
    async fn session_ttl_follows_configuration() {
        let state = build_http_state(&config(unreachable_pool().await));
        assert_eq!(state.sessions.ttl(), TimeDelta::minutes(15));
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_store_rejects_every_login() {
        let state = build_http_state(&config(unreachable_pool().await));
        let outcome = state.login.verify("user@nextmail.com", "123456").await;
        assert!(outcome.is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn view_cache_is_shared_with_the_ports() {
        let views = Arc::new(InMemoryViewCache::new());
        let ports = store_ports(&unreachable_pool().await, views.clone());
        views.invalidate(INVOICES_VIEW);
        assert_eq!(ports.views.revision(INVOICES_VIEW), 1);
    }
}
