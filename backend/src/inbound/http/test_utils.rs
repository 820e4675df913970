//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};

use crate::domain::ports::{
    FixtureDashboardRepository, FixtureInvoiceCommand, FixtureUserRepository, FixtureViewCache,
};
use crate::domain::{CredentialsVerifier, SessionAuthority};
use crate::inbound::http::routes;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
pub use crate::test_support::{session_cookie, test_session_middleware};

/// Fixture-backed ports; tests swap in mocks field by field.
pub fn fixture_ports() -> HttpStatePorts {
    HttpStatePorts {
        login: Arc::new(CredentialsVerifier::new(Arc::new(
            FixtureUserRepository::default(),
        ))),
        invoices: Arc::new(FixtureInvoiceCommand),
        dashboard: Arc::new(FixtureDashboardRepository),
        views: Arc::new(FixtureViewCache),
    }
}

/// Full router over `ports` behind a test session middleware.
pub async fn test_app(
    ports: HttpStatePorts,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let state = HttpState::new(ports, SessionAuthority::default());
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .configure(routes),
    )
    .await
}

/// Sign in through `POST /login` with the fixture account and return the
/// session cookie.
pub async fn signed_in_cookie<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/login")
            .set_form([
                ("email", crate::domain::ports::FIXTURE_EMAIL),
                ("password", crate::domain::ports::FIXTURE_PASSWORD),
            ])
            .to_request(),
    )
    .await;
    session_cookie(&res).unwrap_or_else(|| panic!("login failed with {}", res.status()))
}
