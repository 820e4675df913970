//! Shared harness for the HTTP integration suites.
//!
//! Assembles the public router over an [`InMemoryInvoiceStore`], the
//! in-process view cache and a [`MutableClock`], so suites can drive real
//! requests and then inspect what reached the store.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, test, web};
use chrono::{NaiveDate, TimeDelta, TimeZone, Utc};

use dashboard::Trace;
use dashboard::domain::ports::{FIXTURE_EMAIL, FIXTURE_PASSWORD, FixtureUserRepository};
use dashboard::domain::{
    CredentialsVerifier, CustomerId, Invoice, InvoiceId, InvoiceMutationService, InvoiceStatus,
    SessionAuthority,
};
use dashboard::inbound::http::routes;
use dashboard::inbound::http::state::{HttpState, HttpStatePorts};
use dashboard::outbound::cache::InMemoryViewCache;
use dashboard::test_support::{
    InMemoryInvoiceStore, MutableClock, StoredCustomer, session_cookie, test_session_middleware,
};

pub const CUSTOMER_ID: &str = "3958dc9e-712f-4377-85e9-fec4b6a6442a";
pub const OTHER_CUSTOMER_ID: &str = "3958dc9e-742f-4377-85e9-fec4b6a6442a";
pub const SESSION_TTL_MINUTES: i64 = 30;

/// Everything a suite may want to inspect after driving the app.
pub struct World {
    pub store: Arc<InMemoryInvoiceStore>,
    pub views: Arc<InMemoryViewCache>,
    pub clock: Arc<MutableClock>,
}

impl World {
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        let store = InMemoryInvoiceStore::new()
            .with_customer(StoredCustomer::new(CUSTOMER_ID, "Delba de Oliveira"))
            .with_customer(StoredCustomer::new(OTHER_CUSTOMER_ID, "Lee Robinson"))
            .with_revenue("Jan", 2000)
            .with_revenue("Feb", 1800)
            .with_revenue("Mar", 4800);
        Self {
            store: Arc::new(store),
            views: Arc::new(InMemoryViewCache::new()),
            clock: Arc::new(MutableClock::new(start)),
        }
    }

    /// Place an invoice in the store without going through the pipeline.
    pub fn seed_invoice(&self, customer: &str, amount: i32, status: InvoiceStatus) -> InvoiceId {
        let id = InvoiceId::random();
        self.store.seed_invoice(Invoice {
            id,
            customer_id: CustomerId::new(customer).expect("customer id"),
            amount,
            status,
            date: NaiveDate::from_ymd_opt(2024, 4, 20).expect("valid date"),
        });
        id
    }

    fn state(&self) -> HttpState {
        let ports = HttpStatePorts {
            login: Arc::new(CredentialsVerifier::new(Arc::new(
                FixtureUserRepository::default(),
            ))),
            invoices: Arc::new(InvoiceMutationService::new(
                self.store.clone(),
                self.views.clone(),
                self.clock.clone(),
            )),
            dashboard: self.store.clone(),
            views: self.views.clone(),
        };
        let sessions =
            SessionAuthority::new(self.clock.clone(), TimeDelta::minutes(SESSION_TTL_MINUTES));
        HttpState::new(ports, sessions)
    }

    /// The full router behind the trace and session middleware.
    pub async fn app(
        &self,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
    {
        test::init_service(
            App::new()
                .app_data(web::Data::new(self.state()))
                .configure(routes)
                .wrap(test_session_middleware())
                .wrap(Trace),
        )
        .await
    }
}

/// Submit the login form and return the response.
pub async fn login<S>(app: &S, email: &str, password: &str) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    test::call_service(
        app,
        test::TestRequest::post()
            .uri("/login")
            .set_form([("email", email), ("password", password)])
            .to_request(),
    )
    .await
}

/// Sign in with the seeded account and return the session cookie.
pub async fn signed_in<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = login(app, FIXTURE_EMAIL, FIXTURE_PASSWORD).await;
    session_cookie(&res).unwrap_or_else(|| panic!("login failed with {}", res.status()))
}

pub fn location(res: &ServiceResponse) -> Option<String> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}
