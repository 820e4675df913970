//! HTTP inbound adapter: form submissions, JSON reads and the amount query.

pub mod auth;
pub mod cache_control;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod invoices;
pub mod query;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every application route. Health checks are registered by the
/// server alongside their own state.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use dashboard::inbound::http::routes;
///
/// let app = App::new().configure(routes);
/// ```
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::login)
        .service(auth::logout)
        .service(query::amount_matches)
        .service(invoices::create_invoice)
        .service(invoices::update_invoice)
        .service(invoices::delete_invoice)
        .service(
            web::scope("/api/v1")
                .service(auth::current_session)
                .service(dashboard::cards)
                .service(dashboard::revenue)
                .service(dashboard::latest_invoices)
                .service(dashboard::list_invoices)
                .service(dashboard::get_invoice)
                .service(dashboard::customers),
        );
}
