//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer together
//! with the schema wrappers from `inbound::http::schemas`, so domain types
//! stay free of documentation-only shapes. Swagger UI serves the document in
//! debug builds.

use crate::domain::{
    AmountMatchRow, CardData, CustomerField, CustomerId, InvoiceForm, InvoiceFormData, InvoiceId,
    InvoiceStatus, InvoiceSummary, LatestInvoice, Revenue, RevenueChart, Session, UserId,
};
use crate::inbound::http::auth::LoginForm;
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, FormErrorsSchema, MessageSchema, QueryErrorSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the dashboard API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Invoice dashboard API",
        description = "Session-authenticated invoice management, dashboard reads and health checks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::invoices::create_invoice,
        crate::inbound::http::invoices::update_invoice,
        crate::inbound::http::invoices::delete_invoice,
        crate::inbound::http::dashboard::cards,
        crate::inbound::http::dashboard::revenue,
        crate::inbound::http::dashboard::latest_invoices,
        crate::inbound::http::dashboard::list_invoices,
        crate::inbound::http::dashboard::get_invoice,
        crate::inbound::http::dashboard::customers,
        crate::inbound::http::query::amount_matches,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        FormErrorsSchema,
        MessageSchema,
        QueryErrorSchema,
        LoginForm,
        Session,
        UserId,
        InvoiceForm,
        InvoiceId,
        InvoiceStatus,
        CustomerId,
        CardData,
        Revenue,
        RevenueChart,
        LatestInvoice,
        InvoiceSummary,
        InvoiceFormData,
        CustomerField,
        AmountMatchRow,
    )),
    tags(
        (name = "auth", description = "Sign-in, sign-out and the active session"),
        (name = "invoices", description = "Invoice mutations and listings"),
        (name = "dashboard", description = "Dashboard summary reads"),
        (name = "query", description = "Diagnostic store query"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
