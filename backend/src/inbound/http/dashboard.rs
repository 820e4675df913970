//! Read endpoints feeding the dashboard pages.
//!
//! ```text
//! GET /api/v1/dashboard/cards
//! GET /api/v1/dashboard/revenue
//! GET /api/v1/dashboard/latest-invoices
//! GET /api/v1/invoices
//! GET /api/v1/invoices/{id}
//! GET /api/v1/customers
//! ```
//!
//! Every endpoint requires a session. Repository failures surface as the
//! standard error envelope.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, get, web};

use crate::domain::ports::INVOICES_VIEW;
use crate::domain::{
    CardData, CustomerField, Error, InvoiceFormData, InvoiceSummary, LATEST_INVOICES_LIMIT,
    LatestInvoice, RevenueChart,
};
use crate::inbound::http::cache_control::{is_fresh, private_no_cache_header, weak_etag};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_invoice_id;

/// Summary cards: counts and paid/pending totals.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/cards",
    responses(
        (status = 200, description = "Card figures", body = CardData),
        (status = 303, description = "No active session; redirect to login"),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "dashboardCards"
)]
#[get("/dashboard/cards")]
pub async fn cards(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> actix_web::Result<web::Json<CardData>> {
    session.require(&state.sessions)?;
    let totals = state.dashboard.card_totals().await.map_err(Error::from)?;
    Ok(web::Json(CardData::from(totals)))
}

/// Monthly revenue with chart axis labels.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/revenue",
    responses(
        (status = 200, description = "Revenue chart", body = RevenueChart),
        (status = 303, description = "No active session; redirect to login"),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "dashboardRevenue"
)]
#[get("/dashboard/revenue")]
pub async fn revenue(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> actix_web::Result<web::Json<RevenueChart>> {
    session.require(&state.sessions)?;
    let months = state.dashboard.revenue().await.map_err(Error::from)?;
    Ok(web::Json(RevenueChart::new(months)))
}

/// The most recent invoices with formatted amounts.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/latest-invoices",
    responses(
        (status = 200, description = "Latest invoices", body = [LatestInvoice]),
        (status = 303, description = "No active session; redirect to login"),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "dashboardLatestInvoices"
)]
#[get("/dashboard/latest-invoices")]
pub async fn latest_invoices(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> actix_web::Result<web::Json<Vec<LatestInvoice>>> {
    session.require(&state.sessions)?;
    let rows = state
        .dashboard
        .latest_invoices(LATEST_INVOICES_LIMIT)
        .await
        .map_err(Error::from)?;
    Ok(web::Json(rows.into_iter().map(LatestInvoice::from).collect()))
}

/// Invoice table, revalidated against the list view revision and its rows.
#[utoipa::path(
    get,
    path = "/api/v1/invoices",
    responses(
        (status = 200, description = "Invoices newest first", body = [InvoiceSummary],
            headers(("ETag" = String, description = "Weak tag of the list view revision and body"))),
        (status = 304, description = "List unchanged since the tag in If-None-Match"),
        (status = 303, description = "No active session; redirect to login"),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["invoices"],
    operation_id = "listInvoices"
)]
#[get("/invoices")]
pub async fn list_invoices(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
) -> actix_web::Result<HttpResponse> {
    session.require(&state.sessions)?;
    let revision = state.views.revision(INVOICES_VIEW);
    let invoices = state.dashboard.list_invoices().await.map_err(Error::from)?;
    let body = serde_json::to_vec(&invoices)
        .map_err(|err| Error::internal(format!("failed to encode invoice list: {err}")))?;
    let etag = weak_etag(revision, &body);
    if is_fresh(&req, &etag) {
        return Ok(HttpResponse::NotModified()
            .insert_header(private_no_cache_header())
            .insert_header((header::ETAG, etag))
            .finish());
    }
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .insert_header((header::ETAG, etag))
        .insert_header(header::ContentType::json())
        .body(body))
}

/// A single invoice shaped for the edit form.
#[utoipa::path(
    get,
    path = "/api/v1/invoices/{id}",
    params(("id" = String, Path, description = "Invoice identifier")),
    responses(
        (status = 200, description = "Invoice form data", body = InvoiceFormData),
        (status = 400, description = "Malformed invoice id", body = ErrorSchema),
        (status = 404, description = "Invoice not found", body = ErrorSchema),
        (status = 303, description = "No active session; redirect to login")
    ),
    tags = ["invoices"],
    operation_id = "getInvoice"
)]
#[get("/invoices/{id}")]
pub async fn get_invoice(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> actix_web::Result<web::Json<InvoiceFormData>> {
    session.require(&state.sessions)?;
    let id = parse_invoice_id(&path.into_inner())?;
    let invoice = state
        .dashboard
        .find_invoice(&id)
        .await
        .map_err(Error::from)?
        .ok_or_else(|| Error::not_found(format!("invoice {id} not found")))?;
    Ok(web::Json(InvoiceFormData::from(invoice)))
}

/// Customer options for the invoice form.
#[utoipa::path(
    get,
    path = "/api/v1/customers",
    responses(
        (status = 200, description = "Customers ordered by name", body = [CustomerField]),
        (status = 303, description = "No active session; redirect to login"),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["invoices"],
    operation_id = "listCustomers"
)]
#[get("/customers")]
pub async fn customers(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> actix_web::Result<web::Json<Vec<CustomerField>>> {
    session.require(&state.sessions)?;
    let options = state.dashboard.customers().await.map_err(Error::from)?;
    Ok(web::Json(options))
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
