//! Invoice form submissions.
//!
//! ```text
//! POST /dashboard/invoices              customerId=...&amount=12.30&status=paid
//! POST /dashboard/invoices/{id}/edit    customerId=...&amount=12.30&status=paid
//! POST /dashboard/invoices/{id}/delete
//! ```
//!
//! Handlers translate the [`MutationOutcome`] of the command port into a
//! redirect or a JSON body; rejected submissions are ordinary responses, not
//! errors.
//!
//! Form bodies are extracted as a `Result` so the session is checked before a
//! malformed body is reported.

use actix_web::http::header;
use actix_web::{HttpResponse, post, web};
use serde_json::json;

use crate::domain::{Error, InvoiceForm};
use crate::domain::ports::{FormState, MutationOutcome, RejectionKind};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_invoice_id;

fn render(outcome: MutationOutcome) -> HttpResponse {
    match outcome {
        MutationOutcome::Redirect(location) => HttpResponse::SeeOther()
            .insert_header((header::LOCATION, location))
            .finish(),
        MutationOutcome::Deleted { message } => HttpResponse::Ok().json(json!({ "message": message })),
        MutationOutcome::Rejected(state) => render_rejection(&state),
    }
}

fn render_rejection(state: &FormState) -> HttpResponse {
    match state.kind {
        RejectionKind::Validation => HttpResponse::UnprocessableEntity().json(state),
        RejectionKind::Persistence => HttpResponse::InternalServerError().json(state),
    }
}

fn malformed_form(err: actix_web::Error) -> Error {
    Error::invalid_request(format!("malformed form body: {err}"))
}

/// Create an invoice from a form submission.
#[utoipa::path(
    post,
    path = "/dashboard/invoices",
    request_body(content = InvoiceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; redirect to the invoice list"),
        (status = 400, description = "Malformed form body", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 422, description = "Invalid fields", body = crate::inbound::http::schemas::FormErrorsSchema),
        (status = 500, description = "Store failure", body = crate::inbound::http::schemas::MessageSchema)
    ),
    tags = ["invoices"],
    operation_id = "createInvoice"
)]
#[post("/dashboard/invoices")]
pub async fn create_invoice(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: actix_web::Result<web::Form<InvoiceForm>>,
) -> actix_web::Result<HttpResponse> {
    session.require(&state.sessions)?;
    let form = form.map_err(malformed_form)?.into_inner();
    Ok(render(state.invoices.create(form).await))
}

/// Overwrite an invoice from a form submission.
#[utoipa::path(
    post,
    path = "/dashboard/invoices/{id}/edit",
    params(("id" = String, Path, description = "Invoice identifier")),
    request_body(content = InvoiceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirect to the invoice list"),
        (status = 400, description = "Malformed invoice id or form body", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 422, description = "Invalid fields", body = crate::inbound::http::schemas::FormErrorsSchema),
        (status = 500, description = "Store failure", body = crate::inbound::http::schemas::MessageSchema)
    ),
    tags = ["invoices"],
    operation_id = "updateInvoice"
)]
#[post("/dashboard/invoices/{id}/edit")]
pub async fn update_invoice(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    form: actix_web::Result<web::Form<InvoiceForm>>,
) -> actix_web::Result<HttpResponse> {
    session.require(&state.sessions)?;
    let id = parse_invoice_id(&path.into_inner())?;
    let form = form.map_err(malformed_form)?.into_inner();
    Ok(render(state.invoices.update(id, form).await))
}

/// Delete an invoice.
#[utoipa::path(
    post,
    path = "/dashboard/invoices/{id}/delete",
    params(("id" = String, Path, description = "Invoice identifier")),
    responses(
        (status = 200, description = "Deleted", body = crate::inbound::http::schemas::MessageSchema),
        (status = 400, description = "Malformed invoice id", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Store failure", body = crate::inbound::http::schemas::MessageSchema)
    ),
    tags = ["invoices"],
    operation_id = "deleteInvoice"
)]
#[post("/dashboard/invoices/{id}/delete")]
pub async fn delete_invoice(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> actix_web::Result<HttpResponse> {
    session.require(&state.sessions)?;
    let id = parse_invoice_id(&path.into_inner())?;
    Ok(render(state.invoices.delete(id).await))
}

#[cfg(test)]
#[path = "invoices_tests.rs"]
mod tests;
