//! Public query listing invoices of one fixed amount.

use actix_web::{HttpResponse, get, web};
use serde_json::json;
use tracing::error;

use crate::domain::{AmountMatchRow, QUERY_AMOUNT};
use crate::inbound::http::schemas::QueryErrorSchema;
use crate::inbound::http::state::HttpState;

/// Invoices whose amount equals the query amount, with customer names.
#[utoipa::path(
    get,
    path = "/query",
    responses(
        (status = 200, description = "Matching invoices", body = [AmountMatchRow]),
        (status = 500, description = "Store failure", body = QueryErrorSchema)
    ),
    tags = ["query"],
    operation_id = "amountQuery",
    security([])
)]
#[get("/query")]
pub async fn amount_matches(state: web::Data<HttpState>) -> HttpResponse {
    match state.dashboard.invoices_with_amount(QUERY_AMOUNT).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(err) => {
            error!(error = %err, "amount query failed");
            HttpResponse::InternalServerError().json(json!({ "error": "Database error." }))
        }
    }
}
