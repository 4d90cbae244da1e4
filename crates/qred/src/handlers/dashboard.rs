//! Company dashboard handler.
//!
//! Runs the four reads a dashboard needs concurrently, then assembles the
//! response. The reads fail fast: one failed read fails the whole request and
//! no partial dashboard is ever returned.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use qred_core::dashboard::{assemble_dashboard, DashboardOutcome};
use qred_core::storage::{DEFAULT_INVOICE_LIMIT, DEFAULT_TRANSACTION_LIMIT};

use crate::{handlers::AppError, state::AppState};

#[derive(Debug, Serialize)]
struct NotFoundBody {
    message: &'static str,
}

/// Get the dashboard of a company (GET /dashboard/{id}).
///
/// The id is used as-is; an unknown id simply finds no company.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> Result<Response, AppError> {
    dashboard_response(&state, &company_id).await
}

/// Dashboard request without an id (GET /dashboard).
///
/// Runs the same lookups with an empty id, which finds no company.
pub async fn get_dashboard_without_id(State(state): State<AppState>) -> Result<Response, AppError> {
    dashboard_response(&state, "").await
}

async fn dashboard_response(state: &AppState, company_id: &str) -> Result<Response, AppError> {
    tracing::debug!(company_id, "Fetching dashboard");

    // The company check happens after the join, so a missing company still
    // costs all four reads.
    let (company, transactions, total_count, invoices) = tokio::try_join!(
        state.company_repo.get_company_metadata(company_id),
        state
            .transaction_repo
            .get_latest_transactions(company_id, DEFAULT_TRANSACTION_LIMIT),
        state
            .transaction_repo
            .get_recent_transactions_count(company_id),
        state
            .invoice_repo
            .get_latest_invoices(company_id, DEFAULT_INVOICE_LIMIT),
    )?;

    match assemble_dashboard(company, transactions, total_count, &invoices, Utc::now()) {
        DashboardOutcome::Found(dashboard) => Ok((StatusCode::OK, Json(dashboard)).into_response()),
        DashboardOutcome::NotFound => {
            tracing::debug!(company_id, "Company not found");
            Ok((
                StatusCode::NOT_FOUND,
                Json(NotFoundBody {
                    message: "Not Found",
                }),
            )
                .into_response())
        }
    }
}
