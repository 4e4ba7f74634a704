//! HTTP request handlers for the leave and payroll API.
//!
//! This module contains the handler functions for all endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    routing::{get, post, put},
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{LeaveApplication, LeaveSplit, LeaveTypeBalance, SalaryRecord, SalarySlip};

use super::request::{
    ComputeComponentsRequest, LeaveApplyRequest, ReviewRequest, SaveRecordRequest,
};
use super::response::{ApiErrorResponse, ComponentsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees/:id/leave-balance", get(leave_balance_handler))
        .route("/leaves/validate", post(validate_leave_handler))
        .route("/leaves", post(apply_leave_handler))
        .route("/leaves/:id/review", post(review_leave_handler))
        .route("/payroll/components", post(compute_components_handler))
        .route("/payroll/records", put(save_record_handler))
        .route("/payroll/slips/:id/:year/:month", get(salary_slip_handler))
        .with_state(state)
}

fn engine_error(correlation_id: Uuid, context: &str, error: EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %error, "{} failed", context);
    error.into()
}

#[derive(Debug, Deserialize)]
struct BalanceQuery {
    year: Option<i32>,
}

/// Handler for GET /employees/{id}/leave-balance.
///
/// Defaults to the current calendar year unless `?year=` is given.
async fn leave_balance_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<Vec<LeaveTypeBalance>>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let year = query.year.unwrap_or_else(|| Utc::now().year());
    info!(correlation_id = %correlation_id, employee_id = %employee_id, year, "Fetching leave balance");

    let balances = state
        .leave()
        .balances(&employee_id, year)
        .map_err(|err| engine_error(correlation_id, "Leave balance", err))?;
    Ok(Json(balances))
}

/// Handler for POST /leaves/validate.
///
/// Runs validation and splitting without persisting anything.
async fn validate_leave_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaveApplyRequest>, JsonRejection>,
) -> Result<Json<LeaveSplit>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(ApiErrorResponse::from)?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        leave_type = %request.leave_type,
        "Validating leave request"
    );

    let split = state
        .leave()
        .validate(&request.into())
        .map_err(|err| engine_error(correlation_id, "Leave validation", err))?;
    Ok(Json(split))
}

/// Handler for POST /leaves.
async fn apply_leave_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaveApplyRequest>, JsonRejection>,
) -> Result<Json<LeaveApplication>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(ApiErrorResponse::from)?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        leave_type = %request.leave_type,
        reapplication = request.reapplied_from.is_some(),
        "Applying for leave"
    );

    let application = state
        .leave()
        .apply(request.into())
        .map_err(|err| engine_error(correlation_id, "Leave application", err))?;
    Ok(Json(application))
}

/// Handler for POST /leaves/{id}/review.
async fn review_leave_handler(
    State(state): State<AppState>,
    Path(leave_id): Path<Uuid>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Json<LeaveApplication>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(ApiErrorResponse::from)?;
    info!(
        correlation_id = %correlation_id,
        leave_id = %leave_id,
        reviewer = %request.reviewer,
        "Reviewing leave application"
    );

    let application = state
        .leave()
        .review(leave_id, request.decision, &request.reviewer)
        .map_err(|err| engine_error(correlation_id, "Leave review", err))?;
    Ok(Json(application))
}

/// Handler for POST /payroll/components.
async fn compute_components_handler(
    State(state): State<AppState>,
    payload: Result<Json<ComputeComponentsRequest>, JsonRejection>,
) -> Result<Json<ComponentsResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(ApiErrorResponse::from)?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        year = request.year,
        month = request.month,
        "Computing salary components"
    );

    let overrides = request
        .overrides
        .map(|lines| lines.into_iter().map(Into::into).collect());
    let resolved = state
        .payroll()
        .compute_components(
            &request.employee_id,
            request.year,
            request.month,
            request.attendance.into(),
            overrides,
        )
        .map_err(|err| engine_error(correlation_id, "Component resolution", err))?;
    Ok(Json(resolved.into()))
}

/// Handler for PUT /payroll/records.
async fn save_record_handler(
    State(state): State<AppState>,
    payload: Result<Json<SaveRecordRequest>, JsonRejection>,
) -> Result<Json<SalaryRecord>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(ApiErrorResponse::from)?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        year = request.year,
        month = request.month,
        "Saving salary record"
    );

    let mut record = state
        .payroll()
        .save_record(
            &request.employee_id,
            request.year,
            request.month,
            request.attendance.into(),
            request.components.into_iter().map(Into::into).collect(),
        )
        .map_err(|err| engine_error(correlation_id, "Salary record save", err))?;

    // The store keeps exact decimals; the response rounds at the boundary.
    for line in &mut record.components {
        line.amount = line.amount.round_dp(2);
    }
    record.basic_salary = record.basic_salary.round_dp(2);
    record.gross_salary = record.gross_salary.round_dp(2);
    record.net_salary = record.net_salary.round_dp(2);
    Ok(Json(record))
}

/// Handler for GET /payroll/slips/{id}/{year}/{month}.
async fn salary_slip_handler(
    State(state): State<AppState>,
    Path((employee_id, year, month)): Path<(String, i32, u32)>,
) -> Result<Json<SalarySlip>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        year,
        month,
        "Generating salary slip"
    );

    let slip = state
        .payroll()
        .slip(&employee_id, year, month)
        .map_err(|err| engine_error(correlation_id, "Salary slip", err))?;
    Ok(Json(slip))
}
