//! HTTP API module for the leave and payroll engine.
//!
//! This module provides the REST endpoints over the leave lifecycle and
//! payroll operations.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AttendanceRequest, ComponentLineRequest, ComputeComponentsRequest, LeaveApplyRequest,
    ReviewRequest, SaveRecordRequest,
};
pub use response::{ApiError, ComponentsResponse};
pub use state::AppState;
