//! Response types for the leave and payroll API.
//!
//! This module defines the error envelope, its mapping from engine
//! errors, and the payroll response bodies that round monetary amounts
//! at the presentation boundary.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::ResolvedComponents;
use crate::error::EngineError;
use crate::models::SalaryComponentLine;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::new("CONFIG_ERROR", error.to_string()),
                }
            }
            EngineError::PolicyNotConfigured => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("POLICY_NOT_CONFIGURED", error.to_string()),
            },
            EngineError::LeaveTypeNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("LEAVE_TYPE_NOT_FOUND", error.to_string()),
            },
            EngineError::Validation { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("VALIDATION_ERROR", error.to_string()),
            },
            EngineError::OverlappingLeave { ref conflicts } => {
                let ranges = conflicts
                    .iter()
                    .map(|(start, end)| format!("{} to {}", start, end))
                    .collect::<Vec<_>>()
                    .join(", ");
                ApiErrorResponse {
                    status: StatusCode::CONFLICT,
                    error: ApiError::with_details("LEAVE_OVERLAP", error.to_string(), ranges),
                }
            }
            EngineError::RequestCapExceeded { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("REQUEST_CAP_EXCEEDED", error.to_string()),
            },
            EngineError::LeaveNotFound { .. } | EngineError::EmployeeNotFound { .. } => {
                ApiErrorResponse {
                    status: StatusCode::NOT_FOUND,
                    error: ApiError::new("NOT_FOUND", error.to_string()),
                }
            }
            EngineError::AlreadyReviewed { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("ALREADY_REVIEWED", error.to_string()),
            },
            EngineError::NotPermitted { .. } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::new("NOT_PERMITTED", error.to_string()),
            },
            EngineError::Computation { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("COMPUTATION_ERROR", error.to_string()),
            },
        }
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        let error = match rejection {
            JsonRejection::JsonDataError(err) => {
                let body_text = err.body_text();
                if body_text.contains("missing field") {
                    ApiError::new("VALIDATION_ERROR", body_text)
                } else {
                    ApiError::malformed_json(body_text)
                }
            }
            JsonRejection::JsonSyntaxError(err) => {
                ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
            }
            JsonRejection::MissingJsonContentType(_) => ApiError::new(
                "MISSING_CONTENT_TYPE",
                "Content-Type must be application/json",
            ),
            _ => ApiError::malformed_json("Failed to parse request body"),
        };
        ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

/// Response body for the payroll component endpoints.
///
/// Amounts are rounded to two decimal places here, at the presentation
/// boundary; the engine keeps them exact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentsResponse {
    /// The resolved component lines, disabled rows included.
    pub components: Vec<SalaryComponentLine>,
    /// BASIC's final amount.
    pub basic_salary: Decimal,
    /// Sum of allowed non-deduction amounts.
    pub gross_salary: Decimal,
    /// Sum of all allowed amounts.
    pub net_salary: Decimal,
}

impl From<ResolvedComponents> for ComponentsResponse {
    fn from(resolved: ResolvedComponents) -> Self {
        Self {
            components: resolved
                .lines
                .into_iter()
                .map(|mut line| {
                    line.amount = line.amount.round_dp(2);
                    line
                })
                .collect(),
            basic_salary: resolved.basic_amount.round_dp(2),
            gross_salary: resolved.gross_salary.round_dp(2),
            net_salary: resolved.net_salary.round_dp(2),
        }
    }
}
