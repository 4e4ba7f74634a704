//! Error types for the leave and payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during leave validation, review,
//! and salary computation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the leave and payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application. Validation
/// and conflict variants carry enough context for a caller to self-correct
/// (conflicting date ranges, limit values) without a second round trip.
///
/// # Example
///
/// ```
/// use hr_engine::error::EngineError;
///
/// let error = EngineError::LeaveTypeNotFound {
///     code: "casual".to_string(),
/// };
/// assert_eq!(error.to_string(), "Leave type not found: casual");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No active leave policy is configured.
    #[error("No active leave policy is configured")]
    PolicyNotConfigured,

    /// A leave type code was not found in the policy.
    #[error("Leave type not found: {code}")]
    LeaveTypeNotFound {
        /// The leave type code that was not found.
        code: String,
    },

    /// A field of a request was malformed or missing.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The requested leave range overlaps existing accepted leave.
    #[error("Requested leave overlaps {} accepted leave range(s)", conflicts.len())]
    OverlappingLeave {
        /// The effective `[start, end]` ranges of every conflicting leave.
        conflicts: Vec<(NaiveDate, NaiveDate)>,
    },

    /// The request exceeds the per-request day cap for its leave type.
    #[error(
        "Leave type '{leave_type}' allows at most {max} day(s) per request, {requested} requested"
    )]
    RequestCapExceeded {
        /// The leave type whose cap was exceeded.
        leave_type: String,
        /// The number of days requested.
        requested: i64,
        /// The maximum days allowed per request.
        max: u32,
    },

    /// A leave application was not found.
    #[error("Leave application not found: {id}")]
    LeaveNotFound {
        /// The application id that was not found.
        id: String,
    },

    /// An employee was not found in the directory.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee id that was not found.
        id: String,
    },

    /// A review was attempted on an application already in a terminal state.
    #[error("Leave application {id} has already been reviewed (status: {status})")]
    AlreadyReviewed {
        /// The application id.
        id: String,
        /// The terminal status the application is in.
        status: String,
    },

    /// The caller is not permitted to perform the operation.
    #[error("Operation not permitted: {reason}")]
    NotPermitted {
        /// Why the operation was refused.
        reason: String,
    },

    /// A general computation error occurred.
    #[error("Computation error: {message}")]
    Computation {
        /// A description of the computation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
