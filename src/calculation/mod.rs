//! Calculation logic for the leave and payroll engine.
//!
//! This module contains the pure rule functions: calendar day arithmetic,
//! leave balance aggregation, request validation and paid/unpaid
//! splitting, fine assessment, review transitions, salary component
//! resolution, and payslip aggregation. Persistence and locking live in
//! the engine layer; everything here is deterministic in its inputs.

mod balance;
mod components;
mod day_math;
mod fine;
mod review;
mod salary_slip;
mod validation;

pub use balance::calculate_balances;
pub use components::{
    BASIC_COMPONENT, ComponentInputs, ResolvedComponents, resolve_components,
};
pub use day_math::{days_in_month, days_within_month, inclusive_days, month_bounds, ranges_overlap};
pub use fine::{FineAssessment, assess_fine};
pub use review::{accept_application, apply_decision, deny_application};
pub use salary_slip::{build_slip, leave_days_in_month};
pub use validation::validate_and_split;
