//! Leave Lifecycle and Payroll Proration Engine
//!
//! This crate provides the leave and payroll core of an HR administration
//! portal: per-employee leave balances, leave request validation with
//! paid/unpaid splitting, a review workflow with partial approval and
//! fines, and monthly salary component resolution into payslips.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;
