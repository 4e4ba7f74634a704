//! Stateful services wiring the pure calculation rules to storage.
//!
//! The services own the per-employee critical sections that make the
//! leave write paths safe under concurrency; the payroll write path is
//! deliberately last-write-wins.

mod leave;
mod payroll;

pub use leave::LeaveService;
pub use payroll::PayrollService;
