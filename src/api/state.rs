//! Application state for the leave and payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::PolicyLoader;
use crate::engine::{LeaveService, PayrollService};
use crate::models::EmployeeProfile;
use crate::store::{MemoryEmployeeDirectory, MemoryLeaveStore, MemorySalaryStore};

/// Shared application state.
///
/// Wires the policy configuration, the in-memory stores, and the leave
/// and payroll services together; handlers reach everything through it.
#[derive(Clone)]
pub struct AppState {
    directory: Arc<MemoryEmployeeDirectory>,
    leave: Arc<LeaveService>,
    payroll: Arc<PayrollService>,
}

impl AppState {
    /// Creates application state over in-memory stores, seeding the
    /// salary component catalogue from the loaded configuration.
    pub fn new(loader: PolicyLoader) -> Self {
        let policy = Arc::new(loader);
        let directory = Arc::new(MemoryEmployeeDirectory::new());
        let leave_store = Arc::new(MemoryLeaveStore::new());
        let salary_store = Arc::new(MemorySalaryStore::new(policy.catalogue().to_vec()));

        let leave = Arc::new(LeaveService::new(
            policy.clone(),
            directory.clone(),
            leave_store.clone(),
        ));
        let payroll = Arc::new(PayrollService::new(
            policy,
            directory.clone(),
            leave_store,
            salary_store,
        ));

        Self {
            directory,
            leave,
            payroll,
        }
    }

    /// Adds or replaces an employee profile in the directory.
    pub fn seed_employee(&self, employee: EmployeeProfile) {
        self.directory.insert(employee);
    }

    /// Returns the leave service.
    pub fn leave(&self) -> &LeaveService {
        &self.leave
    }

    /// Returns the payroll service.
    pub fn payroll(&self) -> &PayrollService {
        &self.payroll
    }
}
