//! Payroll orchestration.
//!
//! [`PayrollService`] resolves monthly component sets, persists salary
//! records, and assembles payslips. Record writes are deliberately
//! last-write-wins: two operators editing the same month race without
//! optimistic locking, and the later save stands.

use std::sync::Arc;

use tracing::info;

use crate::calculation::{
    ComponentInputs, ResolvedComponents, build_slip, leave_days_in_month, month_bounds,
    resolve_components,
};
use crate::config::PolicyLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceSummary, EmployeeProfile, RecordStatus, SalaryComponentLine, SalaryRecord,
    SalarySlip,
};
use crate::store::{EmployeeDirectory, LeaveStore, SalaryStore};

/// Stateful service for salary component resolution, record persistence,
/// and payslip generation.
pub struct PayrollService {
    policy: Arc<PolicyLoader>,
    directory: Arc<dyn EmployeeDirectory>,
    leave_store: Arc<dyn LeaveStore>,
    salary_store: Arc<dyn SalaryStore>,
}

impl PayrollService {
    /// Creates a new service over the given policy, directory, and stores.
    pub fn new(
        policy: Arc<PolicyLoader>,
        directory: Arc<dyn EmployeeDirectory>,
        leave_store: Arc<dyn LeaveStore>,
        salary_store: Arc<dyn SalaryStore>,
    ) -> Self {
        Self {
            policy,
            directory,
            leave_store,
            salary_store,
        }
    }

    fn ensure_employee(&self, employee_id: &str) -> EngineResult<EmployeeProfile> {
        self.directory
            .get(employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                id: employee_id.to_string(),
            })
    }

    /// Resolves the component working set for one employee and month.
    ///
    /// The working set comes from, in priority order: the caller's edited
    /// lines, the month's persisted record, or catalogue defaults seeded
    /// from the employee's base salary. The resolution itself is a full
    /// recompute every time; there is no incremental diffing.
    pub fn compute_components(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
        attendance: AttendanceSummary,
        overrides: Option<Vec<SalaryComponentLine>>,
    ) -> EngineResult<ResolvedComponents> {
        month_bounds(year, month)?;
        let employee = self.ensure_employee(employee_id)?;

        let working_set = overrides.or_else(|| {
            self.salary_store
                .get_record(employee_id, year, month)
                .map(|record| record.components)
        });

        let definitions = self.salary_store.catalogue();
        resolve_components(&ComponentInputs {
            definitions: &definitions,
            base_salary: employee.base_salary,
            attendance,
            overrides: working_set.as_deref(),
        })
    }

    /// Resolves and persists the salary record for one employee and
    /// month, replacing any existing record for that key.
    pub fn save_record(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
        attendance: AttendanceSummary,
        lines: Vec<SalaryComponentLine>,
    ) -> EngineResult<SalaryRecord> {
        let resolved =
            self.compute_components(employee_id, year, month, attendance, Some(lines))?;

        let replacing = self
            .salary_store
            .get_record(employee_id, year, month)
            .is_some();
        let record = SalaryRecord {
            employee_id: employee_id.to_string(),
            month,
            year,
            components: resolved.lines,
            basic_salary: resolved.basic_amount,
            gross_salary: resolved.gross_salary,
            net_salary: resolved.net_salary,
            status: RecordStatus::Saved,
        };
        self.salary_store.upsert_record(record.clone());
        info!(
            employee_id = %employee_id,
            year,
            month,
            replacing,
            net_salary = %record.net_salary,
            "Salary record saved"
        );
        Ok(record)
    }

    /// Builds the payslip for one employee and month, from the saved
    /// record when one exists or the base-salary fallback otherwise.
    pub fn slip(&self, employee_id: &str, year: i32, month: u32) -> EngineResult<SalarySlip> {
        let employee = self.ensure_employee(employee_id)?;

        let applications = self.leave_store.for_employee(employee_id);
        let leave_days =
            leave_days_in_month(&applications, self.policy.policy(), year, month);
        let record = self.salary_store.get_record(employee_id, year, month);

        build_slip(&employee, year, month, record.as_ref(), leave_days)
    }
}
