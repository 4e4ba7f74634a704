//! Leave lifecycle orchestration.
//!
//! [`LeaveService`] wires the pure leave rules to the application store
//! and closes the two write races the rules cannot see: concurrent
//! applications passing the overlap check together, and concurrent
//! reviews double-counting a balance. Both run inside a per-employee
//! critical section covering the fresh read and the write.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Datelike, Utc};
use tracing::info;
use uuid::Uuid;

use crate::calculation::{
    apply_decision, assess_fine, calculate_balances, ranges_overlap, validate_and_split,
};
use crate::config::PolicyLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    EmployeeProfile, LeaveApplication, LeaveRequest, LeaveSplit, LeaveStatus, LeaveTypeBalance,
    ReviewDecision,
};
use crate::store::{EmployeeDirectory, LeaveStore};

/// Stateful service for the leave lifecycle: balances, validation,
/// application, and review.
pub struct LeaveService {
    policy: Arc<PolicyLoader>,
    directory: Arc<dyn EmployeeDirectory>,
    store: Arc<dyn LeaveStore>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl LeaveService {
    /// Creates a new service over the given policy, directory, and store.
    pub fn new(
        policy: Arc<PolicyLoader>,
        directory: Arc<dyn EmployeeDirectory>,
        store: Arc<dyn LeaveStore>,
    ) -> Self {
        Self {
            policy,
            directory,
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the lock serializing writes for one employee. Critical
    /// sections are synchronous and never held across an await.
    fn employee_lock(&self, employee_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks
            .entry(employee_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn ensure_employee(&self, employee_id: &str) -> EngineResult<EmployeeProfile> {
        self.directory
            .get(employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                id: employee_id.to_string(),
            })
    }

    /// Returns the employee's per-type balances for the given year.
    pub fn balances(&self, employee_id: &str, year: i32) -> EngineResult<Vec<LeaveTypeBalance>> {
        self.ensure_employee(employee_id)?;
        let applications = self.store.for_employee(employee_id);
        calculate_balances(self.policy.policy(), &applications, year)
    }

    /// Validates a request against the current store state and returns
    /// its paid/unpaid split without persisting anything.
    pub fn validate(&self, request: &LeaveRequest) -> EngineResult<LeaveSplit> {
        self.ensure_employee(&request.employee_id)?;
        self.split_against_store(request).map(|(split, _)| split)
    }

    fn split_against_store(
        &self,
        request: &LeaveRequest,
    ) -> EngineResult<(LeaveSplit, Vec<LeaveApplication>)> {
        let applications = self.store.for_employee(&request.employee_id);
        let balances = calculate_balances(
            self.policy.policy(),
            &applications,
            request.start_date.year(),
        )?;
        let accepted: Vec<LeaveApplication> = applications
            .iter()
            .filter(|app| app.status == LeaveStatus::Accepted)
            .cloned()
            .collect();

        let split = validate_and_split(request, self.policy.policy(), &balances, &accepted)?;
        Ok((split, applications))
    }

    /// Validates and persists a new leave application.
    ///
    /// Validation runs again inside the employee's critical section, so
    /// two overlapping requests racing each other cannot both pass the
    /// overlap check before either is stored.
    pub fn apply(&self, request: LeaveRequest) -> EngineResult<LeaveApplication> {
        self.ensure_employee(&request.employee_id)?;

        let lock = self.employee_lock(&request.employee_id);
        let _guard = lock.lock().unwrap();

        let (split, applications) = self.split_against_store(&request)?;
        let fine = assess_fine(
            self.policy.policy().fine_rule(),
            request.requested_days(),
            request.start_date,
            &applications,
        );

        let application = LeaveApplication {
            id: Uuid::new_v4(),
            employee_id: request.employee_id.clone(),
            leave_type: request.leave_type.clone(),
            start_date: request.start_date,
            end_date: request.end_date,
            reason: request.reason.clone(),
            requested_days: request.requested_days(),
            approved_days: 0,
            approved_end_date: None,
            paid_days: split.paid_days,
            lwp_days: split.lwp_days,
            status: LeaveStatus::Pending,
            is_fine_applicable: fine.applicable,
            fine_amount: fine.amount,
            hr_message: None,
            applied_at: Utc::now(),
            reviewed_by: None,
            reviewed_at: None,
            is_reapplication: request.reapplied_from.is_some(),
            reapplied_from: request.reapplied_from,
        };

        self.store.insert(application.clone());
        info!(
            application_id = %application.id,
            employee_id = %application.employee_id,
            leave_type = %application.leave_type,
            paid_days = application.paid_days,
            lwp_days = application.lwp_days,
            fine_applicable = application.is_fine_applicable,
            "Leave application submitted"
        );
        Ok(application)
    }

    /// Applies a review decision to a pending application.
    ///
    /// The application is re-read inside its employee's critical section
    /// so two reviewers racing each other settle in sequence; the loser
    /// sees `AlreadyReviewed`. Acceptance also re-checks the approved
    /// range against the employee's other accepted leaves: two
    /// overlapping requests may both sit Pending, but only one of them
    /// can be granted.
    pub fn review(
        &self,
        leave_id: Uuid,
        decision: ReviewDecision,
        reviewer: &str,
    ) -> EngineResult<LeaveApplication> {
        let application = self.get(leave_id)?;

        let lock = self.employee_lock(&application.employee_id);
        let _guard = lock.lock().unwrap();

        let application = self.get(leave_id)?;
        let reviewed = apply_decision(&application, decision, reviewer, Utc::now())?;

        if reviewed.status == LeaveStatus::Accepted {
            let (start, end) = reviewed.effective_range();
            let conflicts: Vec<_> = self
                .store
                .for_employee(&reviewed.employee_id)
                .iter()
                .filter(|other| {
                    other.status == LeaveStatus::Accepted
                        && other.id != reviewed.id
                        && Some(other.id) != reviewed.reapplied_from
                        && other.reapplied_from != Some(reviewed.id)
                })
                .map(|other| other.effective_range())
                .filter(|(other_start, other_end)| {
                    ranges_overlap(start, end, *other_start, *other_end)
                })
                .collect();
            if !conflicts.is_empty() {
                return Err(EngineError::OverlappingLeave { conflicts });
            }
        }

        self.store.update(reviewed.clone());
        info!(
            application_id = %reviewed.id,
            employee_id = %reviewed.employee_id,
            status = %reviewed.status,
            approved_days = reviewed.approved_days,
            reviewer = %reviewer,
            "Leave application reviewed"
        );
        Ok(reviewed)
    }

    /// Fetches one application by id.
    pub fn get(&self, leave_id: Uuid) -> EngineResult<LeaveApplication> {
        self.store
            .get(leave_id)
            .ok_or_else(|| EngineError::LeaveNotFound {
                id: leave_id.to_string(),
            })
    }

    /// Returns every application for an employee.
    pub fn applications(&self, employee_id: &str) -> EngineResult<Vec<LeaveApplication>> {
        self.ensure_employee(employee_id)?;
        Ok(self.store.for_employee(employee_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FineRule, LeaveFrequency, LeaveMode, LeaveType, PolicyMetadata};
    use crate::store::{MemoryEmployeeDirectory, MemoryLeaveStore};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_service() -> LeaveService {
        let loader = PolicyLoader::from_parts(
            PolicyMetadata {
                name: "test".to_string(),
                version: "1".to_string(),
            },
            vec![
                LeaveType {
                    code: "casual".to_string(),
                    name: "Casual Leave".to_string(),
                    mode: LeaveMode::Paid,
                    frequency: LeaveFrequency::Yearly,
                    max_per_request: Some(10),
                    normal_days: 12,
                    is_active: true,
                },
                LeaveType {
                    code: "lwp".to_string(),
                    name: "Leave Without Pay".to_string(),
                    mode: LeaveMode::Free,
                    frequency: LeaveFrequency::Yearly,
                    max_per_request: Some(30),
                    normal_days: 0,
                    is_active: true,
                },
            ],
            FineRule::default(),
            vec![],
        );

        let directory = Arc::new(MemoryEmployeeDirectory::new());
        directory.insert(EmployeeProfile {
            id: "emp_001".to_string(),
            name: "Asha Verma".to_string(),
            base_salary: Decimal::new(30000, 0),
            joined_on: date(2022, 4, 1),
        });

        LeaveService::new(
            Arc::new(loader),
            directory,
            Arc::new(MemoryLeaveStore::new()),
        )
    }

    fn request(start: NaiveDate, end: NaiveDate) -> LeaveRequest {
        LeaveRequest {
            employee_id: "emp_001".to_string(),
            leave_type: "casual".to_string(),
            start_date: start,
            end_date: end,
            reason: "family event".to_string(),
            reapplied_from: None,
        }
    }

    #[test]
    fn test_apply_persists_pending_application() {
        let service = create_test_service();

        let application = service
            .apply(request(date(2024, 3, 4), date(2024, 3, 6)))
            .unwrap();

        assert_eq!(application.status, LeaveStatus::Pending);
        assert_eq!(application.requested_days, 3);
        assert_eq!(application.paid_days, 3);
        assert_eq!(application.lwp_days, 0);
        assert_eq!(service.applications("emp_001").unwrap().len(), 1);
    }

    #[test]
    fn test_validate_does_not_persist() {
        let service = create_test_service();

        let split = service
            .validate(&request(date(2024, 3, 4), date(2024, 3, 6)))
            .unwrap();

        assert_eq!(split.paid_days, 3);
        assert!(service.applications("emp_001").unwrap().is_empty());
    }

    #[test]
    fn test_accepted_leave_reduces_balance() {
        let service = create_test_service();

        let application = service
            .apply(request(date(2024, 3, 4), date(2024, 3, 8)))
            .unwrap();
        service
            .review(
                application.id,
                ReviewDecision::Accept {
                    approved_days: 5,
                    hr_message: None,
                    fine: None,
                },
                "hr_001",
            )
            .unwrap();

        let balances = service.balances("emp_001", 2024).unwrap();
        let casual = balances.iter().find(|b| b.leave_type == "casual").unwrap();
        assert_eq!(casual.days_taken, 5);
        assert_eq!(casual.days_remaining, 7);
    }

    #[test]
    fn test_apply_rejects_overlap_with_accepted_leave() {
        let service = create_test_service();

        let application = service
            .apply(request(date(2024, 3, 4), date(2024, 3, 8)))
            .unwrap();
        service
            .review(
                application.id,
                ReviewDecision::Accept {
                    approved_days: 5,
                    hr_message: None,
                    fine: None,
                },
                "hr_001",
            )
            .unwrap();

        let result = service.apply(request(date(2024, 3, 7), date(2024, 3, 9)));
        assert!(matches!(result, Err(EngineError::OverlappingLeave { .. })));
    }

    #[test]
    fn test_pending_leave_does_not_block_overlap() {
        // Only Accepted leaves participate in the overlap check.
        let service = create_test_service();

        service
            .apply(request(date(2024, 3, 4), date(2024, 3, 8)))
            .unwrap();
        let second = service.apply(request(date(2024, 3, 7), date(2024, 3, 9)));
        assert!(second.is_ok());
    }

    #[test]
    fn test_only_one_of_two_overlapping_pendings_can_be_accepted() {
        let service = create_test_service();

        let first = service
            .apply(request(date(2024, 3, 4), date(2024, 3, 8)))
            .unwrap();
        let second = service
            .apply(request(date(2024, 3, 7), date(2024, 3, 9)))
            .unwrap();

        let decision = |days| ReviewDecision::Accept {
            approved_days: days,
            hr_message: None,
            fine: None,
        };
        service.review(first.id, decision(5), "hr_001").unwrap();

        let result = service.review(second.id, decision(3), "hr_001");
        assert!(matches!(result, Err(EngineError::OverlappingLeave { .. })));

        // The losing application stays Pending and can still be denied.
        let denied = service
            .review(second.id, ReviewDecision::Deny { hr_message: None }, "hr_001")
            .unwrap();
        assert_eq!(denied.status, LeaveStatus::Denied);
    }

    #[test]
    fn test_second_review_fails() {
        let service = create_test_service();

        let application = service
            .apply(request(date(2024, 3, 4), date(2024, 3, 6)))
            .unwrap();
        service
            .review(
                application.id,
                ReviewDecision::Deny { hr_message: None },
                "hr_001",
            )
            .unwrap();

        let result = service.review(
            application.id,
            ReviewDecision::Accept {
                approved_days: 1,
                hr_message: None,
                fine: None,
            },
            "hr_001",
        );
        assert!(matches!(result, Err(EngineError::AlreadyReviewed { .. })));
    }

    #[test]
    fn test_partial_approval_then_reapplication() {
        let service = create_test_service();

        let application = service
            .apply(request(date(2024, 1, 1), date(2024, 1, 10)))
            .unwrap();
        let reviewed = service
            .review(
                application.id,
                ReviewDecision::Accept {
                    approved_days: 5,
                    hr_message: Some("half granted".to_string()),
                    fine: None,
                },
                "hr_001",
            )
            .unwrap();
        assert_eq!(reviewed.approved_end_date, Some(date(2024, 1, 5)));

        let mut reapply = request(date(2024, 1, 6), date(2024, 1, 10));
        reapply.reapplied_from = Some(application.id);
        let second = service.apply(reapply).unwrap();

        assert!(second.is_reapplication);
        assert_eq!(second.reapplied_from, Some(application.id));
        assert_eq!(second.requested_days, 5);
    }

    #[test]
    fn test_third_application_in_month_attracts_fine() {
        let service = create_test_service();

        for (start, end) in [
            (date(2024, 5, 2), date(2024, 5, 2)),
            (date(2024, 5, 9), date(2024, 5, 9)),
        ] {
            let application = service.apply(request(start, end)).unwrap();
            service
                .review(
                    application.id,
                    ReviewDecision::Accept {
                        approved_days: 1,
                        hr_message: None,
                        fine: None,
                    },
                    "hr_001",
                )
                .unwrap();
        }

        let third = service
            .apply(request(date(2024, 5, 20), date(2024, 5, 22)))
            .unwrap();

        assert!(third.is_fine_applicable);
        assert_eq!(third.fine_amount, Decimal::new(600, 0));
    }

    #[test]
    fn test_unknown_employee_rejected() {
        let service = create_test_service();
        let mut req = request(date(2024, 3, 4), date(2024, 3, 6));
        req.employee_id = "emp_404".to_string();

        assert!(matches!(
            service.apply(req),
            Err(EngineError::EmployeeNotFound { .. })
        ));
        assert!(matches!(
            service.balances("emp_404", 2024),
            Err(EngineError::EmployeeNotFound { .. })
        ));
    }

    #[test]
    fn test_review_unknown_application_rejected() {
        let service = create_test_service();
        let result = service.review(
            Uuid::new_v4(),
            ReviewDecision::Deny { hr_message: None },
            "hr_001",
        );
        assert!(matches!(result, Err(EngineError::LeaveNotFound { .. })));
    }
}
