//! Storage collaborator interfaces and in-memory implementations.
//!
//! The engine treats persistence as an external collaborator: leave
//! applications and salary records live behind traits, and the in-memory
//! implementations here back the default wiring and the test suites.
//! Swapping in a database-backed store is a matter of implementing the
//! same traits.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::models::{
    EmployeeProfile, LeaveApplication, SalaryComponentDefinition, SalaryRecord,
};

/// Read/write access to the append-only leave application ledger.
///
/// Applications are inserted on apply and replaced in full by review;
/// nothing ever deletes one.
pub trait LeaveStore: Send + Sync {
    /// Inserts a new application.
    fn insert(&self, application: LeaveApplication);
    /// Fetches one application by id.
    fn get(&self, id: Uuid) -> Option<LeaveApplication>;
    /// Replaces an existing application after review. Unknown ids are
    /// ignored; the caller has already fetched the application under its
    /// employee lock.
    fn update(&self, application: LeaveApplication);
    /// Returns every application for an employee, oldest first.
    fn for_employee(&self, employee_id: &str) -> Vec<LeaveApplication>;
}

/// Read/write access to salary records and the component catalogue.
pub trait SalaryStore: Send + Sync {
    /// Inserts or replaces the record for (employee, month, year).
    /// Deliberately last-write-wins; drafts carry no version.
    fn upsert_record(&self, record: SalaryRecord);
    /// Fetches the record for (employee, month, year).
    fn get_record(&self, employee_id: &str, year: i32, month: u32) -> Option<SalaryRecord>;
    /// Returns the component catalogue in definition order.
    fn catalogue(&self) -> Vec<SalaryComponentDefinition>;
    /// Replaces the component catalogue wholesale.
    fn replace_catalogue(&self, definitions: Vec<SalaryComponentDefinition>);
}

/// Read access to employee base data.
pub trait EmployeeDirectory: Send + Sync {
    /// Fetches an employee profile by id.
    fn get(&self, id: &str) -> Option<EmployeeProfile>;
}

/// In-memory [`LeaveStore`].
#[derive(Default)]
pub struct MemoryLeaveStore {
    applications: RwLock<Vec<LeaveApplication>>,
}

impl MemoryLeaveStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeaveStore for MemoryLeaveStore {
    fn insert(&self, application: LeaveApplication) {
        self.applications.write().unwrap().push(application);
    }

    fn get(&self, id: Uuid) -> Option<LeaveApplication> {
        self.applications
            .read()
            .unwrap()
            .iter()
            .find(|app| app.id == id)
            .cloned()
    }

    fn update(&self, application: LeaveApplication) {
        let mut applications = self.applications.write().unwrap();
        if let Some(existing) = applications.iter_mut().find(|app| app.id == application.id) {
            *existing = application;
        }
    }

    fn for_employee(&self, employee_id: &str) -> Vec<LeaveApplication> {
        self.applications
            .read()
            .unwrap()
            .iter()
            .filter(|app| app.employee_id == employee_id)
            .cloned()
            .collect()
    }
}

/// In-memory [`SalaryStore`], keyed by (employee, year, month).
pub struct MemorySalaryStore {
    records: RwLock<HashMap<(String, i32, u32), SalaryRecord>>,
    catalogue: RwLock<Vec<SalaryComponentDefinition>>,
}

impl MemorySalaryStore {
    /// Creates a store seeded with the given component catalogue.
    pub fn new(catalogue: Vec<SalaryComponentDefinition>) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            catalogue: RwLock::new(catalogue),
        }
    }
}

impl SalaryStore for MemorySalaryStore {
    fn upsert_record(&self, record: SalaryRecord) {
        let key = (record.employee_id.clone(), record.year, record.month);
        self.records.write().unwrap().insert(key, record);
    }

    fn get_record(&self, employee_id: &str, year: i32, month: u32) -> Option<SalaryRecord> {
        self.records
            .read()
            .unwrap()
            .get(&(employee_id.to_string(), year, month))
            .cloned()
    }

    fn catalogue(&self) -> Vec<SalaryComponentDefinition> {
        self.catalogue.read().unwrap().clone()
    }

    fn replace_catalogue(&self, definitions: Vec<SalaryComponentDefinition>) {
        *self.catalogue.write().unwrap() = definitions;
    }
}

/// In-memory [`EmployeeDirectory`].
#[derive(Default)]
pub struct MemoryEmployeeDirectory {
    employees: RwLock<HashMap<String, EmployeeProfile>>,
}

impl MemoryEmployeeDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an employee profile.
    pub fn insert(&self, employee: EmployeeProfile) {
        self.employees
            .write()
            .unwrap()
            .insert(employee.id.clone(), employee);
    }
}

impl EmployeeDirectory for MemoryEmployeeDirectory {
    fn get(&self, id: &str) -> Option<EmployeeProfile> {
        self.employees.read().unwrap().get(id).cloned()
    }
}
