//! Configuration for the leave and payroll engine.
//!
//! This module provides the leave policy types and the loader that reads
//! them from YAML configuration files.

mod loader;
mod types;

pub use loader::PolicyLoader;
pub use types::{
    ComponentsConfig, FineRule, FinesConfig, LeaveFrequency, LeaveMode, LeavePolicy, LeaveType,
    LeaveTypesConfig, PolicyMetadata,
};
