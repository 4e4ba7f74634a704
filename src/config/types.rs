//! Configuration types for the leave policy.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::SalaryComponentDefinition;

/// Metadata about the policy bundle.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyMetadata {
    /// The human-readable name of the policy.
    pub name: String,
    /// The version or effective date of the policy.
    pub version: String,
}

/// Whether days taken under a leave type draw from a paid balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveMode {
    /// Days are paid and consume the type's yearly entitlement.
    Paid,
    /// Leave without pay; days never consume a paid entitlement.
    Free,
}

/// How often a leave type's entitlement is framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveFrequency {
    /// Entitlement framed per month.
    Monthly,
    /// Entitlement framed per year.
    Yearly,
}

/// One leave type in the policy.
///
/// Types are kept in the order HR defined them; balance listings and
/// validation both respect that order.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveType {
    /// The leave type code (e.g., "casual", "sick", "lwp").
    pub code: String,
    /// The human-readable name of the leave type.
    pub name: String,
    /// Whether days under this type are paid or unpaid.
    pub mode: LeaveMode,
    /// How the entitlement is framed.
    pub frequency: LeaveFrequency,
    /// Maximum days allowed in a single request, when capped.
    #[serde(default)]
    pub max_per_request: Option<u32>,
    /// The yearly entitlement in days.
    pub normal_days: i64,
    /// Whether the type is currently offered.
    pub is_active: bool,
}

/// Leave types configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveTypesConfig {
    /// The ordered leave types.
    pub leave_types: Vec<LeaveType>,
}

/// The fine rule applied to frequent monthly leave.
#[derive(Debug, Clone, Deserialize)]
pub struct FineRule {
    /// Accepted leaves already in the month before a fine applies.
    pub monthly_threshold: u32,
    /// Fine charged per requested day.
    pub daily_rate: Decimal,
}

impl Default for FineRule {
    fn default() -> Self {
        Self {
            monthly_threshold: 2,
            daily_rate: Decimal::new(200, 0),
        }
    }
}

/// Fines configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct FinesConfig {
    /// The fine rule.
    pub fine: FineRule,
}

/// Salary component catalogue file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentsConfig {
    /// The ordered component definitions.
    pub components: Vec<SalaryComponentDefinition>,
}

/// The complete leave policy loaded from YAML files.
///
/// This struct aggregates the leave types and the fine rule and provides
/// the lookups every leave operation reads.
#[derive(Debug, Clone)]
pub struct LeavePolicy {
    /// Policy metadata.
    metadata: PolicyMetadata,
    /// The ordered leave types.
    leave_types: Vec<LeaveType>,
    /// The fine rule.
    fine_rule: FineRule,
}

impl LeavePolicy {
    /// Creates a new LeavePolicy from its component parts.
    pub fn new(metadata: PolicyMetadata, leave_types: Vec<LeaveType>, fine_rule: FineRule) -> Self {
        Self {
            metadata,
            leave_types,
            fine_rule,
        }
    }

    /// Returns the policy metadata.
    pub fn metadata(&self) -> &PolicyMetadata {
        &self.metadata
    }

    /// Returns all leave types in policy order.
    pub fn leave_types(&self) -> &[LeaveType] {
        &self.leave_types
    }

    /// Returns the active leave types in policy order.
    pub fn active_types(&self) -> impl Iterator<Item = &LeaveType> {
        self.leave_types.iter().filter(|t| t.is_active)
    }

    /// Looks up an active leave type by code.
    ///
    /// Inactive and unknown codes both fail, so a request can never be
    /// filed against a type HR has retired.
    pub fn get_type(&self, code: &str) -> EngineResult<&LeaveType> {
        self.leave_types
            .iter()
            .find(|t| t.is_active && t.code == code)
            .ok_or_else(|| EngineError::LeaveTypeNotFound {
                code: code.to_string(),
            })
    }

    /// Returns the active free-mode (leave-without-pay) type, if one is
    /// configured. Its per-request cap also bounds the LWP portion of a
    /// split paid request.
    pub fn free_type(&self) -> Option<&LeaveType> {
        self.active_types().find(|t| t.mode == LeaveMode::Free)
    }

    /// Returns the fine rule.
    pub fn fine_rule(&self) -> &FineRule {
        &self.fine_rule
    }

    /// Returns true when at least one leave type is active.
    pub fn is_configured(&self) -> bool {
        self.leave_types.iter().any(|t| t.is_active)
    }
}
