//! Configuration loading functionality.
//!
//! This module provides the [`PolicyLoader`] type for loading the leave
//! policy and the salary component catalogue from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::SalaryComponentDefinition;

use super::types::{
    ComponentsConfig, FineRule, FinesConfig, LeavePolicy, LeaveType, LeaveTypesConfig,
    PolicyMetadata,
};

/// Loads and provides access to the leave policy and component catalogue.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── policy.yaml       # Policy metadata
/// ├── leave_types.yaml  # Ordered leave types
/// ├── fines.yaml        # Fine rule for frequent monthly leave
/// └── components.yaml   # Default salary component catalogue
/// ```
///
/// # Example
///
/// ```no_run
/// use hr_engine::config::PolicyLoader;
///
/// let loader = PolicyLoader::load("./config/default").unwrap();
/// let casual = loader.policy().get_type("casual").unwrap();
/// println!("{} allows {} days per year", casual.name, casual.normal_days);
/// ```
#[derive(Debug, Clone)]
pub struct PolicyLoader {
    policy: LeavePolicy,
    catalogue: Vec<SalaryComponentDefinition>,
}

impl PolicyLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `PolicyLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<PolicyMetadata>(&path.join("policy.yaml"))?;
        let leave_types = Self::load_yaml::<LeaveTypesConfig>(&path.join("leave_types.yaml"))?;
        let fines = Self::load_yaml::<FinesConfig>(&path.join("fines.yaml"))?;
        let components = Self::load_yaml::<ComponentsConfig>(&path.join("components.yaml"))?;

        Ok(Self {
            policy: LeavePolicy::new(metadata, leave_types.leave_types, fines.fine),
            catalogue: components.components,
        })
    }

    /// Builds a loader from already-constructed parts, bypassing the
    /// filesystem. Used by tests and by callers that manage policy
    /// storage themselves.
    pub fn from_parts(
        metadata: PolicyMetadata,
        leave_types: Vec<LeaveType>,
        fine_rule: FineRule,
        catalogue: Vec<SalaryComponentDefinition>,
    ) -> Self {
        Self {
            policy: LeavePolicy::new(metadata, leave_types, fine_rule),
            catalogue,
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded leave policy.
    pub fn policy(&self) -> &LeavePolicy {
        &self.policy
    }

    /// Returns the default salary component catalogue in definition order.
    pub fn catalogue(&self) -> &[SalaryComponentDefinition] {
        &self.catalogue
    }
}
