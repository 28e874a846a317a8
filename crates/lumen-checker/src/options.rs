//! Checker configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Package-name prefix of the language's own packages.
pub const CORE_PACKAGE_PREFIX: &str = "lumen";

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid checker options: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckerOptions {
    /// Package-name prefixes whose declarations keep supertypes that fail
    /// the argument-sensitive recursion or self-type checks. The diagnostic
    /// is still reported.
    pub exempt_core_packages: Vec<String>,
    pub check_definite_assignment: bool,
    pub check_decidability: bool,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            exempt_core_packages: vec![CORE_PACKAGE_PREFIX.to_string()],
            check_definite_assignment: true,
            check_decidability: true,
        }
    }
}

impl CheckerOptions {
    /// Parse options from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, OptionsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod tests;
