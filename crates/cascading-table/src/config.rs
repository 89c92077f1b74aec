//! Configuration for propagating delegates.
//!
//! Configuration can be built in code or loaded from TOML:
//!
//! ```toml
//! validation = "debug-assert"
//! default_mode = "row"
//! ```
//!
//! ```
//! use cascading_table::{CascadeConfig, PropagationMode, ValidationPolicy};
//!
//! let config = CascadeConfig::from_toml_str(r#"
//!     validation = "ignore"
//!     default_mode = "row"
//! "#).unwrap();
//!
//! assert_eq!(config.validation, ValidationPolicy::Ignore);
//! assert_eq!(config.default_mode, PropagationMode::Row);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::propagating::PropagationMode;

/// What to do when a children list fails its consistency check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationPolicy {
    /// Skip the check entirely.
    Ignore,
    /// Log each issue at `warn` level.
    #[default]
    Log,
    /// Log, then fail a `debug_assert!` in debug builds.
    DebugAssert,
}

/// Settings applied to a [`PropagatingTableDelegate`](crate::PropagatingTableDelegate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadeConfig {
    /// How children consistency issues are surfaced.
    pub validation: ValidationPolicy,
    /// Mode used by constructors that don't take one explicitly.
    pub default_mode: PropagationMode,
}

impl CascadeConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the validation policy.
    pub fn with_validation(mut self, validation: ValidationPolicy) -> Self {
        self.validation = validation;
        self
    }

    /// Sets the default propagation mode.
    pub fn with_default_mode(mut self, mode: PropagationMode) -> Self {
        self.default_mode = mode;
        self
    }

    /// Parses configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads configuration from a TOML file.
    pub fn load_toml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&content)
    }
}
