//! Translator configuration loaded from YAML files
//!
//! Every key is optional; a missing file section falls back to the defaults
//! used by the `openapi-graphql` CLI.
//!
//! ```yaml
//! body_argument_name: input
//! input_type_suffix: Input
//! success_scalar: Void
//! json_scalar: JSON
//! custom_scalars: true
//! include_unreferenced_schemas: false
//! collision_policy: suffix
//! ```

use crate::{Result, TranslationError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What the naming resolver does when a name is already taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Append the lowest free numeric suffix (`Status2`, `Status3`, ...)
    #[default]
    Suffix,
    /// Report a name collision error
    Fail,
}

/// Options controlling one translation run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Argument name carrying the request body
    pub body_argument_name: String,
    /// Suffix appended to named schemas when mapped as input objects
    pub input_type_suffix: String,
    /// Scalar returned by operations without a success response body
    pub success_scalar: String,
    /// Scalar used for free-form and unmappable schemas
    pub json_scalar: String,
    /// Map well-known formats (date-time, int64, ...) to custom scalars
    pub custom_scalars: bool,
    /// Emit component schemas no operation refers to
    pub include_unreferenced_schemas: bool,
    pub collision_policy: CollisionPolicy,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            body_argument_name: "input".to_string(),
            input_type_suffix: "Input".to_string(),
            success_scalar: "Void".to_string(),
            json_scalar: "JSON".to_string(),
            custom_scalars: true,
            include_unreferenced_schemas: false,
            collision_policy: CollisionPolicy::Suffix,
        }
    }
}

impl TranslatorConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TranslationError::Parse(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            TranslationError::Parse(msg) => {
                TranslationError::Parse(format!("{} (in {:?})", msg, path))
            },
            other => other,
        })
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| TranslationError::Parse(format!("Failed to parse config YAML: {}", e)))?;
        config.check()?;
        Ok(config)
    }

    /// Reject names that can never become valid GraphQL identifiers, and
    /// scalar names that would shadow a built-in or root type
    fn check(&self) -> Result<()> {
        let names = [
            ("body_argument_name", &self.body_argument_name),
            ("success_scalar", &self.success_scalar),
            ("json_scalar", &self.json_scalar),
        ];
        for (key, value) in names {
            if !is_graphql_name(value) {
                return Err(TranslationError::Parse(format!(
                    "config key '{}' is not a valid GraphQL name: '{}'",
                    key, value
                )));
            }
        }
        for (key, value) in [
            ("success_scalar", &self.success_scalar),
            ("json_scalar", &self.json_scalar),
        ] {
            if RESERVED_TYPE_NAMES.contains(&value.as_str()) {
                return Err(TranslationError::Parse(format!(
                    "config key '{}' uses reserved type name '{}'",
                    key, value
                )));
            }
        }
        if !self.input_type_suffix.is_empty()
            && !self
                .input_type_suffix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(TranslationError::Parse(format!(
                "config key 'input_type_suffix' contains invalid characters: '{}'",
                self.input_type_suffix
            )));
        }
        Ok(())
    }
}

/// Type names GraphQL or the root operation types already own
pub const RESERVED_TYPE_NAMES: &[&str] = &[
    "String",
    "Int",
    "Float",
    "Boolean",
    "ID",
    "Query",
    "Mutation",
    "Subscription",
];

/// `/[_A-Za-z][_0-9A-Za-z]*/`
pub fn is_graphql_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
