//! Lint configuration.
//!
//! Read from `elemguide.json` by the CLI; every field is optional.

use serde::{Deserialize, Serialize};

/// Default configuration file name, looked up in the scanned directory.
pub const CONFIG_FILE_NAME: &str = "elemguide.json";

/// Options controlling which rules run and how they judge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LintConfig {
    /// Organization prefix accepted on event names besides the tag prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Rule ids to skip.
    #[serde(default)]
    pub disable: Vec<String>,
    /// If set, only these rule ids run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only: Option<Vec<String>>,
    /// Additional member names treated as reserved.
    #[serde(default)]
    pub reserved_members: Vec<String>,
    /// Reserved member names allowed on every component.
    #[serde(default)]
    pub allow_reserved: Vec<String>,
}

impl LintConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Checks if a rule is enabled.
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        if self.disable.iter().any(|id| id == rule_id) {
            return false;
        }
        if let Some(ref only) = self.only {
            return only.iter().any(|id| id == rule_id);
        }
        true
    }

    /// Applies command-line overrides on top of file values.
    pub fn apply_overrides(
        &mut self,
        prefix: Option<&str>,
        disable: &[String],
        only: Option<&str>,
    ) {
        if let Some(prefix) = prefix {
            self.prefix = Some(prefix.to_string());
        }
        for id in disable {
            if !self.disable.contains(id) {
                self.disable.push(id.clone());
            }
        }
        if let Some(only) = only {
            self.only = Some(
                only.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect(),
            );
        }
    }
}
