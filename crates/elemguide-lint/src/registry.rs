//! Rule registry for managing lint rules.

use crate::checker::{CheckResult, Checker};
use crate::config::LintConfig;
use crate::descriptor::ComponentDescriptor;
use crate::error::{RegistryError, RuleError};
use crate::report::Outcome;
use crate::rules::{builtin_rules, FnRule, LintRule, Verdict};
use std::collections::HashSet;

/// Registry of lint rules, kept in registration order.
///
/// Populated once at startup and read-only afterwards.
pub struct RuleRegistry {
    rules: Vec<Box<dyn LintRule>>,
    ids: HashSet<String>,
}

impl RuleRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Creates a registry with all built-in rules and default options.
    pub fn default_rules() -> Self {
        let mut registry = Self::new();
        // Built-in ids are unique; see `rules::tests`.
        for rule in builtin_rules(&LintConfig::default()) {
            registry.insert(rule);
        }
        registry
    }

    /// Creates a registry with the built-in rules selected and configured
    /// by `config`.
    pub fn from_config(config: &LintConfig) -> Result<Self, RegistryError> {
        let rules = builtin_rules(config);
        let known: HashSet<&str> = rules.iter().map(|rule| rule.id()).collect();
        let named = config
            .disable
            .iter()
            .chain(config.only.iter().flatten());
        for id in named {
            if !known.contains(id.as_str()) {
                return Err(RegistryError::UnknownRuleId(id.clone()));
            }
        }

        let mut registry = Self::new();
        for rule in rules {
            if config.is_rule_enabled(rule.id()) {
                registry.register(rule)?;
            } else {
                tracing::debug!(rule = rule.id(), "rule disabled by configuration");
            }
        }
        Ok(registry)
    }

    /// Registers a new lint rule.
    pub fn register(&mut self, rule: Box<dyn LintRule>) -> Result<(), RegistryError> {
        if self.ids.contains(rule.id()) {
            return Err(RegistryError::DuplicateRuleId(rule.id().to_string()));
        }
        self.insert(rule);
        Ok(())
    }

    /// Registers a rule built from a closure.
    pub fn register_fn<F>(
        &mut self,
        id: impl Into<String>,
        description: impl Into<String>,
        severity: Outcome,
        predicate: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&ComponentDescriptor) -> Result<Verdict, RuleError> + Send + Sync + 'static,
    {
        self.register(Box::new(FnRule::new(id, description, severity, predicate)))
    }

    fn insert(&mut self, rule: Box<dyn LintRule>) {
        self.ids.insert(rule.id().to_string());
        self.rules.push(rule);
    }

    /// Iterates over the registered rules in registration order.
    ///
    /// The iterator is lazy and can be cloned to restart it.
    pub fn all(&self) -> impl Iterator<Item = &dyn LintRule> + Clone + '_ {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    /// Looks up a rule by id.
    pub fn get(&self, id: &str) -> Option<&dyn LintRule> {
        self.all().find(|rule| rule.id() == id)
    }

    /// Returns rule metadata for documentation/introspection.
    pub fn rule_metadata(&self) -> Vec<RuleMetadata> {
        self.all()
            .map(|r| RuleMetadata {
                id: r.id().to_string(),
                description: r.description().to_string(),
                severity: r.default_severity(),
            })
            .collect()
    }

    /// Returns the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Runs every rule against one descriptor. See [`Checker::check`].
    pub fn check(&self, descriptor: &ComponentDescriptor) -> Vec<CheckResult> {
        Checker::new(self).check(descriptor)
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::default_rules()
    }
}

/// Metadata about a lint rule for documentation/introspection.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RuleMetadata {
    /// Rule identifier.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Outcome when the rule is violated.
    pub severity: Outcome,
}
