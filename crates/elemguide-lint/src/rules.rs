//! Lint rule trait and the built-in rule modules.

use crate::config::LintConfig;
use crate::descriptor::ComponentDescriptor;
use crate::error::RuleError;
use crate::report::Outcome;

pub mod api;
pub mod events;
pub mod slots;
pub mod tag;

/// The outcome of one rule against one descriptor, with an explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub outcome: Outcome,
    pub message: String,
}

impl Verdict {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Pass,
            message: message.into(),
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Warn,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Fail,
            message: message.into(),
        }
    }

    /// Pass when `problems` is empty, otherwise `severity` with the problems
    /// joined into one message.
    pub fn from_problems(severity: Outcome, problems: Vec<String>, ok_message: impl Into<String>) -> Self {
        if problems.is_empty() {
            Self::pass(ok_message)
        } else {
            Self {
                outcome: severity,
                message: problems.join("; "),
            }
        }
    }
}

/// A style-guide rule checked against a component descriptor.
pub trait LintRule: Send + Sync {
    /// Unique identifier (e.g., "tag/hyphenated-name", "slots/unique-names").
    fn id(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// Outcome reported when the rule is violated.
    fn default_severity(&self) -> Outcome;

    /// Runs the check.
    ///
    /// An `Err` means the rule could not decide; the checker records it as a
    /// failed result without stopping other rules.
    fn check(&self, descriptor: &ComponentDescriptor) -> Result<Verdict, RuleError>;
}

/// A rule built from a closure.
pub struct FnRule<F> {
    id: String,
    description: String,
    severity: Outcome,
    predicate: F,
}

impl<F> FnRule<F>
where
    F: Fn(&ComponentDescriptor) -> Result<Verdict, RuleError> + Send + Sync,
{
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        severity: Outcome,
        predicate: F,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            severity,
            predicate,
        }
    }
}

impl<F> LintRule for FnRule<F>
where
    F: Fn(&ComponentDescriptor) -> Result<Verdict, RuleError> + Send + Sync,
{
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn default_severity(&self) -> Outcome {
        self.severity
    }

    fn check(&self, descriptor: &ComponentDescriptor) -> Result<Verdict, RuleError> {
        (self.predicate)(descriptor)
    }
}

/// All built-in rules in their registration order.
pub fn builtin_rules(config: &LintConfig) -> Vec<Box<dyn LintRule>> {
    let mut rules = Vec::new();
    rules.extend(tag::all_rules());
    rules.extend(api::all_rules(config));
    rules.extend(events::all_rules(config));
    rules.extend(slots::all_rules());
    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_rule_ids_are_unique() {
        let rules = builtin_rules(&LintConfig::default());
        let ids: HashSet<&str> = rules.iter().map(|r| r.id()).collect();
        assert_eq!(ids.len(), rules.len());
        assert_eq!(rules.len(), 9);
    }

    #[test]
    fn test_fn_rule_delegates_to_closure() {
        let rule = FnRule::new("custom/always-warn", "warns", Outcome::Warn, |d| {
            Ok(Verdict::warn(format!("{} looked at", d.tag_name)))
        });
        let verdict = rule.check(&ComponentDescriptor::new("org-x")).unwrap();
        assert_eq!(verdict, Verdict::warn("org-x looked at"));
        assert_eq!(rule.id(), "custom/always-warn");
        assert_eq!(rule.default_severity(), Outcome::Warn);
    }

    #[test]
    fn test_from_problems() {
        let ok = Verdict::from_problems(Outcome::Fail, vec![], "fine");
        assert_eq!(ok, Verdict::pass("fine"));

        let bad = Verdict::from_problems(
            Outcome::Warn,
            vec!["one".to_string(), "two".to_string()],
            "fine",
        );
        assert_eq!(bad, Verdict::warn("one; two"));
    }
}
