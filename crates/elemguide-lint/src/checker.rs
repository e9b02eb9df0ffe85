//! Runs registered rules against component descriptors.

use crate::descriptor::ComponentDescriptor;
use crate::registry::RuleRegistry;
use crate::report::Outcome;
use crate::rules::LintRule;
use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};

/// Prefix of the message recorded when a rule itself breaks.
pub const RULE_EXECUTION_ERROR: &str = "RuleExecutionError";

/// The result of one rule against one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Position of the checked descriptor in the batch given to
    /// [`Checker::check_all`]; always 0 for [`Checker::check`].
    #[serde(default)]
    pub position: usize,
    /// Tag name of the checked component.
    pub component: String,
    /// File the component was read from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub rule_id: String,
    pub outcome: Outcome,
    pub message: String,
}

impl CheckResult {
    /// True when the rule broke rather than judged the component.
    pub fn is_execution_error(&self) -> bool {
        self.outcome == Outcome::Fail && self.message.starts_with(RULE_EXECUTION_ERROR)
    }
}

/// Checks descriptors against every rule in a registry.
pub struct Checker<'a> {
    registry: &'a RuleRegistry,
}

impl<'a> Checker<'a> {
    pub fn new(registry: &'a RuleRegistry) -> Self {
        Self { registry }
    }

    /// Runs every registered rule against `descriptor`.
    ///
    /// Returns exactly one result per rule, in registration order. A rule
    /// that returns an error or panics yields a failed result; the other
    /// rules still run.
    pub fn check(&self, descriptor: &ComponentDescriptor) -> Vec<CheckResult> {
        self.check_at(0, descriptor)
    }

    /// Checks each descriptor in order and concatenates the results.
    ///
    /// Results carry the descriptor's position, so two definitions of the
    /// same tag stay apart in the report.
    pub fn check_all<'d, I>(&self, descriptors: I) -> Vec<CheckResult>
    where
        I: IntoIterator<Item = &'d ComponentDescriptor>,
    {
        descriptors
            .into_iter()
            .enumerate()
            .flat_map(|(position, descriptor)| self.check_at(position, descriptor))
            .collect()
    }

    fn check_at(&self, position: usize, descriptor: &ComponentDescriptor) -> Vec<CheckResult> {
        let results: Vec<CheckResult> = self
            .registry
            .all()
            .map(|rule| run_rule(rule, position, descriptor))
            .collect();

        tracing::debug!(
            position,
            component = %descriptor.tag_name,
            rules = results.len(),
            failed = results.iter().filter(|r| r.outcome == Outcome::Fail).count(),
            "checked component"
        );
        results
    }
}

fn run_rule(rule: &dyn LintRule, position: usize, descriptor: &ComponentDescriptor) -> CheckResult {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.check(descriptor)));

    let (outcome, message) = match outcome {
        Ok(Ok(verdict)) => (verdict.outcome, verdict.message),
        Ok(Err(err)) => {
            tracing::warn!(rule = rule.id(), component = %descriptor.tag_name, error = %err, "rule returned an error");
            (Outcome::Fail, format!("{}: {}", RULE_EXECUTION_ERROR, err))
        }
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            tracing::warn!(rule = rule.id(), component = %descriptor.tag_name, %reason, "rule panicked");
            (
                Outcome::Fail,
                format!("{}: rule panicked: {}", RULE_EXECUTION_ERROR, reason),
            )
        }
    };

    CheckResult {
        position,
        component: descriptor.tag_name.clone(),
        source: descriptor.source.clone(),
        rule_id: rule.id().to_string(),
        outcome,
        message,
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
