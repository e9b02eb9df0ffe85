//! Event naming rules.

use crate::config::LintConfig;
use crate::descriptor::ComponentDescriptor;
use crate::error::RuleError;
use crate::report::Outcome;
use crate::rules::{LintRule, Verdict};

/// Separators accepted between a prefix and the rest of an event name.
pub const EVENT_PREFIX_SEPARATORS: &[char] = &['-', ':'];

/// Returns all event rules.
pub fn all_rules(config: &LintConfig) -> Vec<Box<dyn LintRule>> {
    vec![
        Box::new(PrefixedEventRule::new(config.prefix.clone())),
        Box::new(LowercaseEventRule),
    ]
}

/// Warns on events not namespaced by the tag prefix or the organization
/// prefix.
#[derive(Default)]
pub struct PrefixedEventRule {
    org_prefix: Option<String>,
}

impl PrefixedEventRule {
    pub fn new(org_prefix: Option<String>) -> Self {
        Self {
            org_prefix: org_prefix.filter(|prefix| !prefix.is_empty()),
        }
    }
}

fn has_prefix(event: &str, prefix: &str) -> bool {
    event
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix(EVENT_PREFIX_SEPARATORS))
        .is_some_and(|rest| !rest.is_empty())
}

impl LintRule for PrefixedEventRule {
    fn id(&self) -> &str {
        "events/prefixed-name"
    }

    fn description(&self) -> &str {
        "Event names start with the tag prefix or organization prefix"
    }

    fn default_severity(&self) -> Outcome {
        Outcome::Warn
    }

    fn check(&self, descriptor: &ComponentDescriptor) -> Result<Verdict, RuleError> {
        if descriptor.events.is_empty() {
            return Ok(Verdict::pass("no events declared"));
        }

        let prefixes: Vec<&str> = descriptor
            .prefix()
            .into_iter()
            .chain(self.org_prefix.as_deref())
            .collect();
        if prefixes.is_empty() {
            return Err(RuleError::new(format!(
                "tag name '{}' has no prefix to compare event names against",
                descriptor.tag_name
            )));
        }

        let expected = prefixes
            .iter()
            .map(|prefix| format!("'{}-'", prefix))
            .collect::<Vec<_>>()
            .join(" or ");
        let problems = descriptor
            .events
            .iter()
            .filter(|event| !prefixes.iter().any(|prefix| has_prefix(event, prefix)))
            .map(|event| format!("event '{}' should start with {}", event, expected))
            .collect();

        Ok(Verdict::from_problems(
            Outcome::Warn,
            problems,
            "event names are prefixed",
        ))
    }
}

/// Warns on event names with uppercase letters.
pub struct LowercaseEventRule;

impl LintRule for LowercaseEventRule {
    fn id(&self) -> &str {
        "events/lowercase-name"
    }

    fn description(&self) -> &str {
        "Event names are lowercase"
    }

    fn default_severity(&self) -> Outcome {
        Outcome::Warn
    }

    fn check(&self, descriptor: &ComponentDescriptor) -> Result<Verdict, RuleError> {
        let problems = descriptor
            .events
            .iter()
            .filter(|event| event.chars().any(|c| c.is_uppercase()))
            .map(|event| format!("event '{}' contains uppercase letters", event))
            .collect();

        Ok(Verdict::from_problems(
            Outcome::Warn,
            problems,
            "event names are lowercase",
        ))
    }
}
