//! Slot usage rules.

use crate::descriptor::ComponentDescriptor;
use crate::error::RuleError;
use crate::report::Outcome;
use crate::rules::{LintRule, Verdict};
use std::collections::BTreeSet;

/// Returns all slot rules.
pub fn all_rules() -> Vec<Box<dyn LintRule>> {
    vec![Box::new(NamedSlotsRule), Box::new(UniqueSlotsRule)]
}

/// With more than one slot, every slot must be named.
pub struct NamedSlotsRule;

impl LintRule for NamedSlotsRule {
    fn id(&self) -> &str {
        "slots/named-when-multiple"
    }

    fn description(&self) -> &str {
        "Components with several slots name every slot"
    }

    fn default_severity(&self) -> Outcome {
        Outcome::Fail
    }

    fn check(&self, descriptor: &ComponentDescriptor) -> Result<Verdict, RuleError> {
        let slots = &descriptor.slots;
        if slots.len() <= 1 {
            return Ok(Verdict::pass(match slots.first() {
                None => "uses only the default slot".to_string(),
                Some(name) if name.trim().is_empty() => "has a single unnamed slot".to_string(),
                Some(name) => format!("has a single slot '{}'", name),
            }));
        }

        let unnamed: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter(|(_, name)| name.trim().is_empty())
            .map(|(index, _)| index)
            .collect();
        if unnamed.is_empty() {
            Ok(Verdict::pass(format!("all {} slots are named", slots.len())))
        } else {
            Ok(Verdict::fail(format!(
                "{} slots declared but slot(s) at position {:?} have no name",
                slots.len(),
                unnamed
            )))
        }
    }
}

/// Slot names must not repeat.
pub struct UniqueSlotsRule;

impl LintRule for UniqueSlotsRule {
    fn id(&self) -> &str {
        "slots/unique-names"
    }

    fn description(&self) -> &str {
        "Slot names are unique"
    }

    fn default_severity(&self) -> Outcome {
        Outcome::Fail
    }

    fn check(&self, descriptor: &ComponentDescriptor) -> Result<Verdict, RuleError> {
        let mut seen = BTreeSet::new();
        let mut duplicates = BTreeSet::new();
        for name in &descriptor.slots {
            let name = name.trim();
            if !seen.insert(name) {
                duplicates.insert(name);
            }
        }

        let problems = duplicates
            .into_iter()
            .map(|name| {
                if name.is_empty() {
                    "the unnamed slot is declared more than once".to_string()
                } else {
                    format!("slot '{}' is declared more than once", name)
                }
            })
            .collect();

        Ok(Verdict::from_problems(
            Outcome::Fail,
            problems,
            "slot names are unique",
        ))
    }
}
