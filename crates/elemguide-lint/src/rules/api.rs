//! Public API rules: attributes, properties and methods.

use crate::config::LintConfig;
use crate::descriptor::{ComponentDescriptor, MemberKind};
use crate::error::RuleError;
use crate::report::Outcome;
use crate::rules::{LintRule, Verdict};
use std::collections::BTreeSet;

/// Members every element inherits from `HTMLElement` and its ancestors.
/// Stored lowercase; comparison ignores case.
pub const RESERVED_MEMBERS: &[&str] = &[
    // global attributes and their properties
    "accesskey",
    "autocapitalize",
    "autofocus",
    "class",
    "classname",
    "classlist",
    "contenteditable",
    "dataset",
    "dir",
    "draggable",
    "enterkeyhint",
    "hidden",
    "id",
    "inert",
    "inputmode",
    "is",
    "lang",
    "nonce",
    "part",
    "popover",
    "role",
    "slot",
    "spellcheck",
    "style",
    "tabindex",
    "title",
    "translate",
    // element state
    "attributes",
    "children",
    "innerhtml",
    "outerhtml",
    "innertext",
    "textcontent",
    "shadowroot",
    "tagname",
    "localname",
    "parentelement",
    "parentnode",
    "isconnected",
    // methods
    "after",
    "append",
    "attachshadow",
    "before",
    "blur",
    "click",
    "closest",
    "dispatchevent",
    "addeventlistener",
    "removeeventlistener",
    "focus",
    "getattribute",
    "hasattribute",
    "matches",
    "prepend",
    "queryselector",
    "queryselectorall",
    "remove",
    "removeattribute",
    "replacewith",
    "setattribute",
    "toggleattribute",
];

/// Callbacks an element is meant to define; never treated as shadowing.
pub const LIFECYCLE_CALLBACKS: &[&str] = &[
    "connectedCallback",
    "disconnectedCallback",
    "adoptedCallback",
    "attributeChangedCallback",
    "connectedMoveCallback",
    "formAssociatedCallback",
    "formResetCallback",
    "formDisabledCallback",
    "formStateRestoreCallback",
];

/// Returns all API rules.
pub fn all_rules(config: &LintConfig) -> Vec<Box<dyn LintRule>> {
    vec![
        Box::new(ReservedMemberRule::new(
            &config.reserved_members,
            &config.allow_reserved,
        )),
        Box::new(LowercaseAttributeRule),
    ]
}

/// Warns when a member shadows a built-in element member without an
/// explicit allowance.
pub struct ReservedMemberRule {
    reserved: BTreeSet<String>,
    allowed: BTreeSet<String>,
}

impl ReservedMemberRule {
    pub fn new(extra_reserved: &[String], allowed: &[String]) -> Self {
        let reserved = RESERVED_MEMBERS
            .iter()
            .map(|name| name.to_string())
            .chain(extra_reserved.iter().map(|name| name.to_ascii_lowercase()))
            .collect();
        let allowed = allowed.iter().map(|name| name.to_ascii_lowercase()).collect();
        Self { reserved, allowed }
    }

    fn is_allowed(&self, descriptor: &ComponentDescriptor, key: &str) -> bool {
        self.allowed.contains(key)
            || descriptor
                .allow_reserved
                .iter()
                .any(|name| name.eq_ignore_ascii_case(key))
    }
}

impl Default for ReservedMemberRule {
    fn default() -> Self {
        Self::new(&[], &[])
    }
}

impl LintRule for ReservedMemberRule {
    fn id(&self) -> &str {
        "api/reserved-member"
    }

    fn description(&self) -> &str {
        "Attributes, properties and methods do not shadow built-in element members unless allowed"
    }

    fn default_severity(&self) -> Outcome {
        Outcome::Warn
    }

    fn check(&self, descriptor: &ComponentDescriptor) -> Result<Verdict, RuleError> {
        let problems: Vec<String> = descriptor
            .members()
            .filter(|(kind, name)| !(*kind == MemberKind::Method && LIFECYCLE_CALLBACKS.contains(name)))
            .filter_map(|(kind, name)| {
                let key = name.to_ascii_lowercase();
                if self.reserved.contains(&key) && !self.is_allowed(descriptor, &key) {
                    Some(format!(
                        "{} '{}' shadows a built-in element member; rename it or list it in allowReserved",
                        kind, name
                    ))
                } else {
                    None
                }
            })
            .collect();

        Ok(Verdict::from_problems(
            Outcome::Warn,
            problems,
            "no member shadows a built-in element member",
        ))
    }
}

/// Warns on attribute names with uppercase letters; HTML lowercases them.
pub struct LowercaseAttributeRule;

impl LintRule for LowercaseAttributeRule {
    fn id(&self) -> &str {
        "attributes/lowercase-name"
    }

    fn description(&self) -> &str {
        "Attribute names are lowercase"
    }

    fn default_severity(&self) -> Outcome {
        Outcome::Warn
    }

    fn check(&self, descriptor: &ComponentDescriptor) -> Result<Verdict, RuleError> {
        let problems = descriptor
            .attributes
            .keys()
            .filter(|name| name.chars().any(|c| c.is_uppercase()))
            .map(|name| {
                format!(
                    "attribute '{}' is never observed as written; use '{}'",
                    name,
                    name.to_lowercase()
                )
            })
            .collect();

        Ok(Verdict::from_problems(
            Outcome::Warn,
            problems,
            "attribute names are lowercase",
        ))
    }
}
