//! Tag name rules.

use crate::descriptor::ComponentDescriptor;
use crate::error::RuleError;
use crate::report::Outcome;
use crate::rules::{LintRule, Verdict};

/// Names the HTML standard reserves; they cannot be custom element names.
pub const RESERVED_TAG_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Returns all tag rules.
pub fn all_rules() -> Vec<Box<dyn LintRule>> {
    vec![
        Box::new(HyphenatedNameRule),
        Box::new(ValidNameRule),
        Box::new(ReservedNameRule),
    ]
}

/// Requires a hyphen with a non-empty prefix before it.
pub struct HyphenatedNameRule;

impl LintRule for HyphenatedNameRule {
    fn id(&self) -> &str {
        "tag/hyphenated-name"
    }

    fn description(&self) -> &str {
        "Tag names contain a hyphen after a non-empty prefix"
    }

    fn default_severity(&self) -> Outcome {
        Outcome::Fail
    }

    fn check(&self, descriptor: &ComponentDescriptor) -> Result<Verdict, RuleError> {
        let tag = descriptor.tag_name.as_str();
        let verdict = if !tag.contains('-') {
            Verdict::fail(format!("tag name '{}' has no hyphen", tag))
        } else if tag.starts_with('-') {
            Verdict::fail(format!("tag name '{}' has no prefix before its hyphen", tag))
        } else if tag.ends_with('-') {
            Verdict::fail(format!("tag name '{}' ends with a hyphen", tag))
        } else {
            Verdict::pass(format!("tag name '{}' is hyphenated", tag))
        };
        Ok(verdict)
    }
}

/// Checks the characters the HTML parser accepts in a custom element name.
pub struct ValidNameRule;

impl LintRule for ValidNameRule {
    fn id(&self) -> &str {
        "tag/valid-name"
    }

    fn description(&self) -> &str {
        "Tag names start with a lowercase ASCII letter and contain no uppercase letters or separators"
    }

    fn default_severity(&self) -> Outcome {
        Outcome::Fail
    }

    fn check(&self, descriptor: &ComponentDescriptor) -> Result<Verdict, RuleError> {
        let tag = descriptor.tag_name.as_str();
        let mut problems = Vec::new();

        if !tag.starts_with(|c: char| c.is_ascii_lowercase()) {
            problems.push(format!(
                "tag name '{}' must start with a lowercase ASCII letter",
                tag
            ));
        }
        if tag.chars().any(|c| c.is_ascii_uppercase()) {
            problems.push(format!("tag name '{}' contains uppercase letters", tag));
        }
        let forbidden: Vec<char> = tag
            .chars()
            .filter(|c| c.is_whitespace() || matches!(c, '/' | '>' | '=' | '"' | '\'' | '\0'))
            .collect();
        if !forbidden.is_empty() {
            problems.push(format!(
                "tag name '{}' contains forbidden characters {:?}",
                tag, forbidden
            ));
        }

        Ok(Verdict::from_problems(
            Outcome::Fail,
            problems,
            format!("tag name '{}' is a valid custom element name", tag),
        ))
    }
}

/// Rejects the hyphenated names reserved by the HTML standard.
pub struct ReservedNameRule;

impl LintRule for ReservedNameRule {
    fn id(&self) -> &str {
        "tag/reserved-name"
    }

    fn description(&self) -> &str {
        "Tag names are not reserved by the HTML standard"
    }

    fn default_severity(&self) -> Outcome {
        Outcome::Fail
    }

    fn check(&self, descriptor: &ComponentDescriptor) -> Result<Verdict, RuleError> {
        let tag = descriptor.tag_name.as_str();
        if RESERVED_TAG_NAMES.contains(&tag.to_ascii_lowercase().as_str()) {
            Ok(Verdict::fail(format!(
                "tag name '{}' is reserved by the HTML standard",
                tag
            )))
        } else {
            Ok(Verdict::pass(format!("tag name '{}' is not reserved", tag)))
        }
    }
}
