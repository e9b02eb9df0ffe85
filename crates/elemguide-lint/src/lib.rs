//! Conformance checks for web custom-element definitions.
//!
//! Extracts a normalized descriptor from each element definition, runs the
//! registered style-guide rules against it, and builds a report.
//!
//! # Example
//!
//! ```
//! use elemguide_lint::{extract, report, Checker, RawDefinition, RuleRegistry, TextOptions};
//!
//! let registry = RuleRegistry::default_rules();
//! let raw = RawDefinition {
//!     events: vec!["org-press".to_string()],
//!     ..RawDefinition::new("org-button")
//! };
//! let descriptor = extract(&raw).unwrap();
//!
//! let results = Checker::new(&registry).check(&descriptor);
//! let report = report::format(&results, &[]);
//! assert!(report.ok);
//! print!("{}", report.render_text(&TextOptions::default()));
//! ```

pub mod checker;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod extract;
pub mod registry;
pub mod report;
pub mod rules;
pub mod source;

pub use checker::{CheckResult, Checker, RULE_EXECUTION_ERROR};
pub use config::{LintConfig, CONFIG_FILE_NAME};
pub use descriptor::{AttributeType, ComponentDescriptor, MemberKind, PropertyType};
pub use error::{ExtractError, RegistryError, RuleError, SourceError};
pub use extract::{extract, reject_duplicate_tags, RawDefinition, RawMember, RawMethod};
pub use registry::{RuleMetadata, RuleRegistry};
pub use report::{ComponentReport, MalformedEntry, Outcome, Report, ReportSummary, RuleResult, TextOptions};
pub use rules::{FnRule, LintRule, Verdict};
pub use source::{parse_source, SourceKind};
