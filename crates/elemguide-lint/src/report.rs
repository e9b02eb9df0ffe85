//! Report types and rendering.

use crate::checker::CheckResult;
use crate::error::ExtractError;
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Result of one rule against one component, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The component follows the rule.
    Pass,
    /// Likely problem, worth investigating.
    Warn,
    /// Breaks the guide; fails the run.
    Fail,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Pass => "pass",
            Outcome::Warn => "warn",
            Outcome::Fail => "fail",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pass" => Ok(Outcome::Pass),
            "warn" | "warning" => Ok(Outcome::Warn),
            "fail" | "error" => Ok(Outcome::Fail),
            _ => Err(format!("unknown outcome '{}', expected pass, warn or fail", s)),
        }
    }
}

/// One rule result inside a component section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    pub rule_id: String,
    pub outcome: Outcome,
    pub message: String,
}

/// All results for one component, failures first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentReport {
    /// Tag name.
    pub component: String,
    /// File the definition was read from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub results: Vec<RuleResult>,
}

impl ComponentReport {
    /// Highest outcome in this section.
    pub fn worst(&self) -> Outcome {
        self.results
            .iter()
            .map(|r| r.outcome)
            .max()
            .unwrap_or(Outcome::Pass)
    }
}

/// A definition that could not be checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MalformedEntry {
    pub component: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl From<&ExtractError> for MalformedEntry {
    fn from(err: &ExtractError) -> Self {
        Self {
            component: err.tag().to_string(),
            reason: err.reason().to_string(),
            source: err.origin().map(str::to_string),
        }
    }
}

/// Summary statistics for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub components: usize,
    pub pass_count: usize,
    pub warn_count: usize,
    pub fail_count: usize,
    pub malformed_count: usize,
}

/// Complete report for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// True if nothing failed and every definition was checked.
    pub ok: bool,
    pub components: Vec<ComponentReport>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub malformed: Vec<MalformedEntry>,
    pub summary: ReportSummary,
}

/// Options for [`Report::render_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextOptions {
    /// Emit ANSI colors.
    pub color: bool,
    /// List passing results too.
    pub show_passes: bool,
    /// Treat warnings as failures in the verdict line.
    pub strict: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            color: false,
            show_passes: true,
            strict: false,
        }
    }
}

/// Groups check results by component, then by outcome (fail, warn, pass).
///
/// Each checked descriptor gets its own section, keyed by its position,
/// tag and source. Sections keep the order in which they first appear in
/// `results`; results with the same outcome keep their rule order.
pub fn format(results: &[CheckResult], malformed: &[ExtractError]) -> Report {
    let mut components: Vec<ComponentReport> = Vec::new();
    let mut keys: Vec<(usize, &str, Option<&str>)> = Vec::new();

    for result in results {
        let key = (
            result.position,
            result.component.as_str(),
            result.source.as_deref(),
        );
        let section = match keys.iter().position(|k| *k == key) {
            Some(index) => &mut components[index],
            None => {
                keys.push(key);
                components.push(ComponentReport {
                    component: result.component.clone(),
                    source: result.source.clone(),
                    results: Vec::new(),
                });
                let last = components.len() - 1;
                &mut components[last]
            }
        };
        section.results.push(RuleResult {
            rule_id: result.rule_id.clone(),
            outcome: result.outcome,
            message: result.message.clone(),
        });
    }

    for section in &mut components {
        // Stable sort keeps rule order within one outcome.
        section.results.sort_by(|a, b| b.outcome.cmp(&a.outcome));
    }

    let mut summary = ReportSummary {
        components: components.len(),
        malformed_count: malformed.len(),
        ..ReportSummary::default()
    };
    for result in results {
        match result.outcome {
            Outcome::Pass => summary.pass_count += 1,
            Outcome::Warn => summary.warn_count += 1,
            Outcome::Fail => summary.fail_count += 1,
        }
    }

    Report {
        ok: summary.fail_count == 0 && summary.malformed_count == 0,
        components,
        malformed: malformed.iter().map(MalformedEntry::from).collect(),
        summary,
    }
}

impl Report {
    pub fn has_failures(&self) -> bool {
        !self.ok
    }

    pub fn has_warnings(&self) -> bool {
        self.summary.warn_count > 0
    }

    /// Whether the run passes; with `strict`, warnings fail it too.
    pub fn passed(&self, strict: bool) -> bool {
        self.ok && !(strict && self.has_warnings())
    }

    /// Every failing result, paired with its component.
    pub fn failures(&self) -> impl Iterator<Item = (&ComponentReport, &RuleResult)> {
        self.components.iter().flat_map(|component| {
            component
                .results
                .iter()
                .filter(|r| r.outcome == Outcome::Fail)
                .map(move |r| (component, r))
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Renders the report as human-readable text.
    pub fn render_text(&self, options: &TextOptions) -> String {
        let paint = |text: &str, style: fn(&str) -> ColoredString| -> String {
            if options.color {
                style(text).to_string()
            } else {
                text.to_string()
            }
        };

        let mut out = String::new();

        for component in &self.components {
            let source = component
                .source
                .as_ref()
                .map(|s| format!(" ({})", s))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "{}{}",
                paint(&component.component, |s| s.cyan().bold()),
                paint(&source, |s| s.dimmed())
            );

            for result in &component.results {
                if result.outcome == Outcome::Pass && !options.show_passes {
                    continue;
                }
                let marker = match result.outcome {
                    Outcome::Fail => paint("x", |s| s.red().bold()),
                    Outcome::Warn => paint("!", |s| s.yellow().bold()),
                    Outcome::Pass => paint("ok", |s| s.green()),
                };
                let _ = writeln!(
                    out,
                    "  {} [{}] {}",
                    marker,
                    paint(&result.rule_id, |s| s.cyan()),
                    result.message
                );
            }
            out.push('\n');
        }

        if !self.malformed.is_empty() {
            let _ = writeln!(out, "{}", paint("Malformed definitions:", |s| s.red().bold()));
            for entry in &self.malformed {
                let source = entry
                    .source
                    .as_ref()
                    .map(|s| format!(" ({})", s))
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    "  {} {}{}: {}",
                    paint("x", |s| s.red().bold()),
                    entry.component,
                    paint(&source, |s| s.dimmed()),
                    entry.reason
                );
            }
            out.push('\n');
        }

        let summary = format!(
            "{} component(s): {} fail, {} warn, {} pass, {} malformed",
            self.summary.components,
            self.summary.fail_count,
            self.summary.warn_count,
            self.summary.pass_count,
            self.summary.malformed_count
        );
        let verdict = if self.passed(options.strict) {
            paint("PASSED", |s| s.green().bold())
        } else {
            paint("FAILED", |s| s.red().bold())
        };
        let _ = writeln!(out, "{} {}", verdict, paint(&summary, |s| s.dimmed()));

        out
    }
}
