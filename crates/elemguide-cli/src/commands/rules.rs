//! Rules command implementation
//!
//! Lists the registered rules with their severity and description.

use anyhow::{Context, Result};
use colored::Colorize;
use elemguide_lint::{Outcome, RuleRegistry};
use std::fmt::Write as _;
use std::process::ExitCode;

/// Renders the default rule set as text or pretty JSON.
pub fn render(json: bool) -> Result<String> {
    let registry = RuleRegistry::default_rules();
    let metadata = registry.rule_metadata();

    if json {
        return serde_json::to_string_pretty(&metadata).context("Failed to serialize rules");
    }

    let mut out = format!("{} ({})\n", "Rules".cyan().bold(), metadata.len());
    for rule in &metadata {
        let severity = match rule.severity {
            Outcome::Fail => rule.severity.as_str().red(),
            Outcome::Warn => rule.severity.as_str().yellow(),
            Outcome::Pass => rule.severity.as_str().green(),
        };
        let _ = writeln!(out, "  {:<28} {:<5} {}", rule.id, severity, rule.description);
    }
    Ok(out)
}

/// Run the rules command.
pub fn run(json: bool) -> Result<ExitCode> {
    let out = render(json)?;
    if json {
        println!("{}", out);
    } else {
        print!("{}", out);
    }
    Ok(ExitCode::SUCCESS)
}
