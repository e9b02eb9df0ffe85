//! Check command implementation
//!
//! Extracts every definition under a path, runs the rule registry against
//! each, and prints the report.

use anyhow::{Context, Result};
use elemguide_lint::{report, Checker, Report, RuleRegistry, TextOptions};
use std::path::Path;
use std::process::ExitCode;

use crate::input;

/// Output format for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "unknown format '{}', expected 'text' or 'json'",
                s
            )),
        }
    }
}

/// Options for one `check` run.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    pub config_path: Option<String>,
    pub strict: bool,
    pub disable_rules: Vec<String>,
    pub only_rules: Option<String>,
    pub prefix: Option<String>,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Every result passed or warned.
    Passed,
    /// A rule failed, a definition was malformed, or (strict) a rule warned.
    Failed,
}

impl From<CheckStatus> for ExitCode {
    fn from(status: CheckStatus) -> Self {
        match status {
            CheckStatus::Passed => ExitCode::SUCCESS,
            CheckStatus::Failed => ExitCode::from(1),
        }
    }
}

/// Builds the report for `path` without printing anything.
pub fn build_report(path: &Path, options: &CheckOptions) -> Result<(Report, CheckStatus)> {
    let mut config = input::load_config(options.config_path.as_deref().map(Path::new), path)?;
    config.apply_overrides(
        options.prefix.as_deref(),
        &options.disable_rules,
        options.only_rules.as_deref(),
    );

    let registry = RuleRegistry::from_config(&config).context("Invalid rule configuration")?;
    tracing::debug!(rules = registry.len(), "rule registry ready");

    let loaded = input::load(path)?;
    if loaded.files.is_empty() {
        tracing::warn!(path = %path.display(), "no element definitions found");
    }

    let results = Checker::new(&registry).check_all(&loaded.descriptors);
    let report = report::format(&results, &loaded.malformed);

    let status = if report.passed(options.strict) {
        CheckStatus::Passed
    } else {
        CheckStatus::Failed
    };
    tracing::info!(
        components = report.summary.components,
        failures = report.summary.fail_count,
        warnings = report.summary.warn_count,
        malformed = report.summary.malformed_count,
        "check finished"
    );
    Ok((report, status))
}

/// Run the check command.
///
/// # Arguments
/// * `path` - File or directory to scan
/// * `options` - Rule selection and strictness
/// * `format` - Output format (text or json)
/// * `text` - Rendering options for text output
///
/// # Returns
/// Exit code: 0 if passed, 1 if any failure (or warning in strict mode)
pub fn run(
    path: &str,
    options: &CheckOptions,
    format: OutputFormat,
    text: TextOptions,
) -> Result<ExitCode> {
    let (report, status) = build_report(Path::new(path), options)?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                report
                    .to_json_pretty()
                    .context("Failed to serialize report")?
            );
        }
        OutputFormat::Text => {
            let text = TextOptions {
                strict: options.strict,
                ..text
            };
            print!("{}", report.render_text(&text));
        }
    }

    Ok(status.into())
}
