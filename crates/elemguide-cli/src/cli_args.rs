//! CLI argument definitions for the elemguide command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{ArgAction, Parser, Subcommand};

/// elemguide - Custom element conformance checker
#[derive(Parser)]
#[command(name = "elemguide")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase diagnostic logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check custom element definitions in a file or directory
    Check {
        /// File or directory to scan for element records and custom-elements.json manifests
        path: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Path to a configuration file (default: elemguide.json in the scanned directory)
        #[arg(short, long)]
        config: Option<String>,

        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,

        /// Disable specific rules (can be repeated)
        #[arg(long = "disable", value_name = "RULE_ID")]
        disable_rules: Vec<String>,

        /// Only run these rules (comma-separated list)
        #[arg(long = "only", value_name = "RULE_IDS")]
        only_rules: Option<String>,

        /// Organization prefix accepted on event names
        #[arg(long)]
        prefix: Option<String>,

        /// Only list warnings and failures in text output
        #[arg(short, long)]
        quiet: bool,

        /// Disable colored text output
        #[arg(long)]
        no_color: bool,
    },

    /// List the registered rules
    Rules {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_check_defaults() {
        let cli = Cli::try_parse_from(["elemguide", "check", "src"]).unwrap();
        assert_eq!(cli.verbose, 0);
        match cli.command {
            Commands::Check {
                path,
                format,
                config,
                strict,
                disable_rules,
                only_rules,
                prefix,
                quiet,
                no_color,
            } => {
                assert_eq!(path, "src");
                assert_eq!(format, "text");
                assert!(config.is_none());
                assert!(!strict);
                assert!(disable_rules.is_empty());
                assert!(only_rules.is_none());
                assert!(prefix.is_none());
                assert!(!quiet);
                assert!(!no_color);
            }
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn test_cli_parses_check_with_options() {
        let cli = Cli::try_parse_from([
            "elemguide",
            "-vv",
            "check",
            "components",
            "--format=json",
            "--strict",
            "--disable",
            "events/lowercase-name",
            "--disable",
            "slots/unique-names",
            "--only",
            "tag/hyphenated-name",
            "--prefix",
            "acme",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Check {
                format,
                strict,
                disable_rules,
                only_rules,
                prefix,
                ..
            } => {
                assert_eq!(format, "json");
                assert!(strict);
                assert_eq!(
                    disable_rules,
                    vec!["events/lowercase-name", "slots/unique-names"]
                );
                assert_eq!(only_rules.as_deref(), Some("tag/hyphenated-name"));
                assert_eq!(prefix.as_deref(), Some("acme"));
            }
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["elemguide", "check", "src", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_cli_parses_rules() {
        let cli = Cli::try_parse_from(["elemguide", "rules", "--json"]).unwrap();
        match cli.command {
            Commands::Rules { json } => assert!(json),
            _ => panic!("expected rules command"),
        }
    }
}
