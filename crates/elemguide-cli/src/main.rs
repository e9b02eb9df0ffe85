//! elemguide CLI - conformance checker for web custom-element definitions
//!
//! Scans element records and Custom Elements Manifests, checks each element
//! against the style-guide rules, and reports the results.

use clap::Parser;
use std::process::ExitCode;

mod cli_args;

use cli_args::{Cli, Commands};
use elemguide_cli::commands;
use elemguide_cli::commands::check::{CheckOptions, OutputFormat};
use elemguide_cli::logging;
use elemguide_lint::TextOptions;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose) {
        eprintln!("{}: {}", colored::Colorize::yellow("warning"), e);
    }

    let result = match cli.command {
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
            let options = CheckOptions {
                config_path: config,
                strict,
                disable_rules,
                only_rules,
                prefix,
            };
            let text = TextOptions {
                color: !no_color,
                show_passes: !quiet,
                strict,
            };
            format
                .parse::<OutputFormat>()
                .map_err(anyhow::Error::msg)
                .and_then(|format| commands::check::run(&path, &options, format, text))
        }
        Commands::Rules { json } => commands::rules::run(json),
    };

    commands::exit_code(result)
}
