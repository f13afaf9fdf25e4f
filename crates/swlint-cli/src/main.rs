//! swlint - lint and migrate Shopware extension code
//!
//! Administration rules:
//! - no-src-import: Forbid imports from the administration 'src/' tree
//! - no-snippet-import: Remove snippet JSON imports
//! - state-import: Replace Shopware.State with Shopware.Store (6.7+)
//!
//! Storefront rules:
//! - no-http-client: Transform the legacy HttpClient service to fetch
//! - migrate-plugin-manager: Use window.PluginManager instead of the import
//! - no-dom-access-helper: Replace the DomAccess helper with DOM APIs
//! - no-query-string: Replace the query-string package with URLSearchParams
//!
//! Style rules:
//! - no-scss-extension-import: Forbid the .scss extension on partial imports

mod config;
mod output;
mod process;

use anyhow::{bail, Result};
use clap::Parser;
use colored::*;
use rayon::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;

use swlint_core::ShopwareVersion;
use swlint_rules::{Environment, RuleRegistry, RuleSet};
use swlint_style::StyleRuleRegistry;
use walkdir::{DirEntry, WalkDir};

use config::Config;
use output::{FileResult, OutputFormat, Reporter};
use process::{file_kind, process_file, write_file};

#[derive(Parser)]
#[command(name = "swlint")]
#[command(version)]
#[command(about = "Lint and migrate Shopware extension code")]
struct Cli {
    /// Files or directories to process
    #[arg(required_unless_present = "list_rules")]
    paths: Vec<PathBuf>,

    /// Check for issues without applying fixes (default mode)
    #[arg(long, conflicts_with = "fix")]
    check: bool,

    /// Apply fixes to files
    #[arg(long, conflicts_with = "check")]
    fix: bool,

    /// Environment to lint: administration or storefront
    #[arg(long, short = 'e', value_name = "ENV")]
    env: Option<String>,

    /// Target Shopware version for version-gated rules
    /// (falls back to config, then SHOPWARE_PROJECT_VERSION)
    #[arg(long, value_name = "VERSION")]
    shopware_version: Option<String>,

    /// Show verbose output
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Rules to run (can be specified multiple times). Overrides config file.
    #[arg(long, short = 'r', value_name = "RULE")]
    rule: Vec<String>,

    /// Output format: text, json
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    format: String,

    /// Shorthand for --format json
    #[arg(long, conflicts_with = "format")]
    json: bool,

    /// Path to config file (default: auto-detect .swlint.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long)]
    no_config: bool,

    /// List available rules and exit
    #[arg(long)]
    list_rules: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red(), e);
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.list_rules {
        print_rules();
        return Ok(ExitCode::SUCCESS);
    }

    let output_format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::from_str(&cli.format).ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid output format '{}'. Valid options: text, json",
                cli.format
            )
        })?
    };

    // Load config file
    let config = if cli.no_config {
        Config::default()
    } else if let Some(config_path) = &cli.config {
        let cfg = Config::load_path(config_path)?;
        if cli.verbose && output_format == OutputFormat::Text {
            println!("{}: {}", "Using config".bold(), config_path.display());
        }
        cfg
    } else {
        match Config::load()? {
            Some((cfg, path)) => {
                if cli.verbose && output_format == OutputFormat::Text {
                    println!("{}: {}", "Using config".bold(), path.display());
                }
                cfg
            }
            None => Config::default(),
        }
    };

    let environment = resolve_environment(cli.env.as_deref(), &config)?;
    let version = resolve_version(&cli, &config);

    validate_rule_names(&cli.rule, &config)?;

    // Compose the effective rule set
    let all_rules = RuleRegistry::for_environment(environment).all_names();
    let overrides = config.effective_overrides(&all_rules, &cli.rule);
    let rule_set = RuleSet::compose(environment, version.as_ref(), &overrides);

    let style_registry = StyleRuleRegistry::new();
    let mut style_severities = match environment {
        Environment::Administration => swlint_style::administration_severities(),
        Environment::Storefront => swlint_style::storefront_severities(),
    };
    for (name, severity) in &config.style.rules {
        style_severities.insert(name.clone(), *severity);
    }

    if cli.verbose && output_format == OutputFormat::Text {
        match &version {
            Some(v) => println!("{}: {} @ {}", "Linting".bold(), environment, v),
            None => println!("{}: {}", "Linting".bold(), environment),
        }
    }

    let files = collect_files(&cli.paths, &config);
    if files.is_empty() {
        bail!("No lintable files found in the given paths");
    }

    let fix_mode = cli.fix;
    let results: Vec<(PathBuf, Result<process::ProcessResult>)> = files
        .par_iter()
        .map(|path| {
            let result = process_file(
                path,
                &rule_set,
                &style_registry,
                &style_severities,
                fix_mode,
            );
            (path.clone(), result)
        })
        .collect();

    let mut reporter = Reporter::new(output_format, cli.verbose);

    for (path, result) in results {
        match result {
            Ok(outcome) => {
                if let Some(new_source) = &outcome.new_source {
                    if let Err(e) = write_file(&path, new_source) {
                        reporter.add(FileResult::error(&path, format!("{e:#}")));
                        continue;
                    }
                }

                let mut file_result = FileResult::findings(&path, outcome.diagnostics);
                file_result.fixed = outcome.fixed;
                file_result.skipped = outcome.skipped;
                reporter.add(file_result);
            }
            Err(e) => reporter.add(FileResult::error(&path, format!("{e:#}"))),
        }
    }

    let summary = reporter.finish();

    if summary.errors > 0 || summary.file_errors > 0 {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn print_rules() {
    println!("{}", "Available rules:".bold());
    for environment in [Environment::Administration, Environment::Storefront] {
        println!("\n{}:", environment);
        for rule in RuleRegistry::for_environment(environment).rules() {
            let mut notes = Vec::new();
            if rule.fixable() {
                notes.push("fixable".to_string());
            }
            if let Some(minimum) = rule.min_shopware_version() {
                notes.push(format!("{minimum}+"));
            }
            let suffix = if notes.is_empty() {
                String::new()
            } else {
                format!(" ({})", notes.join(", "))
            };
            println!("  {} - {}{}", rule.name().green(), rule.description(), suffix);
        }
    }

    println!("\nstyle:");
    for rule in StyleRuleRegistry::new().rules() {
        let suffix = if rule.fixable() { " (fixable)" } else { "" };
        println!("  {} - {}{}", rule.name().green(), rule.description(), suffix);
    }
}

fn resolve_environment(cli_env: Option<&str>, config: &Config) -> Result<Environment> {
    let raw = cli_env
        .or(config.environment.as_deref())
        .unwrap_or("administration");

    match raw {
        "administration" | "admin" => Ok(Environment::Administration),
        "storefront" => Ok(Environment::Storefront),
        other => bail!("Unknown environment '{other}'. Valid options: administration, storefront"),
    }
}

/// Resolve the target Shopware version: CLI flag, then config file, then the
/// SHOPWARE_PROJECT_VERSION environment variable. An unparseable version
/// disables the gate rather than dropping rules.
fn resolve_version(cli: &Cli, config: &Config) -> Option<ShopwareVersion> {
    let raw = cli
        .shopware_version
        .clone()
        .or_else(|| config.shopware.version.clone())
        .or_else(|| std::env::var("SHOPWARE_PROJECT_VERSION").ok())?;

    match raw.parse() {
        Ok(version) => Some(version),
        Err(e) => {
            eprintln!(
                "{}: ignoring Shopware version '{}': {}",
                "Warning".yellow(),
                raw,
                e
            );
            None
        }
    }
}

fn validate_rule_names(cli_rules: &[String], config: &Config) -> Result<()> {
    let js_names = RuleRegistry::new().all_names();
    let style_names = StyleRuleRegistry::new().all_names();

    for rule in cli_rules {
        if !js_names.contains(&rule.as_str()) {
            bail!(
                "Unknown rule '{}'. Available rules: {}",
                rule,
                js_names.join(", ")
            );
        }
    }

    for rule in config.rules.keys() {
        if !js_names.contains(&rule.as_str()) {
            bail!(
                "Unknown rule '{}' in config. Available rules: {}",
                rule,
                js_names.join(", ")
            );
        }
    }

    for rule in config.style.rules.keys() {
        if !style_names.contains(&rule.as_str()) {
            bail!(
                "Unknown style rule '{}' in config. Available rules: {}",
                rule,
                style_names.join(", ")
            );
        }
    }

    Ok(())
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && matches!(
            entry.file_name().to_str(),
            Some("node_modules" | "dist" | "vendor" | ".git")
        )
}

fn collect_files(paths: &[PathBuf], config: &Config) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if file_kind(path).is_some() && !config.should_exclude(path) {
                files.push(path.clone());
            }
            continue;
        }

        for entry in WalkDir::new(path)
            .into_iter()
            .filter_entry(|e| !is_skipped_dir(e))
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let entry_path = entry.path();
            if file_kind(entry_path).is_some() && !config.should_exclude(entry_path) {
                files.push(entry_path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    files
}
