//! Rules command: check, list and create rule configurations

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use itertools::Itertools;
use pcb_netclass::{output, write_template, Config, ValidatedConfig};
use std::path::{Path, PathBuf};

/// Arguments for the `rules` command
#[derive(Args, Debug)]
#[command(about = "Inspect and create net classification rule files")]
pub struct RulesArgs {
    #[command(subcommand)]
    pub command: RulesCommands,
}

#[derive(Subcommand, Debug)]
pub enum RulesCommands {
    /// Validate a rule configuration and report every problem
    Check(ConfigArg),
    /// List classification and layout rules
    List(ConfigArg),
    /// Write a starter rule configuration
    Init(InitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigArg {
    /// Rule configuration (.yaml, .yml, .json); defaults to the built-in rules
    #[arg(short, long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the template
    #[arg(value_name = "OUTPUT", value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the `rules` command
pub fn execute(args: RulesArgs) -> Result<()> {
    match args.command {
        RulesCommands::Check(args) => execute_check(args),
        RulesCommands::List(args) => execute_list(args),
        RulesCommands::Init(args) => execute_init(args),
    }
}

/// Load and validate rules, printing validation warnings
pub(crate) fn load_rules(path: Option<&Path>) -> Result<ValidatedConfig> {
    let config = Config::load_or_builtin(path)?;
    let validated = config
        .validate()
        .with_context(|| format!("Invalid rule configuration: {}", config.source()))?;

    for warning in &validated.warnings {
        crate::warn(warning);
    }
    Ok(validated)
}

fn execute_check(args: ConfigArg) -> Result<()> {
    let config = load_rules(args.config.as_deref())?;

    println!(
        "{} {} classification rule(s), {} layout rule(s)",
        "OK".green().bold(),
        config.rules.len(),
        config.layouts.len()
    );
    if !config.rules.disabled().is_empty() {
        println!("  disabled: {}", config.rules.disabled().iter().join(", "));
    }
    Ok(())
}

fn execute_list(args: ConfigArg) -> Result<()> {
    let config = load_rules(args.config.as_deref())?;

    println!("{}", "Classification rules".bold());
    println!("{}", output::rules_table(&config.rules));
    println!();
    println!("{}", "Layout rules".bold());
    println!("{}", output::layouts_table(&config.layouts));
    println!(
        "Unmatched nets: category '{}', signal type '{}', layout rule '{}'",
        pcb_netclass::FALLBACK_CATEGORY,
        config.rules.default_signal_type(),
        config.layouts.default_rule().signal_type
    );
    Ok(())
}

fn execute_init(args: InitArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        anyhow::bail!(
            "File already exists: {} (use --force to overwrite)",
            args.output.display()
        );
    }
    write_template(&args.output)?;
    eprintln!("Wrote {}", args.output.display());
    Ok(())
}
