use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;

mod classify;
mod guide;
mod rules;

#[derive(Parser, Debug)]
#[command(name = "pcb", version, about = "next-gen tooling for pcb design")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a layout guide from a netlist
    Guide(guide::GuideArgs),

    /// Classify individual net names
    Classify(classify::ClassifyArgs),

    /// Inspect and create net classification rule files
    Rules(rules::RulesArgs),
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Guide(args) => guide::execute(args),
        Commands::Classify(args) => classify::execute(args),
        Commands::Rules(args) => rules::execute(args),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        std::process::exit(1);
    }
}

/// Print a warning line to stderr
pub(crate) fn warn(message: impl std::fmt::Display) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}
