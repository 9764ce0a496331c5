//! Classify command: ad-hoc net names → table

use anyhow::Result;
use clap::Args;
use pcb_netclass::{output, RecordOrder};
use std::path::PathBuf;

use crate::rules::load_rules;

/// Arguments for the `classify` command
#[derive(Args, Debug)]
#[command(about = "Classify individual net names")]
pub struct ClassifyArgs {
    /// Net names to classify
    #[arg(value_name = "NET", required = true)]
    pub nets: Vec<String>,

    /// Rule configuration (.yaml, .yml, .json); defaults to the built-in rules
    #[arg(short, long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,
}

/// Execute the `classify` command
pub fn execute(args: ClassifyArgs) -> Result<()> {
    let config = load_rules(args.config.as_deref())?;
    let guide = config.assemble(&args.nets, RecordOrder::Input);

    if guide.skipped > 0 {
        crate::warn(format!("Skipped {} blank net name(s)", guide.skipped));
    }
    println!("{}", output::records_table(&guide.records));
    Ok(())
}
