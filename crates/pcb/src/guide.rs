//! Guide command: netlist → layout guide

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use pcb_netclass::{output, parse_netlist, OutputFormat, RecordOrder};
use std::fs;
use std::path::PathBuf;

use crate::rules::load_rules;

/// Output file format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum Format {
    #[default]
    Csv,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => OutputFormat::Csv,
            Format::Json => OutputFormat::Json,
        }
    }
}

/// Arguments for the `guide` command
#[derive(Args, Debug)]
#[command(about = "Generate a layout guide from a netlist")]
pub struct GuideArgs {
    /// Path to the netlist (.net, .sp, .cir, .txt)
    #[arg(value_name = "NETLIST", value_hint = clap::ValueHint::FilePath)]
    pub netlist: PathBuf,

    /// Rule configuration (.yaml, .yml, .json); defaults to the built-in rules
    #[arg(short, long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Output file path (defaults to <netlist-name>-layout-guide.<format> in current directory)
    #[arg(short, long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,

    /// Print to stdout instead of writing to file
    #[arg(long)]
    pub stdout: bool,

    /// Group rows by category, keeping netlist order within each category
    #[arg(long)]
    pub group_by_category: bool,
}

/// Execute the `guide` command
pub fn execute(args: GuideArgs) -> Result<()> {
    if !args.netlist.is_file() {
        anyhow::bail!("Netlist does not exist: {}", args.netlist.display());
    }

    let config = load_rules(args.config.as_deref())?;

    eprintln!("Parsing netlist: {}", args.netlist.display());
    let nets = parse_netlist(&args.netlist)
        .with_context(|| format!("Failed to parse netlist: {}", args.netlist.display()))?;
    if nets.is_empty() {
        crate::warn("No net names found in netlist");
    }

    let order = if args.group_by_category {
        RecordOrder::GroupByCategory
    } else {
        RecordOrder::Input
    };
    let guide = config.assemble(&nets, order);

    if guide.skipped > 0 {
        crate::warn(format!("Skipped {} blank net name(s)", guide.skipped));
    }
    for signal_type in &guide.missing_layout_rules {
        crate::warn(format!(
            "No layout rule for signal type '{signal_type}', used default layout rule"
        ));
    }

    let format = OutputFormat::from(args.format);
    let rendered = output::render(&guide.records, format)?;

    if args.stdout {
        print!("{rendered}");
        if !rendered.ends_with('\n') {
            println!();
        }
    } else {
        let output_path = args.output.unwrap_or_else(|| {
            let stem = args
                .netlist
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("netlist");
            PathBuf::from(format!("{stem}-layout-guide.{}", format.extension()))
        });

        fs::write(&output_path, &rendered)
            .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;

        eprintln!("Wrote {} net(s) to {}", guide.len(), output_path.display());
    }

    eprintln!("Nets per category:");
    for (category, count) in guide.summary() {
        eprintln!("  {category}: {count}");
    }
    eprintln!("Nets per rule:");
    for (rule, count) in guide.rule_hits() {
        eprintln!("  {}: {count}", rule.as_deref().unwrap_or("(no match)"));
    }

    Ok(())
}
