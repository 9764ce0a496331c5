//! Rendering of layout guide records and rule sets

use crate::assemble::LayoutGuideRecord;
use crate::layout::LayoutRuleRepository;
use crate::rules::RuleSet;
use anyhow::{Context, Result};
use comfy_table::{presets, ContentArrangement, Table};

/// Column headers, in output order
pub const COLUMNS: &[&str] = &[
    "Category",
    "Net Name",
    "Description",
    "Impedance",
    "Type",
    "Width",
    "Length Limit",
    "Spacing",
    "Shielding",
    "Layer Stack",
    "Via Rules",
    "Notes",
];

/// File format for rendered records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

fn columns(record: &LayoutGuideRecord) -> [&str; 12] {
    [
        &record.category,
        &record.net_name,
        &record.description,
        &record.impedance,
        &record.signal_type,
        &record.width,
        &record.length_limit,
        &record.spacing,
        &record.shielding,
        &record.layer_stack,
        &record.via_rules,
        &record.notes,
    ]
}

/// Render records in the requested format
pub fn render(records: &[LayoutGuideRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Csv => render_csv(records),
        OutputFormat::Json => {
            serde_json::to_string_pretty(records).context("Failed to serialize records to JSON")
        }
    }
}

/// Render records as CSV with a header row
pub fn render_csv(records: &[LayoutGuideRecord]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for record in records {
        writer.write_record(columns(record))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Terminal table of the most relevant record columns
pub fn records_table(records: &[LayoutGuideRecord]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Category",
        "Net Name",
        "Type",
        "Impedance",
        "Width",
        "Spacing",
        "Rule",
    ]);
    for r in records {
        table.add_row(vec![
            r.category.as_str(),
            r.net_name.as_str(),
            r.signal_type.as_str(),
            r.impedance.as_str(),
            r.width.as_str(),
            r.spacing.as_str(),
            r.matched_rule.as_deref().unwrap_or("-"),
        ]);
    }
    table
}

/// Terminal table of classification rules
pub fn rules_table(rules: &RuleSet) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Rule",
        "Priority",
        "Category",
        "Signal Type",
        "Keywords",
        "Patterns",
    ]);
    for rule in rules.rules() {
        let matcher = rule.matcher();
        table.add_row(vec![
            rule.id().to_string(),
            rule.priority().to_string(),
            rule.category().to_string(),
            rule.signal_type().to_string(),
            matcher
                .keywords()
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            matcher
                .patterns()
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join("  "),
        ]);
    }
    table
}

/// Terminal table of layout rules
pub fn layouts_table(layouts: &LayoutRuleRepository) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Signal Type", "Impedance", "Width", "Spacing", "Description"]);
    for rule in layouts.rules() {
        table.add_row(vec![
            rule.signal_type.as_str(),
            rule.impedance.as_str(),
            rule.width.as_str(),
            rule.spacing.as_str(),
            rule.description.as_str(),
        ]);
    }
    table
}
