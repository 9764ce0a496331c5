//! Assembly of classified nets into layout guide records

use crate::classify::{classify, ClassificationResult};
use crate::layout::{LayoutRule, LayoutRuleRepository};
use crate::rules::RuleSet;
use serde::Serialize;
use std::collections::BTreeMap;

/// Ordering of the assembled records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordOrder {
    /// Same order as the input net names
    #[default]
    Input,
    /// Stable sort by category; input order is kept within a category
    GroupByCategory,
}

/// One row of the layout guide
///
/// Every field is always present; missing layout values are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutGuideRecord {
    pub category: String,
    pub net_name: String,
    pub description: String,
    pub impedance: String,
    pub signal_type: String,
    pub width: String,
    pub length_limit: String,
    pub spacing: String,
    pub shielding: String,
    pub layer_stack: String,
    pub via_rules: String,
    pub notes: String,
    pub matched_rule: Option<String>,
}

/// Records plus the per-net anomalies that were recovered from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    pub records: Vec<LayoutGuideRecord>,
    /// Number of empty or whitespace-only net names dropped
    pub skipped: usize,
    /// Signal types resolved to the default layout rule, in first-seen order
    pub missing_layout_rules: Vec<String>,
}

impl Assembly {
    /// Number of records per category
    pub fn summary(&self) -> BTreeMap<String, usize> {
        let mut summary = BTreeMap::new();
        for record in &self.records {
            *summary.entry(record.category.clone()).or_insert(0) += 1;
        }
        summary
    }

    /// Number of records won by each rule; unmatched nets count under `None`
    pub fn rule_hits(&self) -> BTreeMap<Option<String>, usize> {
        let mut hits = BTreeMap::new();
        for record in &self.records {
            *hits.entry(record.matched_rule.clone()).or_insert(0) += 1;
        }
        hits
    }

    /// Log the category summary and rule hits at info level
    pub fn log_summary(&self) {
        for (category, count) in self.summary() {
            log::info!("Category '{category}': {count} net(s)");
        }
        for (rule, count) in self.rule_hits() {
            match rule {
                Some(id) => log::info!("Rule '{id}': {count} net(s)"),
                None => log::info!("No matching rule: {count} net(s)"),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Classify every net and attach its layout rule
pub fn assemble<I, S>(
    nets: I,
    rules: &RuleSet,
    layouts: &LayoutRuleRepository,
    order: RecordOrder,
) -> Assembly
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut assembly = Assembly::default();

    for net in nets {
        let net = net.as_ref();
        if net.trim().is_empty() {
            assembly.skipped += 1;
            continue;
        }

        let result = classify(net, rules);
        let lookup = layouts.lookup(&result.signal_type);
        if lookup.is_fallback() && !assembly.missing_layout_rules.contains(&result.signal_type) {
            assembly.missing_layout_rules.push(result.signal_type.clone());
        }

        assembly.records.push(build_record(result, lookup.rule()));
    }

    if order == RecordOrder::GroupByCategory {
        // sort_by is stable
        assembly.records.sort_by(|a, b| a.category.cmp(&b.category));
    }

    log::info!(
        "Assembled {} record(s), skipped {} blank net name(s), {} signal type(s) without layout rule",
        assembly.records.len(),
        assembly.skipped,
        assembly.missing_layout_rules.len()
    );
    assembly.log_summary();

    assembly
}

fn build_record(result: ClassificationResult, layout: &LayoutRule) -> LayoutGuideRecord {
    LayoutGuideRecord {
        category: result.category,
        net_name: result.net,
        description: layout.description.clone(),
        impedance: layout.impedance.clone(),
        signal_type: result.signal_type,
        width: layout.width.clone(),
        length_limit: layout.length_limit.clone(),
        spacing: layout.spacing.clone(),
        shielding: layout.shielding.clone(),
        layer_stack: layout.layer_stack.clone(),
        via_rules: layout.via_rules.clone(),
        notes: layout.notes.clone(),
        matched_rule: result.matched_rule,
    }
}
