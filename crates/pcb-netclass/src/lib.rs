//! Net classification and layout guide generation
//!
//! Turns a list of net names into layout guide records: each net is matched
//! against configurable classification rules (keywords and regex patterns with
//! a priority) and the winning rule's signal type selects a layout rule
//! (impedance, width, spacing, ...).
//!
//! ```no_run
//! use pcb_netclass::{assemble, Config, RecordOrder};
//!
//! let config = Config::builtin()?.validate()?;
//! let guide = assemble(["I2C0_SCL", "VDD_CORE"], &config.rules, &config.layouts, RecordOrder::Input);
//! assert_eq!(guide.records[1].category, "Power");
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod assemble;
pub mod classify;
pub mod config;
mod document;
mod error;
pub mod layout;
pub mod mapping;
pub mod netlist;
pub mod output;
pub mod rules;
pub mod validate;

pub use assemble::{assemble, Assembly, LayoutGuideRecord, RecordOrder};
pub use classify::{classify, ClassificationResult, FALLBACK_CATEGORY};
pub use config::{write_template, Config, ConfigSource};
pub use document::{Document, Section};
pub use error::{ConfigError, ValidationError};
pub use layout::{LayoutLookup, LayoutRule, LayoutRuleRepository};
pub use netlist::{extract_net_names, parse_netlist};
pub use output::OutputFormat;
pub use rules::{ClassificationRule, RuleSet};
pub use validate::{validate, ValidatedConfig};

impl ValidatedConfig {
    /// Classify and assemble a batch of nets with this configuration
    pub fn assemble<I, S>(&self, nets: I, order: RecordOrder) -> Assembly
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        assemble::assemble(nets, &self.rules, &self.layouts, order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end() {
        let netlist = "\
1 I2C0_SCL R1 C1
2 I2C0_SDA R2 C2
3 ANT1_P L1
4 VDD_CORE C3
5 SDC_CLK R9
";
        let config = Config::from_yaml_str(
            r#"
net_classification_rules:
  I2C:
    keywords: [I2C]
    category: I2C
    signal_type: I2C
    priority: 10
  RF:
    keywords: [ANT]
    category: RF
    signal_type: RF
    priority: 5
  Power:
    keywords: [VDD]
    category: Power
    signal_type: Power
    priority: 1
layout_rules:
  I2C: {impedance: 50 Ohm}
  RF: {impedance: 50 Ohm}
  Power: {impedance: N/A}
"#,
        )
        .unwrap()
        .validate()
        .unwrap();

        let nets = extract_net_names(netlist);
        let guide = config.assemble(&nets, RecordOrder::Input);
        let rows: Vec<_> = guide
            .records
            .iter()
            .map(|r| (r.net_name.as_str(), r.category.as_str(), r.impedance.as_str()))
            .collect();
        assert_eq!(
            rows,
            [
                ("ANT1_P", "RF", "50 Ohm"),
                ("I2C0_SCL", "I2C", "50 Ohm"),
                ("I2C0_SDA", "I2C", "50 Ohm"),
                ("SDC_CLK", "Other", "50 Ohm"),
                ("VDD_CORE", "Power", "N/A"),
            ]
        );
        assert_eq!(guide.missing_layout_rules, ["Single-End"]);
    }

    #[test]
    fn test_invalid_config_blocks_classification() {
        let err = Config::from_yaml_str(
            r#"
net_classification_rules:
  SDC:
    keywords: [SDC]
    category: Storage
    signal_type: SDC
    priority: 20
layout_rules:
  SDC:
    impedance: "Not specified (assume single-ended impedance control)"
"#,
        )
        .unwrap()
        .validate()
        .unwrap_err();

        assert_eq!(
            err.violations(),
            ["Layout rule 'SDC': Impedance should include 'Ohm' or 'Ω' unit"]
        );
    }
}
