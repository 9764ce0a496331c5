//! Net name → category / signal type classification

use crate::rules::{ClassificationRule, RuleSet};
use serde::Serialize;
use std::cmp::Reverse;

/// Category assigned to nets that match no rule
pub const FALLBACK_CATEGORY: &str = "Other";

/// Outcome of classifying one net
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub net: String,
    /// Id of the winning rule, `None` for the fallback classification
    pub matched_rule: Option<String>,
    pub category: String,
    pub signal_type: String,
}

/// Classify a net name against a rule set
///
/// Every rule is evaluated. Among the rules that match, the winner is the one
/// with the lowest priority value, then the longest matching keyword or
/// pattern, then the earliest declaration. Nets matching nothing get
/// [`FALLBACK_CATEGORY`] and the rule set's default signal type.
///
/// Examples with the built-in rules:
/// - "I2C0_SCL" → Communication Interface / I2C
/// - "VDD_CORE" → Power / Power
/// - "ANT1_P" → RF / RF
/// - "TP12" → Other / Single-End
pub fn classify(net: &str, rules: &RuleSet) -> ClassificationResult {
    match best_rule(net, rules) {
        Some(rule) => ClassificationResult {
            net: net.to_string(),
            matched_rule: Some(rule.id().to_string()),
            category: rule.category().to_string(),
            signal_type: rule.signal_type().to_string(),
        },
        None => ClassificationResult {
            net: net.to_string(),
            matched_rule: None,
            category: FALLBACK_CATEGORY.to_string(),
            signal_type: rules.default_signal_type().to_string(),
        },
    }
}

/// All rules matching a net, each with the length of its longest matching predicate
pub fn candidates<'a>(net: &str, rules: &'a RuleSet) -> Vec<(&'a ClassificationRule, usize)> {
    let folded = net.to_uppercase();
    rules
        .rules()
        .iter()
        .filter_map(|rule| {
            rule.matcher()
                .specificity(net, &folded)
                .map(|len| (rule, len))
        })
        .collect()
}

fn best_rule<'a>(net: &str, rules: &'a RuleSet) -> Option<&'a ClassificationRule> {
    candidates(net, rules)
        .into_iter()
        .min_by_key(|(rule, len)| (rule.priority(), Reverse(*len), rule.order()))
        .map(|(rule, _)| rule)
}

impl RuleSet {
    /// See [`classify`]
    pub fn classify(&self, net: &str) -> ClassificationResult {
        classify(net, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    fn rule_set(yaml: &str) -> RuleSet {
        Config::from_yaml_str(yaml).unwrap().validate().unwrap().rules
    }

    const SCENARIO: &str = r#"
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
layout_rules: {}
"#;

    #[test]
    fn test_scenario_categories() {
        let rules = rule_set(SCENARIO);
        let categories: Vec<_> = ["I2C0_SCL", "I2C0_SDA", "ANT1_P", "VDD_CORE"]
            .iter()
            .map(|net| classify(net, &rules).category)
            .collect();
        assert_eq!(categories, ["I2C", "I2C", "RF", "Power"]);
    }

    #[test]
    fn test_lower_priority_wins_regardless_of_order() {
        let low_first = r#"
net_classification_rules:
  Specific:
    keywords: [PCIE]
    category: High Speed Interface
    signal_type: PCIe
    priority: 1
  Generic:
    keywords: [CLK]
    category: Clock
    signal_type: Clock
    priority: 5
layout_rules: {}
"#;
        let high_first = r#"
net_classification_rules:
  Generic:
    keywords: [CLK]
    category: Clock
    signal_type: Clock
    priority: 5
  Specific:
    keywords: [PCIE]
    category: High Speed Interface
    signal_type: PCIe
    priority: 1
layout_rules: {}
"#;
        for yaml in [low_first, high_first] {
            let result = classify("PCIE_REFCLK_P", &rule_set(yaml));
            assert_eq!(result.matched_rule.as_deref(), Some("Specific"));
            assert_eq!(result.signal_type, "PCIe");
        }
    }

    #[test]
    fn test_equal_priority_longest_match_wins() {
        let rules = rule_set(
            r#"
net_classification_rules:
  Short:
    keywords: [CLK]
    category: Clock
    signal_type: Clock
    priority: 5
  Long:
    patterns: ['REFCLK[PN]?']
    category: High Speed Interface
    signal_type: PCIe
    priority: 5
layout_rules: {}
"#,
        );
        assert_eq!(classify("PCIE_REFCLKP", &rules).matched_rule.as_deref(), Some("Long"));
        // Only the short keyword matches here
        assert_eq!(classify("SYS_CLK", &rules).matched_rule.as_deref(), Some("Short"));
    }

    #[test]
    fn test_full_tie_earliest_declaration_wins() {
        let rules = rule_set(
            r#"
net_classification_rules:
  First:
    keywords: [SPI]
    category: A
    signal_type: SPI
    priority: 10
  Second:
    keywords: [SPI]
    category: B
    signal_type: SPI
    priority: 10
layout_rules: {}
"#,
        );
        assert_eq!(classify("SPI0_MOSI", &rules).matched_rule.as_deref(), Some("First"));
    }

    #[test]
    fn test_no_match_fallback() {
        let rules = rule_set(SCENARIO);
        assert_eq!(
            classify("TP12", &rules),
            ClassificationResult {
                net: "TP12".to_string(),
                matched_rule: None,
                category: "Other".to_string(),
                signal_type: "Single-End".to_string(),
            }
        );
    }

    #[test]
    fn test_configured_fallback_signal_type() {
        let rules = rule_set(&format!("defaults:\n  signal_type: GPIO\n{SCENARIO}"));
        assert_eq!(classify("TP12", &rules).signal_type, "GPIO");
    }

    #[test]
    fn test_case_insensitive_matching() {
        let rules = rule_set(SCENARIO);
        assert_eq!(classify("i2c1_sda", &rules).category, "I2C");
        assert_eq!(classify("vdd_io", &rules).category, "Power");
    }

    #[test]
    fn test_candidates_are_complete() {
        let rules = rule_set(SCENARIO);
        let ids: Vec<_> = candidates("VDD_ANT_I2C", &rules)
            .into_iter()
            .map(|(rule, _)| rule.id())
            .collect();
        assert_eq!(ids, ["I2C", "RF", "Power"]);
        assert_eq!(classify("VDD_ANT_I2C", &rules).category, "Power");
    }

    #[test]
    fn test_deterministic() {
        let rules = Config::builtin().unwrap().validate().unwrap().rules;
        let nets = ["USB_DP", "PCIE_TX0_P", "I2C0_SCL", "VDD_CORE", "GND", "NC_17", "SPI_SCLK"];

        let first: Vec<_> = nets.iter().map(|n| rules.classify(n)).collect();
        // Interleave unrelated calls; results must not depend on history
        for net in nets.iter().rev() {
            rules.classify(net);
        }
        let second: Vec<_> = nets.iter().map(|n| rules.classify(n)).collect();
        assert_eq!(first, second);

        let shared = &rules;
        let threaded: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = nets
                .iter()
                .map(|net| s.spawn(move || shared.classify(net)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(first, threaded);
    }

    #[test]
    fn test_builtin_rules() {
        let rules = Config::builtin().unwrap().validate().unwrap().rules;
        let cases = [
            ("I2C0_SCL", "I2C"),
            ("SPI_SCLK", "SPI"),
            ("USB_DP", "USB"),
            ("PCIE_TX0_P", "PCIe"),
            ("ANT1_P", "RF"),
            ("VDD_CORE", "Power"),
            ("+3V3", "Power"),
            ("AGND", "Ground"),
            ("XTAL_IN", "Clock"),
            ("WIFI_EN", "Single-End"),
            ("TP12", "Single-End"),
        ];
        for (net, signal_type) in cases {
            assert_eq!(rules.classify(net).signal_type, signal_type, "net {net}");
        }
        assert_eq!(rules.classify("TP12").category, "Other");
        assert_eq!(rules.classify("WIFI_EN").category, "Control");
    }
}
