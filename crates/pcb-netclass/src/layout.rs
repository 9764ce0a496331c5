//! Layout rules keyed by signal type

use serde::Serialize;
use std::collections::HashMap;

/// Key of the default layout rule when the configuration doesn't name one
pub const DEFAULT_LAYOUT_RULE: &str = "Default";

/// Physical design constraints for one signal type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutRule {
    pub signal_type: String,
    /// "<number> Ohm|Ω[...]" or "N/A"
    pub impedance: String,
    pub description: String,
    pub width: String,
    pub length_limit: String,
    pub spacing: String,
    pub shielding: String,
    pub layer_stack: String,
    pub via_rules: String,
    pub notes: String,
}

impl LayoutRule {
    /// Built-in rule used when the configuration has no default entry
    pub fn builtin_default() -> Self {
        Self {
            signal_type: DEFAULT_LAYOUT_RULE.to_string(),
            impedance: "50 Ohm".to_string(),
            description: "General purpose signal".to_string(),
            width: "TBD".to_string(),
            length_limit: "TBD".to_string(),
            spacing: "TBD".to_string(),
            shielding: "Optional".to_string(),
            layer_stack: "Any".to_string(),
            via_rules: "Standard".to_string(),
            notes: String::new(),
        }
    }
}

/// Result of a layout rule lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutLookup<'a> {
    /// The signal type has its own entry
    Found(&'a LayoutRule),
    /// No entry; the default rule was substituted
    Fallback(&'a LayoutRule),
}

impl<'a> LayoutLookup<'a> {
    pub fn rule(&self) -> &'a LayoutRule {
        match self {
            LayoutLookup::Found(rule) | LayoutLookup::Fallback(rule) => rule,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, LayoutLookup::Fallback(_))
    }
}

/// Immutable mapping from signal type to layout rule, with a default entry
#[derive(Debug, Clone)]
pub struct LayoutRuleRepository {
    rules: Vec<LayoutRule>,
    index: HashMap<String, usize>,
    default: LayoutRule,
}

impl LayoutRuleRepository {
    /// Build a repository from validated rules
    ///
    /// The default is the entry keyed `default_key` if present, otherwise
    /// [`LayoutRule::builtin_default`].
    pub(crate) fn new(rules: Vec<LayoutRule>, default_key: &str) -> Self {
        let index = rules
            .iter()
            .enumerate()
            .map(|(i, rule)| (rule.signal_type.clone(), i))
            .collect::<HashMap<_, _>>();

        let default = index
            .get(default_key)
            .map(|&i| rules[i].clone())
            .unwrap_or_else(LayoutRule::builtin_default);

        Self {
            rules,
            index,
            default,
        }
    }

    /// Look up the rule for a signal type, substituting the default if missing
    pub fn lookup(&self, signal_type: &str) -> LayoutLookup<'_> {
        match self.index.get(signal_type) {
            Some(&i) => LayoutLookup::Found(&self.rules[i]),
            None => {
                log::debug!(
                    "No layout rule for signal type '{}', using default '{}'",
                    signal_type,
                    self.default.signal_type
                );
                LayoutLookup::Fallback(&self.default)
            }
        }
    }

    pub fn contains(&self, signal_type: &str) -> bool {
        self.index.contains_key(signal_type)
    }

    pub fn default_rule(&self) -> &LayoutRule {
        &self.default
    }

    /// Rules in declaration order
    pub fn rules(&self) -> &[LayoutRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
