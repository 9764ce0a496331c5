//! Rule schema validation
//!
//! Walks a raw configuration document and produces the immutable rule set and
//! layout repository. Every violation is collected before failing, so a single
//! run reports everything that needs fixing.

use crate::config::Config;
use crate::document::{Section, CLASSIFICATION_RULES, DEFAULTS, LAYOUT_RULES};
use crate::error::ValidationError;
use crate::layout::{LayoutRule, LayoutRuleRepository, DEFAULT_LAYOUT_RULE};
use crate::mapping::{is_valid_impedance, Keyword, Matcher, Pattern};
use crate::rules::{ClassificationRule, RuleSet, DEFAULT_SIGNAL_TYPE};
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;

/// A configuration that passed validation
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub rules: RuleSet,
    pub layouts: LayoutRuleRepository,
    /// Non-fatal findings, e.g. signal types without a layout rule
    pub warnings: Vec<String>,
}

/// Validate a configuration document
pub fn validate(config: &Config) -> Result<ValidatedConfig, ValidationError> {
    let mut v = Validator::default();
    let doc = config.document();

    if !doc.is_mapping() {
        v.violation("Configuration root must be a mapping");
        return Err(ValidationError::new(v.violations));
    }
    for name in doc.duplicate_sections() {
        v.violation(format!("Duplicate configuration section: {name}"));
    }

    let defaults = v.defaults(doc.defaults());
    let layouts = v
        .section(LAYOUT_RULES, doc.layout_rules())
        .map(|entries| v.layout_rules(entries))
        .unwrap_or_default();
    let rules = v
        .section(CLASSIFICATION_RULES, doc.classification_rules())
        .map(|entries| v.classification_rules(entries))
        .unwrap_or_default();

    if !v.violations.is_empty() {
        return Err(ValidationError::new(v.violations));
    }

    let known: HashSet<&str> = layouts.iter().map(|l| l.signal_type.as_str()).collect();
    for rule in rules.iter().filter(|r| r.enabled) {
        if !known.contains(rule.signal_type.as_str()) {
            v.warning(format!(
                "Classification rule '{}': no layout rule for signal type '{}', default layout rule will be used",
                rule.id, rule.signal_type
            ));
        }
    }
    if !known.contains(defaults.layout_rule.as_str()) {
        v.warning(format!(
            "Default layout rule '{}' not found, using built-in default",
            defaults.layout_rule
        ));
    }

    let mut enabled = Vec::new();
    let mut disabled = Vec::new();
    for (order, rule) in rules.into_iter().enumerate() {
        if rule.enabled {
            enabled.push(ClassificationRule::new(
                rule.id,
                rule.category,
                rule.signal_type,
                rule.priority,
                rule.description,
                rule.matcher,
                order,
            ));
        } else {
            disabled.push(rule.id);
        }
    }

    Ok(ValidatedConfig {
        rules: RuleSet::new(enabled, disabled, defaults.signal_type),
        layouts: LayoutRuleRepository::new(layouts, &defaults.layout_rule),
        warnings: v.warnings,
    })
}

struct Defaults {
    signal_type: String,
    layout_rule: String,
}

/// A classification rule that passed its own checks
struct CheckedRule {
    id: String,
    category: String,
    signal_type: String,
    priority: i64,
    description: String,
    enabled: bool,
    matcher: Matcher,
}

#[derive(Default)]
struct Validator {
    violations: Vec<String>,
    warnings: Vec<String>,
}

impl Validator {
    fn violation(&mut self, message: impl Into<String>) {
        self.violations.push(message.into());
    }

    fn warning(&mut self, message: String) {
        log::warn!("{message}");
        self.warnings.push(message);
    }

    fn section<'a>(&mut self, name: &str, section: &'a Section) -> Option<&'a [(Value, Value)]> {
        match section {
            Section::Missing => {
                self.violation(format!("Missing required configuration section: {name}"));
                None
            }
            // An empty section (`layout_rules:`) is allowed
            Section::Empty => None,
            Section::Entries(entries) => Some(entries.as_slice()),
            Section::Invalid => {
                self.violation(format!("Section '{name}' must be a mapping"));
                None
            }
        }
    }

    fn defaults(&mut self, value: Option<&Value>) -> Defaults {
        let mut defaults = Defaults {
            signal_type: DEFAULT_SIGNAL_TYPE.to_string(),
            layout_rule: DEFAULT_LAYOUT_RULE.to_string(),
        };

        let map = match value {
            None | Some(Value::Null) => return defaults,
            Some(Value::Mapping(m)) => m,
            Some(_) => {
                self.violation(format!("Section '{DEFAULTS}' must be a mapping"));
                return defaults;
            }
        };

        for (field, slot) in [
            ("signal_type", &mut defaults.signal_type),
            ("layout_rule", &mut defaults.layout_rule),
        ] {
            match map.get(field) {
                None => {}
                Some(Value::String(s)) if !s.trim().is_empty() => *slot = s.clone(),
                Some(_) => self.violation(format!("{DEFAULTS}.{field} must be a non-empty string")),
            }
        }

        defaults
    }

    fn classification_rules(&mut self, section: &[(Value, Value)]) -> Vec<CheckedRule> {
        let mut seen = HashSet::new();
        let mut rules = Vec::new();

        for (key, value) in section {
            let Some(id) = self.key_name(CLASSIFICATION_RULES, key) else {
                continue;
            };
            if !seen.insert(id.clone()) {
                self.violation(format!("Duplicate classification rule id '{id}'"));
                continue;
            }
            if let Some(rule) = self.classification_rule(id, value) {
                rules.push(rule);
            }
        }

        rules
    }

    fn classification_rule(&mut self, id: String, value: &Value) -> Option<CheckedRule> {
        let prefix = format!("Classification rule '{id}'");
        let Some(map) = value.as_mapping() else {
            self.violation(format!("{prefix}: definition must be a mapping"));
            return None;
        };
        let before = self.violations.len();

        let keywords = self.string_list(&prefix, map, "keywords");
        let patterns = self.string_list(&prefix, map, "patterns");

        let mut compiled = Vec::new();
        for source in patterns.iter().flatten() {
            match Pattern::compile(source) {
                Ok(pattern) => compiled.push(pattern),
                Err(e) => self.violation(format!(
                    "{prefix}: invalid pattern '{source}': {}",
                    regex_message(&e)
                )),
            }
        }

        if let (Some(keywords), Some(patterns)) = (&keywords, &patterns) {
            if keywords.is_empty() && patterns.is_empty() {
                self.violation(format!(
                    "{prefix}: at least one keyword or pattern must be specified"
                ));
            }
        }

        let category = self.required_string(&prefix, map, "category");
        let signal_type = self.required_string(&prefix, map, "signal_type");

        let priority = match map.get("priority") {
            None => {
                self.violation(format!("{prefix}: missing required field 'priority'"));
                None
            }
            Some(value) => match value.as_i64() {
                Some(p) => Some(p),
                None => {
                    self.violation(format!("{prefix}: priority must be an integer"));
                    None
                }
            },
        };

        let description = match map.get("description") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                self.violation(format!("{prefix}: description must be a string"));
                String::new()
            }
        };

        let enabled = match map.get("enabled") {
            None | Some(Value::Null) => true,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                self.violation(format!("{prefix}: enabled must be a boolean"));
                true
            }
        };

        if self.violations.len() > before {
            return None;
        }

        let keywords = keywords
            .unwrap_or_default()
            .into_iter()
            .map(Keyword::new)
            .collect();

        Some(CheckedRule {
            id,
            category: category?,
            signal_type: signal_type?,
            priority: priority?,
            description,
            enabled,
            matcher: Matcher::new(keywords, compiled),
        })
    }

    fn layout_rules(&mut self, section: &[(Value, Value)]) -> Vec<LayoutRule> {
        let mut seen = HashSet::new();
        let mut rules = Vec::new();

        for (key, value) in section {
            let Some(signal_type) = self.key_name(LAYOUT_RULES, key) else {
                continue;
            };
            if !seen.insert(signal_type.clone()) {
                self.violation(format!("Duplicate layout rule '{signal_type}'"));
                continue;
            }
            if let Some(rule) = self.layout_rule(signal_type, value) {
                rules.push(rule);
            }
        }

        rules
    }

    fn layout_rule(&mut self, signal_type: String, value: &Value) -> Option<LayoutRule> {
        let prefix = format!("Layout rule '{signal_type}'");
        let Some(map) = value.as_mapping() else {
            self.violation(format!("{prefix}: definition must be a mapping"));
            return None;
        };
        let before = self.violations.len();

        let impedance = match map.get("impedance") {
            None => {
                self.violation(format!("{prefix}: missing required field 'impedance'"));
                None
            }
            Some(Value::String(s)) if is_valid_impedance(s) => Some(s.trim().to_string()),
            Some(_) => {
                self.violation(format!(
                    "{prefix}: Impedance should include 'Ohm' or 'Ω' unit"
                ));
                None
            }
        };

        let mut text = |field: &str| self.optional_text(&prefix, map, field);
        let description = text("description");
        let width = text("width");
        let length_limit = text("length_limit");
        let spacing = text("spacing");
        let shielding = text("shielding");
        let layer_stack = text("layer_stack");
        let via_rules = text("via_rules");
        let notes = text("notes");

        if self.violations.len() > before {
            return None;
        }

        Some(LayoutRule {
            signal_type,
            impedance: impedance?,
            description,
            width,
            length_limit,
            spacing,
            shielding,
            layer_stack,
            via_rules,
            notes,
        })
    }

    /// Rule ids and signal types must be scalar keys
    fn key_name(&mut self, section: &str, key: &Value) -> Option<String> {
        let name = match key {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => {
                self.violation(format!("Section '{section}' contains a non-scalar key"));
                return None;
            }
        };
        if name.trim().is_empty() {
            self.violation(format!("Section '{section}' contains an empty key"));
            return None;
        }
        Some(name)
    }

    /// `None` means the field was present but malformed (already reported)
    fn string_list(&mut self, prefix: &str, map: &Mapping, field: &str) -> Option<Vec<String>> {
        let items = match map.get(field) {
            None | Some(Value::Null) => return Some(Vec::new()),
            Some(Value::Sequence(items)) => items,
            Some(_) => {
                self.violation(format!("{prefix}: {field} must be a list of strings"));
                return None;
            }
        };

        let mut out = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::String(s) if s.trim().is_empty() => {
                    self.violation(format!("{prefix}: {field} must not contain empty strings"));
                    return None;
                }
                Value::String(s) => out.push(s.clone()),
                _ => {
                    self.violation(format!("{prefix}: {field} must be a list of strings"));
                    return None;
                }
            }
        }
        Some(out)
    }

    fn required_string(&mut self, prefix: &str, map: &Mapping, field: &str) -> Option<String> {
        match map.get(field) {
            None | Some(Value::Null) => {
                self.violation(format!("{prefix}: missing required field '{field}'"));
                None
            }
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(Value::String(_)) => {
                self.violation(format!("{prefix}: {field} must not be empty"));
                None
            }
            Some(_) => {
                self.violation(format!("{prefix}: {field} must be a string"));
                None
            }
        }
    }

    /// Free-text layout fields; scalars are stringified, absent fields become ""
    fn optional_text(&mut self, prefix: &str, map: &Mapping, field: &str) -> String {
        match map.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(_) => {
                self.violation(format!("{prefix}: {field} must be a string"));
                String::new()
            }
        }
    }
}

/// Reduce a regex error to its one-line cause
fn regex_message(err: &regex::Error) -> String {
    let text = err.to_string();
    text.lines()
        .rev()
        .find_map(|line| line.trim().strip_prefix("error: "))
        .map(str::to_string)
        .unwrap_or_else(|| text.lines().next().unwrap_or_default().to_string())
}
