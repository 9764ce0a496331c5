//! Classification rules and the compiled rule set

use crate::mapping::Matcher;

/// Fallback signal type for nets that match no rule, unless configured otherwise
pub const DEFAULT_SIGNAL_TYPE: &str = "Single-End";

/// A validated classification rule with its predicates compiled
#[derive(Debug, Clone)]
pub struct ClassificationRule {
    id: String,
    category: String,
    signal_type: String,
    priority: i64,
    description: String,
    matcher: Matcher,
    /// Position in the configuration, used as the last tie-breaker
    order: usize,
}

impl ClassificationRule {
    pub(crate) fn new(
        id: String,
        category: String,
        signal_type: String,
        priority: i64,
        description: String,
        matcher: Matcher,
        order: usize,
    ) -> Self {
        Self {
            id,
            category,
            signal_type,
            priority,
            description,
            matcher,
            order,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn signal_type(&self) -> &str {
        &self.signal_type
    }

    /// Lower values win when several rules match the same net
    pub fn priority(&self) -> i64 {
        self.priority
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn order(&self) -> usize {
        self.order
    }
}

/// Immutable set of enabled classification rules, in declaration order
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<ClassificationRule>,
    disabled: Vec<String>,
    default_signal_type: String,
}

impl RuleSet {
    pub(crate) fn new(
        rules: Vec<ClassificationRule>,
        disabled: Vec<String>,
        default_signal_type: String,
    ) -> Self {
        log::debug!(
            "Compiled rule set with {} rule(s) ({} disabled)",
            rules.len(),
            disabled.len()
        );
        Self {
            rules,
            disabled,
            default_signal_type,
        }
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    pub fn get(&self, id: &str) -> Option<&ClassificationRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Ids of rules that were declared but disabled
    pub fn disabled(&self) -> &[String] {
        &self.disabled
    }

    /// Signal type assigned to nets that match no rule
    pub fn default_signal_type(&self) -> &str {
        &self.default_signal_type
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
