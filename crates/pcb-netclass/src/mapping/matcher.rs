//! Compiled net-name predicates (keywords and regex patterns)

use regex::{Regex, RegexBuilder};

/// A case-insensitive substring predicate
#[derive(Debug, Clone)]
pub struct Keyword {
    text: String,
    folded: String,
}

impl Keyword {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let folded = text.to_uppercase();
        Self { text, folded }
    }

    /// Keyword as written in the configuration
    pub fn as_str(&self) -> &str {
        &self.text
    }

    fn matches(&self, folded_net: &str) -> bool {
        folded_net.contains(&self.folded)
    }
}

/// A regular expression predicate, searched (not full-matched) against net names
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern once; matching is case-insensitive like keywords
    pub fn compile(source: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(source).case_insensitive(true).build()?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// Pattern source text as written in the configuration
    pub fn as_str(&self) -> &str {
        &self.source
    }

    fn matches(&self, net: &str) -> bool {
        self.regex.is_match(net)
    }
}

/// The full predicate set of one classification rule
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    keywords: Vec<Keyword>,
    patterns: Vec<Pattern>,
}

impl Matcher {
    pub fn new(keywords: Vec<Keyword>, patterns: Vec<Pattern>) -> Self {
        Self { keywords, patterns }
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.patterns.is_empty()
    }

    /// Evaluate every predicate against a net name
    ///
    /// Returns `None` if nothing matches, otherwise the length (in characters) of
    /// the longest keyword or pattern source that matched. `folded_net` must be
    /// `net.to_uppercase()`.
    pub fn specificity(&self, net: &str, folded_net: &str) -> Option<usize> {
        let keyword_hits = self
            .keywords
            .iter()
            .filter(|k| k.matches(folded_net))
            .map(|k| k.text.chars().count());

        let pattern_hits = self
            .patterns
            .iter()
            .filter(|p| p.matches(net))
            .map(|p| p.source.chars().count());

        keyword_hits.chain(pattern_hits).max()
    }

    /// Convenience wrapper around [`Matcher::specificity`]
    pub fn is_match(&self, net: &str) -> bool {
        self.specificity(net, &net.to_uppercase()).is_some()
    }
}
