//! Net name extraction from simple text netlists

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Netlist extensions with a known line format
pub const SUPPORTED_EXTENSIONS: &[&str] = &["net", "sp", "cir", "txt"];

/// Tokens that look like component references or values rather than nets
static EXCLUDED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"^[a-zA-Z][0-9]+$").unwrap(),          // R123, C45
        Regex::new(r"^[0-9]+$").unwrap(),                  // 42
        Regex::new(r"(?i)^[0-9]+(ohm|f|h)$").unwrap(),     // 10ohm, 22f, 1h
    ]
});

/// Parse a netlist file and return its unique net names, sorted
pub fn parse_netlist(path: &Path) -> Result<Vec<String>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        log::warn!("Unsupported format .{ext}, attempting generic parsing");
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read netlist: {}", path.display()))?;

    let nets = extract_net_names(&content);
    log::info!("Extracted {} net names from {}", nets.len(), path.display());
    Ok(nets)
}

/// Extract net names from netlist content
///
/// Lines look like `<index> <net> <component>...`; the second token of every
/// line starting with a digit is taken as the net name. Comments (`*`, `#`)
/// and blank lines are skipped.
pub fn extract_net_names(content: &str) -> Vec<String> {
    let mut nets = BTreeSet::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('*') || line.starts_with('#') {
            continue;
        }
        if !line.starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }

        if let Some(name) = line.split_whitespace().nth(1) {
            if !is_excluded(name) {
                nets.insert(name.to_string());
            }
        }
    }

    nets.into_iter().collect()
}

fn is_excluded(token: &str) -> bool {
    EXCLUDED.iter().any(|pattern| pattern.is_match(token))
}
