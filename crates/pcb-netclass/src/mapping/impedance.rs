//! Impedance value grammar for layout rules

use regex::Regex;
use std::sync::LazyLock;

/// Sentinel for signal types without impedance control (power, ground)
pub const NOT_APPLICABLE: &str = "N/A";

/// Pattern for controlled impedance values like "50 Ohm", "90Ω", "100 Ohm differential"
/// (ASCII digits only)
static IMPEDANCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?\s*(Ohm|Ω)").unwrap());

/// Check whether an impedance string is accepted by the layout rule grammar
///
/// Examples:
/// - "50 Ohm" → valid
/// - "100 Ohm differential" → valid
/// - "90Ω" → valid
/// - "N/A" → valid
/// - "Not specified" → invalid
/// - "50" → invalid (no unit)
pub fn is_valid_impedance(value: &str) -> bool {
    let value = value.trim();
    value == NOT_APPLICABLE || IMPEDANCE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_impedance() {
        assert!(is_valid_impedance("50 Ohm"));
        assert!(is_valid_impedance("50Ohm"));
        assert!(is_valid_impedance("90 Ω"));
        assert!(is_valid_impedance("90Ω"));
        assert!(is_valid_impedance("37.5 Ohm"));
        assert!(is_valid_impedance("100 Ohm differential"));
        assert!(is_valid_impedance("N/A"));
        assert!(is_valid_impedance(" 50 Ohm "));
    }

    #[test]
    fn test_invalid_impedance() {
        assert!(!is_valid_impedance("Not specified"));
        assert!(!is_valid_impedance(
            "Not specified (assume single-ended impedance control)"
        ));
        assert!(!is_valid_impedance("50"));
        assert!(!is_valid_impedance("50 ohm"));
        assert!(!is_valid_impedance("Ohm 50"));
        assert!(!is_valid_impedance("n/a"));
        assert!(!is_valid_impedance(""));
        assert!(!is_valid_impedance(".5 Ohm"));
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        assert!(!is_valid_impedance("٥٠ Ohm"));
        assert!(!is_valid_impedance("５０ Ω"));
        assert!(is_valid_impedance("50 Ω"));
    }
}
