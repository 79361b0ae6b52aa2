//! Stat-change annotation parsing.
//!
//! Quest and habit rewards carry a free-text annotation like `"+2 STR, -1 WIL"`.
//! The wire format is kept for compatibility with existing data, but it is decoded
//! into structured [`StatChange`] values at the boundary so the progression rules
//! never thread strings around.

use serde::{Deserialize, Serialize};

use super::Attribute;

/// A single signed delta to one attribute, decoded from a stat-change annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatChange {
    pub attribute: Attribute,
    pub delta: i64,
}

impl StatChange {
    pub fn new(attribute: Attribute, delta: i64) -> Self {
        Self { attribute, delta }
    }
}

/// Parse a stat-change annotation into structured deltas.
///
/// The grammar is comma-separated tokens, each containing `sign digits
/// whitespace? code` where the code is one of STR/END/INT/WIS/CHA/WIL.
/// Tokens that do not match are silently skipped and unknown codes are
/// ignored, matching how existing annotations have always been read; empty
/// or absent input yields no deltas.
pub fn parse_stat_changes(text: Option<&str>) -> Vec<StatChange> {
    let Some(text) = text else {
        return Vec::new();
    };

    text.split(',')
        .filter_map(|token| match_token(token.trim()))
        .collect()
}

/// Find the first `sign digits whitespace? code` pattern inside a token.
///
/// Parsed by hand to avoid a regex dependency in the domain layer.
fn match_token(token: &str) -> Option<StatChange> {
    for (i, b) in token.bytes().enumerate() {
        if b != b'+' && b != b'-' {
            continue;
        }

        let rest = &token[i + 1..];
        let digits = rest.bytes().take_while(|c| c.is_ascii_digit()).count();
        if digits == 0 {
            continue;
        }

        // Sign plus digits parses directly as a signed integer
        let Ok(delta) = token[i..i + 1 + digits].parse::<i64>() else {
            continue;
        };

        let after = rest[digits..].trim_start();
        let Some(code) = after.get(..3) else {
            continue;
        };
        if let Ok(attribute) = code.parse::<Attribute>() {
            return Some(StatChange { attribute, delta });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_multiple_deltas() {
        let changes = parse_stat_changes(Some("+2 STR, -1 WIL"));
        assert_eq!(
            changes,
            vec![
                StatChange::new(Attribute::Strength, 2),
                StatChange::new(Attribute::Willpower, -1),
            ]
        );
    }

    #[test]
    fn test_whitespace_between_sign_and_code_is_optional() {
        let changes = parse_stat_changes(Some("+3INT"));
        assert_eq!(changes, vec![StatChange::new(Attribute::Intelligence, 3)]);
    }

    #[test]
    fn test_garbage_yields_nothing() {
        assert!(parse_stat_changes(Some("garbage")).is_empty());
    }

    #[test]
    fn test_empty_and_absent_input_yield_nothing() {
        assert!(parse_stat_changes(None).is_empty());
        assert!(parse_stat_changes(Some("")).is_empty());
    }

    #[test]
    fn test_unknown_codes_are_skipped() {
        let changes = parse_stat_changes(Some("+2 DEX, -1 WIL"));
        assert_eq!(changes, vec![StatChange::new(Attribute::Willpower, -1)]);
    }

    #[test]
    fn test_malformed_tokens_do_not_poison_the_rest() {
        let changes = parse_stat_changes(Some("STR +, +1 CHA, -"));
        assert_eq!(changes, vec![StatChange::new(Attribute::Charisma, 1)]);
    }

    #[test]
    fn test_pattern_matches_anywhere_in_token() {
        // Leading noise before the sign is tolerated, as it always has been
        let changes = parse_stat_changes(Some("gain +5 END"));
        assert_eq!(changes, vec![StatChange::new(Attribute::Endurance, 5)]);
    }
}
