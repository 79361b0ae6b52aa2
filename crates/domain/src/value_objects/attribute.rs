//! Attribute value object - the six character attributes tracked on the stat sheet.
//!
//! Provides type safety for attribute references instead of using magic strings like "STR", "WIL".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Character attributes affected by quest and habit rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attribute {
    /// Physical power
    Strength,
    /// Stamina and persistence
    Endurance,
    /// Reasoning and memory
    Intelligence,
    /// Perception and insight
    Wisdom,
    /// Force of personality
    Charisma,
    /// Self-discipline and resolve
    Willpower,
}

impl Attribute {
    /// Returns the short uppercase code used in stat-change annotations (e.g., "STR", "WIL").
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Endurance => "END",
            Self::Intelligence => "INT",
            Self::Wisdom => "WIS",
            Self::Charisma => "CHA",
            Self::Willpower => "WIL",
        }
    }

    /// Returns the full name of the attribute (e.g., "Strength", "Willpower").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Endurance => "Endurance",
            Self::Intelligence => "Intelligence",
            Self::Wisdom => "Wisdom",
            Self::Charisma => "Charisma",
            Self::Willpower => "Willpower",
        }
    }

    /// Returns all six attributes in sheet order.
    pub fn all() -> [Attribute; 6] {
        [
            Self::Strength,
            Self::Endurance,
            Self::Intelligence,
            Self::Wisdom,
            Self::Charisma,
            Self::Willpower,
        ]
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

impl FromStr for Attribute {
    type Err = ();

    /// Parses the short code form ("STR", "END", ...). Unknown codes are an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STR" => Ok(Self::Strength),
            "END" => Ok(Self::Endurance),
            "INT" => Ok(Self::Intelligence),
            "WIS" => Ok(Self::Wisdom),
            "CHA" => Ok(Self::Charisma),
            "WIL" => Ok(Self::Willpower),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for attr in Attribute::all() {
            assert_eq!(attr.as_code().parse::<Attribute>(), Ok(attr));
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!("DEX".parse::<Attribute>().is_err());
        assert!("str".parse::<Attribute>().is_err());
    }
}
