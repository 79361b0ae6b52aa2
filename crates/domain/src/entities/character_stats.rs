//! Character stats entity - the per-user stat sheet.
//!
//! Exactly one record exists per user, created at registration. All mutation
//! flows through the progression rules; nothing else writes these fields.

use serde::{Deserialize, Serialize};

use crate::ids::UserId;
use crate::value_objects::Attribute;

/// The per-user character sheet: level, cumulative XP, HP and six attributes.
///
/// XP is cumulative and never reset on level-up. HP has no floor or ceiling;
/// it may go negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterStats {
    pub user_id: UserId,
    pub level: i64,
    pub xp: i64,
    pub hp: i64,
    pub strength: i64,
    pub endurance: i64,
    pub intelligence: i64,
    pub wisdom: i64,
    pub charisma: i64,
    pub willpower: i64,
}

impl CharacterStats {
    /// The starting sheet handed to a freshly registered user.
    pub fn starting(user_id: UserId) -> Self {
        Self {
            user_id,
            level: 1,
            xp: 0,
            hp: 100,
            strength: 5,
            endurance: 5,
            intelligence: 5,
            wisdom: 5,
            charisma: 5,
            willpower: 5,
        }
    }

    /// Read one attribute by kind.
    pub fn attribute(&self, attribute: Attribute) -> i64 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Endurance => self.endurance,
            Attribute::Intelligence => self.intelligence,
            Attribute::Wisdom => self.wisdom,
            Attribute::Charisma => self.charisma,
            Attribute::Willpower => self.willpower,
        }
    }

    /// Mutable access to one attribute by kind.
    pub fn attribute_mut(&mut self, attribute: Attribute) -> &mut i64 {
        match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Endurance => &mut self.endurance,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Wisdom => &mut self.wisdom,
            Attribute::Charisma => &mut self.charisma,
            Attribute::Willpower => &mut self.willpower,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_sheet() {
        let stats = CharacterStats::starting(UserId::new());
        assert_eq!(stats.level, 1);
        assert_eq!(stats.xp, 0);
        assert_eq!(stats.hp, 100);
        for attr in Attribute::all() {
            assert_eq!(stats.attribute(attr), 5);
        }
    }

    #[test]
    fn test_attribute_mut_targets_the_right_field() {
        let mut stats = CharacterStats::starting(UserId::new());
        *stats.attribute_mut(Attribute::Willpower) -= 2;
        assert_eq!(stats.willpower, 3);
        assert_eq!(stats.strength, 5);
    }
}
