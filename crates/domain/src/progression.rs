//! Progression rules - XP gain, level-up evaluation, stat and HP deltas.
//!
//! The rules here are pure: they take the current sheet and a completion's
//! rewards and return the next sheet. Persisting the result is the engine's
//! job, done as a single write so the sheet never lands half-updated.

use crate::entities::CharacterStats;
use crate::value_objects::StatChange;

/// XP threshold to advance past the given level.
///
/// The curve is linear with a 1.2 factor, compared against *cumulative* XP:
/// `round(level * 100 * 1.2)`.
pub fn xp_to_next_level(level: i64) -> i64 {
    (level as f64 * 100.0 * 1.2).round() as i64
}

/// Apply one completion's rewards to a sheet, returning the updated sheet.
///
/// Level-up increments the level by exactly one when cumulative XP crosses
/// the current threshold, even if the XP overshoots several thresholds at
/// once; XP itself is never reduced or reset. HP is not clamped in either
/// direction.
pub fn apply_completion(
    stats: &CharacterStats,
    xp_gained: i64,
    stat_changes: &[StatChange],
    hp_delta: Option<i64>,
) -> CharacterStats {
    let mut next = stats.clone();

    next.xp = stats.xp + xp_gained;
    if next.xp >= xp_to_next_level(stats.level) {
        next.level = stats.level + 1;
    }

    next.hp = stats.hp + hp_delta.unwrap_or(0);

    for change in stat_changes {
        *next.attribute_mut(change.attribute) += change.delta;
    }

    next
}
