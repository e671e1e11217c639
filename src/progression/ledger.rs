//! XP, level-ups and gold from kills.

use crate::character::types::Character;
use crate::combat::types::Enemy;
use crate::core::constants::*;
use serde::{Deserialize, Serialize};

/// What a kill did to the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillOutcome {
    pub experience_gained: u64,
    pub gold_gained: u64,
    pub leveled_up: bool,
    pub level_after: u32,
}

/// Calculates the XP required to leave `level`.
pub fn xp_for_next_level(level: u32) -> u64 {
    level as u64 * XP_PER_LEVEL
}

/// Credits a kill to the character.
///
/// Promotion is single-step: at most one level per kill. Surplus XP stays on
/// the character and is checked again on the next kill.
pub fn apply_kill(character: &mut Character, enemy: &Enemy) -> KillOutcome {
    character.experience += enemy.experience;
    character.gold += enemy.gold;

    let threshold = xp_for_next_level(character.level);
    let leveled_up = character.experience >= threshold;
    if leveled_up {
        character.experience -= threshold;
        character.level += 1;
        character.max_health += LEVEL_UP_MAX_HEALTH;
        character.health = character.max_health;
        character.max_mana += LEVEL_UP_MAX_MANA;
        character.mana = character.max_mana;
        character.strength += LEVEL_UP_ATTRIBUTE_POINTS;
        character.dexterity += LEVEL_UP_ATTRIBUTE_POINTS;
        character.intelligence += LEVEL_UP_ATTRIBUTE_POINTS;
        tracing::info!(
            character = %character.id,
            level = character.level,
            "level up"
        );
    }

    KillOutcome {
        experience_gained: enemy.experience,
        gold_gained: enemy.gold,
        leveled_up,
        level_after: character.level,
    }
}
