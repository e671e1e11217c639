use super::generation::{fallback_item, generate_item, roll_blueprint, roll_category};
use super::types::{Item, Rarity};
use crate::combat::types::EnemyRarity;
use crate::core::constants::*;
use crate::core::rng::{roll_chance, roll_unit};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Rarities the player does not want picked up.
pub type RarityExclusions = BTreeSet<Rarity>;

/// Which drop policy applies to a kill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropContext {
    /// At most one roll, gated by the enemy's drop chance.
    Standard,
    /// Several guaranteed rolls, all Rare or better.
    Boss,
    /// One guaranteed Magic-or-better roll plus a chance at a second.
    Mimic,
}

/// Everything the loot generator needs to know about a kill.
#[derive(Debug, Clone, Copy)]
pub struct LootRequest {
    pub context: DropContext,
    pub enemy_rarity: EnemyRarity,
    pub enemy_level: u32,
    pub zone_heat: u32,
}

fn base_table(enemy_rarity: EnemyRarity) -> [f64; 6] {
    match enemy_rarity {
        EnemyRarity::Normal => RARITY_TABLE_NORMAL,
        EnemyRarity::Rare => RARITY_TABLE_RARE,
        EnemyRarity::Elite => RARITY_TABLE_ELITE,
        EnemyRarity::Boss => RARITY_TABLE_BOSS,
    }
}

/// Per-tier probabilities (Common..Set) for a kill, after the heat shift.
///
/// Heat takes mass off Common and Magic and hands it to the upper tiers. Set
/// only ever gains a sliver so heat stays a dial rather than a guarantee.
pub fn rarity_weights(enemy_rarity: EnemyRarity, zone_heat: u32) -> [f64; 6] {
    let table = base_table(enemy_rarity);
    let mut weights = [0.0; 6];
    let mut previous = 0.0;
    for (i, threshold) in table.iter().enumerate() {
        weights[i] = threshold - previous;
        previous = *threshold;
    }

    let f = zone_heat.min(HEAT_MAX) as f64 / HEAT_MAX as f64;
    let common = weights[0] * (1.0 - HEAT_COMMON_SHIFT * f);
    let magic = weights[1] * (1.0 - HEAT_MAGIC_SHIFT * f);
    let freed = (weights[0] - common) + (weights[1] - magic);
    let set_gain = freed.min(HEAT_SET_BONUS_CAP * f);
    let rest = freed - set_gain;

    weights[0] = common;
    weights[1] = magic;
    weights[2] += rest * HEAT_RARE_SHARE;
    weights[3] += rest * HEAT_EPIC_SHARE;
    weights[4] += rest * HEAT_LEGENDARY_SHARE;
    weights[5] += set_gain;
    weights
}

/// Roll an item rarity from the enemy-keyed table (one draw).
pub fn roll_rarity(enemy_rarity: EnemyRarity, zone_heat: u32, rng: &mut impl Rng) -> Rarity {
    let weights = rarity_weights(enemy_rarity, zone_heat);
    let roll = roll_unit(rng);
    let mut cumulative = 0.0;
    for (rarity, weight) in Rarity::ALL.iter().zip(weights.iter()) {
        cumulative += weight;
        if roll < cumulative {
            return *rarity;
        }
    }
    Rarity::Set
}

/// Chance that a standard kill rolls any loot at all.
pub fn drop_chance(enemy_rarity: EnemyRarity) -> f64 {
    match enemy_rarity {
        EnemyRarity::Normal => DROP_CHANCE_NORMAL,
        EnemyRarity::Rare => DROP_CHANCE_RARE,
        EnemyRarity::Elite => DROP_CHANCE_ELITE,
        EnemyRarity::Boss => 1.0,
    }
}

/// One full loot roll: rarity (raised to `floor`), category, blueprint, item.
pub fn roll_drop(request: &LootRequest, floor: Rarity, rng: &mut impl Rng) -> Item {
    let rarity = roll_rarity(request.enemy_rarity, request.zone_heat, rng).max(floor);
    let category = roll_category(rng);
    match roll_blueprint(category, rarity, rng) {
        Some((bp, found)) => generate_item(bp, found, request.enemy_level, rng),
        None => fallback_item(request.enemy_level, rng),
    }
}

/// Generate the drops for a kill, filtered against the player's exclusions.
///
/// Whenever at least one roll happened, the result is never empty: if every
/// rolled item is excluded the fallback trinket is returned instead.
pub fn generate_loot(
    request: &LootRequest,
    exclusions: &RarityExclusions,
    rng: &mut impl Rng,
) -> Vec<Item> {
    let rolled: Vec<Item> = match request.context {
        DropContext::Standard => {
            if !roll_chance(rng, drop_chance(request.enemy_rarity)) {
                return Vec::new();
            }
            vec![roll_drop(request, Rarity::Common, rng)]
        }
        DropContext::Boss => (0..BOSS_DROP_ROLLS)
            .map(|_| roll_drop(request, Rarity::Rare, rng))
            .collect(),
        DropContext::Mimic => {
            let mut items = vec![roll_drop(request, Rarity::Magic, rng)];
            if roll_chance(rng, MIMIC_SECOND_ROLL_CHANCE) {
                items.push(roll_drop(request, Rarity::Common, rng));
            }
            items
        }
    };

    let rolled_count = rolled.len();
    let kept: Vec<Item> = rolled
        .into_iter()
        .filter(|item| !exclusions.contains(&item.rarity))
        .collect();

    if kept.is_empty() {
        tracing::debug!(rolled_count, "all drops excluded, substituting fallback");
        vec![fallback_item(request.enemy_level, rng)]
    } else {
        kept
    }
}
