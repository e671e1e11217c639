use super::blueprints::{pool_for, Blueprint};
use super::types::{Affix, AffixType, DamageType, Item, ItemCategory, ItemKind, Rarity};
use crate::core::constants::*;
use crate::core::rng::{roll_between, roll_id, roll_index, roll_unit, roll_weighted};
use rand::Rng;

const OFFENSIVE_AFFIXES: [AffixType; 6] = [
    AffixType::FlatDamage,
    AffixType::DamagePercent,
    AffixType::CritChance,
    AffixType::CritMultiplier,
    AffixType::Strength,
    AffixType::Dexterity,
];

const DEFENSIVE_AFFIXES: [AffixType; 7] = [
    AffixType::Armor,
    AffixType::MaxHealth,
    AffixType::Evasion,
    AffixType::FireResist,
    AffixType::ColdResist,
    AffixType::Intelligence,
    AffixType::MaxMana,
];

/// Rolls the blueprint category: weapon, armor, or potion.
pub fn roll_category(rng: &mut impl Rng) -> ItemCategory {
    let roll = roll_unit(rng);
    if roll < WEAPON_CATEGORY_CHANCE {
        ItemCategory::Weapon
    } else if roll < WEAPON_CATEGORY_CHANCE + ARMOR_CATEGORY_CHANCE {
        ItemCategory::Armor
    } else {
        ItemCategory::Potion
    }
}

/// Picks a blueprint from `category` at `rarity`, stepping down the ladder when
/// the pool has nothing at the requested tier. Returns the blueprint and the
/// rarity it was actually found at.
pub fn roll_blueprint(
    category: ItemCategory,
    rarity: Rarity,
    rng: &mut impl Rng,
) -> Option<(&'static Blueprint, Rarity)> {
    let pool = pool_for(category);
    let mut tier = Some(rarity);
    while let Some(current) = tier {
        let candidates: Vec<&'static Blueprint> =
            pool.iter().filter(|bp| bp.allows(current)).collect();
        if let Some(idx) = roll_weighted(rng, &candidates, |bp| bp.weight) {
            if current != rarity {
                tracing::debug!(
                    ?category,
                    requested = rarity.name(),
                    found = current.name(),
                    "loot table miss, fell back a tier"
                );
            }
            return Some((candidates[idx], current));
        }
        tier = current.next_lower();
    }
    None
}

/// Scaled primary stat: `(base + level * coefficient + jitter) * multiplier`.
fn scaled_stat(bp: &Blueprint, rarity: Rarity, enemy_level: u32, rng: &mut impl Rng) -> f64 {
    let jitter = roll_between(rng, 0.0, STAT_JITTER_MAX);
    (bp.base_stat + enemy_level as f64 * bp.level_coefficient + jitter) * rarity.multiplier()
}

/// Generate an item from a blueprint at the given rarity and enemy level.
pub fn generate_item(
    bp: &Blueprint,
    rarity: Rarity,
    enemy_level: u32,
    rng: &mut impl Rng,
) -> Item {
    let scaled = scaled_stat(bp, rarity, enemy_level, rng);

    let (min_damage, max_damage, armor, restore) = match bp.kind.category() {
        ItemCategory::Weapon => {
            let min = ((scaled * WEAPON_MIN_DAMAGE_FACTOR).floor() as u32).max(1);
            let max = ((scaled * WEAPON_MAX_DAMAGE_FACTOR).ceil() as u32).max(min);
            (min, max, 0, 0)
        }
        ItemCategory::Armor => (0, 0, scaled.floor() as u32, 0),
        ItemCategory::Potion => (0, 0, 0, scaled.floor() as u32),
    };

    let value = ((scaled * VALUE_PER_STAT * rarity.multiplier()).floor() as u64).max(1);

    let affixes = if bp.kind.is_consumable() {
        Vec::new()
    } else {
        generate_affixes(bp.kind, rarity, rng)
    };

    let (set_name, set_bonuses) = match bp.set {
        Some(set) => (Some(set.name.to_string()), set.bonuses.to_vec()),
        None => (None, Vec::new()),
    };

    // id last: stat draws keep their positions
    Item {
        id: roll_id(rng),
        kind: bp.kind,
        rarity,
        name: display_name(bp, rarity),
        item_level: enemy_level,
        min_damage,
        max_damage,
        damage_type: bp.damage_type,
        armor,
        restore,
        value,
        affixes,
        set_name,
        set_bonuses,
        equipped: false,
    }
}

fn display_name(bp: &Blueprint, rarity: Rarity) -> String {
    match rarity {
        Rarity::Common | Rarity::Set => bp.name.to_string(),
        Rarity::Magic => format!("Fine {}", bp.name),
        Rarity::Rare => format!("Superior {}", bp.name),
        Rarity::Epic => format!("Masterwork {}", bp.name),
        Rarity::Legendary => format!("Mythic {}", bp.name),
    }
}

/// Affixes for an equippable item: count fixed by rarity, drawn without
/// replacement from the pool matching the item kind.
pub fn generate_affixes(kind: ItemKind, rarity: Rarity, rng: &mut impl Rng) -> Vec<Affix> {
    let mut pool: Vec<AffixType> = if kind.is_weapon() {
        OFFENSIVE_AFFIXES.to_vec()
    } else {
        DEFENSIVE_AFFIXES.to_vec()
    };

    let count = rarity.affix_count().min(pool.len());
    let mut affixes = Vec::with_capacity(count);

    for index in 0..count {
        let affix_type = pool.remove(roll_index(rng, pool.len()));
        let value = generate_affix_value(affix_type, rarity, index, rng);
        affixes.push(Affix { affix_type, value });
    }

    affixes
}

/// Base magnitude range at the bottom of the ladder.
fn affix_base_range(affix_type: AffixType) -> (f64, f64) {
    match affix_type {
        AffixType::FlatDamage => (1.0, 3.0),
        AffixType::DamagePercent => (3.0, 6.0),
        AffixType::CritChance => (1.0, 3.0),
        AffixType::CritMultiplier => (5.0, 10.0),
        AffixType::Strength | AffixType::Dexterity | AffixType::Intelligence => (1.0, 3.0),
        AffixType::Armor => (2.0, 5.0),
        AffixType::MaxHealth => (5.0, 12.0),
        AffixType::Evasion => (1.0, 3.0),
        AffixType::FireResist | AffixType::ColdResist => (3.0, 8.0),
        AffixType::MaxMana => (4.0, 10.0),
    }
}

/// Magnitude scales with rarity and with the affix's position on the item.
fn generate_affix_value(
    affix_type: AffixType,
    rarity: Rarity,
    index: usize,
    rng: &mut impl Rng,
) -> f64 {
    let (min, max) = affix_base_range(affix_type);
    let base = roll_between(rng, min, max);
    let index_scale = 1.0 + AFFIX_INDEX_STEP * index as f64;
    (base * rarity.multiplier() * index_scale).round()
}

/// The guaranteed low-value drop used when filtering leaves nothing.
pub fn fallback_item(enemy_level: u32, rng: &mut impl Rng) -> Item {
    Item {
        id: roll_id(rng),
        kind: ItemKind::Trinket,
        rarity: Rarity::Common,
        name: FALLBACK_ITEM_NAME.to_string(),
        item_level: enemy_level,
        min_damage: 0,
        max_damage: 0,
        damage_type: DamageType::Physical,
        armor: 0,
        restore: 0,
        value: FALLBACK_ITEM_VALUE,
        affixes: Vec::new(),
        set_name: None,
        set_bonuses: Vec::new(),
        equipped: false,
    }
}
