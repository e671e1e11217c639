//! Enemy spawning.
//!
//! The session asks an [`EnemyFactory`] for a fresh enemy every time an
//! encounter starts. [`StandardEnemyFactory`] scales a base profile by floor,
//! rarity tier and zone heat.

use super::types::{Enemy, EnemyRarity, Resistances};
use crate::core::constants::*;
use crate::core::rng::{roll_between, roll_index, GameRng};
use crate::dungeon::types::RoomType;
use rand::{Rng, SeedableRng};

/// What the session knows when it needs an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncounterContext {
    pub room_type: RoomType,
    pub floor: u32,
    pub player_level: u32,
    pub zone_heat: u32,
}

/// Supplies enemies for encounters.
pub trait EnemyFactory: Send {
    fn generate(&mut self, context: &EncounterContext) -> Enemy;
}

/// Enemy tier spawned by a room type.
pub fn enemy_rarity_for(room_type: RoomType) -> EnemyRarity {
    match room_type {
        RoomType::RareEnemy | RoomType::Mimic => EnemyRarity::Rare,
        RoomType::MiniBoss => EnemyRarity::Elite,
        RoomType::Boss => EnemyRarity::Boss,
        RoomType::Enemy | RoomType::Ladder | RoomType::Empty => EnemyRarity::Normal,
    }
}

fn rarity_multipliers(rarity: EnemyRarity) -> (f64, f64, f64) {
    match rarity {
        EnemyRarity::Normal => (1.0, 1.0, 1.0),
        EnemyRarity::Rare => RARE_ENEMY_MULTIPLIERS,
        EnemyRarity::Elite => ELITE_ENEMY_MULTIPLIERS,
        EnemyRarity::Boss => BOSS_ENEMY_MULTIPLIERS,
    }
}

const NAME_PREFIXES: [&str; 10] = [
    "Grizz", "Sav", "Dark", "Blood", "Bone", "Shadow", "Fel", "Dire", "Rot", "Grim",
];
const NAME_SUFFIXES: [&str; 10] = [
    "Ghoul", "Troll", "Drake", "Crawler", "Render", "Maw", "Wight", "Fiend", "Horror", "Lurker",
];

fn generate_enemy_name(rng: &mut impl Rng) -> String {
    let prefix = NAME_PREFIXES[roll_index(rng, NAME_PREFIXES.len())];
    let suffix = NAME_SUFFIXES[roll_index(rng, NAME_SUFFIXES.len())];
    format!("{}{}", prefix, suffix.to_lowercase())
}

/// Build an enemy from a context. Draw order: health variance, damage
/// variance, then two name draws (skipped for mimics).
pub fn build_enemy(context: &EncounterContext, rng: &mut impl Rng) -> Enemy {
    let rarity = enemy_rarity_for(context.room_type);
    let (health_mult, damage_mult, reward_mult) = rarity_multipliers(rarity);
    let level = context.floor.max(1);
    let depth = level - 1;
    let heat = context.zone_heat.min(HEAT_MAX) as f64 / HEAT_MAX as f64;
    let toughness = 1.0 + HEAT_ENEMY_TOUGHNESS * heat;

    let health_var = roll_between(rng, ENEMY_STAT_VARIANCE_MIN, ENEMY_STAT_VARIANCE_MAX);
    let damage_var = roll_between(rng, ENEMY_STAT_VARIANCE_MIN, ENEMY_STAT_VARIANCE_MAX);

    let raw_health = (ENEMY_BASE_HEALTH + ENEMY_HEALTH_PER_FLOOR * depth) as f64;
    let raw_damage = (ENEMY_BASE_DAMAGE + ENEMY_DAMAGE_PER_FLOOR * depth) as f64;
    let max_health = (raw_health * health_mult * health_var * toughness).max(1.0) as u32;
    let damage = (raw_damage * damage_mult * damage_var * toughness).max(1.0) as u32;

    let experience =
        ((ENEMY_BASE_XP + ENEMY_XP_PER_FLOOR * depth as u64) as f64 * reward_mult) as u64;
    let gold = ((ENEMY_BASE_GOLD + ENEMY_GOLD_PER_FLOOR * depth as u64) as f64 * reward_mult) as u64;

    let resistances = match rarity {
        EnemyRarity::Elite | EnemyRarity::Boss => Resistances {
            fire: ELITE_ELEMENTAL_RESISTANCE,
            cold: ELITE_ELEMENTAL_RESISTANCE,
            lightning: ELITE_ELEMENTAL_RESISTANCE,
            ..Resistances::default()
        },
        _ => Resistances::default(),
    };

    let name = match (context.room_type, rarity) {
        (RoomType::Mimic, _) => "Mimic".to_string(),
        (_, EnemyRarity::Normal) => generate_enemy_name(rng),
        (_, EnemyRarity::Rare) => format!("Vicious {}", generate_enemy_name(rng)),
        (_, EnemyRarity::Elite) => format!("Elite {}", generate_enemy_name(rng)),
        (_, EnemyRarity::Boss) => format!("Warlord {}", generate_enemy_name(rng)),
    };

    Enemy {
        name,
        rarity,
        level,
        max_health,
        health: max_health,
        damage,
        experience,
        gold,
        armor: ENEMY_ARMOR_PER_FLOOR * depth,
        evasion: ENEMY_BASE_EVASION,
        resistances,
    }
}

/// Default factory with its own seeded stream, independent of the session RNG.
#[derive(Debug, Clone)]
pub struct StandardEnemyFactory {
    rng: GameRng,
}

impl StandardEnemyFactory {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::seed_from_u64(seed),
        }
    }
}

impl EnemyFactory for StandardEnemyFactory {
    fn generate(&mut self, context: &EncounterContext) -> Enemy {
        let enemy = build_enemy(context, &mut self.rng);
        tracing::debug!(
            name = %enemy.name,
            rarity = enemy.rarity.name(),
            floor = context.floor,
            player_level = context.player_level,
            health = enemy.max_health,
            damage = enemy.damage,
            "spawned enemy"
        );
        enemy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedRng;

    fn context(room_type: RoomType, floor: u32, zone_heat: u32) -> EncounterContext {
        EncounterContext {
            room_type,
            floor,
            player_level: 1,
            zone_heat,
        }
    }

    #[test]
    fn test_room_type_maps_to_rarity() {
        assert_eq!(enemy_rarity_for(RoomType::Enemy), EnemyRarity::Normal);
        assert_eq!(enemy_rarity_for(RoomType::RareEnemy), EnemyRarity::Rare);
        assert_eq!(enemy_rarity_for(RoomType::Mimic), EnemyRarity::Rare);
        assert_eq!(enemy_rarity_for(RoomType::MiniBoss), EnemyRarity::Elite);
        assert_eq!(enemy_rarity_for(RoomType::Boss), EnemyRarity::Boss);
    }

    #[test]
    fn test_floor_one_normal_enemy_base_stats() {
        // variance draws of 0.5 => exactly 1.0x
        let mut rng = ScriptedRng::new([0.5, 0.5, 0.0, 0.0]);
        let enemy = build_enemy(&context(RoomType::Enemy, 1, 0), &mut rng);
        assert_eq!(enemy.max_health, ENEMY_BASE_HEALTH);
        assert_eq!(enemy.health, enemy.max_health);
        assert_eq!(enemy.damage, ENEMY_BASE_DAMAGE);
        assert_eq!(enemy.experience, ENEMY_BASE_XP);
        assert_eq!(enemy.gold, ENEMY_BASE_GOLD);
        assert_eq!(enemy.armor, 0);
        assert_eq!(enemy.name, "Grizzghoul");
    }

    #[test]
    fn test_boss_is_tougher_and_resists_elements() {
        let mut a = ScriptedRng::new([0.5, 0.5]);
        let mut b = ScriptedRng::new([0.5, 0.5]);
        let normal = build_enemy(&context(RoomType::Enemy, 10, 0), &mut a);
        let boss = build_enemy(&context(RoomType::Boss, 10, 0), &mut b);
        assert!(boss.max_health > normal.max_health * 3);
        assert!(boss.experience > normal.experience);
        assert_eq!(boss.rarity, EnemyRarity::Boss);
        assert!(boss.resistances.fire > 0.0);
        assert_eq!(boss.resistances.physical, 0.0);
    }

    #[test]
    fn test_heat_makes_enemies_tougher() {
        let mut a = ScriptedRng::new([0.5, 0.5]);
        let mut b = ScriptedRng::new([0.5, 0.5]);
        let cold = build_enemy(&context(RoomType::Enemy, 5, 0), &mut a);
        let hot = build_enemy(&context(RoomType::Enemy, 5, 100), &mut b);
        assert!(hot.max_health > cold.max_health);
        assert!(hot.damage >= cold.damage);
    }

    #[test]
    fn test_mimic_named_and_rare() {
        let mut factory = StandardEnemyFactory::new(3);
        let enemy = factory.generate(&context(RoomType::Mimic, 2, 0));
        assert_eq!(enemy.name, "Mimic");
        assert_eq!(enemy.rarity, EnemyRarity::Rare);
    }

    #[test]
    fn test_factory_is_reproducible_per_seed() {
        let mut a = StandardEnemyFactory::new(77);
        let mut b = StandardEnemyFactory::new(77);
        for floor in 1..10 {
            let ctx = context(RoomType::RareEnemy, floor, 20);
            assert_eq!(a.generate(&ctx), b.generate(&ctx));
        }
    }
}
