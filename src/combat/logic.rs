use super::types::{AttackResult, CombatantSnapshot, Enemy, WeaponSnapshot};
use crate::core::constants::*;
use crate::core::rng::{roll_inclusive, roll_unit};
use crate::items::types::DamageType;
use rand::Rng;

/// Chance to land a blow against `evasion`, clamped to `[0.05, 0.98]`.
pub fn hit_chance(evasion: f64) -> f64 {
    (1.0 - evasion).clamp(MIN_HIT_CHANCE, MAX_HIT_CHANCE)
}

/// Damage multiplier from armor: `1 - armor / (armor + 50)`, mitigation capped at 90%.
pub fn armor_multiplier(armor: u32) -> f64 {
    let armor = armor as f64;
    let mitigation = (armor / (armor + ARMOR_CURVE_CONSTANT)).clamp(0.0, MAX_ARMOR_MITIGATION);
    1.0 - mitigation
}

pub fn resistance_multiplier(resistance: f64) -> f64 {
    1.0 - resistance.clamp(-MAX_RESISTANCE, MAX_RESISTANCE)
}

/// Crit chance as a fraction. Values above 1 are percentages.
pub fn normalize_crit_chance(chance: f64) -> f64 {
    if chance > CRIT_CHANCE_PERCENT_CUTOFF {
        chance / 100.0
    } else {
        chance
    }
}

/// Crit multiplier as a factor. Values above 5 are percent-of-100.
pub fn normalize_crit_multiplier(multiplier: f64) -> f64 {
    if multiplier > CRIT_MULTIPLIER_PERCENT_CUTOFF {
        multiplier / 100.0
    } else {
        multiplier
    }
}

/// Resolve one attack.
///
/// Draw order is fixed: evasion, base roll, crit. An evaded attack stops after
/// the first draw. No state outside the returned value is touched.
pub fn resolve(
    attacker: &CombatantSnapshot,
    defender: &CombatantSnapshot,
    weapon: Option<&WeaponSnapshot>,
    flat_bonus: f64,
    percent_bonus: f64,
    rng: &mut impl Rng,
) -> AttackResult {
    if roll_unit(rng) > hit_chance(defender.evasion_chance) {
        return AttackResult {
            hit: false,
            evaded: true,
            critical: false,
            base_roll: 0,
            damage_final: 0,
            defender_life_after: defender.life,
            killed: false,
        };
    }

    let (min, max, damage_type) = match weapon {
        Some(w) => (w.min_damage, w.max_damage, w.damage_type),
        None => (UNARMED_MIN_DAMAGE, UNARMED_MAX_DAMAGE, DamageType::Physical),
    };
    let base_roll = roll_inclusive(rng, min, max);

    let mut damage = (base_roll as f64 + flat_bonus) * (1.0 + percent_bonus);

    let critical = roll_unit(rng) < normalize_crit_chance(attacker.crit_chance);
    if critical {
        damage *= normalize_crit_multiplier(attacker.crit_multiplier);
    }

    damage *= armor_multiplier(defender.armor);
    damage *= resistance_multiplier(defender.resistances.get(damage_type));

    let damage_final = (damage.floor() as i64).max(1) as u32;
    let defender_life_after = defender.life.saturating_sub(damage_final);

    AttackResult {
        hit: true,
        evaded: false,
        critical,
        base_roll,
        damage_final,
        defender_life_after,
        killed: defender_life_after == 0,
    }
}

/// Weapon an enemy swings on a counter-attack: `[damage, damage + 4]` physical.
pub fn counter_attack_weapon(enemy: &Enemy) -> WeaponSnapshot {
    WeaponSnapshot {
        min_damage: enemy.damage,
        max_damage: enemy.damage.saturating_add(COUNTER_ATTACK_SPREAD),
        damage_type: DamageType::Physical,
    }
}

/// Enemy strikes back at the player.
///
/// Equipped armor is subtracted flat from the hit instead of going through the
/// armor curve, so the defender snapshot carries zero armor and no resistances.
pub fn resolve_counter_attack(
    enemy: &Enemy,
    player_life: u32,
    player_evasion: f64,
    equipped_armor: u32,
    rng: &mut impl Rng,
) -> AttackResult {
    let defender = CombatantSnapshot {
        life: player_life,
        armor: 0,
        evasion_chance: player_evasion,
        crit_chance: 0.0,
        crit_multiplier: 1.0,
        resistances: Default::default(),
    };
    let weapon = counter_attack_weapon(enemy);
    resolve(
        &enemy.attack_snapshot(),
        &defender,
        Some(&weapon),
        -(equipped_armor as f64),
        0.0,
        rng,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::types::{EnemyRarity, Resistances};
    use crate::core::ScriptedRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn snapshot(life: u32) -> CombatantSnapshot {
        CombatantSnapshot {
            life,
            armor: 0,
            evasion_chance: 0.0,
            crit_chance: 0.0,
            crit_multiplier: 1.5,
            resistances: Resistances::default(),
        }
    }

    fn sword() -> WeaponSnapshot {
        WeaponSnapshot {
            min_damage: 10,
            max_damage: 20,
            damage_type: DamageType::Physical,
        }
    }

    fn test_enemy(damage: u32) -> Enemy {
        Enemy {
            name: "Test Ghoul".to_string(),
            rarity: EnemyRarity::Normal,
            level: 1,
            max_health: 30,
            health: 30,
            damage,
            experience: 10,
            gold: 5,
            armor: 0,
            evasion: 0.0,
            resistances: Resistances::default(),
        }
    }

    #[test]
    fn test_hit_chance_clamped() {
        assert_eq!(hit_chance(0.0), MAX_HIT_CHANCE);
        assert_eq!(hit_chance(1.0), MIN_HIT_CHANCE);
        assert_eq!(hit_chance(2.0), MIN_HIT_CHANCE);
        assert!((hit_chance(0.3) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_armor_multiplier_bounds() {
        assert_eq!(armor_multiplier(0), 1.0);
        assert!((armor_multiplier(50) - 0.5).abs() < 1e-12);
        for armor in [1, 10, 100, 1_000, 100_000, u32::MAX] {
            let m = armor_multiplier(armor);
            assert!((0.1 - 1e-12..=1.0).contains(&m), "armor {armor} -> {m}");
        }
        assert!((armor_multiplier(u32::MAX) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_crit_normalization() {
        assert_eq!(normalize_crit_chance(0.25), 0.25);
        assert_eq!(normalize_crit_chance(25.0), 0.25);
        assert_eq!(normalize_crit_multiplier(2.0), 2.0);
        assert_eq!(normalize_crit_multiplier(150.0), 1.5);
    }

    #[test]
    fn test_evaded_attack_deals_nothing() {
        let mut defender = snapshot(50);
        defender.evasion_chance = 0.5;
        let mut rng = ScriptedRng::new([0.9]);
        let result = resolve(&snapshot(100), &defender, Some(&sword()), 0.0, 0.0, &mut rng);
        assert!(result.evaded);
        assert!(!result.hit);
        assert_eq!(result.damage_final, 0);
        assert_eq!(result.defender_life_after, 50);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_full_pipeline_with_scripted_draws() {
        // hit, base roll 10 + floor(0.5 * 11) = 15, crit
        let mut rng = ScriptedRng::new([0.1, 0.5, 0.0]);
        let mut attacker = snapshot(100);
        attacker.crit_chance = 10.0;
        attacker.crit_multiplier = 200.0;
        let mut defender = snapshot(100);
        defender.armor = 50;
        defender.resistances.physical = 0.2;

        let result = resolve(&attacker, &defender, Some(&sword()), 5.0, 0.5, &mut rng);
        assert!(result.hit && result.critical);
        assert_eq!(result.base_roll, 15);
        // (15 + 5) * 1.5 = 30; x2 crit = 60; x0.5 armor = 30; x0.8 resist = 24
        assert_eq!(result.damage_final, 24);
        assert_eq!(result.defender_life_after, 76);
        assert!(!result.killed);
    }

    #[test]
    fn test_unarmed_rolls_one_or_two() {
        let mut rng = ScriptedRng::new([0.0, 0.99, 0.9]);
        let result = resolve(&snapshot(10), &snapshot(10), None, 0.0, 0.0, &mut rng);
        assert!(result.hit);
        assert_eq!(result.base_roll, UNARMED_MAX_DAMAGE);
        assert!(!result.critical);
    }

    #[test]
    fn test_hit_always_deals_at_least_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut defender = snapshot(1_000);
        defender.armor = 10_000;
        defender.resistances.physical = 0.9;
        for _ in 0..200 {
            let r = resolve(&snapshot(10), &defender, None, -50.0, 0.0, &mut rng);
            if r.hit {
                assert!(r.damage_final >= 1);
            }
        }
    }

    #[test]
    fn test_kill_clamps_life_at_zero() {
        let mut rng = ScriptedRng::new([0.0, 0.99, 0.9]);
        let result = resolve(&snapshot(10), &snapshot(5), Some(&sword()), 0.0, 0.0, &mut rng);
        assert_eq!(result.defender_life_after, 0);
        assert!(result.killed);
    }

    #[test]
    fn test_negative_resistance_amplifies() {
        let mut defender = snapshot(100);
        defender.resistances.fire = -0.5;
        let staff = WeaponSnapshot {
            damage_type: DamageType::Fire,
            ..sword()
        };
        let mut rng = ScriptedRng::new([0.0, 0.0, 0.9]);
        let result = resolve(&snapshot(10), &defender, Some(&staff), 0.0, 0.0, &mut rng);
        assert_eq!(result.damage_final, 15);
    }

    #[test]
    fn test_same_draws_same_result() {
        let attacker = snapshot(100);
        let defender = snapshot(100);
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..50 {
            let ra = resolve(&attacker, &defender, Some(&sword()), 2.0, 0.1, &mut a);
            let rb = resolve(&attacker, &defender, Some(&sword()), 2.0, 0.1, &mut b);
            assert_eq!(ra, rb);
        }
    }

    #[test]
    fn test_counter_attack_subtracts_armor_flat() {
        // base roll 8 + floor(0.0 * 5) = 8, minus 5 armor = 3
        let mut rng = ScriptedRng::new([0.0, 0.0, 0.9]);
        let result = resolve_counter_attack(&test_enemy(8), 40, 0.0, 5, &mut rng);
        assert_eq!(result.base_roll, 8);
        assert_eq!(result.damage_final, 3);
        assert_eq!(result.defender_life_after, 37);
    }

    #[test]
    fn test_counter_attack_minimum_one_through_heavy_armor() {
        let mut rng = ScriptedRng::new([0.0, 0.99, 0.9]);
        let result = resolve_counter_attack(&test_enemy(3), 40, 0.0, 500, &mut rng);
        assert_eq!(result.base_roll, 3 + COUNTER_ATTACK_SPREAD);
        assert_eq!(result.damage_final, 1);
    }
}
