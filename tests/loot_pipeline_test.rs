//! Integration test: kill → drop policy → rarity → item → exclusion filter

use delve::combat::types::EnemyRarity;
use delve::core::constants::FALLBACK_ITEM_NAME;
use delve::core::rng::ScriptedRng;
use delve::items::drops::{
    generate_loot, rarity_weights, DropContext, LootRequest, RarityExclusions,
};
use delve::items::types::Rarity;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn request(context: DropContext, enemy_rarity: EnemyRarity) -> LootRequest {
    LootRequest {
        context,
        enemy_rarity,
        enemy_level: 5,
        zone_heat: 0,
    }
}

// =========================================================================
// Drop policies
// =========================================================================

#[test]
fn test_boss_always_drops_rare_or_better() {
    let exclusions = RarityExclusions::new();
    for seed in 0..200 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let drops = generate_loot(
            &request(DropContext::Boss, EnemyRarity::Boss),
            &exclusions,
            &mut rng,
        );
        assert!(!drops.is_empty(), "seed {seed}: boss dropped nothing");
        assert!(
            drops.iter().any(|item| item.rarity >= Rarity::Rare),
            "seed {seed}: no Rare+ in boss drops"
        );
    }
}

#[test]
fn test_mimic_drops_magic_or_better_first() {
    let exclusions = RarityExclusions::new();
    for seed in 0..200 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let drops = generate_loot(
            &request(DropContext::Mimic, EnemyRarity::Rare),
            &exclusions,
            &mut rng,
        );
        assert!((1..=2).contains(&drops.len()));
        assert!(drops[0].rarity >= Rarity::Magic, "seed {seed}");
    }
}

#[test]
fn test_standard_miss_drops_nothing() {
    let mut rng = ScriptedRng::new([0.99]);
    let drops = generate_loot(
        &request(DropContext::Standard, EnemyRarity::Normal),
        &RarityExclusions::new(),
        &mut rng,
    );
    assert!(drops.is_empty());
}

#[test]
fn test_standard_drop_rate_tracks_drop_chance() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let exclusions = RarityExclusions::new();
    let trials = 4_000;
    let hits = (0..trials)
        .filter(|_| {
            !generate_loot(
                &request(DropContext::Standard, EnemyRarity::Normal),
                &exclusions,
                &mut rng,
            )
            .is_empty()
        })
        .count();
    let rate = hits as f64 / trials as f64;
    assert!((0.30..0.40).contains(&rate), "normal drop rate {rate}");
}

// =========================================================================
// Exclusions
// =========================================================================

#[test]
fn test_fully_excluded_drops_become_fallback() {
    let exclusions: RarityExclusions = Rarity::ALL.into_iter().collect();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let drops = generate_loot(
        &request(DropContext::Boss, EnemyRarity::Boss),
        &exclusions,
        &mut rng,
    );
    assert_eq!(drops.len(), 1);
    assert_eq!(drops[0].name, FALLBACK_ITEM_NAME);
}

#[test]
fn test_excluded_rarities_never_returned_when_others_survive() {
    let exclusions: RarityExclusions = [Rarity::Common, Rarity::Magic].into_iter().collect();
    for seed in 0..200 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let drops = generate_loot(
            &request(DropContext::Boss, EnemyRarity::Boss),
            &exclusions,
            &mut rng,
        );
        assert!(drops.iter().all(|item| item.rarity >= Rarity::Rare));
    }
}

// =========================================================================
// Heat
// =========================================================================

#[test]
fn test_heat_shifts_mass_upward() {
    let cold = rarity_weights(EnemyRarity::Normal, 0);
    let hot = rarity_weights(EnemyRarity::Normal, 100);
    assert!(hot[0] < cold[0]);
    assert!(hot[4] > cold[4]);
    assert!((hot.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    assert!((cold.iter().sum::<f64>() - 1.0).abs() < 1e-9);
}
