//! Main simulation runner driving a real [`Session`].
//!
//! The simulated player explores rooms in index order, fights until each room
//! is clear, drinks potions when low, equips upgrades, sells the rest and takes
//! the ladder. Statistics are gathered from the session's event log.

use super::config::SimConfig;
use super::loot::{score_item, LootStats};
use super::report::{RunStats, SimReport};
use crate::character::types::Character;
use crate::combat::types::EnemyRarity;
use crate::config::EngineConfig;
use crate::core::rng::GameRng;
use crate::items::equipment::resolve_slot;
use crate::items::types::{Item, ItemKind};
use crate::persistence::{CharacterPatch, MemoryStore};
use crate::session::{Session, SessionEvent, ToggleResult};
use std::sync::Arc;
use uuid::Uuid;

/// Run the full simulation and return a report.
pub async fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let run_stats = simulate_single_run(config, config.run_seed(run_idx)).await;

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - Floor {}, Level {}, Kills {}, Boss Kills {}, Deaths {}, Actions {}",
                run_idx + 1,
                config.num_runs,
                run_stats.final_floor,
                run_stats.final_level,
                run_stats.total_kills,
                run_stats.total_boss_kills,
                run_stats.total_deaths,
                run_stats.total_actions
            );
        }
        all_runs.push(run_stats);
    }

    SimReport::from_runs(all_runs, config.max_actions_per_run)
}

/// Tracks statistics during a simulation run from session events.
#[derive(Default)]
struct SimStats {
    total_kills: u64,
    total_boss_kills: u64,
    total_deaths: u64,
    persistence_failures: u64,
    loot_stats: LootStats,
    /// Drops waiting for an equip decision.
    new_drops: Vec<Uuid>,
}

impl SimStats {
    fn process_events(&mut self, events: Vec<SessionEvent>) {
        for event in events {
            match event {
                SessionEvent::EnemyKilled { rarity, .. } => {
                    self.total_kills += 1;
                    if rarity == EnemyRarity::Boss {
                        self.total_boss_kills += 1;
                    }
                }
                SessionEvent::PlayerDefeated { .. } => self.total_deaths += 1,
                SessionEvent::ItemDropped { item_id, rarity, .. } => {
                    self.loot_stats.record_drop(rarity);
                    self.new_drops.push(item_id);
                }
                SessionEvent::PersistenceFailed { .. } => self.persistence_failures += 1,
                _ => {}
            }
        }
    }
}

/// Simulate a single run from floor 1 to the target floor.
async fn simulate_single_run(config: &SimConfig, seed: Option<u64>) -> RunStats {
    let character = Character::new("SimPlayer");
    let store = Arc::new(MemoryStore::new());
    store
        .register_character(character.id, CharacterPatch::from_character(&character))
        .await;

    let engine = EngineConfig {
        seed,
        ..EngineConfig::default()
    };
    let (mut session, seed) = Session::from_config(character, engine, store);
    tracing::debug!(seed, "simulated run started");

    let mut stats = SimStats::default();
    let mut actions: u64 = 0;

    while session.floor() < config.target_floor && actions < config.max_actions_per_run {
        actions += 1;

        if session.encounter().is_some() {
            drink_if_low(&mut session, &mut stats.loot_stats);
            session.attack();
            let delay = session.config().counter_attack_delay();
            session.tick(delay);
        } else if let Some(room_id) = next_room(&session) {
            session.explore_room(room_id);
        } else {
            let ladder = session.floor_map().ladder_room_id;
            session.explore_room(ladder);
            if !session.next_floor() {
                tracing::warn!(floor = session.floor(), "simulated player stuck");
                break;
            }
            stats.process_events(session.drain_events());
            session.flush().await;
            continue;
        }

        stats.process_events(session.drain_events());
        manage_drops(&mut session, &mut stats);
    }

    let report = session.flush().await;
    stats.persistence_failures += report.failures.len() as u64;

    let character = session.character();
    RunStats {
        final_floor: session.floor(),
        final_level: character.level,
        final_gold: character.gold,
        total_kills: stats.total_kills,
        total_boss_kills: stats.total_boss_kills,
        total_deaths: stats.total_deaths,
        total_actions: actions,
        persistence_failures: stats.persistence_failures,
        final_avg_ilvl: average_equipped_ilvl(&session),
        reached_target: session.floor() >= config.target_floor,
        loot_stats: stats.loot_stats,
    }
}

/// First room, by index, that is unexplored or still holds an enemy.
fn next_room(session: &Session<GameRng>) -> Option<Uuid> {
    session
        .floor_map()
        .rooms
        .iter()
        .find(|room| !room.explored || (room.room_type.is_combat() && !room.cleared))
        .map(|room| room.id)
}

fn drink_if_low(session: &mut Session<GameRng>, loot: &mut LootStats) {
    let max_health = session.derived_stats().max_health;
    if session.character().health * 2 >= max_health {
        return;
    }
    let potion = session
        .bag()
        .iter()
        .find(|item| item.kind == ItemKind::HealthPotion)
        .map(|item| item.id);
    if let Some(id) = potion {
        if session.consume_item(id).is_some() {
            loot.potions_used += 1;
        }
    }
}

/// Equip fresh drops that beat what is worn and sell everything else except
/// potions.
fn manage_drops(session: &mut Session<GameRng>, stats: &mut SimStats) {
    for item_id in std::mem::take(&mut stats.new_drops) {
        let Some(item) = session.bag().iter().find(|i| i.id == item_id).cloned() else {
            continue;
        };
        if item.kind.is_consumable() {
            continue;
        }
        if is_upgrade(session, &item)
            && matches!(session.toggle_equip(item_id), ToggleResult::Equipped(_))
        {
            stats.loot_stats.record_upgrade();
        }
    }

    let junk: Vec<Uuid> = session
        .bag()
        .iter()
        .filter(|item| !item.kind.is_consumable())
        .map(|item| item.id)
        .collect();
    for id in junk {
        session.sell_item(id);
    }
}

fn is_upgrade(session: &Session<GameRng>, item: &Item) -> bool {
    let equipment = session.equipment();
    let Some(slot) = resolve_slot(item.kind, equipment) else {
        return false;
    };
    match equipment.get(slot) {
        Some(current) => score_item(item) > score_item(current),
        None => true,
    }
}

fn average_equipped_ilvl(session: &Session<GameRng>) -> f64 {
    let levels: Vec<u32> = session
        .equipment()
        .iter_equipped()
        .map(|item| item.item_level)
        .collect();
    if levels.is_empty() {
        0.0
    } else {
        levels.iter().sum::<u32>() as f64 / levels.len() as f64
    }
}
