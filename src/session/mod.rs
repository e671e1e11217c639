//! One player's run through the dungeon.
//!
//! A [`Session`] owns the character, the current floor, the active encounter,
//! equipment and bag, and drives every other component. Each action runs to
//! completion; the enemy counter-attack is the only deferred step and fires
//! from [`Session::tick`]. Writes are applied in memory immediately and queued
//! for [`Session::flush`].

mod combat;
mod events;
mod explore;
mod inventory;
mod outbox;

pub use events::SessionEvent;
pub use inventory::ToggleResult;

use crate::character::derived_stats::DerivedStats;
use crate::character::types::Character;
use crate::combat::factory::{EncounterContext, EnemyFactory, StandardEnemyFactory};
use crate::combat::types::Enemy;
use crate::config::EngineConfig;
use crate::core::rng::{seeded_rng, GameRng};
use crate::dungeon::generation::generate_floor_map;
use crate::dungeon::types::{FloorMap, FloorRoom, RoomType};
use crate::items::drops::{DropContext, RarityExclusions};
use crate::items::equipment::Equipment;
use crate::items::types::{Item, Rarity};
use crate::notify::{NoopNotifier, Notifier};
use crate::persistence::{CharacterPatch, Persistence, PersistenceCommand};
use crate::progression::heat::{spawn_heat_decay, HeatDecayHandle, ZoneHeat};
use crate::snapshot::SessionSnapshot;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// The enemy currently being fought and how it will pay out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub enemy: Enemy,
    /// Room type the enemy was spawned as; a respawn after defeat reuses it.
    pub spawned_as: RoomType,
    pub drop_context: DropContext,
}

pub struct Session<R: Rng = GameRng> {
    character: Character,
    floor_map: FloorMap,
    current_room_id: Uuid,
    encounter: Option<Encounter>,
    /// Session-clock time at which the pending counter-attack fires.
    counter_due: Option<Duration>,
    clock: Duration,
    equipment: Equipment,
    bag: Vec<Item>,
    heat: ZoneHeat,
    heat_decay: Option<HeatDecayHandle>,
    config: EngineConfig,
    rng: R,
    enemy_factory: Box<dyn EnemyFactory>,
    notifier: Arc<dyn Notifier>,
    persistence: Arc<dyn Persistence>,
    outbox: VecDeque<PersistenceCommand>,
    /// Character state as last acknowledged by storage.
    persisted: CharacterPatch,
    events: Vec<SessionEvent>,
}

impl<R: Rng> Session<R> {
    /// Start a fresh run on floor 1.
    pub fn new(
        character: Character,
        config: EngineConfig,
        mut rng: R,
        enemy_factory: Box<dyn EnemyFactory>,
        persistence: Arc<dyn Persistence>,
    ) -> Self {
        let floor_map = generate_floor_map(1, &mut rng);
        let current_room_id = floor_map.rooms[0].id;
        let persisted = CharacterPatch::from_character(&character);
        Self {
            character,
            floor_map,
            current_room_id,
            encounter: None,
            counter_due: None,
            clock: Duration::ZERO,
            equipment: Equipment::new(),
            bag: Vec::new(),
            heat: ZoneHeat::default(),
            heat_decay: None,
            config,
            rng,
            enemy_factory,
            notifier: Arc::new(NoopNotifier),
            persistence,
            outbox: VecDeque::new(),
            persisted,
            events: Vec::new(),
        }
    }

    /// Resume from a snapshot. Any counter-attack that was pending is dropped.
    pub fn restore(
        snapshot: SessionSnapshot,
        config: EngineConfig,
        rng: R,
        enemy_factory: Box<dyn EnemyFactory>,
        persistence: Arc<dyn Persistence>,
    ) -> Self {
        let SessionSnapshot {
            character,
            floor_map,
            current_room_id,
            encounter,
            equipment,
            bag,
            zone_heat,
            excluded_rarities,
        } = snapshot;
        let persisted = CharacterPatch::from_character(&character);
        let config = EngineConfig {
            excluded_rarities,
            ..config
        };
        Self {
            character,
            floor_map,
            current_room_id,
            encounter,
            counter_due: None,
            clock: Duration::ZERO,
            equipment,
            bag,
            heat: ZoneHeat::new(zone_heat),
            heat_decay: None,
            config,
            rng,
            enemy_factory,
            notifier: Arc::new(NoopNotifier),
            persistence,
            outbox: VecDeque::new(),
            persisted,
            events: Vec::new(),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            character: self.character.clone(),
            floor_map: self.floor_map.clone(),
            current_room_id: self.current_room_id,
            encounter: self.encounter.clone(),
            equipment: self.equipment.clone(),
            bag: self.bag.clone(),
            zone_heat: self.heat.get(),
            excluded_rarities: self.config.excluded_rarities.clone(),
        }
    }

    /// Start draining zone heat on the configured interval. The task stops
    /// when the session is dropped. Returns whether decay is running, which
    /// is `false` outside a tokio runtime.
    pub fn start_heat_decay(&mut self) -> bool {
        if self.heat_decay.is_none() {
            self.heat_decay = spawn_heat_decay(self.heat.clone(), self.config.heat_decay_interval());
        }
        self.heat_decay.is_some()
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn floor(&self) -> u32 {
        self.floor_map.floor
    }

    pub fn floor_map(&self) -> &FloorMap {
        &self.floor_map
    }

    pub fn current_room(&self) -> Option<&FloorRoom> {
        self.floor_map.room(self.current_room_id)
    }

    pub fn encounter(&self) -> Option<&Encounter> {
        self.encounter.as_ref()
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn bag(&self) -> &[Item] {
        &self.bag
    }

    /// Shared heat handle; clones observe the same value.
    pub fn zone_heat(&self) -> &ZoneHeat {
        &self.heat
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn counter_attack_pending(&self) -> bool {
        self.counter_due.is_some()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn exclusions(&self) -> &RarityExclusions {
        &self.config.excluded_rarities
    }

    /// Stop (or resume) picking up drops of `rarity`.
    pub fn set_excluded(&mut self, rarity: Rarity, excluded: bool) {
        if excluded {
            self.config.excluded_rarities.insert(rarity);
        } else {
            self.config.excluded_rarities.remove(&rarity);
        }
    }

    pub fn pending_writes(&self) -> usize {
        self.outbox.len()
    }

    pub fn derived_stats(&self) -> DerivedStats {
        DerivedStats::calculate(&self.character, &self.equipment)
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    fn max_health(&self) -> u32 {
        self.derived_stats().max_health
    }

    fn max_mana(&self) -> u32 {
        self.derived_stats().max_mana
    }

    /// Queue a character write unless one is already at the back of the queue.
    fn mark_character_dirty(&mut self) {
        if !matches!(self.outbox.back(), Some(PersistenceCommand::UpdateCharacter(_))) {
            self.outbox
                .push_back(PersistenceCommand::UpdateCharacter(self.character.id));
        }
    }

    fn spawn_encounter(&mut self, spawned_as: RoomType, drop_context: DropContext) {
        let context = EncounterContext {
            room_type: spawned_as,
            floor: self.floor_map.floor,
            player_level: self.character.level,
            zone_heat: self.heat.get(),
        };
        let enemy = self.enemy_factory.generate(&context);
        self.emit(SessionEvent::EncounterStarted {
            enemy_name: enemy.name.clone(),
            rarity: enemy.rarity,
        });
        self.encounter = Some(Encounter {
            enemy,
            spawned_as,
            drop_context,
        });
    }
}

impl Session<GameRng> {
    /// Build a session with the standard enemy factory, seeded from
    /// `config.seed` (or randomly). Returns the seed used.
    pub fn from_config(
        character: Character,
        config: EngineConfig,
        persistence: Arc<dyn Persistence>,
    ) -> (Self, u64) {
        let (rng, seed) = seeded_rng(config.seed);
        let factory = StandardEnemyFactory::new(seed.wrapping_add(1));
        tracing::debug!(seed, character = %character.id, "session created");
        (
            Self::new(character, config, rng, Box::new(factory), persistence),
            seed,
        )
    }
}
