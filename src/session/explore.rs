use super::{Session, SessionEvent};
use crate::core::constants::MIMIC_AMBUSH_HEALTH_FRACTION;
use crate::dungeon::generation::generate_floor_map;
use crate::dungeon::types::RoomType;
use crate::items::drops::DropContext;
use rand::Rng;
use uuid::Uuid;

impl<R: Rng> Session<R> {
    /// Move into `room_id` and spawn whatever lives there.
    ///
    /// Returns `false` for an id that is not on this floor. Re-entering the
    /// room of a live encounter changes nothing.
    pub fn explore_room(&mut self, room_id: Uuid) -> bool {
        let Some(room) = self.floor_map.room(room_id) else {
            return false;
        };
        if room_id == self.current_room_id && self.encounter.is_some() {
            return true;
        }
        let room_type = room.room_type;
        let cleared = room.cleared;
        let first_visit = !room.explored;

        self.encounter = None;
        self.counter_due = None;
        if let Some(room) = self.floor_map.room_mut(room_id) {
            room.explored = true;
        }
        self.current_room_id = room_id;
        self.emit(SessionEvent::RoomEntered { room_id, room_type });

        if !room_type.is_combat() {
            return true;
        }

        match (room_type, cleared) {
            (RoomType::Boss, true) => {}
            (RoomType::Mimic, false) => {
                if first_visit {
                    self.mimic_ambush();
                }
                self.spawn_encounter(RoomType::Mimic, DropContext::Mimic);
            }
            (_, true) => self.spawn_encounter(RoomType::Enemy, DropContext::Standard),
            (RoomType::Boss, false) => self.spawn_encounter(RoomType::Boss, DropContext::Boss),
            (other, false) => self.spawn_encounter(other, DropContext::Standard),
        }
        true
    }

    /// Descend to the next floor once the ladder is found (and the boss is dead
    /// on boss floors).
    pub fn next_floor(&mut self) -> bool {
        let ladder_found = self
            .floor_map
            .ladder_room()
            .is_some_and(|room| room.explored);
        let boss_done = self.floor_map.boss_room().map_or(true, |room| room.cleared);
        if !ladder_found || !boss_done {
            return false;
        }
        let next = self.floor_map.floor + 1;
        self.enter_floor(next);
        true
    }

    /// Replace the current floor with a freshly generated `floor`, standing in
    /// its spawn room.
    pub fn enter_floor(&mut self, floor: u32) {
        self.floor_map = generate_floor_map(floor.max(1), &mut self.rng);
        self.current_room_id = self.floor_map.rooms[0].id;
        self.encounter = None;
        self.counter_due = None;
        tracing::info!(
            character = %self.character.id,
            floor = self.floor_map.floor,
            layout = %self.floor_map.layout_string(),
            "floor entered"
        );
        self.emit(SessionEvent::FloorAdvanced {
            floor: self.floor_map.floor,
        });
    }

    fn mimic_ambush(&mut self) {
        let max_health = self.max_health();
        let damage = (max_health as f64 * MIMIC_AMBUSH_HEALTH_FRACTION).floor() as u32;
        self.character.health = self.character.health.saturating_sub(damage).max(1);
        tracing::debug!(damage, health = self.character.health, "mimic ambush");
        self.emit(SessionEvent::MimicAmbush { damage });
        self.mark_character_dirty();
    }
}

#[cfg(test)]
mod tests {
    use crate::character::types::Character;
    use crate::combat::factory::StandardEnemyFactory;
    use crate::config::EngineConfig;
    use crate::dungeon::types::RoomType;
    use crate::persistence::MemoryStore;
    use crate::session::{Session, SessionEvent};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::Arc;
    use uuid::Uuid;

    fn session() -> Session<ChaCha8Rng> {
        Session::new(
            Character::new("Explorer"),
            EngineConfig::default(),
            ChaCha8Rng::seed_from_u64(11),
            Box::new(StandardEnemyFactory::new(12)),
            Arc::new(MemoryStore::new()),
        )
    }

    fn set_room_type(session: &mut Session<ChaCha8Rng>, index: usize, room_type: RoomType) -> Uuid {
        let room = &mut session.floor_map.rooms[index];
        room.room_type = room_type;
        room.id
    }

    #[test]
    fn test_unknown_room_is_noop() {
        let mut session = session();
        let before = session.current_room().map(|r| r.id);
        assert!(!session.explore_room(Uuid::new_v4()));
        assert_eq!(session.current_room().map(|r| r.id), before);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_explore_combat_room_spawns_encounter() {
        let mut session = session();
        let id = set_room_type(&mut session, 2, RoomType::RareEnemy);
        assert!(session.explore_room(id));
        let encounter = session.encounter().unwrap();
        assert_eq!(encounter.spawned_as, RoomType::RareEnemy);
        assert!(session.floor_map.room(id).unwrap().explored);
    }

    #[test]
    fn test_empty_room_spawns_nothing() {
        let mut session = session();
        let id = set_room_type(&mut session, 2, RoomType::Empty);
        assert!(session.explore_room(id));
        assert!(session.encounter().is_none());
    }

    #[test]
    fn test_leaving_room_discards_encounter() {
        let mut session = session();
        let fight = set_room_type(&mut session, 2, RoomType::Enemy);
        let quiet = set_room_type(&mut session, 4, RoomType::Empty);
        session.explore_room(fight);
        assert!(session.encounter().is_some());
        session.explore_room(quiet);
        assert!(session.encounter().is_none());
        assert!(!session.counter_attack_pending());
    }

    #[test]
    fn test_reentering_live_encounter_keeps_enemy() {
        let mut session = session();
        let id = set_room_type(&mut session, 2, RoomType::Enemy);
        session.explore_room(id);
        let enemy = session.encounter().unwrap().enemy.clone();
        session.drain_events();
        assert!(session.explore_room(id));
        assert_eq!(session.encounter().unwrap().enemy, enemy);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_mimic_ambush_only_on_first_visit() {
        let mut session = session();
        let mimic = set_room_type(&mut session, 2, RoomType::Mimic);
        let quiet = set_room_type(&mut session, 4, RoomType::Empty);
        session.character.health = 100;

        session.explore_room(mimic);
        assert_eq!(session.character().health, 80);
        assert!(session
            .drain_events()
            .contains(&SessionEvent::MimicAmbush { damage: 20 }));

        session.explore_room(quiet);
        session.explore_room(mimic);
        assert_eq!(session.character().health, 80);
        assert_eq!(session.encounter().unwrap().spawned_as, RoomType::Mimic);
    }

    #[test]
    fn test_cleared_boss_room_stays_empty() {
        let mut session = session();
        let boss = set_room_type(&mut session, 5, RoomType::Boss);
        session.floor_map.rooms[5].cleared = true;
        session.explore_room(boss);
        assert!(session.encounter().is_none());
    }

    #[test]
    fn test_cleared_room_respawns_plain_enemy() {
        let mut session = session();
        let id = set_room_type(&mut session, 2, RoomType::MiniBoss);
        session.floor_map.rooms[2].cleared = true;
        session.explore_room(id);
        assert_eq!(session.encounter().unwrap().spawned_as, RoomType::Enemy);
    }

    #[test]
    fn test_next_floor_requires_ladder() {
        let mut session = session();
        assert!(!session.next_floor());
        assert_eq!(session.floor(), 1);

        let ladder = session.floor_map.ladder_room_id;
        session.explore_room(ladder);
        assert!(session.next_floor());
        assert_eq!(session.floor(), 2);
        assert_eq!(
            session.current_room().map(|r| r.id),
            Some(session.floor_map.rooms[0].id)
        );
    }

    #[test]
    fn test_boss_floor_blocks_until_boss_cleared() {
        let mut session = session();
        session.enter_floor(10);
        let ladder = session.floor_map.ladder_room_id;
        session.explore_room(ladder);
        assert!(!session.next_floor());
        assert_eq!(session.floor(), 10);

        let boss = session.floor_map.boss_room_id.unwrap();
        session.floor_map.room_mut(boss).unwrap().cleared = true;
        assert!(session.next_floor());
        assert_eq!(session.floor(), 11);
    }
}
