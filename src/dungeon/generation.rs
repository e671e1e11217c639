//! Floor layout generation.

use super::types::{FloorMap, FloorRoom, RoomType};
use crate::core::constants::*;
use crate::core::rng::{batch_id, roll_index, roll_unit};
use rand::Rng;

/// Mini-boss chance for a floor: 1% plus 1% per five floors, capped at 8%.
pub fn mini_boss_chance(floor: u32) -> f64 {
    let steps = (floor / MINI_BOSS_FLOOR_STEP) as f64;
    (MINI_BOSS_BASE_CHANCE + MINI_BOSS_CHANCE_PER_STEP * steps).min(MINI_BOSS_MAX_CHANCE)
}

/// Rare-enemy chance for a floor: 15% plus 1% per floor, capped at 35%.
pub fn rare_enemy_chance(floor: u32) -> f64 {
    (RARE_ENEMY_BASE_CHANCE + RARE_ENEMY_CHANCE_PER_FLOOR * floor as f64).min(RARE_ENEMY_MAX_CHANCE)
}

pub fn is_boss_floor(floor: u32) -> bool {
    floor > 0 && floor % BOSS_FLOOR_INTERVAL == 0
}

/// Maps one unit draw to a room type using the floor's thresholds.
pub fn room_type_for_roll(roll: f64, floor: u32) -> RoomType {
    let mimic = MIMIC_ROOM_CHANCE;
    let mini = mimic + mini_boss_chance(floor);
    let rare = mini + rare_enemy_chance(floor);

    if roll < mimic {
        RoomType::Mimic
    } else if roll < mini {
        RoomType::MiniBoss
    } else if roll < rare {
        RoomType::RareEnemy
    } else if roll > EMPTY_ROOM_ROLL_THRESHOLD {
        RoomType::Empty
    } else {
        RoomType::Enemy
    }
}

/// Generate the layout for `floor`.
///
/// Draw order: one draw per room type, one for the ladder index, one for the
/// boss index on boss floors, then 16 bytes seeding the room ids.
pub fn generate_floor_map(floor: u32, rng: &mut impl Rng) -> FloorMap {
    let mut layout: Vec<RoomType> = (0..ROOMS_PER_FLOOR)
        .map(|_| room_type_for_roll(roll_unit(rng), floor))
        .collect();

    let ladder_candidates: Vec<usize> = (0..ROOMS_PER_FLOOR)
        .filter(|i| !LADDER_FORBIDDEN_INDICES.contains(i))
        .collect();
    let ladder_index = ladder_candidates[roll_index(rng, ladder_candidates.len())];
    layout[ladder_index] = RoomType::Ladder;

    let boss_index = if is_boss_floor(floor) {
        let mut index = roll_index(rng, ROOMS_PER_FLOOR);
        while index == 0 || index == ladder_index {
            index = (index + 1) % ROOMS_PER_FLOOR;
        }
        layout[index] = RoomType::Boss;
        Some(index)
    } else {
        None
    };

    balance_combat_rooms(&mut layout, ladder_index);

    let id_base: u128 = rng.gen();
    let mut rooms: Vec<FloorRoom> = layout
        .into_iter()
        .enumerate()
        .map(|(index, room_type)| FloorRoom::new(batch_id(id_base, index), index, room_type))
        .collect();
    rooms[0].explored = true;

    let map = FloorMap {
        floor,
        ladder_room_id: rooms[ladder_index].id,
        boss_room_id: boss_index.map(|i| rooms[i].id),
        rooms,
    };

    tracing::debug!(
        floor,
        layout = %map.layout_string(),
        combat_rooms = map.combat_room_count(),
        "generated floor"
    );
    map
}

/// Keep the combat-room count within `[MIN_COMBAT_ROOMS, MAX_COMBAT_ROOMS]`.
/// The spawn room and the ladder are never touched.
fn balance_combat_rooms(layout: &mut [RoomType], ladder_index: usize) {
    let protected = |i: usize| i == 0 || i == ladder_index;
    let mut combat = layout.iter().filter(|t| t.is_combat()).count();

    if combat < MIN_COMBAT_ROOMS {
        for (index, room_type) in layout.iter_mut().enumerate() {
            if combat >= MIN_COMBAT_ROOMS {
                break;
            }
            if !protected(index) && *room_type == RoomType::Empty {
                *room_type = RoomType::Enemy;
                combat += 1;
            }
        }
    }

    if combat > MAX_COMBAT_ROOMS {
        for (index, room_type) in layout.iter_mut().enumerate().rev() {
            if combat <= MAX_COMBAT_ROOMS {
                break;
            }
            if !protected(index) && *room_type == RoomType::Enemy {
                *room_type = RoomType::Empty;
                combat -= 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn count(map: &FloorMap, room_type: RoomType) -> usize {
        map.rooms.iter().filter(|r| r.room_type == room_type).count()
    }

    #[test]
    fn test_chance_curves_cap() {
        assert!((mini_boss_chance(0) - 0.01).abs() < 1e-12);
        assert!((mini_boss_chance(5) - 0.02).abs() < 1e-12);
        assert!((mini_boss_chance(500) - MINI_BOSS_MAX_CHANCE).abs() < 1e-12);
        assert!((rare_enemy_chance(1) - 0.16).abs() < 1e-12);
        assert!((rare_enemy_chance(100) - RARE_ENEMY_MAX_CHANCE).abs() < 1e-12);
    }

    #[test]
    fn test_room_type_thresholds() {
        // floor 1: mimic < .05, mini < .06, rare < .22, empty > .85
        assert_eq!(room_type_for_roll(0.01, 1), RoomType::Mimic);
        assert_eq!(room_type_for_roll(0.055, 1), RoomType::MiniBoss);
        assert_eq!(room_type_for_roll(0.10, 1), RoomType::RareEnemy);
        assert_eq!(room_type_for_roll(0.50, 1), RoomType::Enemy);
        assert_eq!(room_type_for_roll(0.85, 1), RoomType::Enemy);
        assert_eq!(room_type_for_roll(0.90, 1), RoomType::Empty);
    }

    #[test]
    fn test_boss_floor_detection() {
        assert!(!is_boss_floor(0));
        assert!(!is_boss_floor(9));
        assert!(is_boss_floor(10));
        assert!(is_boss_floor(30));
    }

    #[test]
    fn test_floor_has_nine_rooms_and_one_ladder() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for floor in 1..=40 {
            let map = generate_floor_map(floor, &mut rng);
            assert_eq!(map.rooms.len(), ROOMS_PER_FLOOR);
            assert_eq!(count(&map, RoomType::Ladder), 1);
            let ladder = map.ladder_room().unwrap();
            assert!(!LADDER_FORBIDDEN_INDICES.contains(&ladder.index));
            assert!(map.rooms[0].explored);
            assert!(!map.rooms[0].cleared);
            assert!(map.rooms[1..].iter().all(|r| !r.explored));
        }
    }

    #[test]
    fn test_boss_floors_have_exactly_one_boss() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for floor in [10, 20, 30, 40, 50] {
            for _ in 0..20 {
                let map = generate_floor_map(floor, &mut rng);
                assert_eq!(count(&map, RoomType::Boss), 1);
                let boss = map.boss_room().unwrap();
                assert_ne!(boss.index, 0);
                assert_ne!(boss.id, map.ladder_room_id);
            }
        }
        let map = generate_floor_map(11, &mut rng);
        assert_eq!(count(&map, RoomType::Boss), 0);
        assert!(map.boss_room_id.is_none());
    }

    #[test]
    fn test_boss_index_skips_spawn_and_ladder() {
        // Rooms all Enemy (0.5), ladder candidate 0 => index 2,
        // boss roll 0 => bumped to 1.
        let mut draws = vec![0.5; ROOMS_PER_FLOOR];
        draws.push(0.0);
        draws.push(0.0);
        let mut rng = ScriptedRng::new(draws);
        let map = generate_floor_map(10, &mut rng);
        assert_eq!(map.ladder_room().unwrap().index, 2);
        assert_eq!(map.boss_room().unwrap().index, 1);

        // boss roll lands on ladder (2) => bumped to 3
        let mut draws = vec![0.5; ROOMS_PER_FLOOR];
        draws.push(0.0);
        draws.push(2.0 / 9.0 + 0.01);
        let mut rng = ScriptedRng::new(draws);
        let map = generate_floor_map(10, &mut rng);
        assert_eq!(map.boss_room().unwrap().index, 3);
    }

    #[test]
    fn test_combat_rooms_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        for floor in 1..=200 {
            let map = generate_floor_map(floor, &mut rng);
            let combat = map.combat_room_count();
            assert!(
                (MIN_COMBAT_ROOMS..=MAX_COMBAT_ROOMS).contains(&combat),
                "floor {floor}: {combat} combat rooms in {}",
                map.layout_string()
            );
        }
    }

    #[test]
    fn test_all_empty_rolls_promote_lowest_first() {
        let mut draws = vec![0.99; ROOMS_PER_FLOOR];
        draws.push(0.0); // ladder at index 2
        let mut rng = ScriptedRng::new(draws);
        let map = generate_floor_map(1, &mut rng);
        assert_eq!(map.combat_room_count(), MIN_COMBAT_ROOMS);
        assert_eq!(map.rooms[0].room_type, RoomType::Empty);
        let promoted: Vec<usize> = map
            .rooms
            .iter()
            .filter(|r| r.room_type == RoomType::Enemy)
            .map(|r| r.index)
            .collect();
        assert_eq!(promoted, vec![1, 3, 4, 5, 6]);
    }

    #[test]
    fn test_room_ids_follow_seed() {
        let a = generate_floor_map(3, &mut ChaCha8Rng::seed_from_u64(42));
        let b = generate_floor_map(3, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);

        let c = generate_floor_map(3, &mut ChaCha8Rng::seed_from_u64(43));
        assert_ne!(a.rooms[0].id, c.rooms[0].id);
    }

    #[test]
    fn test_room_ids_unique_on_exhausted_script() {
        let map = generate_floor_map(10, &mut ScriptedRng::new(Vec::new()));
        for (i, room) in map.rooms.iter().enumerate() {
            assert!(map.rooms[i + 1..].iter().all(|other| other.id != room.id));
        }
        assert_eq!(map.ladder_room().map(|r| r.room_type), Some(RoomType::Ladder));
    }
}
