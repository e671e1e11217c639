//! Floor and room data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type of room on a floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    /// Standard combat encounter
    Enemy,
    /// Tougher enemy with better loot
    RareEnemy,
    /// Elite guard, rarer on early floors
    MiniBoss,
    /// Looks like a chest; ambushes on first entry
    Mimic,
    /// Floor boss, only on every tenth floor
    Boss,
    /// Exit to the next floor
    Ladder,
    /// Nothing here
    Empty,
}

impl RoomType {
    /// Returns the display character for this room type
    pub fn icon(&self) -> char {
        match self {
            RoomType::Enemy => 'e',
            RoomType::RareEnemy => 'r',
            RoomType::MiniBoss => 'M',
            RoomType::Mimic => '$',
            RoomType::Boss => 'B',
            RoomType::Ladder => '>',
            RoomType::Empty => '.',
        }
    }

    /// Rooms that spawn an encounter when entered.
    pub fn is_combat(&self) -> bool {
        matches!(
            self,
            RoomType::Enemy
                | RoomType::RareEnemy
                | RoomType::MiniBoss
                | RoomType::Mimic
                | RoomType::Boss
        )
    }
}

/// A single room on a floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorRoom {
    pub id: Uuid,
    pub index: usize,
    pub room_type: RoomType,
    pub explored: bool,
    /// Set once the room's enemy is defeated and looted. Never reverts.
    pub cleared: bool,
}

impl FloorRoom {
    pub fn new(id: Uuid, index: usize, room_type: RoomType) -> Self {
        Self {
            id,
            index,
            room_type,
            explored: false,
            cleared: false,
        }
    }
}

/// The full layout of one floor. Replaced wholesale on floor advance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorMap {
    pub floor: u32,
    pub rooms: Vec<FloorRoom>,
    pub ladder_room_id: Uuid,
    pub boss_room_id: Option<Uuid>,
}

impl FloorMap {
    pub fn room(&self, id: Uuid) -> Option<&FloorRoom> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn room_mut(&mut self, id: Uuid) -> Option<&mut FloorRoom> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }

    pub fn ladder_room(&self) -> Option<&FloorRoom> {
        self.room(self.ladder_room_id)
    }

    pub fn boss_room(&self) -> Option<&FloorRoom> {
        self.boss_room_id.and_then(|id| self.room(id))
    }

    pub fn combat_room_count(&self) -> usize {
        self.rooms.iter().filter(|r| r.room_type.is_combat()).count()
    }

    /// One character per room, e.g. `e.>$Ber..`.
    pub fn layout_string(&self) -> String {
        self.rooms.iter().map(|r| r.room_type.icon()).collect()
    }
}
