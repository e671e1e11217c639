use crate::combat::types::{AttackResult, EnemyRarity};
use crate::dungeon::types::RoomType;
use crate::items::equipment::EquipRejection;
use crate::items::types::{EquipmentSlot, Rarity};
use crate::persistence::CommandKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Something that happened during a session action, for the host to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    RoomEntered {
        room_id: Uuid,
        room_type: RoomType,
    },
    MimicAmbush {
        damage: u32,
    },
    EncounterStarted {
        enemy_name: String,
        rarity: EnemyRarity,
    },
    PlayerAttacked(AttackResult),
    CounterAttacked(AttackResult),
    EnemyKilled {
        enemy_name: String,
        rarity: EnemyRarity,
        experience: u64,
        gold: u64,
    },
    LeveledUp {
        level: u32,
    },
    ItemDropped {
        item_id: Uuid,
        name: String,
        rarity: Rarity,
    },
    PlayerDefeated {
        gold_lost: u64,
    },
    FloorAdvanced {
        floor: u32,
    },
    ItemEquipped {
        item_id: Uuid,
        slot: EquipmentSlot,
    },
    ItemUnequipped {
        item_id: Uuid,
        slot: EquipmentSlot,
    },
    EquipRejected {
        item_id: Uuid,
        reason: EquipRejection,
    },
    ItemSold {
        item_id: Uuid,
        gold: u64,
    },
    ItemConsumed {
        item_id: Uuid,
        restored: u32,
    },
    PersistenceFailed {
        kind: CommandKind,
        error: String,
    },
}
