//! Storage collaborator interface.
//!
//! The session never awaits storage inline. Every mutation is applied in memory
//! first and queued as a [`PersistenceCommand`]; `Session::flush` drains the
//! queue in order against a [`Persistence`] backend.

pub mod memory;

pub use memory::MemoryStore;

use crate::character::types::Character;
use crate::error::PersistenceError;
use crate::items::types::{EquipmentSlot, Item};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One stored item. `slot` is set when the item is worn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRow {
    pub character_id: Uuid,
    pub item: Item,
    pub slot: Option<EquipmentSlot>,
}

/// Full set of mutable character fields, written as one row update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPatch {
    pub level: u32,
    pub experience: u64,
    pub health: u32,
    pub max_health: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub strength: u32,
    pub dexterity: u32,
    pub intelligence: u32,
    pub gold: u64,
    /// Unix milliseconds when the patch was taken.
    pub updated_at: i64,
}

impl CharacterPatch {
    pub fn from_character(character: &Character) -> Self {
        Self {
            level: character.level,
            experience: character.experience,
            health: character.health,
            max_health: character.max_health,
            mana: character.mana,
            max_mana: character.max_mana,
            strength: character.strength,
            dexterity: character.dexterity,
            intelligence: character.intelligence,
            gold: character.gold,
            updated_at: Utc::now().timestamp_millis(),
        }
    }

    pub fn apply_to(&self, character: &mut Character) {
        character.level = self.level;
        character.experience = self.experience;
        character.health = self.health;
        character.max_health = self.max_health;
        character.mana = self.mana;
        character.max_mana = self.max_mana;
        character.strength = self.strength;
        character.dexterity = self.dexterity;
        character.intelligence = self.intelligence;
        character.gold = self.gold;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    InsertItems,
    UpdateItems,
    UpdateCharacter,
    DeleteItems,
}

/// What deleting an item credited to the character (gold from a sale, health
/// or mana from a potion). Reversed if the delete fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterCredit {
    pub gold: u64,
    pub health: u32,
    pub mana: u32,
}

/// A queued write, carrying what is needed to undo it in memory if it fails.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistenceCommand {
    /// New drops entering the bag.
    InsertItems(Vec<ItemRow>),
    /// Equip state changes. `previous` is the layout before the change.
    UpdateItems {
        rows: Vec<ItemRow>,
        previous: Vec<ItemRow>,
    },
    /// Write the character's state as of flush time.
    UpdateCharacter(Uuid),
    /// Sold or consumed items; `removed` holds them for restoration.
    DeleteItems {
        removed: Vec<ItemRow>,
        credit: CharacterCredit,
    },
}

impl PersistenceCommand {
    pub fn kind(&self) -> CommandKind {
        match self {
            PersistenceCommand::InsertItems(_) => CommandKind::InsertItems,
            PersistenceCommand::UpdateItems { .. } => CommandKind::UpdateItems,
            PersistenceCommand::UpdateCharacter(_) => CommandKind::UpdateCharacter,
            PersistenceCommand::DeleteItems { .. } => CommandKind::DeleteItems,
        }
    }
}

/// A command that failed during a flush.
#[derive(Debug, Clone, PartialEq)]
pub struct FlushFailure {
    pub kind: CommandKind,
    pub error: PersistenceError,
    /// Whether an in-memory compensation ran.
    pub compensated: bool,
}

/// Result of draining the outbox.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlushReport {
    pub applied: usize,
    pub failures: Vec<FlushFailure>,
}

impl FlushReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Storage backend for characters and their items.
#[async_trait]
pub trait Persistence: Send + Sync {
    async fn load_items(&self, character_id: Uuid) -> Result<Vec<ItemRow>, PersistenceError>;

    async fn insert_items(&self, rows: &[ItemRow]) -> Result<(), PersistenceError>;

    /// Overwrite existing rows (equip state and slot).
    async fn update_items(&self, rows: &[ItemRow]) -> Result<(), PersistenceError>;

    async fn update_character(
        &self,
        id: Uuid,
        patch: &CharacterPatch,
    ) -> Result<(), PersistenceError>;

    async fn delete_items(&self, ids: &[Uuid]) -> Result<(), PersistenceError>;
}
