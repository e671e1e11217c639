use crate::core::constants::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The player character. Owned by a session; only combat, the progression
/// ledger and inventory actions mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: Uuid,
    pub name: String,
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
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            level: 1,
            experience: 0,
            health: STARTING_MAX_HEALTH,
            max_health: STARTING_MAX_HEALTH,
            mana: STARTING_MAX_MANA,
            max_mana: STARTING_MAX_MANA,
            strength: STARTING_ATTRIBUTE_VALUE,
            dexterity: STARTING_ATTRIBUTE_VALUE,
            intelligence: STARTING_ATTRIBUTE_VALUE,
            gold: STARTING_GOLD,
        }
    }
}
