//! Item system: types, blueprint pools, generation, drops, and equipment.

pub mod blueprints;
pub mod drops;
pub mod equipment;
pub mod generation;
pub mod types;

pub use drops::{generate_loot, roll_rarity, DropContext, LootRequest, RarityExclusions};
pub use equipment::{compute_set_bonuses, resolve_slot, slot_family, EquipOutcome, EquipRejection, Equipment};
pub use types::*;
