//! Attack resolution and enemy spawning.

pub mod factory;
pub mod logic;
pub mod types;

pub use factory::{enemy_rarity_for, EncounterContext, EnemyFactory, StandardEnemyFactory};
pub use logic::{armor_multiplier, resolve, resolve_counter_attack};
pub use types::*;
