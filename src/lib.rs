//! Delve - dungeon-crawler simulation core
//!
//! Floor generation, combat resolution, loot and equipment rules, and XP
//! progression, driven through a [`session::Session`] per player.

pub mod character;
pub mod combat;
pub mod config;
pub mod core;
pub mod dungeon;
pub mod error;
pub mod items;
pub mod notify;
pub mod persistence;
pub mod progression;
pub mod session;
pub mod simulator;
pub mod snapshot;

pub use character::types::Character;
pub use config::EngineConfig;
pub use session::{Session, SessionEvent, ToggleResult};
