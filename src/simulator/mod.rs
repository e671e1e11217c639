//! Balance simulator for Monte Carlo analysis.
//!
//! Plays many automated crawls through a real [`Session`](crate::session::Session)
//! to analyze:
//! - Floors reached and actions spent per run
//! - Deaths and kills per run
//! - Drop counts by rarity and how often drops become upgrades

mod config;
mod loot;
mod report;
mod runner;

pub use config::SimConfig;
pub use loot::{score_item, LootStats};
pub use report::{RunStats, SimReport};
pub use runner::run_simulation;
