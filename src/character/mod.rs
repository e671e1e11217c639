//! The player character and its equipment-derived combat stats.

pub mod derived_stats;
pub mod types;

pub use derived_stats::DerivedStats;
pub use types::Character;
