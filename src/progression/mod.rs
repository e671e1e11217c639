//! Character progression from kills and the decaying zone heat.

pub mod heat;
pub mod ledger;

pub use heat::{heat_gain, spawn_heat_decay, HeatDecayHandle, ZoneHeat};
pub use ledger::{apply_kill, xp_for_next_level, KillOutcome};
