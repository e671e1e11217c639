//! Balance constants and shared randomness.

pub mod constants;
pub mod rng;

pub use rng::{GameRng, ScriptedRng};
