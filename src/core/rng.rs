//! Randomness helpers shared by every roll in the engine.
//!
//! All rolls are expressed as unit draws (`[0, 1)`) taken from a caller-supplied
//! [`rand::Rng`]. One helper call consumes exactly one draw, which keeps draw
//! sequences stable across code paths and lets [`ScriptedRng`] replay them.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use uuid::{Builder, Uuid};

/// Default seedable generator used by sessions and the simulator.
pub type GameRng = ChaCha8Rng;

/// Builds a [`GameRng`] from a fixed seed, or from a fresh random seed.
/// Returns the generator and the seed that produced it (for replays).
pub fn seeded_rng(seed: Option<u64>) -> (GameRng, u64) {
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    (GameRng::seed_from_u64(seed), seed)
}

/// One uniform draw in `[0, 1)`.
pub fn roll_unit(rng: &mut impl Rng) -> f64 {
    rng.gen::<f64>()
}

/// Integer in `[min, max]` inclusive from a single draw.
pub fn roll_inclusive(rng: &mut impl Rng, min: u32, max: u32) -> u32 {
    if max <= min {
        // still consume the draw so sequences don't shift
        roll_unit(rng);
        return min;
    }
    let span = (max - min + 1) as f64;
    let offset = (roll_unit(rng) * span).floor() as u32;
    (min + offset).min(max)
}

/// Index in `[0, len)` from a single draw. `len` must be non-zero.
pub fn roll_index(rng: &mut impl Rng, len: usize) -> usize {
    let idx = (roll_unit(rng) * len as f64).floor() as usize;
    idx.min(len.saturating_sub(1))
}

/// Float in `[min, max)` from a single draw.
pub fn roll_between(rng: &mut impl Rng, min: f64, max: f64) -> f64 {
    min + roll_unit(rng) * (max - min)
}

/// `true` with probability `chance` (single draw).
pub fn roll_chance(rng: &mut impl Rng, chance: f64) -> bool {
    roll_unit(rng) < chance
}

/// A v4-format id built from 16 bytes of the generator, so seeded runs
/// replay with the same ids.
pub fn roll_id(rng: &mut impl Rng) -> Uuid {
    Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// The `offset`-th id of a batch sharing one random `base`. Ids stay distinct
/// within the batch even when the generator repeats itself.
pub fn batch_id(base: u128, offset: usize) -> Uuid {
    Builder::from_random_bytes(base.wrapping_add(offset as u128).to_be_bytes()).into_uuid()
}

/// Weight-proportional pick via cumulative roll. Returns `None` when the total
/// weight is zero.
pub fn roll_weighted<T>(rng: &mut impl Rng, entries: &[T], weight: impl Fn(&T) -> u32) -> Option<usize> {
    let total: u32 = entries.iter().map(&weight).sum();
    if total == 0 {
        return None;
    }
    let target = roll_unit(rng) * total as f64;
    let mut cumulative = 0.0;
    for (i, entry) in entries.iter().enumerate() {
        cumulative += weight(entry) as f64;
        if target < cumulative {
            return Some(i);
        }
    }
    // float rounding: land on the last weighted entry
    entries.iter().rposition(|e| weight(e) > 0)
}

/// Replays a fixed sequence of unit draws.
///
/// Each queued value is returned verbatim by `rng.gen::<f64>()` (values must
/// lie in `[0, 1)`). Once the script runs out every draw returns `0.0`.
/// Only intended for the unit-draw helpers in this module; other `Rng` methods
/// see arbitrary but deterministic bits.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    draws: VecDeque<f64>,
}

impl ScriptedRng {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    /// Draws left in the script.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

// rand 0.8 maps a u64 to f64 as `(bits >> 11) * 2^-53`; invert that here.
const F64_MANTISSA_BITS: u32 = 53;

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let value = self.draws.pop_front().unwrap_or(0.0).clamp(0.0, 1.0 - f64::EPSILON);
        let scaled = (value * (1u64 << F64_MANTISSA_BITS) as f64) as u64;
        scaled << (64 - F64_MANTISSA_BITS)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_rng_replays_exact_draws() {
        let mut rng = ScriptedRng::new([0.5, 0.25, 0.0, 0.75]);
        assert_eq!(roll_unit(&mut rng), 0.5);
        assert_eq!(roll_unit(&mut rng), 0.25);
        assert_eq!(roll_unit(&mut rng), 0.0);
        assert_eq!(roll_unit(&mut rng), 0.75);
        assert_eq!(rng.remaining(), 0);
        assert_eq!(roll_unit(&mut rng), 0.0);
    }

    #[test]
    fn test_roll_id_follows_seed() {
        let mut a = GameRng::seed_from_u64(9);
        let mut b = GameRng::seed_from_u64(9);
        let id = roll_id(&mut a);
        assert_eq!(id, roll_id(&mut b));
        assert_eq!(id.get_version_num(), 4);
        assert_ne!(roll_id(&mut a), id);
    }

    #[test]
    fn test_batch_ids_distinct_from_zero_base() {
        let ids: Vec<Uuid> = (0..9).map(|i| batch_id(0, i)).collect();
        for (i, id) in ids.iter().enumerate() {
            assert!(!ids[i + 1..].contains(id));
        }
    }

    #[test]
    fn test_roll_inclusive_bounds() {
        let mut low = ScriptedRng::new([0.0]);
        assert_eq!(roll_inclusive(&mut low, 3, 7), 3);

        let mut high = ScriptedRng::new([0.999]);
        assert_eq!(roll_inclusive(&mut high, 3, 7), 7);

        let mut mid = ScriptedRng::new([0.5]);
        assert_eq!(roll_inclusive(&mut mid, 1, 2), 2);
    }

    #[test]
    fn test_roll_inclusive_degenerate_range_consumes_draw() {
        let mut rng = ScriptedRng::new([0.9, 0.1]);
        assert_eq!(roll_inclusive(&mut rng, 4, 4), 4);
        assert_eq!(rng.remaining(), 1);
    }

    #[test]
    fn test_roll_weighted_respects_weights() {
        let weights = [0u32, 10, 30];
        let mut rng = ScriptedRng::new([0.1, 0.5, 0.99]);
        assert_eq!(roll_weighted(&mut rng, &weights, |w| *w), Some(1));
        assert_eq!(roll_weighted(&mut rng, &weights, |w| *w), Some(2));
        assert_eq!(roll_weighted(&mut rng, &weights, |w| *w), Some(2));
    }

    #[test]
    fn test_roll_weighted_empty_is_none() {
        let mut rng = ScriptedRng::new([0.5]);
        let weights: [u32; 2] = [0, 0];
        assert_eq!(roll_weighted(&mut rng, &weights, |w| *w), None);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let (mut a, seed) = seeded_rng(Some(42));
        let (mut b, _) = seeded_rng(Some(seed));
        for _ in 0..16 {
            assert_eq!(roll_unit(&mut a), roll_unit(&mut b));
        }
    }
}
