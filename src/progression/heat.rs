//! Zone heat: a shared counter raised by kills and drained on a timer.

use crate::combat::types::EnemyRarity;
use crate::core::constants::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Heat added by killing an enemy of `rarity`.
pub fn heat_gain(rarity: EnemyRarity) -> u32 {
    match rarity {
        EnemyRarity::Normal => HEAT_GAIN_NORMAL,
        EnemyRarity::Rare => HEAT_GAIN_RARE,
        EnemyRarity::Elite => HEAT_GAIN_ELITE,
        EnemyRarity::Boss => HEAT_GAIN_BOSS,
    }
}

/// Clamped `[0, HEAT_MAX]` counter. Clones share the same value.
#[derive(Debug, Clone, Default)]
pub struct ZoneHeat {
    value: Arc<AtomicU32>,
}

impl ZoneHeat {
    pub fn new(initial: u32) -> Self {
        Self {
            value: Arc::new(AtomicU32::new(initial.min(HEAT_MAX))),
        }
    }

    pub fn get(&self) -> u32 {
        self.value.load(Ordering::Relaxed)
    }

    pub fn set(&self, value: u32) {
        self.value.store(value.min(HEAT_MAX), Ordering::Relaxed);
    }

    fn update(&self, f: impl Fn(u32) -> u32) -> u32 {
        let previous = self
            .value
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| Some(f(v)))
            .unwrap_or_else(|v| v);
        f(previous)
    }

    /// Adds `amount`, saturating at `HEAT_MAX`. Returns the new value.
    pub fn raise(&self, amount: u32) -> u32 {
        self.update(|v| v.saturating_add(amount).min(HEAT_MAX))
    }

    pub fn raise_for_kill(&self, rarity: EnemyRarity) -> u32 {
        self.raise(heat_gain(rarity))
    }

    /// One decay tick, floored at zero. Returns the new value.
    pub fn decay_step(&self) -> u32 {
        self.update(|v| v.saturating_sub(HEAT_DECAY_STEP))
    }
}

/// Owns the background decay task. Dropping the handle stops decay.
#[derive(Debug)]
pub struct HeatDecayHandle {
    task: JoinHandle<()>,
}

impl HeatDecayHandle {
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for HeatDecayHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawns a tokio task that calls [`ZoneHeat::decay_step`] every `interval`.
/// Returns `None` outside a tokio runtime.
pub fn spawn_heat_decay(heat: ZoneHeat, interval: Duration) -> Option<HeatDecayHandle> {
    let runtime = match Handle::try_current() {
        Ok(runtime) => runtime,
        Err(error) => {
            tracing::warn!(%error, "no tokio runtime, heat decay not started");
            return None;
        }
    };
    let task = runtime.spawn(async move {
        let start = tokio::time::Instant::now() + interval;
        let mut ticker = tokio::time::interval_at(start, interval);
        loop {
            ticker.tick().await;
            let value = heat.decay_step();
            tracing::trace!(heat = value, "heat decayed");
        }
    });
    Some(HeatDecayHandle { task })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps() {
        assert_eq!(ZoneHeat::new(500).get(), HEAT_MAX);
        assert_eq!(ZoneHeat::default().get(), 0);
    }

    #[test]
    fn test_raise_saturates_at_max() {
        let heat = ZoneHeat::new(90);
        assert_eq!(heat.raise_for_kill(EnemyRarity::Boss), HEAT_MAX);
        assert_eq!(heat.raise(u32::MAX), HEAT_MAX);
    }

    #[test]
    fn test_gain_per_rarity() {
        let heat = ZoneHeat::new(0);
        assert_eq!(heat.raise_for_kill(EnemyRarity::Normal), 3);
        assert_eq!(heat.raise_for_kill(EnemyRarity::Rare), 11);
        assert_eq!(heat.raise_for_kill(EnemyRarity::Elite), 26);
        assert_eq!(heat.raise_for_kill(EnemyRarity::Boss), 56);
    }

    #[test]
    fn test_decay_floors_at_zero() {
        let heat = ZoneHeat::new(1);
        assert_eq!(heat.decay_step(), 0);
        assert_eq!(heat.decay_step(), 0);
    }

    #[test]
    fn test_clones_share_value() {
        let heat = ZoneHeat::new(10);
        let other = heat.clone();
        other.raise(5);
        assert_eq!(heat.get(), 15);
    }

    #[tokio::test(start_paused = true)]
    async fn test_decay_task_ticks_on_interval() {
        let heat = ZoneHeat::new(5);
        let interval = Duration::from_secs(HEAT_DECAY_INTERVAL_SECONDS);
        let handle = spawn_heat_decay(heat.clone(), interval).expect("inside a runtime");

        tokio::time::sleep(interval / 2).await;
        assert_eq!(heat.get(), 5);

        tokio::time::sleep(interval * 3).await;
        assert_eq!(heat.get(), 2);
        assert!(handle.is_running());

        drop(handle);
        tokio::time::sleep(interval * 10).await;
        assert_eq!(heat.get(), 2);
    }

    #[test]
    fn test_decay_without_runtime_is_not_started() {
        let heat = ZoneHeat::new(5);
        assert!(spawn_heat_decay(heat.clone(), Duration::from_millis(1)).is_none());
        assert_eq!(heat.get(), 5);
    }
}
