//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random). Run `i` uses `seed + i`.
    pub seed: Option<u64>,

    /// Floor to reach before a run counts as complete
    pub target_floor: u32,

    /// Maximum actions (explores, attacks, floor changes) per run before timeout
    pub max_actions_per_run: u64,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 200,
            seed: None,
            target_floor: 10,
            max_actions_per_run: 50_000,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for checking early floors
    pub fn quick(target_floor: u32) -> Self {
        Self {
            num_runs: 25,
            target_floor,
            max_actions_per_run: 10_000,
            ..Default::default()
        }
    }

    /// Seed used for run `run_idx`, if the config is seeded.
    pub fn run_seed(&self, run_idx: u32) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(run_idx as u64))
    }
}
