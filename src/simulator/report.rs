//! Simulation report generation.

use super::loot::LootStats;
use crate::items::types::Rarity;
use serde::Serialize;
use std::collections::BTreeMap;

/// Statistics from a single simulated run.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub final_floor: u32,
    pub final_level: u32,
    pub final_gold: u64,
    pub total_kills: u64,
    pub total_boss_kills: u64,
    pub total_deaths: u64,
    pub total_actions: u64,
    pub persistence_failures: u64,
    pub final_avg_ilvl: f64,
    pub reached_target: bool,
    pub loot_stats: LootStats,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_completed: u32,
    pub runs_timed_out: u32,

    // Aggregated stats
    pub avg_final_floor: f64,
    pub avg_final_level: f64,
    pub avg_total_kills: f64,
    pub avg_boss_kills: f64,
    pub avg_total_deaths: f64,
    pub avg_actions_to_complete: f64,
    pub avg_final_gold: f64,

    // Distribution data
    pub floor_distribution: BTreeMap<u32, u32>,
    pub death_distribution: Vec<u64>,

    // Loot analysis
    pub avg_drops_by_rarity: BTreeMap<Rarity, f64>,
    pub avg_upgrades_equipped: f64,
    pub avg_potions_used: f64,
    pub avg_final_ilvl: f64,

    // Individual run stats for detailed analysis
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, max_actions: u64) -> Self {
        let num_runs = runs.len() as u32;
        let runs_completed = runs.iter().filter(|r| r.reached_target).count() as u32;
        let runs_timed_out = runs
            .iter()
            .filter(|r| !r.reached_target && r.total_actions >= max_actions)
            .count() as u32;

        let average = |value: &dyn Fn(&RunStats) -> f64| -> f64 {
            runs.iter().map(value).sum::<f64>() / num_runs.max(1) as f64
        };

        let avg_final_floor = average(&|r| r.final_floor as f64);
        let avg_final_level = average(&|r| r.final_level as f64);
        let avg_total_kills = average(&|r| r.total_kills as f64);
        let avg_boss_kills = average(&|r| r.total_boss_kills as f64);
        let avg_total_deaths = average(&|r| r.total_deaths as f64);
        let avg_final_gold = average(&|r| r.final_gold as f64);
        let avg_upgrades_equipped = average(&|r| r.loot_stats.upgrades_equipped as f64);
        let avg_potions_used = average(&|r| r.loot_stats.potions_used as f64);
        let avg_final_ilvl = average(&|r| r.final_avg_ilvl);
        let avg_actions_to_complete = runs
            .iter()
            .filter(|r| r.reached_target)
            .map(|r| r.total_actions as f64)
            .sum::<f64>()
            / runs_completed.max(1) as f64;

        let mut floor_distribution = BTreeMap::new();
        for run in &runs {
            *floor_distribution.entry(run.final_floor).or_insert(0) += 1;
        }

        let death_distribution: Vec<u64> = runs.iter().map(|r| r.total_deaths).collect();

        let avg_drops_by_rarity = Rarity::ALL
            .iter()
            .map(|&rarity| (rarity, average(&|r| r.loot_stats.drops_of(rarity) as f64)))
            .collect();

        Self {
            num_runs,
            runs_completed,
            runs_timed_out,
            avg_final_floor,
            avg_final_level,
            avg_total_kills,
            avg_boss_kills,
            avg_total_deaths,
            avg_actions_to_complete,
            avg_final_gold,
            floor_distribution,
            death_distribution,
            avg_drops_by_rarity,
            avg_upgrades_equipped,
            avg_potions_used,
            avg_final_ilvl,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} completed, {} timed out\n\n",
            self.num_runs, self.runs_completed, self.runs_timed_out
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Floor:     {:.1}\n", self.avg_final_floor));
        report.push_str(&format!("  Avg Final Level:     {:.1}\n", self.avg_final_level));
        report.push_str(&format!("  Avg Total Kills:     {:.0}\n", self.avg_total_kills));
        report.push_str(&format!("  Avg Boss Kills:      {:.1}\n", self.avg_boss_kills));
        report.push_str(&format!("  Avg Total Deaths:    {:.1}\n", self.avg_total_deaths));
        report.push_str(&format!("  Avg Final Gold:      {:.0}\n", self.avg_final_gold));
        report.push_str(&format!(
            "  Avg Actions to Clear: {:.0}\n\n",
            self.avg_actions_to_complete
        ));

        report.push_str("── LOOT ─────────────────────────────────────────────────────────\n");
        for (rarity, avg) in &self.avg_drops_by_rarity {
            report.push_str(&format!("  {:<10} drops:    {:.2}\n", rarity.name(), avg));
        }
        report.push_str(&format!(
            "  Avg Upgrades Equipped: {:.1}\n",
            self.avg_upgrades_equipped
        ));
        report.push_str(&format!("  Avg Potions Used:    {:.1}\n", self.avg_potions_used));
        report.push_str(&format!("  Avg Final ilvl:      {:.1}\n\n", self.avg_final_ilvl));

        report.push_str("── FLOORS REACHED ───────────────────────────────────────────────\n");
        for (floor, reached) in &self.floor_distribution {
            let pct = (*reached as f64 / self.num_runs.max(1) as f64) * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  Floor {:3}: {:>5.1}% {}\n", floor, pct, bar));
        }
        report.push('\n');

        report.push_str("── DEATH ANALYSIS ───────────────────────────────────────────────\n");
        let min_deaths = self.death_distribution.iter().min().copied().unwrap_or(0);
        let max_deaths = self.death_distribution.iter().max().copied().unwrap_or(0);
        let median_deaths = {
            let mut sorted = self.death_distribution.clone();
            sorted.sort_unstable();
            sorted.get(sorted.len() / 2).copied().unwrap_or(0)
        };
        report.push_str(&format!("  Min Deaths:    {}\n", min_deaths));
        report.push_str(&format!("  Median Deaths: {}\n", median_deaths));
        report.push_str(&format!("  Max Deaths:    {}\n\n", max_deaths));

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let completion_rate = self.completion_rate();
        let deaths_per_kill = if self.avg_total_kills > 0.0 {
            self.avg_total_deaths / self.avg_total_kills
        } else {
            0.0
        };
        let death_rating = if deaths_per_kill < 0.02 {
            "TOO EASY - Players rarely die"
        } else if deaths_per_kill < 0.10 {
            "GOOD - Challenging but fair"
        } else if deaths_per_kill < 0.25 {
            "HARD - Many deaths but completable"
        } else {
            "TOO HARD - Excessive deaths"
        };
        report.push_str(&format!("  Completion Rate: {:.1}%\n", completion_rate));
        report.push_str(&format!("  Death Rating:    {}\n", death_rating));

        if self.runs_timed_out > self.num_runs / 2 {
            report.push_str("  ⚠️  Most runs hit the action cap - floors too slow?\n");
        }
        if self.avg_boss_kills > 0.0 && self.avg_upgrades_equipped < 1.0 {
            report.push_str("  ⚠️  Bosses dying without upgrades - drop quality too low?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Percentage of runs that reached the target floor.
    pub fn completion_rate(&self) -> f64 {
        (self.runs_completed as f64 / self.num_runs.max(1) as f64) * 100.0
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
