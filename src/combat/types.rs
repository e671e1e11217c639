use serde::{Deserialize, Serialize};

use crate::items::types::DamageType;

/// Tier of a spawned enemy. Drives loot tables, heat gain and stat multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyRarity {
    Normal,
    Rare,
    Elite,
    Boss,
}

impl EnemyRarity {
    pub fn name(&self) -> &'static str {
        match self {
            EnemyRarity::Normal => "Normal",
            EnemyRarity::Rare => "Rare",
            EnemyRarity::Elite => "Elite",
            EnemyRarity::Boss => "Boss",
        }
    }
}

/// Per-damage-type resistance fractions. Negative values are vulnerabilities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Resistances {
    pub physical: f64,
    pub fire: f64,
    pub cold: f64,
    pub lightning: f64,
    pub poison: f64,
}

impl Resistances {
    pub fn get(&self, damage_type: DamageType) -> f64 {
        match damage_type {
            DamageType::Physical => self.physical,
            DamageType::Fire => self.fire,
            DamageType::Cold => self.cold,
            DamageType::Lightning => self.lightning,
            DamageType::Poison => self.poison,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub rarity: EnemyRarity,
    pub level: u32,
    pub max_health: u32,
    pub health: u32,
    /// Base hit; counter-attacks roll `[damage, damage + 4]`.
    pub damage: u32,
    pub experience: u64,
    pub gold: u64,
    #[serde(default)]
    pub armor: u32,
    #[serde(default)]
    pub evasion: f64,
    #[serde(default)]
    pub resistances: Resistances,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Defensive view used when the player attacks.
    pub fn defense_snapshot(&self) -> CombatantSnapshot {
        CombatantSnapshot {
            life: self.health,
            armor: self.armor,
            evasion_chance: self.evasion,
            crit_chance: 0.0,
            crit_multiplier: 1.0,
            resistances: self.resistances,
        }
    }

    /// Offensive view used for counter-attacks. Enemies never crit.
    pub fn attack_snapshot(&self) -> CombatantSnapshot {
        CombatantSnapshot {
            crit_chance: 0.0,
            crit_multiplier: 1.0,
            ..self.defense_snapshot()
        }
    }
}

/// Point-in-time combat view of one side of an exchange.
///
/// `crit_chance` above 1 is read as a percentage and `crit_multiplier` above 5
/// as percent-of-100, so both `0.05`/`1.5` and `5`/`150` are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatantSnapshot {
    pub life: u32,
    pub armor: u32,
    pub evasion_chance: f64,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    pub resistances: Resistances,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponSnapshot {
    pub min_damage: u32,
    pub max_damage: u32,
    pub damage_type: DamageType,
}

/// Outcome of a single resolved attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackResult {
    pub hit: bool,
    pub evaded: bool,
    pub critical: bool,
    pub base_roll: u32,
    pub damage_final: u32,
    pub defender_life_after: u32,
    pub killed: bool,
}
