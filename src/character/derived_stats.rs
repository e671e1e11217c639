use super::types::Character;
use crate::combat::types::{CombatantSnapshot, Resistances, WeaponSnapshot};
use crate::core::constants::*;
use crate::items::equipment::{compute_set_bonuses, Equipment};
use crate::items::types::{AffixType, StatDeltas};

/// Combat-ready stats after folding in equipment, affixes and set bonuses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedStats {
    pub strength: u32,
    pub dexterity: u32,
    pub intelligence: u32,
    pub max_health: u32,
    pub max_mana: u32,
    /// Added to every base roll before the percent bonus.
    pub flat_damage: f64,
    /// Fraction, e.g. `0.15` for +15%.
    pub damage_percent: f64,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    pub armor: u32,
    pub evasion: f64,
    pub resistances: Resistances,
    pub weapon: Option<WeaponSnapshot>,
    pub set_bonuses: StatDeltas,
}

impl DerivedStats {
    /// Calculates derived stats from the character and what it has equipped.
    pub fn calculate(character: &Character, equipment: &Equipment) -> Self {
        let set_bonuses = compute_set_bonuses(equipment.iter_equipped());
        let affix = |affix_type: AffixType| -> f64 {
            equipment
                .iter_equipped()
                .map(|item| item.affix_total(affix_type))
                .sum()
        };

        let strength = character.strength + affix(AffixType::Strength) as u32 + set_bonuses.strength;
        let dexterity =
            character.dexterity + affix(AffixType::Dexterity) as u32 + set_bonuses.dexterity;
        let intelligence =
            character.intelligence + affix(AffixType::Intelligence) as u32 + set_bonuses.intelligence;

        let flat_damage = affix(AffixType::FlatDamage)
            + set_bonuses.damage as f64
            + (strength / STRENGTH_PER_FLAT_DAMAGE) as f64;
        let damage_percent = affix(AffixType::DamagePercent) / AFFIX_PERCENT_DIVISOR;

        // Crit chance = base 5% + affixes + 1% per 10 DEX
        let crit_percent = BASE_CRIT_CHANCE_PERCENT
            + affix(AffixType::CritChance)
            + (dexterity / DEXTERITY_PER_CRIT_PERCENT) as f64;
        let crit_chance = (crit_percent / AFFIX_PERCENT_DIVISOR).min(1.0);
        let crit_multiplier =
            (BASE_CRIT_MULTIPLIER_PERCENT + affix(AffixType::CritMultiplier)) / AFFIX_PERCENT_DIVISOR;

        let armor = equipment.total_armor() + affix(AffixType::Armor) as u32 + set_bonuses.armor;

        let evasion_percent =
            affix(AffixType::Evasion) + (dexterity / DEXTERITY_PER_EVASION_PERCENT) as f64;
        let evasion = (evasion_percent / AFFIX_PERCENT_DIVISOR).min(MAX_PLAYER_EVASION);

        let resistances = Resistances {
            fire: affix(AffixType::FireResist) / AFFIX_PERCENT_DIVISOR,
            cold: affix(AffixType::ColdResist) / AFFIX_PERCENT_DIVISOR,
            ..Resistances::default()
        };

        let weapon = equipment.weapon.as_ref().map(|w| WeaponSnapshot {
            min_damage: w.min_damage,
            max_damage: w.max_damage,
            damage_type: w.damage_type,
        });

        Self {
            strength,
            dexterity,
            intelligence,
            max_health: character.max_health + affix(AffixType::MaxHealth) as u32,
            max_mana: character.max_mana + affix(AffixType::MaxMana) as u32 + set_bonuses.mana,
            flat_damage,
            damage_percent,
            crit_chance,
            crit_multiplier,
            armor,
            evasion,
            resistances,
            weapon,
            set_bonuses,
        }
    }

    /// The player's side of an exchange at `life` health.
    pub fn snapshot(&self, life: u32) -> CombatantSnapshot {
        CombatantSnapshot {
            life,
            armor: self.armor,
            evasion_chance: self.evasion,
            crit_chance: self.crit_chance,
            crit_multiplier: self.crit_multiplier,
            resistances: self.resistances,
        }
    }
}
