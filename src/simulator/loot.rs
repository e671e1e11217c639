//! Drop bookkeeping and the auto-equip heuristic used by simulated players.

use crate::items::types::{AffixType, Item, Rarity};
use serde::Serialize;

/// Per-run drop counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LootStats {
    pub total_drops: u32,
    pub upgrades_equipped: u32,
    /// Indexed by [`Rarity::index`].
    pub drops_by_rarity: [u32; 6],
    pub potions_used: u32,
}

impl LootStats {
    pub fn record_drop(&mut self, rarity: Rarity) {
        self.total_drops += 1;
        self.drops_by_rarity[rarity.index()] += 1;
    }

    pub fn record_upgrade(&mut self) {
        self.upgrades_equipped += 1;
    }

    pub fn drops_of(&self, rarity: Rarity) -> u32 {
        self.drops_by_rarity[rarity.index()]
    }
}

/// Rough power score for comparing two items that share a slot.
pub fn score_item(item: &Item) -> f64 {
    let mut score = (item.min_damage + item.max_damage) as f64 + item.armor as f64 * 1.5;

    for affix in &item.affixes {
        let affix_score = match affix.affix_type {
            AffixType::FlatDamage => affix.value * 2.0,
            AffixType::DamagePercent => affix.value * 1.5,
            AffixType::CritChance | AffixType::CritMultiplier => affix.value * 1.2,
            AffixType::Armor => affix.value * 1.3,
            AffixType::MaxHealth => affix.value * 0.5,
            AffixType::Evasion => affix.value * 1.0,
            AffixType::FireResist | AffixType::ColdResist => affix.value * 0.4,
            AffixType::Strength | AffixType::Dexterity | AffixType::Intelligence => {
                affix.value * 0.8
            }
            AffixType::MaxMana => affix.value * 0.3,
        };
        score += affix_score;
    }

    // Set pieces are worth holding on to for their bonuses
    if item.set_name.is_some() {
        score *= 1.25;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::generation::fallback_item;
    use crate::items::types::Affix;

    #[test]
    fn test_score_item_with_affixes() {
        let plain = fallback_item(1, &mut rand::thread_rng());
        let mut enchanted = fallback_item(1, &mut rand::thread_rng());
        enchanted.affixes = vec![Affix {
            affix_type: AffixType::FlatDamage,
            value: 5.0,
        }];
        assert!(score_item(&enchanted) > score_item(&plain));
    }

    #[test]
    fn test_record_drop_counts_by_rarity() {
        let mut stats = LootStats::default();
        stats.record_drop(Rarity::Rare);
        stats.record_drop(Rarity::Rare);
        stats.record_drop(Rarity::Common);
        assert_eq!(stats.total_drops, 3);
        assert_eq!(stats.drops_of(Rarity::Rare), 2);
        assert_eq!(stats.drops_of(Rarity::Legendary), 0);
    }
}
