//! Static item blueprint pools.
//!
//! Each blueprint declares the rarity band it can drop at and a weight used for
//! weight-proportional selection within its sub-pool.

use super::types::{DamageType, ItemCategory, ItemKind, Rarity, SetBonus, StatDeltas};

#[derive(Debug)]
pub struct SetDefinition {
    pub name: &'static str,
    pub bonuses: &'static [SetBonus],
}

#[derive(Debug)]
pub struct Blueprint {
    pub name: &'static str,
    pub kind: ItemKind,
    /// Base damage, armor, or restore amount before scaling.
    pub base_stat: f64,
    /// Added per enemy level.
    pub level_coefficient: f64,
    pub weight: u32,
    pub min_rarity: Rarity,
    pub max_rarity: Rarity,
    pub damage_type: DamageType,
    pub set: Option<&'static SetDefinition>,
}

impl Blueprint {
    pub fn allows(&self, rarity: Rarity) -> bool {
        self.min_rarity <= rarity && rarity <= self.max_rarity
    }
}

const NO_DELTAS: StatDeltas = StatDeltas {
    damage: 0,
    armor: 0,
    strength: 0,
    dexterity: 0,
    intelligence: 0,
    mana: 0,
};

pub static WARDEN_SET: SetDefinition = SetDefinition {
    name: "Warden's Bulwark",
    bonuses: &[
        SetBonus {
            pieces_required: 2,
            deltas: StatDeltas {
                armor: 15,
                ..NO_DELTAS
            },
        },
        SetBonus {
            pieces_required: 4,
            deltas: StatDeltas {
                armor: 25,
                strength: 6,
                ..NO_DELTAS
            },
        },
    ],
};

pub static NIGHTSTALKER_SET: SetDefinition = SetDefinition {
    name: "Nightstalker",
    bonuses: &[
        SetBonus {
            pieces_required: 2,
            deltas: StatDeltas {
                dexterity: 5,
                ..NO_DELTAS
            },
        },
        SetBonus {
            pieces_required: 3,
            deltas: StatDeltas {
                damage: 8,
                dexterity: 4,
                ..NO_DELTAS
            },
        },
        SetBonus {
            pieces_required: 4,
            deltas: StatDeltas {
                damage: 12,
                mana: 20,
                ..NO_DELTAS
            },
        },
    ],
};

const fn blueprint(
    name: &'static str,
    kind: ItemKind,
    base_stat: f64,
    level_coefficient: f64,
    weight: u32,
    min_rarity: Rarity,
    max_rarity: Rarity,
) -> Blueprint {
    Blueprint {
        name,
        kind,
        base_stat,
        level_coefficient,
        weight,
        min_rarity,
        max_rarity,
        damage_type: DamageType::Physical,
        set: None,
    }
}

const fn elemental(mut bp: Blueprint, damage_type: DamageType) -> Blueprint {
    bp.damage_type = damage_type;
    bp
}

const fn set_piece(mut bp: Blueprint, set: &'static SetDefinition) -> Blueprint {
    bp.set = Some(set);
    bp
}

use ItemKind::*;
use Rarity::{Common, Epic, Legendary, Magic, Rare, Set};

pub static WEAPON_POOL: &[Blueprint] = &[
    blueprint("Rusty Shortsword", OneHandedWeapon, 4.0, 0.8, 30, Common, Magic),
    blueprint("Arming Sword", OneHandedWeapon, 6.0, 1.0, 25, Magic, Epic),
    elemental(
        blueprint("Ember Wand", OneHandedWeapon, 5.0, 1.0, 15, Magic, Legendary),
        DamageType::Fire,
    ),
    elemental(
        blueprint("Frostbrand", OneHandedWeapon, 7.0, 1.1, 10, Rare, Legendary),
        DamageType::Cold,
    ),
    blueprint("Greataxe", TwoHandedWeapon, 10.0, 1.5, 20, Common, Legendary),
    blueprint("Warhammer", TwoHandedWeapon, 12.0, 1.6, 12, Rare, Legendary),
    elemental(
        blueprint("Stormcaller Staff", TwoHandedWeapon, 9.0, 1.4, 8, Epic, Legendary),
        DamageType::Lightning,
    ),
    set_piece(
        elemental(
            blueprint("Nightstalker Fang", OneHandedWeapon, 8.0, 1.2, 10, Set, Set),
            DamageType::Poison,
        ),
        &NIGHTSTALKER_SET,
    ),
];

pub static ARMOR_POOL: &[Blueprint] = &[
    blueprint("Leather Cap", Helmet, 2.0, 0.3, 20, Common, Rare),
    blueprint("Iron Helm", Helmet, 4.0, 0.5, 12, Magic, Legendary),
    blueprint("Padded Vest", Chest, 4.0, 0.5, 20, Common, Rare),
    blueprint("Chainmail", Chest, 7.0, 0.8, 12, Magic, Legendary),
    blueprint("Woolen Trousers", Legs, 3.0, 0.4, 18, Common, Epic),
    blueprint("Worn Boots", Boots, 2.0, 0.3, 18, Common, Epic),
    blueprint("Leather Gloves", Gloves, 1.0, 0.3, 18, Common, Epic),
    blueprint("Buckler", Shield, 5.0, 0.6, 14, Common, Legendary),
    blueprint("Arcane Orb", Focus, 2.0, 0.3, 8, Magic, Legendary),
    blueprint("Copper Amulet", Amulet, 1.0, 0.2, 10, Common, Legendary),
    blueprint("Iron Ring", Ring, 1.0, 0.2, 12, Common, Legendary),
    blueprint("Studded Belt", Belt, 2.0, 0.3, 12, Common, Legendary),
    blueprint("Lucky Charm", Trinket, 1.0, 0.2, 8, Magic, Legendary),
    set_piece(blueprint("Warden's Helm", Helmet, 6.0, 0.6, 10, Set, Set), &WARDEN_SET),
    set_piece(blueprint("Warden's Plate", Chest, 10.0, 0.9, 10, Set, Set), &WARDEN_SET),
    set_piece(blueprint("Warden's Aegis", Shield, 8.0, 0.7, 10, Set, Set), &WARDEN_SET),
    set_piece(blueprint("Warden's Greaves", Legs, 6.0, 0.6, 10, Set, Set), &WARDEN_SET),
    set_piece(
        blueprint("Nightstalker Grips", Gloves, 3.0, 0.4, 10, Set, Set),
        &NIGHTSTALKER_SET,
    ),
    set_piece(
        blueprint("Nightstalker Band", Ring, 2.0, 0.3, 10, Set, Set),
        &NIGHTSTALKER_SET,
    ),
    set_piece(
        blueprint("Nightstalker Treads", Boots, 3.0, 0.4, 10, Set, Set),
        &NIGHTSTALKER_SET,
    ),
];

pub static POTION_POOL: &[Blueprint] = &[
    blueprint("Minor Healing Draught", HealthPotion, 20.0, 2.0, 30, Common, Magic),
    blueprint("Healing Potion", HealthPotion, 40.0, 3.0, 15, Magic, Rare),
    blueprint("Mana Tonic", ManaPotion, 15.0, 1.5, 20, Common, Rare),
];

pub fn pool_for(category: ItemCategory) -> &'static [Blueprint] {
    match category {
        ItemCategory::Weapon => WEAPON_POOL,
        ItemCategory::Armor => ARMOR_POOL,
        ItemCategory::Potion => POTION_POOL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pools_have_matching_categories() {
        for category in [ItemCategory::Weapon, ItemCategory::Armor, ItemCategory::Potion] {
            for bp in pool_for(category) {
                assert_eq!(bp.kind.category(), category, "{} in wrong pool", bp.name);
                assert!(bp.min_rarity <= bp.max_rarity, "{} has inverted band", bp.name);
                assert!(bp.weight > 0);
            }
        }
    }

    #[test]
    fn test_every_equippable_tier_is_covered() {
        for rarity in Rarity::ALL {
            assert!(WEAPON_POOL.iter().any(|bp| bp.allows(rarity)), "no weapon at {rarity:?}");
            assert!(ARMOR_POOL.iter().any(|bp| bp.allows(rarity)), "no armor at {rarity:?}");
        }
    }

    #[test]
    fn test_set_tier_blueprints_are_set_pieces() {
        for bp in WEAPON_POOL.iter().chain(ARMOR_POOL.iter()) {
            assert_eq!(bp.allows(Rarity::Set), bp.set.is_some(), "{}", bp.name);
        }
    }

    #[test]
    fn test_potions_never_reach_high_tiers() {
        assert!(POTION_POOL.iter().all(|bp| !bp.allows(Rarity::Epic)));
    }
}
