use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Logical equipment slot an item occupies once equipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Helmet,
    Chest,
    Legs,
    Boots,
    Gloves,
    Weapon,
    Shield,
    Amulet,
    Ring1,
    Ring2,
    Belt,
    Trinket,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 12] = [
        EquipmentSlot::Helmet,
        EquipmentSlot::Chest,
        EquipmentSlot::Legs,
        EquipmentSlot::Boots,
        EquipmentSlot::Gloves,
        EquipmentSlot::Weapon,
        EquipmentSlot::Shield,
        EquipmentSlot::Amulet,
        EquipmentSlot::Ring1,
        EquipmentSlot::Ring2,
        EquipmentSlot::Belt,
        EquipmentSlot::Trinket,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Helmet => "Helmet",
            EquipmentSlot::Chest => "Chest",
            EquipmentSlot::Legs => "Legs",
            EquipmentSlot::Boots => "Boots",
            EquipmentSlot::Gloves => "Gloves",
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Shield => "Shield",
            EquipmentSlot::Amulet => "Amulet",
            EquipmentSlot::Ring1 => "Ring 1",
            EquipmentSlot::Ring2 => "Ring 2",
            EquipmentSlot::Belt => "Belt",
            EquipmentSlot::Trinket => "Trinket",
        }
    }
}

/// Concrete item type. Determines the slot family and affix pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    OneHandedWeapon,
    TwoHandedWeapon,
    Shield,
    /// Caster off-hand (orb, tome). Shares the shield slot.
    Focus,
    Helmet,
    Chest,
    Legs,
    Boots,
    Gloves,
    Amulet,
    Ring,
    Belt,
    Trinket,
    HealthPotion,
    ManaPotion,
}

/// Blueprint sub-pool an item kind is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCategory {
    Weapon,
    Armor,
    Potion,
}

impl ItemKind {
    pub fn category(&self) -> ItemCategory {
        match self {
            ItemKind::OneHandedWeapon | ItemKind::TwoHandedWeapon => ItemCategory::Weapon,
            ItemKind::HealthPotion | ItemKind::ManaPotion => ItemCategory::Potion,
            _ => ItemCategory::Armor,
        }
    }

    pub fn is_weapon(&self) -> bool {
        self.category() == ItemCategory::Weapon
    }

    pub fn is_two_handed(&self) -> bool {
        matches!(self, ItemKind::TwoHandedWeapon)
    }

    pub fn is_off_hand(&self) -> bool {
        matches!(self, ItemKind::Shield | ItemKind::Focus)
    }

    pub fn is_consumable(&self) -> bool {
        self.category() == ItemCategory::Potion
    }
}

/// Item rarity ladder, lowest to highest. `Set` is the top tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Magic = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
    Set = 5,
}

impl Rarity {
    pub const ALL: [Rarity; 6] = [
        Rarity::Common,
        Rarity::Magic,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Set,
    ];

    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Magic => "Magic",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Set => "Set",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Stat and value multiplier applied to generated items.
    pub fn multiplier(&self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Magic => 1.2,
            Rarity::Rare => 1.5,
            Rarity::Epic => 1.9,
            Rarity::Legendary => 2.4,
            Rarity::Set => 2.6,
        }
    }

    /// Number of affixes an equippable item of this rarity carries.
    pub fn affix_count(&self) -> usize {
        match self {
            Rarity::Common => 0,
            Rarity::Magic => 1,
            Rarity::Rare => 2,
            Rarity::Epic => 3,
            Rarity::Legendary => 4,
            Rarity::Set => 5,
        }
    }

    /// The next tier down, or `None` at the bottom of the ladder.
    pub fn next_lower(&self) -> Option<Rarity> {
        match self {
            Rarity::Common => None,
            Rarity::Magic => Some(Rarity::Common),
            Rarity::Rare => Some(Rarity::Magic),
            Rarity::Epic => Some(Rarity::Rare),
            Rarity::Legendary => Some(Rarity::Epic),
            Rarity::Set => Some(Rarity::Legendary),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    Physical,
    Fire,
    Cold,
    Lightning,
    Poison,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AffixType {
    // Offensive (weapons)
    FlatDamage,
    DamagePercent,
    CritChance,
    CritMultiplier,
    Strength,
    Dexterity,
    // Defensive / utility (armor, jewelry)
    Armor,
    MaxHealth,
    Evasion,
    FireResist,
    ColdResist,
    Intelligence,
    MaxMana,
}

impl AffixType {
    pub fn name(&self) -> &'static str {
        match self {
            AffixType::FlatDamage => "+Damage",
            AffixType::DamagePercent => "+% Damage",
            AffixType::CritChance => "+% Crit Chance",
            AffixType::CritMultiplier => "+% Crit Damage",
            AffixType::Strength => "+Strength",
            AffixType::Dexterity => "+Dexterity",
            AffixType::Armor => "+Armor",
            AffixType::MaxHealth => "+Max Health",
            AffixType::Evasion => "+% Evasion",
            AffixType::FireResist => "+% Fire Resist",
            AffixType::ColdResist => "+% Cold Resist",
            AffixType::Intelligence => "+Intelligence",
            AffixType::MaxMana => "+Max Mana",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affix {
    pub affix_type: AffixType,
    pub value: f64,
}

/// Flat stat deltas contributed by set bonuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDeltas {
    pub damage: u32,
    pub armor: u32,
    pub strength: u32,
    pub dexterity: u32,
    pub intelligence: u32,
    pub mana: u32,
}

impl StatDeltas {
    pub fn add(&mut self, other: &StatDeltas) {
        self.damage += other.damage;
        self.armor += other.armor;
        self.strength += other.strength;
        self.dexterity += other.dexterity;
        self.intelligence += other.intelligence;
        self.mana += other.mana;
    }

    pub fn is_zero(&self) -> bool {
        *self == StatDeltas::default()
    }
}

/// Bonus unlocked when `pieces_required` items of one set are equipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetBonus {
    pub pieces_required: u32,
    pub deltas: StatDeltas,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub kind: ItemKind,
    pub rarity: Rarity,
    pub name: String,
    /// Level of the enemy that dropped the item.
    pub item_level: u32,
    /// Weapon damage range (zero for non-weapons).
    pub min_damage: u32,
    pub max_damage: u32,
    pub damage_type: DamageType,
    pub armor: u32,
    /// Health or mana restored on consumption (potions only).
    pub restore: u32,
    /// Sell price in gold.
    pub value: u64,
    pub affixes: Vec<Affix>,
    #[serde(default)]
    pub set_name: Option<String>,
    #[serde(default)]
    pub set_bonuses: Vec<SetBonus>,
    #[serde(default)]
    pub equipped: bool,
}

impl Item {
    /// Sum of all affixes of one type on this item.
    pub fn affix_total(&self, affix_type: AffixType) -> f64 {
        self.affixes
            .iter()
            .filter(|a| a.affix_type == affix_type)
            .map(|a| a.value)
            .sum()
    }
}
