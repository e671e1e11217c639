use super::types::{EquipmentSlot, Item, ItemKind, SetBonus, StatDeltas};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Player equipment slots.
///
/// New slots must be `#[serde(default)]` so older snapshots still decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub helmet: Option<Item>,
    pub chest: Option<Item>,
    pub legs: Option<Item>,
    pub boots: Option<Item>,
    pub gloves: Option<Item>,
    pub weapon: Option<Item>,
    /// Off-hand: shield or focus.
    pub shield: Option<Item>,
    pub amulet: Option<Item>,
    pub ring1: Option<Item>,
    pub ring2: Option<Item>,
    pub belt: Option<Item>,
    pub trinket: Option<Item>,
}

/// Why an equip request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipRejection {
    /// Off-hand items cannot be worn alongside a two-handed weapon.
    OffHandBlocked,
}

/// Result of [`Equipment::equip`].
#[derive(Debug, Clone, PartialEq)]
pub enum EquipOutcome {
    /// The item now occupies `slot`. `displaced` holds whatever it pushed out,
    /// already flagged as unequipped.
    Equipped {
        slot: EquipmentSlot,
        displaced: Vec<Item>,
    },
    /// Consumables have no slot; the item is handed back untouched.
    Ignored(Item),
    Rejected {
        item: Item,
        reason: EquipRejection,
    },
}

/// The slot family an item kind belongs to. Rings report `Ring1`; use
/// [`resolve_slot`] to pick the concrete ring slot.
pub fn slot_family(kind: ItemKind) -> Option<EquipmentSlot> {
    match kind {
        ItemKind::OneHandedWeapon | ItemKind::TwoHandedWeapon => Some(EquipmentSlot::Weapon),
        ItemKind::Shield | ItemKind::Focus => Some(EquipmentSlot::Shield),
        ItemKind::Helmet => Some(EquipmentSlot::Helmet),
        ItemKind::Chest => Some(EquipmentSlot::Chest),
        ItemKind::Legs => Some(EquipmentSlot::Legs),
        ItemKind::Boots => Some(EquipmentSlot::Boots),
        ItemKind::Gloves => Some(EquipmentSlot::Gloves),
        ItemKind::Amulet => Some(EquipmentSlot::Amulet),
        ItemKind::Ring => Some(EquipmentSlot::Ring1),
        ItemKind::Belt => Some(EquipmentSlot::Belt),
        ItemKind::Trinket => Some(EquipmentSlot::Trinket),
        ItemKind::HealthPotion | ItemKind::ManaPotion => None,
    }
}

/// Concrete slot an item would go into given what is already worn.
pub fn resolve_slot(kind: ItemKind, equipment: &Equipment) -> Option<EquipmentSlot> {
    match slot_family(kind)? {
        EquipmentSlot::Ring1 if equipment.ring1.is_some() => Some(EquipmentSlot::Ring2),
        slot => Some(slot),
    }
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> &Option<Item> {
        match slot {
            EquipmentSlot::Helmet => &self.helmet,
            EquipmentSlot::Chest => &self.chest,
            EquipmentSlot::Legs => &self.legs,
            EquipmentSlot::Boots => &self.boots,
            EquipmentSlot::Gloves => &self.gloves,
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::Shield => &self.shield,
            EquipmentSlot::Amulet => &self.amulet,
            EquipmentSlot::Ring1 => &self.ring1,
            EquipmentSlot::Ring2 => &self.ring2,
            EquipmentSlot::Belt => &self.belt,
            EquipmentSlot::Trinket => &self.trinket,
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Item> {
        match slot {
            EquipmentSlot::Helmet => &mut self.helmet,
            EquipmentSlot::Chest => &mut self.chest,
            EquipmentSlot::Legs => &mut self.legs,
            EquipmentSlot::Boots => &mut self.boots,
            EquipmentSlot::Gloves => &mut self.gloves,
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Shield => &mut self.shield,
            EquipmentSlot::Amulet => &mut self.amulet,
            EquipmentSlot::Ring1 => &mut self.ring1,
            EquipmentSlot::Ring2 => &mut self.ring2,
            EquipmentSlot::Belt => &mut self.belt,
            EquipmentSlot::Trinket => &mut self.trinket,
        }
    }

    /// Raw slot write. Bypasses the two-handed rule; use [`Equipment::equip`]
    /// for player actions.
    pub fn set(&mut self, slot: EquipmentSlot, item: Option<Item>) {
        *self.slot_mut(slot) = item;
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        EquipmentSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).as_ref())
    }

    /// Slot currently holding the item with `id`, if any.
    pub fn slot_of(&self, id: uuid::Uuid) -> Option<EquipmentSlot> {
        EquipmentSlot::ALL
            .into_iter()
            .find(|slot| self.get(*slot).as_ref().is_some_and(|item| item.id == id))
    }

    pub fn has_two_handed(&self) -> bool {
        self.weapon
            .as_ref()
            .is_some_and(|w| w.kind.is_two_handed())
    }

    /// Sum of the armor stat on every equipped piece.
    pub fn total_armor(&self) -> u32 {
        self.iter_equipped().map(|item| item.armor).sum()
    }

    /// Equip `item`, returning anything it displaced.
    pub fn equip(&mut self, mut item: Item) -> EquipOutcome {
        let Some(slot) = resolve_slot(item.kind, self) else {
            return EquipOutcome::Ignored(item);
        };

        if item.kind.is_off_hand() && self.has_two_handed() {
            return EquipOutcome::Rejected {
                item,
                reason: EquipRejection::OffHandBlocked,
            };
        }

        let mut displaced = Vec::new();
        if item.kind.is_two_handed() {
            displaced.extend(self.unequip(EquipmentSlot::Shield));
        }
        displaced.extend(self.unequip(slot));

        item.equipped = true;
        self.set(slot, Some(item));
        EquipOutcome::Equipped { slot, displaced }
    }

    /// Remove and return whatever is in `slot`, flagged as unequipped.
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<Item> {
        self.slot_mut(slot).take().map(|mut item| {
            item.equipped = false;
            item
        })
    }
}

/// Aggregate set bonuses over the given equipped items.
///
/// Items are grouped by set name; every bonus whose piece threshold is met
/// contributes, so a four-piece set also grants its two-piece bonus.
pub fn compute_set_bonuses<'a>(items: impl IntoIterator<Item = &'a Item>) -> StatDeltas {
    let mut sets: BTreeMap<&str, (u32, &[SetBonus])> = BTreeMap::new();
    for item in items {
        if let Some(name) = item.set_name.as_deref() {
            let entry = sets.entry(name).or_insert((0, item.set_bonuses.as_slice()));
            entry.0 += 1;
        }
    }

    let mut total = StatDeltas::default();
    for (count, bonuses) in sets.values() {
        for bonus in bonuses.iter().filter(|b| b.pieces_required <= *count) {
            total.add(&bonus.deltas);
        }
    }
    total
}
