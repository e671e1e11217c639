use super::{Session, SessionEvent};
use crate::items::equipment::{EquipOutcome, EquipRejection};
use crate::items::types::{EquipmentSlot, Item, ItemKind};
use crate::persistence::{CharacterCredit, ItemRow, PersistenceCommand};
use rand::Rng;
use uuid::Uuid;

/// What [`Session::toggle_equip`] did with the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleResult {
    Equipped(EquipmentSlot),
    Unequipped(EquipmentSlot),
    /// Potions have no slot.
    Ignored,
    Rejected(EquipRejection),
    NotFound,
}

impl<R: Rng> Session<R> {
    /// Equip a bag item, or unequip a worn one.
    pub fn toggle_equip(&mut self, item_id: Uuid) -> ToggleResult {
        let result = if let Some(slot) = self.equipment.slot_of(item_id) {
            self.unequip_slot(slot)
        } else if let Some(pos) = self.bag.iter().position(|item| item.id == item_id) {
            self.equip_from_bag(pos)
        } else {
            return ToggleResult::NotFound;
        };
        if matches!(result, ToggleResult::Equipped(_) | ToggleResult::Unequipped(_)) {
            self.clamp_resources();
        }
        result
    }

    /// Sell a bag item for its value. Worn items must be unequipped first.
    pub fn sell_item(&mut self, item_id: Uuid) -> Option<u64> {
        let pos = self.bag.iter().position(|item| item.id == item_id)?;
        let item = self.bag.remove(pos);
        let gold = item.value;
        self.character.gold += gold;

        self.queue_delete(
            item,
            CharacterCredit {
                gold,
                ..CharacterCredit::default()
            },
        );
        self.emit(SessionEvent::ItemSold { item_id, gold });
        Some(gold)
    }

    /// Drink a potion from the bag. Returns the amount actually restored.
    pub fn consume_item(&mut self, item_id: Uuid) -> Option<u32> {
        let pos = self
            .bag
            .iter()
            .position(|item| item.id == item_id && item.kind.is_consumable())?;
        let item = self.bag.remove(pos);

        let mut credit = CharacterCredit::default();
        let restored = match item.kind {
            ItemKind::ManaPotion => {
                let room = self.max_mana().saturating_sub(self.character.mana);
                credit.mana = item.restore.min(room);
                self.character.mana += credit.mana;
                credit.mana
            }
            _ => {
                let room = self.max_health().saturating_sub(self.character.health);
                credit.health = item.restore.min(room);
                self.character.health += credit.health;
                credit.health
            }
        };

        self.queue_delete(item, credit);
        self.emit(SessionEvent::ItemConsumed { item_id, restored });
        Some(restored)
    }

    fn equip_from_bag(&mut self, pos: usize) -> ToggleResult {
        let item = self.bag.remove(pos);
        let item_id = item.id;
        let before: Vec<(EquipmentSlot, Uuid)> = EquipmentSlot::ALL
            .iter()
            .filter_map(|&slot| self.equipment.get(slot).as_ref().map(|i| (slot, i.id)))
            .collect();

        match self.equipment.equip(item) {
            EquipOutcome::Equipped { slot, displaced } => {
                let mut rows = Vec::with_capacity(displaced.len() + 1);
                let mut previous = Vec::with_capacity(displaced.len() + 1);
                if let Some(worn) = self.equipment.get(slot).clone() {
                    previous.push(self.item_row(worn.clone(), None));
                    rows.push(self.item_row(worn, Some(slot)));
                }
                for item in displaced {
                    let old_slot = before
                        .iter()
                        .find(|(_, id)| *id == item.id)
                        .map(|(slot, _)| *slot);
                    if let Some(old_slot) = old_slot {
                        self.emit(SessionEvent::ItemUnequipped {
                            item_id: item.id,
                            slot: old_slot,
                        });
                    }
                    previous.push(self.item_row(item.clone(), old_slot));
                    rows.push(self.item_row(item.clone(), None));
                    self.bag.push(item);
                }
                self.outbox
                    .push_back(PersistenceCommand::UpdateItems { rows, previous });
                self.emit(SessionEvent::ItemEquipped { item_id, slot });
                ToggleResult::Equipped(slot)
            }
            EquipOutcome::Ignored(item) => {
                self.bag.insert(pos, item);
                ToggleResult::Ignored
            }
            EquipOutcome::Rejected { item, reason } => {
                self.bag.insert(pos, item);
                self.emit(SessionEvent::EquipRejected { item_id, reason });
                ToggleResult::Rejected(reason)
            }
        }
    }

    fn unequip_slot(&mut self, slot: EquipmentSlot) -> ToggleResult {
        let Some(item) = self.equipment.unequip(slot) else {
            return ToggleResult::NotFound;
        };
        let rows = vec![self.item_row(item.clone(), None)];
        let previous = vec![self.item_row(item.clone(), Some(slot))];
        self.outbox
            .push_back(PersistenceCommand::UpdateItems { rows, previous });
        self.emit(SessionEvent::ItemUnequipped {
            item_id: item.id,
            slot,
        });
        self.bag.push(item);
        ToggleResult::Unequipped(slot)
    }

    /// Pull health and mana back under the current maximums.
    fn clamp_resources(&mut self) {
        let derived = self.derived_stats();
        let health = self.character.health.min(derived.max_health);
        let mana = self.character.mana.min(derived.max_mana);
        if health != self.character.health || mana != self.character.mana {
            self.character.health = health;
            self.character.mana = mana;
            self.mark_character_dirty();
        }
    }

    fn queue_delete(&mut self, item: Item, credit: CharacterCredit) {
        let removed = vec![self.item_row(item, None)];
        self.outbox
            .push_back(PersistenceCommand::DeleteItems { removed, credit });
        self.mark_character_dirty();
    }

    pub(super) fn item_row(&self, item: Item, slot: Option<EquipmentSlot>) -> ItemRow {
        ItemRow {
            character_id: self.character.id,
            item,
            slot,
        }
    }

    /// Remove an item from wherever it currently is.
    pub(super) fn take_item(&mut self, item_id: Uuid) -> Option<Item> {
        if let Some(slot) = self.equipment.slot_of(item_id) {
            return self.equipment.unequip(slot);
        }
        let pos = self.bag.iter().position(|item| item.id == item_id)?;
        Some(self.bag.remove(pos))
    }
}
