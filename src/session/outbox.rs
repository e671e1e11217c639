use super::{Session, SessionEvent};
use crate::error::PersistenceError;
use crate::items::types::Item;
use crate::persistence::{CharacterPatch, FlushFailure, FlushReport, ItemRow, PersistenceCommand};
use rand::Rng;
use std::sync::Arc;
use uuid::Uuid;

impl<R: Rng> Session<R> {
    /// Write queued changes to storage, oldest first.
    ///
    /// A failed command does not stop the flush. Its in-memory effect is
    /// undone where possible and the failure is reported.
    pub async fn flush(&mut self) -> FlushReport {
        let persistence = Arc::clone(&self.persistence);
        let mut report = FlushReport::default();

        while let Some(command) = self.outbox.pop_front() {
            let kind = command.kind();
            let outcome = match &command {
                PersistenceCommand::InsertItems(rows) => persistence.insert_items(rows).await,
                PersistenceCommand::UpdateItems { rows, .. } => persistence.update_items(rows).await,
                PersistenceCommand::UpdateCharacter(id) => {
                    let patch = CharacterPatch::from_character(&self.character);
                    let outcome = persistence.update_character(*id, &patch).await;
                    if outcome.is_ok() {
                        self.persisted = patch;
                    }
                    outcome
                }
                PersistenceCommand::DeleteItems { removed, .. } => {
                    let ids: Vec<Uuid> = removed.iter().map(|row| row.item.id).collect();
                    persistence.delete_items(&ids).await
                }
            };

            match outcome {
                Ok(()) => report.applied += 1,
                Err(error) => {
                    let compensated = self.compensate(command);
                    tracing::warn!(
                        character = %self.character.id,
                        ?kind,
                        %error,
                        compensated,
                        "persistence command failed"
                    );
                    self.emit(SessionEvent::PersistenceFailed {
                        kind,
                        error: error.to_string(),
                    });
                    report.failures.push(FlushFailure {
                        kind,
                        error,
                        compensated,
                    });
                }
            }
        }

        if !report.is_clean() {
            tracing::debug!(
                applied = report.applied,
                failed = report.failures.len(),
                "flush finished with failures"
            );
        }
        report
    }

    /// Replace equipment and bag with what storage holds for this character.
    /// Returns the number of items loaded.
    pub async fn load_inventory(&mut self) -> Result<usize, PersistenceError> {
        let rows = self.persistence.load_items(self.character.id).await?;
        let count = rows.len();
        self.equipment = Default::default();
        self.bag.clear();
        for row in rows {
            self.place(row);
        }
        tracing::debug!(character = %self.character.id, count, "inventory loaded");
        Ok(count)
    }

    /// Undo the in-memory effect of a command storage refused.
    fn compensate(&mut self, command: PersistenceCommand) -> bool {
        match command {
            PersistenceCommand::InsertItems(rows) => {
                for row in &rows {
                    self.take_item(row.item.id);
                }
                true
            }
            PersistenceCommand::UpdateItems { previous, .. } => {
                for row in previous {
                    if let Some(item) = self.take_item(row.item.id) {
                        self.place(ItemRow { item, ..row });
                    }
                }
                true
            }
            PersistenceCommand::UpdateCharacter(_) => {
                // A later write in this flush carries the same state.
                let retried = self
                    .outbox
                    .iter()
                    .any(|queued| matches!(queued, PersistenceCommand::UpdateCharacter(_)));
                if retried {
                    return false;
                }
                self.persisted.apply_to(&mut self.character);
                true
            }
            PersistenceCommand::DeleteItems { removed, credit } => {
                for row in removed {
                    self.place(ItemRow { slot: None, ..row });
                }
                self.character.gold = self.character.gold.saturating_sub(credit.gold);
                self.character.health = self.character.health.saturating_sub(credit.health).max(1);
                self.character.mana = self.character.mana.saturating_sub(credit.mana);
                true
            }
        }
    }

    /// Put an item into its recorded slot (bumping any occupant to the bag)
    /// or into the bag.
    fn place(&mut self, row: ItemRow) {
        let mut item: Item = row.item;
        match row.slot {
            Some(slot) => {
                if let Some(occupant) = self.equipment.unequip(slot) {
                    self.bag.push(occupant);
                }
                item.equipped = true;
                self.equipment.set(slot, Some(item));
            }
            None => {
                item.equipped = false;
                self.bag.push(item);
            }
        }
    }
}
