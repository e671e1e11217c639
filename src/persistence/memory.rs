//! In-memory persistence backend for tests and the simulator.

use super::{CharacterPatch, CommandKind, ItemRow, Persistence};
use crate::error::PersistenceError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;
use uuid::Uuid;

/// In-memory store with failure injection.
///
/// Failures queued with [`MemoryStore::fail_next`] are consumed by the next call
/// of the matching kind; [`MemoryStore::set_offline`] fails every call.
#[derive(Debug, Default)]
pub struct MemoryStore {
    characters: Mutex<HashMap<Uuid, CharacterPatch>>,
    items: Mutex<HashMap<Uuid, ItemRow>>,
    injected: Mutex<Vec<(CommandKind, PersistenceError)>>,
    offline: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the character row that later updates target.
    pub async fn register_character(&self, id: Uuid, patch: CharacterPatch) {
        self.characters.lock().await.insert(id, patch);
    }

    pub async fn fail_next(&self, kind: CommandKind, error: PersistenceError) {
        self.injected.lock().await.push((kind, error));
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Relaxed);
    }

    /// Successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    pub async fn character(&self, id: Uuid) -> Option<CharacterPatch> {
        self.characters.lock().await.get(&id).cloned()
    }

    pub async fn item(&self, id: Uuid) -> Option<ItemRow> {
        self.items.lock().await.get(&id).cloned()
    }

    pub async fn item_count(&self) -> usize {
        self.items.lock().await.len()
    }

    async fn check(&self, kind: CommandKind) -> Result<(), PersistenceError> {
        if self.offline.load(Ordering::Relaxed) {
            return Err(PersistenceError::Unavailable("store offline".to_string()));
        }
        let mut injected = self.injected.lock().await;
        if let Some(pos) = injected.iter().position(|(k, _)| *k == kind) {
            let (_, error) = injected.remove(pos);
            return Err(error);
        }
        Ok(())
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }
}

#[async_trait]
impl Persistence for MemoryStore {
    async fn load_items(&self, character_id: Uuid) -> Result<Vec<ItemRow>, PersistenceError> {
        if self.offline.load(Ordering::Relaxed) {
            return Err(PersistenceError::Unavailable("store offline".to_string()));
        }
        let items = self.items.lock().await;
        let mut rows: Vec<ItemRow> = items
            .values()
            .filter(|row| row.character_id == character_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.item.id);
        Ok(rows)
    }

    async fn insert_items(&self, rows: &[ItemRow]) -> Result<(), PersistenceError> {
        self.check(CommandKind::InsertItems).await?;
        let mut items = self.items.lock().await;
        for row in rows {
            items.insert(row.item.id, row.clone());
        }
        self.record_write();
        Ok(())
    }

    async fn update_items(&self, rows: &[ItemRow]) -> Result<(), PersistenceError> {
        self.check(CommandKind::UpdateItems).await?;
        let mut items = self.items.lock().await;
        if let Some(missing) = rows.iter().find(|row| !items.contains_key(&row.item.id)) {
            return Err(PersistenceError::Rejected(format!(
                "item {} does not exist",
                missing.item.id
            )));
        }
        for row in rows {
            items.insert(row.item.id, row.clone());
        }
        self.record_write();
        Ok(())
    }

    async fn update_character(
        &self,
        id: Uuid,
        patch: &CharacterPatch,
    ) -> Result<(), PersistenceError> {
        self.check(CommandKind::UpdateCharacter).await?;
        let mut characters = self.characters.lock().await;
        match characters.get_mut(&id) {
            Some(existing) => {
                *existing = patch.clone();
                self.record_write();
                Ok(())
            }
            None => Err(PersistenceError::CharacterNotFound(id)),
        }
    }

    async fn delete_items(&self, ids: &[Uuid]) -> Result<(), PersistenceError> {
        self.check(CommandKind::DeleteItems).await?;
        let mut items = self.items.lock().await;
        for id in ids {
            items.remove(id);
        }
        self.record_write();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::types::Character;
    use crate::items::generation::fallback_item;

    fn row(character_id: Uuid) -> ItemRow {
        ItemRow {
            character_id,
            item: fallback_item(1, &mut rand::thread_rng()),
            slot: None,
        }
    }

    #[tokio::test]
    async fn test_insert_load_delete() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let a = row(owner);
        let b = row(Uuid::new_v4());
        store.insert_items(&[a.clone(), b]).await.unwrap();

        let loaded = store.load_items(owner).await.unwrap();
        assert_eq!(loaded, vec![a.clone()]);

        store.delete_items(&[a.item.id]).await.unwrap();
        assert!(store.load_items(owner).await.unwrap().is_empty());
        assert_eq!(store.item_count().await, 1);
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn test_update_unknown_character_fails() {
        let store = MemoryStore::new();
        let character = Character::new("Ghost");
        let patch = CharacterPatch::from_character(&character);
        let err = store.update_character(character.id, &patch).await.unwrap_err();
        assert_eq!(err, PersistenceError::CharacterNotFound(character.id));

        store.register_character(character.id, patch.clone()).await;
        assert!(store.update_character(character.id, &patch).await.is_ok());
    }

    #[tokio::test]
    async fn test_injected_failure_is_one_shot_and_kind_specific() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        store
            .fail_next(
                CommandKind::InsertItems,
                PersistenceError::Rejected("quota".to_string()),
            )
            .await;

        assert!(store.delete_items(&[]).await.is_ok());
        assert!(store.insert_items(&[row(owner)]).await.is_err());
        assert!(store.insert_items(&[row(owner)]).await.is_ok());
    }

    #[tokio::test]
    async fn test_offline_fails_everything() {
        let store = MemoryStore::new();
        store.set_offline(true);
        assert!(matches!(
            store.load_items(Uuid::new_v4()).await,
            Err(PersistenceError::Unavailable(_))
        ));
        assert!(store.delete_items(&[]).await.is_err());
        store.set_offline(false);
        assert!(store.delete_items(&[]).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_items_rejects_missing_rows() {
        let store = MemoryStore::new();
        let r = row(Uuid::new_v4());
        assert!(matches!(
            store.update_items(&[r.clone()]).await,
            Err(PersistenceError::Rejected(_))
        ));
        store.insert_items(&[r.clone()]).await.unwrap();
        let mut worn = r;
        worn.slot = Some(crate::items::types::EquipmentSlot::Trinket);
        store.update_items(&[worn.clone()]).await.unwrap();
        assert_eq!(store.item(worn.item.id).await, Some(worn));
    }
}
