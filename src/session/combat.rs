use super::{Session, SessionEvent};
use crate::combat::logic::{resolve, resolve_counter_attack};
use crate::combat::types::AttackResult;
use crate::items::drops::{generate_loot, LootRequest};
use crate::persistence::{ItemRow, PersistenceCommand};
use crate::progression::ledger::apply_kill;
use rand::Rng;
use std::time::Duration;

impl<R: Rng> Session<R> {
    /// Strike the current enemy.
    ///
    /// A counter-attack still pending from the previous strike lands first.
    /// Returns `None` when there is nothing to hit, including when that
    /// counter-attack defeated the player.
    pub fn attack(&mut self) -> Option<AttackResult> {
        if self.counter_due.is_some() && self.fire_counter_attack() {
            return None;
        }

        let derived = self.derived_stats();
        let health = self.character.health;
        let encounter = self.encounter.as_mut().filter(|e| e.enemy.is_alive())?;
        let result = resolve(
            &derived.snapshot(health),
            &encounter.enemy.defense_snapshot(),
            derived.weapon.as_ref(),
            derived.flat_damage,
            derived.damage_percent,
            &mut self.rng,
        );
        encounter.enemy.health = result.defender_life_after;
        self.emit(SessionEvent::PlayerAttacked(result));

        if result.killed {
            self.resolve_kill();
        } else {
            self.counter_due = Some(self.clock + self.config.counter_attack_delay());
        }
        Some(result)
    }

    /// Advance session time, landing the counter-attack once it is due.
    pub fn tick(&mut self, delta: Duration) {
        self.clock += delta;
        if self.counter_due.is_some_and(|due| self.clock >= due) {
            self.fire_counter_attack();
        }
    }

    /// Land the pending counter-attack. Returns whether it defeated the player.
    fn fire_counter_attack(&mut self) -> bool {
        self.counter_due = None;
        let Some(encounter) = self.encounter.as_ref().filter(|e| e.enemy.is_alive()) else {
            return false;
        };
        let derived = self.derived_stats();
        let result = resolve_counter_attack(
            &encounter.enemy,
            self.character.health,
            derived.evasion,
            derived.armor,
            &mut self.rng,
        );
        self.character.health = result.defender_life_after;
        self.emit(SessionEvent::CounterAttacked(result));
        self.mark_character_dirty();

        if result.killed {
            self.resolve_defeat();
        }
        result.killed
    }

    fn resolve_defeat(&mut self) {
        let gold_lost = self.character.gold - self.character.gold / 2;
        self.character.gold /= 2;
        self.character.health = self.max_health();
        tracing::info!(
            character = %self.character.id,
            floor = self.floor_map.floor,
            gold_lost,
            "player defeated"
        );
        self.emit(SessionEvent::PlayerDefeated { gold_lost });
        self.mark_character_dirty();

        if let Some(encounter) = self.encounter.take() {
            self.spawn_encounter(encounter.spawned_as, encounter.drop_context);
        }
    }

    fn resolve_kill(&mut self) {
        let Some(encounter) = self.encounter.take() else {
            return;
        };
        self.counter_due = None;
        let enemy = encounter.enemy;

        let outcome = apply_kill(&mut self.character, &enemy);
        if outcome.leveled_up {
            self.character.health = self.max_health();
            self.character.mana = self.max_mana();
            self.emit(SessionEvent::LeveledUp {
                level: outcome.level_after,
            });
        }
        self.heat.raise_for_kill(enemy.rarity);

        let request = LootRequest {
            context: encounter.drop_context,
            enemy_rarity: enemy.rarity,
            enemy_level: enemy.level,
            zone_heat: self.heat.get(),
        };
        let drops = generate_loot(&request, &self.config.excluded_rarities, &mut self.rng);
        let mut rows = Vec::with_capacity(drops.len());
        for item in drops {
            if item.rarity >= self.config.notify_threshold {
                self.notifier.notify_drop(item.rarity, &item.name);
            }
            self.emit(SessionEvent::ItemDropped {
                item_id: item.id,
                name: item.name.clone(),
                rarity: item.rarity,
            });
            rows.push(ItemRow {
                character_id: self.character.id,
                item: item.clone(),
                slot: None,
            });
            self.bag.push(item);
        }
        if !rows.is_empty() {
            self.outbox.push_back(PersistenceCommand::InsertItems(rows));
        }
        self.mark_character_dirty();

        if let Some(room) = self.floor_map.room_mut(self.current_room_id) {
            room.cleared = true;
        }
        tracing::debug!(
            enemy = %enemy.name,
            experience = outcome.experience_gained,
            gold = outcome.gold_gained,
            "enemy killed"
        );
        self.emit(SessionEvent::EnemyKilled {
            enemy_name: enemy.name,
            rarity: enemy.rarity,
            experience: outcome.experience_gained,
            gold: outcome.gold_gained,
        });
    }
}
