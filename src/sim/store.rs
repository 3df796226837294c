//! Entity storage
//!
//! Holds at most one player and a set of enemies keyed by unique id.
//! Enemies are kept sorted by id so iteration is stable across runs.

use serde::{Deserialize, Serialize};

use super::state::{EnemyEntity, EnemyId, PlayerEntity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityStore {
    player: Option<PlayerEntity>,
    /// Sorted by id
    enemies: Vec<EnemyEntity>,
    next_id: u32,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            player: None,
            enemies: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new enemy ID
    pub fn next_enemy_id(&mut self) -> EnemyId {
        let id = EnemyId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Insert an enemy. Returns false (and drops it) if the id is taken.
    pub fn add_enemy(&mut self, enemy: EnemyEntity) -> bool {
        match self.enemies.binary_search_by_key(&enemy.id, |e| e.id) {
            Ok(_) => {
                debug_assert!(false, "duplicate enemy id {:?}", enemy.id);
                log::warn!("Ignoring enemy with duplicate id {:?}", enemy.id);
                false
            }
            Err(index) => {
                // Keep the allocator ahead of externally built ids
                self.next_id = self.next_id.max(enemy.id.0.saturating_add(1));
                self.enemies.insert(index, enemy);
                true
            }
        }
    }

    pub fn remove_enemy(&mut self, id: EnemyId) -> Option<EnemyEntity> {
        let index = self.enemies.binary_search_by_key(&id, |e| e.id).ok()?;
        Some(self.enemies.remove(index))
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&EnemyEntity> {
        let index = self.enemies.binary_search_by_key(&id, |e| e.id).ok()?;
        self.enemies.get(index)
    }

    pub fn list_enemies(&self) -> &[EnemyEntity] {
        &self.enemies
    }

    /// Update every enemy in id order
    ///
    /// Ids are the sort key, so a changed id is put back.
    pub fn update_enemies(&mut self, mut update: impl FnMut(&mut EnemyEntity)) {
        for enemy in &mut self.enemies {
            let id = enemy.id;
            update(enemy);
            if enemy.id != id {
                debug_assert!(false, "enemy id changed from {:?} to {:?}", id, enemy.id);
                log::warn!("Ignoring id change on enemy {:?}", id);
                enemy.id = id;
            }
        }
    }

    /// Snapshot of current ids, safe to hold while removing enemies
    pub fn enemy_ids(&self) -> Vec<EnemyId> {
        self.enemies.iter().map(|e| e.id).collect()
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn player(&self) -> Option<&PlayerEntity> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut PlayerEntity> {
        self.player.as_mut()
    }

    pub fn set_player(&mut self, player: PlayerEntity) {
        self.player = Some(player);
    }

    /// Drop every entity and restart id allocation
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
