//! # Spawn Registry
//!
//! The live population of the current zone, keyed by spawn id.

use seq_core::{Point3, SpawnId};
use seq_protocol::{spawn_type, SpawnInfo};
use serde::Serialize;
use std::collections::HashMap;

/// One spawn as currently known
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveSpawn {
    pub id: SpawnId,
    pub name: String,
    pub last_name: String,
    pub position: Point3,
    /// See [`spawn_type`]
    pub kind: u8,
    pub level: u8,
    pub race: i32,
    pub class: u8,
    pub cur_hp: i32,
    pub max_hp: i32,
    pub pet_owner: Option<SpawnId>,
}

impl LiveSpawn {
    pub fn from_info(info: &SpawnInfo) -> Self {
        Self {
            id: info.id(),
            name: info.name.clone(),
            last_name: info.last_name.clone(),
            position: info.position(),
            kind: info.npc,
            level: info.level,
            race: info.race,
            class: info.class,
            cur_hp: info.cur_hp,
            max_hp: info.max_hp,
            pet_owner: u32::try_from(info.pet_owner_id)
                .ok()
                .filter(|&owner| owner != 0)
                .map(SpawnId::new),
        }
    }

    #[inline]
    pub fn is_npc(&self) -> bool {
        self.kind == spawn_type::NPC
    }

    #[inline]
    pub fn is_corpse(&self) -> bool {
        matches!(self.kind, spawn_type::NPC_CORPSE | spawn_type::PLAYER_CORPSE)
    }
}

/// Spawn Registry
///
/// # Purpose
/// Tracks every spawn in the zone and provides lookup and lifecycle
/// updates. Cleared whenever the player changes zone.
#[derive(Debug, Default)]
pub struct SpawnRegistry {
    /// Key: spawn id
    spawns: HashMap<SpawnId, LiveSpawn>,
}

impl SpawnRegistry {
    /// Create an empty registry
    #[inline]
    pub fn new() -> Self {
        tracing::debug!("Creating SpawnRegistry");
        Self::default()
    }

    /// Add or replace a spawn
    ///
    /// # Returns
    /// The stored entry
    pub fn add_spawn(&mut self, info: &SpawnInfo) -> &LiveSpawn {
        let spawn = LiveSpawn::from_info(info);
        tracing::trace!("Adding spawn {} '{}'", spawn.id, spawn.name);
        let id = spawn.id;
        self.spawns.insert(id, spawn);
        &self.spawns[&id]
    }

    /// Remove a spawn
    ///
    /// # Returns
    /// The removed entry, if it was known
    #[inline]
    pub fn remove_spawn(&mut self, id: SpawnId) -> Option<LiveSpawn> {
        tracing::trace!("Removing spawn {}", id);
        self.spawns.remove(&id)
    }

    /// Turn a spawn into its corpse
    ///
    /// # Returns
    /// The spawn as it was before dying, if it was known and alive
    pub fn kill_spawn(&mut self, id: SpawnId) -> Option<LiveSpawn> {
        let spawn = self.spawns.get_mut(&id)?;
        let corpse_kind = match spawn.kind {
            spawn_type::NPC => spawn_type::NPC_CORPSE,
            spawn_type::PLAYER | spawn_type::MYSELF => spawn_type::PLAYER_CORPSE,
            _ => return None,
        };
        let before = spawn.clone();
        spawn.kind = corpse_kind;
        spawn.cur_hp = 0;
        Some(before)
    }

    /// Move a spawn
    pub fn update_position(&mut self, id: SpawnId, position: Point3) -> bool {
        match self.spawns.get_mut(&id) {
            Some(spawn) => {
                spawn.position = position;
                true
            }
            None => false,
        }
    }

    /// Record new hit points
    pub fn update_hp(&mut self, id: SpawnId, cur_hp: i32, max_hp: i32) -> bool {
        match self.spawns.get_mut(&id) {
            Some(spawn) => {
                spawn.cur_hp = cur_hp;
                spawn.max_hp = max_hp;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn get(&self, id: SpawnId) -> Option<&LiveSpawn> {
        self.spawns.get(&id)
    }

    /// Number of tracked spawns, corpses included
    #[inline]
    pub fn len(&self) -> usize {
        self.spawns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spawns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LiveSpawn> {
        self.spawns.values()
    }

    /// Forget everything
    pub fn clear(&mut self) {
        tracing::debug!("Clearing {} spawns", self.spawns.len());
        self.spawns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn npc(id: u16, name: &str) -> SpawnInfo {
        SpawnInfo {
            spawn_id: id,
            name: name.into(),
            npc: spawn_type::NPC,
            x: 100,
            y: 200,
            z: 5,
            cur_hp: 100,
            max_hp: 100,
            ..Default::default()
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = SpawnRegistry::new();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_add_remove_spawn() {
        let mut registry = SpawnRegistry::new();
        let added = registry.add_spawn(&npc(7, "a_rat")).clone();
        assert_eq!(added.position, Point3::new(100, 200, 5));
        assert_eq!(registry.len(), 1);

        assert!(registry.remove_spawn(SpawnId::new(7)).is_some());
        assert!(registry.remove_spawn(SpawnId::new(7)).is_none());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_kill_spawn_leaves_corpse() {
        let mut registry = SpawnRegistry::new();
        registry.add_spawn(&npc(7, "a_rat"));

        let before = registry.kill_spawn(SpawnId::new(7)).unwrap();
        assert!(before.is_npc());

        let corpse = registry.get(SpawnId::new(7)).unwrap();
        assert!(corpse.is_corpse());
        assert_eq!(corpse.cur_hp, 0);

        assert!(registry.kill_spawn(SpawnId::new(7)).is_none());
    }

    #[test]
    fn test_pet_owner() {
        let mut info = npc(8, "Gobaner");
        info.pet_owner_id = 3;
        assert_eq!(LiveSpawn::from_info(&info).pet_owner, Some(SpawnId::new(3)));
        assert_eq!(LiveSpawn::from_info(&npc(9, "x")).pet_owner, None);
    }

    #[test]
    fn test_updates() {
        let mut registry = SpawnRegistry::new();
        registry.add_spawn(&npc(7, "a_rat"));

        assert!(registry.update_position(SpawnId::new(7), Point3::new(1, 2, 3)));
        assert!(registry.update_hp(SpawnId::new(7), 40, 100));
        assert!(!registry.update_hp(SpawnId::new(99), 1, 1));

        let rat = registry.get(SpawnId::new(7)).unwrap();
        assert_eq!(rat.position, Point3::new(1, 2, 3));
        assert_eq!(rat.cur_hp, 40);
    }
}
