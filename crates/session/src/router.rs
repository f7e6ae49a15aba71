//! # Record Router
//!
//! Routes decoded records to the zone manager, the spawn registry and the
//! spawn monitor. Records arrive one at a time, already split from the
//! stream and with their direction known.
//!
//! The zone manager drives the spawn side: a server zone change clears the
//! registry and closes out the old zone's spawn points, and the end of a
//! zone transition loads the new zone's points.

use seq_config::SeqConfig;
use seq_core::{Direction, SeqError, SpawnId};
use seq_protocol::{
    CorpseLoc, DeleteSpawn, HpUpdate, ItemInShop, MessageKind, NewCorpse, NewSpawn, OpCode,
    PlayerBook, PlayerContainer, PlayerItem, PlayerPos, ProfileLayout, ServerZoneEntry,
    SpawnInfo, TimeOfDay, WireRecord, ZoneSpawns,
};
use seq_spawns::{Clock, SpawnMonitor, SpawnRegistry};
use seq_zones::ZoneMgr;
use serde::Serialize;
use std::sync::Arc;

/// What the router did with a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Handled,
    /// Not a record this router understands
    Ignored,
}

/// Running totals over a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub handled: u64,
    pub ignored: u64,
    pub failed: u64,
}

/// One observed play session
pub struct Session {
    zones: ZoneMgr,
    registry: SpawnRegistry,
    monitor: SpawnMonitor,
    stats: SessionStats,
}

impl Session {
    /// Build a session from configuration
    ///
    /// # Errors
    /// `SeqError::Config` if the configured profile layout tag is unknown
    pub fn new(config: &SeqConfig, clock: Arc<dyn Clock>) -> Result<Self, SeqError> {
        let layout = ProfileLayout::by_tag(&config.profile_layout).ok_or_else(|| {
            SeqError::Config(format!("unknown profile layout '{}'", config.profile_layout))
        })?;


        Ok(Self {
            zones: ZoneMgr::new(config.zone(), *layout),
            registry: SpawnRegistry::new(),
            monitor: SpawnMonitor::new(config.spawns(), clock),
            stats: SessionStats::default(),
        })
    }

    /// Route one record
    ///
    /// # Arguments
    /// * `opcode` - The record's opcode, already stripped from `payload`
    /// * `direction` - Which side sent it
    /// * `payload` - Record body
    ///
    /// # Returns
    /// `Ignored` for opcodes with no known layout. A record that fails to
    /// decode is an error and changes nothing.
    pub fn dispatch(
        &mut self,
        opcode: OpCode,
        direction: Direction,
        payload: &[u8],
    ) -> Result<Outcome, SeqError> {
        let Some(kind) = MessageKind::from_opcode(opcode) else {
            tracing::trace!("Ignoring opcode {} ({} bytes)", opcode, payload.len());
            self.stats.ignored += 1;
            return Ok(Outcome::Ignored);
        };

        tracing::trace!("{} {} ({} bytes)", direction.as_str(), kind, payload.len());
        match self.route(kind, direction, payload) {
            Ok(()) => {
                self.stats.handled += 1;
                Ok(Outcome::Handled)
            }
            Err(e) => {
                self.stats.failed += 1;
                Err(e)
            }
        }
    }

    /// Route a record that still carries its two opcode bytes
    pub fn dispatch_raw(&mut self, record: &[u8], direction: Direction) -> Result<Outcome, SeqError> {
        match OpCode::from_prefix(record) {
            Some(opcode) => self.dispatch(opcode, direction, &record[2..]),
            None => {
                self.stats.ignored += 1;
                Ok(Outcome::Ignored)
            }
        }
    }

    fn route(&mut self, kind: MessageKind, direction: Direction, payload: &[u8]) -> Result<(), SeqError> {
        match kind {
            //=== Zone ===//
            MessageKind::ZoneEntry => match direction {
                Direction::Client => self.zones.zone_entry_client(payload, direction)?,
                Direction::Server => {
                    let entry = ServerZoneEntry::decode(payload)?;
                    tracing::debug!("Player '{}' level {} entering", entry.name, entry.level);
                }
            },
            MessageKind::CharProfile => {
                self.zones.zone_player(payload)?;
            }
            MessageKind::ZoneChange => {
                self.zones.zone_change(payload, direction)?;
                if direction == Direction::Server {
                    self.registry.clear();
                    self.monitor.zone_changed(self.zones.short_name());
                }
            }
            MessageKind::NewZone => {
                self.zones.zone_new(payload)?;
                self.monitor.zone_end(self.zones.short_name());
            }
            MessageKind::ZonePoints => self.zones.zone_points(payload)?,
            MessageKind::DzSwitch => self.zones.dynamic_zone_switch(payload)?,
            MessageKind::DzInfo => self.zones.dynamic_zone_info(payload)?,

            //=== Spawns ===//
            MessageKind::NewSpawn => {
                let record = NewSpawn::decode(payload)?;
                self.spawn_appeared(&record.spawn);
            }
            MessageKind::ZoneSpawns => {
                let record = ZoneSpawns::decode(payload)?;
                for spawn in &record.spawns {
                    self.spawn_appeared(spawn);
                }
            }
            MessageKind::DeleteSpawn => {
                let record = DeleteSpawn::decode(payload)?;
                self.registry.remove_spawn(SpawnId::new(record.spawn_id));
            }
            MessageKind::NewCorpse => {
                let record = NewCorpse::decode(payload)?;
                let id = SpawnId::new(record.spawn_id);
                self.registry.kill_spawn(id);
                self.monitor.kill_spawn(id);
            }
            MessageKind::PlayerPos => {
                let record = PlayerPos::decode(payload)?;
                let position = seq_core::Point3::new(record.x.into(), record.y.into(), record.z.into());
                self.registry
                    .update_position(SpawnId::from(record.spawn_id), position);
            }
            MessageKind::HpUpdate => {
                let record = HpUpdate::decode(payload)?;
                self.registry.update_hp(
                    SpawnId::from(record.spawn_id),
                    record.cur_hp.into(),
                    record.max_hp.into(),
                );
            }
            MessageKind::CorpseLoc => {
                let record = CorpseLoc::decode(payload)?;
                tracing::debug!(
                    "Corpse {} at ({}, {}, {})",
                    record.spawn_id,
                    record.x,
                    record.y,
                    record.z
                );
            }
            MessageKind::TimeOfDay => {
                let record = TimeOfDay::decode(payload)?;
                tracing::debug!("Time of day: {:?}", record);
            }

            //=== Items ===//
            MessageKind::ItemInShop => {
                let record = ItemInShop::decode(payload)?;
                tracing::debug!("Shop item '{}'", record.item.base().name);
            }
            MessageKind::PlayerItem => {
                let record = PlayerItem::decode(payload)?;
                tracing::debug!("Item '{}'", record.item.base.name);
            }
            MessageKind::PlayerBook => {
                let record = PlayerBook::decode(payload)?;
                tracing::debug!("Book '{}'", record.book.base.name);
            }
            MessageKind::PlayerContainer => {
                let record = PlayerContainer::decode(payload)?;
                tracing::debug!("Container '{}'", record.container.base.name);
            }
        }
        Ok(())
    }

    fn spawn_appeared(&mut self, info: &SpawnInfo) {
        let spawn = self.registry.add_spawn(info);
        if !spawn.is_npc() || spawn.pet_owner.is_some() {
            return;
        }
        self.monitor.new_spawn(spawn.id, &spawn.name, spawn.position);
    }

    //=== Accessors ===//

    pub fn zones(&self) -> &ZoneMgr {
        &self.zones
    }

    /// Mutable access, for subscribing to zone events
    pub fn zones_mut(&mut self) -> &mut ZoneMgr {
        &mut self.zones
    }

    pub fn registry(&self) -> &SpawnRegistry {
        &self.registry
    }

    pub fn monitor(&self) -> &SpawnMonitor {
        &self.monitor
    }

    /// Mutable access, for subscribing to spawn point events
    pub fn monitor_mut(&mut self) -> &mut SpawnMonitor {
        &mut self.monitor
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Save anything unsaved; call before dropping the session
    pub fn flush(&mut self) {
        if self.monitor.is_modified() {
            self.monitor.save_spawn_points();
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("zones", &self.zones)
            .field("spawns", &self.registry.len())
            .field("stats", &self.stats)
            .finish()
    }
}
