//! # Spawn Monitor
//!
//! Infers spawn points from a lossy stream of appear and death events.
//!
//! Every new location becomes a *candidate*. When the occupant of a
//! candidate dies, the location is promoted to a *confirmed* spawn point.
//! The next appearance at a confirmed point measures the respawn interval
//! as the time since that death.
//!
//! Locations are keyed by whole-unit coordinates, so unrelated mobs that
//! pass through the same spot share a point. Points are never expired.

use crate::clock::Clock;
use crate::spawn_point::SpawnPoint;
use crate::store::{load_spawn_points, save_spawn_points};
use seq_config::SpawnConfig;
use seq_core::{EventBus, Point3, SpatialKey, SpawnId};
use std::collections::HashMap;
use std::sync::Arc;

/// Spawn point notifications
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnPointEvent {
    /// A point was confirmed or loaded
    NewSpawnPoint(SpawnPoint),
    /// Both collections were emptied
    ClearSpawnPoints,
}

/// Spawn point tracker
pub struct SpawnMonitor {
    config: SpawnConfig,
    clock: Arc<dyn Clock>,
    zone_name: String,
    candidates: HashMap<SpatialKey, SpawnPoint>,
    confirmed: HashMap<SpatialKey, SpawnPoint>,
    modified: bool,
    events: EventBus<SpawnPointEvent>,
}

impl SpawnMonitor {
    /// Create an empty tracker
    ///
    /// # Arguments
    /// * `config` - Where spawn-point files live
    /// * `clock` - Time source for all timestamps
    pub fn new(config: SpawnConfig, clock: Arc<dyn Clock>) -> Self {
        tracing::debug!("Creating SpawnMonitor");
        Self {
            config,
            clock,
            zone_name: String::new(),
            candidates: HashMap::new(),
            confirmed: HashMap::new(),
            modified: false,
            events: EventBus::new(),
        }
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&SpawnPointEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(listener);
    }

    /// A spawn appeared at `position`
    pub fn new_spawn(&mut self, id: SpawnId, name: &str, position: Point3) {
        let key = position.key();
        let now = self.clock.now();

        if let Some(sp) = self.candidates.get_mut(&key) {
            sp.occupy(id, name, now);
        } else if let Some(sp) = self.confirmed.get_mut(&key) {
            if let Some(death) = sp.death_time {
                sp.interval = now - death;
            }
            sp.occupy(id, name, now);
            self.modified = true;
            tracing::trace!("Spawn point {} respawned after {}s", key, sp.interval);
        } else {
            self.candidates
                .insert(key, SpawnPoint::new(id, position, name, now));
        }
    }

    /// A spawn died
    ///
    /// Ids that match no live occupant are ignored.
    pub fn kill_spawn(&mut self, id: SpawnId) {
        let now = self.clock.now();

        let candidate = self
            .candidates
            .iter()
            .find(|(_, sp)| sp.last_id == Some(id))
            .map(|(key, _)| *key);

        if let Some(mut sp) = candidate.and_then(|key| self.candidates.remove(&key)) {
            sp.death_time = Some(now);
            sp.last_id = None;
            tracing::debug!("New spawn point {} ({})", sp.key, sp.last);
            self.confirmed.insert(sp.key, sp.clone());
            self.modified = true;
            self.events.emit(SpawnPointEvent::NewSpawnPoint(sp));
            return;
        }

        if let Some(sp) = self
            .confirmed
            .values_mut()
            .find(|sp| sp.last_id == Some(id))
        {
            sp.death_time = Some(now);
            sp.last_id = None;
            self.modified = true;
        }
    }

    /// Label a point
    ///
    /// # Returns
    /// `false` if no point has that key
    pub fn set_name(&mut self, key: SpatialKey, name: &str) -> bool {
        let sp = match self.confirmed.get_mut(&key) {
            Some(sp) => sp,
            None => match self.candidates.get_mut(&key) {
                Some(sp) => sp,
                None => return false,
            },
        };
        sp.name = name.to_string();
        self.modified = true;
        true
    }

    //=== Zone Hooks ===//

    /// The player is leaving the current zone
    pub fn zone_changed(&mut self, new_zone: &str) {
        if self.modified {
            self.save_spawn_points();
        }
        self.candidates.clear();
        self.confirmed.clear();
        self.modified = false;
        self.zone_name = new_zone.to_string();
        self.events.emit(SpawnPointEvent::ClearSpawnPoints);
    }

    /// The player finished entering a zone
    pub fn zone_end(&mut self, short_name: &str) {
        self.zone_name = short_name.to_string();
        self.load_spawn_points();
    }

    //=== Persistence ===//

    /// Write confirmed points for the current zone
    pub fn save_spawn_points(&mut self) {
        if !self.config.enabled || self.zone_name.is_empty() {
            return;
        }
        let path = self.config.file_for(&self.zone_name);
        match save_spawn_points(&path, self.confirmed.values()) {
            Ok(count) => {
                tracing::debug!("Saved {} spawn points to {:?}", count, path);
                self.modified = false;
            }
            Err(e) => tracing::warn!("Failure saving {:?}: {}", path, e),
        }
    }

    /// Merge the current zone's file into the confirmed set
    pub fn load_spawn_points(&mut self) {
        if !self.config.enabled || self.zone_name.is_empty() {
            return;
        }
        let path = self.config.file_for(&self.zone_name);
        if !path.exists() {
            tracing::debug!("No spawn points for {}", self.zone_name);
            return;
        }

        match load_spawn_points(&path) {
            Ok(points) => {
                tracing::info!("Loaded {} spawn points from {:?}", points.len(), path);
                for sp in points {
                    self.candidates.remove(&sp.key);
                    self.confirmed.insert(sp.key, sp.clone());
                    self.events.emit(SpawnPointEvent::NewSpawnPoint(sp));
                }
            }
            Err(e) => tracing::warn!("Failure loading {:?}: {}", path, e),
        }
    }

    //=== Accessors ===//

    pub fn candidates(&self) -> &HashMap<SpatialKey, SpawnPoint> {
        &self.candidates
    }

    pub fn spawn_points(&self) -> &HashMap<SpatialKey, SpawnPoint> {
        &self.confirmed
    }

    pub fn spawn_point(&self, key: SpatialKey) -> Option<&SpawnPoint> {
        self.confirmed.get(&key)
    }

    pub fn candidate(&self, key: SpatialKey) -> Option<&SpawnPoint> {
        self.candidates.get(&key)
    }

    #[inline]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    #[inline]
    pub fn zone_name(&self) -> &str {
        &self.zone_name
    }

    /// Current time from the tracker's clock
    #[inline]
    pub fn now(&self) -> i64 {
        self.clock.now()
    }
}

impl std::fmt::Debug for SpawnMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpawnMonitor")
            .field("zone_name", &self.zone_name)
            .field("candidates", &self.candidates.len())
            .field("confirmed", &self.confirmed.len())
            .field("modified", &self.modified)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use parking_lot::Mutex;

    const RAT_SPOT: Point3 = Point3::new(100, 200, 5);

    fn monitor(config: SpawnConfig) -> (SpawnMonitor, ManualClock, Arc<Mutex<Vec<SpawnPointEvent>>>) {
        let clock = ManualClock::new(1_000);
        let mut monitor = SpawnMonitor::new(config, Arc::new(clock.clone()));
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        monitor.subscribe(move |e| sink.lock().push(e.clone()));
        (monitor, clock, log)
    }

    #[test]
    fn test_appear_creates_candidate() {
        let (mut m, _, log) = monitor(SpawnConfig::default());
        m.new_spawn(SpawnId::new(1), "a_rat", RAT_SPOT);

        let sp = m.candidate(RAT_SPOT.key()).unwrap();
        assert_eq!(sp.count, 1);
        assert_eq!(sp.first_seen, 1_000);
        assert!(m.spawn_points().is_empty());
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_promotion_and_interval() {
        let (mut m, clock, log) = monitor(SpawnConfig::default());
        m.new_spawn(SpawnId::new(1), "a_rat", RAT_SPOT);

        clock.advance(30);
        m.kill_spawn(SpawnId::new(1));
        assert!(m.candidate(RAT_SPOT.key()).is_none());
        assert_eq!(log.lock().len(), 1);

        clock.advance(400);
        m.new_spawn(SpawnId::new(9), "a_rat", RAT_SPOT);

        let sp = m.spawn_point(RAT_SPOT.key()).unwrap();
        assert_eq!(sp.count, 2);
        assert_eq!(sp.interval, 400);
        assert_eq!(sp.secs_left(m.now()), Some(0));
        assert!(m.is_modified());
    }

    #[test]
    fn test_repeat_appear_on_candidate() {
        let (mut m, _, _) = monitor(SpawnConfig::default());
        m.new_spawn(SpawnId::new(1), "a_rat", RAT_SPOT);
        m.new_spawn(SpawnId::new(2), "a_large_rat", RAT_SPOT);

        let sp = m.candidate(RAT_SPOT.key()).unwrap();
        assert_eq!(sp.count, 2);
        assert_eq!(sp.last, "a_large_rat");
        assert!(m.spawn_points().is_empty());
    }

    #[test]
    fn test_unknown_death_ignored() {
        let (mut m, _, log) = monitor(SpawnConfig::default());
        m.new_spawn(SpawnId::new(1), "a_rat", RAT_SPOT);
        m.kill_spawn(SpawnId::new(2));

        assert!(m.candidate(RAT_SPOT.key()).is_some());
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_dead_occupant_not_matched_twice() {
        let (mut m, clock, _) = monitor(SpawnConfig::default());
        m.new_spawn(SpawnId::new(1), "a_rat", RAT_SPOT);
        m.kill_spawn(SpawnId::new(1));
        let death = m.spawn_point(RAT_SPOT.key()).unwrap().death_time;

        clock.advance(50);
        m.kill_spawn(SpawnId::new(1));
        assert_eq!(m.spawn_point(RAT_SPOT.key()).unwrap().death_time, death);
    }

    #[test]
    fn test_set_name() {
        let (mut m, _, _) = monitor(SpawnConfig::default());
        m.new_spawn(SpawnId::new(1), "a_rat", RAT_SPOT);

        assert!(m.set_name(RAT_SPOT.key(), "rat spot"));
        assert!(m.is_modified());
        assert_eq!(m.candidate(RAT_SPOT.key()).unwrap().name, "rat spot");
        assert!(!m.set_name(SpatialKey::new(0, 0, 0), "nothing"));
    }

    #[test]
    fn test_zone_cycle_persists_points() {
        let dir = tempfile::tempdir().unwrap();
        let config = SpawnConfig {
            enabled: true,
            dir: dir.path().to_path_buf(),
        };
        let (mut m, clock, log) = monitor(config);

        m.zone_end("qeynos");
        m.new_spawn(SpawnId::new(1), "a_rat", RAT_SPOT);
        clock.advance(10);
        m.kill_spawn(SpawnId::new(1));

        m.zone_changed("qeynos2");
        assert!(m.spawn_points().is_empty());
        assert!(dir.path().join("qeynos.sp").exists());
        assert_eq!(log.lock().last(), Some(&SpawnPointEvent::ClearSpawnPoints));

        m.zone_changed("qeynos");
        m.zone_end("qeynos");
        let sp = m.spawn_point(RAT_SPOT.key()).unwrap();
        assert_eq!(sp.last, "a_rat");
        assert!(matches!(
            log.lock().last(),
            Some(SpawnPointEvent::NewSpawnPoint(p)) if p.key == RAT_SPOT.key()
        ));
    }

    #[test]
    fn test_disabled_persistence_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = SpawnConfig {
            enabled: false,
            dir: dir.path().to_path_buf(),
        };
        let (mut m, _, _) = monitor(config);

        m.zone_end("qeynos");
        m.new_spawn(SpawnId::new(1), "a_rat", RAT_SPOT);
        m.kill_spawn(SpawnId::new(1));
        m.zone_changed("qeynos2");

        assert!(!dir.path().join("qeynos.sp").exists());
    }
}
