//! # Zone Manager
//!
//! Folds zone records into a [`ZoneIdentity`] and tells subscribers about
//! each step of a zone transition.
//!
//! Entering the world from character select:
//!
//! | record                  | events                                  | zoning |
//! |-------------------------|-----------------------------------------|--------|
//! | zone entry (client)     | `ZoneBegin`, `ZoneBeginEntry`           | true   |
//! | player profile          | `ZoneBeginNamed`, `ProfileReady`        | false  |
//! | new zone                | `ZoneEnd`                               | false  |
//!
//! Zoning from A to B adds a zone change from the client (no events) and
//! one from the server (`ZoneChanged`, `ZoneChangedPayload`) before the
//! sequence above.
//!
//! Every handler decodes its record before touching any state. A record
//! that fails to decode leaves the manager exactly as it was.

use crate::error::Result;
use crate::names::{strip_instance_suffix, zone_long_name_from_id, zone_name_from_id};
use crate::persist::{restore_zone_state, save_zone_state};
use crate::state::{DynamicZone, DzClassification, ZoneIdentity, ZoneState, DEFAULT_EXP_MULTIPLIER};
use seq_config::ZoneConfig;
use seq_core::{Direction, EventBus, Point3, ZoneId};
use seq_protocol::{
    decode_profile, ClientZoneEntry, DecodeError, DzInfo, DzSwitch, NewZone, PlayerProfile,
    ProfileLayout, WireRecord, ZoneChange, ZonePointEntry, ZonePoints,
};
use std::sync::Arc;

/// Zone lifecycle notifications, in emission order per record
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneEvent {
    /// A zone transition started
    ZoneBegin,
    /// The client zone entry that started it
    ZoneBeginEntry {
        payload: ClientZoneEntry,
        direction: Direction,
    },
    /// The zone is known by name
    ZoneBeginNamed { short_name: String },
    ProfileReady(Arc<PlayerProfile>),
    /// The zone environment arrived; the transition is complete
    ZoneEnd {
        short_name: String,
        long_name: String,
    },
    /// The server confirmed a move to another zone
    ZoneChanged { short_name: String },
    ZoneChangedPayload {
        payload: ZoneChange,
        direction: Direction,
    },
}

/// Zone state machine
pub struct ZoneMgr {
    config: ZoneConfig,
    profile_layout: ProfileLayout,
    state: ZoneState,
    identity: ZoneIdentity,
    events: EventBus<ZoneEvent>,
}

impl ZoneMgr {
    /// Create a zone manager
    ///
    /// # Arguments
    /// * `config` - Persistence options; when restore is enabled the saved
    ///   names are loaded here
    /// * `profile_layout` - Reserved span sizes for profile decoding
    pub fn new(config: ZoneConfig, profile_layout: ProfileLayout) -> Self {
        let mut mgr = Self {
            config,
            profile_layout,
            state: ZoneState::Unknown,
            identity: ZoneIdentity::default(),
            events: EventBus::new(),
        };

        if mgr.config.restore_zone_state {
            mgr.restore();
        }
        mgr
    }

    /// Register a listener for zone events
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&ZoneEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(listener);
    }

    //=== Record Handlers ===//

    /// Client half of zone entry: start a new transition
    pub fn zone_entry_client(&mut self, payload: &[u8], direction: Direction) -> Result<()> {
        let entry = ClientZoneEntry::decode(payload)?;

        self.identity.reset();
        self.identity.zoning = true;
        self.state = ZoneState::EnteringZone;
        tracing::debug!("Zone entry for '{}'", entry.name);

        self.events.emit(ZoneEvent::ZoneBegin);
        self.events.emit(ZoneEvent::ZoneBeginEntry {
            payload: entry,
            direction,
        });
        self.save();
        Ok(())
    }

    /// Player profile: the zone id becomes known
    ///
    /// # Returns
    /// The decoded profile, shared with the `ProfileReady` event
    pub fn zone_player(&mut self, payload: &[u8]) -> Result<Arc<PlayerProfile>> {
        let decoded = decode_profile(payload, &self.profile_layout)?;
        let profile = Arc::new(decoded.profile);
        let zone_id = ZoneId::new(profile.zone_id);

        self.identity.short_name = zone_name_from_id(zone_id);
        self.identity.long_name = zone_long_name_from_id(zone_id);
        self.identity.zone_id = Some(zone_id);
        self.identity.exp_multiplier = DEFAULT_EXP_MULTIPLIER;
        self.identity.zoning = false;
        self.state = ZoneState::ProfileReceived;

        self.events.emit(ZoneEvent::ZoneBeginNamed {
            short_name: self.identity.short_name.clone(),
        });
        self.events.emit(ZoneEvent::ProfileReady(profile.clone()));
        self.save();
        Ok(profile)
    }

    /// Zone change request (client) or confirmation (server)
    pub fn zone_change(&mut self, payload: &[u8], direction: Direction) -> Result<()> {
        let change = ZoneChange::decode(payload)?;

        self.state = ZoneState::ChangingZone;
        self.identity.zoning = true;
        if direction == Direction::Client {
            return Ok(());
        }

        let zone_id = ZoneId::new(change.zone_id);
        self.identity.short_name = zone_name_from_id(zone_id);
        self.identity.long_name = zone_long_name_from_id(zone_id);
        self.identity.zone_id = Some(zone_id);
        self.identity.exp_multiplier = DEFAULT_EXP_MULTIPLIER;

        self.events.emit(ZoneEvent::ZoneChanged {
            short_name: self.identity.short_name.clone(),
        });
        self.events.emit(ZoneEvent::ZoneChangedPayload {
            payload: change,
            direction,
        });
        self.save();
        Ok(())
    }

    /// Zone environment: the transition is complete
    pub fn zone_new(&mut self, payload: &[u8]) -> Result<()> {
        let zone = NewZone::decode(payload)?;

        let safe = zone.safe_point;
        self.identity.safe_point = Point3::rounded(safe.x, safe.y, safe.z);
        self.identity.exp_multiplier = zone.zone_exp_multiplier;

        // The embedded short name can be localized; prefer the table name
        let current = &self.identity.short_name;
        if current.is_empty() || current.starts_with("unk") {
            self.identity.short_name = strip_instance_suffix(&zone.short_name).to_string();
        }
        self.identity.long_name = zone.long_name;
        self.identity.zoning = false;
        self.state = ZoneState::InZone;

        tracing::debug!(
            "Entered '{}' with an experience multiplier of {}, safe point {:?}",
            self.identity.long_name,
            self.identity.exp_multiplier,
            self.identity.safe_point
        );

        self.events.emit(ZoneEvent::ZoneEnd {
            short_name: self.identity.short_name.clone(),
            long_name: self.identity.long_name.clone(),
        });
        self.save();
        Ok(())
    }

    /// Replace the zone line collection
    pub fn zone_points(&mut self, payload: &[u8]) -> Result<()> {
        let points = ZonePoints::decode(payload)?;
        self.identity.zone_points = points
            .points
            .into_iter()
            .map(|point| (point.trigger, point))
            .collect();
        tracing::trace!("{} zone points", self.identity.zone_points.len());
        Ok(())
    }

    /// Dynamic zone switch: the player joined or left an instance
    pub fn dynamic_zone_switch(&mut self, payload: &[u8]) -> Result<()> {
        let switch = match DzSwitch::decode(payload) {
            Ok(switch) => switch,
            Err(DecodeError::UnexpectedLength { len, .. }) => {
                tracing::debug!("Ignoring dynamic zone switch of {} bytes", len);
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        self.identity.dynamic_zone = match switch {
            DzSwitch::Active(info) => {
                let long_name = match u16::try_from(info.zone_id) {
                    Ok(id) => zone_long_name_from_id(ZoneId::new(id)),
                    Err(_) => format!("unk_zone_{}", info.zone_id),
                };
                Some(DynamicZone {
                    zone_id: info.zone_id,
                    long_name,
                    entry: Point3::rounded(info.entry.x, info.entry.y, info.entry.z),
                    classification: if info.is_favourable() {
                        DzClassification::Favourable
                    } else {
                        DzClassification::Unfavourable
                    },
                })
            }
            DzSwitch::Left => None,
        };
        Ok(())
    }

    /// Dynamic zone details; a zero `new_dz` means the expedition is gone
    pub fn dynamic_zone_info(&mut self, payload: &[u8]) -> Result<()> {
        let info = DzInfo::decode(payload)?;
        if info.new_dz == 0 {
            self.identity.dynamic_zone = None;
        }
        Ok(())
    }

    //=== Accessors ===//

    #[inline]
    pub fn state(&self) -> ZoneState {
        self.state
    }

    #[inline]
    pub fn identity(&self) -> &ZoneIdentity {
        &self.identity
    }

    #[inline]
    pub fn short_name(&self) -> &str {
        &self.identity.short_name
    }

    #[inline]
    pub fn long_name(&self) -> &str {
        &self.identity.long_name
    }

    #[inline]
    pub fn is_zoning(&self) -> bool {
        self.identity.zoning
    }

    #[inline]
    pub fn exp_multiplier(&self) -> f32 {
        self.identity.exp_multiplier
    }

    #[inline]
    pub fn safe_point(&self) -> Point3 {
        self.identity.safe_point
    }

    /// Zone line for a trigger id
    pub fn zone_point(&self, trigger: u32) -> Option<&ZonePointEntry> {
        self.identity.zone_points.get(&trigger)
    }

    pub fn dynamic_zone(&self) -> Option<&DynamicZone> {
        self.identity.dynamic_zone.as_ref()
    }

    //=== Persistence ===//

    fn save(&self) {
        if !self.config.save_zone_state {
            return;
        }
        let path = self.config.state_file();
        if let Err(e) = save_zone_state(&path, &self.identity.long_name, &self.identity.short_name) {
            tracing::warn!("Failure saving {:?}: {}", path, e);
        }
    }

    fn restore(&mut self) {
        let path = self.config.state_file();
        match restore_zone_state(&path) {
            Ok(saved) => {
                tracing::info!("Restored zone: {} ({})", saved.short_name, saved.long_name);
                self.identity.long_name = saved.long_name;
                self.identity.short_name = saved.short_name;
            }
            Err(e) => {
                tracing::warn!("Failure loading {:?}: {}", path, e);
            }
        }
    }
}

impl std::fmt::Debug for ZoneMgr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoneMgr")
            .field("state", &self.state)
            .field("short_name", &self.identity.short_name)
            .field("zoning", &self.identity.zoning)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::placeholder_name;
    use crate::state::UNKNOWN_ZONE;
    use parking_lot::Mutex;
    use seq_protocol::{encode_profile, DzSwitchInfo, WorldPoint};

    /// Collects formatted log output
    #[derive(Clone, Default)]
    struct LogSink(Arc<Mutex<Vec<u8>>>);

    impl LogSink {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl std::io::Write for LogSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn recording_mgr(config: ZoneConfig) -> (ZoneMgr, Arc<Mutex<Vec<ZoneEvent>>>) {
        let mut mgr = ZoneMgr::new(config, ProfileLayout::CURRENT);
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        mgr.subscribe(move |event| sink.lock().push(event.clone()));
        (mgr, log)
    }

    fn profile_bytes(zone_id: u16) -> Vec<u8> {
        let profile = PlayerProfile {
            name: "Tester".into(),
            zone_id,
            ..Default::default()
        };
        encode_profile(&profile, &ProfileLayout::CURRENT).to_vec()
    }

    fn new_zone_bytes(short_name: &str) -> Vec<u8> {
        NewZone {
            short_name: short_name.into(),
            long_name: "Somewhere Long".into(),
            zone_exp_multiplier: 1.25,
            safe_point: WorldPoint::new(10.4, -20.6, 3.0),
            ..Default::default()
        }
        .encode()
        .to_vec()
    }

    #[test]
    fn test_initial_state() {
        let (mgr, _) = recording_mgr(ZoneConfig::default());
        assert_eq!(mgr.state(), ZoneState::Unknown);
        assert_eq!(mgr.short_name(), UNKNOWN_ZONE);
        assert_eq!(mgr.exp_multiplier(), DEFAULT_EXP_MULTIPLIER);
    }

    #[test]
    fn test_zone_entry_sets_zoning() {
        let (mut mgr, log) = recording_mgr(ZoneConfig::default());
        let entry = ClientZoneEntry {
            name: "Tester".into(),
            ..Default::default()
        };

        mgr.zone_entry_client(&entry.encode(), Direction::Client).unwrap();

        assert!(mgr.is_zoning());
        assert_eq!(mgr.state(), ZoneState::EnteringZone);
        assert_eq!(
            *log.lock(),
            vec![
                ZoneEvent::ZoneBegin,
                ZoneEvent::ZoneBeginEntry {
                    payload: entry,
                    direction: Direction::Client
                }
            ]
        );
    }

    #[test]
    fn test_new_zone_keeps_table_name() {
        let (mut mgr, log) = recording_mgr(ZoneConfig::default());
        mgr.zone_player(&profile_bytes(22)).unwrap();
        mgr.zone_new(&new_zone_bytes("OGemeinl")).unwrap();

        assert_eq!(mgr.short_name(), "ecommons");
        assert_eq!(mgr.long_name(), "Somewhere Long");
        assert_eq!(mgr.exp_multiplier(), 1.25);
        assert_eq!(mgr.safe_point(), Point3::new(10, -21, 3));
        assert_eq!(mgr.state(), ZoneState::InZone);
        assert_eq!(
            log.lock().last(),
            Some(&ZoneEvent::ZoneEnd {
                short_name: "ecommons".into(),
                long_name: "Somewhere Long".into()
            })
        );
    }

    #[test]
    fn test_new_zone_adopts_name_for_unknown_zone() {
        let (mut mgr, _) = recording_mgr(ZoneConfig::default());
        mgr.zone_player(&profile_bytes(9999)).unwrap();
        assert_eq!(mgr.short_name(), "unk_zone_9999");

        mgr.zone_new(&new_zone_bytes("mmca_262")).unwrap();
        assert_eq!(mgr.short_name(), "mmca");
    }

    #[test]
    fn test_client_zone_change_is_silent() {
        let (mut mgr, log) = recording_mgr(ZoneConfig::default());
        let change = ZoneChange {
            name: "Tester".into(),
            zone_id: 2,
            zone_instance: 0,
        };

        mgr.zone_change(&change.encode(), Direction::Client).unwrap();
        assert_eq!(mgr.state(), ZoneState::ChangingZone);
        assert!(mgr.is_zoning());
        assert!(log.lock().is_empty());

        mgr.zone_change(&change.encode(), Direction::Server).unwrap();
        assert_eq!(mgr.short_name(), "qeynos2");
        assert_eq!(
            *log.lock(),
            vec![
                ZoneEvent::ZoneChanged {
                    short_name: "qeynos2".into()
                },
                ZoneEvent::ZoneChangedPayload {
                    payload: change,
                    direction: Direction::Server
                }
            ]
        );
    }

    #[test]
    fn test_truncated_records_change_nothing() {
        let (mut mgr, log) = recording_mgr(ZoneConfig::default());
        let before = mgr.identity().clone();

        assert!(mgr.zone_entry_client(&[0; 10], Direction::Client).is_err());
        assert!(mgr.zone_player(&[0; 10]).is_err());
        assert!(mgr.zone_change(&[0; 75], Direction::Server).is_err());
        assert!(mgr.zone_new(&[0; 100]).is_err());
        assert!(mgr.zone_points(&[5, 0, 0, 0, 1, 2]).is_err());

        assert_eq!(mgr.identity(), &before);
        assert_eq!(mgr.state(), ZoneState::Unknown);
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_zone_points_replace() {
        let (mut mgr, _) = recording_mgr(ZoneConfig::default());
        let first = ZonePoints {
            points: vec![
                ZonePointEntry {
                    trigger: 1,
                    zone_id: 22,
                    ..Default::default()
                },
                ZonePointEntry {
                    trigger: 2,
                    zone_id: 21,
                    ..Default::default()
                },
            ],
        };
        mgr.zone_points(&first.encode()).unwrap();
        assert_eq!(mgr.zone_point(2).map(|p| p.zone_id), Some(21));

        let second = ZonePoints {
            points: vec![ZonePointEntry {
                trigger: 7,
                ..Default::default()
            }],
        };
        mgr.zone_points(&second.encode()).unwrap();
        assert!(mgr.zone_point(2).is_none());
        assert!(mgr.zone_point(7).is_some());
    }

    #[test]
    fn test_dynamic_zone_lifecycle() {
        let (mut mgr, _) = recording_mgr(ZoneConfig::default());
        let info = DzSwitchInfo {
            entry: WorldPoint::new(1.6, 2.2, -3.5),
            zone_id: 22,
            kind: 4,
        };

        mgr.dynamic_zone_switch(&info.encode()).unwrap();
        let dz = mgr.dynamic_zone().unwrap();
        assert_eq!(dz.long_name, "East Commonlands");
        assert_eq!(dz.entry, Point3::new(2, 2, -4));
        assert_eq!(dz.classification, DzClassification::Favourable);

        mgr.dynamic_zone_switch(&[0; 13]).unwrap();
        assert!(mgr.dynamic_zone().is_some());

        mgr.dynamic_zone_switch(&[0; DzSwitch::LEFT_LEN]).unwrap();
        assert!(mgr.dynamic_zone().is_none());
    }

    #[test]
    fn test_dynamic_zone_classification() {
        let (mut mgr, _) = recording_mgr(ZoneConfig::default());
        for (kind, expected) in [
            (1, DzClassification::Unfavourable),
            (2, DzClassification::Unfavourable),
            (3, DzClassification::Favourable),
            (5, DzClassification::Favourable),
            (6, DzClassification::Unfavourable),
        ] {
            let info = DzSwitchInfo {
                kind,
                ..Default::default()
            };
            mgr.dynamic_zone_switch(&info.encode()).unwrap();
            assert_eq!(mgr.dynamic_zone().unwrap().classification, expected, "type {kind}");
        }
    }

    #[test]
    fn test_dz_info_clears_instance() {
        let (mut mgr, _) = recording_mgr(ZoneConfig::default());
        mgr.dynamic_zone_switch(&DzSwitchInfo::default().encode()).unwrap();

        mgr.dynamic_zone_info(&DzInfo { new_dz: 1, ..Default::default() }.encode()).unwrap();
        assert!(mgr.dynamic_zone().is_some());

        mgr.dynamic_zone_info(&DzInfo::default().encode()).unwrap();
        assert!(mgr.dynamic_zone().is_none());
    }

    #[test]
    fn test_state_saved_and_restored() {
        let dir = tempfile::tempdir().unwrap();
        let config = ZoneConfig {
            save_zone_state: true,
            restore_zone_state: true,
            save_restore_base: format!("{}/last", dir.path().display()),
        };

        let (mut mgr, _) = recording_mgr(config.clone());
        mgr.zone_player(&profile_bytes(22)).unwrap();

        let restored = ZoneMgr::new(config, ProfileLayout::CURRENT);
        assert_eq!(restored.short_name(), "ecommons");
        assert_eq!(restored.long_name(), "East Commonlands");
    }

    #[test]
    fn test_restore_failure_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ZoneConfig {
            save_zone_state: false,
            restore_zone_state: true,
            save_restore_base: format!("{}/last", dir.path().display()),
        };
        let path = config.state_file();
        std::fs::write(&path, b"nope").unwrap();

        let logs = LogSink::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer({
                let logs = logs.clone();
                move || logs.clone()
            })
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let mgr = tracing::subscriber::with_default(subscriber, || {
            ZoneMgr::new(config, ProfileLayout::CURRENT)
        });

        assert_eq!(mgr.short_name(), UNKNOWN_ZONE);
        assert_eq!(mgr.long_name(), UNKNOWN_ZONE);

        let output = logs.contents();
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains(&path.display().to_string()), "{output}");
    }

    #[test]
    fn test_placeholder_for_huge_dz_id() {
        let (mut mgr, _) = recording_mgr(ZoneConfig::default());
        let info = DzSwitchInfo {
            zone_id: 70_000,
            ..Default::default()
        };
        mgr.dynamic_zone_switch(&info.encode()).unwrap();
        assert_eq!(mgr.dynamic_zone().unwrap().long_name, "unk_zone_70000");
        assert_eq!(placeholder_name(ZoneId::new(5)), "unk_zone_5");
    }
}
