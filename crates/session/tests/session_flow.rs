//! End-to-end record flows through a session

use parking_lot::Mutex;
use seq_config::SeqConfig;
use seq_core::{Direction, Point3, SpawnId};
use seq_protocol::{
    encode_profile, spawn_type, ClientZoneEntry, DeleteSpawn, MessageKind, NewCorpse, NewSpawn,
    NewZone, OpCode, PlayerProfile, ProfileLayout, SpawnInfo, WireRecord, ZoneChange,
    ZoneSpawns,
};
use seq_session::{Outcome, Session};
use seq_spawns::{ManualClock, SpawnPointEvent};
use seq_zones::{ZoneEvent, ZoneState};
use std::sync::Arc;
use tempfile::TempDir;

struct Harness {
    session: Session,
    clock: ManualClock,
    zone_log: Arc<Mutex<Vec<ZoneEvent>>>,
    spawn_log: Arc<Mutex<Vec<SpawnPointEvent>>>,
    _dir: TempDir,
}

impl Harness {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = SeqConfig {
            spawn_points_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let clock = ManualClock::new(10_000);
        let mut session = Session::new(&config, Arc::new(clock.clone())).unwrap();

        let zone_log = Arc::new(Mutex::new(Vec::new()));
        let sink = zone_log.clone();
        session
            .zones_mut()
            .subscribe(move |e| sink.lock().push(e.clone()));

        let spawn_log = Arc::new(Mutex::new(Vec::new()));
        let sink = spawn_log.clone();
        session
            .monitor_mut()
            .subscribe(move |e| sink.lock().push(e.clone()));

        Self {
            session,
            clock,
            zone_log,
            spawn_log,
            _dir: dir,
        }
    }

    fn send<R: WireRecord>(&mut self, record: &R, direction: Direction) -> Outcome {
        self.session
            .dispatch(R::KIND.opcode(), direction, &record.encode())
            .unwrap()
    }

    fn send_profile(&mut self, zone_id: u16) {
        let profile = PlayerProfile {
            name: "Tester".into(),
            zone_id,
            ..Default::default()
        };
        let bytes = encode_profile(&profile, &ProfileLayout::CURRENT);
        self.session
            .dispatch(MessageKind::CharProfile.opcode(), Direction::Server, &bytes)
            .unwrap();
    }

    fn enter_zone(&mut self, zone_id: u16, short_name: &str) {
        let entry = ClientZoneEntry {
            name: "Tester".into(),
            ..Default::default()
        };
        self.send(&entry, Direction::Client);
        self.send_profile(zone_id);
        let zone = NewZone {
            short_name: short_name.into(),
            long_name: "Long Name".into(),
            ..Default::default()
        };
        self.send(&zone, Direction::Server);
    }
}

fn npc(id: u16, name: &str, x: i16, y: i16, z: i16) -> NewSpawn {
    NewSpawn {
        spawn: SpawnInfo {
            spawn_id: id,
            name: name.into(),
            npc: spawn_type::NPC,
            x,
            y,
            z,
            ..Default::default()
        },
    }
}

#[test]
fn test_zone_sequencing() {
    let mut h = Harness::new();
    h.enter_zone(22, "ecommons_name");

    let events = h.zone_log.lock().clone();
    assert_eq!(events.len(), 5);
    assert_eq!(events[0], ZoneEvent::ZoneBegin);
    assert!(matches!(
        &events[1],
        ZoneEvent::ZoneBeginEntry { payload, direction: Direction::Client } if payload.name == "Tester"
    ));
    assert_eq!(
        events[2],
        ZoneEvent::ZoneBeginNamed {
            short_name: "ecommons".into()
        }
    );
    assert!(matches!(&events[3], ZoneEvent::ProfileReady(p) if p.zone_id == 22));
    assert_eq!(
        events[4],
        ZoneEvent::ZoneEnd {
            short_name: "ecommons".into(),
            long_name: "Long Name".into()
        }
    );
    assert_eq!(h.session.zones().state(), ZoneState::InZone);
    assert!(!h.session.zones().is_zoning());
}

#[test]
fn test_spawn_point_promotion() {
    let mut h = Harness::new();
    h.enter_zone(1, "qeynos");
    let spot = Point3::new(100, 200, 5).key();

    h.send(&npc(40, "a_rat", 100, 200, 5), Direction::Server);
    let monitor = h.session.monitor();
    assert_eq!(monitor.candidate(spot).map(|sp| sp.count), Some(1));
    assert!(monitor.spawn_point(spot).is_none());

    h.clock.advance(20);
    h.send(&NewCorpse { spawn_id: 40, ..Default::default() }, Direction::Server);
    assert!(h.session.registry().get(SpawnId::new(40)).unwrap().is_corpse());
    assert!(matches!(
        h.spawn_log.lock().last(),
        Some(SpawnPointEvent::NewSpawnPoint(sp)) if sp.key == spot
    ));

    h.clock.advance(300);
    h.send(&npc(41, "a_rat", 100, 200, 5), Direction::Server);

    let sp = h.session.monitor().spawn_point(spot).unwrap();
    assert_eq!(sp.count, 2);
    assert!(sp.interval >= 0);
    assert_eq!(sp.interval, 300);
    assert_eq!(sp.last, "a_rat");
}

#[test]
fn test_pets_and_players_are_not_spawn_points() {
    let mut h = Harness::new();
    h.enter_zone(1, "qeynos");

    let mut pet = npc(50, "Gabaner", 10, 10, 0);
    pet.spawn.pet_owner_id = 3;
    h.send(&pet, Direction::Server);

    let mut player = npc(51, "Someone", 20, 20, 0);
    player.spawn.npc = spawn_type::PLAYER;
    h.send(&player, Direction::Server);

    assert_eq!(h.session.registry().len(), 2);
    assert!(h.session.monitor().candidates().is_empty());
}

#[test]
fn test_zone_spawns_batch() {
    let mut h = Harness::new();
    h.enter_zone(1, "qeynos");

    let batch = ZoneSpawns {
        spawns: vec![
            npc(1, "a_rat", 1, 1, 0).spawn,
            npc(2, "a_bat", 2, 2, 0).spawn,
            npc(3, "a_snake", 3, 3, 0).spawn,
        ],
    };
    h.send(&batch, Direction::Server);
    assert_eq!(h.session.registry().len(), 3);
    assert_eq!(h.session.monitor().candidates().len(), 3);

    h.send(&DeleteSpawn { spawn_id: 2 }, Direction::Server);
    assert_eq!(h.session.registry().len(), 2);
}

#[test]
fn test_truncated_records_mutate_nothing() {
    let mut h = Harness::new();
    h.enter_zone(1, "qeynos");
    h.send(&npc(40, "a_rat", 100, 200, 5), Direction::Server);

    let identity = h.session.zones().identity().clone();
    let zone_events = h.zone_log.lock().len();
    let spawns = h.session.registry().len();

    let cases: [(MessageKind, Direction, usize); 6] = [
        (MessageKind::ZoneEntry, Direction::Client, 67),
        (MessageKind::CharProfile, Direction::Server, 100),
        (MessageKind::ZoneChange, Direction::Server, 75),
        (MessageKind::NewZone, Direction::Server, 839),
        (MessageKind::NewSpawn, Direction::Server, 263),
        (MessageKind::ZoneSpawns, Direction::Server, 265),
    ];
    for (kind, direction, len) in cases {
        let payload = vec![0u8; len];
        assert!(
            h.session.dispatch(kind.opcode(), direction, &payload).is_err(),
            "{kind} with {len} bytes"
        );
    }

    assert_eq!(h.session.zones().identity(), &identity);
    assert_eq!(h.zone_log.lock().len(), zone_events);
    assert_eq!(h.session.registry().len(), spawns);
    assert_eq!(h.session.stats().failed, 6);
}

#[test]
fn test_unknown_opcode_ignored() {
    let mut h = Harness::new();
    let outcome = h
        .session
        .dispatch(OpCode::new(0xee, 0xee), Direction::Server, &[1, 2, 3])
        .unwrap();
    assert_eq!(outcome, Outcome::Ignored);
    assert_eq!(h.session.dispatch_raw(&[0x01], Direction::Server).unwrap(), Outcome::Ignored);
    assert_eq!(h.session.stats().ignored, 2);
}

#[test]
fn test_zone_change_clears_spawns() {
    let mut h = Harness::new();
    h.enter_zone(1, "qeynos");
    h.send(&npc(40, "a_rat", 100, 200, 5), Direction::Server);
    h.send(&NewCorpse { spawn_id: 40, ..Default::default() }, Direction::Server);

    let change = ZoneChange {
        name: "Tester".into(),
        zone_id: 2,
        zone_instance: 0,
    };
    h.send(&change, Direction::Client);
    assert_eq!(h.session.registry().len(), 1);

    h.send(&change, Direction::Server);
    assert!(h.session.registry().is_empty());
    assert!(h.session.monitor().spawn_points().is_empty());
    assert_eq!(h.spawn_log.lock().last(), Some(&SpawnPointEvent::ClearSpawnPoints));
    assert_eq!(h.session.zones().short_name(), "qeynos2");

    // Coming back loads the saved point
    h.send(&change, Direction::Client);
    h.enter_zone(1, "qeynos");
    let spot = Point3::new(100, 200, 5).key();
    assert!(h.session.monitor().spawn_point(spot).is_some());
}

#[test]
fn test_tracking_without_persistence() {
    let dir = tempfile::tempdir().unwrap();
    let config = SeqConfig {
        spawn_points_enabled: false,
        spawn_points_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let clock = ManualClock::new(500);
    let mut session = Session::new(&config, Arc::new(clock.clone())).unwrap();

    let zone = NewZone {
        short_name: "qeynos".into(),
        ..Default::default()
    };
    session
        .dispatch(MessageKind::NewZone.opcode(), Direction::Server, &zone.encode())
        .unwrap();
    let rat = npc(40, "a_rat", 100, 200, 5);
    session
        .dispatch(MessageKind::NewSpawn.opcode(), Direction::Server, &rat.encode())
        .unwrap();
    clock.advance(30);
    let corpse = NewCorpse { spawn_id: 40, ..Default::default() };
    session
        .dispatch(MessageKind::NewCorpse.opcode(), Direction::Server, &corpse.encode())
        .unwrap();

    let spot = Point3::new(100, 200, 5).key();
    assert!(session.monitor().spawn_point(spot).is_some());

    session.flush();
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
