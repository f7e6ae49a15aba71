//! # Spawn Point
//!
//! A location where NPCs keep appearing. Timing is learned from the gap
//! between a death at the spot and the next appearance there.

use seq_core::{Point3, SpatialKey, SpawnId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub key: SpatialKey,
    /// User-assigned label
    pub name: String,
    /// Name of the most recent occupant
    pub last: String,
    pub first_seen: i64,
    /// Most recent appearance
    pub spawn_time: i64,
    /// Most recent death, if one was seen
    pub death_time: Option<i64>,
    /// Estimated respawn interval in seconds; 0 until measured
    pub interval: i64,
    pub count: u32,
    /// Id of the occupant while it is alive
    pub last_id: Option<SpawnId>,
}

impl SpawnPoint {
    /// A point seen for the first time
    pub fn new(id: SpawnId, position: Point3, last: &str, now: i64) -> Self {
        Self {
            key: position.key(),
            name: String::new(),
            last: last.to_string(),
            first_seen: now,
            spawn_time: now,
            death_time: None,
            interval: 0,
            count: 1,
            last_id: Some(id),
        }
    }

    #[inline]
    pub fn position(&self) -> Point3 {
        self.key.point()
    }

    /// Seconds since the last death
    pub fn age(&self, now: i64) -> Option<i64> {
        self.death_time.map(|death| now - death)
    }

    /// Seconds until the next expected spawn; negative when overdue
    pub fn secs_left(&self, now: i64) -> Option<i64> {
        self.age(now).map(|age| self.interval - age)
    }

    /// How far through its respawn cycle the point is
    ///
    /// 0 right after a death, 255 when the spawn is due or overdue. Points
    /// with no death or no measured interval report 0.
    pub fn age_ratio(&self, now: i64) -> u8 {
        match self.age(now) {
            Some(age) if self.interval > 0 => {
                let ratio = age.clamp(0, self.interval) * 255 / self.interval;
                ratio as u8
            }
            _ => 0,
        }
    }

    /// Record an appearance at this point
    pub(crate) fn occupy(&mut self, id: SpawnId, name: &str, now: i64) {
        self.last = name.to_string();
        self.last_id = Some(id);
        self.spawn_time = now;
        self.count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> SpawnPoint {
        SpawnPoint::new(SpawnId::new(7), Point3::new(100, 200, 5), "a_rat", 1_000)
    }

    #[test]
    fn test_new_point() {
        let sp = point();
        assert_eq!(sp.key, SpatialKey::new(100, 200, 5));
        assert_eq!(sp.count, 1);
        assert_eq!(sp.first_seen, 1_000);
        assert_eq!(sp.age(2_000), None);
        assert_eq!(sp.age_ratio(2_000), 0);
    }

    #[test]
    fn test_timing() {
        let mut sp = point();
        sp.death_time = Some(1_100);
        sp.interval = 400;

        assert_eq!(sp.age(1_200), Some(100));
        assert_eq!(sp.secs_left(1_200), Some(300));
        assert_eq!(sp.secs_left(1_600), Some(-100));
    }

    #[test]
    fn test_age_ratio() {
        let mut sp = point();
        sp.death_time = Some(0);
        sp.interval = 510;

        assert_eq!(sp.age_ratio(0), 0);
        assert_eq!(sp.age_ratio(255), 127);
        assert_eq!(sp.age_ratio(510), 255);
        assert_eq!(sp.age_ratio(9_999), 255);
    }
}
