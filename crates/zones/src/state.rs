//! Zone identity and lifecycle state

use seq_core::{Point3, ZoneId};
use seq_protocol::ZonePointEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Experience multiplier assumed until the server sends the real one
pub const DEFAULT_EXP_MULTIPLIER: f32 = 0.75;

/// Name used for both zone names before anything is known
pub const UNKNOWN_ZONE: &str = "unknown";

/// Where the zone handshake currently stands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneState {
    #[default]
    Unknown,
    /// Client zone entry seen, waiting for the profile
    EnteringZone,
    /// Profile decoded, waiting for the zone environment
    ProfileReceived,
    InZone,
    /// The client asked to leave; the next zone entry starts over
    ChangingZone,
}

impl ZoneState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::EnteringZone => "entering",
            Self::ProfileReceived => "profile",
            Self::InZone => "in-zone",
            Self::ChangingZone => "changing",
        }
    }
}

impl fmt::Display for ZoneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map colouring of a dynamic zone entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DzClassification {
    Favourable,
    Unfavourable,
}

/// Active dynamic zone (instance) the player belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicZone {
    pub zone_id: u32,
    pub long_name: String,
    /// Entry point, rounded to whole units
    pub entry: Point3,
    pub classification: DzClassification,
}

/// Everything known about the current zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneIdentity {
    pub short_name: String,
    pub long_name: String,
    pub zone_id: Option<ZoneId>,
    pub exp_multiplier: f32,
    pub zoning: bool,
    pub safe_point: Point3,
    /// Zone lines keyed by trigger id
    pub zone_points: BTreeMap<u32, ZonePointEntry>,
    pub dynamic_zone: Option<DynamicZone>,
}

impl ZoneIdentity {
    /// Forget the current zone
    ///
    /// Zone lines and the dynamic zone are left alone; they are replaced
    /// only by their own records.
    pub fn reset(&mut self) {
        self.short_name = UNKNOWN_ZONE.to_string();
        self.long_name = UNKNOWN_ZONE.to_string();
        self.zone_id = None;
        self.exp_multiplier = DEFAULT_EXP_MULTIPLIER;
        self.safe_point = Point3::ORIGIN;
    }
}

impl Default for ZoneIdentity {
    fn default() -> Self {
        Self {
            short_name: UNKNOWN_ZONE.to_string(),
            long_name: UNKNOWN_ZONE.to_string(),
            zone_id: None,
            exp_multiplier: DEFAULT_EXP_MULTIPLIER,
            zoning: false,
            safe_point: Point3::ORIGIN,
            zone_points: BTreeMap::new(),
            dynamic_zone: None,
        }
    }
}
