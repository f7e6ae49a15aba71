//! # SEQ Zones
//!
//! Tracks which zone the player is in from the zone handshake records.
//!
//! ## Features
//! - Static zone name table with `unk_zone_<id>` fallback
//! - Zone state machine with ordered lifecycle events
//! - Zone lines, safe point and dynamic zone tracking
//! - Optional zone-state file (`<base>Zone.dat`) across restarts
//!
//! ## Usage
//!
//! ```rust
//! use seq_config::ZoneConfig;
//! use seq_protocol::ProfileLayout;
//! use seq_zones::{ZoneMgr, ZoneState};
//!
//! let mut zones = ZoneMgr::new(ZoneConfig::default(), ProfileLayout::CURRENT);
//! zones.subscribe(|event| println!("{:?}", event));
//! assert_eq!(zones.state(), ZoneState::Unknown);
//! ```

pub mod error;
pub mod manager;
pub mod names;
pub mod persist;
pub mod state;

pub use error::{Result, ZoneError};
pub use manager::{ZoneEvent, ZoneMgr};
pub use names::{zone_long_name_from_id, zone_name_from_id};
pub use state::{DynamicZone, DzClassification, ZoneIdentity, ZoneState, DEFAULT_EXP_MULTIPLIER};
