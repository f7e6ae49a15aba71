//! # SEQ Spawns
//!
//! Live spawn population and spawn point inference.
//!
//! ## Features
//! - Live spawn registry fed by spawn, corpse and delete records
//! - Candidate and confirmed spawn points with respawn timing
//! - Per-zone spawn-point files (`<dir>/<zone>.sp`)
//! - Injectable clock for replay and tests

pub mod clock;
pub mod error;
pub mod monitor;
pub mod registry;
pub mod spawn_point;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Result, SpawnError};
pub use monitor::{SpawnMonitor, SpawnPointEvent};
pub use registry::{LiveSpawn, SpawnRegistry};
pub use spawn_point::SpawnPoint;
