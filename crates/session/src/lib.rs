//! # SEQ Session
//!
//! Glue between the decoder and the trackers: one [`Session`] owns the
//! zone manager, the live spawn registry and the spawn monitor, and routes
//! each record to whichever of them cares.
//!
//! ## Usage
//!
//! ```rust
//! use seq_config::SeqConfig;
//! use seq_core::Direction;
//! use seq_protocol::{DeleteSpawn, MessageKind, WireRecord};
//! use seq_session::{Outcome, Session};
//! use seq_spawns::SystemClock;
//! use std::sync::Arc;
//!
//! let config = SeqConfig {
//!     spawn_points_enabled: false,
//!     ..Default::default()
//! };
//! let mut session = Session::new(&config, Arc::new(SystemClock)).unwrap();
//!
//! let payload = DeleteSpawn { spawn_id: 5 }.encode();
//! let outcome = session
//!     .dispatch(MessageKind::DeleteSpawn.opcode(), Direction::Server, &payload)
//!     .unwrap();
//! assert_eq!(outcome, Outcome::Handled);
//! ```

pub mod router;

pub use router::{Outcome, Session, SessionStats};
