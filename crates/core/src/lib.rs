//! SEQ Core - Fundamental types and utilities shared by the decoder and trackers

mod error;
mod types;
mod events;
mod positions;

pub use error::*;
pub use types::*;
pub use events::*;
pub use positions::*;
