//! Platform abstraction layer
//!
//! Browser/native differences are kept out of the session: keyboard codes
//! are mapped to game keys here, and frame timestamps become clamped deltas.

pub mod input;
pub mod time;

pub use input::{HeldKeys, Key};
pub use time::FrameClock;
