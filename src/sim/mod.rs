//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod map;
pub mod spawn;
pub mod state;
pub mod tick;

pub use camera::{Camera, Viewport};
pub use collision::{MoveOutcome, circles_overlap, gated_move, within_radius};
pub use map::{ElevationField, MapTile, TileKind, TileMap, tile_center, tile_coords};
pub use state::{
    Collectible, Enemy, Entity, Fuel, GameEvent, GameOverCause, GamePhase, GameState, ItemKind,
    LevelState, Player, SmokeCloud,
};
pub use tick::{Direction, TickInput, tick};
