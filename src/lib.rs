//! Flag Rally - A top-down flag-collecting chase game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (map, entities, per-tick step)
//! - `renderer`: Camera projection and WebGPU rendering pipeline
//! - `session`: Fixed-cadence driver gluing input, simulation and rendering
//! - `platform`: Browser/native platform abstraction
//! - `advice`: Best-effort advisory text collaborator
//! - `ui`: HUD model

pub mod advice;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod ui;

pub use session::Session;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use crate::sim::Fuel;

    /// Logic ticks per second
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Map dimensions
    pub const TILE_SIZE: f32 = 64.0;
    pub const MAP_WIDTH_TILES: usize = 40;
    pub const MAP_HEIGHT_TILES: usize = 40;

    /// Viewport dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Vehicles
    pub const PLAYER_BASE_SPEED: f32 = 4.0;
    pub const ENEMY_BASE_SPEED: f32 = 3.5;
    pub const ENEMY_SPEED_PER_LEVEL: f32 = 0.2;
    pub const VEHICLE_RADIUS: f32 = 20.0;
    pub const BASE_ENEMY_COUNT: usize = 3;
    pub const MAX_ENEMY_COUNT: usize = 10;
    /// Player spawn, in tiles (center of tile 2,2)
    pub const SPAWN_TILE: f32 = 2.5;

    /// Fuel economy
    pub const START_FUEL: Fuel = Fuel::from_units(100);
    pub const MAX_FUEL: Fuel = Fuel::from_units(100);
    pub const FUEL_CONSUMPTION_RATE: Fuel = Fuel::from_hundredths(5);
    pub const FUEL_PICKUP_AMOUNT: Fuel = Fuel::from_units(25);
    pub const LEVEL_FUEL_BONUS: Fuel = Fuel::from_units(40);

    /// Smoke screen
    pub const SMOKE_COST: Fuel = Fuel::from_units(10);
    pub const SMOKE_LIFETIME_TICKS: u32 = 180;
    /// ~100ms at 60 Hz
    pub const SMOKE_COOLDOWN_TICKS: u32 = 6;
    pub const SMOKE_STUN_RADIUS: f32 = 40.0;
    pub const STUN_DURATION_TICKS: u32 = 180;

    /// Collectibles
    pub const PICKUP_RADIUS: f32 = 15.0;
    pub const BASE_FLAG_COUNT: u32 = 5;
    pub const FLAGS_PER_LEVEL: u32 = 2;
    pub const SECONDARY_ITEM_COUNT: u32 = 15;
    /// Rejection-sampling attempts allowed per requested object
    pub const PLACEMENT_ATTEMPTS_PER_OBJECT: u32 = 200;

    /// Scoring
    pub const FUEL_PICKUP_SCORE: u64 = 50;
    pub const FLAG_SCORE: u64 = 500;
    pub const SMOKE_PICKUP_SCORE: u64 = 100;

    /// Level clear pause (2 seconds at 60 Hz)
    pub const LEVEL_TRANSITION_TICKS: u32 = 2 * SIM_HZ;
}

/// Unit vector for a facing angle (radians, 0 = +x, screen y down)
#[inline]
pub fn angle_to_dir(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Facing angle of a vector (radians)
#[inline]
pub fn dir_to_angle(dir: Vec2) -> f32 {
    dir.y.atan2(dir.x)
}
