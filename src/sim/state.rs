//! Game state and core simulation types
//!
//! One `GameState` value owns everything for the current level. Replacing it
//! (restart) discards every pending tick-counted action along with it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::{Camera, Viewport};
use super::map::TileMap;
use super::spawn;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level built, waiting for the first start
    NotStarted,
    /// Active gameplay
    Playing,
    /// Level cleared; simulation frozen until the countdown ends
    LevelTransition { ticks_remaining: u32 },
    /// Run ended (terminal until restart)
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    FuelExhausted,
    Caught,
}

/// Things that happened during a tick (drained by the driver)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    FlagCollected { id: String },
    FuelCollected,
    SmokePickupCollected,
    SmokeDeployed,
    EnemyStunned { enemy: usize },
    LevelCleared { level: u32 },
    LevelStarted { level: u32, flags_total: u32 },
    GameOver { cause: GameOverCause },
}

/// Fuel in fixed-point hundredths so per-tick drain stays exact
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Fuel(u32);

impl Fuel {
    pub const SCALE: u32 = 100;
    pub const ZERO: Fuel = Fuel(0);

    pub const fn from_units(units: u32) -> Self {
        Self(units * Self::SCALE)
    }

    pub const fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths)
    }

    pub const fn hundredths(self) -> u32 {
        self.0
    }

    pub fn as_f32(self) -> f32 {
        self.0 as f32 / Self::SCALE as f32
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Subtract, stopping at zero
    pub fn drain(self, amount: Fuel) -> Fuel {
        Fuel(self.0.saturating_sub(amount.0))
    }

    /// Add, never exceeding `cap`
    pub fn refill(self, amount: Fuel, cap: Fuel) -> Fuel {
        Fuel(self.0.saturating_add(amount.0).min(cap.0))
    }

    /// Share of `max` as a rounded percentage (0-100)
    pub fn percent_of(self, max: Fuel) -> u32 {
        if max.0 == 0 {
            return 0;
        }
        ((self.0 as f32 / max.0 as f32) * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

/// Shape shared by every vehicle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing angle (radians, 0 = +x)
    pub angle: f32,
    pub radius: f32,
}

impl Entity {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: 0.0,
            radius: VEHICLE_RADIUS,
        }
    }
}

/// Collectible kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Fuel,
    /// Smoke canister pickup (score only)
    Smoke,
    Flag,
}

/// The player's car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Entity,
    pub speed: f32,
    pub fuel: Fuel,
    pub max_fuel: Fuel,
    pub score: u64,
    /// Secondary items picked up this run, in order (HUD pickup counts)
    pub items: Vec<ItemKind>,
    /// Ticks until another smoke cloud may be deployed
    pub smoke_cooldown: u32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            body: Entity::at(spawn_point()),
            speed: PLAYER_BASE_SPEED,
            fuel: START_FUEL,
            max_fuel: MAX_FUEL,
            score: 0,
            items: Vec::new(),
            smoke_cooldown: 0,
        }
    }

    /// Carry stats into the next level: back to spawn with a fuel bonus
    pub fn respawn_for_next_level(&mut self) {
        self.body.pos = spawn_point();
        self.body.vel = Vec2::ZERO;
        self.fuel = self.fuel.refill(LEVEL_FUEL_BONUS, self.max_fuel);
        self.smoke_cooldown = 0;
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// A pursuing car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Entity,
    pub speed: f32,
    /// Ticks of stun remaining (0 = active)
    pub stun_ticks: u32,
}

impl Enemy {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            body: Entity::at(pos),
            speed,
            stun_ticks: 0,
        }
    }

    pub fn is_stunned(&self) -> bool {
        self.stun_ticks > 0
    }
}

/// A pickup lying on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: String,
    pub pos: Vec2,
    pub kind: ItemKind,
}

/// Stationary smoke screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmokeCloud {
    pub pos: Vec2,
    /// Ticks remaining before the cloud disperses
    pub lifetime: u32,
}

/// Level progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelState {
    /// 1-based level number
    pub level: u32,
    pub flags_total: u32,
    pub flags_collected: u32,
}

/// Flags requested for a level
pub fn flag_target(level: u32) -> u32 {
    BASE_FLAG_COUNT + level * FLAGS_PER_LEVEL
}

/// Fixed player spawn point
pub fn spawn_point() -> Vec2 {
    Vec2::splat(TILE_SIZE * SPAWN_TILE)
}

/// Per-level seed mixed from the run seed
pub fn level_seed(seed: u64, level: u32) -> u64 {
    (level as u64)
        .wrapping_mul(2654435761)
        .wrapping_add(seed)
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter (playing ticks only)
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub level: LevelState,
    /// Terrain for the current level
    pub map: TileMap,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub objects: Vec<Collectible>,
    pub smokes: Vec<SmokeCloud>,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Build level 1 with a fresh player, not yet started
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            time_ticks: 0,
            phase: GamePhase::NotStarted,
            level: LevelState {
                level: 1,
                flags_total: 0,
                flags_collected: 0,
            },
            map: TileMap::from_tiles(0, 0, Vec::new()),
            player: Player::new(),
            enemies: Vec::new(),
            objects: Vec::new(),
            smokes: Vec::new(),
            events: Vec::new(),
        };
        state.init_level(1);
        state
    }

    /// Begin play from the title screen
    pub fn start(&mut self) {
        if self.phase == GamePhase::NotStarted {
            self.phase = GamePhase::Playing;
            log::info!("Run started (seed {})", self.seed);
        }
    }

    /// Regenerate map, enemies and collectibles for `level`. Player stats are untouched.
    pub fn init_level(&mut self, level: u32) {
        let mut rng = Pcg32::seed_from_u64(level_seed(self.seed, level));

        self.map = TileMap::random(MAP_WIDTH_TILES, MAP_HEIGHT_TILES, &mut rng);
        self.enemies = spawn::spawn_enemies(level);
        self.objects = spawn::place_flags(&self.map, flag_target(level), &mut rng);
        let flags_total = self.objects.len() as u32;
        self.objects
            .extend(spawn::place_items(&self.map, SECONDARY_ITEM_COUNT, &mut rng));
        self.smokes.clear();

        self.level = LevelState {
            level,
            flags_total,
            flags_collected: 0,
        };
        self.events.push(GameEvent::LevelStarted { level, flags_total });
        log::info!(
            "Level {} ready: {} flags, {} enemies, {} items",
            level,
            flags_total,
            self.enemies.len(),
            self.objects.len() as u32 - flags_total
        );
    }

    /// Leave the transition: next level, player carried over
    pub fn advance_level(&mut self) {
        let next = self.level.level + 1;
        self.player.respawn_for_next_level();
        self.init_level(next);
        self.phase = GamePhase::Playing;
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_level_transition(&self) -> bool {
        matches!(self.phase, GamePhase::LevelTransition { .. })
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// End the run
    pub fn game_over(&mut self, cause: GameOverCause) {
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver { cause });
        log::info!(
            "Game over ({:?}) on level {} with score {}",
            cause,
            self.level.level,
            self.player.score
        );
    }

    /// Camera centered on the player (derived, never stored)
    pub fn camera(&self, viewport: Viewport) -> Camera {
        Camera::centered_on(self.player.body.pos, viewport)
    }

    /// Take the events recorded by the last tick
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
