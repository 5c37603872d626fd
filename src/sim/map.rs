//! Tile map generation and lookup
//!
//! The map is a fixed grid of tiles, each with an elevation in [0, 1] and a
//! passability kind. It is generated once per level and read-only afterwards.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::TILE_SIZE;

/// Passability of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Road,
    Wall,
    /// Passable off-road terrain (not produced by the current generator)
    Grass,
}

/// A single map cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapTile {
    /// 0.0 (valley) to 1.0 (peak)
    pub elevation: f32,
    pub kind: TileKind,
}

impl MapTile {
    /// Stand-in for lookups that fall outside the grid
    pub const OUT_OF_BOUNDS: MapTile = MapTile {
        elevation: 0.5,
        kind: TileKind::Wall,
    };

    pub fn is_wall(&self) -> bool {
        self.kind == TileKind::Wall
    }

    /// Movement speed multiplier: lower ground is faster (0.5..=1.5)
    pub fn speed_factor(&self) -> f32 {
        1.5 - self.elevation
    }
}

/// Smooth elevation field built from phase-shifted sine waves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationField {
    phases: [f32; 3],
}

impl ElevationField {
    pub fn new(phases: [f32; 3]) -> Self {
        Self { phases }
    }

    /// Draw random phases so each level gets a different landscape
    pub fn random(rng: &mut impl Rng) -> Self {
        let tau = std::f32::consts::TAU;
        Self::new([
            rng.random_range(0.0..tau),
            rng.random_range(0.0..tau),
            rng.random_range(0.0..tau),
        ])
    }

    /// Elevation at tile coordinates, normalized to [0, 1]
    pub fn elevation(&self, col: usize, row: usize) -> f32 {
        let (x, y) = (col as f32, row as f32);
        let [a, b, c] = self.phases;
        let sum = (x * 0.2 + a).sin() + (y * 0.2 + b).cos() + ((x + y) * 0.1 + c).sin();
        // Three unit waves span [-3, 3]
        ((sum + 3.0) / 6.0).clamp(0.0, 1.0)
    }
}

/// Structural rule: solid border plus a lattice of pillars every 4 tiles
pub fn structural_kind(col: usize, row: usize, width: usize, height: usize) -> TileKind {
    let border = col == 0 || row == 0 || col == width - 1 || row == height - 1;
    if border || (col % 4 == 0 && row % 4 == 0) {
        TileKind::Wall
    } else {
        TileKind::Road
    }
}

/// Row-major tile grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    width: usize,
    height: usize,
    tiles: Vec<MapTile>,
}

impl TileMap {
    /// Build a map from explicit tiles (row-major, `width * height` long)
    pub fn from_tiles(width: usize, height: usize, tiles: Vec<MapTile>) -> Self {
        assert_eq!(tiles.len(), width * height, "tile count must match dimensions");
        Self {
            width,
            height,
            tiles,
        }
    }

    /// Generate a `width` x `height` map from an elevation field
    pub fn generate(width: usize, height: usize, field: &ElevationField) -> Self {
        let mut tiles = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                tiles.push(MapTile {
                    elevation: field.elevation(col, row),
                    kind: structural_kind(col, row, width, height),
                });
            }
        }
        Self::from_tiles(width, height, tiles)
    }

    /// Generate a map with random elevation phases
    pub fn random(width: usize, height: usize, rng: &mut impl Rng) -> Self {
        let field = ElevationField::random(rng);
        Self::generate(width, height, &field)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile at grid coordinates, if inside the grid
    pub fn tile(&self, col: i32, row: i32) -> Option<&MapTile> {
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.width || row >= self.height {
            return None;
        }
        self.tiles.get(row * self.width + col)
    }

    /// Tile containing a world position; out-of-bounds positions read as a neutral wall
    pub fn tile_at(&self, pos: Vec2) -> MapTile {
        let (col, row) = tile_coords(pos);
        self.tile(col, row).copied().unwrap_or(MapTile::OUT_OF_BOUNDS)
    }

    /// Number of road tiles (placement capacity)
    pub fn road_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.kind == TileKind::Road).count()
    }

    /// Iterate tiles with their grid coordinates
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &MapTile)> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, t)| (i % self.width, i / self.width, t))
    }
}

/// Grid coordinates (col, row) of a world position
pub fn tile_coords(pos: Vec2) -> (i32, i32) {
    (
        (pos.x / TILE_SIZE).floor() as i32,
        (pos.y / TILE_SIZE).floor() as i32,
    )
}

/// World position of a tile's center
pub fn tile_center(col: usize, row: usize) -> Vec2 {
    Vec2::new(
        col as f32 * TILE_SIZE + TILE_SIZE / 2.0,
        row as f32 * TILE_SIZE + TILE_SIZE / 2.0,
    )
}
