//! Proximity tests and wall-gated movement
//!
//! Vehicles and pickups are circles. Terrain blocks the player only: a move
//! whose destination point lands in a wall tile is rejected as a whole, with
//! no per-axis sliding.

use glam::Vec2;

use super::map::TileMap;

/// Strict circle overlap (touching edges do not count)
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance(b) < radius_a + radius_b
}

/// Whether `point` lies strictly within `radius` of `center`
#[inline]
pub fn within_radius(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance(center) < radius
}

/// Result of a gated move
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    Moved(Vec2),
    Blocked,
}

impl MoveOutcome {
    /// Position after the move, given where we started
    pub fn resolve(self, from: Vec2) -> Vec2 {
        match self {
            MoveOutcome::Moved(to) => to,
            MoveOutcome::Blocked => from,
        }
    }
}

/// Try to move from `from` by `delta`; walls (and off-map) reject the whole move
pub fn gated_move(map: &TileMap, from: Vec2, delta: Vec2) -> MoveOutcome {
    let candidate = from + delta;
    if map.tile_at(candidate).is_wall() {
        MoveOutcome::Blocked
    } else {
        MoveOutcome::Moved(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::map::{ElevationField, tile_center};

    fn small_map() -> TileMap {
        TileMap::generate(12, 12, &ElevationField::new([0.0; 3]))
    }

    #[test]
    fn test_circles_overlap_strict() {
        let a = Vec2::new(0.0, 0.0);
        assert!(circles_overlap(a, 20.0, Vec2::new(39.9, 0.0), 20.0));
        assert!(!circles_overlap(a, 20.0, Vec2::new(40.0, 0.0), 20.0));
    }

    #[test]
    fn test_within_radius() {
        let center = Vec2::new(100.0, 100.0);
        assert!(within_radius(Vec2::new(135.0, 100.0), center, 40.0));
        assert!(!within_radius(Vec2::new(145.0, 100.0), center, 40.0));
    }

    #[test]
    fn test_move_into_road() {
        let map = small_map();
        let from = tile_center(2, 2);
        let outcome = gated_move(&map, from, Vec2::new(4.0, 0.0));
        assert_eq!(outcome, MoveOutcome::Moved(Vec2::new(164.0, 160.0)));
    }

    #[test]
    fn test_move_into_wall_rejected() {
        let map = small_map();
        // Tile (1,1) is road, tile (0,1) is border wall
        let from = Vec2::new(65.0, 96.0);
        let outcome = gated_move(&map, from, Vec2::new(-4.0, 0.0));
        assert_eq!(outcome, MoveOutcome::Blocked);
        assert_eq!(outcome.resolve(from), from);
    }

    #[test]
    fn test_move_into_pillar_rejected() {
        let map = small_map();
        // Pillar at (4,4); approach from the left
        let from = Vec2::new(4.0 * 64.0 - 1.0, 4.0 * 64.0 + 32.0);
        assert_eq!(gated_move(&map, from, Vec2::new(3.0, 0.0)), MoveOutcome::Blocked);
    }
}
