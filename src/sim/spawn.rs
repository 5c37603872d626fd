//! Level population: flags, secondary items and enemies
//!
//! Objects are placed by rejection sampling over interior tiles. Each pass has
//! a bounded attempt budget and places fewer objects if the budget runs out.

use std::collections::HashSet;

use glam::Vec2;
use rand::Rng;

use super::map::{TileKind, TileMap, tile_center};
use super::state::{Collectible, Enemy, ItemKind};
use crate::consts::*;

/// Pick up to `count` distinct road tiles at least `margin` tiles from the edge
pub fn sample_road_tiles(
    map: &TileMap,
    count: u32,
    margin: usize,
    rng: &mut impl Rng,
) -> Vec<(usize, usize)> {
    let mut picked = Vec::with_capacity(count as usize);
    if map.width() <= margin * 2 || map.height() <= margin * 2 {
        return picked;
    }

    let mut used = HashSet::new();
    let budget = count.saturating_mul(PLACEMENT_ATTEMPTS_PER_OBJECT);
    let mut attempts = 0;

    while picked.len() < count as usize && attempts < budget {
        attempts += 1;
        let col = rng.random_range(margin..map.width() - margin);
        let row = rng.random_range(margin..map.height() - margin);
        let is_road = map
            .tile(col as i32, row as i32)
            .is_some_and(|t| t.kind == TileKind::Road);
        if is_road && used.insert((col, row)) {
            picked.push((col, row));
        }
    }

    if picked.len() < count as usize {
        log::warn!(
            "Placement budget exhausted: placed {} of {} after {} attempts",
            picked.len(),
            count,
            attempts
        );
    }
    picked
}

/// Place the level's flags (ids `flag-<n>`)
pub fn place_flags(map: &TileMap, count: u32, rng: &mut impl Rng) -> Vec<Collectible> {
    sample_road_tiles(map, count, 2, rng)
        .into_iter()
        .enumerate()
        .map(|(i, (col, row))| Collectible {
            id: format!("flag-{i}"),
            pos: tile_center(col, row),
            kind: ItemKind::Flag,
        })
        .collect()
}

/// Place fuel cans and smoke canisters, 50/50 (ids `item-<n>`)
///
/// Independent of flag placement, so an item may share a tile with a flag.
pub fn place_items(map: &TileMap, count: u32, rng: &mut impl Rng) -> Vec<Collectible> {
    sample_road_tiles(map, count, 1, rng)
        .into_iter()
        .enumerate()
        .map(|(i, (col, row))| Collectible {
            id: format!("item-{i}"),
            pos: tile_center(col, row),
            kind: if rng.random_bool(0.5) {
                ItemKind::Fuel
            } else {
                ItemKind::Smoke
            },
        })
        .collect()
}

/// Enemy count for a level
pub fn enemy_count(level: u32) -> usize {
    (BASE_ENEMY_COUNT + level as usize).min(MAX_ENEMY_COUNT)
}

/// Enemy speed for a level (linear ramp)
pub fn enemy_speed(level: u32) -> f32 {
    ENEMY_BASE_SPEED + level as f32 * ENEMY_SPEED_PER_LEVEL
}

/// Enemies start in rows of five near the far corner
pub fn spawn_enemies(level: u32) -> Vec<Enemy> {
    let speed = enemy_speed(level);
    (0..enemy_count(level))
        .map(|i| {
            let col = MAP_WIDTH_TILES - 4 - (i % 5);
            let row = MAP_HEIGHT_TILES - 4 - (i / 5);
            Enemy::new(
                Vec2::new(col as f32 * TILE_SIZE, row as f32 * TILE_SIZE),
                speed,
            )
        })
        .collect()
}
