//! Projects simulation state into screen-space triangles
//!
//! Pure read of `GameState`: every world coordinate is shifted by the camera
//! offset, and anything entirely off-screen is skipped.

use std::ops::Range;

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::{SMOKE_LIFETIME_TICKS, TILE_SIZE};
use crate::settings::Settings;
use crate::sim::{Camera, GameState, ItemKind, TileKind, TileMap, Viewport};

/// Smoke cloud draw radius
pub const SMOKE_DRAW_RADIUS: f32 = 30.0;
/// Bounding radius used to cull vehicles and pickups
const SPRITE_CULL_RADIUS: f32 = 24.0;

/// One frame of drawing instructions
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Triangle list in screen pixels, back to front
    pub vertices: Vec<Vertex>,
    /// Tiles emitted this frame (after culling)
    pub tiles_drawn: usize,
}

/// Grid columns and rows intersecting the camera's view
pub fn visible_tiles(camera: &Camera, map: &TileMap) -> (Range<usize>, Range<usize>) {
    let span = |offset: f32, extent: f32, len: usize| {
        let first = (offset / TILE_SIZE).floor().max(0.0) as usize;
        let last = ((offset + extent) / TILE_SIZE).floor() + 1.0;
        let last = (last.max(0.0) as usize).min(len);
        first.min(last)..last
    };
    (
        span(camera.offset.x, camera.viewport.width, map.width()),
        span(camera.offset.y, camera.viewport.height, map.height()),
    )
}

/// Build the frame for `state` as seen through `viewport`
pub fn project(state: &GameState, viewport: Viewport, settings: &Settings) -> Frame {
    let camera = state.camera(viewport);
    let segments = settings.quality.circle_segments();
    let mut frame = Frame::default();

    project_tiles(&mut frame, &camera, &state.map, settings.elevation_grid);

    for smoke in &state.smokes {
        if !camera.sees_circle(smoke.pos, SMOKE_DRAW_RADIUS) {
            continue;
        }
        let fade = smoke.lifetime as f32 / SMOKE_LIFETIME_TICKS as f32;
        let [r, g, b] = colors::SMOKE;
        let color = [r, g, b, fade * colors::SMOKE_MAX_ALPHA];
        frame.vertices.extend(shapes::circle(
            camera.world_to_screen(smoke.pos),
            SMOKE_DRAW_RADIUS,
            color,
            segments,
        ));
    }

    for obj in &state.objects {
        if !camera.sees_circle(obj.pos, SPRITE_CULL_RADIUS) {
            continue;
        }
        let at = camera.world_to_screen(obj.pos);
        let shape = match obj.kind {
            ItemKind::Flag => shapes::flag(at),
            ItemKind::Fuel => shapes::item_disc(at, colors::FUEL_CAN, segments),
            ItemKind::Smoke => shapes::item_disc(at, colors::SMOKE_CAN, segments),
        };
        frame.vertices.extend(shape);
    }

    for enemy in &state.enemies {
        if !camera.sees_circle(enemy.body.pos, SPRITE_CULL_RADIUS) {
            continue;
        }
        let color = if enemy.is_stunned() {
            colors::ENEMY_STUNNED
        } else {
            colors::ENEMY
        };
        frame.vertices.extend(shapes::vehicle(
            camera.world_to_screen(enemy.body.pos),
            enemy.body.angle,
            color,
            None,
        ));
    }

    let player = &state.player.body;
    frame.vertices.extend(shapes::vehicle(
        camera.world_to_screen(player.pos),
        player.angle,
        colors::PLAYER,
        Some(colors::PLAYER_WINDSHIELD),
    ));

    frame
}

fn project_tiles(frame: &mut Frame, camera: &Camera, map: &TileMap, elevation_grid: bool) {
    let (cols, rows) = visible_tiles(camera, map);
    let size = Vec2::splat(TILE_SIZE);

    for row in rows {
        for col in cols.clone() {
            let Some(tile) = map.tile(col as i32, row as i32) else {
                continue;
            };
            let world = Vec2::new(col as f32, row as f32) * TILE_SIZE;
            let min = camera.world_to_screen(world);

            match tile.kind {
                TileKind::Wall => frame.vertices.extend(shapes::rect(min, size, colors::WALL)),
                TileKind::Road | TileKind::Grass => {
                    frame
                        .vertices
                        .extend(shapes::rect(min, size, colors::road(tile.elevation)));
                    if elevation_grid && ((tile.elevation * 10.0).floor() as i32) % 2 == 0 {
                        frame
                            .vertices
                            .extend(shapes::rect_outline(min, size, 1.0, colors::GRID_LINE));
                    }
                }
            }
            frame.tiles_drawn += 1;
        }
    }
}
