//! Camera and viewport: the world-to-screen contract

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Drawing surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

/// Offset subtracted from world coordinates to get screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub offset: Vec2,
    pub viewport: Viewport,
}

impl Camera {
    /// Camera that puts `target` at the exact center of the viewport
    pub fn centered_on(target: Vec2, viewport: Viewport) -> Self {
        Self {
            offset: target - viewport.size() / 2.0,
            viewport,
        }
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.offset
    }

    /// Whether a box at `min` of `size` (world units) overlaps the viewport
    pub fn sees_rect(&self, min: Vec2, size: Vec2) -> bool {
        let screen = self.world_to_screen(min);
        screen.x + size.x >= 0.0
            && screen.y + size.y >= 0.0
            && screen.x <= self.viewport.width
            && screen.y <= self.viewport.height
    }

    /// Whether a circle (world units) overlaps the viewport
    pub fn sees_circle(&self, center: Vec2, radius: f32) -> bool {
        self.sees_rect(center - Vec2::splat(radius), Vec2::splat(radius * 2.0))
    }
}
