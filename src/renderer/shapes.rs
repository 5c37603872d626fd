//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in screen pixels.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::angle_to_dir;

/// Single triangle
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> [Vertex; 3] {
    [
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Convex quad from four corners in winding order
fn quad(corners: [Vec2; 4], color: [f32; 4]) -> Vec<Vertex> {
    let [a, b, c, d] = corners;
    let mut vertices = Vec::with_capacity(6);
    vertices.extend(triangle(a, b, c, color));
    vertices.extend(triangle(a, c, d, color));
    vertices
}

/// Axis-aligned filled rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    quad(
        [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)],
        color,
    )
}

/// Hollow rectangle made of four thin bars
pub fn rect_outline(min: Vec2, size: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(24);
    vertices.extend(rect(min, Vec2::new(size.x, width), color));
    vertices.extend(rect(
        Vec2::new(min.x, min.y + size.y - width),
        Vec2::new(size.x, width),
        color,
    ));
    vertices.extend(rect(min, Vec2::new(width, size.y), color));
    vertices.extend(rect(
        Vec2::new(min.x + size.x - width, min.y),
        Vec2::new(width, size.y),
        color,
    ));
    vertices
}

/// Rectangle given in a rotated local frame (`local_min`/`size` relative to `center`)
pub fn oriented_rect(
    center: Vec2,
    angle: f32,
    local_min: Vec2,
    size: Vec2,
    color: [f32; 4],
) -> Vec<Vertex> {
    let forward = angle_to_dir(angle);
    let side = forward.perp();
    let to_world = |local: Vec2| center + forward * local.x + side * local.y;
    let max = local_min + size;
    quad(
        [
            to_world(local_min),
            to_world(Vec2::new(max.x, local_min.y)),
            to_world(max),
            to_world(Vec2::new(local_min.x, max.y)),
        ],
        color,
    )
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Top-down car: body, four wheels and an optional windshield at the nose
pub fn vehicle(
    center: Vec2,
    angle: f32,
    body: [f32; 4],
    windshield: Option<[f32; 4]>,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(36);
    vertices.extend(oriented_rect(
        center,
        angle,
        Vec2::new(-18.0, -12.0),
        Vec2::new(36.0, 24.0),
        body,
    ));
    if let Some(glass) = windshield {
        vertices.extend(oriented_rect(
            center,
            angle,
            Vec2::new(6.0, -8.0),
            Vec2::new(8.0, 16.0),
            glass,
        ));
    }
    for wheel in [
        Vec2::new(-14.0, -15.0),
        Vec2::new(6.0, -15.0),
        Vec2::new(-14.0, 11.0),
        Vec2::new(6.0, 11.0),
    ] {
        vertices.extend(oriented_rect(
            center,
            angle,
            wheel,
            Vec2::new(8.0, 4.0),
            colors::WHEEL,
        ));
    }
    vertices
}

/// Flag planted at `base`: white pole with a red pennant
pub fn flag(base: Vec2) -> Vec<Vertex> {
    let mut vertices = rect(
        base + Vec2::new(-6.0, -15.0),
        Vec2::new(2.0, 30.0),
        colors::FLAG_POLE,
    );
    vertices.extend(triangle(
        base + Vec2::new(-4.0, -15.0),
        base + Vec2::new(15.0, -8.0),
        base + Vec2::new(-4.0, 0.0),
        colors::FLAG,
    ));
    vertices
}

/// Round pickup with a small center mark
pub fn item_disc(center: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = circle(center, 12.0, color, segments);
    vertices.extend(rect(
        center - Vec2::splat(3.0),
        Vec2::splat(6.0),
        colors::ITEM_MARK,
    ));
    vertices
}
