//! Fixed-size shapes stamped by a single pointer press.

use egui::{Pos2, Rect, pos2, vec2};
use std::f32::consts::TAU;

use crate::path::Path;

pub const CIRCLE_RADIUS: f32 = 50.0;
pub const SQUARE_SIDE: f32 = 100.0;
/// Horizontal and vertical distance from the center to the triangle's corners
pub const TRIANGLE_HALF_EXTENT: f32 = 50.0;
pub const STAR_OUTER_RADIUS: f32 = 50.0;
pub const STAR_INNER_RADIUS: f32 = 20.0;
pub const STAR_POINTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stamp {
    Circle,
    Square,
    Triangle,
    Star,
}

impl Stamp {
    pub fn path(self, center: Pos2) -> Path {
        match self {
            Stamp::Circle => circle(center),
            Stamp::Square => square(center),
            Stamp::Triangle => triangle(center),
            Stamp::Star => star(center),
        }
    }
}

pub fn circle(center: Pos2) -> Path {
    let mut builder = Path::builder();
    builder.arc(center, CIRCLE_RADIUS, 0.0, TAU);
    builder.build()
}

pub fn square(center: Pos2) -> Path {
    let mut builder = Path::builder();
    builder.rect(Rect::from_center_size(center, vec2(SQUARE_SIDE, SQUARE_SIDE)));
    builder.build()
}

pub fn triangle(center: Pos2) -> Path {
    let d = TRIANGLE_HALF_EXTENT;
    let mut builder = Path::builder();
    builder
        .move_to(pos2(center.x, center.y - d))
        .line_to(pos2(center.x - d, center.y + d))
        .line_to(pos2(center.x + d, center.y + d))
        .close_path();
    builder.build()
}

/// Vertices of the star in drawing order, alternating outer and inner.
///
/// Angles are counter-clockwise from the positive x axis; y is flipped for
/// screen space.
pub fn star_vertices(center: Pos2) -> Vec<Pos2> {
    let point = |radius: f32, degrees: f32| {
        let angle = degrees.to_radians();
        pos2(center.x + radius * angle.cos(), center.y - radius * angle.sin())
    };

    (0..STAR_POINTS)
        .flat_map(|i| {
            let step = 72.0 * i as f32;
            [point(STAR_OUTER_RADIUS, 18.0 + step), point(STAR_INNER_RADIUS, 54.0 + step)]
        })
        .collect()
}

pub fn star(center: Pos2) -> Path {
    let mut builder = Path::builder();
    for vertex in star_vertices(center) {
        builder.line_to(vertex);
    }
    builder.close_path();
    builder.build()
}
