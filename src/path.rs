use egui::{Pos2, Rect, pos2};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Number of line segments used when an arc is flattened for rendering
const ARC_SEGMENTS: usize = 64;

/// One piece of a path, in surface coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum PathElement {
    Polyline { points: Vec<Pos2>, closed: bool },
    Arc { center: Pos2, radius: f32, start_angle: f32, end_angle: f32 },
    Rect(Rect),
}

impl PathElement {
    fn bounds(&self) -> Rect {
        match self {
            PathElement::Polyline { points, .. } => Rect::from_points(points),
            PathElement::Arc { center, radius, start_angle, end_angle } => {
                let point_at = |angle: f32| {
                    pos2(center.x + radius * angle.cos(), center.y + radius * angle.sin())
                };
                let mut points = vec![point_at(*start_angle), point_at(*end_angle)];
                // Add every axis extreme the sweep passes through
                let mut quarter = (start_angle / FRAC_PI_2).ceil() * FRAC_PI_2;
                while quarter <= *end_angle {
                    points.push(point_at(quarter));
                    quarter += FRAC_PI_2;
                }
                Rect::from_points(&points)
            }
            PathElement::Rect(rect) => *rect,
        }
    }

    /// Flatten into a point list plus a closed flag.
    pub fn flatten(&self) -> (Vec<Pos2>, bool) {
        match self {
            PathElement::Polyline { points, closed } => (points.clone(), *closed),
            PathElement::Arc { center, radius, start_angle, end_angle } => {
                let sweep = end_angle - start_angle;
                let full_turn = sweep.abs() >= TAU;
                let points = (0..=ARC_SEGMENTS)
                    .map(|i| {
                        let angle = start_angle + sweep * i as f32 / ARC_SEGMENTS as f32;
                        pos2(center.x + radius * angle.cos(), center.y + radius * angle.sin())
                    })
                    .collect();
                (points, full_turn)
            }
            PathElement::Rect(rect) => (
                vec![rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()],
                true,
            ),
        }
    }
}

/// A stroked outline made of polylines, arcs and rectangles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    pub fn builder() -> PathBuilder {
        PathBuilder::default()
    }

    /// A single straight segment.
    pub fn line(from: Pos2, to: Pos2) -> Self {
        let mut builder = Self::builder();
        builder.move_to(from).line_to(to);
        builder.build()
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Bounding rectangle of the geometry (ignores stroke width).
    pub fn bounds(&self) -> Rect {
        self.elements
            .iter()
            .map(PathElement::bounds)
            .fold(Rect::NOTHING, |acc, r| acc.union(r))
    }
}

/// Builds a [`Path`] with the move-to / line-to / close vocabulary of a 2D canvas.
#[derive(Debug, Default)]
pub struct PathBuilder {
    elements: Vec<PathElement>,
    current: Option<Vec<Pos2>>,
}

impl PathBuilder {
    fn flush(&mut self, closed: bool) {
        if let Some(points) = self.current.take() {
            if !points.is_empty() {
                self.elements.push(PathElement::Polyline { points, closed });
            }
        }
    }

    pub fn move_to(&mut self, pos: Pos2) -> &mut Self {
        self.flush(false);
        self.current = Some(vec![pos]);
        self
    }

    /// On an empty subpath this behaves like `move_to`.
    pub fn line_to(&mut self, pos: Pos2) -> &mut Self {
        self.current.get_or_insert_with(Vec::new).push(pos);
        self
    }

    pub fn close_path(&mut self) -> &mut Self {
        let start = self.current.as_ref().and_then(|points| points.first().copied());
        self.flush(true);
        // A new subpath starts where the closed one began
        self.current = start.map(|pos| vec![pos]);
        self
    }

    pub fn arc(&mut self, center: Pos2, radius: f32, start_angle: f32, end_angle: f32) -> &mut Self {
        self.flush(false);
        self.elements.push(PathElement::Arc { center, radius, start_angle, end_angle });
        self
    }

    pub fn rect(&mut self, rect: Rect) -> &mut Self {
        self.flush(false);
        self.elements.push(PathElement::Rect(rect));
        self
    }

    pub fn build(mut self) -> Path {
        self.flush(false);
        // A lone point left over from close_path draws nothing
        self.elements.retain(|el| !matches!(el, PathElement::Polyline { points, closed: false } if points.len() < 2));
        Path { elements: self.elements }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    #[test]
    fn test_line_to_on_empty_path_starts_subpath() {
        let mut builder = Path::builder();
        builder.line_to(pos2(1.0, 1.0)).line_to(pos2(5.0, 1.0));
        let path = builder.build();
        assert_eq!(
            path.elements(),
            &[PathElement::Polyline { points: vec![pos2(1.0, 1.0), pos2(5.0, 1.0)], closed: false }]
        );
    }

    #[test]
    fn test_close_path_marks_polyline_closed() {
        let mut builder = Path::builder();
        builder.move_to(pos2(0.0, 0.0)).line_to(pos2(10.0, 0.0)).line_to(pos2(0.0, 10.0)).close_path();
        let path = builder.build();
        assert_eq!(path.elements().len(), 1);
        assert!(matches!(&path.elements()[0], PathElement::Polyline { closed: true, .. }));
    }

    #[test]
    fn test_full_arc_bounds() {
        let mut builder = Path::builder();
        builder.arc(pos2(100.0, 100.0), 50.0, 0.0, TAU);
        let bounds = builder.build().bounds();
        assert!((bounds.min.x - 50.0).abs() < 1e-3);
        assert!((bounds.min.y - 50.0).abs() < 1e-3);
        assert!((bounds.max.x - 150.0).abs() < 1e-3);
        assert!((bounds.max.y - 150.0).abs() < 1e-3);
    }

    #[test]
    fn test_rect_flattens_to_closed_quad() {
        let rect = Rect::from_min_size(pos2(5.0, 5.0), vec2(10.0, 20.0));
        let (points, closed) = PathElement::Rect(rect).flatten();
        assert!(closed);
        assert_eq!(points.len(), 4);
        assert_eq!(points[2], pos2(15.0, 25.0));
    }

    #[test]
    fn test_empty_path_bounds_are_nothing() {
        let path = Path::default();
        assert!(path.is_empty());
        assert!(!path.bounds().is_positive());
    }
}
