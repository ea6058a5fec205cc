use egui::{Align2, Color32, Context, Painter, Rect, Shape, Vec2, pos2};

use crate::path::Path;
use crate::surface::{Canvas, DrawCommand};
use crate::texture_manager::TextureManager;

pub const BACKGROUND: Color32 = Color32::WHITE;

/// Replays a [`Canvas`] display list with egui's painter
pub struct Renderer {
    textures: TextureManager,
}

impl Renderer {
    pub fn new(texture_cache_size: usize) -> Self {
        Self {
            textures: TextureManager::new(texture_cache_size),
        }
    }

    /// Shapes for a stroked path, translated by `offset`
    pub fn path_shapes(path: &Path, stroke: egui::Stroke, offset: Vec2) -> Vec<Shape> {
        path.elements()
            .iter()
            .map(|element| {
                let (points, closed) = element.flatten();
                let points: Vec<_> = points.into_iter().map(|p| p + offset).collect();
                if closed {
                    Shape::closed_line(points, stroke)
                } else {
                    Shape::line(points, stroke)
                }
            })
            .collect()
    }

    /// Paint the canvas into `rect`; canvas (0, 0) maps to `rect.min`.
    pub fn render(&mut self, ctx: &Context, painter: &Painter, rect: Rect, canvas: &Canvas) {
        self.textures.begin_frame();
        let painter = painter.with_clip_rect(rect);
        painter.rect_filled(rect, 0.0, BACKGROUND);

        let offset = rect.min.to_vec2();
        for command in canvas.commands() {
            match command {
                DrawCommand::Stroke { path, stroke } => {
                    painter.extend(Self::path_shapes(path, *stroke, offset));
                }
                DrawCommand::Text { text, pos, font, color } => {
                    painter.text(*pos + offset, Align2::LEFT_BOTTOM, text, font.clone(), *color);
                }
                DrawCommand::Image { bitmap, pos } => {
                    let texture = self.textures.get_or_create_texture(bitmap, ctx);
                    let image_rect = Rect::from_min_size(*pos + offset, bitmap.size());
                    let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                    painter.image(texture, image_rect, uv, Color32::WHITE);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Bitmap;
    use crate::controller::DrawingController;
    use crate::geometry;
    use crate::surface::Surface;
    use egui::{Stroke, vec2};

    #[test]
    fn test_path_shapes_are_offset() {
        let path = Path::line(pos2(0.0, 0.0), pos2(10.0, 0.0));
        let shapes = Renderer::path_shapes(&path, Stroke::new(1.0, Color32::BLACK), vec2(5.0, 7.0));
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].visual_bounding_rect().center().y, 7.0);
    }

    #[test]
    fn test_render_basics() {
        let ctx = Context::default();
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        let painter = Painter::new(ctx.clone(), egui::LayerId::background(), rect);

        let mut canvas = Canvas::new(rect.size());
        canvas.stroke_path(&geometry::circle(pos2(50.0, 50.0)), Stroke::new(1.0, Color32::RED));

        let mut renderer = Renderer::new(4);
        renderer.render(&ctx, &painter, rect, &canvas);
    }

    #[test]
    fn test_render_image_wider_than_texture_limit() {
        let ctx = Context::default();
        let max_side = ctx.input(|i| i.max_texture_side);
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(640.0, 480.0));
        let painter = Painter::new(ctx.clone(), egui::LayerId::background(), rect);

        let mut ctl = DrawingController::new(Canvas::new(rect.size()));
        ctl.set_image(Bitmap::new(egui::ColorImage::new([max_side + 1, 1], Color32::RED)));

        let mut renderer = Renderer::new(4);
        renderer.render(&ctx, &painter, rect, ctl.surface());
    }
}
