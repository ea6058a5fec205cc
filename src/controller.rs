use egui::{FontId, Pos2, Stroke, pos2};

use crate::bitmap::{Bitmap, SelectedImage};
use crate::color::{Palette, PenColor};
use crate::error::ImageLoadError;
use crate::input::PointerEvent;
use crate::path::Path;
use crate::state::PointerState;
use crate::surface::Surface;
use crate::tools::Tool;

/// Where `add_text` places its text (left end of the baseline)
pub const TEXT_ANCHOR: Pos2 = pos2(50.0, 50.0);
pub const TEXT_SIZE: f32 = 24.0;
pub const DEFAULT_LINE_WIDTH: f32 = 1.0;

/// Owns the tool, pen color, pointer state and uploaded image, and turns
/// user input into drawing calls on the surface.
pub struct DrawingController<S: Surface> {
    surface: S,
    tool: Tool,
    pen: PenColor,
    palette: Palette,
    line_width: f32,
    pointer: PointerState,
    image: Option<SelectedImage>,
}

impl<S: Surface> DrawingController<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            tool: Tool::default(),
            pen: PenColor::default(),
            palette: Palette::default(),
            line_width: DEFAULT_LINE_WIDTH,
            pointer: PointerState::default(),
            image: None,
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self.palette.sync_to(self.pen);
        self
    }

    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn pen_color(&self) -> PenColor {
        self.pen
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn selected_image(&self) -> Option<&SelectedImage> {
        self.image.as_ref()
    }

    fn pen_stroke(&self) -> Stroke {
        Stroke::new(self.line_width, self.pen.color32())
    }

    pub fn select_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            log::info!("Tool changed: {} -> {}", self.tool, tool);
        }
        self.tool = tool;
    }

    pub fn select_color(&mut self, color: PenColor) {
        log::info!("Pen color changed to {}", color);
        self.pen = color;
        self.palette.sync_to(color);
    }

    /// A click on color button `index`. Unknown indices are ignored.
    pub fn select_swatch(&mut self, index: usize) {
        match self.palette.activate(index) {
            Some(color) => {
                log::info!("Pen color changed to {} (swatch {})", color, index);
                self.pen = color;
            }
            None => log::warn!("No palette swatch at index {}", index),
        }
    }

    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(pos) => self.pointer_down(pos),
            PointerEvent::Move(pos) => self.pointer_move(pos),
            PointerEvent::Up => self.pointer_up(),
            PointerEvent::Leave => self.pointer_leave(),
        }
    }

    pub fn pointer_down(&mut self, pos: Pos2) {
        let previous = self.pointer.press(pos);
        log::debug!("Pointer down at {:?} with {}", pos, self.tool);

        match self.tool {
            Tool::Freehand => {}
            Tool::Ruler => {
                // Ruler preview: the surface only ever shows the latest line
                self.surface.clear();
                self.surface.stroke_path(&Path::line(previous, pos), self.pen_stroke());
            }
            Tool::MoveImage => {
                if self.image.is_some() {
                    self.pointer.begin_image_move();
                }
            }
            Tool::Circle | Tool::Square | Tool::Triangle | Tool::Star => {
                if let Some(stamp) = self.tool.stamp() {
                    self.surface.stroke_path(&stamp.path(pos), self.pen_stroke());
                }
            }
        }
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        if !self.pointer.is_drawing() {
            return;
        }

        match self.tool {
            Tool::Freehand => {
                let from = self.pointer.drag_to(pos);
                self.surface.stroke_path(&Path::line(from, pos), self.pen_stroke());
            }
            Tool::MoveImage => {
                if !self.pointer.is_moving_image() {
                    return;
                }
                self.pointer.drag_to(pos);
                if let Some(image) = &mut self.image {
                    image.position = pos;
                    self.surface.clear();
                    self.surface.draw_image(&image.bitmap, image.position);
                }
            }
            Tool::Ruler | Tool::Circle | Tool::Square | Tool::Triangle | Tool::Star => {}
        }
    }

    pub fn pointer_up(&mut self) {
        self.pointer.release();
    }

    pub fn pointer_leave(&mut self) {
        self.pointer.release();
    }

    /// Places `text` at the fixed anchor. Empty text is ignored.
    pub fn add_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        log::debug!("Adding text {:?}", text);
        let font = FontId::proportional(TEXT_SIZE);
        self.surface.fill_text(text, TEXT_ANCHOR, &font, self.pen.color32());
    }

    /// Makes `bitmap` the selected image at (0, 0) and draws it once.
    pub fn set_image(&mut self, bitmap: Bitmap) {
        let image = SelectedImage::new(bitmap);
        self.surface.draw_image(&image.bitmap, image.position);
        self.image = Some(image);
    }

    /// Completion of an asynchronous image load.
    ///
    /// A failed load leaves the current selection and the surface untouched
    /// and hands the error back to the caller.
    pub fn image_loaded(&mut self, result: Result<Bitmap, ImageLoadError>) -> Result<(), ImageLoadError> {
        let bitmap = result?;
        log::info!("Image ready: {:?}", bitmap);
        self.set_image(bitmap);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Canvas, DrawCommand};
    use egui::vec2;

    fn controller() -> DrawingController<Canvas> {
        DrawingController::new(Canvas::new(vec2(640.0, 480.0)))
    }

    #[test]
    fn test_ruler_draws_from_previous_anchor() {
        let mut ctl = controller();
        ctl.pointer_down(pos2(10.0, 10.0));
        ctl.pointer_move(pos2(40.0, 10.0));
        ctl.pointer_up();

        ctl.select_tool(Tool::Ruler);
        ctl.pointer_down(pos2(100.0, 80.0));

        let commands = ctl.surface().commands();
        assert_eq!(commands.len(), 1, "ruler clears earlier content");
        match &commands[0] {
            DrawCommand::Stroke { path, .. } => {
                assert_eq!(path, &Path::line(pos2(40.0, 10.0), pos2(100.0, 80.0)));
            }
            other => panic!("expected a stroke, got {other:?}"),
        }
    }

    #[test]
    fn test_ruler_ignores_moves() {
        let mut ctl = controller();
        ctl.select_tool(Tool::Ruler);
        ctl.pointer_down(pos2(5.0, 5.0));
        let after_down = ctl.surface().revision();
        ctl.pointer_move(pos2(50.0, 50.0));
        assert_eq!(ctl.surface().revision(), after_down);
    }

    #[test]
    fn test_move_without_press_draws_nothing() {
        let mut ctl = controller();
        ctl.pointer_move(pos2(1.0, 1.0));
        ctl.pointer_move(pos2(2.0, 2.0));
        assert!(ctl.surface().is_blank());
    }

    #[test]
    fn test_leave_ends_stroke() {
        let mut ctl = controller();
        ctl.pointer_down(pos2(0.0, 0.0));
        ctl.pointer_move(pos2(1.0, 0.0));
        ctl.pointer_leave();
        ctl.pointer_move(pos2(2.0, 0.0));
        assert_eq!(ctl.surface().commands().len(), 1);
        assert!(!ctl.pointer().is_drawing());
    }

    #[test]
    fn test_line_width_applies_to_strokes() {
        let mut ctl = controller().with_line_width(3.0);
        ctl.select_tool(Tool::Circle);
        ctl.pointer_down(pos2(60.0, 60.0));
        match &ctl.surface().commands()[0] {
            DrawCommand::Stroke { stroke, .. } => assert_eq!(stroke.width, 3.0),
            other => panic!("expected a stroke, got {other:?}"),
        }
    }
}
