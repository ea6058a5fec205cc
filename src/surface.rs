use egui::{Color32, FontId, Pos2, Stroke, Vec2};

use crate::bitmap::Bitmap;
use crate::path::Path;

/// The drawing primitives the controller needs from a 2D surface.
pub trait Surface {
    /// Size of the drawable area.
    fn size(&self) -> Vec2;

    /// Wipe everything drawn so far.
    fn clear(&mut self);

    fn stroke_path(&mut self, path: &Path, stroke: Stroke);

    /// Fill `text` on a single line whose left end sits at `pos`; `pos.y` is
    /// the bottom of the line box.
    fn fill_text(&mut self, text: &str, pos: Pos2, font: &FontId, color: Color32);

    /// Draw `bitmap` at its natural size with its top-left corner at `pos`.
    fn draw_image(&mut self, bitmap: &Bitmap, pos: Pos2);
}

/// A single recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Stroke { path: Path, stroke: Stroke },
    Text { text: String, pos: Pos2, font: FontId, color: Color32 },
    Image { bitmap: Bitmap, pos: Pos2 },
}

/// Surface that keeps everything drawn since the last clear as a display list.
///
/// The renderer replays the list every frame, so the list is the canvas
/// content.
#[derive(Debug, Clone)]
pub struct Canvas {
    size: Vec2,
    commands: Vec<DrawCommand>,
    /// Bumped on every mutation
    revision: u64,
}

impl Canvas {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            commands: Vec::new(),
            revision: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_blank(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
        self.revision += 1;
    }
}

impl Surface for Canvas {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.revision += 1;
    }

    fn stroke_path(&mut self, path: &Path, stroke: Stroke) {
        if path.is_empty() {
            return;
        }
        self.push(DrawCommand::Stroke {
            path: path.clone(),
            stroke,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Pos2, font: &FontId, color: Color32) {
        self.push(DrawCommand::Text {
            text: text.to_owned(),
            pos,
            font: font.clone(),
            color,
        });
    }

    fn draw_image(&mut self, bitmap: &Bitmap, pos: Pos2) {
        self.push(DrawCommand::Image {
            bitmap: bitmap.clone(),
            pos,
        });
    }
}
