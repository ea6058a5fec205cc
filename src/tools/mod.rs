use std::fmt;

use crate::geometry::Stamp;

/// The interaction mode that decides how pointer events are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    #[default]
    Freehand,
    Ruler,
    MoveImage,
    Circle,
    Square,
    Triangle,
    Star,
}

impl Tool {
    /// All tools, in toolbar order.
    pub const ALL: [Tool; 7] = [
        Tool::Freehand,
        Tool::Ruler,
        Tool::MoveImage,
        Tool::Circle,
        Tool::Square,
        Tool::Triangle,
        Tool::Star,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Freehand => "Draw",
            Tool::Ruler => "Ruler",
            Tool::MoveImage => "Move image",
            Tool::Circle => "Circle",
            Tool::Square => "Square",
            Tool::Triangle => "Triangle",
            Tool::Star => "Star",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tool::Freehand => "✏",
            Tool::Ruler => "📏",
            Tool::MoveImage => "✋",
            Tool::Circle => "○",
            Tool::Square => "□",
            Tool::Triangle => "△",
            Tool::Star => "☆",
        }
    }

    /// The shape this tool stamps on press, if it is a stamp tool.
    pub fn stamp(&self) -> Option<Stamp> {
        match self {
            Tool::Circle => Some(Stamp::Circle),
            Tool::Square => Some(Stamp::Square),
            Tool::Triangle => Some(Stamp::Triangle),
            Tool::Star => Some(Stamp::Star),
            Tool::Freehand | Tool::Ruler | Tool::MoveImage => None,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tool_is_freehand() {
        assert_eq!(Tool::default(), Tool::Freehand);
    }

    #[test]
    fn test_only_shape_tools_stamp() {
        let stamping: Vec<_> = Tool::ALL.iter().filter(|t| t.stamp().is_some()).collect();
        assert_eq!(stamping, [&Tool::Circle, &Tool::Square, &Tool::Triangle, &Tool::Star]);
    }
}
