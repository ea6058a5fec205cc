use egui::Color32;
use std::fmt;
use std::str::FromStr;

use crate::error::ColorParseError;

/// The color used for every stroke, shape and text placed on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PenColor(Color32);

impl Default for PenColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl PenColor {
    pub const BLACK: Self = Self(Color32::BLACK);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Color32::from_rgb(r, g, b))
    }

    /// Parse `#rrggbb` or the short `#rgb` form.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(hex.to_owned()))?;

        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorParseError::InvalidDigit(hex.to_owned()))
        };

        match digits.len() {
            6 if digits.is_ascii() => Ok(Self::from_rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 if digits.is_ascii() => {
                // #abc expands to #aabbcc
                let expand = |i: usize| channel(&digits[i..=i]).map(|v| v * 17);
                Ok(Self::from_rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => Err(ColorParseError::InvalidLength(hex.to_owned())),
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0.r(), self.0.g(), self.0.b())
    }

    pub fn color32(&self) -> Color32 {
        self.0
    }
}

impl FromStr for PenColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for PenColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<PenColor> for Color32 {
    fn from(color: PenColor) -> Self {
        color.0
    }
}

pub const DEFAULT_PALETTE: [&str; 8] = [
    "#000000", "#ff0000", "#00a000", "#0000ff", "#ffa500", "#800080", "#ffff00", "#ffffff",
];

/// The row of color buttons. At most one swatch is active at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    swatches: Vec<PenColor>,
    active: Option<usize>,
}

impl Default for Palette {
    fn default() -> Self {
        let swatches = DEFAULT_PALETTE
            .iter()
            .filter_map(|hex| PenColor::from_hex(hex).ok())
            .collect();
        Self::new(swatches)
    }
}

impl Palette {
    /// Builds a palette; the swatch matching the default pen color starts active.
    pub fn new(swatches: Vec<PenColor>) -> Self {
        let active = swatches.iter().position(|c| *c == PenColor::default());
        Self { swatches, active }
    }

    /// Parses hex entries, skipping (and logging) the ones that don't parse.
    pub fn from_hex_list<S: AsRef<str>>(entries: &[S]) -> Self {
        let swatches = entries
            .iter()
            .filter_map(|entry| match PenColor::from_hex(entry.as_ref()) {
                Ok(color) => Some(color),
                Err(err) => {
                    log::warn!("Skipping palette entry: {}", err);
                    None
                }
            })
            .collect();
        Self::new(swatches)
    }

    pub fn swatches(&self) -> &[PenColor] {
        &self.swatches
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Marks swatch `index` as the only active one and returns its color.
    pub fn activate(&mut self, index: usize) -> Option<PenColor> {
        let color = *self.swatches.get(index)?;
        self.active = Some(index);
        Some(color)
    }

    /// Re-points the active marker at whichever swatch holds `color`.
    pub fn sync_to(&mut self, color: PenColor) {
        self.active = self.swatches.iter().position(|c| *c == color);
    }
}
