//! Diagram Theme
//!
//! Colors, stroke widths and font settings used when painting a diagram.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// An opaque RGB color, written as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_color(s).ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parse a `#RRGGBB` (or `#RGB`) hex string
fn parse_hex_color(color_str: &str) -> Option<Color> {
    let hex = color_str.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::rgb(r, g, b))
        }
        3 => {
            let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        _ => None,
    }
}

/// Painting parameters for a diagram
#[derive(Debug, Clone)]
pub struct DiagramTheme {
    /// Canvas and plot background
    pub background: Color,

    /// Default text color (title, legend)
    pub text: Color,

    /// Edge line and arrowhead color
    pub edge_color: Color,
    pub edge_width: f64,

    /// Arrowhead marker size in pixels
    pub arrow_size: f64,

    /// Outline drawn around every node marker
    pub node_outline: Color,
    pub node_outline_width: f64,

    /// Node label text
    pub label_color: Color,
    pub label_size: f64,

    pub legend_font_size: f64,
    pub legend_marker_size: f64,
    pub title_font_size: f64,

    pub font_family: String,
}

impl Default for DiagramTheme {
    fn default() -> Self {
        Self::light()
    }
}

impl DiagramTheme {
    /// White canvas, grey edges, black labels
    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            text: Color::rgb(0x44, 0x44, 0x44),
            edge_color: Color::rgb(0x66, 0x66, 0x66),
            edge_width: 2.0,
            arrow_size: 8.0,
            node_outline: Color::WHITE,
            node_outline_width: 2.0,
            label_color: Color::BLACK,
            label_size: 9.0,
            legend_font_size: 12.0,
            legend_marker_size: 12.0,
            title_font_size: 17.0,
            font_family: "Open Sans, Verdana, Arial, sans-serif".to_string(),
        }
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// First family of the font stack, used as the rasterizer fallback
    pub fn primary_font(&self) -> &str {
        self.font_family
            .split(',')
            .map(str::trim)
            .find(|f| !f.is_empty())
            .unwrap_or("sans-serif")
    }
}
