//! Style types for highlighted output
//!
//! Colors, fonts and the combined `Style` attached to patterns and
//! definitions. All of these are plain values, fixed once a definition is
//! built.

use std::fmt;
use std::str::FromStr;

use crate::error::{HighlightError, Result};

/// HTML color names understood by `Color::from_name`
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("white", (0xFF, 0xFF, 0xFF)),
    ("silver", (0xC0, 0xC0, 0xC0)),
    ("gray", (0x80, 0x80, 0x80)),
    ("grey", (0x80, 0x80, 0x80)),
    ("black", (0x00, 0x00, 0x00)),
    ("red", (0xFF, 0x00, 0x00)),
    ("maroon", (0x80, 0x00, 0x00)),
    ("yellow", (0xFF, 0xFF, 0x00)),
    ("olive", (0x80, 0x80, 0x00)),
    ("lime", (0x00, 0xFF, 0x00)),
    ("green", (0x00, 0x80, 0x00)),
    ("aqua", (0x00, 0xFF, 0xFF)),
    ("teal", (0x00, 0x80, 0x80)),
    ("blue", (0x00, 0x00, 0xFF)),
    ("navy", (0x00, 0x00, 0x80)),
    ("fuchsia", (0xFF, 0x00, 0xFF)),
    ("purple", (0x80, 0x00, 0x80)),
    ("orange", (0xFF, 0xA5, 0x00)),
    ("brown", (0xA5, 0x2A, 0x2A)),
    ("darkblue", (0x00, 0x00, 0x8B)),
    ("darkgreen", (0x00, 0x64, 0x00)),
    ("darkred", (0x8B, 0x00, 0x00)),
    ("darkcyan", (0x00, 0x8B, 0x8B)),
    ("darkmagenta", (0x8B, 0x00, 0x8B)),
    ("darkorange", (0xFF, 0x8C, 0x00)),
    ("darkgray", (0xA9, 0xA9, 0xA9)),
    ("darkgrey", (0xA9, 0xA9, 0xA9)),
    ("lightgray", (0xD3, 0xD3, 0xD3)),
    ("lightgrey", (0xD3, 0xD3, 0xD3)),
];

/// A named color with its RGB value
///
/// The name is kept as written in the configuration and is what HTML
/// output emits; the RGB triple feeds the RTF and terminal renderers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    pub name: String,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a color from a name and RGB components
    pub fn new(name: &str, r: u8, g: u8, b: u8) -> Self {
        Self {
            name: name.to_string(),
            r,
            g,
            b,
        }
    }

    /// Resolve an HTML color name or a `#RRGGBB` / `#RGB` hex value
    pub fn from_name(name: &str) -> Result<Self> {
        let trimmed = name.trim();

        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex)
                .map(|(r, g, b)| Color::new(trimmed, r, g, b))
                .ok_or_else(|| HighlightError::UnknownColor(name.to_string()));
        }

        let lower = trimmed.to_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(known, _)| *known == lower)
            .map(|(_, (r, g, b))| Color::new(&lower, *r, *g, *b))
            .ok_or_else(|| HighlightError::UnknownColor(name.to_string()))
    }

    /// Hex form, `#RRGGBB`
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some((r, g, b))
        }
        _ => None,
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Font style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
    Underline,
    Strikeout,
}

impl FromStr for FontStyle {
    type Err = HighlightError;

    /// Case-insensitive, as written in definition files
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "regular" | "normal" => Ok(FontStyle::Regular),
            "bold" => Ok(FontStyle::Bold),
            "italic" => Ok(FontStyle::Italic),
            "underline" => Ok(FontStyle::Underline),
            "strikeout" => Ok(FontStyle::Strikeout),
            _ => Err(HighlightError::UnknownFontStyle(s.to_string())),
        }
    }
}

/// Font family, size in points and style
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f32,
    pub style: FontStyle,
}

impl Font {
    pub const DEFAULT_SIZE: f32 = 11.0;

    pub fn new(family: &str, size: f32, style: FontStyle) -> Self {
        Self {
            family: family.to_string(),
            size,
            style,
        }
    }
}

/// Text style attributes
///
/// `None` colors mean "unset": renderers emit nothing for them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    /// Foreground color
    pub fore_color: Option<Color>,
    /// Background color
    pub back_color: Option<Color>,
    /// Font, if the configuration names one
    pub font: Option<Font>,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fore_color: Some(color),
            ..Default::default()
        }
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.back_color = Some(color);
        self
    }

    /// Builder: set font
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    /// Same colors, different font. Markup sub-styles share the tag font.
    pub fn with_font_of(mut self, other: &Style) -> Self {
        self.font = other.font.clone();
        self
    }

    /// Builder: bold, keeping any configured family and size
    pub fn with_bold(mut self) -> Self {
        let font = self
            .font
            .take()
            .unwrap_or_else(|| Font::new("", 0.0, FontStyle::Regular));
        self.font = Some(Font {
            style: FontStyle::Bold,
            ..font
        });
        self
    }

    pub fn is_bold(&self) -> bool {
        matches!(&self.font, Some(font) if font.style == FontStyle::Bold)
    }

    pub fn font_style(&self) -> Option<FontStyle> {
        self.font.as_ref().map(|font| font.style)
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_name() {
        let blue = Color::from_name("Blue").unwrap();
        assert_eq!(blue.name, "blue");
        assert_eq!((blue.r, blue.g, blue.b), (0, 0, 255));

        let hex = Color::from_name("#008000").unwrap();
        assert_eq!(hex.name, "#008000");
        assert_eq!((hex.r, hex.g, hex.b), (0, 128, 0));

        let short = Color::from_name("#f0a").unwrap();
        assert_eq!((short.r, short.g, short.b), (255, 0, 170));
        assert_eq!(short.to_hex(), "#FF00AA");
    }

    #[test]
    fn test_color_unknown() {
        assert!(matches!(
            Color::from_name("blurple"),
            Err(HighlightError::UnknownColor(_))
        ));
        assert!(Color::from_name("#12345").is_err());
        assert!(Color::from_name("#gg0000").is_err());
    }

    #[test]
    fn test_font_style_parse() {
        assert_eq!("Bold".parse::<FontStyle>().unwrap(), FontStyle::Bold);
        assert_eq!("regular".parse::<FontStyle>().unwrap(), FontStyle::Regular);
        assert!("heavy".parse::<FontStyle>().is_err());
    }

    #[test]
    fn test_style_default() {
        let style = Style::default();
        assert!(style.is_default());
        assert!(style.fore_color.is_none());
        assert!(!style.is_bold());
    }

    #[test]
    fn test_style_builders() {
        let red = Color::from_name("red").unwrap();
        let style = Style::fg(red.clone())
            .with_font(Font::new("Consolas", 10.0, FontStyle::Italic))
            .with_bold();
        assert_eq!(style.fore_color, Some(red));
        assert!(style.is_bold());
        assert_eq!(style.font.as_ref().map(|f| f.family.as_str()), Some("Consolas"));
        assert!(!style.is_default());
    }
}
