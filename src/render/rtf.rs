//! RTF output
//!
//! Colors and fonts are collected into index tables while spans render,
//! then written into the document header by `post_highlight`.

use std::borrow::Cow;
use std::fmt::Write;

use crate::encoding::{html_decode, html_encode};
use crate::syntax::{
    Color, Definition, Font, FontStyle, MarkupCaptures, MarkupPattern, Pattern, Style,
};

use super::Renderer;

/// Font used when a style names none
pub const DEFAULT_FONT: &str = "Courier New";

/// RTF renderer. Holds per-call tables, so use a fresh one per document.
#[derive(Debug, Clone, Default)]
pub struct RtfRenderer {
    /// Color table entries; index 0 in the document is "auto"
    colors: Vec<(u8, u8, u8)>,
    fonts: Vec<String>,
    default_style: String,
}

impl RtfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn color_index(&mut self, color: Option<&Color>) -> usize {
        let Some(color) = color else { return 0 };
        let rgb = (color.r, color.g, color.b);
        match self.colors.iter().position(|c| *c == rgb) {
            Some(i) => i + 1,
            None => {
                self.colors.push(rgb);
                self.colors.len()
            }
        }
    }

    fn font_index(&mut self, family: &str) -> usize {
        match self.fonts.iter().position(|f| f == family) {
            Some(i) => i,
            None => {
                self.fonts.push(family.to_string());
                self.fonts.len() - 1
            }
        }
    }

    /// Control words for a style, registering its color and font
    fn control_words(&mut self, style: &Style) -> String {
        let fore = self.color_index(style.fore_color.as_ref());
        let back = self.color_index(style.back_color.as_ref());

        let (family, size, font_style) = match &style.font {
            Some(Font { family, size, style }) => (
                if family.is_empty() { DEFAULT_FONT } else { family.as_str() },
                if *size > 0.0 { *size } else { Font::DEFAULT_SIZE },
                *style,
            ),
            None => (DEFAULT_FONT, Font::DEFAULT_SIZE, FontStyle::Regular),
        };
        let font = self.font_index(family);

        let mut words = format!(
            r"\cf{}\highlight{}\f{}\fs{}",
            fore,
            back,
            font,
            (size * 2.0).round() as i32
        );
        words.push_str(match font_style {
            FontStyle::Regular => "",
            FontStyle::Bold => r"\b",
            FontStyle::Italic => r"\i",
            FontStyle::Underline => r"\ul",
            FontStyle::Strikeout => r"\strike",
        });
        words
    }

    fn group(&mut self, style: &Style, text: &str) -> String {
        format!("{{{} {}}}", self.control_words(style), escape(&html_decode(text)))
    }

    fn font_table(&self) -> String {
        let mut table = String::new();
        for (i, family) in self.fonts.iter().enumerate() {
            let _ = write!(table, r"{{\f{} {};}}", i, family);
        }
        table
    }

    fn color_table(&self) -> String {
        let mut table = String::new();
        for (r, g, b) in &self.colors {
            let _ = write!(table, r"\red{}\green{}\blue{};", r, g, b);
        }
        table
    }
}

/// Escape text for an RTF body.
///
/// Non-ASCII characters become `\uN?` with N the signed UTF-16 unit.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '\t' => out.push_str(r"\tab "),
            '\n' => out.push_str("\\par\n"),
            '\r' => {}
            c if c.is_ascii() => out.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, r"\u{}?", *unit as i16);
                }
            }
        }
    }
    out
}

impl Renderer for RtfRenderer {
    fn pre_highlight(&mut self, definition: &Definition, input: &str) -> String {
        self.colors.clear();
        self.fonts.clear();
        // The default style goes first so its font is \f0
        self.default_style = self.control_words(definition.default_style());
        html_encode(input)
    }

    fn post_highlight(&mut self, _definition: &Definition, output: String) -> String {
        format!(
            r"{{\rtf1\ansi\deff0{{\fonttbl{}}}{{\colortbl;{}}}{{{} {}}}}}",
            self.font_table(),
            self.color_table(),
            self.default_style,
            output
        )
    }

    fn render_text<'t>(&mut self, _definition: &Definition, text: &'t str) -> Cow<'t, str> {
        Cow::Owned(escape(&html_decode(text)))
    }

    fn render_plain(&mut self, _definition: &Definition, pattern: &Pattern, text: &str) -> String {
        self.group(pattern.style(), text)
    }

    fn render_markup(
        &mut self,
        _definition: &Definition,
        pattern: &MarkupPattern,
        captures: &MarkupCaptures<'_>,
    ) -> String {
        let mut out = String::from("{");

        out.push_str(&self.group(&pattern.bracket_style, captures.open_tag));
        out.push_str(&escape(captures.ws1));
        out.push_str(&self.group(&pattern.style, captures.tag_name));

        for attribute in &captures.attributes {
            out.push_str(&escape(attribute.ws2));
            if !pattern.highlight_attributes {
                let raw = format!("{}{}{}", attribute.name, attribute.ws3, attribute.assignment());
                out.push_str(&escape(&html_decode(&raw)));
                continue;
            }

            out.push_str(&self.group(&pattern.attribute_name_style, attribute.name));
            out.push_str(&escape(attribute.ws3));
            let assignment = attribute.assignment();
            if !assignment.is_empty() {
                out.push_str(&self.group(&pattern.attribute_value_style, &assignment));
            }
        }

        out.push_str(&escape(captures.ws5));
        out.push_str(&self.group(&pattern.bracket_style, captures.close_tag));
        out.push('}');
        out
    }
}
