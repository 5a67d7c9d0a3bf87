//! ANSI terminal output using crossterm

use std::borrow::Cow;

use crossterm::style::{
    Attribute, Color as TermColor, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::Command;

use crate::encoding::html_decode;
use crate::syntax::{Color, Definition, FontStyle, MarkupCaptures, MarkupPattern, Pattern, Style};

use super::Renderer;

/// Writes decoded text wrapped in 24-bit color and attribute escapes.
///
/// Font family and size have no terminal equivalent and are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalRenderer;

fn rgb(color: &Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

fn attribute(style: FontStyle) -> Option<Attribute> {
    match style {
        FontStyle::Regular => None,
        FontStyle::Bold => Some(Attribute::Bold),
        FontStyle::Italic => Some(Attribute::Italic),
        FontStyle::Underline => Some(Attribute::Underlined),
        FontStyle::Strikeout => Some(Attribute::CrossedOut),
    }
}

/// Emit `text` in `style`, resetting afterwards
fn styled(style: &Style, text: &str) -> String {
    let text = html_decode(text);
    if style.is_default() {
        return text.into_owned();
    }

    let mut out = String::new();
    if let Some(color) = &style.fore_color {
        let _ = SetForegroundColor(rgb(color)).write_ansi(&mut out);
    }
    if let Some(color) = &style.back_color {
        let _ = SetBackgroundColor(rgb(color)).write_ansi(&mut out);
    }
    if let Some(attr) = style.font_style().and_then(attribute) {
        let _ = SetAttribute(attr).write_ansi(&mut out);
    }
    out.push_str(&text);
    let _ = SetAttribute(Attribute::Reset).write_ansi(&mut out);
    let _ = ResetColor.write_ansi(&mut out);
    out
}

impl Renderer for TerminalRenderer {
    fn render_text<'t>(&mut self, _definition: &Definition, text: &'t str) -> Cow<'t, str> {
        html_decode(text)
    }

    fn render_plain(&mut self, _definition: &Definition, pattern: &Pattern, text: &str) -> String {
        styled(pattern.style(), text)
    }

    fn render_markup(
        &mut self,
        _definition: &Definition,
        pattern: &MarkupPattern,
        captures: &MarkupCaptures<'_>,
    ) -> String {
        let mut out = styled(&pattern.bracket_style, captures.open_tag);
        out.push_str(captures.ws1);
        out.push_str(&styled(&pattern.style, captures.tag_name));

        for attr in &captures.attributes {
            out.push_str(attr.ws2);
            if pattern.highlight_attributes {
                out.push_str(&styled(&pattern.attribute_name_style, attr.name));
                out.push_str(attr.ws3);
                let assignment = attr.assignment();
                if !assignment.is_empty() {
                    out.push_str(&styled(&pattern.attribute_value_style, &assignment));
                }
            } else {
                out.push_str(attr.name);
                out.push_str(attr.ws3);
                out.push_str(&html_decode(&attr.assignment()));
            }
        }

        out.push_str(captures.ws5);
        out.push_str(&styled(&pattern.bracket_style, captures.close_tag));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::highlight;
    use crate::syntax::{BlockPattern, WordPattern};

    #[test]
    fn test_unstyled_text_is_decoded() {
        let patterns: Vec<Pattern> =
            vec![BlockPattern::new("Comment", Style::default(), "/*", "*/").into()];
        let def = Definition::new("C", true, Style::default(), patterns).unwrap();
        let output = highlight(&def, &mut TerminalRenderer, "a < b /* & */").unwrap();
        assert_eq!(output, "a < b /* & */");
    }

    #[test]
    fn test_styled_span_keeps_text() {
        let blue = Color::from_name("blue").unwrap();
        let keyword = WordPattern::new("Keyword", Style::fg(blue).with_bold(), ["if"]);
        let patterns: Vec<Pattern> = vec![keyword.into()];
        let def = Definition::new("C", true, Style::default(), patterns).unwrap();
        let output = highlight(&def, &mut TerminalRenderer, "if x").unwrap();

        // Escapes may be suppressed by NO_COLOR, the text never is
        assert!(output.contains("if"));
        assert!(output.ends_with(" x"));
        assert!(!output.contains("&"));
    }

    #[test]
    fn test_attribute_mapping() {
        assert_eq!(attribute(FontStyle::Regular), None);
        assert_eq!(attribute(FontStyle::Italic), Some(Attribute::Italic));
        assert_eq!(attribute(FontStyle::Strikeout), Some(Attribute::CrossedOut));
        let c = Color::new("x", 1, 2, 3);
        assert_eq!(rgb(&c), TermColor::Rgb { r: 1, g: 2, b: 3 });
    }
}
