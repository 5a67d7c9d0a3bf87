//! HTML output, with inline styles or CSS classes

use std::fmt::Write;

use crate::encoding::attribute_encode;
use crate::syntax::{Definition, FontStyle, MarkupCaptures, MarkupPattern, Pattern, Style};

use super::Renderer;

/// Class name for a definition, optionally followed by a pattern part.
///
/// `C#` becomes `Csharp`, `C++` becomes `Cplusplus`, `.` becomes `dot`
/// and `-` is dropped.
pub fn css_class_name(definition: &str, pattern: &str) -> String {
    let base = definition
        .replace('#', "sharp")
        .replace('+', "plus")
        .replace('.', "dot")
        .replace('-', "");
    format!("{}{}", base, pattern)
}

/// CSS declarations for a style. Unset colors and fonts emit nothing.
pub fn css_style(style: &Style) -> String {
    let mut css = String::new();

    if let Some(color) = &style.fore_color {
        let _ = write!(css, "color: {};", color);
    }
    if let Some(color) = &style.back_color {
        let _ = write!(css, "background-color: {};", color);
    }

    if let Some(font) = &style.font {
        if !font.family.is_empty() {
            let _ = write!(css, "font-family: {};", font.family);
        }
        if font.size > 0.0 {
            let _ = write!(css, "font-size: {}px;", font.size);
        }
        css.push_str(match font.style {
            FontStyle::Regular => "font-weight: normal;",
            FontStyle::Bold => "font-weight: bold;",
            FontStyle::Italic => "font-style: italic;",
            FontStyle::Underline => "text-decoration: underline;",
            FontStyle::Strikeout => "text-decoration: line-through;",
        });
    }

    css
}

/// HTML renderer
///
/// Spans carry either a `style` attribute built from the pattern style or
/// a `class` attribute built from the definition and pattern names.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer {
    use_css: bool,
}

impl HtmlRenderer {
    /// Inline `style` attributes
    pub fn inline() -> Self {
        Self { use_css: false }
    }

    /// CSS `class` attributes; pair with `stylesheet`
    pub fn css() -> Self {
        Self { use_css: true }
    }

    fn span(&self, definition: &Definition, style: &Style, suffix: &str, text: &str) -> String {
        if self.use_css {
            format!(
                r#"<span class="{}">{}</span>"#,
                css_class_name(definition.name(), suffix),
                text
            )
        } else {
            format!(r#"<span style="{}">{}</span>"#, attribute_encode(&css_style(style)), text)
        }
    }

    /// Style rules for every class name a definition can produce
    pub fn stylesheet(definition: &Definition) -> String {
        let mut sheet = String::new();
        let mut rule = |suffix: &str, style: &Style| {
            let _ = writeln!(
                sheet,
                ".{} {{ {} }}",
                css_class_name(definition.name(), suffix),
                css_style(style)
            );
        };

        rule("", definition.default_style());
        for pattern in definition.patterns() {
            match pattern {
                Pattern::Markup(markup) => {
                    rule(&format!("{}Bracket", markup.name), &markup.bracket_style);
                    rule(&format!("{}TagName", markup.name), &markup.style);
                    rule(&format!("{}AttributeName", markup.name), &markup.attribute_name_style);
                    rule(&format!("{}AttributeValue", markup.name), &markup.attribute_value_style);
                }
                other => rule(other.name(), other.style()),
            }
        }

        sheet
    }
}

impl Renderer for HtmlRenderer {
    fn post_highlight(&mut self, definition: &Definition, output: String) -> String {
        self.span(definition, definition.default_style(), "", &output)
    }

    fn render_plain(&mut self, definition: &Definition, pattern: &Pattern, text: &str) -> String {
        self.span(definition, pattern.style(), pattern.name(), text)
    }

    fn render_markup(
        &mut self,
        definition: &Definition,
        pattern: &MarkupPattern,
        captures: &MarkupCaptures<'_>,
    ) -> String {
        let bracket = format!("{}Bracket", pattern.name);
        let mut out = String::new();

        out.push_str(&self.span(definition, &pattern.bracket_style, &bracket, captures.open_tag));
        out.push_str(captures.ws1);
        out.push_str(&self.span(
            definition,
            &pattern.style,
            &format!("{}TagName", pattern.name),
            captures.tag_name,
        ));

        for attribute in &captures.attributes {
            out.push_str(attribute.ws2);
            if !pattern.highlight_attributes {
                out.push_str(attribute.name);
                out.push_str(attribute.ws3);
                out.push_str(&attribute.assignment());
                continue;
            }

            out.push_str(&self.span(
                definition,
                &pattern.attribute_name_style,
                &format!("{}AttributeName", pattern.name),
                attribute.name,
            ));
            out.push_str(attribute.ws3);
            let assignment = attribute.assignment();
            if !assignment.is_empty() {
                out.push_str(&self.span(
                    definition,
                    &pattern.attribute_value_style,
                    &format!("{}AttributeValue", pattern.name),
                    &assignment,
                ));
            }
        }

        out.push_str(captures.ws5);
        out.push_str(&self.span(definition, &pattern.bracket_style, &bracket, captures.close_tag));
        out
    }
}
