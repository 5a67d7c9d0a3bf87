//! XML output: one element per recognized span

use std::fmt::Write;

use crate::syntax::{Definition, MarkupCaptures, MarkupPattern, Pattern};

use super::Renderer;

/// Wraps each span in an element named after its pattern.
///
/// Span text is already entity-encoded by `pre_highlight`, so it is
/// valid element content as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlRenderer;

fn element(out: &mut String, name: &str, content: &str) {
    let _ = write!(out, "<{0}>{1}</{0}>", name, content);
}

impl Renderer for XmlRenderer {
    fn post_highlight(&mut self, _definition: &Definition, output: String) -> String {
        format!("<highlightedInput>{}</highlightedInput>", output)
    }

    fn render_plain(&mut self, _definition: &Definition, pattern: &Pattern, text: &str) -> String {
        let mut out = String::new();
        element(&mut out, pattern.name(), text);
        out
    }

    fn render_markup(
        &mut self,
        _definition: &Definition,
        pattern: &MarkupPattern,
        captures: &MarkupCaptures<'_>,
    ) -> String {
        let mut inner = String::new();
        element(&mut inner, "openTag", captures.open_tag);
        element(&mut inner, "whitespace", captures.ws1);
        element(&mut inner, "tagName", captures.tag_name);

        let mut attributes = String::new();
        for attribute in &captures.attributes {
            element(&mut attributes, "whitespace", attribute.ws2);
            element(&mut attributes, "attribName", attribute.name);
            element(&mut attributes, "whitespace", attribute.ws3);
            if !attribute.value.trim().is_empty() {
                element(&mut attributes, "attribValue", &attribute.assignment());
            }
        }
        element(&mut inner, "attribute", &attributes);

        element(&mut inner, "whitespace", captures.ws5);
        element(&mut inner, "closeTag", captures.close_tag);

        let mut out = String::new();
        element(&mut out, &pattern.name, &inner);
        out
    }
}
