//! Highlighting pipeline
//!
//! `highlight` is a pure function of a definition, a renderer and the
//! input: encode, scan once with the composite matcher, hand every span
//! to the renderer, wrap.

use tracing::debug;

use crate::error::Result;
use crate::render::Renderer;
use crate::syntax::{Definition, MatchedSpan, Pattern};

/// Highlight `input` with `definition`, formatting through `renderer`.
///
/// Text that no pattern recognizes goes through `render_text`. Any error
/// aborts the whole call; there is no partially highlighted result.
pub fn highlight<R>(definition: &Definition, renderer: &mut R, input: &str) -> Result<String>
where
    R: Renderer + ?Sized,
{
    let encoded = renderer.pre_highlight(definition, input);

    let mut output = String::with_capacity(encoded.len() * 2);
    let mut last = 0;
    let mut count = 0usize;

    for span in definition.spans(&encoded) {
        let span = span?;
        output.push_str(&renderer.render_text(definition, &encoded[last..span.start]));
        output.push_str(&render_span(definition, renderer, &span));
        last = span.end;
        count += 1;
    }
    output.push_str(&renderer.render_text(definition, &encoded[last..]));

    debug!(
        "Highlighted {} bytes with {}: {} spans",
        input.len(),
        definition.name(),
        count
    );

    Ok(renderer.post_highlight(definition, output))
}

/// Route one span to the renderer by pattern kind
fn render_span<R>(definition: &Definition, renderer: &mut R, span: &MatchedSpan<'_, '_>) -> String
where
    R: Renderer + ?Sized,
{
    match (span.pattern, &span.markup) {
        (Pattern::Markup(markup), Some(captures)) => {
            renderer.render_markup(definition, markup, captures)
        }
        (pattern, _) => renderer.render_plain(definition, pattern, span.text),
    }
}
