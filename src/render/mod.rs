//! Renderers for highlighted output
//!
//! A renderer decides what a recognized span turns into. The engine calls
//! `pre_highlight` once on the raw input, then `render_text`,
//! `render_plain` or `render_markup` for each piece of the scan, and
//! finally `post_highlight` on the joined result.

mod html;
mod rtf;
mod terminal;
mod xml;

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::encoding::html_encode;
use crate::error::{HighlightError, Result};
use crate::syntax::{Definition, MarkupCaptures, MarkupPattern, Pattern};

pub use html::{css_class_name, css_style, HtmlRenderer};
pub use rtf::RtfRenderer;
pub use terminal::TerminalRenderer;
pub use xml::XmlRenderer;

/// Output format contract
///
/// Methods take `&mut self` so a renderer can collect state during one
/// call (the RTF font and color tables). Create one renderer per call.
pub trait Renderer {
    /// Transform the raw input before matching.
    ///
    /// Every built-in renderer entity-encodes here, which is what the
    /// markup and block fragments expect to see.
    fn pre_highlight(&mut self, _definition: &Definition, input: &str) -> String {
        html_encode(input)
    }

    /// Wrap the fully rendered output
    fn post_highlight(&mut self, _definition: &Definition, output: String) -> String {
        output
    }

    /// Text between matches. Passed through unchanged by default.
    fn render_text<'t>(&mut self, _definition: &Definition, text: &'t str) -> Cow<'t, str> {
        Cow::Borrowed(text)
    }

    /// A block or word match
    fn render_plain(&mut self, definition: &Definition, pattern: &Pattern, text: &str) -> String;

    /// A markup match with its sub-captures
    fn render_markup(
        &mut self,
        definition: &Definition,
        pattern: &MarkupPattern,
        captures: &MarkupCaptures<'_>,
    ) -> String;
}

/// Output formats callers can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum OutputFormat {
    /// HTML with inline `style` attributes
    #[default]
    Html,
    /// HTML with CSS class names
    HtmlCss,
    Rtf,
    Xml,
    /// ANSI escapes for a terminal
    Terminal,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Html,
        OutputFormat::HtmlCss,
        OutputFormat::Rtf,
        OutputFormat::Xml,
        OutputFormat::Terminal,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::HtmlCss => "html-css",
            OutputFormat::Rtf => "rtf",
            OutputFormat::Xml => "xml",
            OutputFormat::Terminal => "ansi",
        }
    }

    /// A fresh renderer for this format
    pub fn renderer(&self) -> Box<dyn Renderer> {
        match self {
            OutputFormat::Html => Box::new(HtmlRenderer::inline()),
            OutputFormat::HtmlCss => Box::new(HtmlRenderer::css()),
            OutputFormat::Rtf => Box::new(RtfRenderer::new()),
            OutputFormat::Xml => Box::new(XmlRenderer),
            OutputFormat::Terminal => Box::new(TerminalRenderer),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = HighlightError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "html" | "html-style" => Ok(OutputFormat::Html),
            "html-css" | "css" => Ok(OutputFormat::HtmlCss),
            "rtf" => Ok(OutputFormat::Rtf),
            "xml" => Ok(OutputFormat::Xml),
            "ansi" | "terminal" => Ok(OutputFormat::Terminal),
            _ => Err(HighlightError::UnknownFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = HighlightError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names_roundtrip() {
        for format in OutputFormat::ALL {
            assert_eq!(format.name().parse::<OutputFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_format_aliases() {
        assert_eq!("Terminal".parse::<OutputFormat>().unwrap(), OutputFormat::Terminal);
        assert_eq!("css".parse::<OutputFormat>().unwrap(), OutputFormat::HtmlCss);
        assert!(matches!(
            "pdf".parse::<OutputFormat>(),
            Err(HighlightError::UnknownFormat(_))
        ));
    }
}
