//! Declarative, regex-driven source highlighting
//!
//! A [`Definition`](syntax::Definition) describes a language as an ordered
//! list of block, word and markup patterns. The patterns are compiled into
//! one composite regex; [`engine::highlight`] scans the input once with it
//! and hands each recognized span to a [`Renderer`](render::Renderer),
//! which produces HTML, RTF, XML or ANSI terminal output.
//!
//! ```no_run
//! use highlight::{Highlighter, OutputFormat};
//!
//! let mut highlighter = Highlighter::new()?;
//! highlighter.set_format(OutputFormat::HtmlCss);
//! let html = highlighter.highlight("C#", "public class A { }")?;
//! # Ok::<(), highlight::HighlightError>(())
//! ```

pub mod config;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod render;
pub mod syntax;

pub use config::Config;
pub use engine::highlight;
pub use error::{HighlightError, Result};
pub use render::{OutputFormat, Renderer};
pub use syntax::{Definition, Highlighter};
