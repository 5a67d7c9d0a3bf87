//! Definitions, patterns and matching
//!
//! A `Definition` is an ordered set of `Pattern`s compiled into a single
//! composite matcher. `Highlighter` keeps the loaded definitions and looks
//! them up by name.

mod builtin;
mod language;
mod loader;
mod manager;
mod matcher;
mod rules;
mod style;

pub use builtin::all_definitions as builtin_definitions;
pub use language::Definition;
pub use loader::{load_definitions_file, load_definitions_str};
pub use manager::{DefinitionSet, Highlighter};
pub use matcher::{CompositeMatcher, MatchedSpan, Spans};
pub use rules::{
    AttributeCapture, BlockPattern, MarkupCaptures, MarkupPart, MarkupPattern, Pattern, PatternType,
    WordPattern,
};
pub use style::{Color, Font, FontStyle, Style};
