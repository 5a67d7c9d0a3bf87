//! HTML definition

use super::{default_style, fg};
use crate::error::Result;
use crate::syntax::language::Definition;
use crate::syntax::rules::{BlockPattern, MarkupPattern, Pattern};

/// Create HTML definition
pub fn html_definition() -> Result<Definition> {
    let tag = MarkupPattern::new("Tag", fg("maroon")?, true)
        .with_bracket_style(fg("blue")?)
        .with_attribute_styles(fg("red")?, fg("blue")?);

    let patterns: Vec<Pattern> = vec![
        BlockPattern::new("Comment", fg("green")?, "<!--", "-->").into(),
        BlockPattern::new("DocType", fg("gray")?, "<!", ">").into(),
        tag.into(),
    ];

    Definition::new("HTML", false, default_style()?, patterns)
}
