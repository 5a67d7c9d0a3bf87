//! JavaScript definition

use super::{default_style, fg};
use crate::error::Result;
use crate::syntax::language::Definition;
use crate::syntax::rules::{BlockPattern, Pattern, WordPattern};

const KEYWORDS: &[&str] = &[
    "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "export", "extends", "finally", "for", "function", "if", "import", "in",
    "instanceof", "let", "new", "of", "return", "static", "super", "switch", "this", "throw", "try",
    "typeof", "var", "void", "while", "with", "yield",
];

const LITERALS: &[&str] = &["false", "null", "true", "undefined", "NaN", "Infinity"];

/// Create JavaScript definition
pub fn javascript_definition() -> Result<Definition> {
    let patterns: Vec<Pattern> = vec![
        BlockPattern::new("MultiLineComment", fg("green")?, "/*", "*/").into(),
        BlockPattern::new("Comment", fg("green")?, "//", r"\n").into(),
        BlockPattern::with_escape("String", fg("maroon")?, "\"", "\"", "\\").into(),
        BlockPattern::with_escape("SingleQuotedString", fg("maroon")?, "'", "'", "\\").into(),
        BlockPattern::with_escape("TemplateString", fg("maroon")?, "`", "`", "\\").into(),
        WordPattern::new("Keyword", fg("blue")?, KEYWORDS.iter().copied()).into(),
        WordPattern::new("Literal", fg("navy")?, LITERALS.iter().copied()).into(),
    ];

    Definition::new("JavaScript", true, default_style()?, patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::html_encode;

    #[test]
    fn test_template_string_spans_lines() {
        let def = javascript_definition().unwrap();
        let encoded = html_encode("let t = `a\n${x}`;");
        let spans: Vec<_> = def.spans(&encoded).map(|s| s.unwrap()).collect();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].pattern.name(), "TemplateString");
        assert_eq!(spans[1].text, "`a\n${x}`");
    }

    #[test]
    fn test_comparison_is_not_markup() {
        let def = javascript_definition().unwrap();
        let encoded = html_encode("if (a < b && c > d) return null;");
        let names: Vec<_> = def
            .spans(&encoded)
            .map(|s| s.unwrap().pattern.name().to_string())
            .collect();
        assert_eq!(names, vec!["Keyword", "Keyword", "Literal"]);
    }
}
