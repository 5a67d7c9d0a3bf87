//! Definitions for syntax highlighting
//!
//! A `Definition` is a named, ordered set of patterns plus a default style
//! and a case sensitivity flag. It compiles its composite matcher once, on
//! construction, and is read-only afterwards.

use std::fmt;

use tracing::debug;

use super::matcher::{CompositeMatcher, Spans};
use super::rules::{Pattern, PatternType};
use super::style::Style;
use crate::error::{HighlightError, Result};

/// A complete definition for one language
#[derive(Debug)]
pub struct Definition {
    name: String,
    case_sensitive: bool,
    default_style: Style,
    /// Patterns in declaration order
    patterns: Vec<Pattern>,
    matcher: CompositeMatcher,
}

impl Definition {
    /// Build a definition and compile its matcher.
    ///
    /// Fails on duplicate or unusable pattern names, and when the
    /// composite does not compile.
    pub fn new(
        name: &str,
        case_sensitive: bool,
        default_style: Style,
        patterns: Vec<Pattern>,
    ) -> Result<Self> {
        for (i, pattern) in patterns.iter().enumerate() {
            pattern.validate()?;
            if patterns[..i].iter().any(|p| p.name() == pattern.name()) {
                return Err(HighlightError::DuplicatePattern {
                    definition: name.to_string(),
                    pattern: pattern.name().to_string(),
                });
            }
        }

        let composite = compose(&patterns);
        debug!("Compiling definition {} ({} patterns)", name, patterns.len());
        let matcher = CompositeMatcher::new(&composite, case_sensitive)?;

        Ok(Self {
            name: name.to_string(),
            case_sensitive,
            default_style,
            patterns,
            matcher,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn default_style(&self) -> &Style {
        &self.default_style
    }

    /// Patterns in declaration order
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Look up a pattern by name
    pub fn pattern(&self, name: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.name() == name)
    }

    pub fn matcher(&self) -> &CompositeMatcher {
        &self.matcher
    }

    /// Recognized spans in `text`, left to right
    pub fn spans<'t>(&self, text: &'t str) -> Spans<'_, 't> {
        Spans::new(self, text)
    }

    /// The composite regex source, without the case flag
    pub fn to_composite_pattern(&self) -> String {
        compose(&self.patterns)
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Join all sub-patterns into the category-ordered alternation.
///
/// Each pattern sits in a group named after itself, each category in a
/// group named after the category. Blocks are tried before markup and
/// markup before words; inside a category, declaration order decides.
/// Categories and patterns with empty fragments are left out.
fn compose(patterns: &[Pattern]) -> String {
    let mut categories = Vec::new();

    for pattern_type in PatternType::PRIORITY {
        let members = patterns
            .iter()
            .filter(|p| p.pattern_type() == pattern_type)
            .filter_map(|p| {
                let fragment = p.to_sub_pattern();
                if fragment.is_empty() {
                    None
                } else {
                    Some(format!("(?P<{}>{})", p.name(), fragment))
                }
            })
            .collect::<Vec<_>>();

        if !members.is_empty() {
            categories.push(format!("(?P<{}>{})+?", pattern_type.group_name(), members.join("|")));
        }
    }

    categories.join("|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::rules::{BlockPattern, MarkupPattern, WordPattern};

    fn sample_patterns() -> Vec<Pattern> {
        vec![
            WordPattern::new("Keyword", Style::default(), ["class"]).into(),
            BlockPattern::new("Comment", Style::default(), "//", r"\n").into(),
            MarkupPattern::new("Tag", Style::default(), false).into(),
            BlockPattern::new("String", Style::default(), "'", "'").into(),
        ]
    }

    #[test]
    fn test_composite_order() {
        let def = Definition::new("Test", true, Style::default(), sample_patterns()).unwrap();
        let composite = def.to_composite_pattern();

        let blocks = composite.find("(?P<blocks>").unwrap();
        let markup = composite.find("(?P<markup>").unwrap();
        let words = composite.find("(?P<words>").unwrap();
        assert!(blocks < markup && markup < words);

        // Declared order within the category
        let comment = composite.find("(?P<Comment>").unwrap();
        let string = composite.find("(?P<String>").unwrap();
        assert!(comment < string);
        assert!(composite.starts_with("(?P<blocks>(?P<Comment>//[^\\n\\r]*)|(?P<String>'"));
    }

    #[test]
    fn test_composite_skips_empty() {
        let patterns: Vec<Pattern> = vec![
            WordPattern::new("Empty", Style::default(), Vec::<String>::new()).into(),
            WordPattern::new("Keyword", Style::default(), ["if"]).into(),
        ];
        let def = Definition::new("Test", true, Style::default(), patterns).unwrap();
        let composite = def.to_composite_pattern();
        assert!(composite.starts_with("(?P<words>(?P<Keyword>"));
        assert!(!composite.contains("Empty"));
        assert!(!composite.contains("blocks"));
    }

    #[test]
    fn test_duplicate_pattern_names() {
        let patterns: Vec<Pattern> = vec![
            WordPattern::new("Keyword", Style::default(), ["if"]).into(),
            BlockPattern::new("Keyword", Style::default(), "/*", "*/").into(),
        ];
        let err = Definition::new("C#", true, Style::default(), patterns).unwrap_err();
        assert!(matches!(
            err,
            HighlightError::DuplicatePattern { ref definition, ref pattern }
                if definition == "C#" && pattern == "Keyword"
        ));
    }

    #[test]
    fn test_lookup() {
        let def = Definition::new("Test", false, Style::default(), sample_patterns()).unwrap();
        assert_eq!(def.name(), "Test");
        assert!(!def.case_sensitive());
        assert_eq!(def.patterns().len(), 4);
        assert_eq!(def.pattern("Tag").map(|p| p.pattern_type()), Some(PatternType::Markup));
        assert!(def.pattern("Missing").is_none());
    }

    #[test]
    fn test_empty_definition() {
        let def = Definition::new("Plain", true, Style::default(), Vec::new()).unwrap();
        assert_eq!(def.to_composite_pattern(), "");
    }
}
