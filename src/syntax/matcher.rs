//! Composite matcher
//!
//! Runs the compiled composite regex over (encoded) text and works out,
//! for every match, which pattern fired. The scan is a single left to
//! right pass over non-overlapping matches.

use fancy_regex::{Captures, Regex, RegexBuilder};
use tracing::trace;

use super::language::Definition;
use super::rules::{MarkupCaptures, MarkupPart, MarkupPattern, Pattern, ENTITY_GUARD};
use crate::error::{HighlightError, Result};

/// The compiled composite regex of a definition
#[derive(Debug)]
pub struct CompositeMatcher {
    /// `None` when the definition has nothing to match
    regex: Option<Regex>,
}

impl CompositeMatcher {
    /// Upper bound on backtracking steps for a single match attempt
    pub const BACKTRACK_LIMIT: usize = 1_000_000;

    /// Compile a composite pattern. Case-insensitive definitions get the
    /// `(?i)` flag up front. Both ends of every match are kept out of
    /// encoded entities.
    pub fn new(composite: &str, case_sensitive: bool) -> Result<Self> {
        if composite.is_empty() {
            return Ok(Self { regex: None });
        }

        let flags = if case_sensitive { "" } else { "(?i)" };
        let source = format!("{0}{1}(?:{2}){1}", flags, ENTITY_GUARD, composite);
        let regex = RegexBuilder::new(&source)
            .backtrack_limit(Self::BACKTRACK_LIMIT)
            .build()?;
        Ok(Self { regex: Some(regex) })
    }

    /// The compiled source, including the case flag
    pub fn as_str(&self) -> Option<&str> {
        self.regex.as_ref().map(|r| r.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.regex.is_none()
    }
}

/// One recognized span, attributed to the pattern that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedSpan<'d, 't> {
    /// Byte offset where the span starts (inclusive)
    pub start: usize,
    /// Byte offset where the span ends (exclusive)
    pub end: usize,
    pub pattern: &'d Pattern,
    pub text: &'t str,
    /// Sub-captures, for markup patterns only
    pub markup: Option<MarkupCaptures<'t>>,
}

/// Iterator over the spans a definition recognizes in a text
pub struct Spans<'d, 't> {
    definition: &'d Definition,
    text: &'t str,
    pos: usize,
    done: bool,
}

impl<'d, 't> Spans<'d, 't> {
    pub(crate) fn new(definition: &'d Definition, text: &'t str) -> Self {
        Self {
            definition,
            text,
            pos: 0,
            done: false,
        }
    }
}

impl<'d, 't> Iterator for Spans<'d, 't> {
    type Item = Result<MatchedSpan<'d, 't>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let regex = self.definition.matcher().regex.as_ref()?;

        while self.pos <= self.text.len() {
            let caps = match regex.captures_from_pos(self.text, self.pos) {
                Ok(Some(caps)) => caps,
                Ok(None) => break,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            };
            let Some(whole) = caps.get(0) else { break };

            if whole.start() == whole.end() {
                // Step over one character so the scan always advances
                let step = self.text[whole.end()..].chars().next().map_or(1, |c| c.len_utf8());
                self.pos = whole.end() + step;
                continue;
            }
            self.pos = whole.end();

            let (start, end) = (whole.start(), whole.end());
            let result = dispatch(self.definition, &caps, start, end, whole.as_str());
            if result.is_err() {
                self.done = true;
            }
            return Some(result);
        }

        self.done = true;
        None
    }
}

/// Attribute a match to the first declared pattern whose group took part
/// in it, and collect markup sub-captures.
fn dispatch<'d, 't>(
    definition: &'d Definition,
    caps: &Captures<'t>,
    start: usize,
    end: usize,
    text: &'t str,
) -> Result<MatchedSpan<'d, 't>> {
    let pattern = definition
        .patterns()
        .iter()
        .find(|p| caps.name(p.name()).is_some())
        .ok_or_else(|| {
            HighlightError::InvalidArgument(format!(
                "match {:?} at {}..{} belongs to no pattern of {}",
                text, start, end, definition
            ))
        })?;

    trace!("{}..{} -> {}", start, end, pattern.name());

    let markup = match pattern {
        Pattern::Markup(markup) => Some(markup_captures(markup, caps)),
        _ => None,
    };

    Ok(MatchedSpan {
        start,
        end,
        pattern,
        text,
        markup,
    })
}

fn markup_captures<'t>(pattern: &MarkupPattern, caps: &Captures<'t>) -> MarkupCaptures<'t> {
    let part = |part: MarkupPart| -> &'t str {
        caps.name(&pattern.group_name(part)).map_or("", |m| m.as_str())
    };

    MarkupCaptures {
        open_tag: part(MarkupPart::OpenTag),
        ws1: part(MarkupPart::Ws1),
        tag_name: part(MarkupPart::TagName),
        attributes: MarkupPattern::scan_attributes(part(MarkupPart::Attributes)),
        ws5: part(MarkupPart::Ws5),
        close_tag: part(MarkupPart::CloseTag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::html_encode;
    use crate::syntax::rules::{BlockPattern, WordPattern};
    use crate::syntax::style::Style;

    fn spans_of(def: &Definition, text: &str) -> Vec<(String, String)> {
        def.spans(text)
            .map(|span| {
                let span = span.unwrap();
                (span.pattern.name().to_string(), span.text.to_string())
            })
            .collect()
    }

    fn csharp() -> Definition {
        let patterns: Vec<Pattern> = vec![
            BlockPattern::new("Comment", Style::default(), "//", r"\n").into(),
            WordPattern::new("Keyword", Style::default(), ["public", "class", "void", "return"])
                .into(),
        ];
        Definition::new("C#", true, Style::default(), patterns).unwrap()
    }

    #[test]
    fn test_spans_in_order() {
        let def = csharp();
        let found = spans_of(&def, "public class A // public\nvoid");
        assert_eq!(
            found,
            vec![
                ("Keyword".to_string(), "public".to_string()),
                ("Keyword".to_string(), "class".to_string()),
                ("Comment".to_string(), "// public".to_string()),
                ("Keyword".to_string(), "void".to_string()),
            ]
        );
    }

    #[test]
    fn test_span_offsets() {
        let def = csharp();
        let text = "x return";
        let span = def.spans(text).next().unwrap().unwrap();
        assert_eq!((span.start, span.end), (2, 8));
        assert_eq!(&text[span.start..span.end], span.text);
        assert!(span.markup.is_none());
    }

    #[test]
    fn test_block_beats_word_at_same_position() {
        let patterns: Vec<Pattern> = vec![
            WordPattern::new("Keyword", Style::default(), ["REM"]).into(),
            BlockPattern::new("Comment", Style::default(), "REM", r"\n").into(),
        ];
        let def = Definition::new("Batch", true, Style::default(), patterns).unwrap();
        assert_eq!(
            spans_of(&def, "REM note"),
            vec![("Comment".to_string(), "REM note".to_string())]
        );
    }

    #[test]
    fn test_first_declared_wins() {
        let patterns: Vec<Pattern> = vec![
            WordPattern::new("Primary", Style::default(), ["class"]).into(),
            WordPattern::new("Secondary", Style::default(), ["class", "void"]).into(),
        ];
        let def = Definition::new("Test", true, Style::default(), patterns).unwrap();
        assert_eq!(
            spans_of(&def, "class void"),
            vec![
                ("Primary".to_string(), "class".to_string()),
                ("Secondary".to_string(), "void".to_string()),
            ]
        );
    }

    #[test]
    fn test_case_insensitive() {
        let patterns: Vec<Pattern> =
            vec![WordPattern::new("Keyword", Style::default(), ["select"]).into()];
        let insensitive =
            Definition::new("SQL", false, Style::default(), patterns.clone()).unwrap();
        assert_eq!(spans_of(&insensitive, "SELECT Select").len(), 2);

        let sensitive = Definition::new("SQL", true, Style::default(), patterns).unwrap();
        assert!(spans_of(&sensitive, "SELECT Select").is_empty());
    }

    #[test]
    fn test_markup_attributes_aligned() {
        let patterns: Vec<Pattern> = vec![MarkupPattern::new("Tag", Style::default(), true).into()];
        let def = Definition::new("HTML", false, Style::default(), patterns).unwrap();
        let text = html_encode(r##"<a href="#" id="x">"##);

        let span = def.spans(&text).next().unwrap().unwrap();
        let markup = span.markup.unwrap();
        assert_eq!(markup.open_tag, "&lt;");
        assert_eq!(markup.tag_name, "a");
        assert_eq!(markup.close_tag, "&gt;");

        let names: Vec<_> = markup.names().collect();
        let values: Vec<_> = markup.values().collect();
        assert_eq!(names.len(), values.len());
        assert_eq!(names, vec!["href", "id"]);
        assert_eq!(values, vec!["\"#\"", "\"x\""]);
    }

    #[test]
    fn test_two_markup_patterns() {
        let patterns: Vec<Pattern> = vec![
            BlockPattern::new("Comment", Style::default(), "<!--", "-->").into(),
            MarkupPattern::new("Tag", Style::default(), true).into(),
            MarkupPattern::new("Other", Style::default(), false).into(),
        ];
        let def = Definition::new("HTML", false, Style::default(), patterns).unwrap();
        let text = html_encode("<!-- <b> --><p class=x>");
        assert_eq!(
            spans_of(&def, &text),
            vec![
                ("Comment".to_string(), "&lt;!-- &lt;b&gt; --&gt;".to_string()),
                ("Tag".to_string(), "&lt;p class=x&gt;".to_string()),
            ]
        );
    }

    #[test]
    fn test_compiled_source() {
        let sensitive = CompositeMatcher::new("(?P<words>a)", true).unwrap();
        let source = sensitive.as_str().unwrap();
        assert!(source.starts_with(ENTITY_GUARD));
        assert!(source.contains("(?:(?P<words>a))"));

        let insensitive = CompositeMatcher::new("(?P<words>a)", false).unwrap();
        assert!(insensitive.as_str().unwrap().starts_with("(?i)"));

        assert_eq!(CompositeMatcher::new("", true).unwrap().as_str(), None);
    }

    #[test]
    fn test_words_inside_entities_are_skipped() {
        let keywords = WordPattern::new("Keyword", Style::default(), ["lt", "gt", "amp"]);
        let patterns: Vec<Pattern> = vec![keywords.into()];
        let def = Definition::new("Shell", true, Style::default(), patterns).unwrap();

        let text = html_encode("if ($a < $b) && $c > 0");
        assert!(spans_of(&def, &text).is_empty());
        assert_eq!(
            spans_of(&def, &html_encode("a lt b <gt>")),
            vec![
                ("Keyword".to_string(), "lt".to_string()),
                ("Keyword".to_string(), "gt".to_string()),
            ]
        );
    }

    #[test]
    fn test_blocks_do_not_split_entities() {
        let comment = BlockPattern::new("Comment", Style::default(), ";", r"\n");
        let patterns: Vec<Pattern> = vec![comment.into()];
        let def = Definition::new("Lisp", true, Style::default(), patterns).unwrap();
        assert_eq!(
            spans_of(&def, &html_encode("(< a b) ; note")),
            vec![("Comment".to_string(), "; note".to_string())]
        );

        // An end delimiter inside an entity is passed over for a real one
        let group = BlockPattern::new("Group", Style::default(), "(", ";");
        let patterns: Vec<Pattern> = vec![group.into()];
        let def = Definition::new("Test", true, Style::default(), patterns).unwrap();
        assert_eq!(
            spans_of(&def, &html_encode("(a > b; c")),
            vec![("Group".to_string(), "(a &gt; b;".to_string())]
        );
    }

    #[test]
    fn test_no_patterns() {
        let def = Definition::new("Plain", true, Style::default(), Vec::new()).unwrap();
        assert!(def.matcher().is_empty());
        assert_eq!(def.spans("anything").count(), 0);
    }
}
