//! Pattern rules for syntax highlighting
//!
//! This module defines the three rule kinds a definition is made of.
//! Each rule turns itself into a regex fragment that the definition
//! splices into one composite matcher. Fragments only ever use named or
//! non-capturing groups, so every group in the composite can be traced
//! back to its rule.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use super::style::Style;
use crate::encoding::html_encode;
use crate::error::{HighlightError, Result};

/// Attribute value forms: double-quoted, single-quoted or a bare word
const ATTRIBUTE_VALUE: &str = r#""[^"]*"|'[^']*'|\w+"#;

/// Rejects a position strictly inside one of the entities `html_encode`
/// produces. Every `&` in encoded text starts one.
pub(crate) const ENTITY_GUARD: &str = concat!(
    r"(?<!&)(?<!&l)(?<!&lt)(?<!&g)(?<!&gt)",
    r"(?<!&a)(?<!&am)(?<!&amp)"
);

/// The kind of a pattern, as named in definition files
///
/// Also the category a pattern belongs to in the composite matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternType {
    Block,
    Markup,
    Word,
}

impl PatternType {
    /// Order in which categories are tried at a given input position
    pub const PRIORITY: [PatternType; 3] =
        [PatternType::Block, PatternType::Markup, PatternType::Word];

    /// Group name wrapping this category in the composite matcher
    pub fn group_name(&self) -> &'static str {
        match self {
            PatternType::Block => "blocks",
            PatternType::Markup => "markup",
            PatternType::Word => "words",
        }
    }
}

impl FromStr for PatternType {
    type Err = HighlightError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "block" => Ok(PatternType::Block),
            "markup" => Ok(PatternType::Markup),
            "word" => Ok(PatternType::Word),
            _ => Err(HighlightError::UnknownPatternType(s.to_string())),
        }
    }
}

/// The two-character `\n` spelling used in definition files, or a real
/// line feed.
fn is_newline(delimiter: &str) -> bool {
    delimiter == r"\n" || delimiter == "\n"
}

/// Escape regex metacharacters outside a character class
fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape a single character for use inside a character class
fn escape_class_char(c: char, out: &mut String) {
    if matches!(c, '\\' | ']' | '[' | '^' | '-' | '&' | '~') {
        out.push('\\');
    }
    out.push(c);
}

/// Matches `\w` the way the regex engine does for our purposes
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Delimiter as it appears in entity-encoded input, escaped for the regex
fn delimiter_fragment(delimiter: &str) -> String {
    if is_newline(delimiter) {
        r"\n".to_string()
    } else {
        escape_literal(&html_encode(delimiter))
    }
}

/// Characters found after the `&` of an encoded entity
fn is_entity_char(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'm' | 'p' | 'l' | 'g' | 't' | ';')
}

/// End delimiter fragment, guarded when it could begin inside an entity
fn end_fragment(delimiter: &str) -> String {
    let fragment = delimiter_fragment(delimiter);
    match html_encode(delimiter).chars().next() {
        Some(c) if !is_newline(delimiter) && is_entity_char(c) => {
            format!("{}{}", ENTITY_GUARD, fragment)
        }
        _ => fragment,
    }
}

/// A delimited region: comments, strings, CDATA sections
#[derive(Debug, Clone, PartialEq)]
pub struct BlockPattern {
    pub name: String,
    pub style: Style,
    pub begins_with: String,
    pub ends_with: String,
    pub escapes_with: Option<String>,
}

impl BlockPattern {
    pub fn new(name: &str, style: Style, begins_with: &str, ends_with: &str) -> Self {
        Self {
            name: name.to_string(),
            style,
            begins_with: begins_with.to_string(),
            ends_with: ends_with.to_string(),
            escapes_with: None,
        }
    }

    /// Create a block whose terminator can be escaped
    pub fn with_escape(
        name: &str,
        style: Style,
        begins_with: &str,
        ends_with: &str,
        escapes_with: &str,
    ) -> Self {
        let mut block = Self::new(name, style, begins_with, ends_with);
        if !escapes_with.is_empty() {
            block.escapes_with = Some(escapes_with.to_string());
        }
        block
    }

    /// Build the regex fragment for this block.
    ///
    /// With an escape sequence only the first character of the escape
    /// and of the encoded terminator take part in the character test, so
    /// multi-character terminators are not fully protected by the escape.
    /// A block that runs to the end of the line continues past an escaped
    /// line break.
    pub fn to_sub_pattern(&self) -> String {
        let begin = delimiter_fragment(&self.begins_with);

        let escape = self
            .escapes_with
            .as_deref()
            .and_then(|e| html_encode(e).chars().next())
            .map(|c| escape_literal(&c.to_string()));

        if is_newline(&self.ends_with) {
            return match escape {
                Some(escape) => format!(r"{}(?>{}(?:\r\n|[\s\S])|[^\n\r])*", begin, escape),
                None => format!(r"{}[^\n\r]*", begin),
            };
        }

        let end = end_fragment(&self.ends_with);
        let Some(escape) = escape else {
            return format!(r"{}[\s\S]*?{}", begin, end);
        };

        let mut terminator = String::new();
        if let Some(first) = html_encode(&self.ends_with).chars().next() {
            escape_class_char(first, &mut terminator);
        }
        format!("{}(?>{}.|[^{}]|.)*?{}", begin, escape, terminator, end)
    }
}

/// A keyword set
#[derive(Debug, Clone, PartialEq)]
pub struct WordPattern {
    pub name: String,
    pub style: Style,
    /// Words as written; escaping happens when the fragment is built
    pub words: Vec<String>,
}

impl WordPattern {
    /// Create a word pattern. Empty words are dropped.
    pub fn new<I, S>(name: &str, style: Style, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.to_string(),
            style,
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_string())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Non-word characters used anywhere in the (encoded) word list,
    /// each at most once, escaped for a character class.
    fn alphabet(&self) -> String {
        let mut seen = Vec::new();
        for c in self.words.iter().flat_map(|w| html_encode(w).chars().collect::<Vec<_>>()) {
            if !is_word_char(c) && !seen.contains(&c) {
                seen.push(c);
            }
        }

        let mut out = String::new();
        for c in seen {
            escape_class_char(c, &mut out);
        }
        out
    }

    /// Build the regex fragment: the word must start and end on an
    /// identifier-or-alphabet character and must not be touched by one on
    /// either side. Empty when there are no words.
    pub fn to_sub_pattern(&self) -> String {
        if self.words.is_empty() {
            return String::new();
        }

        let alphabet = self.alphabet();
        let words = self
            .words
            .iter()
            .map(|w| escape_literal(&html_encode(w)))
            .collect::<Vec<_>>()
            .join("|");

        format!(
            r"(?<![\w{a}])(?=[\w{a}])(?:{w})(?<=[\w{a}])(?![\w{a}])",
            a = alphabet,
            w = words
        )
    }
}

/// The named parts of a markup match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupPart {
    OpenTag,
    Ws1,
    TagName,
    Attributes,
    Ws5,
    CloseTag,
}

impl MarkupPart {
    fn suffix(&self) -> &'static str {
        match self {
            MarkupPart::OpenTag => "openTag",
            MarkupPart::Ws1 => "ws1",
            MarkupPart::TagName => "tagName",
            MarkupPart::Attributes => "attributes",
            MarkupPart::Ws5 => "ws5",
            MarkupPart::CloseTag => "closeTag",
        }
    }
}

/// Tag-like constructs: open bracket, tag name, attributes, close bracket
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupPattern {
    pub name: String,
    /// Tag name style
    pub style: Style,
    pub bracket_style: Style,
    pub attribute_name_style: Style,
    pub attribute_value_style: Style,
    pub highlight_attributes: bool,
}

impl MarkupPattern {
    /// Create a markup pattern; every part uses `style` until overridden
    pub fn new(name: &str, style: Style, highlight_attributes: bool) -> Self {
        Self {
            name: name.to_string(),
            bracket_style: style.clone(),
            attribute_name_style: style.clone(),
            attribute_value_style: style.clone(),
            style,
            highlight_attributes,
        }
    }

    pub fn with_bracket_style(mut self, style: Style) -> Self {
        self.bracket_style = style;
        self
    }

    pub fn with_attribute_styles(mut self, name: Style, value: Style) -> Self {
        self.attribute_name_style = name;
        self.attribute_value_style = value;
        self
    }

    /// Composite group name for one part of this pattern.
    ///
    /// Prefixed with the pattern name so several markup patterns can live
    /// in one composite.
    pub fn group_name(&self, part: MarkupPart) -> String {
        format!("{}_{}", self.name, part.suffix())
    }

    /// Build the regex fragment. Brackets are matched in their encoded
    /// form; the matcher never sees a raw `<` or `>`.
    pub fn to_sub_pattern(&self) -> String {
        let g = |part| self.group_name(part);
        format!(
            concat!(
                r"(?P<{open}>&lt;\??/?)",
                r"(?P<{ws1}>\s*?)",
                r"(?P<{tag}>[\w:]+)",
                r"(?P<{attrs}>(?:\s*[\w:-]+(?:\s*=\s*(?:{value}))?)*)",
                r"(?P<{ws5}>\s*?)",
                r"(?P<{close}>[/?]?&gt;)",
            ),
            open = g(MarkupPart::OpenTag),
            ws1 = g(MarkupPart::Ws1),
            tag = g(MarkupPart::TagName),
            attrs = g(MarkupPart::Attributes),
            value = ATTRIBUTE_VALUE,
            ws5 = g(MarkupPart::Ws5),
            close = g(MarkupPart::CloseTag),
        )
    }

    /// Split the attribute run of a markup match into its attributes.
    ///
    /// The regex engine only remembers the last repetition of a group, so
    /// the run is captured whole and re-scanned here, in order.
    pub fn scan_attributes(run: &str) -> Vec<AttributeCapture<'_>> {
        attribute_regex()
            .captures_iter(run)
            .map(|caps| {
                let get = |name| caps.name(name).map_or("", |m| m.as_str());
                AttributeCapture {
                    ws2: get("ws2"),
                    name: get("attribName"),
                    ws3: get("ws3"),
                    sign: get("attribSign"),
                    ws4: get("ws4"),
                    value: get("attribValue"),
                }
            })
            .collect()
    }
}

fn attribute_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        let pattern = format!(
            concat!(
                r"(?P<ws2>\s*)(?P<attribName>[\w:-]+)",
                r"(?:(?P<ws3>\s*)(?P<attribSign>=)(?P<ws4>\s*)(?P<attribValue>{}))?",
            ),
            ATTRIBUTE_VALUE
        );
        Regex::new(&pattern).unwrap_or_else(|e| panic!("{}", e))
    })
}

/// One attribute of a markup match. Empty strings for absent parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeCapture<'t> {
    pub ws2: &'t str,
    pub name: &'t str,
    pub ws3: &'t str,
    pub sign: &'t str,
    pub ws4: &'t str,
    pub value: &'t str,
}

impl AttributeCapture<'_> {
    /// `=`, surrounding whitespace and the value, as one piece of text
    pub fn assignment(&self) -> String {
        format!("{}{}{}", self.sign, self.ws4, self.value)
    }
}

/// Everything a markup match captured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupCaptures<'t> {
    pub open_tag: &'t str,
    pub ws1: &'t str,
    pub tag_name: &'t str,
    pub attributes: Vec<AttributeCapture<'t>>,
    pub ws5: &'t str,
    pub close_tag: &'t str,
}

impl<'t> MarkupCaptures<'t> {
    /// Attribute names, index-aligned with `values()`
    pub fn names(&self) -> impl Iterator<Item = &'t str> + '_ {
        self.attributes.iter().map(|a| a.name)
    }

    /// Attribute values, index-aligned with `names()`
    pub fn values(&self) -> impl Iterator<Item = &'t str> + '_ {
        self.attributes.iter().map(|a| a.value)
    }
}

/// One highlighting rule
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Block(BlockPattern),
    Word(WordPattern),
    Markup(MarkupPattern),
}

impl Pattern {
    pub fn name(&self) -> &str {
        match self {
            Pattern::Block(p) => &p.name,
            Pattern::Word(p) => &p.name,
            Pattern::Markup(p) => &p.name,
        }
    }

    /// Main style; for markup, the tag name style
    pub fn style(&self) -> &Style {
        match self {
            Pattern::Block(p) => &p.style,
            Pattern::Word(p) => &p.style,
            Pattern::Markup(p) => &p.style,
        }
    }

    pub fn pattern_type(&self) -> PatternType {
        match self {
            Pattern::Block(_) => PatternType::Block,
            Pattern::Word(_) => PatternType::Word,
            Pattern::Markup(_) => PatternType::Markup,
        }
    }

    pub fn to_sub_pattern(&self) -> String {
        match self {
            Pattern::Block(p) => p.to_sub_pattern(),
            Pattern::Word(p) => p.to_sub_pattern(),
            Pattern::Markup(p) => p.to_sub_pattern(),
        }
    }

    pub fn as_markup(&self) -> Option<&MarkupPattern> {
        match self {
            Pattern::Markup(p) => Some(p),
            _ => None,
        }
    }

    /// Check that the name is usable as a group name and that the rule
    /// can produce a sensible fragment.
    pub(crate) fn validate(&self) -> Result<()> {
        let name = self.name();
        let mut chars = name.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric())
            && !PatternType::PRIORITY.iter().any(|t| t.group_name() == name);
        if !valid {
            return Err(HighlightError::InvalidPatternName(name.to_string()));
        }

        if let Pattern::Block(block) = self {
            if block.begins_with.is_empty() || block.ends_with.is_empty() {
                return Err(HighlightError::Config(format!(
                    "block pattern `{}` needs both a start and an end delimiter",
                    name
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<BlockPattern> for Pattern {
    fn from(p: BlockPattern) -> Self {
        Pattern::Block(p)
    }
}

impl From<WordPattern> for Pattern {
    fn from(p: WordPattern) -> Self {
        Pattern::Word(p)
    }
}

impl From<MarkupPattern> for Pattern {
    fn from(p: MarkupPattern) -> Self {
        Pattern::Markup(p)
    }
}
