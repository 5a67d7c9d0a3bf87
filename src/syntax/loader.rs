//! Definitions file loading
//!
//! Definitions can be written in TOML and loaded at runtime:
//!
//! ```toml
//! [[definition]]
//! name = "C#"
//! case-sensitive = true
//!
//! [definition.default]
//! fore-color = "black"
//! font = { name = "Courier New", size = 11, style = "regular" }
//!
//! [[definition.pattern]]
//! name = "Comment"
//! type = "block"
//! begins-with = "/*"
//! ends-with = "*/"
//! fore-color = "green"
//!
//! [[definition.pattern]]
//! name = "Keyword"
//! type = "word"
//! words = ["class", "public"]
//! fore-color = "blue"
//!
//! [[definition.pattern]]
//! name = "Tag"
//! type = "markup"
//! highlight-attributes = true
//! fore-color = "maroon"
//! bracket = { fore-color = "blue" }
//! attribute-name = { fore-color = "red" }
//! attribute-value = { fore-color = "blue" }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use super::language::Definition;
use super::rules::{BlockPattern, MarkupPattern, Pattern, PatternType, WordPattern};
use super::style::{Color, Font, Style};
use crate::error::{HighlightError, Result};

#[derive(Debug, Deserialize)]
struct RawFile {
    #[serde(default)]
    definition: Vec<RawDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawDefinition {
    name: String,
    #[serde(default = "default_true")]
    case_sensitive: bool,
    #[serde(default)]
    default: RawStyle,
    #[serde(default)]
    pattern: Vec<RawPattern>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawStyle {
    fore_color: Option<String>,
    back_color: Option<String>,
    font: Option<RawFont>,
}

#[derive(Debug, Deserialize)]
struct RawFont {
    name: Option<String>,
    size: Option<f32>,
    style: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawColors {
    fore_color: Option<String>,
    back_color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawPattern {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    fore_color: Option<String>,
    back_color: Option<String>,
    font: Option<RawFont>,
    begins_with: Option<String>,
    ends_with: Option<String>,
    escapes_with: Option<String>,
    #[serde(default)]
    words: Vec<String>,
    #[serde(default)]
    highlight_attributes: bool,
    bracket: Option<RawColors>,
    attribute_name: Option<RawColors>,
    attribute_value: Option<RawColors>,
}

fn parse_color(name: Option<&str>) -> Result<Option<Color>> {
    match name.map(str::trim) {
        None | Some("") => Ok(None),
        Some(name) => Color::from_name(name).map(Some),
    }
}

fn parse_font(raw: &RawFont) -> Result<Font> {
    let style = match &raw.style {
        Some(style) => style.parse()?,
        None => Default::default(),
    };
    Ok(Font::new(
        raw.name.as_deref().unwrap_or(""),
        raw.size.unwrap_or(Font::DEFAULT_SIZE),
        style,
    ))
}

fn parse_style(fore: Option<&str>, back: Option<&str>, font: Option<&RawFont>) -> Result<Style> {
    Ok(Style {
        fore_color: parse_color(fore)?,
        back_color: parse_color(back)?,
        font: font.map(parse_font).transpose()?,
    })
}

/// Colors from a markup sub-table, with the pattern's font
fn parse_colors(raw: Option<&RawColors>, pattern_style: &Style) -> Result<Option<Style>> {
    let Some(raw) = raw else { return Ok(None) };
    let style = parse_style(raw.fore_color.as_deref(), raw.back_color.as_deref(), None)?;
    Ok(Some(style.with_font_of(pattern_style)))
}

fn required<'a>(value: &'a Option<String>, key: &str, pattern: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| {
            HighlightError::Config(format!("pattern `{}` is missing `{}`", pattern, key))
        })
}

fn parse_pattern(raw: &RawPattern) -> Result<Pattern> {
    let style = parse_style(
        raw.fore_color.as_deref(),
        raw.back_color.as_deref(),
        raw.font.as_ref(),
    )?;

    let pattern = match raw.kind.parse::<PatternType>()? {
        PatternType::Block => {
            let begins_with = required(&raw.begins_with, "begins-with", &raw.name)?;
            let ends_with = required(&raw.ends_with, "ends-with", &raw.name)?;
            let escapes_with = raw.escapes_with.as_deref().unwrap_or("");
            BlockPattern::with_escape(&raw.name, style, begins_with, ends_with, escapes_with).into()
        }
        PatternType::Word => WordPattern::new(&raw.name, style, &raw.words).into(),
        PatternType::Markup => {
            let mut markup = MarkupPattern::new(&raw.name, style, raw.highlight_attributes);
            if let Some(bracket) = parse_colors(raw.bracket.as_ref(), &markup.style)? {
                markup.bracket_style = bracket;
            }
            if let Some(name) = parse_colors(raw.attribute_name.as_ref(), &markup.style)? {
                markup.attribute_name_style = name;
            }
            if let Some(value) = parse_colors(raw.attribute_value.as_ref(), &markup.style)? {
                markup.attribute_value_style = value;
            }
            markup.into()
        }
    };

    Ok(pattern)
}

fn parse_definition(raw: &RawDefinition) -> Result<Definition> {
    let default = parse_style(
        raw.default.fore_color.as_deref(),
        raw.default.back_color.as_deref(),
        raw.default.font.as_ref(),
    )?;
    let patterns = raw.pattern.iter().map(parse_pattern).collect::<Result<Vec<_>>>()?;
    debug!("Parsed definition {} ({} patterns)", raw.name, patterns.len());
    Definition::new(&raw.name, raw.case_sensitive, default, patterns)
}

/// Parse definitions from TOML source.
///
/// Names must be unique, ignoring case.
pub fn load_definitions_str(source: &str) -> Result<Vec<Definition>> {
    let raw: RawFile = toml::from_str(source)?;

    let mut definitions: Vec<Definition> = Vec::with_capacity(raw.definition.len());
    for raw_definition in &raw.definition {
        if definitions
            .iter()
            .any(|d| d.name().eq_ignore_ascii_case(&raw_definition.name))
        {
            return Err(HighlightError::DuplicateDefinition(raw_definition.name.clone()));
        }
        definitions.push(parse_definition(raw_definition)?);
    }

    Ok(definitions)
}

/// Read and parse a definitions file
pub fn load_definitions_file(path: &Path) -> Result<Vec<Definition>> {
    let source = fs::read_to_string(path)?;
    let definitions = load_definitions_str(&source)?;
    info!("Loaded {} definitions from {}", definitions.len(), path.display());
    Ok(definitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::style::FontStyle;
    use std::io::Write;

    const SAMPLE: &str = r##"
[[definition]]
name = "Mini"
case-sensitive = false

[definition.default]
fore-color = "black"
font = { name = "Consolas", size = 10, style = "Regular" }

[[definition.pattern]]
name = "Comment"
type = "Block"
begins-with = "/*"
ends-with = "*/"
fore-color = "green"
font = { style = "italic" }

[[definition.pattern]]
name = "String"
type = "block"
begins-with = '"'
ends-with = '"'
escapes-with = '\'
fore-color = "#A31515"

[[definition.pattern]]
name = "Keyword"
type = "WORD"
words = ["if", "else"]
fore-color = "blue"

[[definition.pattern]]
name = "Tag"
type = "markup"
highlight-attributes = true
fore-color = "maroon"
font = { name = "Arial", style = "bold" }
bracket = { fore-color = "blue", back-color = "yellow" }
attribute-name = { fore-color = "red" }
"##;

    #[test]
    fn test_load_sample() {
        let definitions = load_definitions_str(SAMPLE).unwrap();
        assert_eq!(definitions.len(), 1);

        let def = &definitions[0];
        assert_eq!(def.name(), "Mini");
        assert!(!def.case_sensitive());
        assert_eq!(def.default_style().font, Some(Font::new("Consolas", 10.0, FontStyle::Regular)));
        assert_eq!(def.patterns().len(), 4);

        match def.pattern("Comment") {
            Some(Pattern::Block(block)) => {
                assert_eq!(block.begins_with, "/*");
                assert_eq!(block.escapes_with, None);
                assert_eq!(block.style.font_style(), Some(FontStyle::Italic));
            }
            other => panic!("unexpected {:?}", other),
        }
        match def.pattern("String") {
            Some(Pattern::Block(block)) => {
                assert_eq!(block.escapes_with.as_deref(), Some("\\"));
                let fore = block.style.fore_color.as_ref().map(|c| c.name.as_str());
                assert_eq!(fore, Some("#A31515"));
            }
            other => panic!("unexpected {:?}", other),
        }
        match def.pattern("Keyword") {
            Some(Pattern::Word(word)) => assert_eq!(word.words, vec!["if", "else"]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_markup_sub_styles_share_font() {
        let definitions = load_definitions_str(SAMPLE).unwrap();
        let tag = definitions[0].pattern("Tag").and_then(Pattern::as_markup).unwrap();

        assert!(tag.highlight_attributes);
        assert_eq!(tag.bracket_style.fore_color.as_ref().unwrap().name, "blue");
        assert_eq!(tag.bracket_style.back_color.as_ref().unwrap().name, "yellow");
        assert_eq!(tag.bracket_style.font, tag.style.font);
        assert_eq!(tag.attribute_name_style.fore_color.as_ref().unwrap().name, "red");
        assert!(tag.attribute_name_style.is_bold());
        // No table given: the tag style is used
        assert_eq!(tag.attribute_value_style, tag.style);
    }

    #[test]
    fn test_unknown_pattern_type() {
        let source = r#"
[[definition]]
name = "Bad"
[[definition.pattern]]
name = "X"
type = "regex"
"#;
        assert!(matches!(
            load_definitions_str(source),
            Err(HighlightError::UnknownPatternType(ref t)) if t == "regex"
        ));
    }

    #[test]
    fn test_block_needs_delimiters() {
        let source = r#"
[[definition]]
name = "Bad"
[[definition.pattern]]
name = "Comment"
type = "block"
begins-with = "/*"
"#;
        assert!(matches!(load_definitions_str(source), Err(HighlightError::Config(_))));
    }

    #[test]
    fn test_bad_values() {
        let color = r#"
[[definition]]
name = "Bad"
[definition.default]
fore-color = "blurple"
"#;
        assert!(matches!(load_definitions_str(color), Err(HighlightError::UnknownColor(_))));

        let font = r#"
[[definition]]
name = "Bad"
[definition.default]
font = { style = "wavy" }
"#;
        assert!(matches!(load_definitions_str(font), Err(HighlightError::UnknownFontStyle(_))));
    }

    #[test]
    fn test_duplicate_definitions() {
        let source = r#"
[[definition]]
name = "SQL"
[[definition]]
name = "sql"
"#;
        assert!(matches!(
            load_definitions_str(source),
            Err(HighlightError::DuplicateDefinition(ref n)) if n == "sql"
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let err = load_definitions_str("[[definition]\nname =").unwrap_err();
        assert!(matches!(err, HighlightError::Toml(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let definitions = load_definitions_file(file.path()).unwrap();
        assert_eq!(definitions[0].name(), "Mini");

        let missing = load_definitions_file(Path::new("/nonexistent/definitions.toml"));
        assert!(matches!(missing, Err(HighlightError::Io(_))));
    }
}
