//! Entity encoding helpers
//!
//! The matcher always runs over entity-encoded text, so every renderer
//! encodes its input the same way and decodes again only when its output
//! format is not HTML-like.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

fn entity_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|amp|lt|gt|quot|apos|nbsp);")
            .unwrap_or_else(|e| panic!("{}", e))
    })
}

fn line_break_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)<br ?/?>").unwrap_or_else(|e| panic!("{}", e)))
}

fn paragraph_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)<p>").unwrap_or_else(|e| panic!("{}", e)))
}

fn paragraph_end_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)</p>").unwrap_or_else(|e| panic!("{}", e)))
}

/// Encode `&`, `<` and `>` as entities.
///
/// Quotes are left alone so that string delimiters in the source still
/// match literally.
pub fn html_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 8);
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Encode text for use inside a double-quoted attribute value
pub fn attribute_encode(input: &str) -> String {
    html_encode(input).replace('"', "&quot;")
}

/// Decode named and numeric entities in a single pass.
///
/// Unknown entities and invalid code points are left as written.
pub fn html_decode(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    entity_regex().replace_all(input, |caps: &Captures| {
        let entity = &caps[1];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some('\u{a0}'),
            _ => {
                let digits = &entity[1..];
                let code = match digits.strip_prefix(['x', 'X']) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => digits.parse::<u32>().ok(),
                };
                code.and_then(char::from_u32)
            }
        };
        match decoded {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        }
    })
}

/// Normalize input pasted from a web form.
///
/// Line break and paragraph tags become newlines, CRLF becomes LF,
/// entities are decoded and surrounding blank lines are trimmed.
pub fn clean_input(input: &str) -> String {
    let text = line_break_regex().replace_all(input, "\n");
    let text = paragraph_regex().replace_all(&text, "\n\n");
    let text = paragraph_end_regex().replace_all(&text, "");
    let text = text.replace("\r\n", "\n");
    let text = html_decode(&text);
    text.trim_matches('\n').to_string()
}
