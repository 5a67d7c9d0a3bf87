//! Built-in definitions
//!
//! Definitions for common languages, available without a definitions
//! file. A loaded file can override any of them by name.

mod csharp;
mod html;
mod javascript;
mod python;
mod sql;
mod xml;

use super::language::Definition;
use super::style::{Color, Font, FontStyle, Style};
use crate::error::Result;

/// Foreground-only style from a color name
pub(super) fn fg(name: &str) -> Result<Style> {
    Ok(Style::fg(Color::from_name(name)?))
}

/// Default text style shared by the built-ins
pub(super) fn default_style() -> Result<Style> {
    let font = Font::new("Courier New", Font::DEFAULT_SIZE, FontStyle::Regular);
    Ok(fg("black")?.with_font(font))
}

/// Get all built-in definitions
pub fn all_definitions() -> Result<Vec<Definition>> {
    Ok(vec![
        csharp::csharp_definition()?,
        html::html_definition()?,
        xml::xml_definition()?,
        javascript::javascript_definition()?,
        sql::sql_definition()?,
        python::python_definition()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_compile() {
        let definitions = all_definitions().unwrap();
        let names: Vec<_> = definitions.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["C#", "HTML", "XML", "JavaScript", "SQL", "Python"]);
        for def in &definitions {
            assert!(!def.matcher().is_empty(), "{} has no matcher", def);
        }
    }
}
