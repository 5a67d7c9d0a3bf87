//! XML definition

use super::{default_style, fg};
use crate::error::Result;
use crate::syntax::language::Definition;
use crate::syntax::rules::{BlockPattern, MarkupPattern, Pattern};

/// Create XML definition
pub fn xml_definition() -> Result<Definition> {
    let element = MarkupPattern::new("Element", fg("maroon")?, true)
        .with_bracket_style(fg("blue")?)
        .with_attribute_styles(fg("red")?, fg("blue")?);

    let patterns: Vec<Pattern> = vec![
        BlockPattern::new("Comment", fg("green")?, "<!--", "-->").into(),
        BlockPattern::new("CData", fg("gray")?, "<![CDATA[", "]]>").into(),
        BlockPattern::new("DocType", fg("gray")?, "<!DOCTYPE", ">").into(),
        element.into(),
    ];

    Definition::new("XML", true, default_style()?, patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::html_encode;

    #[test]
    fn test_declaration_and_cdata() {
        let def = xml_definition().unwrap();
        let encoded = html_encode(r#"<?xml version="1.0"?><a><![CDATA[<b>]]></a>"#);
        let spans: Vec<_> = def.spans(&encoded).map(|s| s.unwrap()).collect();

        let names: Vec<_> = spans.iter().map(|s| s.pattern.name()).collect();
        assert_eq!(names, vec!["Element", "Element", "CData", "Element"]);

        let declaration = spans[0].markup.as_ref().unwrap();
        assert_eq!(declaration.open_tag, "&lt;?");
        assert_eq!(declaration.tag_name, "xml");
        assert_eq!(declaration.values().collect::<Vec<_>>(), vec!["\"1.0\""]);
        assert_eq!(declaration.close_tag, "?&gt;");
    }
}
