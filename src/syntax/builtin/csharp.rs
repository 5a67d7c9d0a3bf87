//! C# definition

use super::{default_style, fg};
use crate::error::Result;
use crate::syntax::language::Definition;
use crate::syntax::rules::{BlockPattern, Pattern, WordPattern};

const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked", "class",
    "const", "continue", "decimal", "default", "delegate", "do", "double", "else", "enum", "event",
    "explicit", "extern", "false", "finally", "fixed", "float", "for", "foreach", "goto", "if",
    "implicit", "in", "int", "interface", "internal", "is", "lock", "long", "namespace", "new",
    "null", "object", "operator", "out", "override", "params", "private", "protected", "public",
    "readonly", "ref", "return", "sbyte", "sealed", "short", "sizeof", "stackalloc", "static",
    "string", "struct", "switch", "this", "throw", "true", "try", "typeof", "uint", "ulong",
    "unchecked", "unsafe", "ushort", "using", "virtual", "void", "volatile", "while",
];

const CONTEXTUAL: &[&str] = &[
    "add", "async", "await", "dynamic", "get", "global", "partial", "remove", "set", "value", "var",
    "where", "yield",
];

const PREPROCESSOR: &[&str] = &[
    "#define", "#elif", "#else", "#endif", "#endregion", "#error", "#if", "#line", "#pragma",
    "#region", "#undef", "#warning",
];

/// Create C# definition
pub fn csharp_definition() -> Result<Definition> {
    let patterns: Vec<Pattern> = vec![
        BlockPattern::new("MultiLineComment", fg("green")?, "/*", "*/").into(),
        BlockPattern::new("Comment", fg("green")?, "//", r"\n").into(),
        BlockPattern::with_escape("String", fg("maroon")?, "\"", "\"", "\\").into(),
        BlockPattern::with_escape("Char", fg("maroon")?, "'", "'", "\\").into(),
        WordPattern::new("Preprocessor", fg("gray")?, PREPROCESSOR.iter().copied()).into(),
        WordPattern::new("Keyword", fg("blue")?, KEYWORDS.iter().copied()).into(),
        WordPattern::new("ContextualKeyword", fg("blue")?, CONTEXTUAL.iter().copied()).into(),
    ];

    Definition::new("C#", true, default_style()?, patterns)
}
