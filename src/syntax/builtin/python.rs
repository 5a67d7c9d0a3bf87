//! Python definition

use super::{default_style, fg};
use crate::error::Result;
use crate::syntax::language::Definition;
use crate::syntax::rules::{BlockPattern, Pattern, WordPattern};

const KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
    "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

const CONSTANTS: &[&str] = &["False", "None", "True", "self", "cls"];

const BUILTINS: &[&str] = &[
    "abs", "all", "any", "bool", "dict", "enumerate", "filter", "float", "getattr", "hasattr",
    "int", "isinstance", "len", "list", "map", "max", "min", "open", "print", "range", "repr",
    "set", "sorted", "str", "sum", "super", "tuple", "type", "zip",
];

/// Create Python definition
pub fn python_definition() -> Result<Definition> {
    // Triple-quoted strings come first so `"""` is not read as an empty string
    let patterns: Vec<Pattern> = vec![
        BlockPattern::new("DocString", fg("maroon")?, "\"\"\"", "\"\"\"").into(),
        BlockPattern::new("SingleDocString", fg("maroon")?, "'''", "'''").into(),
        BlockPattern::new("Comment", fg("green")?, "#", r"\n").into(),
        BlockPattern::with_escape("String", fg("maroon")?, "\"", "\"", "\\").into(),
        BlockPattern::with_escape("SingleQuotedString", fg("maroon")?, "'", "'", "\\").into(),
        WordPattern::new("Keyword", fg("blue")?, KEYWORDS.iter().copied()).into(),
        WordPattern::new("Constant", fg("navy")?, CONSTANTS.iter().copied()).into(),
        WordPattern::new("Builtin", fg("teal")?, BUILTINS.iter().copied()).into(),
    ];

    Definition::new("Python", true, default_style()?, patterns)
}
