//! SQL definition

use super::{default_style, fg};
use crate::error::Result;
use crate::syntax::language::Definition;
use crate::syntax::rules::{BlockPattern, Pattern, WordPattern};

const KEYWORDS: &[&str] = &[
    "add", "all", "alter", "and", "as", "asc", "begin", "between", "by", "case", "check", "column",
    "commit", "constraint", "create", "cross", "database", "declare", "default", "delete", "desc",
    "distinct", "drop", "else", "end", "exec", "exists", "foreign", "from", "full", "group",
    "having", "if", "in", "index", "inner", "insert", "into", "is", "join", "key", "left", "like",
    "not", "null", "on", "or", "order", "outer", "primary", "procedure", "references", "return",
    "right", "rollback", "select", "set", "table", "then", "top", "transaction", "union", "unique",
    "update", "values", "view", "when", "where", "while", "with",
];

const FUNCTIONS: &[&str] = &[
    "avg", "cast", "coalesce", "convert", "count", "getdate", "isnull", "len", "lower", "max",
    "min", "nullif", "substring", "sum", "upper",
];

const TYPES: &[&str] = &[
    "bigint", "bit", "char", "date", "datetime", "decimal", "float", "int", "money", "nchar",
    "nvarchar", "smallint", "text", "tinyint", "uniqueidentifier", "varchar",
];

/// Create SQL definition
pub fn sql_definition() -> Result<Definition> {
    let patterns: Vec<Pattern> = vec![
        BlockPattern::new("MultiLineComment", fg("green")?, "/*", "*/").into(),
        BlockPattern::new("Comment", fg("green")?, "--", r"\n").into(),
        BlockPattern::with_escape("String", fg("red")?, "'", "'", "'").into(),
        BlockPattern::new("QuotedIdentifier", fg("black")?, "[", "]").into(),
        WordPattern::new("Keyword", fg("blue")?, KEYWORDS.iter().copied()).into(),
        WordPattern::new("Function", fg("fuchsia")?, FUNCTIONS.iter().copied()).into(),
        WordPattern::new("DataType", fg("teal")?, TYPES.iter().copied()).into(),
        WordPattern::new("Variable", fg("purple")?, ["@@rowcount", "@@identity", "@@error"]).into(),
    ];

    Definition::new("SQL", false, default_style()?, patterns)
}
