//! Error types for the script parser.

use thiserror::Error;

/// A script that failed grammar or referential-integrity checks.
///
/// These only arise while a script is being parsed. An interpreter is never
/// constructed from a script that produced one of them.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MalformedScript {
    #[error("script does not open with a parenthesized greeting")]
    MissingGreeting,

    #[error("expected {expected}, found {found}")]
    Expected { expected: String, found: String },

    #[error("unbalanced parentheses")]
    UnbalancedParentheses,

    #[error("MEMORY rule must have exactly 4 transformations, found {found}")]
    MemoryArity { found: usize },

    #[error("script defines more than one MEMORY rule")]
    DuplicateMemory,

    #[error("keyword '{keyword}' is defined more than once")]
    DuplicateKeyword { keyword: String },

    #[error("script has no NONE rule")]
    MissingCatchAll,

    #[error("script has no MEMORY rule")]
    MissingMemory,

    #[error("keyword '{keyword}' refers to '{target}', which has no transformations or link")]
    DanglingReference { keyword: String, target: String },
}

/// Result type for script parsing.
pub type ScriptResult<T> = Result<T, MalformedScript>;
