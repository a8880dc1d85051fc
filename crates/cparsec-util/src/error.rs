use thiserror::Error;

/// Outcome of a parse.
///
/// `Fatal` means the accompanying node (if any) is a partial tree whose
/// contents are unspecified except for kind tags, and it must not be
/// pretty-printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseStatus {
    Ok,
    Fatal,
}

/// A fatal parser error, returned by value rather than formatted into a
/// shared buffer and borrowed back out — avoids an error message that
/// aliases and gets overwritten by the next call.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParserError {
    /// A required token did not match what the grammar expected.
    #[error("{file}:{line}:{column}: Syntax error: Required '{expected}', but got '{found}'")]
    Syntax {
        file: String,
        line: u32,
        column: u32,
        expected: String,
        found: String,
    },

    /// A structural rule was violated (e.g. a struct-specifier combined
    /// with a primitive specifier in the same specifier-qualifier list).
    #[error("{file}:{line}:{column}: Syntax error: {message}")]
    Structural {
        file: String,
        line: u32,
        column: u32,
        message: String,
    },

    /// Arena allocation failed. Kept distinct from the syntax-error
    /// variants so callers can tell malformed input from resource
    /// exhaustion.
    #[error("out of memory while allocating an AST node")]
    OutOfMemory,
}

impl ParserError {
    pub fn syntax(
        file: impl Into<String>,
        line: u32,
        column: u32,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        ParserError::Syntax {
            file: file.into(),
            line,
            column,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn structural(
        file: impl Into<String>,
        line: u32,
        column: u32,
        message: impl Into<String>,
    ) -> Self {
        ParserError::Structural {
            file: file.into(),
            line,
            column,
            message: message.into(),
        }
    }
}
