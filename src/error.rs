//! Error types for the Core interpreter

use thiserror::Error;

/// Core interpreter errors
///
/// Every variant is fatal: the library hands it back through `?` and the
/// driver reports it and stops the run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Lexical errors
    /// A lexeme that is not whitespace, a reserved word, punctuation,
    /// an integer literal or a well-formed identifier
    ///
    /// **Triggered by:** lowercase names, names longer than seven characters,
    /// stray characters such as `$` or `&`
    /// **Example:** `int count;`
    #[error("Invalid token `{lexeme}` at line {line}, column {col}")]
    InvalidToken {
        /// Offending text
        lexeme: String,
        /// Line number where the lexeme starts
        line: usize,
        /// Column number where the lexeme starts
        col: usize,
    },

    /// Integer literal that does not fit in 64 bits
    #[error("Integer literal `{lexeme}` out of range at line {line}")]
    IntegerOutOfRange {
        /// Offending digits
        lexeme: String,
        /// Line number where the literal starts
        line: usize,
    },

    // Syntax errors
    /// The current token does not match what the grammar requires
    ///
    /// **Triggered by:** missing `;`, missing `end`, misplaced keywords
    /// **Example:** `begin X = 1 end` (missing `;` after the assignment)
    #[error("Syntax error at line {line}, column {col}: expected {expected}, found {found}")]
    UnexpectedToken {
        /// Description of what the production expected
        expected: String,
        /// Description of the token actually found
        found: String,
        /// Line number of the found token
        line: usize,
        /// Column number of the found token
        col: usize,
    },

    /// Expressions, conditions or blocks nested past the parser's limit
    ///
    /// **Triggered by:** very long `+` chains or deeply parenthesized expressions
    #[error("Nesting deeper than {limit} levels at line {line}, column {col}")]
    NestingTooDeep {
        /// Maximum accepted depth
        limit: usize,
        /// Line number of the token where the limit was hit
        line: usize,
        /// Column number of the token where the limit was hit
        col: usize,
    },

    // Semantic errors
    /// Second `int` declaration of a name
    #[error("{name} already declared")]
    AlreadyDeclared {
        /// Identifier name
        name: String,
    },

    /// `read` or `write` of a name that was never declared
    #[error("{name} not declared")]
    NotDeclared {
        /// Identifier name
        name: String,
    },

    /// Use of a declared name that has never received a value
    ///
    /// **Triggered by:** `write X;` or `Y = X + 1;` before any assignment or read of `X`
    #[error("{name} not initialized")]
    NotInitialized {
        /// Identifier name
        name: String,
    },

    // Runtime errors
    /// Input line for a `read` could not be parsed as an integer
    #[error("Invalid input for {name}: `{input}` is not an integer")]
    InvalidInput {
        /// Identifier being read
        name: String,
        /// Raw input line (trimmed)
        input: String,
    },

    /// Standard input ended while a `read` was waiting
    #[error("Unexpected end of input while reading {name}")]
    InputExhausted {
        /// Identifier being read
        name: String,
    },

    /// Integer arithmetic left the 64-bit range
    #[error("Arithmetic overflow: {left} {op} {right}")]
    ArithmeticOverflow {
        /// Operator symbol
        op: String,
        /// Left operand
        left: i64,
        /// Right operand
        right: i64,
    },

    /// Failure of the source, input or output stream
    #[error("I/O error: {0}")]
    Io(String),

    /// AST could not be encoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Error category, one per pipeline stage that can detect a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Raised by the scanner
    Lexical,
    /// Raised by the parser
    Syntax,
    /// Raised by the evaluator for declared/initialized violations
    Semantic,
    /// Raised by the evaluator for input, arithmetic and stream failures
    Runtime,
}

impl Error {
    /// Create a syntax error from expected/found descriptions
    pub fn unexpected(
        expected: impl Into<String>,
        found: impl Into<String>,
        line: usize,
        col: usize,
    ) -> Self {
        Error::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            line,
            col,
        }
    }

    /// Classify the error by the stage that detected it
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidToken { .. } | Error::IntegerOutOfRange { .. } => ErrorCategory::Lexical,

            Error::UnexpectedToken { .. } | Error::NestingTooDeep { .. } => {
                ErrorCategory::Syntax
            }

            Error::AlreadyDeclared { .. }
            | Error::NotDeclared { .. }
            | Error::NotInitialized { .. } => ErrorCategory::Semantic,

            Error::InvalidInput { .. }
            | Error::InputExhausted { .. }
            | Error::ArithmeticOverflow { .. }
            | Error::Io(_)
            | Error::Serialization(_) => ErrorCategory::Runtime,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Result type for Core operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_per_stage() {
        let lexical = Error::InvalidToken {
            lexeme: "abc".to_string(),
            line: 1,
            col: 1,
        };
        assert_eq!(lexical.category(), ErrorCategory::Lexical);
        assert_eq!(
            Error::unexpected("`;`", "`end`", 3, 5).category(),
            ErrorCategory::Syntax
        );
        assert_eq!(
            Error::NotDeclared {
                name: "X".to_string()
            }
            .category(),
            ErrorCategory::Semantic
        );
        assert_eq!(
            Error::Io("broken pipe".to_string()).category(),
            ErrorCategory::Runtime
        );
    }

    #[test]
    fn test_messages_name_the_identifier() {
        let err = Error::AlreadyDeclared {
            name: "X".to_string(),
        };
        assert_eq!(err.to_string(), "X already declared");

        let err = Error::NotInitialized {
            name: "COUNT1".to_string(),
        };
        assert_eq!(err.to_string(), "COUNT1 not initialized");
    }
}
