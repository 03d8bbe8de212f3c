//! # Corelang - an interpreter for the Core teaching language
//!
//! Core is a deliberately small imperative language: integer declarations,
//! assignment, `if`/`else`, `while`, `read`/`write`, integer arithmetic and
//! boolean conditions. This crate implements the whole pipeline for it.
//!
//! ```text
//! Source Code → Scanner → Tokens → Parser → AST → { Printer, Evaluator }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use corelang::{Interpreter, RunOptions};
//! use std::io::Cursor;
//!
//! # fn main() -> corelang::Result<()> {
//! let code = r#"
//! program
//!     int A, B;
//! begin
//!     read A;
//!     B = A * 2 - 1;
//!     write B;
//! end
//! "#;
//!
//! let mut interpreter = Interpreter::new(RunOptions {
//!     echo_program: false,
//!     prompt: false,
//! });
//! let mut output = Vec::new();
//! interpreter.run_str(code, Cursor::new("5\n"), &mut output)?;
//!
//! assert_eq!(String::from_utf8(output).unwrap(), "B = 9\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Using the stages directly
//!
//! ```rust
//! use corelang::{printer, CoreParser, Evaluator, Scanner, SymbolTable};
//! use std::io::Cursor;
//!
//! # fn main() -> corelang::Result<()> {
//! let mut symbols = SymbolTable::new();
//! let scanner = Scanner::from_source("program int X; begin X = 10 - 3 - 2; write X; end")?;
//! let program = CoreParser::new(scanner, &mut symbols).parse()?;
//!
//! let listing = printer::render(&program, &symbols);
//! assert!(listing.contains("\tX = 10 - 3 - 2;\n"));
//!
//! let mut output = Vec::new();
//! Evaluator::new(&mut symbols, Cursor::new(""), &mut output).execute(&program)?;
//! // Subtraction groups to the right: 10 - (3 - 2)
//! assert_eq!(String::from_utf8(output).unwrap(), "X = 9\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every failure is fatal. Lexical, syntax, semantic and runtime errors all
//! come back as [`Error`]; [`Error::category`] tells them apart.
//!
//! ```rust
//! use corelang::{ErrorCategory, Interpreter};
//! use std::io::Cursor;
//!
//! let mut interpreter = Interpreter::default();
//! let err = interpreter
//!     .run_str("program int X; int X; begin X = 1; end", Cursor::new(""), &mut Vec::new())
//!     .unwrap_err();
//! assert_eq!(err.category(), ErrorCategory::Semantic);
//! assert_eq!(err.to_string(), "X already declared");
//! ```

/// Version of the Core interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod runtime;

// Re-export main types
pub use error::{Error, ErrorCategory, Result};
pub use interpreter::{Interpreter, RunOptions, OUTPUT_HEADER};
pub use lexer::{Scanner, Token, TokenKind};
pub use parser::{CoreParser, Program};
pub use runtime::{Evaluator, Symbol, SymbolId, SymbolTable};

/// Type alias for the Core parser.
/// Converts tokens into an abstract syntax tree (AST).
pub type Parser<'a> = CoreParser<'a>;
