//! Core Parser Module
//!
//! Parses the token stream into an Abstract Syntax Tree (AST) with one node
//! type per grammar production.

mod ast;
mod core_parser;

pub use ast::{
    CompareOp, Comparison, Condition, Declaration, DeclarationSeq, Expression, Factor, IdList,
    Operand, Program, Statement, StatementSeq,
};
pub use core_parser::{CoreParser, MAX_NESTING_DEPTH};

use crate::error::Result;
use crate::lexer::Scanner;
use crate::runtime::SymbolTable;

/// Scans and parses an in-memory program, interning names into `symbols`
pub fn parse_source(source: &str, symbols: &mut SymbolTable) -> Result<Program> {
    let scanner = Scanner::from_source(source)?;
    CoreParser::new(scanner, symbols).parse()
}
