//! Numeric token stream listing

use std::io::Write;

use super::scanner::Scanner;
use super::token::TokenKind;
use crate::error::{Error, Result};

/// Writes the remaining tokens of `scanner` as numeric codes, one per line
///
/// Integer and identifier codes are followed by a line holding the value or
/// name. The listing ends with `33` at end of input. An invalid lexeme is
/// written as `-1` and then reported as [`Error::InvalidToken`].
pub fn write_token_codes<W: Write>(mut scanner: Scanner, out: &mut W) -> Result<()> {
    loop {
        let token = scanner.current();
        writeln!(out, "{}", token.kind.code())?;
        match &token.kind {
            TokenKind::Eof => break,
            TokenKind::Invalid(lexeme) => {
                return Err(Error::InvalidToken {
                    lexeme: lexeme.clone(),
                    line: token.line,
                    col: token.column,
                })
            }
            TokenKind::Integer(n) => writeln!(out, "{}", n)?,
            TokenKind::Identifier(name) => writeln!(out, "{}", name)?,
            _ => {}
        }
        scanner.advance()?;
    }
    out.flush()?;
    Ok(())
}
