use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

use regex::Regex;

use super::token::{Token, TokenKind};
use crate::error::{Error, Result};

/// Longest identifier the language accepts
pub const MAX_IDENTIFIER_LEN: usize = 7;

lazy_static::lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Z]+[0-9]*$").unwrap();
}

/// Line-buffered scanner for Core source
///
/// Holds exactly one current token. `advance` moves to the next one and
/// pulls another source line only when the tokens of the current line are
/// used up. The reader is dropped as soon as end of input is reached.
pub struct Scanner {
    /// Source reader, `None` once drained
    source: Option<Box<dyn BufRead>>,
    /// Remaining tokens of the line being consumed
    pending: VecDeque<Token>,
    /// Token under the cursor
    current: Token,
    /// Number of source lines read so far
    line: usize,
}

impl Scanner {
    /// Creates a scanner over any buffered reader and positions it on the first token
    pub fn new(source: impl BufRead + 'static) -> Result<Self> {
        let mut scanner = Scanner {
            source: Some(Box::new(source)),
            pending: VecDeque::new(),
            current: Token::new(TokenKind::Eof, String::new(), 0, 0),
            line: 0,
        };
        scanner.advance()?;
        Ok(scanner)
    }

    /// Creates a scanner over an in-memory program
    pub fn from_source(source: &str) -> Result<Self> {
        Scanner::new(Cursor::new(source.to_owned().into_bytes()))
    }

    /// Opens a source file and creates a scanner over it
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Scanner::new(BufReader::new(file))
    }

    /// Returns the current token without consuming it
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Discards the current token and exposes the next one
    ///
    /// Once end of input has been produced, further calls keep returning it.
    pub fn advance(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            if self.current.kind == TokenKind::Eof && self.source.is_none() {
                return Ok(());
            }
            self.refill()?;
        }

        if let Some(token) = self.pending.pop_front() {
            self.current = token;
        }
        Ok(())
    }

    /// True once the source reader has been released
    pub fn is_drained(&self) -> bool {
        self.source.is_none()
    }

    /// Scans all remaining tokens and returns them as a vector ending with `Eof`
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.current.clone();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
            self.advance()?;
        }
    }

    /// Reads lines until one yields tokens, or queues `Eof` when the source runs dry
    fn refill(&mut self) -> Result<()> {
        while self.pending.is_empty() {
            let Some(reader) = self.source.as_mut() else {
                break;
            };

            let mut text = String::new();
            if reader.read_line(&mut text)? == 0 {
                self.source = None;
                tracing::debug!(lines = self.line, "source drained");
                self.pending.push_back(Token::new(
                    TokenKind::Eof,
                    String::new(),
                    self.line + 1,
                    1,
                ));
                break;
            }

            self.line += 1;
            self.scan_line(&text)?;
            tracing::debug!(line = self.line, tokens = self.pending.len(), "scanned line");
        }
        Ok(())
    }

    fn scan_line(&mut self, text: &str) -> Result<()> {
        let chars: Vec<char> = text.chars().collect();
        let mut pos = 0;

        while pos < chars.len() {
            if is_whitespace(chars[pos]) {
                while pos < chars.len() && is_whitespace(chars[pos]) {
                    pos += 1;
                }
                continue;
            }

            let lexeme = next_lexeme(&chars, pos);
            let width = lexeme.chars().count();
            let kind = classify(&lexeme, self.line)?;
            self.pending
                .push_back(Token::new(kind, lexeme, self.line, pos + 1));
            pos += width;
        }

        Ok(())
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn is_symbol_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    TokenKind::symbol(c.encode_utf8(&mut buf)).is_some()
}

/// Cuts the lexeme starting at `start`
///
/// A lexeme runs until whitespace or a punctuation boundary. Two adjacent
/// punctuation characters stay together only when they spell an operator.
fn next_lexeme(chars: &[char], start: usize) -> String {
    let mut lexeme = chars[start].to_string();
    let mut i = start + 1;

    while i < chars.len() && !is_whitespace(chars[i]) {
        let next = chars[i];
        let held_symbol = TokenKind::symbol(&lexeme).is_some();
        let next_symbol = is_symbol_char(next);

        if held_symbol && next_symbol {
            let mut joined = lexeme.clone();
            joined.push(next);
            if TokenKind::symbol(&joined).is_some() {
                return joined;
            }
            return lexeme;
        }
        if held_symbol || next_symbol {
            return lexeme;
        }

        lexeme.push(next);
        i += 1;
    }

    lexeme
}

fn classify(lexeme: &str, line: usize) -> Result<TokenKind> {
    if let Some(kind) = TokenKind::symbol(lexeme) {
        return Ok(kind);
    }
    if let Some(kind) = TokenKind::keyword(lexeme) {
        return Ok(kind);
    }
    if lexeme.bytes().all(|b| b.is_ascii_digit()) {
        return lexeme
            .parse::<i64>()
            .map(TokenKind::Integer)
            .map_err(|_| Error::IntegerOutOfRange {
                lexeme: lexeme.to_string(),
                line,
            });
    }
    if is_identifier(lexeme) {
        return Ok(TokenKind::Identifier(lexeme.to_string()));
    }
    Ok(TokenKind::Invalid(lexeme.to_string()))
}

/// Checks the identifier shape: uppercase letters, then digits, at most seven characters
pub fn is_identifier(text: &str) -> bool {
    (1..=MAX_IDENTIFIER_LEN).contains(&text.len()) && IDENTIFIER.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut scanner = Scanner::from_source(source).unwrap();
        scanner
            .scan_tokens()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_declaration() {
        assert_eq!(
            kinds("int A, B1;"),
            vec![
                TokenKind::Int,
                TokenKind::Identifier("A".to_string()),
                TokenKind::Comma,
                TokenKind::Identifier("B1".to_string()),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_adjacent_operators_merge_only_when_valid() {
        assert_eq!(
            kinds("X!=Y"),
            vec![
                TokenKind::Identifier("X".to_string()),
                TokenKind::NotEq,
                TokenKind::Identifier("Y".to_string()),
                TokenKind::Eof,
            ]
        );
        // `=(` is not an operator, so the pair splits
        assert_eq!(
            kinds("X=(1)"),
            vec![
                TokenKind::Identifier("X".to_string()),
                TokenKind::Assign,
                TokenKind::LeftParen,
                TokenKind::Integer(1),
                TokenKind::RightParen,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("!("),
            vec![TokenKind::Not, TokenKind::LeftParen, TokenKind::Eof]
        );
    }

    #[test]
    fn test_logical_operators() {
        assert_eq!(
            kinds("[(1==1)&&(2<=3)] ||"),
            vec![
                TokenKind::LeftBracket,
                TokenKind::LeftParen,
                TokenKind::Integer(1),
                TokenKind::Eq,
                TokenKind::Integer(1),
                TokenKind::RightParen,
                TokenKind::And,
                TokenKind::LeftParen,
                TokenKind::Integer(2),
                TokenKind::LtEq,
                TokenKind::Integer(3),
                TokenKind::RightParen,
                TokenKind::RightBracket,
                TokenKind::Or,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_minus_never_joins_literal() {
        assert_eq!(
            kinds("-5"),
            vec![TokenKind::Minus, TokenKind::Integer(5), TokenKind::Eof]
        );
    }

    #[test]
    fn test_invalid_identifiers() {
        assert_eq!(
            kinds("abc"),
            vec![TokenKind::Invalid("abc".to_string()), TokenKind::Eof]
        );
        assert_eq!(
            kinds("ABCDEFGH"),
            vec![TokenKind::Invalid("ABCDEFGH".to_string()), TokenKind::Eof]
        );
        assert_eq!(
            kinds("A1B"),
            vec![TokenKind::Invalid("A1B".to_string()), TokenKind::Eof]
        );
        assert_eq!(
            kinds("ABCDEF1"),
            vec![TokenKind::Identifier("ABCDEF1".to_string()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_integer_out_of_range() {
        let err = Scanner::from_source("99999999999999999999").err().unwrap();
        assert!(matches!(err, Error::IntegerOutOfRange { line: 1, .. }));
    }

    #[test]
    fn test_blank_lines_and_positions() {
        let mut scanner = Scanner::from_source("\n\n   \t\nbegin  X\n").unwrap();
        let begin = scanner.current().clone();
        assert_eq!(begin.kind, TokenKind::Begin);
        assert_eq!((begin.line, begin.column), (4, 1));

        scanner.advance().unwrap();
        assert_eq!(scanner.current().column, 8);
        assert!(!scanner.is_drained());

        scanner.advance().unwrap();
        assert_eq!(scanner.current().kind, TokenKind::Eof);
        assert!(scanner.is_drained());

        scanner.advance().unwrap();
        assert_eq!(scanner.current().kind, TokenKind::Eof);
    }

    #[test]
    fn test_current_does_not_consume() {
        let scanner = Scanner::from_source("program").unwrap();
        assert_eq!(scanner.current().kind, TokenKind::Program);
        assert_eq!(scanner.current().kind, TokenKind::Program);
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_open_reads_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/max.core");
        let mut scanner = Scanner::open(path).unwrap();
        assert_eq!(scanner.current().kind, TokenKind::Program);

        let tokens = scanner.scan_tokens().unwrap();
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
        assert!(scanner.is_drained());
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let err = Scanner::open("does/not/exist.core").err().unwrap();
        assert!(matches!(err, Error::Io(_)));
    }
}
