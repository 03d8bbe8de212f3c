use serde::{Deserialize, Serialize};

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Original text of the token
    pub lexeme: String,
    /// Line number where token appears (1-indexed)
    pub line: usize,
    /// Column number where token starts (1-indexed)
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, lexeme: String, line: usize, column: usize) -> Self {
        Token {
            kind,
            lexeme,
            line,
            column,
        }
    }
}

/// All possible token types in Core
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Keywords
    /// PROGRAM keyword
    Program,
    /// BEGIN keyword
    Begin,
    /// END keyword
    End,
    /// INT keyword
    Int,
    /// IF keyword
    If,
    /// THEN keyword
    Then,
    /// ELSE keyword
    Else,
    /// WHILE keyword
    While,
    /// LOOP keyword
    Loop,
    /// READ keyword
    Read,
    /// WRITE keyword
    Write,

    // Punctuation and operators
    /// Semicolon (;)
    Semicolon,
    /// Comma (,)
    Comma,
    /// Assignment operator (=)
    Assign,
    /// Logical NOT operator (!)
    Not,
    /// Left bracket [
    LeftBracket,
    /// Right bracket ]
    RightBracket,
    /// Logical AND operator (&&)
    And,
    /// Logical OR operator (||)
    Or,
    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,
    /// Plus operator (+)
    Plus,
    /// Minus operator (-)
    Minus,
    /// Star operator (*)
    Star,
    /// Inequality operator (!=)
    NotEq,
    /// Equality operator (==)
    Eq,
    /// Less than operator (<)
    Lt,
    /// Greater than operator (>)
    Gt,
    /// Less than or equal operator (<=)
    LtEq,
    /// Greater than or equal operator (>=)
    GtEq,

    // Literals and names
    /// Non-negative integer literal
    Integer(i64),
    /// Identifier: uppercase letters followed by digits, at most seven characters
    Identifier(String),

    // Special
    /// End of input marker
    Eof,
    /// Lexeme that matches nothing in the language
    Invalid(String),
}

impl TokenKind {
    /// Look up a reserved word
    pub fn keyword(s: &str) -> Option<TokenKind> {
        let kind = match s {
            "program" => TokenKind::Program,
            "begin" => TokenKind::Begin,
            "end" => TokenKind::End,
            "int" => TokenKind::Int,
            "if" => TokenKind::If,
            "then" => TokenKind::Then,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "loop" => TokenKind::Loop,
            "read" => TokenKind::Read,
            "write" => TokenKind::Write,
            _ => return None,
        };
        Some(kind)
    }

    /// Look up a punctuation mark or operator
    pub fn symbol(s: &str) -> Option<TokenKind> {
        let kind = match s {
            ";" => TokenKind::Semicolon,
            "," => TokenKind::Comma,
            "=" => TokenKind::Assign,
            "!" => TokenKind::Not,
            "[" => TokenKind::LeftBracket,
            "]" => TokenKind::RightBracket,
            "&&" => TokenKind::And,
            "||" => TokenKind::Or,
            "(" => TokenKind::LeftParen,
            ")" => TokenKind::RightParen,
            "+" => TokenKind::Plus,
            "-" => TokenKind::Minus,
            "*" => TokenKind::Star,
            "!=" => TokenKind::NotEq,
            "==" => TokenKind::Eq,
            "<" => TokenKind::Lt,
            ">" => TokenKind::Gt,
            "<=" => TokenKind::LtEq,
            ">=" => TokenKind::GtEq,
            _ => return None,
        };
        Some(kind)
    }

    /// Check if token is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Program
                | TokenKind::Begin
                | TokenKind::End
                | TokenKind::Int
                | TokenKind::If
                | TokenKind::Then
                | TokenKind::Else
                | TokenKind::While
                | TokenKind::Loop
                | TokenKind::Read
                | TokenKind::Write
        )
    }

    /// Classic numeric token code (1-33, -1 for invalid tokens)
    pub fn code(&self) -> i32 {
        match self {
            TokenKind::Program => 1,
            TokenKind::Begin => 2,
            TokenKind::End => 3,
            TokenKind::Int => 4,
            TokenKind::If => 5,
            TokenKind::Then => 6,
            TokenKind::Else => 7,
            TokenKind::While => 8,
            TokenKind::Loop => 9,
            TokenKind::Read => 10,
            TokenKind::Write => 11,
            TokenKind::Semicolon => 12,
            TokenKind::Comma => 13,
            TokenKind::Assign => 14,
            TokenKind::Not => 15,
            TokenKind::LeftBracket => 16,
            TokenKind::RightBracket => 17,
            TokenKind::And => 18,
            TokenKind::Or => 19,
            TokenKind::LeftParen => 20,
            TokenKind::RightParen => 21,
            TokenKind::Plus => 22,
            TokenKind::Minus => 23,
            TokenKind::Star => 24,
            TokenKind::NotEq => 25,
            TokenKind::Eq => 26,
            TokenKind::Lt => 27,
            TokenKind::Gt => 28,
            TokenKind::LtEq => 29,
            TokenKind::GtEq => 30,
            TokenKind::Integer(_) => 31,
            TokenKind::Identifier(_) => 32,
            TokenKind::Eof => 33,
            TokenKind::Invalid(_) => -1,
        }
    }

    /// Source spelling for fixed tokens, `None` for literals, names and markers
    pub fn spelling(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Program => "program",
            TokenKind::Begin => "begin",
            TokenKind::End => "end",
            TokenKind::Int => "int",
            TokenKind::If => "if",
            TokenKind::Then => "then",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Loop => "loop",
            TokenKind::Read => "read",
            TokenKind::Write => "write",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Assign => "=",
            TokenKind::Not => "!",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::NotEq => "!=",
            TokenKind::Eq => "==",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::Integer(_)
            | TokenKind::Identifier(_)
            | TokenKind::Eof
            | TokenKind::Invalid(_) => return None,
        };
        Some(text)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TokenKind::Integer(n) => write!(f, "{}", n),
            TokenKind::Identifier(id) => write!(f, "{}", id),
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::Invalid(lexeme) => write!(f, "{}", lexeme),
            other => write!(f, "{}", other.spelling().unwrap_or_default()),
        }
    }
}
