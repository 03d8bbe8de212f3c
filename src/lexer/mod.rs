//! Lexical analysis for Core
//!
//! Converts source text into a stream of tokens, one source line at a time.

mod scanner;
mod token;
mod token_codes;

pub use scanner::{is_identifier, Scanner, MAX_IDENTIFIER_LEN};
pub use token::{Token, TokenKind};
pub use token_codes::write_token_codes;
