use super::ast::{
    CompareOp, Comparison, Condition, Declaration, DeclarationSeq, Expression, Factor, IdList,
    Operand, Program, Statement, StatementSeq,
};
use crate::error::{Error, Result};
use crate::lexer::{Scanner, Token, TokenKind};
use crate::runtime::{SymbolId, SymbolTable};

/// Deepest chain of nested productions the parser accepts
///
/// Every `+`/`-` term and `*` factor adds a level, as do parenthesized
/// expressions, conditions and nested statement blocks. The printer and
/// evaluator recurse over the same tree.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Recursive-descent parser for Core
///
/// One method per grammar production. Each consumes exactly the tokens of
/// its production and leaves the scanner on the token that follows.
/// Identifiers are interned into the borrowed [`SymbolTable`] as they are
/// consumed.
pub struct CoreParser<'a> {
    scanner: Scanner,
    symbols: &'a mut SymbolTable,
    depth: usize,
}

impl<'a> CoreParser<'a> {
    /// Creates a parser reading from `scanner` and interning into `symbols`
    pub fn new(scanner: Scanner, symbols: &'a mut SymbolTable) -> Self {
        CoreParser {
            scanner,
            symbols,
            depth: 0,
        }
    }

    /// Parses a whole program; anything after the closing `end` is left unread
    pub fn parse(mut self) -> Result<Program> {
        self.parse_program()
    }

    // program := 'program' decl_seq 'begin' stmt_seq 'end'
    fn parse_program(&mut self) -> Result<Program> {
        self.consume(TokenKind::Program)?;
        let declarations = self.parse_declaration_seq()?;
        self.consume(TokenKind::Begin)?;
        let body = self.parse_statement_seq()?;
        self.consume(TokenKind::End)?;

        Ok(Program { declarations, body })
    }

    // decl_seq := decl | decl decl_seq
    fn parse_declaration_seq(&mut self) -> Result<DeclarationSeq> {
        let mut declarations = vec![self.parse_declaration()?];
        while !self.check(&TokenKind::Begin)? {
            declarations.push(self.parse_declaration()?);
        }
        Ok(DeclarationSeq(declarations))
    }

    // decl := 'int' id_list ';'
    fn parse_declaration(&mut self) -> Result<Declaration> {
        self.consume(TokenKind::Int)?;
        let names = self.parse_id_list()?;
        self.consume(TokenKind::Semicolon)?;
        Ok(Declaration { names })
    }

    // id_list := id | id ',' id_list
    fn parse_id_list(&mut self) -> Result<IdList> {
        let mut ids = vec![self.parse_identifier()?];
        while self.check(&TokenKind::Comma)? {
            self.advance()?;
            ids.push(self.parse_identifier()?);
        }
        Ok(IdList(ids))
    }

    // stmt_seq := stmt | stmt stmt_seq
    fn parse_statement_seq(&mut self) -> Result<StatementSeq> {
        self.nested(|p| {
            let mut statements = vec![p.parse_statement()?];
            while !p.check(&TokenKind::End)? && !p.check(&TokenKind::Else)? {
                statements.push(p.parse_statement()?);
            }
            Ok(StatementSeq(statements))
        })
    }

    // stmt := (assign | if | loop | in | out) ';'
    fn parse_statement(&mut self) -> Result<Statement> {
        let statement = match self.peek_kind()? {
            TokenKind::Identifier(_) => self.parse_assign()?,
            TokenKind::If => self.parse_if()?,
            TokenKind::While => self.parse_while()?,
            TokenKind::Read => {
                self.advance()?;
                Statement::Read(self.parse_id_list()?)
            }
            TokenKind::Write => {
                self.advance()?;
                Statement::Write(self.parse_id_list()?)
            }
            _ => return Err(self.expected_error("a statement")),
        };
        self.consume(TokenKind::Semicolon)?;
        Ok(statement)
    }

    // assign := id '=' exp
    fn parse_assign(&mut self) -> Result<Statement> {
        let target = self.parse_identifier()?;
        self.consume(TokenKind::Assign)?;
        let value = self.parse_expression()?;
        Ok(Statement::Assign { target, value })
    }

    // if := 'if' cond 'then' stmt_seq ('else' stmt_seq)? 'end'
    fn parse_if(&mut self) -> Result<Statement> {
        self.consume(TokenKind::If)?;
        let condition = self.parse_condition()?;
        self.consume(TokenKind::Then)?;
        let then_branch = self.parse_statement_seq()?;

        let else_branch = if self.check(&TokenKind::Else)? {
            self.advance()?;
            Some(self.parse_statement_seq()?)
        } else {
            None
        };
        self.consume(TokenKind::End)?;

        Ok(Statement::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    // loop := 'while' cond 'loop' stmt_seq 'end'
    fn parse_while(&mut self) -> Result<Statement> {
        self.consume(TokenKind::While)?;
        let condition = self.parse_condition()?;
        self.consume(TokenKind::Loop)?;
        let body = self.parse_statement_seq()?;
        self.consume(TokenKind::End)?;
        Ok(Statement::While { condition, body })
    }

    // cond := comp | '!' cond | '[' cond ('&&'|'||') cond ']'
    fn parse_condition(&mut self) -> Result<Condition> {
        self.nested(|p| match p.peek_kind()? {
            TokenKind::LeftParen => Ok(Condition::Comparison(p.parse_comparison()?)),
            TokenKind::Not => {
                p.advance()?;
                Ok(Condition::Not(Box::new(p.parse_condition()?)))
            }
            TokenKind::LeftBracket => {
                p.advance()?;
                let left = Box::new(p.parse_condition()?);
                let is_and = match p.peek_kind()? {
                    TokenKind::And => true,
                    TokenKind::Or => false,
                    _ => return Err(p.expected_error("`&&` or `||`")),
                };
                p.advance()?;
                let right = Box::new(p.parse_condition()?);
                p.consume(TokenKind::RightBracket)?;

                Ok(if is_and {
                    Condition::And(left, right)
                } else {
                    Condition::Or(left, right)
                })
            }
            _ => Err(p.expected_error("a condition (`(`, `!` or `[`)")),
        })
    }

    // comp := '(' op comp_op op ')'
    fn parse_comparison(&mut self) -> Result<Comparison> {
        self.consume(TokenKind::LeftParen)?;
        let left = self.parse_operand()?;
        let op = self.parse_compare_op()?;
        let right = self.parse_operand()?;
        self.consume(TokenKind::RightParen)?;
        Ok(Comparison { left, op, right })
    }

    // comp_op := '!=' | '==' | '<' | '>' | '<=' | '>='
    fn parse_compare_op(&mut self) -> Result<CompareOp> {
        let op = match self.peek_kind()? {
            TokenKind::NotEq => CompareOp::NotEq,
            TokenKind::Eq => CompareOp::Eq,
            TokenKind::Lt => CompareOp::Lt,
            TokenKind::Gt => CompareOp::Gt,
            TokenKind::LtEq => CompareOp::LtEq,
            TokenKind::GtEq => CompareOp::GtEq,
            _ => return Err(self.expected_error("a comparison operator")),
        };
        self.advance()?;
        Ok(op)
    }

    // exp := fac | fac '+' exp | fac '-' exp
    fn parse_expression(&mut self) -> Result<Expression> {
        self.nested(|p| {
            let factor = p.parse_factor()?;
            match p.peek_kind()? {
                TokenKind::Plus => {
                    p.advance()?;
                    Ok(Expression::Add(factor, Box::new(p.parse_expression()?)))
                }
                TokenKind::Minus => {
                    p.advance()?;
                    Ok(Expression::Sub(factor, Box::new(p.parse_expression()?)))
                }
                _ => Ok(Expression::Factor(factor)),
            }
        })
    }

    // fac := op | op '*' fac
    fn parse_factor(&mut self) -> Result<Factor> {
        self.nested(|p| {
            let operand = p.parse_operand()?;
            if p.check(&TokenKind::Star)? {
                p.advance()?;
                return Ok(Factor::Mul(operand, Box::new(p.parse_factor()?)));
            }
            Ok(Factor::Operand(operand))
        })
    }

    // op := int | id | '(' exp ')'
    fn parse_operand(&mut self) -> Result<Operand> {
        match self.peek_kind()? {
            TokenKind::Integer(n) => {
                self.advance()?;
                Ok(Operand::IntLiteral(n))
            }
            TokenKind::Identifier(_) => Ok(Operand::Identifier(self.parse_identifier()?)),
            TokenKind::LeftParen => {
                self.advance()?;
                let inner = self.parse_expression()?;
                self.consume(TokenKind::RightParen)?;
                Ok(Operand::Parenthesized(Box::new(inner)))
            }
            _ => Err(self.expected_error("an integer, identifier or `(`")),
        }
    }

    /// Consumes an identifier token and interns its name
    fn parse_identifier(&mut self) -> Result<SymbolId> {
        let id = match self.peek_kind()? {
            TokenKind::Identifier(name) => self.symbols.intern(&name),
            _ => return Err(self.expected_error("an identifier")),
        };
        self.advance()?;
        Ok(id)
    }

    /// Runs one recursive production, failing once nesting passes [`MAX_NESTING_DEPTH`]
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            let token = self.scanner.current();
            return Err(Error::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                line: token.line,
                col: token.column,
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Current token; an invalid token here is a lexical error
    fn peek(&self) -> Result<&Token> {
        let token = self.scanner.current();
        if let TokenKind::Invalid(lexeme) = &token.kind {
            return Err(Error::InvalidToken {
                lexeme: lexeme.clone(),
                line: token.line,
                col: token.column,
            });
        }
        Ok(token)
    }

    fn peek_kind(&self) -> Result<TokenKind> {
        Ok(self.peek()?.kind.clone())
    }

    fn advance(&mut self) -> Result<()> {
        self.scanner.advance()
    }

    fn check(&self, kind: &TokenKind) -> Result<bool> {
        Ok(&self.peek()?.kind == kind)
    }

    fn consume(&mut self, kind: TokenKind) -> Result<()> {
        if self.check(&kind)? {
            self.advance()
        } else {
            Err(self.expected_error(&Self::token_kind_name(&kind)))
        }
    }

    fn expected_error(&self, expected: &str) -> Error {
        let token = self.scanner.current();
        Error::unexpected(
            expected,
            Self::token_kind_name(&token.kind),
            token.line,
            token.column,
        )
    }

    /// Get a human-readable name for a token kind
    fn token_kind_name(kind: &TokenKind) -> String {
        match kind {
            TokenKind::Integer(n) => format!("integer `{}`", n),
            TokenKind::Identifier(name) => format!("identifier `{}`", name),
            TokenKind::Invalid(lexeme) => format!("invalid token `{}`", lexeme),
            TokenKind::Eof => "end of input".to_string(),
            other => format!("`{}`", other),
        }
    }
}
