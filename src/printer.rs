//! Canonical pretty-printer for Core programs
//!
//! Renders one declaration or statement per line, indented with one tab per
//! nesting level. The output re-parses to a structurally equal tree.

use crate::parser::{
    Comparison, Condition, Expression, Factor, IdList, Operand, Program, Statement, StatementSeq,
};
use crate::runtime::SymbolTable;

/// Renders `program` using `symbols` to resolve identifier names
pub fn render(program: &Program, symbols: &SymbolTable) -> String {
    let mut printer = Printer::new(symbols);
    printer.program(program);
    printer.finish()
}

/// Depth-first AST walker accumulating the rendered text
pub struct Printer<'a> {
    symbols: &'a SymbolTable,
    out: String,
}

impl<'a> Printer<'a> {
    /// Creates a printer with an empty buffer
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Printer {
            symbols,
            out: String::new(),
        }
    }

    /// Returns the rendered text
    pub fn finish(self) -> String {
        self.out
    }

    /// Renders a whole program
    pub fn program(&mut self, program: &Program) {
        self.line(0, "program");
        for declaration in &program.declarations.0 {
            let text = format!("int {};", self.id_list(&declaration.names));
            self.line(1, &text);
        }
        self.line(0, "begin");
        self.statement_seq(&program.body, 1);
        self.line(0, "end");
    }

    fn statement_seq(&mut self, seq: &StatementSeq, depth: usize) {
        for statement in &seq.0 {
            self.statement(statement, depth);
        }
    }

    fn statement(&mut self, statement: &Statement, depth: usize) {
        match statement {
            Statement::Assign { target, value } => {
                let text = format!(
                    "{} = {};",
                    self.symbols.name(*target),
                    self.expression(value)
                );
                self.line(depth, &text);
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let header = format!("if {} then", self.condition(condition));
                self.line(depth, &header);
                self.statement_seq(then_branch, depth + 1);
                if let Some(else_branch) = else_branch {
                    self.line(depth, "else");
                    self.statement_seq(else_branch, depth + 1);
                }
                self.line(depth, "end;");
            }
            Statement::While { condition, body } => {
                let header = format!("while {} loop", self.condition(condition));
                self.line(depth, &header);
                self.statement_seq(body, depth + 1);
                self.line(depth, "end;");
            }
            Statement::Read(ids) => {
                let text = format!("read {};", self.id_list(ids));
                self.line(depth, &text);
            }
            Statement::Write(ids) => {
                let text = format!("write {};", self.id_list(ids));
                self.line(depth, &text);
            }
        }
    }

    fn condition(&self, condition: &Condition) -> String {
        match condition {
            Condition::Comparison(comparison) => self.comparison(comparison),
            Condition::Not(inner) => format!("!{}", self.condition(inner)),
            Condition::And(left, right) => {
                format!("[{} && {}]", self.condition(left), self.condition(right))
            }
            Condition::Or(left, right) => {
                format!("[{} || {}]", self.condition(left), self.condition(right))
            }
        }
    }

    fn comparison(&self, comparison: &Comparison) -> String {
        format!(
            "({} {} {})",
            self.operand(&comparison.left),
            comparison.op,
            self.operand(&comparison.right)
        )
    }

    fn expression(&self, expression: &Expression) -> String {
        match expression {
            Expression::Factor(factor) => self.factor(factor),
            Expression::Add(left, rest) => {
                format!("{} + {}", self.factor(left), self.expression(rest))
            }
            Expression::Sub(left, rest) => {
                format!("{} - {}", self.factor(left), self.expression(rest))
            }
        }
    }

    fn factor(&self, factor: &Factor) -> String {
        match factor {
            Factor::Operand(operand) => self.operand(operand),
            Factor::Mul(left, rest) => format!("{} * {}", self.operand(left), self.factor(rest)),
        }
    }

    fn operand(&self, operand: &Operand) -> String {
        match operand {
            Operand::IntLiteral(n) => n.to_string(),
            Operand::Identifier(id) => self.symbols.name(*id).to_string(),
            Operand::Parenthesized(inner) => format!("({})", self.expression(inner)),
        }
    }

    fn id_list(&self, ids: &IdList) -> String {
        ids.0
            .iter()
            .map(|id| self.symbols.name(*id))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push('\t');
        }
        self.out.push_str(text);
        self.out.push('\n');
    }
}
