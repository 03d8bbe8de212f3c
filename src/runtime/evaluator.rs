use std::io::{BufRead, Write};

use crate::error::{Error, Result};
use crate::parser::{
    Comparison, Condition, Declaration, Expression, Factor, IdList, Operand, Program, Statement,
    StatementSeq,
};
use crate::runtime::{SymbolId, SymbolTable};

/// Tree-walking evaluator for Core
///
/// Executes a parsed [`Program`] strictly left to right against the
/// [`SymbolTable`] it was parsed into:
/// - `int X;` - marks `X` declared (once only)
/// - `X = exp;` - stores a value, silently skipped when `X` is undeclared
/// - `read X;` - prompts and reads one integer line from `input`
/// - `write X;` - emits `X = value` on `output`
/// - `if` / `while` - conditions evaluate both sides of `&&` and `||`
pub struct Evaluator<'a, R, W> {
    symbols: &'a mut SymbolTable,
    input: R,
    output: W,
    /// Whether `read` prints a blank line and `Enter value for X:` before blocking
    prompt: bool,
}

impl<'a, R: BufRead, W: Write> Evaluator<'a, R, W> {
    /// Creates an evaluator with prompting enabled
    pub fn new(symbols: &'a mut SymbolTable, input: R, output: W) -> Self {
        Evaluator {
            symbols,
            input,
            output,
            prompt: true,
        }
    }

    /// Enables or disables the read prompt
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    /// Gives back the output stream
    pub fn into_output(self) -> W {
        self.output
    }

    /// Executes the declarations, then the body
    pub fn execute(&mut self, program: &Program) -> Result<()> {
        for declaration in &program.declarations.0 {
            self.declare(declaration)?;
        }
        self.execute_seq(&program.body)?;
        self.output.flush()?;
        Ok(())
    }

    fn declare(&mut self, declaration: &Declaration) -> Result<()> {
        for id in &declaration.names.0 {
            self.symbols.declare(*id)?;
            tracing::debug!(name = self.symbols.name(*id), "declared");
        }
        Ok(())
    }

    fn execute_seq(&mut self, seq: &StatementSeq) -> Result<()> {
        for statement in &seq.0 {
            self.execute_statement(statement)?;
        }
        Ok(())
    }

    fn execute_statement(&mut self, statement: &Statement) -> Result<()> {
        match statement {
            Statement::Assign { target, value } => {
                if !self.symbols.get(*target).is_declared() {
                    // Undeclared targets are ignored rather than rejected
                    tracing::trace!(
                        name = self.symbols.name(*target),
                        "assignment to undeclared identifier skipped"
                    );
                    return Ok(());
                }
                let result = self.evaluate_expression(value)?;
                self.symbols.assign(*target, result);
            }

            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate_condition(condition)? {
                    self.execute_seq(then_branch)?;
                } else if let Some(else_branch) = else_branch {
                    self.execute_seq(else_branch)?;
                }
            }

            Statement::While { condition, body } => {
                while self.evaluate_condition(condition)? {
                    self.execute_seq(body)?;
                }
            }

            Statement::Read(ids) => self.read_ids(ids)?,

            Statement::Write(ids) => self.write_ids(ids)?,
        }
        Ok(())
    }

    fn read_ids(&mut self, ids: &IdList) -> Result<()> {
        for id in &ids.0 {
            let name = self.symbols.name(*id).to_string();
            if !self.symbols.get(*id).is_declared() {
                return Err(Error::NotDeclared { name });
            }

            let value = self.read_value(&name)?;
            self.symbols.assign(*id, value);
            tracing::debug!(name = %name, value, "read");
        }
        Ok(())
    }

    /// Blocks for one input line and parses it as an integer
    fn read_value(&mut self, name: &str) -> Result<i64> {
        if self.prompt {
            write!(self.output, "\nEnter value for {}:\n", name)?;
            self.output.flush()?;
        }

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::InputExhausted {
                name: name.to_string(),
            });
        }

        let text = line.trim();
        text.parse::<i64>().map_err(|_| Error::InvalidInput {
            name: name.to_string(),
            input: text.to_string(),
        })
    }

    fn write_ids(&mut self, ids: &IdList) -> Result<()> {
        for id in &ids.0 {
            let symbol = self.symbols.get(*id);
            if !symbol.is_declared() {
                return Err(Error::NotDeclared {
                    name: symbol.name().to_string(),
                });
            }
            let value = self.symbols.value(*id)?;
            writeln!(self.output, "{} = {}", self.symbols.name(*id), value)?;
            tracing::debug!(name = self.symbols.name(*id), value, "write");
        }
        Ok(())
    }

    /// Evaluates a condition; `&&` and `||` always evaluate both operands
    pub fn evaluate_condition(&self, condition: &Condition) -> Result<bool> {
        match condition {
            Condition::Comparison(comparison) => self.evaluate_comparison(comparison),
            Condition::Not(inner) => Ok(!self.evaluate_condition(inner)?),
            Condition::And(left, right) => {
                let left = self.evaluate_condition(left)?;
                let right = self.evaluate_condition(right)?;
                Ok(left && right)
            }
            Condition::Or(left, right) => {
                let left = self.evaluate_condition(left)?;
                let right = self.evaluate_condition(right)?;
                Ok(left || right)
            }
        }
    }

    fn evaluate_comparison(&self, comparison: &Comparison) -> Result<bool> {
        let left = self.evaluate_operand(&comparison.left)?;
        let right = self.evaluate_operand(&comparison.right)?;
        Ok(comparison.op.apply(left, right))
    }

    /// Evaluates an additive expression
    pub fn evaluate_expression(&self, expression: &Expression) -> Result<i64> {
        match expression {
            Expression::Factor(factor) => self.evaluate_factor(factor),
            Expression::Add(left, rest) => {
                let left = self.evaluate_factor(left)?;
                let right = self.evaluate_expression(rest)?;
                checked("+", left, right, left.checked_add(right))
            }
            Expression::Sub(left, rest) => {
                let left = self.evaluate_factor(left)?;
                let right = self.evaluate_expression(rest)?;
                checked("-", left, right, left.checked_sub(right))
            }
        }
    }

    fn evaluate_factor(&self, factor: &Factor) -> Result<i64> {
        match factor {
            Factor::Operand(operand) => self.evaluate_operand(operand),
            Factor::Mul(left, rest) => {
                let left = self.evaluate_operand(left)?;
                let right = self.evaluate_factor(rest)?;
                checked("*", left, right, left.checked_mul(right))
            }
        }
    }

    fn evaluate_operand(&self, operand: &Operand) -> Result<i64> {
        match operand {
            Operand::IntLiteral(n) => Ok(*n),
            Operand::Identifier(id) => self.identifier_value(*id),
            Operand::Parenthesized(inner) => self.evaluate_expression(inner),
        }
    }

    fn identifier_value(&self, id: SymbolId) -> Result<i64> {
        self.symbols.value(id)
    }
}

fn checked(op: &str, left: i64, right: i64, result: Option<i64>) -> Result<i64> {
    result.ok_or_else(|| Error::ArithmeticOverflow {
        op: op.to_string(),
        left,
        right,
    })
}
