use serde::{Deserialize, Serialize};
use std::fmt;

use crate::runtime::SymbolId;

/// Complete Core program: `program <decl_seq> begin <stmt_seq> end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Declarations before `begin`
    pub declarations: DeclarationSeq,
    /// Statements between `begin` and `end`
    pub body: StatementSeq,
}

/// One or more declarations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclarationSeq(pub Vec<Declaration>);

/// `int <id_list> ;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// Names introduced by this declaration
    pub names: IdList,
}

/// One or more comma-separated identifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdList(pub Vec<SymbolId>);

/// One or more statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementSeq(pub Vec<Statement>);

/// Statements, each terminated by `;` in the source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// Assignment: `X = exp`
    Assign {
        /// Identifier being assigned
        target: SymbolId,
        /// Right-hand side
        value: Expression,
    },

    /// `if cond then stmt_seq [else stmt_seq] end`
    If {
        /// Condition to test
        condition: Condition,
        /// Statements run when the condition holds
        then_branch: StatementSeq,
        /// Statements run otherwise
        else_branch: Option<StatementSeq>,
    },

    /// `while cond loop stmt_seq end`
    While {
        /// Loop condition
        condition: Condition,
        /// Loop body
        body: StatementSeq,
    },

    /// `read id_list`
    Read(IdList),

    /// `write id_list`
    Write(IdList),
}

/// Boolean conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// `(op comp_op op)`
    Comparison(Comparison),
    /// `!cond`
    Not(Box<Condition>),
    /// `[cond && cond]`
    And(Box<Condition>, Box<Condition>),
    /// `[cond || cond]`
    Or(Box<Condition>, Box<Condition>),
}

/// `(left op right)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Left operand
    pub left: Operand,
    /// Relational operator
    pub op: CompareOp,
    /// Right operand
    pub right: Operand,
}

/// Relational operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    /// `!=`
    NotEq,
    /// `==`
    Eq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
}

impl CompareOp {
    /// Applies the operator to two integers
    pub fn apply(self, left: i64, right: i64) -> bool {
        match self {
            CompareOp::NotEq => left != right,
            CompareOp::Eq => left == right,
            CompareOp::Lt => left < right,
            CompareOp::Gt => left > right,
            CompareOp::LtEq => left <= right,
            CompareOp::GtEq => left >= right,
        }
    }
}

/// Additive expression, right-recursive: `a - b - c` is `a - (b - c)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// `fac`
    Factor(Factor),
    /// `fac + exp`
    Add(Factor, Box<Expression>),
    /// `fac - exp`
    Sub(Factor, Box<Expression>),
}

/// Multiplicative term, right-recursive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Factor {
    /// `op`
    Operand(Operand),
    /// `op * fac`
    Mul(Operand, Box<Factor>),
}

/// Leaf operands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    /// Non-negative integer literal
    IntLiteral(i64),
    /// Reference to an identifier entity
    Identifier(SymbolId),
    /// `( exp )`
    Parenthesized(Box<Expression>),
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CompareOp::NotEq => write!(f, "!="),
            CompareOp::Eq => write!(f, "=="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::LtEq => write!(f, "<="),
            CompareOp::GtEq => write!(f, ">="),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_op_apply() {
        assert!(CompareOp::NotEq.apply(1, 2));
        assert!(CompareOp::Eq.apply(3, 3));
        assert!(CompareOp::Lt.apply(-1, 0));
        assert!(!CompareOp::Gt.apply(2, 2));
        assert!(CompareOp::LtEq.apply(2, 2));
        assert!(CompareOp::GtEq.apply(5, 4));
    }

    #[test]
    fn test_compare_op_display() {
        assert_eq!(CompareOp::LtEq.to_string(), "<=");
        assert_eq!(CompareOp::NotEq.to_string(), "!=");
    }
}
