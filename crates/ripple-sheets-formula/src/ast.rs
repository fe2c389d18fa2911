//! Formula Abstract Syntax Tree types

use ripple_sheets_core::CellAddress;
use std::fmt;

/// Formula expression AST
///
/// Each binary node owns its two children outright; a tree is built once by
/// the parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaExpr {
    /// Numeric literal
    Number(f64),
    /// Single cell reference
    CellRef(CellAddress),
    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<FormulaExpr>,
        right: Box<FormulaExpr>,
    },
}

impl FormulaExpr {
    /// Build a binary node from two owned operands
    pub fn binary(op: BinaryOperator, left: FormulaExpr, right: FormulaExpr) -> Self {
        FormulaExpr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl fmt::Display for FormulaExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaExpr::Number(n) => write!(f, "{}", n),
            FormulaExpr::CellRef(address) => write!(f, "{}", address),
            FormulaExpr::BinaryOp { op, left, right } => {
                write!(f, "({}{}{})", left, op.symbol(), right)
            }
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    /// The operator as written in formula text
    pub fn symbol(&self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_fully_parenthesised() {
        let expr = FormulaExpr::binary(
            BinaryOperator::Add,
            FormulaExpr::CellRef(CellAddress::new(0, 0)),
            FormulaExpr::binary(
                BinaryOperator::Multiply,
                FormulaExpr::Number(2.0),
                FormulaExpr::Number(0.5),
            ),
        );
        assert_eq!(expr.to_string(), "(A1+(2*0.5))");
    }
}
