//! Formula parser
//!
//! A recursive descent parser over the [`Lexer`] token stream:
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := factor (('*' | '/') factor)*
//! factor     := NUMBER | CELLREF | '(' expression ')'
//! ```
//!
//! Both binary levels fold to the left. Parsing stops where `expression`
//! returns; tokens after the single lookahead are not inspected.
//!
//! Trees are walked recursively everywhere else, so their size is bounded:
//! at most [`MAX_OPERATORS`] binary operators and [`MAX_NESTING`] levels of
//! parentheses per formula.

use crate::ast::{BinaryOperator, FormulaExpr};
use crate::error::{FormulaError, FormulaResult};
use crate::lexer::{Lexer, Token};
use ripple_sheets_core::CellAddress;

/// Most binary operators a single formula may contain
pub const MAX_OPERATORS: usize = 1024;

/// Deepest parenthesis nesting a single formula may use
pub const MAX_NESTING: usize = 256;

/// Parse a formula string into an AST
///
/// # Example
/// ```rust
/// use ripple_sheets_formula::parse_formula;
///
/// let ast = parse_formula("=1+2").unwrap();
/// let ast = parse_formula("=(A1+B1)*2").unwrap();
/// assert!(parse_formula("1+2").is_err());
/// ```
pub fn parse_formula(formula: &str) -> FormulaResult<FormulaExpr> {
    let body = formula
        .strip_prefix('=')
        .ok_or(FormulaError::NotAFormula)?;
    parse_expression(body)
}

/// Parse formula text that has already had its leading `=` removed
pub fn parse_expression(input: &str) -> FormulaResult<FormulaExpr> {
    let mut parser = FormulaParser::new(input)?;
    parser.parse_expression()
}

/// Formula parser
struct FormulaParser<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
    /// Binary operators folded so far
    operators: usize,
    /// Currently open parentheses
    nesting: usize,
}

impl<'a> FormulaParser<'a> {
    fn new(input: &'a str) -> FormulaResult<Self> {
        let mut lexer = Lexer::new(input);
        let current_token = lexer.next_token()?;
        Ok(Self {
            lexer,
            current_token,
            operators: 0,
            nesting: 0,
        })
    }

    fn consume(&mut self) -> FormulaResult<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current_token, next))
    }

    /// Fold `left op right`, counting the operator against the limit
    fn binary(
        &mut self,
        op: BinaryOperator,
        left: FormulaExpr,
        right: FormulaExpr,
    ) -> FormulaResult<FormulaExpr> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(FormulaError::TooComplex(format!(
                "more than {} operators",
                MAX_OPERATORS
            )));
        }
        Ok(FormulaExpr::binary(op, left, right))
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest):
    // 1. Addition/Subtraction: +, -
    // 2. Multiplication/Division: *, /
    // 3. Primary: numbers, cell references, parentheses

    fn parse_expression(&mut self) -> FormulaResult<FormulaExpr> {
        let mut left = self.parse_term()?;

        loop {
            let op = match self.current_token {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.consume()?;
            let right = self.parse_term()?;
            left = self.binary(op, left, right)?;
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> FormulaResult<FormulaExpr> {
        let mut left = self.parse_factor()?;

        loop {
            let op = match self.current_token {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                _ => break,
            };

            self.consume()?;
            let right = self.parse_factor()?;
            left = self.binary(op, left, right)?;
        }

        Ok(left)
    }

    fn parse_factor(&mut self) -> FormulaResult<FormulaExpr> {
        match self.current_token {
            Token::Number(n) => {
                self.consume()?;
                Ok(FormulaExpr::Number(n))
            }

            Token::CellRef(ref text) => {
                let expr = parse_cell_reference(text)?;
                self.consume()?;
                Ok(expr)
            }

            Token::LeftParen => {
                self.nesting += 1;
                if self.nesting > MAX_NESTING {
                    return Err(FormulaError::TooComplex(format!(
                        "parentheses nested more than {} deep",
                        MAX_NESTING
                    )));
                }
                self.consume()?;
                let expr = self.parse_expression()?;
                if self.current_token != Token::RightParen {
                    return Err(FormulaError::MissingParenthesis);
                }
                self.consume()?;
                self.nesting -= 1;
                Ok(expr)
            }

            ref other => Err(FormulaError::Syntax(format!(
                "expected a number, cell reference or '(' but found {:?}",
                other
            ))),
        }
    }
}

fn parse_cell_reference(text: &str) -> FormulaResult<FormulaExpr> {
    let address = CellAddress::parse(text)
        .map_err(|e| FormulaError::InvalidReference(format!("'{}': {}", text, e)))?;
    Ok(FormulaExpr::CellRef(address))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cell(s: &str) -> FormulaExpr {
        FormulaExpr::CellRef(CellAddress::parse(s).unwrap())
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_formula("=42").unwrap(), FormulaExpr::Number(42.0));
        assert_eq!(parse_formula("=3.14").unwrap(), FormulaExpr::Number(3.14));
    }

    #[test]
    fn test_parse_cell_reference() {
        assert_eq!(parse_formula("=AA12").unwrap(), cell("AA12"));
    }

    #[test]
    fn test_parse_arithmetic() {
        // Should parse as 1+(2*3) due to precedence
        let ast = parse_formula("=1+2*3").unwrap();
        assert_eq!(
            ast,
            FormulaExpr::binary(
                BinaryOperator::Add,
                FormulaExpr::Number(1.0),
                FormulaExpr::binary(
                    BinaryOperator::Multiply,
                    FormulaExpr::Number(2.0),
                    FormulaExpr::Number(3.0)
                )
            )
        );
    }

    #[test]
    fn test_parse_left_associative() {
        let ast = parse_formula("=A1-B1-C1").unwrap();
        assert_eq!(ast.to_string(), "((A1-B1)-C1)");

        let ast = parse_formula("=8/4/2").unwrap();
        assert_eq!(ast.to_string(), "((8/4)/2)");
    }

    #[test]
    fn test_parse_parentheses() {
        let ast = parse_formula("=(A1+B1)*2").unwrap();
        assert_eq!(
            ast,
            FormulaExpr::binary(
                BinaryOperator::Multiply,
                FormulaExpr::binary(BinaryOperator::Add, cell("A1"), cell("B1")),
                FormulaExpr::Number(2.0)
            )
        );

        let ast = parse_formula("=((1))").unwrap();
        assert_eq!(ast, FormulaExpr::Number(1.0));
    }

    #[test]
    fn test_parse_whitespace() {
        let ast = parse_formula("=  A1 *  ( 2 + B3 ) ").unwrap();
        assert_eq!(ast.to_string(), "(A1*(2+B3))");
    }

    #[test]
    fn test_missing_parenthesis() {
        assert_eq!(
            parse_formula("=(1+2"),
            Err(FormulaError::MissingParenthesis)
        );
        assert_eq!(
            parse_formula("=((A1)"),
            Err(FormulaError::MissingParenthesis)
        );
    }

    #[test]
    fn test_syntax_errors() {
        assert!(matches!(parse_formula("="), Err(FormulaError::Syntax(_))));
        assert!(matches!(parse_formula("=1+"), Err(FormulaError::Syntax(_))));
        assert!(matches!(parse_formula("=*2"), Err(FormulaError::Syntax(_))));
        // No unary minus
        assert!(matches!(parse_formula("=-5"), Err(FormulaError::Syntax(_))));
        assert!(matches!(parse_formula("=)"), Err(FormulaError::Syntax(_))));
    }

    #[test]
    fn test_invalid_reference() {
        assert!(matches!(
            parse_formula("=ABC+1"),
            Err(FormulaError::InvalidReference(_))
        ));
        assert!(matches!(
            parse_formula("=A0"),
            Err(FormulaError::InvalidReference(_))
        ));
    }

    #[test]
    fn test_invalid_character() {
        assert!(matches!(
            parse_formula("=SUM(A1)+a2"),
            Err(FormulaError::InvalidReference(_))
        ));
        assert!(matches!(
            parse_formula("=2^3"),
            Err(FormulaError::InvalidCharacter { character: '^', .. })
        ));
    }

    #[test]
    fn test_trailing_tokens_are_ignored() {
        assert_eq!(parse_formula("=1+2)").unwrap().to_string(), "(1+2)");
        assert_eq!(parse_formula("=1 2").unwrap(), FormulaExpr::Number(1.0));
    }

    #[test]
    fn test_operator_limit() {
        let at_limit = format!("=1{}", "+1".repeat(MAX_OPERATORS));
        assert!(parse_formula(&at_limit).is_ok());

        let long_sum = format!("=1{}", "+1".repeat(10_000));
        assert!(matches!(
            parse_formula(&long_sum),
            Err(FormulaError::TooComplex(_))
        ));

        let long_product = format!("=2{}", "*A1".repeat(MAX_OPERATORS + 1));
        assert!(matches!(
            parse_formula(&long_product),
            Err(FormulaError::TooComplex(_))
        ));
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |depth: usize| format!("={}1{}", "(".repeat(depth), ")".repeat(depth));

        assert_eq!(
            parse_formula(&nested(MAX_NESTING)).unwrap(),
            FormulaExpr::Number(1.0)
        );
        assert!(matches!(
            parse_formula(&nested(10_000)),
            Err(FormulaError::TooComplex(_))
        ));
        // Sequential groups do not add up
        let groups = format!("=(1){}", "+(1)".repeat(MAX_NESTING * 2));
        assert!(parse_formula(&groups).is_ok());
    }

    #[test]
    fn test_number_overflow() {
        let huge = format!("={}", "9".repeat(400));
        assert!(matches!(
            parse_formula(&huge),
            Err(FormulaError::InvalidNumber(_))
        ));
        assert!(matches!(
            parse_formula(&format!("=1+{}", "9".repeat(400))),
            Err(FormulaError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_requires_equals_prefix() {
        assert_eq!(parse_formula("1+2"), Err(FormulaError::NotAFormula));
        assert_eq!(parse_expression("1+2").unwrap().to_string(), "(1+2)");
    }
}
