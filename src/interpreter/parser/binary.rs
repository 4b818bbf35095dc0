use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

/// Threshold below every operator: parses a full expression.
const LOWEST_PRECEDENCE: i32 = 0;

/// Precedence reported for operator tokens that are not binary operators,
/// such as `!` or `++`. Always ends the climb.
const NOT_BINARY: i32 = -1;

impl Parser {
    /// Parses a full expression.
    ///
    /// # Example
    /// ```
    /// use playscript::{ast::{BinaryOperator, Expr}, interpreter::parser::core::Parser};
    ///
    /// let expr = Parser::new("1 + 2 * 3").parse_expression().unwrap();
    /// let Expr::Binary { op, right, .. } = expr else { panic!() };
    /// assert_eq!(op, BinaryOperator::Add);
    /// assert!(matches!(*right, Expr::Binary { op: BinaryOperator::Mul, .. }));
    /// ```
    ///
    /// # Errors
    /// `NestingTooDeep` when the expression nests past
    /// [`MAX_NESTING_DEPTH`](crate::interpreter::parser::core::MAX_NESTING_DEPTH),
    /// including a flat chain with that many operators.
    pub fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_measured().map(|(expr, _)| expr)
    }

    /// Parses a full expression one nesting level deeper and returns it with
    /// the height of its tree.
    pub(super) fn parse_measured(&mut self) -> ParseResult<(Expr, usize)> {
        self.nested(|parser| parser.parse_binary(LOWEST_PRECEDENCE))
    }

    /// Precedence climbing.
    ///
    /// Parses a primary, then keeps folding operators that bind tighter than
    /// `threshold`. The right-hand side of each operator is parsed at that
    /// operator's own precedence, so equal-precedence chains fold to the left.
    ///
    /// # Parameters
    /// - `threshold`: Operators at or below this precedence end the climb.
    ///
    /// # Returns
    /// The folded expression tree and its height. Each fold adds a level on
    /// top of the taller operand.
    fn parse_binary(&mut self, threshold: i32) -> ParseResult<(Expr, usize)> {
        let (mut left, mut height) = self.parse_primary()?;

        loop {
            let token = self.peek();
            if token.kind != TokenKind::Operator {
                break;
            }
            let op = BinaryOperator::from_symbol(&token.text);
            let precedence = op.map_or(NOT_BINARY, BinaryOperator::precedence);
            if let Some(op) = op
               && precedence > threshold
            {
                let line = self.advance().line;
                let (right, right_height) = self.parse_binary(precedence)?;
                height = height.max(right_height) + 1;
                Self::check_height(height, line)?;
                left = Expr::Binary { op,
                                      left: Box::new(left),
                                      right: Box::new(right),
                                      line };
                continue;
            }
            break;
        }

        Ok((left, height))
    }
}
