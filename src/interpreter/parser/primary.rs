use crate::{
    ast::{Binding, Expr, FunctionCall, LiteralValue, Variable},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, Parser},
    },
};

impl Parser {
    /// Parses a primary expression: a call, a variable, a literal or a
    /// parenthesized expression.
    ///
    /// # Returns
    /// The expression and the height of its tree. Parentheses add no height
    /// of their own.
    ///
    /// # Errors
    /// - `UnrecognizedExpression` when the next token cannot start an
    ///   expression. Nothing is consumed in that case.
    /// - `LiteralTooLarge` for an integer literal outside the `i64` range.
    /// - `Expected` for a missing `)`.
    /// - `NestingTooDeep` for parentheses or calls nested too deeply.
    pub fn parse_primary(&mut self) -> ParseResult<(Expr, usize)> {
        let token = self.peek().clone();

        match token.kind {
            TokenKind::Identifier if self.peek_second().is("(") => {
                let (call, height) = self.parse_function_call()?;
                Ok((Expr::FunctionCall(call), height))
            },
            TokenKind::Identifier => {
                self.advance();
                Ok((Expr::Variable(Variable { name:        token.text,
                                              declaration: Binding::unresolved(),
                                              line:        token.line, }),
                    1))
            },
            TokenKind::IntegerLiteral
            | TokenKind::DecimalLiteral
            | TokenKind::StringLiteral
            | TokenKind::BooleanLiteral
            | TokenKind::NullLiteral => {
                self.advance();
                let value = literal_value(&token)?;
                Ok((Expr::Literal { value,
                                    line: token.line },
                    1))
            },
            _ if token.is("(") => {
                self.advance();
                let measured = self.parse_measured()?;
                self.expect(")", "')'", "parenthesized expression")?;
                Ok(measured)
            },
            _ => Err(ParseError::UnrecognizedExpression { found: token.describe(),
                                                          line:  token.line, }),
        }
    }

    /// Parses `name ( arguments )`.
    ///
    /// Arguments are comma separated; a trailing comma is an error, and the
    /// argument count is not checked against any declaration. The call sits
    /// one level above its tallest argument.
    fn parse_function_call(&mut self) -> ParseResult<(FunctionCall, usize)> {
        let name = self.advance();
        self.advance();

        let mut arguments = Vec::new();
        let mut height = 0;
        if !self.peek().is(")") {
            loop {
                let (argument, argument_height) = self.parse_measured()?;
                arguments.push(argument);
                height = height.max(argument_height);
                if self.peek().is(",") {
                    self.advance();
                    continue;
                }
                break;
            }
        }
        self.expect(")", "')'", "function call")?;
        Self::check_height(height + 1, name.line)?;

        Ok((FunctionCall { name: name.text,
                           arguments,
                           definition: Binding::unresolved(),
                           line: name.line },
            height + 1))
    }
}

/// Converts a literal token to its value.
///
/// # Errors
/// `LiteralTooLarge` when an integer literal does not fit `i64`.
fn literal_value(token: &Token) -> ParseResult<LiteralValue> {
    let value = match token.kind {
        TokenKind::IntegerLiteral => {
            let n = token.text
                         .parse()
                         .map_err(|_| ParseError::LiteralTooLarge { literal: token.text.clone(),
                                                                    line:    token.line, })?;
            LiteralValue::Integer(n)
        },
        TokenKind::DecimalLiteral => {
            let r = token.text
                         .parse()
                         .map_err(|_| ParseError::UnrecognizedExpression { found: token.text
                                                                                       .clone(),
                                                                           line:  token.line, })?;
            LiteralValue::Decimal(r)
        },
        TokenKind::StringLiteral => LiteralValue::String(token.text.clone()),
        TokenKind::BooleanLiteral => LiteralValue::Bool(token.text == "true"),
        _ => LiteralValue::Null,
    };
    Ok(value)
}
