use crate::{
    ast::{Block, FunctionDecl, Statement, VariableDecl},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

/// Type name recorded when a declaration has no annotation.
pub const DEFAULT_TYPE_NAME: &str = "any";

impl Parser {
    /// Parses a single statement, dispatching on the next token.
    ///
    /// - `function` starts a function declaration.
    /// - `let` starts a variable declaration.
    /// - an identifier, a literal or `(` starts an expression statement.
    ///
    /// Anything else is an [`ParseError::UnrecognizedStatement`].
    pub fn parse_statement(&mut self) -> ParseResult<Statement> {
        let token = self.peek().clone();

        if token.is_keyword("function") {
            return self.parse_function_decl().map(Statement::FunctionDecl);
        }
        if token.is_keyword("let") {
            return self.parse_variable_decl().map(Statement::VariableDecl);
        }

        match token.kind {
            TokenKind::Identifier
            | TokenKind::IntegerLiteral
            | TokenKind::DecimalLiteral
            | TokenKind::StringLiteral
            | TokenKind::BooleanLiteral
            | TokenKind::NullLiteral => self.parse_expression_statement(),
            _ if token.is("(") => self.parse_expression_statement(),
            _ => Err(ParseError::UnrecognizedStatement { found: token.describe(),
                                                         line:  token.line, }),
        }
    }

    /// Parses `let name (: type)? (= expression)? ;`.
    ///
    /// # Errors
    /// - `Expected` if the name is missing, the annotation is not an
    ///   identifier, or the closing `;` is missing.
    /// - Propagates any error from the initializer.
    pub fn parse_variable_decl(&mut self) -> ParseResult<VariableDecl> {
        let line = self.advance().line;

        let name = self.peek();
        if name.kind != TokenKind::Identifier {
            return Err(ParseError::Expected { expected:  "a variable name",
                                              construct: "variable declaration",
                                              found:     name.describe(),
                                              line:      name.line, });
        }
        let name = self.advance().text;

        let mut type_name = DEFAULT_TYPE_NAME.to_string();
        if self.peek().is(":") {
            self.advance();
            let annotation = self.peek();
            if annotation.kind != TokenKind::Identifier {
                return Err(ParseError::Expected { expected:  "a type name",
                                                  construct: "type annotation",
                                                  found:     annotation.describe(),
                                                  line:      annotation.line, });
            }
            type_name = self.advance().text;
        }

        let initializer = if self.peek().is("=") {
            self.advance();
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect(";", "';'", "variable declaration")?;

        Ok(VariableDecl { id: self.next_decl_id(),
                          name,
                          type_name,
                          initializer,
                          scope: None,
                          line })
    }

    /// Parses `function name ( ) { ... }`.
    ///
    /// # Errors
    /// `Expected` for a missing name, parenthesis or brace; statement errors
    /// inside the body are reported by the body's own loop instead.
    pub fn parse_function_decl(&mut self) -> ParseResult<FunctionDecl> {
        let line = self.advance().line;

        let name = self.peek();
        if name.kind != TokenKind::Identifier {
            return Err(ParseError::Expected { expected:  "a function name",
                                              construct: "function declaration",
                                              found:     name.describe(),
                                              line:      name.line, });
        }
        let name = self.advance().text;

        self.expect("(", "'('", "function declaration")?;
        self.expect(")", "')'", "function declaration")?;
        let id = self.next_decl_id();
        let body = self.parse_block()?;

        Ok(FunctionDecl { id,
                          name,
                          body,
                          scope: None,
                          line })
    }

    /// Parses `{ statement* }`.
    ///
    /// # Errors
    /// - `Expected` when the opening or closing brace is missing.
    /// - `NestingTooDeep` when blocks and expressions are already nested too
    ///   deeply around it.
    pub fn parse_block(&mut self) -> ParseResult<Block> {
        let line = self.expect("{", "'{'", "function body")?.line;
        let statements = self.nested(|parser| Ok(parser.parse_statement_list()))?;
        self.expect("}", "'}'", "function body")?;

        Ok(Block { statements, line })
    }

    /// Parses `expression ;`.
    pub fn parse_expression_statement(&mut self) -> ParseResult<Statement> {
        let line = self.peek().line;
        let expr = self.parse_expression()?;
        self.expect(";", "a semicolon", "expression statement")?;

        Ok(Statement::Expression { expr, line })
    }
}
