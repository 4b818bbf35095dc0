use tracing::debug;

use crate::{
    ast::{DeclId, Program, Statement},
    error::{Diagnostics, ParseError},
    interpreter::lexer::{Token, TokenKind, Tokenizer},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest nesting the parser accepts. It bounds nested expressions and
/// blocks as well as the height of an expression tree, which every later
/// pass walks recursively.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Recursive-descent parser over a lazily tokenized source.
///
/// Each parse method returns a [`ParseResult`]; a failure abandons only the
/// construct being parsed. The statement loops turn failures into
/// diagnostics and keep going, so a malformed statement never ends the parse.
///
/// # Example
/// ```
/// use playscript::interpreter::parser::core::Parser;
///
/// let (program, diagnostics) = Parser::new("let x = 1; println(x);").parse_program();
/// assert_eq!(program.statements.len(), 2);
/// assert!(diagnostics.is_empty());
/// ```
pub struct Parser {
    tokens:      Tokenizer,
    diagnostics: Diagnostics,
    nesting:     usize,
    next_decl:   usize,
}

impl Parser {
    /// Creates a parser over `source`.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self { tokens:      Tokenizer::new(source),
               diagnostics: Diagnostics::new(),
               nesting:     0,
               next_decl:   0, }
    }

    /// Parses statements until end of input.
    ///
    /// Returns the program together with every lexical and syntactic
    /// diagnostic reported along the way.
    #[must_use]
    pub fn parse_program(mut self) -> (Program, Diagnostics) {
        let mut statements = Vec::new();

        loop {
            let token = self.peek();
            if token.kind == TokenKind::EndOfInput {
                break;
            }
            if token.is("}") {
                let line = token.line;
                self.advance();
                self.diagnostics.report(ParseError::UnbalancedBrace { line });
                continue;
            }
            self.parse_into(&mut statements);
        }

        self.flush_lex_errors();
        debug!(statements = statements.len(), "parse finished");

        (Program { statements,
                   scope: None },
         self.diagnostics)
    }

    /// Parses statements until a closing brace or end of input, leaving that
    /// token unconsumed.
    pub(super) fn parse_statement_list(&mut self) -> Vec<Statement> {
        let mut statements = Vec::new();
        loop {
            let token = self.peek();
            if token.kind == TokenKind::EndOfInput || token.is("}") {
                return statements;
            }
            self.parse_into(&mut statements);
        }
    }

    /// Parses one statement and appends it, or reports why it failed.
    ///
    /// A failure that consumed no token discards one token, so the caller's
    /// loop always makes progress. Nesting that is too deep discards the rest
    /// of the statement instead.
    fn parse_into(&mut self, statements: &mut Vec<Statement>) {
        let start = self.tokens.consumed();
        match self.parse_statement() {
            Ok(statement) => statements.push(statement),
            Err(error) => {
                let too_deep = matches!(error, ParseError::NestingTooDeep { .. });
                self.flush_lex_errors();
                self.diagnostics.report(error);
                if too_deep {
                    self.skip_statement();
                } else if self.tokens.consumed() == start {
                    self.advance();
                }
            },
        }
    }

    /// Discards tokens through the next `;`, stopping early before a `}` or
    /// at end of input.
    fn skip_statement(&mut self) {
        loop {
            let token = self.peek();
            if token.kind == TokenKind::EndOfInput || token.is("}") {
                return;
            }
            if self.advance().is(";") {
                return;
            }
        }
    }

    /// Runs `parse` one nesting level deeper.
    ///
    /// # Errors
    /// `NestingTooDeep` without consuming anything once
    /// [`MAX_NESTING_DEPTH`] levels are open.
    pub(super) fn nested<T>(&mut self,
                            parse: impl FnOnce(&mut Self) -> ParseResult<T>)
                            -> ParseResult<T> {
        if self.nesting >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep { limit: MAX_NESTING_DEPTH,
                                                    line:  self.peek().line, });
        }
        self.nesting += 1;
        let result = parse(self);
        self.nesting -= 1;
        result
    }

    /// Fails once an expression tree grows taller than [`MAX_NESTING_DEPTH`].
    pub(super) const fn check_height(height: usize, line: usize) -> ParseResult<()> {
        if height > MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep { limit: MAX_NESTING_DEPTH,
                                                    line });
        }
        Ok(())
    }

    /// The next token.
    pub(super) fn peek(&mut self) -> &Token {
        self.tokens.peek()
    }

    /// The token after the next one.
    pub(super) fn peek_second(&mut self) -> &Token {
        self.tokens.peek_second()
    }

    /// Consumes the next token.
    pub(super) fn advance(&mut self) -> Token {
        let token = self.tokens.advance();
        self.flush_lex_errors();
        token
    }

    /// Consumes the next token if it is the separator or operator `text`,
    /// otherwise fails without consuming anything.
    pub(super) fn expect(&mut self,
                         text: &'static str,
                         expected: &'static str,
                         construct: &'static str)
                         -> ParseResult<Token> {
        let token = self.peek();
        if token.is(text) {
            return Ok(self.advance());
        }
        Err(ParseError::Expected { expected,
                                   construct,
                                   found: token.describe(),
                                   line: token.line })
    }

    /// Hands out the next declaration id.
    pub(super) fn next_decl_id(&mut self) -> DeclId {
        let id = DeclId(self.next_decl);
        self.next_decl += 1;
        id
    }

    fn flush_lex_errors(&mut self) {
        for error in self.tokens.take_errors() {
            self.diagnostics.report(error);
        }
    }
}
