use std::collections::VecDeque;

use crate::{error::LexError, interpreter::cursor::Cursor};

/// Words that always classify as [`TokenKind::Keyword`].
///
/// `null`, `true` and `false` are deliberately absent; they become literal
/// tokens instead.
pub const KEYWORDS: &[&str] = &["function", "class", "break", "delete", "return", "case", "do",
                                "if", "switch", "var", "catch", "else", "in", "this", "void",
                                "continue", "instanceof", "throw", "while", "debugger", "finally",
                                "new", "with", "default", "for", "try", "typeof", "implements",
                                "let", "private", "public", "yield", "interface", "package",
                                "protected", "static"];

/// Every multi- and single-character operator, longest first.
///
/// Matching walks this table in order, so the first hit is the longest
/// operator the input starts with.
pub const OPERATORS: &[&str] = &[">>>=", ">>>", "===", "!==", "<<=", ">>=", "<<", ">>", "<=",
                                 ">=", "==", "!=", "=>", "+=", "-=", "*=", "/=", "%=", "&=",
                                 "|=", "^=", "++", "--", "&&", "||", "+", "-", "*", "/", "%",
                                 ">", "<", "=", "!", "&", "|", "^", "~"];

/// Single characters that form [`TokenKind::Separator`] tokens.
pub const SEPARATORS: &[char] = &['(', ')', '[', ']', '{', '}', ';', ',', ':', '?', '@'];

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A reserved word such as `function` or `let`.
    Keyword,
    /// A user-chosen name.
    Identifier,
    /// Text between double quotes, quotes excluded.
    StringLiteral,
    /// A run of digits.
    IntegerLiteral,
    /// Digits with a fractional part, such as `1.5`, `2.` or `.5`.
    DecimalLiteral,
    /// `null`
    NullLiteral,
    /// `true` or `false`
    BooleanLiteral,
    /// Punctuation that structures code: brackets, `;`, `,`, `.` and friends.
    Separator,
    /// Arithmetic, comparison, logical and assignment operators.
    Operator,
    /// Produced once the input is exhausted, and on every request after.
    EndOfInput,
}

/// A classified lexeme together with where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What sort of token this is.
    pub kind:   TokenKind,
    /// The lexeme. Empty for [`TokenKind::EndOfInput`].
    pub text:   String,
    /// Line of the first character.
    pub line:   usize,
    /// Column of the first character.
    pub column: usize,
}

impl Token {
    /// Reports whether this token is a separator or operator spelled `text`.
    #[must_use]
    pub fn is(&self, text: &str) -> bool {
        matches!(self.kind, TokenKind::Separator | TokenKind::Operator) && self.text == text
    }

    /// Reports whether this token is the keyword `word`.
    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == word
    }

    /// Text used when a token is quoted in a diagnostic.
    #[must_use]
    pub fn describe(&self) -> String {
        if self.kind == TokenKind::EndOfInput {
            "end of input".to_string()
        } else {
            self.text.clone()
        }
    }
}

/// Turns source text into tokens on demand, with two tokens of lookahead.
///
/// Tokens are computed lazily: [`Tokenizer::peek`] and
/// [`Tokenizer::peek_second`] fill a small buffer, and
/// [`Tokenizer::advance`] drains it before computing anything new.
/// Unrecognised input is recorded as a [`LexError`] and skipped.
///
/// # Example
/// ```
/// use playscript::interpreter::lexer::{TokenKind, Tokenizer};
///
/// let mut tokens = Tokenizer::new("let x = 1.5;");
/// assert_eq!(tokens.peek_second().text, "x");
/// assert_eq!(tokens.advance().kind, TokenKind::Keyword);
/// assert_eq!(tokens.advance().kind, TokenKind::Identifier);
/// assert_eq!(tokens.advance().text, "=");
/// assert_eq!(tokens.advance().kind, TokenKind::DecimalLiteral);
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer {
    cursor:   Cursor,
    buffer:   VecDeque<Token>,
    errors:   Vec<LexError>,
    consumed: usize,
}

impl Tokenizer {
    /// Creates a tokenizer over `source`.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self { cursor:   Cursor::new(source),
               buffer:   VecDeque::with_capacity(2),
               errors:   Vec::new(),
               consumed: 0, }
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> &Token {
        self.fill(1);
        &self.buffer[0]
    }

    /// Returns the token after the next one without consuming anything.
    pub fn peek_second(&mut self) -> &Token {
        self.fill(2);
        &self.buffer[1]
    }

    /// Consumes and returns the next token.
    pub fn advance(&mut self) -> Token {
        self.consumed += 1;
        match self.buffer.pop_front() {
            Some(token) => token,
            None => self.next_token(),
        }
    }

    /// Number of tokens consumed so far.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.consumed
    }

    /// Removes and returns the lexical errors recorded since the last call.
    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }

    fn fill(&mut self, count: usize) {
        while self.buffer.len() < count {
            let token = self.next_token();
            self.buffer.push_back(token);
        }
    }

    /// Computes the next token straight from the cursor.
    ///
    /// Comments and unrecognised characters loop back to the top rather than
    /// recursing.
    fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();

            let line = self.cursor.line();
            let column = self.cursor.column();
            let Some(c) = self.cursor.peek() else {
                return Token { kind: TokenKind::EndOfInput,
                               text: String::new(),
                               line,
                               column };
            };

            let lexeme = match c {
                '"' => Some(self.string_literal()),
                '/' if matches!(self.cursor.lookahead(1), Some('/' | '*')) => {
                    self.skip_comment();
                    None
                },
                '.' => self.dot(line, column),
                c if c.is_ascii_alphabetic() || c == '_' => Some(self.identifier()),
                c if c.is_ascii_digit() => Some(self.number()),
                c if SEPARATORS.contains(&c) => {
                    self.cursor.advance();
                    Some((TokenKind::Separator, c.to_string()))
                },
                _ => self.operator(c, line, column),
            };

            if let Some((kind, text)) = lexeme {
                return Token { kind, text, line, column };
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.cursor.peek().is_some_and(char::is_whitespace) {
            self.cursor.advance();
        }
    }

    /// Skips a `//` or `/* */` comment. An unterminated block comment runs to
    /// the end of input.
    fn skip_comment(&mut self) {
        self.cursor.advance();
        if self.cursor.advance() == Some('/') {
            while self.cursor.peek().is_some_and(|c| c != '\n') {
                self.cursor.advance();
            }
            return;
        }

        while !self.cursor.is_at_end() {
            if self.cursor.starts_with("*/") {
                self.cursor.advance();
                self.cursor.advance();
                return;
            }
            self.cursor.advance();
        }
    }

    fn identifier(&mut self) -> (TokenKind, String) {
        let text = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let kind = match text.as_str() {
            "null" => TokenKind::NullLiteral,
            "true" | "false" => TokenKind::BooleanLiteral,
            word if KEYWORDS.contains(&word) => TokenKind::Keyword,
            _ => TokenKind::Identifier,
        };
        (kind, text)
    }

    fn number(&mut self) -> (TokenKind, String) {
        let mut text = self.take_while(|c| c.is_ascii_digit());
        if self.cursor.peek() != Some('.') {
            return (TokenKind::IntegerLiteral, text);
        }
        self.cursor.advance();
        text.push('.');
        text.push_str(&self.take_while(|c| c.is_ascii_digit()));
        (TokenKind::DecimalLiteral, text)
    }

    /// Handles a leading `.`: a decimal such as `.5`, the `...` separator, or
    /// the plain `.` separator.
    fn dot(&mut self, line: usize, column: usize) -> Option<(TokenKind, String)> {
        match self.cursor.lookahead(1) {
            Some(d) if d.is_ascii_digit() => Some(self.number()),
            Some('.') if self.cursor.starts_with("...") => {
                for _ in 0..3 {
                    self.cursor.advance();
                }
                Some((TokenKind::Separator, "...".to_string()))
            },
            Some('.') => {
                self.cursor.advance();
                self.cursor.advance();
                self.errors.push(LexError::IncompleteSpread { line, column });
                None
            },
            _ => {
                self.cursor.advance();
                Some((TokenKind::Separator, ".".to_string()))
            },
        }
    }

    /// Reads characters up to the closing quote. An unterminated string ends
    /// at end of input without an error.
    fn string_literal(&mut self) -> (TokenKind, String) {
        self.cursor.advance();
        let text = self.take_while(|c| c != '"');
        self.cursor.advance();
        (TokenKind::StringLiteral, text)
    }

    fn operator(&mut self, c: char, line: usize, column: usize) -> Option<(TokenKind, String)> {
        if let Some(op) = OPERATORS.iter().find(|op| self.cursor.starts_with(op)) {
            for _ in 0..op.len() {
                self.cursor.advance();
            }
            return Some((TokenKind::Operator, (*op).to_string()));
        }

        self.cursor.advance();
        self.errors.push(LexError::UnrecognizedCharacter { character: c,
                                                           line,
                                                           column });
        None
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(c) = self.cursor.peek()
              && predicate(c)
        {
            text.push(c);
            self.cursor.advance();
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::{TokenKind, Tokenizer};
    use crate::error::LexError;

    fn lex(source: &str) -> Vec<(TokenKind, String)> {
        let mut tokens = Tokenizer::new(source);
        let mut out = Vec::new();
        loop {
            let token = tokens.advance();
            let done = token.kind == TokenKind::EndOfInput;
            out.push((token.kind, token.text));
            if done {
                return out;
            }
        }
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).into_iter().map(|(kind, _)| kind).collect()
    }

    fn texts(source: &str) -> Vec<String> {
        lex(source).into_iter().map(|(_, text)| text).collect()
    }

    #[test]
    fn classifies_words() {
        use TokenKind::{
            BooleanLiteral, EndOfInput, Identifier, Keyword, NullLiteral,
        };

        assert_eq!(kinds("let function foo_1 _bar null true false"),
                   vec![Keyword,
                        Keyword,
                        Identifier,
                        Identifier,
                        NullLiteral,
                        BooleanLiteral,
                        BooleanLiteral,
                        EndOfInput]);
    }

    #[test]
    fn classifies_numbers() {
        assert_eq!(lex("42 3.25 7. .5"),
                   vec![(TokenKind::IntegerLiteral, "42".to_string()),
                        (TokenKind::DecimalLiteral, "3.25".to_string()),
                        (TokenKind::DecimalLiteral, "7.".to_string()),
                        (TokenKind::DecimalLiteral, ".5".to_string()),
                        (TokenKind::EndOfInput, String::new())]);
    }

    #[test]
    fn operators_use_longest_match() {
        assert_eq!(texts(">>>= >>> >> > === == = <<= << <= += ++ + && & || |= !== != !"),
                   vec![">>>=", ">>>", ">>", ">", "===", "==", "=", "<<=", "<<", "<=", "+=",
                        "++", "+", "&&", "&", "||", "|=", "!==", "!=", "!", ""]);
        assert_eq!(texts("a+++b"), vec!["a", "++", "+", "b", ""]);
    }

    #[test]
    fn separators_and_dots() {
        assert_eq!(lex("(a.b)...;"),
                   vec![(TokenKind::Separator, "(".to_string()),
                        (TokenKind::Identifier, "a".to_string()),
                        (TokenKind::Separator, ".".to_string()),
                        (TokenKind::Identifier, "b".to_string()),
                        (TokenKind::Separator, ")".to_string()),
                        (TokenKind::Separator, "...".to_string()),
                        (TokenKind::Separator, ";".to_string()),
                        (TokenKind::EndOfInput, String::new())]);
    }

    #[test]
    fn strings_drop_their_quotes() {
        assert_eq!(lex("\"hello world\" x"),
                   vec![(TokenKind::StringLiteral, "hello world".to_string()),
                        (TokenKind::Identifier, "x".to_string()),
                        (TokenKind::EndOfInput, String::new())]);
    }

    #[test]
    fn unterminated_string_runs_to_end() {
        let mut tokens = Tokenizer::new("\"abc");
        let token = tokens.advance();
        assert_eq!((token.kind, token.text.as_str()), (TokenKind::StringLiteral, "abc"));
        assert_eq!(tokens.advance().kind, TokenKind::EndOfInput);
        assert!(tokens.take_errors().is_empty());
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(texts("a // line comment\n b /* block\n comment */ c / d"),
                   vec!["a", "b", "c", "/", "d", ""]);
        assert_eq!(texts("a /* never closed"), vec!["a", ""]);
    }

    #[test]
    fn unrecognized_characters_are_reported_and_skipped() {
        let mut tokens = Tokenizer::new("a # $ b");
        assert_eq!(tokens.advance().text, "a");
        assert_eq!(tokens.advance().text, "b");
        assert_eq!(tokens.take_errors(),
                   vec![LexError::UnrecognizedCharacter { character: '#',
                                                          line:      1,
                                                          column:    2, },
                        LexError::UnrecognizedCharacter { character: '$',
                                                          line:      1,
                                                          column:    4, }]);
    }

    #[test]
    fn double_dot_is_reported() {
        let mut tokens = Tokenizer::new("a..b");
        assert_eq!(tokens.advance().text, "a");
        assert_eq!(tokens.advance().text, "b");
        assert_eq!(tokens.take_errors(), vec![LexError::IncompleteSpread { line: 1, column: 1 }]);
    }

    #[test]
    fn lookahead_buffers_without_consuming() {
        let mut tokens = Tokenizer::new("foo ( )");
        assert_eq!(tokens.peek().text, "foo");
        assert_eq!(tokens.peek_second().text, "(");
        assert_eq!(tokens.peek().text, "foo");
        assert_eq!(tokens.consumed(), 0);
        assert_eq!(tokens.advance().text, "foo");
        assert_eq!(tokens.advance().text, "(");
        assert_eq!(tokens.advance().text, ")");
        assert_eq!(tokens.consumed(), 3);
        assert_eq!(tokens.advance().kind, TokenKind::EndOfInput);
        assert_eq!(tokens.advance().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn tokens_record_positions() {
        let mut tokens = Tokenizer::new("let\n  x");
        let first = tokens.advance();
        let second = tokens.advance();
        assert_eq!((first.line, first.column), (1, 0));
        assert_eq!((second.line, second.column), (2, 2));
    }

    #[test]
    fn printed_tokens_round_trip() {
        let original = lex("function f(){ let a: number = 1.5 * (b >>> 2); println(\"hi\", a >= \
                            .25, null, true); }");
        let printed = original.iter()
                              .filter(|(kind, _)| *kind != TokenKind::EndOfInput)
                              .map(|(kind, text)| match kind {
                                  TokenKind::StringLiteral => format!("\"{text}\""),
                                  _ => text.clone(),
                              })
                              .collect::<Vec<_>>()
                              .join(" ");
        assert_eq!(lex(&printed), original);
    }
}
