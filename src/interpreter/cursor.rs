/// Walks the characters of a source string while tracking line and column.
///
/// The cursor is the lowest layer of the pipeline. End of input is reported
/// as `None` by [`Cursor::peek`]; every operation is total.
#[derive(Debug, Clone)]
pub struct Cursor {
    chars:  Vec<char>,
    pos:    usize,
    line:   usize,
    column: usize,
}

impl Cursor {
    /// Creates a cursor positioned at the first character of `source`.
    ///
    /// Lines are counted from 1 and columns from 0.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self { chars:  source.chars().collect(),
               pos:    0,
               line:   1,
               column: 0, }
    }

    /// Returns the current character without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Returns the character `offset` positions past the current one.
    ///
    /// `lookahead(0)` is the same as [`Cursor::peek`].
    #[must_use]
    pub fn lookahead(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// Reports whether the remaining input begins with `pattern`.
    #[must_use]
    pub fn starts_with(&self, pattern: &str) -> bool {
        pattern.chars()
               .enumerate()
               .all(|(offset, expected)| self.lookahead(offset) == Some(expected))
    }

    /// Reports whether the end-of-input sentinel is current.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Consumes and returns the current character.
    ///
    /// A newline increments the line counter and resets the column; any
    /// other character increments the column. At end of input nothing moves
    /// and `None` is returned.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Current line, starting at 1.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Current column, starting at 0.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }
}
