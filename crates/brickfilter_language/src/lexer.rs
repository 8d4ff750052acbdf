//! Character scanner for command text.
//!
//! The scanner walks the input by character index and reads the lexical
//! forms the parser asks for: identifiers, numbers with unit suffixes, and
//! quoted strings. It keeps no token buffer; the parser can save and
//! restore the cursor with [`Checkpoint`] to try a form and back out.

use brickfilter_foundation::{ParseError, ParseErrorKind};

/// Result type for scanner and parser internals.
pub type ScanResult<T> = std::result::Result<T, ParseError>;

/// A saved cursor position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Cursor over the characters of one command.
pub struct Scanner<'src> {
    /// Source text, kept for error reports.
    source: &'src str,
    /// Source characters, indexed by column.
    chars: Vec<char>,
    /// Current column (0-based character offset).
    position: usize,
}

impl<'src> Scanner<'src> {
    /// Creates a scanner at the start of `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            position: 0,
        }
    }

    /// Returns the source text.
    #[must_use]
    pub const fn source(&self) -> &'src str {
        self.source
    }

    /// Returns the current column.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns true when every character has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    /// Saves the cursor.
    #[must_use]
    pub const fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.position)
    }

    /// Moves the cursor back to a saved position.
    pub const fn restore(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.0;
    }

    /// Peeks at the next character without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    /// Peeks `n` characters past the next one.
    #[must_use]
    pub fn peek_n(&self, n: usize) -> Option<char> {
        self.chars.get(self.position + n).copied()
    }

    /// Consumes and returns the next character.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        Some(c)
    }

    /// Consumes the next character if it is `expected`.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Skips ASCII whitespace. Returns true if anything was skipped.
    pub fn skip_whitespace(&mut self) -> bool {
        let start = self.position;
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.position += 1;
        }
        self.position > start
    }

    /// Returns true if the next character can start an identifier.
    #[must_use]
    pub fn at_identifier(&self) -> bool {
        self.peek().is_some_and(char::is_alphabetic)
    }

    /// Returns true if the next character can start a number.
    #[must_use]
    pub fn at_number(&self) -> bool {
        self.peek()
            .is_some_and(|c| c.is_ascii_digit() || c == '-' || c == '.')
    }

    /// Reads the identifier at the cursor without consuming it.
    #[must_use]
    pub fn peek_identifier(&self) -> Option<String> {
        if !self.at_identifier() {
            return None;
        }
        let word = self.chars[self.position..]
            .iter()
            .take_while(|c| is_identifier_char(**c))
            .collect();
        Some(word)
    }

    /// Reads an identifier: a letter, then letters, digits, `?` or `!`.
    ///
    /// # Errors
    /// Returns `InvalidIdentifier` if the next character is not a letter.
    pub fn scan_identifier(&mut self) -> ScanResult<String> {
        let word = self
            .peek_identifier()
            .ok_or_else(|| self.error(ParseErrorKind::InvalidIdentifier))?;
        self.position += word.chars().count();
        Ok(word)
    }

    /// Reads a number with an optional unit suffix.
    ///
    /// The numeral is an optional `-`, digits, and an optional `.` with
    /// digits. A unit suffix is an identifier, optionally preceded by
    /// whitespace. Units are not validated here.
    ///
    /// # Errors
    /// Returns `InvalidNumber` if no numeral can be read.
    pub fn scan_number(&mut self) -> ScanResult<(f64, Option<String>)> {
        let start = self.position;
        self.eat('-');
        let mut digits = self.skip_digits();
        if self.peek() == Some('.') && self.peek_n(1).is_some_and(|c| c.is_ascii_digit()) {
            self.position += 1;
            digits += self.skip_digits();
        }
        if digits == 0 {
            return Err(self.error_at(ParseErrorKind::InvalidNumber, start));
        }

        let text: String = self.chars[start..self.position].iter().collect();
        let value = text
            .parse::<f64>()
            .map_err(|_| self.error_at(ParseErrorKind::InvalidNumber, start))?;

        let before_units = self.checkpoint();
        self.skip_whitespace();
        let units = if self.at_identifier() {
            Some(self.scan_identifier()?)
        } else {
            self.restore(before_units);
            None
        };

        Ok((value, units))
    }

    /// Reads a string quoted with `'` or `"`.
    ///
    /// A backslash takes the next character literally.
    ///
    /// # Errors
    /// Returns `UnterminatedString` if input ends before the closing quote.
    pub fn scan_quoted(&mut self) -> ScanResult<String> {
        let quote = self
            .advance()
            .ok_or_else(|| self.error(ParseErrorKind::UnterminatedString))?;
        let mut text = String::new();
        loop {
            match self.advance() {
                Some(c) if c == quote => return Ok(text),
                Some('\\') => match self.advance() {
                    Some(c) => text.push(c),
                    None => return Err(self.error(ParseErrorKind::UnterminatedString)),
                },
                Some(c) => text.push(c),
                None => return Err(self.error(ParseErrorKind::UnterminatedString)),
            }
        }
    }

    /// Creates an error at the cursor.
    #[must_use]
    pub fn error(&self, kind: ParseErrorKind) -> ParseError {
        self.error_at(kind, self.position)
    }

    /// Creates an error at a specific column.
    #[must_use]
    pub fn error_at(&self, kind: ParseErrorKind, column: usize) -> ParseError {
        ParseError::new(kind, self.source, column)
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.position;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.position += 1;
        }
        self.position - start
    }
}

/// Returns true if `c` can appear in an identifier after the first character.
fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '?' || c == '!'
}
