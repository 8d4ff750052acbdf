//! Parser for filter commands.
//!
//! The parser is recursive descent directly over the [`Scanner`]. Values
//! dispatch on their first character; an identifier in value position is
//! first tried as a nested call and, when no `(` follows, falls back to a
//! bare word.

use brickfilter_foundation::{Bound, Func, ParseErrorKind, Range, Result, Value, boolean_word};

use crate::ast::{Operation, ParseResult};
use crate::lexer::{ScanResult, Scanner};

/// Parser for one command string.
pub struct Parser<'src> {
    /// Cursor over the command text.
    scanner: Scanner<'src>,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given command.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            scanner: Scanner::new(source),
        }
    }

    /// Parses the whole command.
    ///
    /// # Errors
    /// Returns a [`ParseError`](brickfilter_foundation::ParseError) carrying
    /// the input and the failing column.
    pub fn parse(&mut self) -> ScanResult<ParseResult> {
        let mut result = ParseResult::default();

        self.scanner.skip_whitespace();
        result.apply_to_everything = self
            .take_keyword(|word| word.eq_ignore_ascii_case("all").then_some(()))
            .is_some();

        let mut started = result.apply_to_everything;
        let mut operation = None;
        let mut calls = Vec::new();

        loop {
            let spaced = self.scanner.skip_whitespace();
            if self.scanner.is_at_end() {
                break;
            }
            if started && !spaced {
                return Err(self.scanner.error(ParseErrorKind::ExpectedWhitespace));
            }
            started = true;

            if operation.is_none() {
                if let Some(op) = self.take_operation()? {
                    operation = Some(op);
                    result.filters = std::mem::take(&mut calls);
                    continue;
                }
            }

            calls.push(self.parse_call()?);
        }

        // With no operation keyword every call is a transform.
        result.operation = operation.unwrap_or_default();
        result.transforms = calls;
        Ok(result)
    }

    // =========================================================================
    // Top Level
    // =========================================================================

    /// Consumes a leading keyword if `matcher` accepts it and no argument
    /// list follows. Leaves the cursor untouched otherwise.
    fn take_keyword<T>(&mut self, matcher: impl Fn(&str) -> Option<T>) -> Option<T> {
        let start = self.scanner.checkpoint();
        let word = self.scanner.peek_identifier()?;
        let found = matcher(&word)?;
        self.scanner.scan_identifier().ok()?;

        let after_word = self.scanner.checkpoint();
        let ends_word = self
            .scanner
            .peek()
            .is_none_or(|c| c.is_ascii_whitespace());
        self.scanner.skip_whitespace();
        let has_arguments = self.scanner.peek() == Some('(');
        self.scanner.restore(after_word);

        if ends_word && !has_arguments {
            Some(found)
        } else {
            self.scanner.restore(start);
            None
        }
    }

    /// Consumes an operation keyword, with an optional empty `()` after it.
    fn take_operation(&mut self) -> ScanResult<Option<Operation>> {
        let Some(op) = self
            .scanner
            .peek_identifier()
            .and_then(|word| Operation::from_keyword(&word))
        else {
            return Ok(None);
        };
        self.scanner.scan_identifier()?;

        let after_word = self.scanner.checkpoint();
        self.scanner.skip_whitespace();
        if self.scanner.eat('(') {
            self.scanner.skip_whitespace();
            if !self.scanner.eat(')') {
                return Err(self.scanner.error(ParseErrorKind::OperationArguments));
            }
        } else {
            self.scanner.restore(after_word);
        }
        Ok(Some(op))
    }

    /// Parses a top-level call. The argument list is optional.
    fn parse_call(&mut self) -> ScanResult<Func> {
        if !self.scanner.at_identifier() {
            return Err(self.scanner.error(ParseErrorKind::ExpectedFunction));
        }
        let name = self.scanner.scan_identifier()?;

        let after_name = self.scanner.checkpoint();
        self.scanner.skip_whitespace();
        if self.scanner.eat('(') {
            let args = self.parse_arguments()?;
            return Ok(Func::new(name, args));
        }
        self.scanner.restore(after_name);

        match self.scanner.peek() {
            None => Ok(Func::bare(name)),
            Some(c) if c.is_ascii_whitespace() => Ok(Func::bare(name)),
            Some(_) => Err(self.scanner.error(ParseErrorKind::ExpectedOpenParen)),
        }
    }

    /// Parses `value, value, ...)` after the opening parenthesis.
    fn parse_arguments(&mut self) -> ScanResult<Vec<Value>> {
        let mut args = Vec::new();
        self.scanner.skip_whitespace();
        if self.scanner.eat(')') {
            return Ok(args);
        }

        loop {
            args.push(self.parse_value()?);
            self.scanner.skip_whitespace();
            if self.scanner.eat(',') {
                self.scanner.skip_whitespace();
            } else if self.scanner.eat(')') {
                return Ok(args);
            } else {
                return Err(self
                    .scanner
                    .error(ParseErrorKind::ExpectedCommaOrCloseParen));
            }
        }
    }

    // =========================================================================
    // Values
    // =========================================================================

    fn parse_value(&mut self) -> ScanResult<Value> {
        match self.scanner.peek() {
            Some('<' | '>') => self.parse_range().map(Value::Range),
            Some('\'' | '"') => self.scanner.scan_quoted().map(Value::String),
            Some(_) if self.scanner.at_number() => {
                let (value, units) = self.scanner.scan_number()?;
                Ok(Value::Number(value, units))
            }
            Some(_) if self.scanner.at_identifier() => {
                if let Some(call) = self.try_parse_nested_call()? {
                    return Ok(Value::Function(call));
                }
                let word = self.scanner.scan_identifier()?;
                Ok(boolean_word(&word).map_or(Value::String(word), Value::Bool))
            }
            _ => Err(self.scanner.error(ParseErrorKind::UnknownValue)),
        }
    }

    /// Tries `name(...)` in value position.
    ///
    /// Returns `None` with the cursor restored when no `(` follows the
    /// name. Errors inside the argument list propagate.
    fn try_parse_nested_call(&mut self) -> ScanResult<Option<Func>> {
        let start = self.scanner.checkpoint();
        let name = self.scanner.scan_identifier()?;
        self.scanner.skip_whitespace();
        if !self.scanner.eat('(') {
            self.scanner.restore(start);
            return Ok(None);
        }
        let args = self.parse_arguments()?;
        Ok(Some(Func::new(name, args)))
    }

    /// Parses `<n`, `<=n`, `>n` or `>=n`, with optional units on `n`.
    fn parse_range(&mut self) -> ScanResult<Range> {
        let above = self.scanner.advance() == Some('>');
        let exclusive = !self.scanner.eat('=');
        self.scanner.skip_whitespace();

        if !self.scanner.at_number() {
            return Err(self.scanner.error(ParseErrorKind::ExpectedNumberInRange));
        }
        let column = self.scanner.position();
        let (value, units) = self.scanner.scan_number().map_err(|_| {
            self.scanner
                .error_at(ParseErrorKind::ExpectedNumberInRange, column)
        })?;

        let bound = Bound {
            value,
            exclusive,
            units,
        };
        Ok(if above {
            Range::above(bound)
        } else {
            Range::below(bound)
        })
    }
}

/// Parses a command string.
///
/// # Errors
/// Returns `Error::Parse` if the command is malformed.
pub fn parse(source: &str) -> Result<ParseResult> {
    Ok(Parser::new(source).parse()?)
}
