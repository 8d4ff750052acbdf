//! Error types for the brickfilter system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every kind carries a stable message key for hosts that localise output.

use thiserror::Error;

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for brickfilter operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The command text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A function could not be resolved or compiled.
    #[error(transparent)]
    Eval(#[from] EvalError),

    /// The host had no bricks to hand over.
    #[error("no bricks selected")]
    NoRecordsSelected,

    /// The host's records are not in the expected schema version.
    #[error("unsupported save format version {found} (expected {expected})")]
    UnsupportedFormat {
        /// Version found in the data.
        found: u32,
        /// Version this build understands.
        expected: u32,
    },

    /// The confirmation gate was declined or timed out.
    #[error("command cancelled")]
    Cancelled,

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Encoding or decoding a save failed.
    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl Error {
    /// Returns the machine-readable message key for this error.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Parse(e) => e.kind.key(),
            Self::Eval(e) => e.kind.key(),
            Self::NoRecordsSelected => "no_records_selected",
            Self::UnsupportedFormat { .. } => "unsupported_format",
            Self::Cancelled => "cancelled",
            Self::IoError(_) => "io_error",
            Self::SerializationError(_) => "serialization_error",
        }
    }

    /// Returns the parse error, if this is one.
    #[must_use]
    pub const fn as_parse(&self) -> Option<&ParseError> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the evaluation error, if this is one.
    #[must_use]
    pub const fn as_eval(&self) -> Option<&EvalError> {
        match self {
            Self::Eval(e) => Some(e),
            _ => None,
        }
    }
}

// =============================================================================
// Parse Errors
// =============================================================================

/// A failure while parsing command text.
///
/// Keeps the full input and the column so a caller can draw a caret
/// under the offending character.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind} at column {column}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// The complete command text.
    pub input: String,
    /// 0-based character offset of the failure.
    pub column: usize,
}

impl ParseError {
    /// Creates a parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, input: impl Into<String>, column: usize) -> Self {
        Self {
            kind,
            input: input.into(),
            column,
        }
    }

    /// Renders the input with a caret under the failing column.
    ///
    /// ```text
    /// position(x
    ///           ^ expected ',' or ')'
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        let padding = " ".repeat(self.column);
        format!("{}\n{padding}^ {}", self.input, self.kind)
    }
}

/// Categorized parse error kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A function call was expected at top level.
    #[error("expected a function")]
    ExpectedFunction,
    /// An identifier did not start with a letter.
    #[error("expected an identifier")]
    InvalidIdentifier,
    /// A numeral could not be read.
    #[error("invalid number")]
    InvalidNumber,
    /// Input ended inside a quoted string.
    #[error("unterminated string")]
    UnterminatedString,
    /// A function name was followed by something other than `(`.
    #[error("expected '('")]
    ExpectedOpenParen,
    /// An argument was followed by something other than `,` or `)`.
    #[error("expected ',' or ')'")]
    ExpectedCommaOrCloseParen,
    /// `<`, `>`, `<=` or `>=` was not followed by a number.
    #[error("expected a number in range")]
    ExpectedNumberInRange,
    /// No value form starts with the current character.
    #[error("unknown value")]
    UnknownValue,
    /// Two top-level calls were not separated by whitespace.
    #[error("expected whitespace between functions")]
    ExpectedWhitespace,
    /// An operation keyword was given arguments.
    #[error("operations take no arguments")]
    OperationArguments,
}

impl ParseErrorKind {
    /// Returns the machine-readable message key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ExpectedFunction => "expected_fn",
            Self::InvalidIdentifier => "invalid_identifier",
            Self::InvalidNumber => "invalid_number",
            Self::UnterminatedString => "unterminated_string",
            Self::ExpectedOpenParen => "expected_open_paren",
            Self::ExpectedCommaOrCloseParen => "expected_comma_or_close_paren",
            Self::ExpectedNumberInRange => "expected_number_in_range",
            Self::UnknownValue => "unknown_value",
            Self::ExpectedWhitespace => "expected_whitespace",
            Self::OperationArguments => "operation_arguments",
        }
    }
}

// =============================================================================
// Evaluation Errors
// =============================================================================

/// A failure while resolving or compiling filters and transforms.
#[derive(Clone, Debug, PartialEq, Error)]
pub struct EvalError {
    /// What went wrong.
    pub kind: EvalErrorKind,
    /// The function being compiled when it happened.
    pub function: Option<String>,
}

impl EvalError {
    /// Creates an evaluation error with no function attached.
    #[must_use]
    pub const fn new(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            function: None,
        }
    }

    /// Attaches the function name, keeping the innermost one if already set.
    #[must_use]
    pub fn in_function(mut self, name: &str) -> Self {
        if self.function.is_none() {
            self.function = Some(name.to_string());
        }
        self
    }
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(name) = &self.function {
            write!(f, " (in {name})")?;
        }
        Ok(())
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<EvalErrorKind> for Error {
    fn from(kind: EvalErrorKind) -> Self {
        Self::Eval(EvalError::new(kind))
    }
}

/// Categorized evaluation error kinds.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalErrorKind {
    /// No filter is registered under this name.
    #[error("unknown filter: {0}")]
    UnknownFilter(String),
    /// No transform is registered under this name.
    #[error("unknown transform: {0}")]
    UnknownTransform(String),
    /// The axis name is not absolute or viewer-relative.
    #[error("unknown axis: {0}")]
    UnknownAxis(String),
    /// The unit suffix is not a known unit.
    #[error("unknown units: {0}")]
    UnknownUnits(String),
    /// An argument had the wrong type.
    #[error("bad value type: expected {expected}, got {found}")]
    BadValueType {
        /// Description of the accepted type.
        expected: &'static str,
        /// Type name of the argument given.
        found: &'static str,
    },
    /// A number or range was expected.
    #[error("expected a number or range, got {0}")]
    BadNumberOrRange(&'static str),
    /// A nested function reference was expected.
    #[error("expected a function argument, got {0}")]
    ExpectedFunctionArgument(&'static str),
    /// The material name is not known.
    #[error("unknown material: {0}")]
    UnknownMaterial(String),
    /// Material intensity outside 0 to 10.
    #[error("material intensity must be a whole number from 0 to 10, got {0}")]
    BadIntensity(f64),
    /// The collision flag name is not known.
    #[error("unknown collision flag: {0}")]
    BadCollisionFlag(String),
    /// `color` with no arguments, and the viewer has no paint color.
    #[error("no color specified")]
    NoColorSpecified,
    /// A color component or hex code was malformed.
    #[error("bad color: {0}")]
    BadColor(String),
    /// No owner with this name or id exists.
    #[error("unknown owner: {0}")]
    UnknownOwner(String),
    /// Wrong number of arguments.
    #[error("expected {expected} arguments, got {found}")]
    BadArgCount {
        /// Description of the accepted count.
        expected: &'static str,
        /// Number of arguments given.
        found: usize,
    },
    /// A probability outside (0, 1] or percentage outside (1, 100].
    #[error("chance must be between 0 and 1 or a percentage up to 100, got {0}")]
    BadChance(f64),
}

impl EvalErrorKind {
    /// Returns the machine-readable message key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::UnknownFilter(_) => "unknown_filter",
            Self::UnknownTransform(_) => "unknown_transform",
            Self::UnknownAxis(_) => "unknown_axis",
            Self::UnknownUnits(_) => "unknown_units",
            Self::BadValueType { .. } => "bad_value_type",
            Self::BadNumberOrRange(_) => "bad_number_or_range",
            Self::ExpectedFunctionArgument(_) => "expected_fn_arg",
            Self::UnknownMaterial(_) => "unknown_material",
            Self::BadIntensity(_) => "bad_intensity",
            Self::BadCollisionFlag(_) => "bad_collision_flag",
            Self::NoColorSpecified => "no_color_specified",
            Self::BadColor(_) => "bad_color",
            Self::UnknownOwner(_) => "unknown_owner",
            Self::BadArgCount { .. } => "bad_arg_count",
            Self::BadChance(_) => "bad_chance",
        }
    }
}
