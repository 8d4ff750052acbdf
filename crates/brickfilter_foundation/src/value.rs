//! Values produced by parsing a command.
//!
//! A [`Value`] is immutable once parsed. Numbers and range bounds keep the
//! unit suffix exactly as written; unit validity is decided later, when a
//! function resolves its arguments.

use std::fmt;

/// A literal or nested call appearing as a function argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// `true`/`false`, also written `on`/`off` or `yes`/`no`.
    Bool(bool),
    /// A number with an optional, unvalidated unit suffix (`5`, `2 studs`, `3pl`).
    Number(f64, Option<String>),
    /// A bare word or quoted string.
    String(String),
    /// A comparison bound such as `>=5pl` or `<0`.
    Range(Range),
    /// A nested call such as `mat(glow)`.
    Function(Func),
}

impl Value {
    /// Returns a short name for this value's type, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Number(..) => "number",
            Self::String(_) => "string",
            Self::Range(_) => "range",
            Self::Function(_) => "function",
        }
    }

    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract a number, ignoring its unit suffix.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n, _) => Some(*n),
            _ => None,
        }
    }

    /// Returns the unit suffix of a number, if any.
    #[must_use]
    pub fn units(&self) -> Option<&str> {
        match self {
            Self::Number(_, units) => units.as_deref(),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a range reference.
    #[must_use]
    pub const fn as_range(&self) -> Option<&Range> {
        match self {
            Self::Range(r) => Some(r),
            _ => None,
        }
    }

    /// Attempts to extract a nested function call.
    #[must_use]
    pub const fn as_function(&self) -> Option<&Func> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }
}

// =============================================================================
// Ranges
// =============================================================================

/// One side of a [`Range`].
#[derive(Clone, Debug, PartialEq)]
pub struct Bound {
    /// The limit value.
    pub value: f64,
    /// Whether the limit itself is excluded (`<`/`>` rather than `<=`/`>=`).
    pub exclusive: bool,
    /// Unit suffix as written, if any.
    pub units: Option<String>,
}

impl Bound {
    /// Creates an inclusive bound with no units.
    #[must_use]
    pub const fn inclusive(value: f64) -> Self {
        Self {
            value,
            exclusive: false,
            units: None,
        }
    }

    /// Creates an exclusive bound with no units.
    #[must_use]
    pub const fn exclusive(value: f64) -> Self {
        Self {
            value,
            exclusive: true,
            units: None,
        }
    }

    /// Sets the unit suffix.
    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }
}

/// A numeric range with at least one bound.
///
/// The fields are private so a range with neither bound cannot be built.
#[derive(Clone, Debug, PartialEq)]
pub struct Range {
    min: Option<Bound>,
    max: Option<Bound>,
}

impl Range {
    /// Creates a range, or `None` when both bounds are missing.
    #[must_use]
    pub fn new(min: Option<Bound>, max: Option<Bound>) -> Option<Self> {
        if min.is_none() && max.is_none() {
            None
        } else {
            Some(Self { min, max })
        }
    }

    /// Creates a range with only a lower bound (`>5`, `>=5`).
    #[must_use]
    pub const fn above(min: Bound) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Creates a range with only an upper bound (`<5`, `<=5`).
    #[must_use]
    pub const fn below(max: Bound) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Returns the lower bound.
    #[must_use]
    pub const fn min(&self) -> Option<&Bound> {
        self.min.as_ref()
    }

    /// Returns the upper bound.
    #[must_use]
    pub const fn max(&self) -> Option<&Bound> {
        self.max.as_ref()
    }

    /// Returns true if `value` lies within this range.
    ///
    /// A value fails when it is beyond a bound, or sits exactly on an
    /// exclusive one.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn contains(&self, value: f64) -> bool {
        let above_min = self
            .min
            .as_ref()
            .is_none_or(|b| value > b.value || (!b.exclusive && value == b.value));
        let below_max = self
            .max
            .as_ref()
            .is_none_or(|b| value < b.value || (!b.exclusive && value == b.value));
        above_min && below_max
    }

    /// Rewrites each bound independently, keeping inclusivity.
    ///
    /// # Errors
    /// Returns the first error produced by `f`.
    pub fn try_map_bounds<E>(
        &self,
        mut f: impl FnMut(&Bound) -> std::result::Result<Bound, E>,
    ) -> std::result::Result<Self, E> {
        let min = self.min.as_ref().map(&mut f).transpose()?;
        let max = self.max.as_ref().map(&mut f).transpose()?;
        Ok(Self { min, max })
    }
}

// =============================================================================
// Function Calls
// =============================================================================

/// One parsed filter or transform call.
#[derive(Clone, Debug, PartialEq)]
pub struct Func {
    /// Function name as written. Lookups lower-case it.
    pub name: String,
    /// Arguments in source order.
    pub args: Vec<Value>,
}

impl Func {
    /// Creates a call with the given arguments.
    #[must_use]
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Creates a call with no arguments.
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Returns the lookup key for this call's name.
    #[must_use]
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

// =============================================================================
// Words
// =============================================================================

/// Maps a boolean keyword to its value, case-insensitively.
#[must_use]
pub fn boolean_word(word: &str) -> Option<bool> {
    match word.to_lowercase().as_str() {
        "on" | "yes" | "true" => Some(true),
        "off" | "no" | "false" => Some(false),
        _ => None,
    }
}

/// Returns true if `text` has the shape of an identifier.
///
/// The first character is alphabetic; the rest are alphanumeric, `?` or `!`.
#[must_use]
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(char::is_alphabetic)
        && chars.all(|c| c.is_alphanumeric() || c == '?' || c == '!')
}

// =============================================================================
// Display
// =============================================================================

fn write_number(f: &mut fmt::Formatter<'_>, n: f64, units: Option<&str>) -> fmt::Result {
    write!(f, "{n}")?;
    if let Some(units) = units {
        write!(f, "{units}")?;
    }
    Ok(())
}

fn write_bound(f: &mut fmt::Formatter<'_>, op: char, bound: &Bound) -> fmt::Result {
    write!(f, "{op}")?;
    if !bound.exclusive {
        write!(f, "=")?;
    }
    write_number(f, bound.value, bound.units.as_deref())
}

impl fmt::Display for Range {
    /// Renders `>=5pl`, `<0`, or both sides separated by a space.
    ///
    /// Only one-sided ranges can be parsed back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(min) = &self.min {
            write_bound(f, '>', min)?;
            if self.max.is_some() {
                write!(f, " ")?;
            }
        }
        if let Some(max) = &self.max {
            write_bound(f, '<', max)?;
        }
        Ok(())
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n, units) => write_number(f, *n, units.as_deref()),
            Self::String(s) if is_identifier(s) && boolean_word(s).is_none() => write!(f, "{s}"),
            Self::String(s) => {
                write!(f, "\"")?;
                for c in s.chars() {
                    if c == '"' || c == '\\' {
                        write!(f, "\\")?;
                    }
                    write!(f, "{c}")?;
                }
                write!(f, "\"")
            }
            Self::Range(r) => write!(f, "{r}"),
            Self::Function(func) => write!(f, "{func}"),
        }
    }
}
