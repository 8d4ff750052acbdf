//! Builtin filter and transform implementations.
//!
//! This module contains every builtin organized by category:
//! - `fields`: Field functions producing both a filter and a transform
//! - `spatial`: Position, size, and movement functions
//! - `logic`: `not`, `or`, `and`
//! - `misc`: `chance` and `delete`
//!
//! Each function validates its arguments when compiled and returns a
//! closure that only reads or writes one brick.

pub mod fields;
pub mod logic;
pub mod misc;
pub mod spatial;

use brickfilter_foundation::{EvalErrorKind, Func, Value};
use brickfilter_storage::Brick;

use crate::axis::{EvalResult, convert_units};

/// A compiled predicate over one brick.
pub type Filter = Box<dyn Fn(&Brick) -> bool>;

/// A compiled mutator over one brick.
pub type Transform = Box<dyn Fn(&mut Brick) -> TransformOutcome>;

/// What a transform asks the interpreter to do with the brick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformOutcome {
    /// Keep the brick, possibly mutated.
    Keep,
    /// Remove the brick; later transforms are skipped.
    Remove,
}

// =============================================================================
// Argument Helpers
// =============================================================================

/// Fails unless `args.len()` lies in `min..=max`.
pub(crate) fn expect_args(
    args: &[Value],
    min: usize,
    max: usize,
    expected: &'static str,
) -> EvalResult<()> {
    if (min..=max).contains(&args.len()) {
        Ok(())
    } else {
        Err(EvalErrorKind::BadArgCount {
            expected,
            found: args.len(),
        }
        .into())
    }
}

pub(crate) fn bad_type(expected: &'static str, found: &Value) -> EvalErrorKind {
    EvalErrorKind::BadValueType {
        expected,
        found: found.type_name(),
    }
}

pub(crate) fn arg_bool(value: &Value) -> EvalResult<bool> {
    value.as_bool().ok_or_else(|| bad_type("boolean", value).into())
}

/// Reads a number, ignoring any unit suffix.
pub(crate) fn arg_number(value: &Value) -> EvalResult<f64> {
    value.as_number().ok_or_else(|| bad_type("number", value).into())
}

pub(crate) fn arg_text(value: &Value) -> EvalResult<&str> {
    value.as_str().ok_or_else(|| bad_type("string", value).into())
}

/// Reads a length in base units, rounded to a whole unit (halves away
/// from zero).
pub(crate) fn arg_distance(value: &Value) -> EvalResult<f64> {
    match value {
        Value::Number(n, units) => Ok(convert_units(*n, units.as_deref())?.round()),
        other => Err(bad_type("number", other).into()),
    }
}

/// Reads a nested function reference: a call, or a bare name.
pub(crate) fn arg_function(value: &Value) -> EvalResult<Func> {
    match value {
        Value::Function(func) => Ok(func.clone()),
        Value::String(name) => Ok(Func::bare(name.clone())),
        other => Err(EvalErrorKind::ExpectedFunctionArgument(other.type_name()).into()),
    }
}
