//! Value model and error taxonomy for the brickfilter command language.
//!
//! This crate provides:
//! - [`Value`] - The literal and expression forms a command can contain
//! - [`Func`] - One parsed filter or transform call
//! - [`Range`] - One- or two-sided numeric bounds with per-side inclusivity
//! - [`Error`] - Parse, evaluation, and host errors with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod value;

pub use error::{Error, EvalError, EvalErrorKind, ParseError, ParseErrorKind, Result};
pub use value::{Bound, Func, Range, Value, boolean_word, is_identifier};
