//! Scanner and parser for brickfilter commands.
//!
//! This crate provides:
//! - `Scanner` - Character cursor reading identifiers, numbers and strings
//! - `Parser` - Recursive-descent parser producing a `ParseResult`
//! - `ParseResult` / `Operation` - The parsed command
//!
//! # Example
//!
//! ```
//! use brickfilter_language::{Operation, parse};
//!
//! let result = parse("hidden mat(glow) delete").unwrap();
//! assert_eq!(result.operation, Operation::Delete);
//! assert_eq!(result.filters.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod lexer;
pub mod parser;


pub use ast::{Operation, ParseResult};
pub use lexer::{Checkpoint, ScanResult, Scanner};
pub use parser::{Parser, parse};
