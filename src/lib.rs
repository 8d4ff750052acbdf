//! Brickfilter - Filter and transform language for brick records
//!
//! This crate re-exports all layers of the Brickfilter system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: brickfilter_runtime    - REPL, CLI, local host, save files
//! Layer 3: brickfilter_engine     - Function registry, interpreter, run pipeline
//! Layer 2: brickfilter_language   - Lexer, parser, normalization
//! Layer 1: brickfilter_storage    - Bricks, lookup tables, bounds
//! Layer 0: brickfilter_foundation - Core types (Value, Range, Error)
//! ```

pub use brickfilter_engine as engine;
pub use brickfilter_foundation as foundation;
pub use brickfilter_language as language;
pub use brickfilter_runtime as runtime;
pub use brickfilter_storage as storage;
