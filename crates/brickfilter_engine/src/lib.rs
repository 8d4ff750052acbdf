//! Function registry, interpreter, and host seam for brickfilter.
//!
//! This crate provides:
//! - [`Registry`] - Case-insensitive catalog of filter and transform factories
//! - [`RunContext`] - Viewer state, bounds, and staged tables for one compile
//! - [`Interpreter`] / [`Program`] - Compilation and the single execution pass
//! - [`WorldHost`] - Collaborators that own the world
//! - [`run`] - One command from text to committed result
//!
//! # Example
//!
//! ```
//! use brickfilter_engine::{Interpreter, Registry, RunInputs};
//! use brickfilter_language::parse;
//! use brickfilter_storage::{Brick, BrickSet};
//!
//! let registry = Registry::builtin();
//! let mut set = BrickSet::new();
//! set.bricks.push(Brick::at([1.0, 0.0, 0.0]));
//! set.bricks.push(Brick::at([-1.0, 0.0, 0.0]));
//!
//! let command = parse("position(x, >0) delete").unwrap();
//! let program = Interpreter::new(&registry)
//!     .compile(&command, &set, &RunInputs::default())
//!     .unwrap();
//! let evaluation = program.execute(&mut set);
//! assert_eq!(evaluation.summary.deleted, 1);
//! assert_eq!(set.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod axis;
pub mod context;
pub mod functions;
pub mod host;
pub mod interpreter;
pub mod registry;
pub mod run;

pub use axis::{AxisRef, EvalResult, Measure, resolve_axis};
pub use context::{RunContext, RunInputs};
pub use functions::{Filter, Transform, TransformOutcome};
pub use host::{Acquired, Scope, Viewer, WorldHost};
pub use interpreter::{Evaluation, Interpreter, Program, Summary};
pub use registry::{FilterFactory, FunctionEntry, Registry, TransformFactory};
pub use run::run;
