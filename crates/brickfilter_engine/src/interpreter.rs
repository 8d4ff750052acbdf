//! Compilation and execution of parsed commands.
//!
//! A command runs in two steps:
//! 1. [`Interpreter::compile`] resolves every filter and transform through the
//!    registry and validates their arguments, producing a [`Program`].
//!    Nothing is mutated, so a compile error leaves the bricks as acquired.
//! 2. [`Program::execute`] makes a single stable pass over the bricks.

use brickfilter_foundation::Result;
use brickfilter_language::{Operation, ParseResult};
use brickfilter_storage::{BrickSet, Tables};
use tracing::debug;

use crate::context::{RunContext, RunInputs};
use crate::functions::{Filter, Transform, TransformOutcome};
use crate::registry::Registry;

// =============================================================================
// Summary
// =============================================================================

/// Counts reported after a command.
///
/// `filtered` counts matches that survived the transforms, so the number
/// of bricks that matched the filters is `filtered + deleted`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Bricks considered.
    pub total: usize,
    /// Bricks that matched every filter and survived the transforms.
    pub filtered: usize,
    /// Bricks removed by a transform.
    pub deleted: usize,
    /// Bricks moved out by `copy` or `extract`.
    pub extracted: usize,
}

/// The outcome of executing a program.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// Counts for reporting.
    pub summary: Summary,
    /// Bricks partitioned out by `copy` or `extract`; empty otherwise.
    pub extracted: BrickSet,
}

// =============================================================================
// Interpreter
// =============================================================================

/// Compiles parsed commands against a registry.
#[derive(Clone, Copy, Debug)]
pub struct Interpreter<'r> {
    registry: &'r Registry,
}

impl<'r> Interpreter<'r> {
    /// Creates an interpreter over `registry`.
    #[must_use]
    pub const fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Compiles `command` for the bricks in `set`.
    ///
    /// `delete` is normalized into `replace` with a trailing delete
    /// transform before anything is resolved.
    ///
    /// # Errors
    /// Returns the first evaluation error in declaration order.
    pub fn compile(
        &self,
        command: &ParseResult,
        set: &BrickSet,
        inputs: &RunInputs,
    ) -> Result<Program> {
        let command = command.clone().normalized();
        let mut ctx = RunContext::new(self.registry, set, inputs);

        let filters = command
            .filters
            .iter()
            .map(|func| ctx.compile_filter(func))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let transforms = command
            .transforms
            .iter()
            .map(|func| ctx.compile_transform(func))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(
            operation = %command.operation,
            filters = filters.len(),
            transforms = transforms.len(),
            "compiled command"
        );

        Ok(Program {
            operation: command.operation,
            filters,
            transforms,
            tables: ctx.into_tables(),
        })
    }
}

// =============================================================================
// Program
// =============================================================================

/// A compiled command, ready to run over the bricks it was compiled for.
pub struct Program {
    operation: Operation,
    filters: Vec<Filter>,
    transforms: Vec<Transform>,
    tables: Tables,
}

impl Program {
    /// The operation after normalization.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    /// Number of compiled filters.
    #[must_use]
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Number of compiled transforms.
    #[must_use]
    pub fn transform_count(&self) -> usize {
        self.transforms.len()
    }

    /// Runs the program over `set`.
    ///
    /// Bricks failing a filter are kept untouched. Matching bricks run the
    /// transforms in order until one removes them. With `copy` or `extract`
    /// the surviving matches move into [`Evaluation::extracted`]. Both
    /// outputs keep the original relative order.
    #[must_use]
    pub fn execute(self, set: &mut BrickSet) -> Evaluation {
        let Self {
            operation,
            filters,
            transforms,
            tables,
        } = self;
        set.tables = tables;

        let partition = matches!(operation, Operation::Copy | Operation::Extract);
        let mut summary = Summary {
            total: set.bricks.len(),
            ..Summary::default()
        };
        let mut extracted = set.empty_like();
        let mut kept = Vec::with_capacity(set.bricks.len());

        for mut brick in std::mem::take(&mut set.bricks) {
            if !filters.iter().all(|f| f(&brick)) {
                kept.push(brick);
                continue;
            }
            let removed = transforms
                .iter()
                .any(|t| t(&mut brick) == TransformOutcome::Remove);
            if removed {
                summary.deleted += 1;
            } else if partition {
                summary.filtered += 1;
                summary.extracted += 1;
                extracted.bricks.push(brick);
            } else {
                summary.filtered += 1;
                kept.push(brick);
            }
        }
        set.bricks = kept;

        Evaluation { summary, extracted }
    }
}

impl std::fmt::Debug for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Program")
            .field("operation", &self.operation)
            .field("filters", &self.filters.len())
            .field("transforms", &self.transforms.len())
            .finish_non_exhaustive()
    }
}
