//! Per-command compile state.
//!
//! A [`RunContext`] lives for one compile step. Functions read the viewer
//! state and bounds from it, and intern names into its staging copy of
//! the lookup tables. The staged tables are handed to the
//! [`Program`](crate::Program) and only written back when it executes.

use std::cell::OnceCell;
use std::rc::Rc;

use brickfilter_foundation::{EvalErrorKind, Func, Value};
use brickfilter_storage::{Bounds, Brick, BrickSet, Rgb, Tables};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::axis::{AxisRef, EvalResult, resolve_axis};
use crate::functions::{Filter, Transform, bad_type};
use crate::registry::Registry;

/// Inputs to a compile step supplied by the host.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunInputs {
    /// Viewer yaw in degrees, for relative axes.
    pub yaw: f64,
    /// Viewer's active paint color.
    pub paint: Option<Rgb>,
    /// Bounds reported by the host; computed from the bricks when absent.
    pub bounds: Option<Bounds>,
    /// Seed for random filters.
    pub seed: u64,
}

impl RunInputs {
    /// Sets the yaw.
    #[must_use]
    pub const fn with_yaw(mut self, yaw: f64) -> Self {
        self.yaw = yaw;
        self
    }

    /// Sets the paint color.
    #[must_use]
    pub const fn with_paint(mut self, paint: Rgb) -> Self {
        self.paint = Some(paint);
        self
    }

    /// Sets the bounds.
    #[must_use]
    pub const fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Sets the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Compile-time state shared by every function of one command.
pub struct RunContext<'a> {
    registry: &'a Registry,
    bricks: &'a [Brick],
    tables: Tables,
    palette: Rc<[Rgb]>,
    bounds: OnceCell<Option<Bounds>>,
    yaw: f64,
    paint: Option<Rgb>,
    seed: u64,
    streams: u64,
}

impl<'a> RunContext<'a> {
    /// Creates a context over `set`.
    #[must_use]
    pub fn new(registry: &'a Registry, set: &'a BrickSet, inputs: &RunInputs) -> Self {
        let bounds = OnceCell::new();
        if let Some(given) = inputs.bounds {
            let _ = bounds.set(Some(given));
        }
        Self {
            registry,
            bricks: &set.bricks,
            tables: set.tables.clone(),
            palette: set.tables.palette.clone().into(),
            bounds,
            yaw: inputs.yaw,
            paint: inputs.paint,
            seed: inputs.seed,
            streams: 0,
        }
    }

    /// Returns the function registry.
    #[must_use]
    pub const fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Returns the staged lookup tables.
    #[must_use]
    pub const fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Returns the staged lookup tables for interning.
    pub const fn tables_mut(&mut self) -> &mut Tables {
        &mut self.tables
    }

    /// Consumes the context, returning the staged tables.
    #[must_use]
    pub fn into_tables(self) -> Tables {
        self.tables
    }

    /// Returns a shared snapshot of the palette.
    #[must_use]
    pub fn palette(&self) -> Rc<[Rgb]> {
        Rc::clone(&self.palette)
    }

    /// Returns the bounds of the bricks, computing them on first use.
    pub fn bounds(&self) -> Option<Bounds> {
        *self.bounds.get_or_init(|| Bounds::of(self.bricks))
    }

    /// Returns the viewer yaw in degrees.
    #[must_use]
    pub const fn yaw(&self) -> f64 {
        self.yaw
    }

    /// Returns the viewer's paint color.
    #[must_use]
    pub const fn paint(&self) -> Option<Rgb> {
        self.paint
    }

    /// Resolves an axis argument against the viewer's yaw.
    ///
    /// # Errors
    /// Returns `BadValueType` for non-string values, or `UnknownAxis`.
    pub fn axis(&self, value: &Value) -> EvalResult<AxisRef> {
        match value {
            Value::String(name) => resolve_axis(self.yaw, name),
            other => Err(bad_type("axis", other).into()),
        }
    }

    /// Returns a fresh generator. Each call within a run gets its own stream.
    pub fn rng(&mut self) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(self.streams);
        self.streams += 1;
        rng
    }

    // =========================================================================
    // Compilation
    // =========================================================================

    /// Resolves and compiles a filter call.
    ///
    /// # Errors
    /// Returns `UnknownFilter`, or the function's own argument error with
    /// the function name attached.
    pub fn compile_filter(&mut self, func: &Func) -> EvalResult<Filter> {
        let registry = self.registry;
        let factory = registry
            .get(&func.key())
            .and_then(|entry| entry.filter)
            .ok_or_else(|| EvalErrorKind::UnknownFilter(func.name.clone()))?;
        let filter = factory(self, &func.args).map_err(|e| e.in_function(&func.name))?;
        debug!(function = %func.name, args = func.args.len(), "compiled filter");
        Ok(filter)
    }

    /// Resolves and compiles a transform call.
    ///
    /// # Errors
    /// Returns `UnknownTransform`, or the function's own argument error with
    /// the function name attached.
    pub fn compile_transform(&mut self, func: &Func) -> EvalResult<Transform> {
        let registry = self.registry;
        let factory = registry
            .get(&func.key())
            .and_then(|entry| entry.transform)
            .ok_or_else(|| EvalErrorKind::UnknownTransform(func.name.clone()))?;
        let transform = factory(self, &func.args).map_err(|e| e.in_function(&func.name))?;
        debug!(function = %func.name, args = func.args.len(), "compiled transform");
        Ok(transform)
    }
}
