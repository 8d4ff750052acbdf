//! `chance` and `delete`.

use std::cell::RefCell;

use brickfilter_foundation::{EvalErrorKind, Value};
use rand::Rng;

use super::{Filter, Transform, TransformOutcome, arg_number, expect_args};
use crate::axis::EvalResult;
use crate::context::RunContext;

/// Reads a probability: `(0, 1]` as given, `(1, 100]` as a percentage.
pub fn probability(p: f64) -> EvalResult<f64> {
    if p > 0.0 && p <= 1.0 {
        Ok(p)
    } else if p > 1.0 && p <= 100.0 {
        Ok(p / 100.0)
    } else {
        Err(EvalErrorKind::BadChance(p).into())
    }
}

/// `chance(p)`: matches each brick independently with probability `p`.
///
/// The generator is seeded from the run, so the same seed selects the same
/// bricks.
///
/// # Errors
/// Returns `BadArgCount`, `BadValueType`, or `BadChance`.
pub fn chance_filter(ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<Filter> {
    expect_args(args, 1, 1, "1")?;
    let p = probability(arg_number(&args[0])?)?;
    let rng = RefCell::new(ctx.rng());
    Ok(Box::new(move |_| rng.borrow_mut().gen_bool(p)))
}

/// `delete()`: removes the brick.
///
/// # Errors
/// Returns `BadArgCount` if given arguments.
pub fn delete_transform(_ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<Transform> {
    expect_args(args, 0, 0, "0")?;
    Ok(Box::new(|_| TransformOutcome::Remove))
}
