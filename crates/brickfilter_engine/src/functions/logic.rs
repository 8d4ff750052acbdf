//! Filter combinators.
//!
//! Arguments are nested filter calls, or bare names for calls with no
//! arguments. Every nested filter is compiled up front so argument errors
//! surface before any brick is visited; evaluation short-circuits.

use brickfilter_foundation::Value;

use super::{Filter, arg_function, expect_args};
use crate::axis::EvalResult;
use crate::context::RunContext;

fn compile_nested(ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<Vec<Filter>> {
    expect_args(args, 1, usize::MAX, "at least 1")?;
    args.iter()
        .map(|arg| {
            let func = arg_function(arg)?;
            ctx.compile_filter(&func)
        })
        .collect()
}

/// `not(f, ...)`: none of the nested filters match.
///
/// # Errors
/// Returns `BadArgCount`, `ExpectedFunctionArgument`, or any nested
/// compile error.
pub fn not_filter(ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<Filter> {
    let nested = compile_nested(ctx, args)?;
    Ok(Box::new(move |brick| !nested.iter().any(|f| f(brick))))
}

/// `or(f, ...)`: any nested filter matches.
///
/// # Errors
/// Same as [`not_filter`].
pub fn or_filter(ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<Filter> {
    let nested = compile_nested(ctx, args)?;
    Ok(Box::new(move |brick| nested.iter().any(|f| f(brick))))
}

/// `and(f, ...)`: every nested filter matches.
///
/// # Errors
/// Same as [`not_filter`].
pub fn and_filter(ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<Filter> {
    let nested = compile_nested(ctx, args)?;
    Ok(Box::new(move |brick| nested.iter().all(|f| f(brick))))
}
