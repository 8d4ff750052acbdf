//! Position, size, and movement functions.
//!
//! Every function here takes an axis name first. Lengths carry units and
//! are converted to base units when compiled.

use brickfilter_foundation::Value;
use brickfilter_storage::Brick;

use super::{Filter, Transform, TransformOutcome, arg_bool, arg_distance, expect_args};
use crate::axis::{AxisRef, EvalResult, Measure};
use crate::context::RunContext;

/// Reads the axis and the number-or-range measures after it.
fn axis_and_measures(
    ctx: &RunContext<'_>,
    args: &[Value],
) -> EvalResult<(AxisRef, Vec<Measure>)> {
    expect_args(args, 2, usize::MAX, "at least 2")?;
    let axis = ctx.axis(&args[0])?;
    let measures = args[1..]
        .iter()
        .map(Measure::from_value)
        .collect::<EvalResult<Vec<_>>>()?;
    Ok((axis, measures))
}

/// `position(axis, n | range, ...)`: the signed position satisfies every measure.
///
/// # Errors
/// Returns `BadArgCount`, axis errors, or `BadNumberOrRange`.
pub fn position_filter(ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<Filter> {
    let (axis, measures) = axis_and_measures(ctx, args)?;
    Ok(Box::new(move |brick| {
        let value = axis.read(brick.position);
        measures.iter().all(|m| m.matches(value))
    }))
}

/// `size(axis, n | range, ...)`: the full extent along the axis satisfies
/// every measure.
///
/// # Errors
/// Returns `BadArgCount`, axis errors, or `BadNumberOrRange`.
pub fn size_filter(ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<Filter> {
    let (axis, measures) = axis_and_measures(ctx, args)?;
    Ok(Box::new(move |brick| {
        let extent = 2.0 * brick.size[axis.index];
        measures.iter().all(|m| m.matches(extent))
    }))
}

/// `centerposition(axis, n | range, ...)`: position relative to the center
/// of the bounds.
///
/// # Errors
/// Returns `BadArgCount`, axis errors, or `BadNumberOrRange`.
pub fn center_filter(ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<Filter> {
    let (axis, measures) = axis_and_measures(ctx, args)?;
    let center = ctx.bounds().map_or(0.0, |b| b.center()[axis.index]);
    Ok(Box::new(move |brick| {
        let value = axis.signed(brick.position[axis.index] - center);
        measures.iter().all(|m| m.matches(value))
    }))
}

// =============================================================================
// Transforms
// =============================================================================

/// `translate(axis, distance)`.
///
/// # Errors
/// Returns `BadArgCount`, axis errors, or `BadValueType`.
pub fn translate_transform(ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<Transform> {
    expect_args(args, 2, 2, "2")?;
    let axis = ctx.axis(&args[0])?;
    let offset = axis.signed(arg_distance(&args[1])?);
    Ok(Box::new(move |brick| {
        brick.position[axis.index] += offset;
        TransformOutcome::Keep
    }))
}

/// `resize(axis, delta, [centered])`.
///
/// # Errors
/// Returns `BadArgCount`, axis errors, or `BadValueType`.
pub fn resize_transform(ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<Transform> {
    let (axis, delta, centered) = resize_args(ctx, args)?;
    Ok(Box::new(move |brick| {
        apply_resize(brick, axis, delta, centered)
    }))
}

/// `resizeto(axis, extent, [centered])`: resizes to a full extent.
///
/// # Errors
/// Returns `BadArgCount`, axis errors, or `BadValueType`.
pub fn resize_to_transform(ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<Transform> {
    let (axis, extent, centered) = resize_args(ctx, args)?;
    Ok(Box::new(move |brick| {
        let delta = extent - 2.0 * brick.size[axis.index];
        apply_resize(brick, axis, delta, centered)
    }))
}

fn resize_args(ctx: &RunContext<'_>, args: &[Value]) -> EvalResult<(AxisRef, f64, bool)> {
    expect_args(args, 2, 3, "2 or 3")?;
    let axis = ctx.axis(&args[0])?;
    let amount = arg_distance(&args[1])?;
    let centered = args.get(2).map_or(Ok(false), arg_bool)?;
    Ok((axis, amount, centered))
}

/// Grows a brick by `delta` along an axis.
///
/// Half the delta is added to the half-extent. Unless `centered`, the
/// brick also moves by that half so the trailing edge stays put; a
/// negative delta anchors the leading edge instead. A brick whose
/// half-extent reaches zero is removed.
///
/// The half rounds away from zero, so `3` and `-3` both change the
/// half-extent by 2.
pub fn apply_resize(brick: &mut Brick, axis: AxisRef, delta: f64, centered: bool) -> TransformOutcome {
    let half = (delta / 2.0).round();
    let direction = if delta >= 0.0 { axis } else { axis.flipped() };
    brick.size[axis.index] += half;
    if !centered {
        brick.position[axis.index] += direction.signed(half);
    }
    if brick.size[axis.index] <= 0.0 {
        TransformOutcome::Remove
    } else {
        TransformOutcome::Keep
    }
}
