//! Axis names and unit conversion.
//!
//! Axes are absolute (`x`, `y`, `z`, `up`, `down`) or relative to the
//! viewer's yaw (`forward`, `backward`, `left`, `right`). Lengths are
//! converted to base units: a stud is 10, a brick 12, a plate 4 and a
//! micro 2.

use brickfilter_foundation::{Bound, EvalError, EvalErrorKind, Range, Value};

/// Result type for compile-time argument resolution.
pub type EvalResult<T> = std::result::Result<T, EvalError>;

/// A resolved axis: the coordinate index and the direction along it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisRef {
    /// 0 for x, 1 for y, 2 for z.
    pub index: usize,
    /// `1` or `-1`.
    pub sign: i8,
}

impl AxisRef {
    /// Creates an axis reference.
    #[must_use]
    pub const fn new(index: usize, sign: i8) -> Self {
        Self { index, sign }
    }

    /// Reads a coordinate along this axis, signed by its direction.
    #[must_use]
    pub fn read(self, point: [f64; 3]) -> f64 {
        point[self.index] * f64::from(self.sign)
    }

    /// Scales a distance by this axis's direction.
    #[must_use]
    pub fn signed(self, distance: f64) -> f64 {
        distance * f64::from(self.sign)
    }

    /// The same axis pointing the other way.
    #[must_use]
    pub const fn flipped(self) -> Self {
        Self::new(self.index, -self.sign)
    }
}

/// Horizontal directions, indexed by yaw quadrant.
const FORWARD: [AxisRef; 4] = [
    AxisRef::new(0, -1),
    AxisRef::new(1, -1),
    AxisRef::new(0, 1),
    AxisRef::new(1, 1),
];

/// Returns the yaw quadrant a viewer faces, 0 to 3.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn quadrant(yaw: f64) -> usize {
    let bucket = ((yaw + 225.0).rem_euclid(360.0) / 90.0).floor();
    (bucket as usize) % 4
}

/// Resolves an axis name for a viewer facing `yaw` degrees.
///
/// # Errors
/// Returns `UnknownAxis` for unrecognised names.
pub fn resolve_axis(yaw: f64, name: &str) -> EvalResult<AxisRef> {
    let turn = match name.to_lowercase().as_str() {
        "x" => return Ok(AxisRef::new(0, 1)),
        "y" => return Ok(AxisRef::new(1, 1)),
        "z" | "up" | "top" => return Ok(AxisRef::new(2, 1)),
        "down" | "bottom" => return Ok(AxisRef::new(2, -1)),
        "forward" | "front" => 0,
        "right" => 1,
        "backward" | "back" => 2,
        "left" => 3,
        _ => return Err(EvalErrorKind::UnknownAxis(name.to_string()).into()),
    };
    Ok(FORWARD[(quadrant(yaw) + turn) % 4])
}

// =============================================================================
// Units
// =============================================================================

/// Returns the base-unit multiplier for a unit suffix.
///
/// # Errors
/// Returns `UnknownUnits` for unrecognised suffixes.
pub fn unit_scale(units: Option<&str>) -> EvalResult<f64> {
    let Some(units) = units else {
        return Ok(1.0);
    };
    match units.to_lowercase().as_str() {
        "" => Ok(1.0),
        "bricks" | "brick" | "br" | "b" => Ok(12.0),
        "studs" | "stud" | "st" | "s" => Ok(10.0),
        "plates" | "plate" | "pl" => Ok(4.0),
        "micros" | "micro" | "m" => Ok(2.0),
        _ => Err(EvalErrorKind::UnknownUnits(units.to_string()).into()),
    }
}

/// Converts a number with a unit suffix to base units.
///
/// # Errors
/// Returns `UnknownUnits` for unrecognised suffixes.
pub fn convert_units(value: f64, units: Option<&str>) -> EvalResult<f64> {
    Ok(value * unit_scale(units)?)
}

/// Converts each bound of a range to base units.
///
/// # Errors
/// Returns `UnknownUnits` if either bound has an unrecognised suffix.
pub fn convert_range(range: &Range) -> EvalResult<Range> {
    range.try_map_bounds(|bound| {
        Ok(Bound {
            value: convert_units(bound.value, bound.units.as_deref())?,
            exclusive: bound.exclusive,
            units: None,
        })
    })
}

/// A converted number-or-range argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Measure {
    /// Matches exactly this value.
    Exact(f64),
    /// Matches values inside the range.
    Within(Range),
}

impl Measure {
    /// Converts a number or range argument to base units.
    ///
    /// # Errors
    /// Returns `BadNumberOrRange` for other value types, or `UnknownUnits`.
    pub fn from_value(value: &Value) -> EvalResult<Self> {
        match value {
            Value::Number(n, units) => Ok(Self::Exact(convert_units(*n, units.as_deref())?)),
            Value::Range(range) => Ok(Self::Within(convert_range(range)?)),
            other => Err(EvalErrorKind::BadNumberOrRange(other.type_name()).into()),
        }
    }

    /// Returns true if `value` satisfies this measure.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn matches(&self, value: f64) -> bool {
        match self {
            Self::Exact(n) => value == *n,
            Self::Within(range) => range.contains(value),
        }
    }
}
