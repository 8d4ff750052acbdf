//! Field functions.
//!
//! A [`BrickField`] resolves its arguments to a target value once, then
//! serves both as a filter (does the brick's field equal the target?) and
//! as a transform (overwrite the field with the target). The comparison
//! defaults to equality; color and collision override it.

use brickfilter_foundation::{Bound, EvalErrorKind, Value};
use brickfilter_storage::{Brick, BrickColor, Collision, Rgb, Tables};

use super::{
    Filter, Transform, TransformOutcome, arg_bool, arg_number, arg_text, bad_type, expect_args,
};
use crate::axis::{EvalResult, Measure};
use crate::context::RunContext;

/// A brick field usable as both filter and transform.
pub trait BrickField: 'static {
    /// The resolved argument value.
    type Target: PartialEq + 'static;

    /// Validates arguments and resolves the target value.
    ///
    /// # Errors
    /// Returns an evaluation error for bad arguments.
    fn resolve(ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<Self::Target>;

    /// Reads the field.
    fn get(brick: &Brick) -> Self::Target;

    /// Writes the field.
    fn set(brick: &mut Brick, target: &Self::Target);

    /// Compares the field against the target.
    fn matches(brick: &Brick, target: &Self::Target, _palette: &[Rgb]) -> bool {
        Self::get(brick) == *target
    }
}

/// Compiles the filter form of a field.
///
/// # Errors
/// Returns the field's argument errors.
pub fn field_filter<F: BrickField>(ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<Filter> {
    let target = F::resolve(ctx, args)?;
    let palette = ctx.palette();
    Ok(Box::new(move |brick| F::matches(brick, &target, &palette)))
}

/// Compiles the transform form of a field.
///
/// # Errors
/// Returns the field's argument errors.
pub fn field_transform<F: BrickField>(
    ctx: &mut RunContext<'_>,
    args: &[Value],
) -> EvalResult<Transform> {
    let target = F::resolve(ctx, args)?;
    Ok(Box::new(move |brick| {
        F::set(brick, &target);
        TransformOutcome::Keep
    }))
}

// =============================================================================
// Visibility
// =============================================================================

/// `visible([bool])`: defaults to true.
pub struct VisibleField;

impl BrickField for VisibleField {
    type Target = bool;

    fn resolve(_ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<bool> {
        expect_args(args, 0, 1, "0 or 1")?;
        args.first().map_or(Ok(true), arg_bool)
    }

    fn get(brick: &Brick) -> bool {
        brick.visible
    }

    fn set(brick: &mut Brick, target: &bool) {
        brick.visible = *target;
    }
}

/// `hidden`: visibility false.
pub struct HiddenField;

impl BrickField for HiddenField {
    type Target = bool;

    fn resolve(_ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<bool> {
        expect_args(args, 0, 0, "0")?;
        Ok(false)
    }

    fn get(brick: &Brick) -> bool {
        brick.visible
    }

    fn set(brick: &mut Brick, target: &bool) {
        brick.visible = *target;
    }
}

// =============================================================================
// Color
// =============================================================================

/// `color()`, `color(r, g, b)`, `color(index)` or `color("#rrggbb")`.
///
/// Always resolves to a direct RGB value; palette colors on bricks are
/// looked up before comparing.
pub struct ColorField;

impl BrickField for ColorField {
    type Target = BrickColor;

    fn resolve(ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<BrickColor> {
        let rgb = match args {
            [] => ctx.paint().ok_or(EvalErrorKind::NoColorSpecified)?,
            [Value::Number(index, _)] => palette_entry(ctx.tables(), *index)?,
            [Value::String(code)] => {
                parse_hex(code).ok_or_else(|| EvalErrorKind::BadColor(code.clone()))?
            }
            [other] => return Err(bad_type("color", other).into()),
            [r, g, b] => [component(r)?, component(g)?, component(b)?],
            _ => {
                return Err(EvalErrorKind::BadArgCount {
                    expected: "0, 1 or 3",
                    found: args.len(),
                }
                .into());
            }
        };
        Ok(BrickColor::Rgb(rgb))
    }

    fn get(brick: &Brick) -> BrickColor {
        brick.color
    }

    fn set(brick: &mut Brick, target: &BrickColor) {
        brick.color = *target;
    }

    fn matches(brick: &Brick, target: &BrickColor, palette: &[Rgb]) -> bool {
        match (to_rgb(brick.color, palette), to_rgb(*target, palette)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

fn to_rgb(color: BrickColor, palette: &[Rgb]) -> Option<Rgb> {
    match color {
        BrickColor::Rgb(rgb) => Some(rgb),
        BrickColor::Palette(index) => palette.get(index).copied(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn component(value: &Value) -> EvalResult<u8> {
    let n = arg_number(value)?;
    if n.fract() == 0.0 && (0.0..=255.0).contains(&n) {
        Ok(n as u8)
    } else {
        Err(EvalErrorKind::BadColor(n.to_string()).into())
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn palette_entry(tables: &Tables, index: f64) -> EvalResult<Rgb> {
    let valid = index.fract() == 0.0 && index >= 0.0;
    valid
        .then(|| tables.palette.get(index as usize).copied())
        .flatten()
        .ok_or_else(|| EvalErrorKind::BadColor(format!("palette index {index}")).into())
}

/// Parses `#rgb` or `#rrggbb`, with or without the `#`.
fn parse_hex(code: &str) -> Option<Rgb> {
    let digits = code.strip_prefix('#').unwrap_or(code);
    if !digits.is_ascii() {
        return None;
    }
    match digits.len() {
        6 => Some([
            u8::from_str_radix(&digits[0..2], 16).ok()?,
            u8::from_str_radix(&digits[2..4], 16).ok()?,
            u8::from_str_radix(&digits[4..6], 16).ok()?,
        ]),
        3 => {
            let mut rgb = [0; 3];
            for (i, slot) in rgb.iter_mut().enumerate() {
                *slot = u8::from_str_radix(&digits[i..=i], 16).ok()? * 17;
            }
            Some(rgb)
        }
        _ => None,
    }
}

// =============================================================================
// Material
// =============================================================================

/// Materials that can be named even when absent from the table.
pub const BUILTIN_MATERIALS: [&str; 7] = [
    "BMC_Plastic",
    "BMC_Glow",
    "BMC_Metallic",
    "BMC_Hologram",
    "BMC_Ghost",
    "BMC_Ghost_Fail",
    "BMC_Glass",
];

/// `material(name)`: compares or sets the material index.
///
/// Names match case-insensitively, with or without the `BMC_` prefix and
/// underscores. A builtin name missing from the table is interned.
pub struct MaterialField;

impl BrickField for MaterialField {
    type Target = usize;

    fn resolve(ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<usize> {
        expect_args(args, 1, 1, "1")?;
        let name = arg_text(&args[0])?;
        resolve_material(ctx.tables_mut(), name)
    }

    fn get(brick: &Brick) -> usize {
        brick.material
    }

    fn set(brick: &mut Brick, target: &usize) {
        brick.material = *target;
    }
}

fn material_key(name: &str) -> String {
    let lower = name.to_lowercase();
    let bare = lower.strip_prefix("bmc_").unwrap_or(lower.as_str());
    bare.replace('_', "")
}

/// Finds a material index by name, interning builtin materials.
///
/// # Errors
/// Returns `UnknownMaterial` if the name is neither builtin nor in the table.
pub fn resolve_material(tables: &mut Tables, name: &str) -> EvalResult<usize> {
    let key = material_key(name);
    if let Some(index) = tables.materials.iter().position(|m| material_key(m) == key) {
        return Ok(index);
    }
    BUILTIN_MATERIALS
        .iter()
        .find(|m| material_key(m) == key)
        .map(|m| tables.intern_material(m))
        .ok_or_else(|| EvalErrorKind::UnknownMaterial(name.to_string()).into())
}

// =============================================================================
// Material Intensity
// =============================================================================

/// `materialintensity(n)`: sets intensity, 0 to 10.
pub struct IntensityField;

impl BrickField for IntensityField {
    type Target = u8;

    fn resolve(_ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<u8> {
        expect_args(args, 1, 1, "1")?;
        match &args[0] {
            Value::Number(n, units) => intensity(unitless(*n, units.as_deref())?),
            other => intensity(arg_number(other)?),
        }
    }

    fn get(brick: &Brick) -> u8 {
        brick.material_intensity
    }

    fn set(brick: &mut Brick, target: &u8) {
        brick.material_intensity = *target;
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn intensity(n: f64) -> EvalResult<u8> {
    if n.fract() == 0.0 && (0.0..=10.0).contains(&n) {
        Ok(n as u8)
    } else {
        Err(EvalErrorKind::BadIntensity(n).into())
    }
}

/// Intensity is a plain count, so any unit suffix is unknown.
fn unitless(n: f64, units: Option<&str>) -> EvalResult<f64> {
    match units {
        Some(units) if !units.is_empty() => {
            Err(EvalErrorKind::UnknownUnits(units.to_string()).into())
        }
        _ => Ok(n),
    }
}

/// `materialintensity(n | range)` as a filter.
///
/// # Errors
/// Returns `BadIntensity` for a value or bound outside 0 to 10,
/// `UnknownUnits` for any suffix, or `BadNumberOrRange`.
pub fn intensity_filter(_ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<Filter> {
    expect_args(args, 1, 1, "1")?;
    let measure = match &args[0] {
        Value::Number(n, units) => {
            Measure::Exact(f64::from(intensity(unitless(*n, units.as_deref())?)?))
        }
        Value::Range(range) => Measure::Within(range.try_map_bounds(|bound| -> EvalResult<Bound> {
            let value = unitless(bound.value, bound.units.as_deref())?;
            if !(0.0..=10.0).contains(&value) {
                return Err(EvalErrorKind::BadIntensity(value).into());
            }
            Ok(bound.clone())
        })?),
        other => return Err(EvalErrorKind::BadNumberOrRange(other.type_name()).into()),
    };
    Ok(Box::new(move |brick| {
        measure.matches(f64::from(brick.material_intensity))
    }))
}

// =============================================================================
// Collision
// =============================================================================

/// Which collision channels to compare or set, and their values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionSetting {
    /// Channels covered; `true` marks a channel as included.
    pub channels: Collision,
    /// Values for the covered channels.
    pub value: Collision,
}

fn as_array(c: Collision) -> [bool; 4] {
    [c.player, c.weapon, c.interaction, c.tool]
}

/// `collision(bool)` or `collision(flag, bool)`.
///
/// Flags are `player`, `weapon`, `interaction`, `tool` and `all`.
pub struct CollisionField;

impl BrickField for CollisionField {
    type Target = CollisionSetting;

    fn resolve(_ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<CollisionSetting> {
        let (flag, enabled) = match args {
            [enabled] => ("all", arg_bool(enabled)?),
            [flag, enabled] => (arg_text(flag)?, arg_bool(enabled)?),
            _ => {
                return Err(EvalErrorKind::BadArgCount {
                    expected: "1 or 2",
                    found: args.len(),
                }
                .into());
            }
        };
        let mut channels = Collision::all(false);
        match flag.to_lowercase().as_str() {
            "all" => channels = Collision::all(true),
            "player" | "players" => channels.player = true,
            "weapon" | "weapons" => channels.weapon = true,
            "interaction" | "interact" => channels.interaction = true,
            "tool" | "tools" => channels.tool = true,
            _ => return Err(EvalErrorKind::BadCollisionFlag(flag.to_string()).into()),
        }
        Ok(CollisionSetting {
            channels,
            value: Collision::all(enabled),
        })
    }

    fn get(brick: &Brick) -> CollisionSetting {
        CollisionSetting {
            channels: Collision::all(true),
            value: brick.collision,
        }
    }

    fn set(brick: &mut Brick, target: &CollisionSetting) {
        let covered = as_array(target.channels);
        let value = as_array(target.value);
        let mut current = as_array(brick.collision);
        for i in 0..4 {
            if covered[i] {
                current[i] = value[i];
            }
        }
        let [player, weapon, interaction, tool] = current;
        brick.collision = Collision {
            player,
            weapon,
            interaction,
            tool,
        };
    }

    fn matches(brick: &Brick, target: &CollisionSetting, _palette: &[Rgb]) -> bool {
        let covered = as_array(target.channels);
        let value = as_array(target.value);
        let current = as_array(brick.collision);
        (0..4).all(|i| !covered[i] || current[i] == value[i])
    }
}

// =============================================================================
// Owner and Asset
// =============================================================================

/// `owner(name)`: `public`, or an owner's name or id.
pub struct OwnerField;

impl BrickField for OwnerField {
    type Target = usize;

    fn resolve(ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<usize> {
        expect_args(args, 1, 1, "1")?;
        // Numeric ids parse as numbers
        let name = match &args[0] {
            Value::Number(n, None) if n.fract() == 0.0 => format!("{n:.0}"),
            other => arg_text(other)?.to_string(),
        };
        if name.eq_ignore_ascii_case("public") {
            return Ok(0);
        }
        ctx.tables()
            .find_owner(&name)
            .ok_or_else(|| EvalErrorKind::UnknownOwner(name).into())
    }

    fn get(brick: &Brick) -> usize {
        brick.owner
    }

    fn set(brick: &mut Brick, target: &usize) {
        brick.owner = *target;
    }
}

/// `asset(name)` as a filter. Matches `name` or `PB_Default<name>`.
///
/// # Errors
/// Returns `BadArgCount` or `BadValueType`.
pub fn asset_filter(ctx: &mut RunContext<'_>, args: &[Value]) -> EvalResult<Filter> {
    expect_args(args, 1, 1, "1")?;
    let name = arg_text(&args[0])?;
    let prefixed = format!("PB_Default{name}");
    let assets: Vec<usize> = ctx
        .tables()
        .assets
        .iter()
        .enumerate()
        .filter(|(_, a)| a.eq_ignore_ascii_case(name) || a.eq_ignore_ascii_case(&prefixed))
        .map(|(i, _)| i)
        .collect();
    Ok(Box::new(move |brick| assets.contains(&brick.asset)))
}
