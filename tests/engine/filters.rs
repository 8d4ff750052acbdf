//! Integration tests for filter functions
//!
//! Tests exact and ranged measures, logical combinators, color matching,
//! and seeded chance.

use brickfilter_engine::RunInputs;
use brickfilter_storage::{Bounds, Brick, BrickColor, BrickSet};
use proptest::prelude::*;

use crate::{at, count, eval, eval_with};

// =============================================================================
// Spatial Measures
// =============================================================================

#[test]
fn exact_position_has_no_tolerance() {
    let mut set = at(&[[5.0, 0.0, 0.0], [5.0001, 0.0, 0.0]]);
    let evaluation = eval(&mut set, "position(x, 5) copy").unwrap();
    assert_eq!(evaluation.summary.filtered, 1);
    assert_eq!(evaluation.extracted.bricks[0].position, [5.0, 0.0, 0.0]);
}

#[test]
fn ranges_convert_units() {
    let set = at(&[[0.0, 0.0, 19.0], [0.0, 0.0, 20.0], [0.0, 0.0, 21.0]]);
    assert_eq!(count(&set, "pos(z, >=5pl)"), 2);
    assert_eq!(count(&set, "pos(z, >5pl)"), 1);
    assert_eq!(count(&set, "pos(z, >=5pl, <21)"), 1);
}

#[test]
fn down_axis_is_negated() {
    let set = at(&[[0.0, 0.0, 12.0], [0.0, 0.0, -12.0]]);
    assert_eq!(count(&set, "pos(down, 1br)"), 1);
    assert_eq!(count(&set, "pos(up, 1br)"), 1);
    assert_eq!(count(&set, "pos(down, <0)"), 1);
}

#[test]
fn relative_axes_follow_yaw() {
    let mut set = at(&[[10.0, 0.0, 0.0], [0.0, 10.0, 0.0]]);
    let facing_y = RunInputs::default().with_yaw(90.0);
    let forward = eval_with(&mut set.clone(), "all pos(forward, >0) count", &RunInputs::default())
        .unwrap()
        .summary
        .filtered;
    assert_eq!(forward, 1);
    let turned = eval_with(&mut set, "pos(forward, 10) copy", &facing_y).unwrap();
    assert_eq!(turned.extracted.len(), 1);
}

#[test]
fn size_measures_full_extent() {
    let mut set = BrickSet::new();
    set.bricks.push(Brick::at([0.0; 3]).with_size([5.0, 5.0, 2.0]));
    set.bricks.push(Brick::at([0.0; 3]).with_size([5.0, 5.0, 6.0]));
    assert_eq!(count(&set, "size(z, 1 plate)"), 1);
    assert_eq!(count(&set, "size(z, 1br)"), 1);
    assert_eq!(count(&set, "size(x, 1 stud)"), 2);
}

#[test]
fn center_position_uses_bounds() {
    let set = at(&[[0.0, 0.0, 6.0], [20.0, 0.0, 6.0], [40.0, 0.0, 6.0]]);
    assert_eq!(count(&set, "cpos(x, 0)"), 1);
    assert_eq!(count(&set, "cpos(x, <0)"), 1);

    let mut shifted = set.clone();
    let region = Bounds::from_corners([0.0; 3], [80.0, 10.0, 10.0]);
    let evaluation = eval_with(
        &mut shifted,
        "cpos(x, 0) copy",
        &RunInputs::default().with_bounds(region),
    )
    .unwrap();
    assert_eq!(evaluation.extracted.bricks[0].position[0], 40.0);
}

// =============================================================================
// Logic
// =============================================================================

fn mixed(glow: &[bool], hidden: &[bool]) -> BrickSet {
    let mut set = BrickSet::new();
    let glow_index = set.tables.intern_material("BMC_Glow");
    let metal_index = set.tables.intern_material("BMC_Metallic");
    for (i, (&g, &h)) in glow.iter().zip(hidden).enumerate() {
        let material = match (g, i % 2) {
            (true, _) => glow_index,
            (false, 0) => metal_index,
            (false, _) => 0,
        };
        set.bricks
            .push(Brick::at([0.0; 3]).with_material(material).with_visible(!h));
    }
    set
}

proptest! {
    #[test]
    fn not_is_the_complement(glow in prop::collection::vec(any::<bool>(), 0..24)) {
        let hidden = vec![false; glow.len()];
        let set = mixed(&glow, &hidden);
        let lit = count(&set, "mat(glow)");
        prop_assert_eq!(lit, glow.iter().filter(|g| **g).count());
        prop_assert_eq!(count(&set, "not(mat(glow))"), set.len() - lit);
    }

    #[test]
    fn or_and_follow_their_truth_tables(
        flags in prop::collection::vec((any::<bool>(), any::<bool>()), 0..24)
    ) {
        let (glow, hidden): (Vec<bool>, Vec<bool>) = flags.iter().copied().unzip();
        let set = mixed(&glow, &hidden);
        let either = flags.iter().filter(|(g, h)| *g || *h).count();
        let both = flags.iter().filter(|(g, h)| *g && *h).count();
        prop_assert_eq!(count(&set, "or(mat(glow), hidden)"), either);
        prop_assert_eq!(count(&set, "and(mat(glow), hidden)"), both);
        prop_assert_eq!(count(&set, "mat(glow) hidden"), both);
    }

    #[test]
    fn painted_bricks_match_their_color(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let mut set = at(&[[0.0; 3], [10.0, 0.0, 0.0]]);
        set.tables.palette.push([1, 1, 1]);
        set.bricks[1].color = BrickColor::Palette(0);
        eval(&mut set, &format!("all replace color({r}, {g}, {b})")).unwrap();
        prop_assert_eq!(count(&set, &format!("color({r}, {g}, {b})")), 2);
    }
}

#[test]
fn or_matches_either_material() {
    let set = mixed(&[true, false, false, false], &[false; 4]);
    assert_eq!(count(&set, "or(mat(glow), mat(metallic))"), 2);
    assert_eq!(count(&set, "or(mat(metallic), mat(glow))"), 2);
}

#[test]
fn nested_filters_compile_eagerly() {
    let mut set = mixed(&[true], &[false]);
    let err = eval(&mut set, "or(mat(glow), mat(lava)) count").unwrap_err();
    assert_eq!(err.key(), "unknown_material");
    let err = eval(&mut set, "and() count").unwrap_err();
    assert_eq!(err.key(), "bad_arg_count");
}

// =============================================================================
// Intensity
// =============================================================================

#[test]
fn intensity_ranges() {
    let mut set = BrickSet::new();
    set.bricks = (0..=10).map(|i| Brick::default().with_intensity(i)).collect();
    assert_eq!(count(&set, "intensity(4)"), 1);
    assert_eq!(count(&set, "intensity(>=8)"), 3);
    assert_eq!(count(&set, "materialintensity(<2)"), 2);
}

#[test]
fn intensity_rejects_units_and_out_of_range_bounds() {
    let mut set = at(&[[0.0; 3]]);
    for command in [
        "intensity(2bogus) count",
        "intensity(>=2bogus) count",
        "intensity(<3 br) count",
        "all replace intensity(5 pl)",
    ] {
        let err = eval(&mut set, command).unwrap_err();
        assert_eq!(err.key(), "unknown_units", "{command}");
    }
    for command in ["intensity(>11) count", "intensity(<=-1) count"] {
        let err = eval(&mut set, command).unwrap_err();
        assert_eq!(err.key(), "bad_intensity", "{command}");
    }
}

// =============================================================================
// Chance
// =============================================================================

#[test]
fn chance_is_seeded() {
    let set = at(&[[0.0; 3]; 200]);
    let run = |seed: u64| {
        let mut scratch = set.clone();
        eval_with(
            &mut scratch,
            "chance(50) copy",
            &RunInputs::default().with_seed(seed),
        )
        .unwrap()
        .summary
        .filtered
    };
    assert_eq!(run(3), run(3));
    let hits = run(3);
    assert!(hits > 50 && hits < 150, "{hits}");
    assert_eq!(count(&set, "chance(1)"), 200);
    assert_eq!(count(&set, "chance(100)"), 200);
}

#[test]
fn chance_rejects_out_of_range() {
    let mut set = at(&[[0.0; 3]]);
    for p in ["0", "-1", "101"] {
        let err = eval(&mut set, &format!("chance({p}) count")).unwrap_err();
        assert_eq!(err.key(), "bad_chance", "{p}");
    }
}
