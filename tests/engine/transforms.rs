//! Integration tests for transform functions
//!
//! Tests movement, resizing, field setters, and deletion.

use brickfilter_engine::RunInputs;
use brickfilter_storage::{BrickColor, Collision, Owner};
use proptest::prelude::*;

use crate::{at, eval, eval_with};

// =============================================================================
// Movement
// =============================================================================

#[test]
fn translate_by_units() {
    let mut set = at(&[[0.0, 0.0, 6.0]]);
    eval(&mut set, "all replace translate(up, 2br) translate(x, 1.4)").unwrap();
    assert_eq!(set.bricks[0].position, [1.0, 0.0, 30.0]);

    eval(&mut set, "all replace translate(down, 1 plate)").unwrap();
    assert_eq!(set.bricks[0].position[2], 26.0);
}

#[test]
fn translate_relative_to_viewer() {
    let mut set = at(&[[0.0; 3]]);
    eval(&mut set, "all replace translate(left, 10)").unwrap();
    assert_eq!(set.bricks[0].position, [0.0, -10.0, 0.0]);

    let facing_y = RunInputs::default().with_yaw(90.0);
    eval_with(&mut set, "all replace translate(forward, 10)", &facing_y).unwrap();
    assert_eq!(set.bricks[0].position, [0.0, 0.0, 0.0]);
}

// =============================================================================
// Resizing
// =============================================================================

#[test]
fn resize_keeps_trailing_edge() {
    let mut set = at(&[[0.0, 0.0, 6.0]]);
    eval(&mut set, "all replace resize(z, 1br)").unwrap();
    let brick = &set.bricks[0];
    assert_eq!(brick.size[2], 12.0);
    assert_eq!(brick.position[2], 12.0);
    assert_eq!(brick.min_corner()[2], 0.0);
}

#[test]
fn shrinking_keeps_leading_edge() {
    let mut set = at(&[[0.0, 0.0, 6.0]]);
    eval(&mut set, "all replace resize(z, -1 plate)").unwrap();
    let brick = &set.bricks[0];
    assert_eq!(brick.size[2], 4.0);
    assert_eq!(brick.max_corner()[2], 12.0);
}

#[test]
fn centered_resize_stays_put() {
    let mut set = at(&[[0.0, 0.0, 6.0]]);
    eval(&mut set, "all replace resize(z, 4, on)").unwrap();
    assert_eq!(set.bricks[0].size[2], 8.0);
    assert_eq!(set.bricks[0].position[2], 6.0);
}

#[test]
fn resize_to_full_extent() {
    let mut set = at(&[[0.0, 0.0, 6.0]]);
    eval(&mut set, "all replace resizeto(z, 4 plates)").unwrap();
    assert_eq!(set.bricks[0].size[2], 8.0);
    assert_eq!(set.bricks[0].min_corner()[2], 0.0);
}

#[test]
fn shrinking_to_nothing_deletes() {
    let mut set = at(&[[0.0, 0.0, 6.0], [0.0, 0.0, 30.0]]);
    set.bricks[1].size[2] = 18.0;
    let evaluation = eval(&mut set, "all replace resize(z, -1br)").unwrap();
    assert_eq!(evaluation.summary.deleted, 1);
    assert_eq!(evaluation.summary.filtered, 1);
    assert_eq!(set.len(), 1);
    assert_eq!(set.bricks[0].size[2], 12.0);
}

proptest! {
    #[test]
    fn deleted_plus_filtered_is_matched(
        bricks in prop::collection::vec((-5i32..5, 1u8..12), 0..32)
    ) {
        let mut set = at(&[]);
        for (x, half) in &bricks {
            let mut brick = brickfilter_storage::Brick::at([f64::from(*x), 0.0, 0.0]);
            brick.size[2] = f64::from(*half);
            set.bricks.push(brick);
        }
        let matched = bricks.iter().filter(|(x, _)| *x > 0).count();
        let shrunk_away = bricks.iter().filter(|(x, h)| *x > 0 && *h <= 6).count();

        let evaluation = eval(&mut set, "pos(x, >0) replace resize(z, -12)").unwrap();
        prop_assert_eq!(evaluation.summary.filtered + evaluation.summary.deleted, matched);
        prop_assert_eq!(evaluation.summary.deleted, shrunk_away);
        prop_assert_eq!(set.len(), bricks.len() - shrunk_away);
    }
}

// =============================================================================
// Field Setters
// =============================================================================

#[test]
fn material_is_interned_into_tables() {
    let mut set = at(&[[0.0; 3]]);
    assert!(set.tables.find_material("BMC_Glow").is_none());
    eval(&mut set, "all replace mat(glow) intensity(7)").unwrap();
    let brick = &set.bricks[0];
    assert_eq!(set.tables.material_name(brick.material), Some("BMC_Glow"));
    assert_eq!(brick.material_intensity, 7);
}

#[test]
fn owner_visibility_and_collision() {
    let mut set = at(&[[0.0; 3]]);
    set.tables.intern_owner(&Owner::new("42", "Builder"));
    eval(
        &mut set,
        "all replace owner(builder) hidden collision(player, off)",
    )
    .unwrap();
    let brick = &set.bricks[0];
    assert_eq!(brick.owner, 1);
    assert!(!brick.visible);
    assert_eq!(
        brick.collision,
        Collision {
            player: false,
            ..Collision::all(true)
        }
    );

    eval(&mut set, "all replace owner(public) visible collision(off)").unwrap();
    assert_eq!(set.bricks[0].owner, 0);
    assert!(set.bricks[0].visible);
    assert_eq!(set.bricks[0].collision, Collision::all(false));
}

#[test]
fn color_uses_viewer_paint() {
    let mut set = at(&[[0.0; 3]]);
    let err = eval(&mut set, "all replace color").unwrap_err();
    assert_eq!(err.key(), "no_color_specified");

    let paint = RunInputs::default().with_paint([9, 8, 7]);
    eval_with(&mut set, "all replace paint", &paint).unwrap();
    assert_eq!(set.bricks[0].color, BrickColor::Rgb([9, 8, 7]));
}

#[test]
fn delete_stops_later_transforms() {
    let mut set = at(&[[0.0; 3], [10.0, 0.0, 0.0]]);
    let evaluation = eval(&mut set, "pos(x, 0) replace delete translate(x, 5)").unwrap();
    assert_eq!(evaluation.summary.deleted, 1);
    assert_eq!(set.len(), 1);
    assert_eq!(set.bricks[0].position[0], 10.0);
}

#[test]
fn filter_only_functions_are_not_transforms() {
    let mut set = at(&[[0.0; 3]]);
    for command in ["all replace cpos(x, 0)", "all replace sparkle", "all replace chance(50)"] {
        let err = eval(&mut set, command).unwrap_err();
        assert_eq!(err.key(), "unknown_transform", "{command}");
    }
    let err = eval(&mut set, "kill count").unwrap_err();
    assert_eq!(err.key(), "unknown_filter");
}
