//! Integration tests for bricks and bounds
//!
//! Tests brick defaults, builders, extents, and region bounds.

use brickfilter_storage::{Bounds, Brick, BrickColor, Collision};

// =============================================================================
// Brick Defaults
// =============================================================================

#[test]
fn default_brick_is_visible_white_plastic() {
    let brick = Brick::at([1.0, 2.0, 3.0]);
    assert_eq!(brick.position, [1.0, 2.0, 3.0]);
    assert_eq!(brick.size, [5.0, 5.0, 6.0]);
    assert_eq!(brick.material, 0);
    assert_eq!(brick.owner, 0);
    assert_eq!(brick.color, BrickColor::Rgb([255, 255, 255]));
    assert!(brick.visible);
    assert_eq!(brick.collision, Collision::all(true));
}

#[test]
fn builders_set_fields() {
    let brick = Brick::at([0.0; 3])
        .with_size([10.0, 10.0, 2.0])
        .with_material(2)
        .with_intensity(9)
        .with_owner(1)
        .with_asset(3)
        .with_visible(false)
        .with_color(BrickColor::Palette(4))
        .with_collision(Collision {
            weapon: false,
            ..Collision::all(true)
        });
    assert_eq!(brick.size, [10.0, 10.0, 2.0]);
    assert_eq!(brick.material_intensity, 9);
    assert_eq!(brick.asset, 3);
    assert!(!brick.visible);
    assert!(!brick.collision.weapon);
    assert!(brick.collision.player);
}

#[test]
fn extent_is_position_plus_minus_half_size() {
    let brick = Brick::at([10.0, 0.0, 6.0]);
    assert_eq!(brick.min_corner(), [5.0, -5.0, 0.0]);
    assert_eq!(brick.max_corner(), [15.0, 5.0, 12.0]);
}

// =============================================================================
// Bounds
// =============================================================================

#[test]
fn corners_in_any_order() {
    let bounds = Bounds::from_corners([10.0, -4.0, 8.0], [-10.0, 4.0, 0.0]);
    assert_eq!(bounds.min, [-10.0, -4.0, 0.0]);
    assert_eq!(bounds.max, [10.0, 4.0, 8.0]);
    assert_eq!(bounds.center(), [0.0, 0.0, 4.0]);
}

#[test]
fn bounds_cover_every_extent() {
    let bricks = [Brick::at([0.0, 0.0, 6.0]), Brick::at([40.0, 10.0, 18.0])];
    let bounds = Bounds::of(&bricks).unwrap();
    assert_eq!(bounds.min, [-5.0, -5.0, 0.0]);
    assert_eq!(bounds.max, [45.0, 15.0, 24.0]);
    assert!(Bounds::of(&[]).is_none());
}

#[test]
fn containment_includes_boundary() {
    let bounds = Bounds::from_corners([0.0; 3], [10.0; 3]);
    assert!(bounds.contains([10.0, 0.0, 5.0]));
    assert!(!bounds.contains([10.1, 0.0, 5.0]));
}
