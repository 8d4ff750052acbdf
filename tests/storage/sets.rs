//! Integration tests for brick sets and lookup tables
//!
//! Tests table interning, region selection, and appending across tables.

use brickfilter_storage::{Bounds, Brick, BrickColor, BrickSet, Owner, Tables};

fn row(count: u32) -> BrickSet {
    let mut set = BrickSet::new();
    for i in 0..count {
        set.bricks.push(Brick::at([f64::from(i) * 10.0, 0.0, 6.0]));
    }
    set
}

// =============================================================================
// Tables
// =============================================================================

#[test]
fn default_tables() {
    let tables = Tables::default();
    assert_eq!(tables.material_name(0), Some("BMC_Plastic"));
    assert_eq!(tables.asset_name(0), Some("PB_DefaultBrick"));
    assert!(tables.owners.is_empty());
    assert!(tables.palette.is_empty());
}

#[test]
fn interning_is_case_insensitive() {
    let mut tables = Tables::default();
    let glow = tables.intern_material("BMC_Glow");
    assert_eq!(tables.intern_material("bmc_glow"), glow);
    assert_eq!(tables.find_material("BMC_GLOW"), Some(glow));
    assert_eq!(tables.find_material("BMC_Metallic"), None);
}

#[test]
fn owner_references_are_one_based() {
    let mut tables = Tables::default();
    let alice = tables.intern_owner(&Owner::new("76561198000000001", "Alice"));
    assert_eq!(alice, 1);
    assert_eq!(tables.owner(alice).map(|o| o.name.as_str()), Some("Alice"));
    assert!(tables.owner(0).is_none());
    assert_eq!(tables.find_owner("alice"), Some(1));
    assert_eq!(tables.find_owner("76561198000000001"), Some(1));
    assert_eq!(tables.intern_owner(&Owner::new("76561198000000001", "Renamed")), 1);
}

#[test]
fn colors_resolve_through_palette() {
    let mut tables = Tables::default();
    let red = tables.intern_color([255, 0, 0]);
    assert_eq!(tables.intern_color([255, 0, 0]), red);
    assert_eq!(
        tables.resolve_color(BrickColor::Palette(red)),
        Some([255, 0, 0])
    );
    assert_eq!(tables.resolve_color(BrickColor::Rgb([1, 2, 3])), Some([1, 2, 3]));
    assert_eq!(tables.resolve_color(BrickColor::Palette(99)), None);
}

// =============================================================================
// Regions
// =============================================================================

#[test]
fn select_copies_bricks_inside() {
    let set = row(5);
    let region = Bounds::from_corners([-1.0, -1.0, 0.0], [21.0, 1.0, 10.0]);
    let selected = set.select(&region);
    assert_eq!(selected.len(), 3);
    assert_eq!(selected.tables, set.tables);
    assert_eq!(set.len(), 5);
}

#[test]
fn remove_within_keeps_order() {
    let mut set = row(5);
    let region = Bounds::from_corners([5.0, -1.0, 0.0], [25.0, 1.0, 10.0]);
    assert_eq!(set.remove_within(&region), 2);
    let xs: Vec<f64> = set.bricks.iter().map(|b| b.position[0]).collect();
    assert_eq!(xs, vec![0.0, 30.0, 40.0]);
}

#[test]
fn bounds_of_empty_set() {
    assert!(BrickSet::new().bounds().is_none());
    assert!(row(2).bounds().is_some());
}

// =============================================================================
// Appending
// =============================================================================

#[test]
fn append_rewrites_references() {
    let mut target = BrickSet::new();
    target.tables.intern_material("BMC_Metallic");
    target.tables.palette.push([0, 0, 0]);

    let mut source = BrickSet::new();
    let glow = source.tables.intern_material("BMC_Glow");
    let bob = source.tables.intern_owner(&Owner::new("b", "Bob"));
    source.tables.palette.push([9, 9, 9]);
    source.bricks.push(
        Brick::at([0.0; 3])
            .with_material(glow)
            .with_owner(bob)
            .with_color(BrickColor::Palette(0)),
    );

    target.append(source);
    let brick = &target.bricks[0];
    assert_eq!(target.tables.material_name(brick.material), Some("BMC_Glow"));
    assert_eq!(target.tables.owner(brick.owner).map(|o| o.id.as_str()), Some("b"));
    assert_eq!(target.tables.resolve_color(brick.color), Some([9, 9, 9]));
}

#[test]
fn empty_like_shares_tables() {
    let mut set = row(3);
    set.tables.intern_material("BMC_Glow");
    let empty = set.empty_like();
    assert!(empty.is_empty());
    assert_eq!(empty.tables, set.tables);
}
