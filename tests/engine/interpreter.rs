//! Integration tests for the interpreter
//!
//! Tests summaries, partitioning, ordering, and compile failures.

use brickfilter_engine::{Interpreter, Registry, RunInputs};
use brickfilter_language::{Operation, parse};
use brickfilter_storage::{Brick, BrickSet};
use proptest::prelude::*;

use crate::{at, eval};

// =============================================================================
// Summaries
// =============================================================================

#[test]
fn delete_counts_out_of_filtered() {
    let mut set = at(&[[1.0, 0.0, 0.0], [-1.0, 0.0, 0.0]]);
    let evaluation = eval(&mut set, "position(x, >0) delete").unwrap();
    assert_eq!(evaluation.summary.total, 2);
    assert_eq!(evaluation.summary.filtered, 0);
    assert_eq!(evaluation.summary.deleted, 1);
    assert_eq!(set.bricks, vec![Brick::at([-1.0, 0.0, 0.0])]);
}

#[test]
fn count_everything_changes_nothing() {
    let mut set = at(&[[0.0; 3]; 10]);
    let before = set.clone();
    let evaluation = eval(&mut set, "all count").unwrap();
    assert_eq!(evaluation.summary.total, 10);
    assert_eq!(evaluation.summary.filtered, 10);
    assert_eq!(evaluation.summary.deleted, 0);
    assert!(evaluation.extracted.is_empty());
    assert_eq!(set, before);
}

#[test]
fn delete_with_parens_keeps_unmatched() {
    let mut set = BrickSet::new();
    set.bricks = vec![
        Brick::at([0.0; 3]),
        Brick::at([1.0, 0.0, 0.0]).with_visible(false),
    ];
    let evaluation = eval(&mut set, "hidden delete()").unwrap();
    assert_eq!(evaluation.summary.total, 2);
    assert_eq!(evaluation.summary.deleted, 1);
    assert_eq!(set.bricks, vec![Brick::at([0.0; 3])]);
}

#[test]
fn empty_set_is_fine() {
    let mut set = BrickSet::new();
    let evaluation = eval(&mut set, "all hidden delete").unwrap();
    assert_eq!(evaluation.summary.total, 0);
    assert_eq!(evaluation.summary.deleted, 0);
}

// =============================================================================
// Programs
// =============================================================================

#[test]
fn delete_compiles_as_replace() {
    let registry = Registry::builtin();
    let set = at(&[[0.0; 3]]);
    let command = parse("hidden pos(x, 0) delete").unwrap();
    let program = Interpreter::new(&registry)
        .compile(&command, &set, &RunInputs::default())
        .unwrap();
    assert_eq!(program.operation(), Operation::Replace);
    assert_eq!(program.filter_count(), 2);
    assert_eq!(program.transform_count(), 1);
}

#[test]
fn compile_errors_name_the_function() {
    let registry = Registry::builtin();
    let set = at(&[[0.0; 3]]);
    let command = parse("all not(mat(lava)) count").unwrap();
    let err = Interpreter::new(&registry)
        .compile(&command, &set, &RunInputs::default())
        .unwrap_err();
    let eval_error = err.as_eval().unwrap();
    assert_eq!(eval_error.function.as_deref(), Some("mat"));
    assert!(err.to_string().contains("lava"));
}

#[test]
fn failed_compile_leaves_set_alone() {
    let mut set = at(&[[0.0; 3], [1.0, 0.0, 0.0]]);
    let before = set.clone();
    assert!(eval(&mut set, "all replace mat(glow) translate(sideways, 1)").is_err());
    assert_eq!(set, before);
}

// =============================================================================
// Partitioning
// =============================================================================

#[test]
fn copy_moves_transformed_matches_out() {
    let mut set = at(&[[0.0; 3], [10.0, 0.0, 0.0], [20.0, 0.0, 0.0]]);
    let evaluation = eval(&mut set, "pos(x, >5) copy translate(up, 1br)").unwrap();
    assert_eq!(evaluation.summary.filtered, 2);
    assert_eq!(evaluation.summary.extracted, 2);
    assert_eq!(set.len(), 1);
    assert!(evaluation.extracted.bricks.iter().all(|b| b.position[2] == 12.0));
}

#[test]
fn extracted_set_shares_updated_tables() {
    let mut set = at(&[[0.0; 3]]);
    let evaluation = eval(&mut set, "all extract mat(glow)").unwrap();
    let brick = &evaluation.extracted.bricks[0];
    assert_eq!(
        evaluation.extracted.tables.material_name(brick.material),
        Some("BMC_Glow")
    );
    assert_eq!(evaluation.extracted.tables, set.tables);
}

proptest! {
    #[test]
    fn extract_partitions_in_order(hidden in prop::collection::vec(any::<bool>(), 0..40)) {
        let mut set = BrickSet::new();
        for (i, h) in hidden.iter().enumerate() {
            let x = f64::from(u32::try_from(i).unwrap());
            set.bricks.push(Brick::at([x, 0.0, 0.0]).with_visible(!h));
        }
        let evaluation = eval(&mut set, "hidden extract").unwrap();

        let xs = |bricks: &[Brick]| bricks.iter().map(|b| b.position[0]).collect::<Vec<_>>();
        let expected_out: Vec<f64> = (0..hidden.len())
            .filter(|i| hidden[*i])
            .map(|i| f64::from(u32::try_from(i).unwrap()))
            .collect();
        let expected_kept: Vec<f64> = (0..hidden.len())
            .filter(|i| !hidden[*i])
            .map(|i| f64::from(u32::try_from(i).unwrap()))
            .collect();

        prop_assert_eq!(xs(&evaluation.extracted.bricks), expected_out);
        prop_assert_eq!(xs(&set.bricks), expected_kept);
        prop_assert_eq!(evaluation.summary.extracted + set.len(), hidden.len());
    }
}
