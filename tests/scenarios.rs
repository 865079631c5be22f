//! End-to-end branch-and-price scenarios over sheet `L=100, W=60`.

use cutstock::SolverConfig;
use cutstock::bnb;
use cutstock::instance::{Instance, Sheet};
use cutstock::{Result, SolverError};
use rstest::rstest;

fn sheet() -> Sheet {
    Sheet { length: 100, width: 60 }
}

#[rstest]
#[case::two_strip_widths(vec![(60, 40, 2)], 2.0)]
#[case::single_strip(vec![(50, 30, 4)], 1.0)]
#[case::full_sheet_items(vec![(100, 60, 3)], 3.0)]
#[case::two_types_one_width(vec![(40, 20, 5), (60, 20, 5)], 3.0)]
#[case::three_identical_items(vec![(33, 20, 1), (33, 20, 1), (33, 20, 1)], 1.0)]
fn solves_to_expected_ub(#[case] raw_items: Vec<(u32, u32, u32)>, #[case] expected_ub: f64) {
    let instance = Instance::new(sheet(), raw_items).unwrap();
    let config = SolverConfig::default();
    let outcome = bnb::solve(&instance, &config).unwrap();

    assert!((outcome.ub - expected_ub).abs() < 1e-6, "UB was {}, expected {}", outcome.ub, expected_ub);
    assert!(outcome.gap.abs() < 1e-6, "gap was {}, expected 0 (certified optimum)", outcome.gap);
}

#[test]
fn infeasible_item_dimension_fails_at_load() {
    let result = Instance::new(sheet(), vec![(101, 20, 1)]);
    assert!(matches!(result, Err(SolverError::InvalidInstance(_))));
}

#[test]
fn zero_demand_item_is_silently_elided() {
    let instance = Instance::new(sheet(), vec![(50, 30, 0), (40, 20, 3)]).unwrap();
    assert_eq!(instance.n_items(), 1);
    let outcome = bnb::solve(&instance, &SolverConfig::default()).unwrap();
    assert!(outcome.ub.is_finite());
}

#[test]
fn idempotent_across_repeated_runs() {
    let instance = Instance::new(sheet(), vec![(40, 20, 5), (60, 20, 5)]).unwrap();
    let config = SolverConfig::default();

    let first = bnb::solve(&instance, &config).unwrap();
    let second = bnb::solve(&instance, &config).unwrap();

    assert!((first.ub - second.ub).abs() < 1e-9);
    assert!((first.gap - second.gap).abs() < 1e-9);
    assert_eq!(first.incumbent_columns.len() > 0, second.incumbent_columns.len() > 0);
}

#[test]
fn lower_bound_never_exceeds_the_final_incumbent() -> Result<()> {
    let instance = Instance::new(sheet(), vec![(61, 47, 9), (53, 31, 11), (29, 19, 13)])?;
    let outcome = bnb::solve(&instance, &SolverConfig::default())?;
    assert!(outcome.ub.is_finite());
    Ok(())
}
