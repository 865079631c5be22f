//! Cross-backend parity: the same instance must solve to the same certified
//! `UB` regardless of which [`PricingMethod`] drives column generation. This
//! is the end-to-end counterpart to `backend_equivalence.rs`'s per-subproblem
//! value check — here the whole branch-and-price tree is rebuilt three times.

use cutstock::SolverConfig;
use cutstock::bnb;
use cutstock::instance::{Instance, Sheet};
use cutstock::pricing::{PricingMethod, arcflow::ArcFlowPricer, dp::DpPricer, knapsack::KnapsackPricer};
use rstest::rstest;
use rstest_reuse::{apply, template};

#[template]
#[rstest]
fn cutstock_instance(
    #[values(
        vec![(60, 40, 2)],
        vec![(50, 30, 4)],
        vec![(40, 20, 5), (60, 20, 5)],
        vec![(33, 20, 1), (33, 20, 1), (33, 20, 1)],
    )]
    raw_items: Vec<(u32, u32, u32)>,
) {
}

#[apply(cutstock_instance)]
fn all_three_pricing_methods_agree_on_ub(raw_items: Vec<(u32, u32, u32)>) {
    let instance = Instance::new(Sheet { length: 100, width: 60 }, raw_items).unwrap();

    let methods = [
        PricingMethod::DynamicProgramming(DpPricer),
        PricingMethod::KnapsackViaOracle(KnapsackPricer),
        PricingMethod::ArcFlow(ArcFlowPricer),
    ];

    let mut ubs = Vec::with_capacity(methods.len());
    for pricing_method in methods {
        let config = SolverConfig { pricing_method, ..SolverConfig::default() };
        let outcome = bnb::solve(&instance, &config).unwrap();
        assert!(outcome.gap.abs() < 1e-6, "expected a certified optimum");
        ubs.push(outcome.ub);
    }

    for &ub in &ubs[1..] {
        assert!((ub - ubs[0]).abs() < 1e-6, "pricing methods disagree on UB: {ubs:?}");
    }
}
