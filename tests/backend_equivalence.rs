//! For identical duals, all three pricing backends must return the same
//! SP1/SP2 optimum value.

use cutstock::instance::{Instance, Sheet};
use cutstock::pricing::arcflow::ArcFlowPricer;
use cutstock::pricing::dp::DpPricer;
use cutstock::pricing::knapsack::KnapsackPricer;
use cutstock::pricing::Pricer;

fn instance() -> Instance {
    Instance::new(
        Sheet { length: 100, width: 60 },
        vec![(40, 20, 5), (60, 30, 5), (25, 15, 3)],
    )
    .unwrap()
}

#[test]
fn sp1_agrees_across_all_three_backends() {
    let instance = instance();
    let pi = vec![1.3, 0.7, 2.0];

    let dp = DpPricer.solve_sp1(&instance, &pi);
    let knapsack = KnapsackPricer.solve_sp1(&instance, &pi);
    let arcflow = ArcFlowPricer.solve_sp1(&instance, &pi);

    assert!((dp.value - knapsack.value).abs() < 1e-6, "dp={}, knapsack={}", dp.value, knapsack.value);
    assert!((dp.value - arcflow.value).abs() < 1e-6, "dp={}, arcflow={}", dp.value, arcflow.value);
}

#[test]
fn sp2_agrees_across_all_three_backends_for_every_strip_type() {
    let instance = instance();
    let beta = vec![0.5, 1.2, 0.9];

    for strip in &instance.strips {
        let dp = DpPricer.solve_sp2(&instance, strip, &beta);
        let knapsack = KnapsackPricer.solve_sp2(&instance, strip, &beta);
        let arcflow = ArcFlowPricer.solve_sp2(&instance, strip, &beta);

        assert!(
            (dp.value - knapsack.value).abs() < 1e-6,
            "strip {}: dp={}, knapsack={}",
            strip.index,
            dp.value,
            knapsack.value
        );
        assert!(
            (dp.value - arcflow.value).abs() < 1e-6,
            "strip {}: dp={}, arcflow={}",
            strip.index,
            dp.value,
            arcflow.value
        );
    }
}
