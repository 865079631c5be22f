//! Knapsack-via-LP-oracle pricing backend: the single capacity constraint is
//! handed to the same [`LpOracle`] the RMP uses, and integrality is recovered
//! by a small dedicated branch-and-bound over the (at most one) fractional
//! variable the LP relaxation of a single-row knapsack ever leaves — rather
//! than a second knapsack DP, this backend genuinely delegates the relaxation
//! to the oracle on every node of its own tiny search tree.

use serde::{Deserialize, Serialize};

use super::{Pricer, PricingResult};
use crate::config::DEFAULT_EPS;
use crate::instance::{Instance, StripType};
use crate::oracle::{Column, LpOracle, simplex::SimplexOracle};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KnapsackPricer;

impl Pricer for KnapsackPricer {
    fn solve_sp1(&self, instance: &Instance, pi: &[f64]) -> PricingResult {
        let sizes: Vec<f64> = instance.strips.iter().map(|s| s.width as f64).collect();
        solve_single_constraint_knapsack(instance.sheet.width as f64, &sizes, pi)
    }

    fn solve_sp2(&self, instance: &Instance, strip: &StripType, beta: &[f64]) -> PricingResult {
        let sizes: Vec<f64> = instance.items.iter().map(|i| i.length as f64).collect();
        let profits: Vec<f64> = instance
            .items
            .iter()
            .zip(beta.iter())
            .map(|(item, &b)| if item.width <= strip.width { b } else { 0.0 })
            .collect();
        solve_single_constraint_knapsack(instance.sheet.length as f64, &sizes, &profits)
    }
}

/// `maximize sum profit_k * x_k s.t. sum size_k * x_k <= capacity, x_k in Z_{>=0}`,
/// expressed to the oracle as the single `>=` row `-sum size_k * x_k >= -capacity`
/// minimizing `-profit` (the oracle only knows `>=` rows and minimization).
fn solve_single_constraint_knapsack(capacity: f64, sizes: &[f64], profits: &[f64]) -> PricingResult {
    let n = sizes.len();
    let base_columns = |bounds: &[(f64, f64)]| -> Vec<Column> {
        (0..n)
            .map(|k| {
                let (lb, ub) = bounds[k];
                Column::new(vec![(0, -sizes[k])], -profits[k]).with_bounds(lb, ub)
            })
            .collect()
    };

    let mut stack: Vec<Vec<(f64, f64)>> = vec![vec![(0.0, f64::INFINITY); n]];
    let mut best_value = 0.0_f64;
    let mut best_pattern = vec![0u32; n];
    let mut guard = 0usize;

    while let Some(bounds) = stack.pop() {
        guard += 1;
        if guard > 10_000 {
            break;
        }

        let columns = base_columns(&bounds);
        let Ok(mut oracle) = SimplexOracle::build(vec![-capacity], columns) else {
            continue;
        };
        if oracle.solve().is_err() {
            continue;
        }
        let relaxed_value = -oracle.objective();
        if relaxed_value <= best_value + DEFAULT_EPS {
            continue;
        }

        let values: Vec<f64> = (0..n).map(|k| oracle.primal(k)).collect();
        let fractional = values.iter().position(|v| (v - v.round()).abs() > DEFAULT_EPS);

        match fractional {
            None => {
                let pattern: Vec<u32> = values.iter().map(|v| v.round() as u32).collect();
                if relaxed_value > best_value {
                    best_value = relaxed_value;
                    best_pattern = pattern;
                }
            }
            Some(k) => {
                let v = values[k];
                let mut down = bounds.clone();
                down[k].1 = v.floor();
                let mut up = bounds.clone();
                up[k].0 = v.ceil();
                stack.push(down);
                stack.push(up);
            }
        }
    }

    PricingResult {
        value: best_value,
        pattern: best_pattern,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{Instance, Sheet};

    #[test]
    fn sp1_matches_dp_backend_on_optimum_value() {
        let instance = Instance::new(
            Sheet { length: 100, width: 60 },
            vec![(40, 20, 5), (60, 20, 5)],
        )
        .unwrap();
        let pi = vec![1.0];
        let via_oracle = KnapsackPricer.solve_sp1(&instance, &pi);
        let via_dp = super::super::dp::DpPricer.solve_sp1(&instance, &pi);
        assert!((via_oracle.value - via_dp.value).abs() < 1e-6);
    }
}
