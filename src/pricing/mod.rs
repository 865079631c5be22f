//! C4: the two pricing subproblems (SP1, SP2) and the three interchangeable
//! backends that solve them. The source switches on an integer method code;
//! here `PricingMethod` is a closed, tagged-variant enum dispatched through
//! `enum_dispatch`, each variant forwarding to a zero-sized backend struct
//! implementing the uniform [`Pricer`] trait.

pub mod arcflow;
pub mod dp;
pub mod knapsack;

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use crate::instance::{Instance, StripType};

/// Result of one SP1 or SP2 solve: the subproblem's optimum value and the
/// winning pattern, expressed as per-type multiplicities indexed the same way
/// the caller indexed its `sizes`/`profits` slices.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingResult {
    pub value: f64,
    pub pattern: Vec<u32>,
}

/// Uniform capability every pricing backend provides.
#[enum_dispatch]
pub trait Pricer {
    /// SP1: maximize `sum_j pi_j * g_j` s.t. `sum_j w_j * g_j <= W`.
    fn solve_sp1(&self, instance: &Instance, pi: &[f64]) -> PricingResult;

    /// SP2 for strip type `t`: maximize `sum_i beta_i * d_i` s.t.
    /// `sum_i l_i * d_i <= L` over items fitting in `t`.
    fn solve_sp2(&self, instance: &Instance, strip: &StripType, beta: &[f64]) -> PricingResult;
}

#[enum_dispatch(Pricer)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PricingMethod {
    KnapsackViaOracle(knapsack::KnapsackPricer),
    ArcFlow(arcflow::ArcFlowPricer),
    DynamicProgramming(dp::DpPricer),
}

/// Solves a generic bounded knapsack `maximize sum profit_k * x_k subject to
/// sum size_k * x_k <= capacity, x_k in Z_{>=0}` and reconstructs the
/// multiset, breaking ties among equal-profit types by the lowest index.
/// Shared by the DP backend and used as ground truth in backend-equivalence
/// tests; the arc-flow and LP-oracle backends solve the same mathematical
/// problem through genuinely different code paths.
pub(crate) fn bounded_knapsack_dp(capacity: u32, sizes: &[u32], profits: &[f64]) -> (f64, Vec<u32>) {
    let cap = capacity as usize;
    let mut best = vec![0.0_f64; cap + 1];
    // `choice[p] = Some(k)` means the optimal fill of capacity `p` places one more
    // unit of type `k` on top of the optimal fill of `p - sizes[k]`; `None` means
    // the baseline `best[p - 1]` (unused capacity) is already optimal.
    let mut choice: Vec<Option<usize>> = vec![None; cap + 1];

    for p in 1..=cap {
        best[p] = best[p - 1];
        for (k, (&size, &profit)) in sizes.iter().zip(profits.iter()).enumerate() {
            if size == 0 || size as usize > p || profit <= 0.0 {
                continue;
            }
            let candidate = best[p - size as usize] + profit;
            if candidate > best[p] + 1e-9 {
                best[p] = candidate;
                choice[p] = Some(k);
            }
        }
    }

    let mut pattern = vec![0u32; sizes.len()];
    let mut p = cap;
    while p > 0 {
        match choice[p] {
            Some(k) => {
                pattern[k] += 1;
                p -= sizes[k] as usize;
            }
            None => p -= 1,
        }
    }

    (best[cap], pattern)
}
