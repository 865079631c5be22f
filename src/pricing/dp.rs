//! Dynamic-programming pricing backend: classic 1D bounded knapsack on
//! positions `0..capacity`, independent of the LP oracle and of `petgraph`.

use serde::{Deserialize, Serialize};

use super::{Pricer, PricingResult, bounded_knapsack_dp};
use crate::instance::{Instance, StripType};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DpPricer;

impl Pricer for DpPricer {
    fn solve_sp1(&self, instance: &Instance, pi: &[f64]) -> PricingResult {
        let sizes: Vec<u32> = instance.strips.iter().map(|s| s.width).collect();
        let (value, pattern) = bounded_knapsack_dp(instance.sheet.width, &sizes, pi);
        PricingResult { value, pattern }
    }

    fn solve_sp2(&self, instance: &Instance, strip: &StripType, beta: &[f64]) -> PricingResult {
        let sizes: Vec<u32> = instance.items.iter().map(|i| i.length).collect();
        let profits: Vec<f64> = instance
            .items
            .iter()
            .zip(beta.iter())
            .map(|(item, &b)| if item.width <= strip.width { b } else { 0.0 })
            .collect();
        let (value, pattern) = bounded_knapsack_dp(instance.sheet.length, &sizes, &profits);
        PricingResult { value, pattern }
    }
}
