//! Solver tunables. The source hard-codes `MAX_CG_ITER`/`MAX_NODES`; here they are
//! plain configuration, overridable by callers or by CLI flags.

use serde::{Deserialize, Serialize};

use crate::pricing::PricingMethod;

/// Fractional/reduced-cost tolerance used throughout column generation and
/// branch-and-bound (`ε` and `ε_rc` in the design notes; the crate uses one
/// value for both since no scenario in this domain requires them to differ).
pub const DEFAULT_EPS: f64 = 1e-6;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Cap on RMP-solve/pricing rounds per node before column generation gives
    /// up and reports a possibly loose lower bound.
    pub max_cg_iter: usize,
    /// Cap on the total number of branch-and-bound nodes explored.
    pub max_nodes: usize,
    /// Tolerance for fractional/integrality tests and reduced-cost tests.
    pub eps: f64,
    /// Which of the three interchangeable backends prices SP1/SP2.
    pub pricing_method: PricingMethod,
    /// Check for a Ctrl-C interrupt between nodes.
    pub interruptible: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_cg_iter: 100,
            max_nodes: 100,
            eps: DEFAULT_EPS,
            pricing_method: PricingMethod::DynamicProgramming(crate::pricing::dp::DpPricer),
            interruptible: false,
        }
    }
}
