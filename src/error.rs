//! The closed set of error kinds the solver can raise, and how they propagate.
//!
//! `InvalidInstance` and `OracleInternal` are always fatal. `OracleInfeasible` is
//! fatal only when it escapes the root node — callers inside the B&B driver catch
//! it locally and prune. `IterationLimit` and `NodeLimit` are warnings: they are
//! logged and the caller continues with a best-effort result rather than
//! propagating.

use derive_more::{Display, Error};

/// Errors raised by the instance loader, the LP oracle, or the column-generation
/// and branch-and-bound drivers.
#[derive(Debug, Display, Error, PartialEq, Clone)]
pub enum SolverError {
    /// The instance file or in-memory instance failed validation.
    #[display("invalid instance: {_0}")]
    InvalidInstance(String),

    /// The RMP or a pricing subproblem has no feasible solution.
    #[display("oracle reported infeasibility")]
    OracleInfeasible,

    /// The LP oracle failed for a reason other than infeasibility (numerical
    /// breakdown, malformed input to `build`/`add_column`, etc).
    #[display("oracle internal error: {_0}")]
    OracleInternal(String),

    /// Column generation at a node exceeded `SolverConfig::max_cg_iter`.
    #[display("column generation hit the iteration limit ({_0} iterations)")]
    IterationLimit(usize),

    /// The branch-and-bound tree exceeded `SolverConfig::max_nodes`.
    #[display("branch-and-bound hit the node limit ({_0} nodes)")]
    NodeLimit(usize),
}

impl SolverError {
    /// `true` for the two warning-level kinds that a caller may recover from
    /// instead of aborting (`IterationLimit`, `NodeLimit`).
    pub fn is_warning(&self) -> bool {
        matches!(self, SolverError::IterationLimit(_) | SolverError::NodeLimit(_))
    }
}

pub type Result<T> = std::result::Result<T, SolverError>;
