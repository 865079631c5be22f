//! C6: branch-and-price driver and its arena-indexed node pool.

pub mod driver;
pub mod node;

pub use driver::{BnbOutcome, solve, solve_with_terminator};
pub use node::{BnbNode, BoundKind, BranchConstraint, NodeId};
