//! The branch-and-price driver. Wraps column generation in a best-bound
//! branch-and-bound search over the RMP's fractional variables.

use crate::cg;
use crate::column::PatternColumn;
use crate::config::SolverConfig;
use crate::error::{Result, SolverError};
use crate::heuristic::seed_columns;
use crate::instance::Instance;
use crate::terminators::{NullTerminator, Terminator};

use super::node::{BnbNode, BoundKind, BranchConstraint, NodeId};

pub struct BnbOutcome {
    pub ub: f64,
    pub gap: f64,
    pub incumbent_columns: Vec<PatternColumn>,
    pub incumbent_primal: Vec<f64>,
    pub nodes_explored: usize,
    pub hit_node_limit: bool,
    pub interrupted: bool,
}

/// Runs branch-and-price to completion, to the node cap, or to a certified
/// optimum, whichever comes first. Never checks for interruption.
pub fn solve(instance: &Instance, config: &SolverConfig) -> Result<BnbOutcome> {
    solve_with_terminator(instance, config, &NullTerminator)
}

/// Same as [`solve`], but stops early (keeping the current incumbent) as soon
/// as `terminator.should_stop()` is true, checked between nodes.
pub fn solve_with_terminator(
    instance: &Instance,
    config: &SolverConfig,
    terminator: &dyn Terminator,
) -> Result<BnbOutcome> {
    let mut arena: Vec<BnbNode> = Vec::new();
    let mut ub = f64::INFINITY;
    let mut incumbent_columns: Option<Vec<PatternColumn>> = None;
    let mut incumbent_primal: Option<Vec<f64>> = None;
    let mut hit_node_limit = false;

    let root_outcome = cg::run(instance, seed_columns(instance), config)?;
    arena.push(BnbNode {
        id: 0,
        parent: None,
        depth: 0,
        columns: root_outcome.columns,
        branch_constraints: Vec::new(),
        lb: root_outcome.objective,
        primal: root_outcome.primal,
        pruned: false,
        branched: false,
        branch_var: None,
    });
    let mut nodes_explored = 1usize;
    let mut interrupted = false;

    loop {
        if terminator.should_stop() {
            interrupted = true;
            tracing::warn!(nodes = nodes_explored, "branch-and-bound interrupted");
            break;
        }

        let Some(node_id) = next_open_node(&arena) else { break };

        if arena[node_id].lb >= ub - config.eps {
            arena[node_id].pruned = true;
            continue;
        }

        let branch_var = select_branch_variable(&arena[node_id].columns, &arena[node_id].primal, config.eps);

        let Some(var_idx) = branch_var else {
            if arena[node_id].lb < ub {
                ub = arena[node_id].lb;
                incumbent_columns = Some(arena[node_id].columns.clone());
                incumbent_primal = Some(arena[node_id].primal.clone());
            }
            arena[node_id].branched = true;
            continue;
        };
        arena[node_id].branch_var = Some(var_idx);

        if nodes_explored + 2 > config.max_nodes {
            hit_node_limit = true;
            arena[node_id].branched = true;
            tracing::warn!(nodes = nodes_explored, "branch-and-bound hit the node limit");
            break;
        }

        let v = arena[node_id].primal[var_idx];
        let floor_v = v.floor();
        let ceil_v = v.ceil();

        let mut down_columns = arena[node_id].columns.clone();
        down_columns[var_idx].ub = down_columns[var_idx].ub.min(floor_v);
        let mut up_columns = arena[node_id].columns.clone();
        up_columns[var_idx].lb = up_columns[var_idx].lb.max(ceil_v);

        let children = [
            (down_columns, BoundKind::Upper, floor_v),
            (up_columns, BoundKind::Lower, ceil_v),
        ];

        for (child_columns, kind, bound) in children {
            let child_id = arena.len();
            let mut constraints = arena[node_id].branch_constraints.clone();
            constraints.push(BranchConstraint { var: var_idx, kind, bound });
            nodes_explored += 1;

            match cg::run(instance, child_columns, config) {
                Ok(outcome) => {
                    let lb = outcome.objective.max(arena[node_id].lb);
                    arena.push(BnbNode {
                        id: child_id,
                        parent: Some(node_id),
                        depth: arena[node_id].depth + 1,
                        columns: outcome.columns,
                        branch_constraints: constraints,
                        lb,
                        primal: outcome.primal,
                        pruned: false,
                        branched: false,
                        branch_var: None,
                    });
                }
                Err(SolverError::OracleInfeasible) => {
                    arena.push(BnbNode {
                        id: child_id,
                        parent: Some(node_id),
                        depth: arena[node_id].depth + 1,
                        columns: Vec::new(),
                        branch_constraints: constraints,
                        lb: f64::INFINITY,
                        primal: Vec::new(),
                        pruned: true,
                        branched: false,
                        branch_var: None,
                    });
                }
                Err(e) => return Err(e),
            }
        }
        arena[node_id].branched = true;
    }

    let min_open_lb = arena
        .iter()
        .filter(|n| n.is_open())
        .map(|n| n.lb)
        .fold(f64::INFINITY, f64::min);

    let gap = if !ub.is_finite() {
        f64::INFINITY
    } else if !min_open_lb.is_finite() {
        0.0
    } else {
        ((ub - min_open_lb) / ub).max(0.0)
    };

    Ok(BnbOutcome {
        ub,
        gap,
        incumbent_columns: incumbent_columns.unwrap_or_default(),
        incumbent_primal: incumbent_primal.unwrap_or_default(),
        nodes_explored,
        hit_node_limit,
        interrupted,
    })
}

fn next_open_node(arena: &[BnbNode]) -> Option<NodeId> {
    arena
        .iter()
        .filter(|n| n.is_open())
        .min_by(|a, b| a.lb.partial_cmp(&b.lb).unwrap().then(a.id.cmp(&b.id)))
        .map(|n| n.id)
}

/// Picks the RMP variable with the maximum fractional part. Ties (within
/// `eps` of each other) go to Y-columns before X-columns, then lowest index.
/// Branching is a true two-sided split — see [`super::node::BoundKind`].
fn select_branch_variable(columns: &[PatternColumn], primal: &[f64], eps: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (k, &v) in primal.iter().enumerate() {
        if v <= eps {
            continue;
        }
        let frac = v - v.floor();
        if frac <= eps || frac >= 1.0 - eps {
            continue;
        }

        let take = match best {
            None => true,
            Some((best_idx, best_frac)) => {
                if frac > best_frac + eps {
                    true
                } else if frac < best_frac - eps {
                    false
                } else {
                    let rank = |idx: usize| (!columns[idx].is_y() as u8, idx);
                    rank(k) < rank(best_idx)
                }
            }
        };
        if take {
            best = Some((k, frac));
        }
    }

    best.map(|(k, _)| k)
}
