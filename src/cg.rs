//! C5: the column-generation engine. Alternates RMP solves with SP1/SP2
//! pricing rounds until no column prices in or `max_cg_iter` is hit.

use crate::column::{PatternColumn, row_lower_bounds};
use crate::config::SolverConfig;
use crate::error::Result;
use crate::instance::Instance;
use crate::oracle::{LpOracle, simplex::SimplexOracle};
use crate::pricing::Pricer;

pub struct CgOutcome {
    pub columns: Vec<PatternColumn>,
    pub primal: Vec<f64>,
    pub objective: f64,
    pub duals_pi: Vec<f64>,
    pub duals_beta: Vec<f64>,
    pub hit_iteration_limit: bool,
}

/// Runs column generation to convergence (or the iteration cap) starting from
/// `columns`, which the caller has already built to be RMP-feasible (the
/// heuristic seed at the root, or a parent node's inherited set at any other
/// node). Returns `OracleInfeasible` if the RMP itself has no feasible
/// solution under the node's branch bounds — callers are expected to catch
/// this and mark the node pruned rather than treat it as fatal, except at the
/// root.
pub fn run(instance: &Instance, mut columns: Vec<PatternColumn>, config: &SolverConfig) -> Result<CgOutcome> {
    let row_lb = row_lower_bounds(instance);
    let oracle_columns = columns.iter().map(|c| c.to_oracle_column(instance)).collect();
    let mut oracle = SimplexOracle::build(row_lb, oracle_columns)?;

    let mut iter = 0usize;
    let mut hit_iteration_limit = false;

    loop {
        oracle.solve()?;
        iter += 1;

        let pi: Vec<f64> = (0..instance.n_strips()).map(|j| oracle.dual(j)).collect();
        let beta: Vec<f64> = (0..instance.n_items())
            .map(|i| oracle.dual(instance.n_strips() + i))
            .collect();

        let sp1 = config.pricing_method.solve_sp1(instance, &pi);
        let mut converged = true;

        if sp1.value > 1.0 + config.eps {
            let column = PatternColumn::new_y(sp1.pattern);
            oracle.add_column(column.to_oracle_column(instance));
            columns.push(column);
            converged = false;
        } else {
            for strip in &instance.strips {
                let support_nonzero = instance
                    .items_fitting(strip.width)
                    .any(|item| beta[item.index] > config.eps);
                if !support_nonzero {
                    continue;
                }
                let sp2 = config.pricing_method.solve_sp2(instance, strip, &beta);
                if sp2.value > pi[strip.index] + config.eps {
                    let column = PatternColumn::new_x(strip.index, sp2.pattern);
                    oracle.add_column(column.to_oracle_column(instance));
                    columns.push(column);
                    converged = false;
                }
            }
        }

        if converged {
            break;
        }
        if iter >= config.max_cg_iter {
            tracing::warn!(iterations = iter, "column generation hit the iteration limit");
            hit_iteration_limit = true;
            break;
        }
    }

    oracle.solve()?;
    let primal: Vec<f64> = (0..oracle.n_cols()).map(|c| oracle.primal(c)).collect();
    let duals_pi: Vec<f64> = (0..instance.n_strips()).map(|j| oracle.dual(j)).collect();
    let duals_beta: Vec<f64> = (0..instance.n_items())
        .map(|i| oracle.dual(instance.n_strips() + i))
        .collect();
    let objective = oracle.objective();

    Ok(CgOutcome {
        columns,
        primal,
        objective,
        duals_pi,
        duals_beta,
        hit_iteration_limit,
    })
}
