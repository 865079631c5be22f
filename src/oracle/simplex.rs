//! A dense bounded-variable primal simplex over `faer` matrices: one concrete
//! implementation of the [`LpOracle`] contract.
//!
//! Every row the caller passes to `build`/`add_column` is a `>=` constraint.
//! Internally each column's `lb`/`ub` becomes an extra row (a `>=` row
//! for a nonzero lower bound, a `<=` row for a finite upper bound), so the
//! whole system reduces to one family of `>=` rows (surplus + artificial
//! variables, Big-M-free two-phase) plus one family of `<=` rows (slack
//! variables only). Bland's rule is used throughout, trading pivot count for
//! a termination guarantee we can't verify by running the solver ourselves.
//!
//! This re-solves from scratch on every `solve()` call rather than reusing
//! the previous basis — see DESIGN.md for why that still satisfies the
//! oracle contract.

use faer::Mat;

use super::{Column, LpOracle};
use crate::error::{Result, SolverError};

const TOL: f64 = 1e-9;

pub struct SimplexOracle {
    row_lb: Vec<f64>,
    columns: Vec<Column>,
    primal: Vec<f64>,
    dual: Vec<f64>,
    objective: f64,
}

impl LpOracle for SimplexOracle {
    fn build(row_lb: Vec<f64>, columns: Vec<Column>) -> Result<Self> {
        let n_cols = columns.len();
        let n_rows = row_lb.len();
        let mut oracle = Self {
            row_lb,
            columns,
            primal: vec![0.0; n_cols],
            dual: vec![0.0; n_rows],
            objective: 0.0,
        };
        oracle.solve()?;
        Ok(oracle)
    }

    fn add_column(&mut self, column: Column) -> usize {
        self.columns.push(column);
        self.primal.push(0.0);
        self.columns.len() - 1
    }

    fn solve(&mut self) -> Result<()> {
        let solved = solve_tableau(&self.row_lb, &self.columns)?;
        self.primal = solved.primal;
        self.dual = solved.dual;
        self.objective = solved.objective;
        Ok(())
    }

    fn primal(&self, col: usize) -> f64 {
        self.primal[col]
    }

    fn dual(&self, row: usize) -> f64 {
        self.dual[row]
    }

    fn objective(&self) -> f64 {
        self.objective
    }

    fn n_cols(&self) -> usize {
        self.columns.len()
    }

    fn n_rows(&self) -> usize {
        self.row_lb.len()
    }
}

struct Solved {
    primal: Vec<f64>,
    dual: Vec<f64>,
    objective: f64,
}

/// Builds and solves the two-phase tableau. Row layout:
/// - `0..n_rows`: the caller's original `>=` rows.
/// - `n_rows..n_ge`: one `>=` row per column with a nonzero lower bound.
/// - `n_ge..n_ge+n_le`: one `<=` row per column with a finite upper bound.
fn solve_tableau(row_lb: &[f64], columns: &[Column]) -> Result<Solved> {
    let n_cols = columns.len();
    let n_rows = row_lb.len();

    let lb_extra: Vec<(usize, f64)> = columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.lb > TOL)
        .map(|(j, c)| (j, c.lb))
        .collect();
    let ub_extra: Vec<(usize, f64)> = columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.ub.is_finite())
        .map(|(j, c)| (j, c.ub))
        .collect();

    let n_ge = n_rows + lb_extra.len();
    let n_le = ub_extra.len();
    let total_rows = n_ge + n_le;

    let surplus = |k: usize| n_cols + k;
    let artificial = |k: usize| n_cols + n_ge + k;
    let le_slack = |m: usize| n_cols + 2 * n_ge + m;
    let total_vars = n_cols + 2 * n_ge + n_le;
    let rhs_col = total_vars;

    let mut tab = Mat::<f64>::zeros(total_rows + 1, total_vars + 1);

    for (j, column) in columns.iter().enumerate() {
        for &(row, val) in &column.coeffs {
            if row < n_rows {
                tab[(row, j)] += val;
            }
        }
    }
    for k in 0..n_rows {
        tab[(k, surplus(k))] = -1.0;
        tab[(k, artificial(k))] = 1.0;
        tab[(k, rhs_col)] = row_lb[k];
    }
    for (offset, &(col_idx, lb_val)) in lb_extra.iter().enumerate() {
        let k = n_rows + offset;
        tab[(k, col_idx)] = 1.0;
        tab[(k, surplus(k))] = -1.0;
        tab[(k, artificial(k))] = 1.0;
        tab[(k, rhs_col)] = lb_val;
    }
    for (m, &(col_idx, ub_val)) in ub_extra.iter().enumerate() {
        let row = n_ge + m;
        tab[(row, col_idx)] = 1.0;
        tab[(row, le_slack(m))] = 1.0;
        tab[(row, rhs_col)] = ub_val;
    }

    let mut basis: Vec<usize> = (0..total_rows)
        .map(|k| if k < n_ge { artificial(k) } else { le_slack(k - n_ge) })
        .collect();

    // Phase 1: minimize the sum of artificial variables.
    let mut cost1 = vec![0.0; total_vars];
    for k in 0..n_ge {
        cost1[artificial(k)] = 1.0;
    }
    recompute_objective_row(&mut tab, &basis, &cost1, total_rows, rhs_col);
    pivot_to_optimum(&mut tab, &mut basis, total_rows, rhs_col, None)?;

    let phase1_obj: f64 = (0..n_ge)
        .filter(|&k| basis[k] >= artificial(0) && basis[k] < artificial(0) + n_ge)
        .map(|k| tab[(k, rhs_col)])
        .sum();
    if phase1_obj > 1e-6 {
        return Err(SolverError::OracleInfeasible);
    }

    // Phase 2: minimize the true objective; artificial variables are locked out.
    let mut cost2 = vec![0.0; total_vars];
    for (j, column) in columns.iter().enumerate() {
        cost2[j] = column.obj;
    }
    recompute_objective_row(&mut tab, &basis, &cost2, total_rows, rhs_col);
    let disallowed_from = artificial(0);
    let disallowed_to = artificial(0) + n_ge;
    pivot_to_optimum(
        &mut tab,
        &mut basis,
        total_rows,
        rhs_col,
        Some((disallowed_from, disallowed_to)),
    )?;

    let mut primal = vec![0.0; n_cols];
    for (row, &b) in basis.iter().enumerate() {
        if b < n_cols {
            primal[b] = normalize(tab[(row, rhs_col)].max(0.0));
        }
    }
    let mut dual = vec![0.0; n_rows];
    for (k, d) in dual.iter_mut().enumerate() {
        *d = normalize(tab[(total_rows, surplus(k))]);
    }
    let objective = columns
        .iter()
        .enumerate()
        .map(|(j, c)| c.obj * primal[j])
        .sum();

    Ok(Solved { primal, dual, objective })
}

fn normalize(v: f64) -> f64 {
    v + 0.0
}

fn recompute_objective_row(tab: &mut Mat<f64>, basis: &[usize], cost: &[f64], total_rows: usize, rhs_col: usize) {
    for j in 0..=rhs_col {
        let z: f64 = (0..total_rows).map(|r| cost[basis[r]] * tab[(r, j)]).sum();
        let c_j = if j == rhs_col { 0.0 } else { cost[j] };
        tab[(total_rows, j)] = c_j - z;
    }
}

/// Bland's-rule simplex pivoting loop, run in place on `tab` until no column
/// (outside `disallowed`) has a negative reduced cost.
fn pivot_to_optimum(
    tab: &mut Mat<f64>,
    basis: &mut [usize],
    total_rows: usize,
    rhs_col: usize,
    disallowed: Option<(usize, usize)>,
) -> Result<()> {
    loop {
        let entering = (0..rhs_col).find(|&j| {
            let blocked = disallowed.is_some_and(|(lo, hi)| j >= lo && j < hi);
            !blocked && tab[(total_rows, j)] < -TOL
        });
        let Some(enter) = entering else { break };

        let mut leave_row = None;
        let mut best_ratio = f64::INFINITY;
        for r in 0..total_rows {
            let a = tab[(r, enter)];
            if a > TOL {
                let ratio = tab[(r, rhs_col)] / a;
                if ratio < best_ratio - TOL
                    || (ratio < best_ratio + TOL && leave_row.map(|lr: usize| basis[lr] > basis[r]).unwrap_or(true))
                {
                    best_ratio = ratio;
                    leave_row = Some(r);
                }
            }
        }
        let Some(row) = leave_row else {
            return Err(SolverError::OracleInternal(
                "pricing/RMP relaxation is unbounded".into(),
            ));
        };

        let pivot = tab[(row, enter)];
        for j in 0..=rhs_col {
            tab[(row, j)] /= pivot;
        }
        for r in 0..=total_rows {
            if r == row {
                continue;
            }
            let factor = tab[(r, enter)];
            if factor.abs() > TOL {
                for j in 0..=rhs_col {
                    let pivot_val = tab[(row, j)];
                    tab[(r, j)] -= factor * pivot_val;
                }
            }
        }
        basis[row] = enter;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_ge_row_matches_textbook_dual() {
        // minimize x0 s.t. x0 >= 5, x0 >= 0
        let columns = vec![Column::new(vec![(0, 1.0)], 1.0)];
        let solved = solve_tableau(&[5.0], &columns).unwrap();
        assert!((solved.primal[0] - 5.0).abs() < 1e-6);
        assert!((solved.dual[0] - 1.0).abs() < 1e-6);
        assert!((solved.objective - 5.0).abs() < 1e-6);
    }

    #[test]
    fn infeasible_when_upper_bound_below_lower_bound_requirement() {
        let columns = vec![Column::new(vec![(0, 1.0)], 1.0).with_bounds(0.0, 2.0)];
        let result = solve_tableau(&[5.0], &columns);
        assert!(matches!(result, Err(SolverError::OracleInfeasible)));
    }

    #[test]
    fn adding_a_column_can_only_improve_the_objective() {
        let columns = vec![Column::new(vec![(0, 1.0)], 2.0)];
        let mut oracle = SimplexOracle::build(vec![3.0], columns).unwrap();
        let before = oracle.objective();
        oracle.add_column(Column::new(vec![(0, 1.0)], 1.0));
        oracle.solve().unwrap();
        assert!(oracle.objective() <= before + 1e-9);
    }

    #[test]
    fn lower_bound_branch_forces_the_variable_up() {
        let columns = vec![
            Column::new(vec![(0, 1.0)], 1.0).with_bounds(2.0, f64::INFINITY),
            Column::new(vec![(0, 1.0)], 1.0),
        ];
        let solved = solve_tableau(&[1.0], &columns).unwrap();
        assert!(solved.primal[0] >= 2.0 - 1e-6);
    }
}
