//! Pattern columns shared across the heuristic (C3), column generation (C5),
//! branch-and-bound (C6), and incumbent reporting (C7). A [`PatternColumn`]
//! carries both the pattern's domain meaning (which strips or items it cuts)
//! and the bookkeeping (`lb`/`ub`) branch-and-bound pins on it; [`to_row_coeffs`]
//! translates that meaning into the RMP's row coefficients.

use crate::instance::Instance;
use crate::oracle::Column;

#[derive(Debug, Clone, PartialEq)]
pub enum PatternKind {
    /// A strip pattern: `pattern[j]` strips of type `j` cut from one sheet.
    Y { pattern: Vec<u32> },
    /// An item pattern for strip type `strip`: `pattern[i]` items of type `i`.
    X { strip: usize, pattern: Vec<u32> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternColumn {
    pub kind: PatternKind,
    pub lb: f64,
    pub ub: f64,
}

impl PatternColumn {
    pub fn new_y(pattern: Vec<u32>) -> Self {
        Self { kind: PatternKind::Y { pattern }, lb: 0.0, ub: f64::INFINITY }
    }

    pub fn new_x(strip: usize, pattern: Vec<u32>) -> Self {
        Self { kind: PatternKind::X { strip, pattern }, lb: 0.0, ub: f64::INFINITY }
    }

    pub fn is_y(&self) -> bool {
        matches!(self.kind, PatternKind::Y { .. })
    }

    /// Row index `[0, J)` for a Y-column's strip or an X-column's consumption
    /// row; row indices `[J, J+N)` are the demand rows an X-column supplies.
    pub fn to_oracle_column(&self, instance: &Instance) -> Column {
        let n_strips = instance.n_strips();
        let mut coeffs = Vec::new();
        let obj = match &self.kind {
            PatternKind::Y { pattern } => {
                for (j, &count) in pattern.iter().enumerate() {
                    if count > 0 {
                        coeffs.push((j, count as f64));
                    }
                }
                1.0
            }
            PatternKind::X { strip, pattern } => {
                coeffs.push((*strip, -1.0));
                for (i, &count) in pattern.iter().enumerate() {
                    if count > 0 {
                        coeffs.push((n_strips + i, count as f64));
                    }
                }
                0.0
            }
        };
        Column::new(coeffs, obj).with_bounds(self.lb, self.ub)
    }

    /// `Σ w̄_j · p_j <= W` for Y-columns, checked wherever a column is created.
    pub fn check_feasible(&self, instance: &Instance) -> bool {
        match &self.kind {
            PatternKind::Y { pattern } => {
                let used: u64 = pattern
                    .iter()
                    .zip(instance.strips.iter())
                    .map(|(&c, s)| c as u64 * s.width as u64)
                    .sum();
                used <= instance.sheet.width as u64
            }
            PatternKind::X { strip, pattern } => {
                let strip_width = instance.strips[*strip].width;
                let used: u64 = pattern
                    .iter()
                    .zip(instance.items.iter())
                    .map(|(&c, item)| c as u64 * item.length as u64)
                    .sum();
                let no_oversized_items = pattern
                    .iter()
                    .zip(instance.items.iter())
                    .all(|(&c, item)| c == 0 || item.width <= strip_width);
                used <= instance.sheet.length as u64 && no_oversized_items
            }
        }
    }
}

/// `(row_lb)` for the RMP's `J + N` rows: `0` for strip-balance rows, `d_i`
/// for demand rows.
pub fn row_lower_bounds(instance: &Instance) -> Vec<f64> {
    let mut row_lb = vec![0.0; instance.n_strips()];
    row_lb.extend(instance.items.iter().map(|i| i.demand as f64));
    row_lb
}
