//! C7: converts a [`crate::bnb::BnbOutcome`] into the integer cutting plan
//! C9 will write out, snapping near-integral primal values and greedily
//! pairing produced strips with the X-columns that consume them.

use std::collections::VecDeque;

use crate::bnb::BnbOutcome;
use crate::column::PatternKind;
use crate::instance::Instance;

#[derive(Debug, Clone)]
pub struct CutStrip {
    pub strip_type: usize,
    /// `(item type index, length)`, one entry per item unit, in pattern order.
    pub items: Vec<(usize, u32)>,
}

#[derive(Debug, Clone, Default)]
pub struct CutSheet {
    pub strips: Vec<CutStrip>,
}

#[derive(Debug, Clone, Default)]
pub struct CuttingPlan {
    pub sheets: Vec<CutSheet>,
}

pub struct IncumbentReport {
    pub ub: f64,
    pub gap: f64,
    pub nodes_explored: usize,
    pub hit_node_limit: bool,
    pub plan: CuttingPlan,
}

const SNAP_EPS: f64 = 1e-6;

fn snap_to_count(v: f64) -> u32 {
    if v <= SNAP_EPS { 0 } else { (v + SNAP_EPS).floor().max(0.0) as u32 }
}

/// Builds the final report. If the incumbent is empty (no integer solution
/// was found before the node cap), the plan is empty and `ub` is `+inf`.
pub fn build_report(instance: &Instance, outcome: &BnbOutcome) -> IncumbentReport {
    let mut sheets: Vec<CutSheet> = Vec::new();
    // Per strip type, the queue of not-yet-filled strip slots, identified by
    // `(sheet index, strip index within that sheet)`.
    let mut pending: Vec<VecDeque<(usize, usize)>> = vec![VecDeque::new(); instance.n_strips()];

    for (column, &primal) in outcome.incumbent_columns.iter().zip(outcome.incumbent_primal.iter()) {
        if let PatternKind::Y { pattern } = &column.kind {
            let copies = snap_to_count(primal);
            for _ in 0..copies {
                let sheet_idx = sheets.len();
                let mut sheet = CutSheet::default();
                for (j, &count) in pattern.iter().enumerate() {
                    for _ in 0..count {
                        let strip_idx = sheet.strips.len();
                        sheet.strips.push(CutStrip { strip_type: j, items: Vec::new() });
                        pending[j].push_back((sheet_idx, strip_idx));
                    }
                }
                sheets.push(sheet);
            }
        }
    }

    for (column, &primal) in outcome.incumbent_columns.iter().zip(outcome.incumbent_primal.iter()) {
        if let PatternKind::X { strip, pattern } = &column.kind {
            let uses = snap_to_count(primal);
            for _ in 0..uses {
                let Some((sheet_idx, strip_idx)) = pending[*strip].pop_front() else {
                    tracing::warn!(
                        strip_type = strip,
                        "no unfilled strip left for an X-column use; rounding produced an inconsistency"
                    );
                    break;
                };
                let items = &mut sheets[sheet_idx].strips[strip_idx].items;
                for (i, &count) in pattern.iter().enumerate() {
                    for _ in 0..count {
                        items.push((i, instance.items[i].length));
                    }
                }
            }
        }
    }

    IncumbentReport {
        ub: outcome.ub,
        gap: outcome.gap,
        nodes_explored: outcome.nodes_explored,
        hit_node_limit: outcome.hit_node_limit,
        plan: CuttingPlan { sheets },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bnb;
    use crate::config::SolverConfig;
    use crate::instance::Sheet;

    #[test]
    fn plan_covers_every_item_unit_of_demand() {
        let instance = Instance::new(Sheet { length: 100, width: 60 }, vec![(50, 30, 4), (40, 20, 3)]).unwrap();
        let config = SolverConfig::default();
        let outcome = bnb::solve(&instance, &config).unwrap();
        let report = build_report(&instance, &outcome);

        let mut produced = vec![0u32; instance.n_items()];
        for sheet in &report.plan.sheets {
            for strip in &sheet.strips {
                for &(item_idx, _) in &strip.items {
                    produced[item_idx] += 1;
                }
            }
        }
        for item in &instance.items {
            assert!(produced[item.index] >= item.demand, "item {} under-produced", item.index);
        }
    }

    #[test]
    fn sheet_count_matches_ub() {
        let instance = Instance::new(Sheet { length: 100, width: 60 }, vec![(100, 60, 3)]).unwrap();
        let config = SolverConfig::default();
        let outcome = bnb::solve(&instance, &config).unwrap();
        let report = build_report(&instance, &outcome);
        assert_eq!(report.plan.sheets.len() as f64, report.ub);
    }
}
