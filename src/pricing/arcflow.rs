//! Arc-flow pricing backend: positions `0..=capacity` form a DAG
//! (represented with `petgraph`), one arc per distinct reachable step size,
//! and a unit source-to-sink flow is found by handing the flow-conservation
//! LP to the same [`LpOracle`] the RMP uses — the relaxation is integral for
//! this acyclic, nonnegative-profit layout, so no rounding is needed.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use super::{Pricer, PricingResult};
use crate::instance::{Instance, StripType};
use crate::oracle::{Column, LpOracle, simplex::SimplexOracle};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcFlowPricer;

impl Pricer for ArcFlowPricer {
    fn solve_sp1(&self, instance: &Instance, pi: &[f64]) -> PricingResult {
        let sizes: Vec<u32> = instance.strips.iter().map(|s| s.width).collect();
        solve_arc_flow(instance.sheet.width, &sizes, pi)
    }

    fn solve_sp2(&self, instance: &Instance, strip: &StripType, beta: &[f64]) -> PricingResult {
        let sizes: Vec<u32> = instance.items.iter().map(|i| i.length).collect();
        let profits: Vec<f64> = instance
            .items
            .iter()
            .zip(beta.iter())
            .map(|(item, &b)| if item.width <= strip.width { b } else { 0.0 })
            .collect();
        solve_arc_flow(instance.sheet.length, &sizes, &profits)
    }
}

struct Arc {
    from: u32,
    to: u32,
    /// Best-profit type for this arc's size, ties broken by lowest index.
    /// `None` for a zero-profit loss arc, which represents unused capacity
    /// rather than placing any item/strip type.
    winner: Option<usize>,
    profit: f64,
}

fn solve_arc_flow(capacity: u32, sizes: &[u32], profits: &[f64]) -> PricingResult {
    let mut graph: DiGraph<u32, usize> = DiGraph::new();
    let nodes: Vec<NodeIndex> = (0..=capacity).map(|p| graph.add_node(p)).collect();

    // One arc per distinct size, carrying the best (profit, lowest-index type).
    let mut by_size: Vec<Option<(f64, usize)>> = vec![None; capacity as usize + 1];
    for (k, (&size, &profit)) in sizes.iter().zip(profits.iter()).enumerate() {
        if size == 0 || size > capacity || profit <= 0.0 {
            continue;
        }
        let slot = &mut by_size[size as usize];
        if slot.is_none_or(|(best_profit, _)| profit > best_profit) {
            *slot = Some((profit, k));
        }
    }

    let mut arcs = Vec::new();
    for s in 0..=capacity {
        for size in 1..=(capacity - s) {
            if let Some((profit, winner)) = by_size[size as usize] {
                let e = s + size;
                graph.add_edge(nodes[s as usize], nodes[e as usize], arcs.len());
                arcs.push(Arc { from: s, to: e, winner: Some(winner), profit });
            }
        }
    }

    // Zero-profit loss arcs `(s, s+1)` absorb any capacity the priced-in types
    // don't exactly partition, so the sink stays reachable even when the
    // optimal pattern leaves slack (Valerio de Carvalho's loss-arc device).
    for s in 0..capacity {
        let e = s + 1;
        graph.add_edge(nodes[s as usize], nodes[e as usize], arcs.len());
        arcs.push(Arc { from: s, to: e, winner: None, profit: 0.0 });
    }

    if arcs.is_empty() {
        return PricingResult { value: 0.0, pattern: vec![0u32; sizes.len()] };
    }

    // Row layout: for node v, row_a(v) = "outflow(v) - inflow(v) >= net(v)" and
    // row_b(v) = "inflow(v) - outflow(v) >= -net(v)", together forcing equality.
    let n_nodes = capacity as usize + 1;
    let row_a = |v: u32| v as usize;
    let row_b = |v: u32| n_nodes + v as usize;
    let mut row_lb = vec![0.0; 2 * n_nodes];
    row_lb[row_a(0)] = 1.0;
    row_lb[row_b(0)] = -1.0;
    row_lb[row_a(capacity)] = -1.0;
    row_lb[row_b(capacity)] = 1.0;

    let columns: Vec<Column> = arcs
        .iter()
        .map(|arc| {
            Column::new(
                vec![
                    (row_a(arc.from), 1.0),
                    (row_b(arc.from), -1.0),
                    (row_a(arc.to), -1.0),
                    (row_b(arc.to), 1.0),
                ],
                -arc.profit,
            )
        })
        .collect();

    let Ok(mut oracle) = SimplexOracle::build(row_lb, columns) else {
        return PricingResult { value: 0.0, pattern: vec![0u32; sizes.len()] };
    };
    if oracle.solve().is_err() {
        return PricingResult { value: 0.0, pattern: vec![0u32; sizes.len()] };
    }
    let value = -oracle.objective();

    // Walk the unit flow from source to sink along the graph's outgoing edges:
    // at most one outgoing edge from each visited node carries flow ~1.
    let mut pattern = vec![0u32; sizes.len()];
    let mut at = 0u32;
    let mut steps = 0usize;
    while at != capacity && steps <= arcs.len() {
        steps += 1;
        let next = graph
            .edges(nodes[at as usize])
            .find(|edge| oracle.primal(*edge.weight()) > 0.5)
            .map(|edge| *edge.weight());
        match next {
            Some(idx) => {
                let arc = &arcs[idx];
                if let Some(winner) = arc.winner {
                    pattern[winner] += 1;
                }
                at = arc.to;
            }
            None => break,
        }
    }

    PricingResult { value, pattern }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{Instance, Sheet};

    #[test]
    fn sp1_matches_dp_backend_on_optimum_value() {
        let instance = Instance::new(
            Sheet { length: 100, width: 60 },
            vec![(40, 20, 5), (60, 20, 5)],
        )
        .unwrap();
        let pi = vec![1.0];
        let via_arcflow = ArcFlowPricer.solve_sp1(&instance, &pi);
        let via_dp = super::super::dp::DpPricer.solve_sp1(&instance, &pi);
        assert!((via_arcflow.value - via_dp.value).abs() < 1e-6);
    }

    /// A single strip width of 40 leaves 20 of unused sheet width slack: the
    /// sink is only reachable with loss arcs absorbing that slack.
    #[test]
    fn sp1_reaches_the_sink_when_the_optimum_leaves_slack() {
        let result = solve_arc_flow(60, &[40], &[1.0]);
        assert!((result.value - 1.0).abs() < 1e-6);
        assert_eq!(result.pattern, vec![1]);
    }

    /// Three lengths of 33 leave 1 unit of unused sheet length slack out of
    /// 100, the same shape as end-to-end scenario 5.
    #[test]
    fn sp2_reaches_the_sink_when_the_optimum_leaves_slack() {
        let result = solve_arc_flow(100, &[33], &[1.0]);
        assert!((result.value - 3.0).abs() < 1e-6);
        assert_eq!(result.pattern, vec![3]);
    }
}
