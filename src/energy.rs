//! The complementary second Zagreb index and its incremental swap delta.

use crate::graph::{all_bits, GraphState};

/// Computes the complementary second Zagreb index
/// \(cM_2(G) = \sum_{(u,v) \in E} |deg(u)^2 - deg(v)^2|\)
/// from scratch.
///
/// Always a non-negative integer, zero exactly when every edge joins two
/// nodes of equal degree (in particular for regular graphs), and invariant
/// under any relabeling of the nodes.
pub fn cm2(g: &GraphState) -> u64 {
    let n = g.node_count();
    let mut total = 0u64;
    for u in 0..n {
        let du = i64::from(g.degree(u));
        let mut t = g.neighbors(u) & !all_bits(u + 1);
        while t != 0 {
            let v = t.trailing_zeros() as usize;
            t &= t - 1;
            let dv = i64::from(g.degree(v));
            total += (du * du - dv * dv).unsigned_abs();
        }
    }
    total
}

/// Computes the energy change `cm2(G') - cm2(G)` for the swap that removes
/// edge `remove` and adds non-edge `add`, WITHOUT building `G'`.
///
/// Only edges incident to a node whose degree changes can contribute, so
/// the cost is O(sum of affected degrees) instead of O(m). All arithmetic
/// is on integers, so the result agrees bit-for-bit with
/// `cm2(g.swap_edge(remove, add)?) as i64 - cm2(g) as i64`.
///
/// # Panics
/// Panics in debug builds if `remove` is not an edge, `add` is not a
/// non-edge, or the pairs are degenerate; the proposal strategies only
/// ever call this with pairs drawn from the graph's own enumerations.
pub fn swap_delta(g: &GraphState, remove: (usize, usize), add: (usize, usize)) -> i64 {
    let remove = normalize(remove);
    let add = normalize(add);
    debug_assert!(remove.0 != remove.1 && add.0 != add.1);
    debug_assert!(remove != add);
    debug_assert!(g.has_edge(remove.0, remove.1), "remove is not an edge");
    debug_assert!(!g.has_edge(add.0, add.1), "add already is an edge");

    // Degree shifts: -1 at each removal endpoint, +1 at each addition
    // endpoint. A node shared between the pairs nets to zero and its
    // incident terms are covered from the other endpoints.
    let mut accum = [(0usize, 0i64); 4];
    let mut accum_len = 0usize;
    for (node, shift) in [
        (remove.0, -1),
        (remove.1, -1),
        (add.0, 1),
        (add.1, 1),
    ] {
        if let Some(slot) = accum[..accum_len].iter_mut().find(|(c, _)| *c == node) {
            slot.1 += shift;
        } else {
            accum[accum_len] = (node, shift);
            accum_len += 1;
        }
    }
    let mut kept = [(0usize, 0i64); 4];
    let mut kept_len = 0usize;
    for &(node, shift) in &accum[..accum_len] {
        if shift != 0 {
            kept[kept_len] = (node, shift);
            kept_len += 1;
        }
    }
    let changed = &kept[..kept_len];

    let old_deg = |x: usize| i64::from(g.degree(x));
    let new_deg = |x: usize| {
        old_deg(x)
            + changed
                .iter()
                .find(|&&(c, _)| c == x)
                .map_or(0, |&(_, shift)| shift)
    };
    let term = |dx: i64, dy: i64| (dx * dx - dy * dy).abs();

    let mut delta = 0i64;
    for (i, &(x, _)) in changed.iter().enumerate() {
        let mut t = g.neighbors(x);
        while t != 0 {
            let w = t.trailing_zeros() as usize;
            t &= t - 1;
            // Skip edges to earlier changed nodes; they were counted there.
            if changed[..i].iter().any(|&(c, _)| c == w) {
                continue;
            }
            delta -= term(old_deg(x), old_deg(w));
            if normalize((x, w)) != remove {
                delta += term(new_deg(x), new_deg(w));
            }
        }
    }
    delta + term(new_deg(add.0), new_deg(add.1))
}

#[inline(always)]
fn normalize((u, v): (usize, usize)) -> (usize, usize) {
    if u < v {
        (u, v)
    } else {
        (v, u)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    #[test]
    fn path_on_four_nodes_scores_six() {
        // Degrees 1, 2, 2, 1: |1-4| + |4-4| + |4-1| = 6.
        let g = GraphState::path(4).unwrap();
        assert_eq!(cm2(&g), 6);
    }

    #[test]
    fn regular_graphs_score_zero() {
        assert_eq!(cm2(&GraphState::cycle(7).unwrap()), 0);
        assert_eq!(cm2(&GraphState::complete(6).unwrap()), 0);
    }

    #[test]
    fn star_graph_score() {
        // Star K_{1,5}: center degree 5, leaves degree 1.
        let edges: Vec<(usize, usize)> = (1..6).map(|v| (0, v)).collect();
        let g = GraphState::from_edges(6, &edges).unwrap();
        assert_eq!(cm2(&g), 5 * (25 - 1));
    }

    #[test]
    fn energy_is_invariant_under_relabeling() {
        let mut rng = XorShiftRng::seed_from_u64(0x1504);
        for _ in 0..25 {
            let g = GraphState::random_connected(9, 14, &mut rng).unwrap();

            // Random permutation of 0..9 via Fisher-Yates.
            let mut perm: Vec<usize> = (0..9).collect();
            for i in (1..9).rev() {
                let j = rng.random_range(0..=i);
                perm.swap(i, j);
            }
            let relabeled: Vec<(usize, usize)> = g
                .edges()
                .iter()
                .map(|&(u, v)| (perm[u], perm[v]))
                .collect();
            let h = GraphState::from_edges(9, &relabeled).unwrap();
            assert_eq!(cm2(&g), cm2(&h));
        }
    }

    #[test]
    fn swap_delta_matches_recompute() {
        let mut rng = XorShiftRng::seed_from_u64(0xDE17A);
        for _ in 0..40 {
            let g = GraphState::random_connected(10, 18, &mut rng).unwrap();
            let base = cm2(&g) as i64;
            let edges = g.edges();
            let non_edges = g.non_edges();
            for _ in 0..50 {
                let remove = edges[rng.random_range(0..edges.len())];
                let add = non_edges[rng.random_range(0..non_edges.len())];
                let predicted = swap_delta(&g, remove, add);
                let actual = cm2(&g.swap_edge(remove, add).unwrap()) as i64 - base;
                assert_eq!(
                    predicted, actual,
                    "delta mismatch removing {remove:?}, adding {add:?}"
                );
            }
        }
    }

    #[test]
    fn swap_delta_with_shared_endpoint_matches_recompute() {
        let mut rng = XorShiftRng::seed_from_u64(0x5A4ED);
        for _ in 0..200 {
            let g = GraphState::random_connected(8, 12, &mut rng).unwrap();
            let base = cm2(&g) as i64;
            // Force the removal and addition to share a node.
            let edges = g.edges();
            let non_edges = g.non_edges();
            let remove = edges[rng.random_range(0..edges.len())];
            let shared: Vec<(usize, usize)> = non_edges
                .iter()
                .copied()
                .filter(|&(u, v)| {
                    u == remove.0 || u == remove.1 || v == remove.0 || v == remove.1
                })
                .collect();
            if shared.is_empty() {
                continue;
            }
            let add = shared[rng.random_range(0..shared.len())];
            let predicted = swap_delta(&g, remove, add);
            let actual = cm2(&g.swap_edge(remove, add).unwrap()) as i64 - base;
            assert_eq!(predicted, actual);
        }
    }

    #[test]
    fn exhaustive_cross_product_deltas_match_recompute() {
        // Every (edge, non-edge) combination on one small graph.
        let mut rng = XorShiftRng::seed_from_u64(0xF00D);
        let g = GraphState::random_connected(7, 10, &mut rng).unwrap();
        let base = cm2(&g) as i64;
        for &remove in &g.edges() {
            for &add in &g.non_edges() {
                let predicted = swap_delta(&g, remove, add);
                let actual = cm2(&g.swap_edge(remove, add).unwrap()) as i64 - base;
                assert_eq!(predicted, actual);
            }
        }
    }
}
