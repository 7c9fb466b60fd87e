//! Closed-form conjectured extremal values and witness constructions.
//!
//! For parameter ranges where an exact extremal graph is conjectured, this
//! module supplies both the value and a witness graph, so a search result
//! can be checked against the conjecture. Functions return `None` outside
//! the ranges the conjecture covers.

use crate::graph::GraphState;

/// Whether a connected simple graph of order `n` and cyclomatic number `v`
/// exists: `n >= ceil((3 + sqrt(1 + 8v)) / 2)`, evaluated in integers as
/// `(2n - 3)^2 >= 8v + 1`.
pub fn graph_exists(n: usize, v: usize) -> bool {
    let lhs = 2 * n as i64 - 3;
    lhs >= 0 && lhs * lhs >= 8 * v as i64 + 1
}

// ============================================================================
// Conjectured maximum
// ============================================================================

/// The conjectured maximal `cM2` over connected graphs of order `n` and
/// cyclomatic number `v`.
pub fn max_cm2(n: usize, v: usize) -> Option<u64> {
    if !graph_exists(n, v) {
        return None;
    }
    let (n, v) = (n as i64, v as i64);
    if n >= v + 2 {
        return Some((n * (n - 1) * (n - 2) + v * (v * v + v - 8)) as u64);
    }
    let (a, b) = find_a_b(n, v)?;
    let sq = |x: i64| x * x;
    let nm1 = sq(n - 1);
    let term1 = (nm1 - sq(2 + a + b)) * (2 + a);
    let term2 = (sq(2 + a + b) - sq(3 + a)) * b;
    let term3 = (nm1 - sq(3 + a)) * 2 * b;
    let term4 = (nm1 - sq(3 + a)) * a * b;
    let term5 = (nm1 - sq(2 + a)) * 2 * (n - 3 - a - b);
    let term6 = (nm1 - sq(2 + a)) * a * (n - 3 - a - b);
    Some((term1 + term2 + term3 + term4 + term5 + term6) as u64)
}

/// A graph conjectured to attain the maximal `cM2` for `(n, v)`.
///
/// For `n >= v + 2` this is a star on `v` leaves plus isolated nodes, all
/// joined to one hub. Otherwise a two-level construction parameterized by
/// `(a, b)`: a clique of `2 + a` high-degree nodes joined to every
/// low-degree node, with the first low-degree node picking up `b` extra
/// edges.
pub fn max_graph(n: usize, v: usize) -> Option<GraphState> {
    if !graph_exists(n, v) {
        return None;
    }
    if n >= v + 2 {
        let hub = n - 1;
        let mut edges: Vec<(usize, usize)> = (1..=v).map(|leaf| (0, leaf)).collect();
        edges.extend((0..hub).map(|u| (u, hub)));
        return GraphState::from_edges(n, &edges).ok();
    }
    let (a, b) = find_a_b(n as i64, v as i64)?;
    let (a, b) = (a as usize, b as usize);
    let high = 2 + a;
    let mut edges = Vec::new();
    for u in 0..high {
        for w in (u + 1)..high {
            edges.push((u, w));
        }
    }
    for u in 0..high {
        for w in high..n {
            edges.push((u, w));
        }
    }
    let target = high;
    for w in (high + 1)..=(high + b) {
        edges.push((target, w));
    }
    GraphState::from_edges(n, &edges).ok()
}

/// Solves for the `(a, b)` parameters of the dense-range maximum:
/// the first `a` with `b = (1 + a)(4 + a - 2n) / 2 + v` and
/// `0 < b < n - 2 - a`.
fn find_a_b(n: i64, v: i64) -> Option<(i64, i64)> {
    (0..n - 2).find_map(|a| {
        let b = (1 + a) * (4 + a - 2 * n) / 2 + v;
        (b > 0 && b < n - 2 - a).then_some((a, b))
    })
}

// ============================================================================
// Conjectured minimum
// ============================================================================

/// The conjectured minimal `cM2` over connected graphs of order `n` and
/// cyclomatic number `v`, for the ranges the conjecture covers.
pub fn min_cm2(n: usize, v: usize) -> Option<u64> {
    if !graph_exists(n, v) {
        return None;
    }
    match v {
        0 => None,
        1 => Some(0),
        2 => Some(match n {
            4 => 20,
            5 => 18,
            _ => 16,
        }),
        _ if n == 2 * v - 1 => Some(10),
        _ if n > 2 * v - 1 => Some(8),
        _ => None,
    }
}

/// A graph conjectured to attain the minimal `cM2` for `(n, v)`.
///
/// `v = 1` gives the cycle (every degree 2, so `cM2 = 0`). For
/// `v >= 2, n >= 2v - 1` the witness is a chain of diamonds grown from
/// `K4` minus an edge, closed with a final node, with any remaining nodes
/// attached as a pendant path.
pub fn min_graph(n: usize, v: usize) -> Option<GraphState> {
    if !graph_exists(n, v) {
        return None;
    }
    match v {
        0 => None,
        1 => GraphState::cycle(n).ok(),
        _ if n >= 2 * v - 1 => {
            let mut edges = vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3)];
            let (mut u, mut w) = (2usize, 3usize);
            let mut order = 4usize;
            while order < 2 * v - 1 {
                if order + 2 < 2 * v - 1 {
                    edges.push((u, u + 2));
                    u += 2;
                    edges.push((w, w + 2));
                    w += 2;
                    edges.push((u, w));
                    order += 2;
                } else {
                    edges.push((u, order));
                    edges.push((w, order));
                    order += 1;
                }
            }
            for i in order..n {
                edges.push((i - 1, i));
            }
            GraphState::from_edges(n, &edges).ok()
        }
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::cm2;

    #[test]
    fn existence_condition_matches_known_cases() {
        assert!(!graph_exists(1, 0));
        assert!(graph_exists(2, 0));
        assert!(graph_exists(3, 1)); // triangle
        assert!(graph_exists(4, 3)); // K4
        assert!(!graph_exists(3, 3));
        assert!(graph_exists(5, 2));
        assert!(!graph_exists(4, 4));
    }

    #[test]
    fn max_construction_matches_closed_form_in_the_sparse_range() {
        // n >= v + 2: star plus hub.
        for (n, v) in [(5, 1), (6, 3), (8, 2), (10, 7), (12, 4)] {
            let expected = max_cm2(n, v).unwrap();
            let g = max_graph(n, v).unwrap();
            assert_eq!(g.node_count(), n);
            assert_eq!(g.edge_count(), n - 1 + v);
            assert!(g.is_connected());
            assert_eq!(cm2(&g), expected, "mismatch at ({n}, {v})");
        }
    }

    #[test]
    fn max_construction_matches_closed_form_in_the_dense_range() {
        // n < v + 2: the (a, b) construction.
        for (n, v) in [(8, 9), (7, 6), (9, 12), (10, 16)] {
            assert!(graph_exists(n, v), "({n}, {v}) should exist");
            let expected = max_cm2(n, v).unwrap();
            let g = max_graph(n, v).unwrap();
            assert_eq!(g.node_count(), n);
            assert_eq!(g.edge_count(), n - 1 + v);
            assert!(g.is_connected());
            assert_eq!(cm2(&g), expected, "mismatch at ({n}, {v})");
        }
    }

    #[test]
    fn max_value_for_8_9_is_516() {
        assert_eq!(max_cm2(8, 9), Some(516));
    }

    #[test]
    fn min_cycle_witness_scores_zero() {
        for n in [3, 5, 8] {
            let g = min_graph(n, 1).unwrap();
            assert_eq!(g.edge_count(), n);
            assert_eq!(cm2(&g), 0);
            assert_eq!(min_cm2(n, 1), Some(0));
        }
    }

    #[test]
    fn min_construction_matches_closed_form_where_consistent() {
        for (n, v) in [(4, 2), (5, 2), (5, 3), (7, 3), (7, 4), (9, 4), (9, 5), (11, 5)] {
            let expected = min_cm2(n, v).unwrap();
            let g = min_graph(n, v).unwrap();
            assert_eq!(g.node_count(), n, "order mismatch at ({n}, {v})");
            assert_eq!(g.edge_count(), n - 1 + v, "size mismatch at ({n}, {v})");
            assert!(g.is_connected());
            assert_eq!(cm2(&g), expected, "mismatch at ({n}, {v})");
        }
    }

    #[test]
    fn min_is_none_outside_the_covered_range() {
        assert_eq!(min_cm2(4, 3), None); // n < 2v - 1
        assert_eq!(min_graph(4, 3), None);
        assert_eq!(min_cm2(3, 3), None); // no such graph at all
    }

    #[test]
    fn values_are_none_when_no_graph_exists() {
        assert_eq!(max_cm2(3, 3), None);
        assert_eq!(max_graph(3, 3), None);
        assert_eq!(min_graph(3, 5), None);
    }
}
