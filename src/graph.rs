//! Graph state and utilities for small extremal-graph searches (currently \(n \le 64\)).

use rand::Rng;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Maximum supported graph order; each adjacency row is a `u64` bitset.
pub const MAX_NODES: usize = 64;

/// How many random `G(n, m)` draws [`GraphState::random_connected`] makes
/// before giving up on finding a connected sample.
const MAX_GENERATION_ATTEMPTS: usize = 10_000;

/// Returns a mask with the lowest `n` bits set.
#[inline(always)]
pub const fn all_bits(n: usize) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

#[inline(always)]
const fn bit(v: usize) -> u64 {
    1u64 << v
}

/// Normalizes an unordered pair to `(min, max)`.
#[inline(always)]
fn ordered(u: usize, v: usize) -> (usize, usize) {
    if u < v {
        (u, v)
    } else {
        (v, u)
    }
}

// ============================================================================
// GraphState
// ============================================================================

/// A simple undirected graph on `n` labeled nodes (`0..n`).
///
/// Representation:
/// - `adj[v]` is the neighbor bitset of node `v`.
/// - The graph is loop-free and symmetric by construction; every public
///   constructor validates its input.
///
/// The search holds node count and edge count fixed: the only mutation is
/// [`GraphState::swap_edge`], which removes one edge and adds one non-edge,
/// and returns a **new** graph so the caller decides whether to commit or
/// discard the result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphState {
    n: usize,
    adj: Vec<u64>,
}

impl GraphState {
    /// Creates a graph with `n` nodes and no edges.
    ///
    /// # Errors
    /// Returns an error if `n` is zero or exceeds [`MAX_NODES`].
    pub fn empty(n: usize) -> Result<Self, GraphError> {
        if n == 0 {
            return Err(GraphError::ZeroNodes);
        }
        if n > MAX_NODES {
            return Err(GraphError::TooManyNodes { n });
        }
        Ok(Self {
            n,
            adj: vec![0u64; n],
        })
    }

    /// Creates a graph from an explicit edge list.
    ///
    /// # Errors
    /// Returns an error if `n` is out of range, an endpoint is out of
    /// range, an edge is a self-loop, or an edge appears twice.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self, GraphError> {
        let mut g = Self::empty(n)?;
        for &(u, v) in edges {
            if u >= n || v >= n {
                return Err(GraphError::NodeOutOfRange {
                    node: u.max(v),
                    order: n,
                });
            }
            if u == v {
                return Err(GraphError::SelfLoop { node: u });
            }
            if g.has_edge(u, v) {
                return Err(GraphError::DuplicateEdge { u, v });
            }
            g.adj[u] |= bit(v);
            g.adj[v] |= bit(u);
        }
        Ok(g)
    }

    /// Creates the path `0 - 1 - ... - (n-1)`.
    ///
    /// # Errors
    /// Returns an error if `n` is out of range.
    pub fn path(n: usize) -> Result<Self, GraphError> {
        let edges: Vec<(usize, usize)> = (1..n).map(|v| (v - 1, v)).collect();
        Self::from_edges(n, &edges)
    }

    /// Creates the cycle `0 - 1 - ... - (n-1) - 0`.
    ///
    /// # Errors
    /// Returns an error if `n < 3` or `n` exceeds [`MAX_NODES`].
    pub fn cycle(n: usize) -> Result<Self, GraphError> {
        if n < 3 {
            return Err(GraphError::ImpossibleEdgeCount { n, m: n });
        }
        let mut edges: Vec<(usize, usize)> = (1..n).map(|v| (v - 1, v)).collect();
        edges.push((n - 1, 0));
        Self::from_edges(n, &edges)
    }

    /// Creates the complete graph on `n` nodes.
    ///
    /// # Errors
    /// Returns an error if `n` is out of range.
    pub fn complete(n: usize) -> Result<Self, GraphError> {
        let mut g = Self::empty(n)?;
        for v in 0..n {
            g.adj[v] = all_bits(n) & !bit(v);
        }
        Ok(g)
    }

    /// Draws a uniformly random connected `G(n, m)` graph.
    ///
    /// Samples `m` distinct node pairs uniformly and rejects disconnected
    /// draws, retrying until a connected sample appears.
    ///
    /// # Errors
    /// Returns an error if `(n, m)` cannot form a connected simple graph,
    /// or if no connected sample is found within the attempt budget.
    pub fn random_connected<R: Rng>(n: usize, m: usize, rng: &mut R) -> Result<Self, GraphError> {
        let g = Self::empty(n)?;
        let max_edges = n * (n - 1) / 2;
        if m + 1 < n || m > max_edges {
            return Err(GraphError::ImpossibleEdgeCount { n, m });
        }

        let mut pairs: Vec<(usize, usize)> = Vec::with_capacity(max_edges);
        for u in 0..n {
            for v in (u + 1)..n {
                pairs.push((u, v));
            }
        }

        for _ in 0..MAX_GENERATION_ATTEMPTS {
            // Partial Fisher-Yates: the first m slots become a uniform
            // m-subset of all pairs.
            for i in 0..m {
                let j = rng.random_range(i..pairs.len());
                pairs.swap(i, j);
            }
            let mut candidate = g.clone();
            for &(u, v) in &pairs[..m] {
                candidate.adj[u] |= bit(v);
                candidate.adj[v] |= bit(u);
            }
            if candidate.is_connected() {
                return Ok(candidate);
            }
        }
        Err(GraphError::GenerationFailed {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }

    /// Returns the number of nodes.
    #[inline(always)]
    pub fn node_count(&self) -> usize {
        self.n
    }

    /// Returns the total number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        let sum: u32 = self.adj.iter().map(|row| row.count_ones()).sum();
        (sum as usize) / 2
    }

    /// Returns whether the edge `(u, v)` exists.
    #[inline(always)]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        debug_assert!(u < self.n && v < self.n);
        (self.adj[u] & bit(v)) != 0
    }

    /// Returns the degree of node `v`.
    #[inline(always)]
    pub fn degree(&self, v: usize) -> u32 {
        debug_assert!(v < self.n);
        self.adj[v].count_ones()
    }

    /// Returns the neighbor bitset of node `v`.
    #[inline(always)]
    pub fn neighbors(&self, v: usize) -> u64 {
        debug_assert!(v < self.n);
        self.adj[v]
    }

    /// Returns a reference to the adjacency bitsets.
    #[inline(always)]
    pub fn adj(&self) -> &[u64] {
        &self.adj
    }

    /// Returns all edges as ordered pairs `(u, v)` with `u < v`,
    /// enumerated row-major.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(self.edge_count());
        for u in 0..self.n {
            let mut t = self.adj[u] & !all_bits(u + 1);
            while t != 0 {
                let v = t.trailing_zeros() as usize;
                t &= t - 1;
                out.push((u, v));
            }
        }
        out
    }

    /// Returns all non-edges (excluding self-loops) as ordered pairs
    /// `(u, v)` with `u < v`, enumerated row-major — the same order
    /// [`GraphState::edges`] uses, so weight computation and sampling can
    /// share one enumeration.
    pub fn non_edges(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for u in 0..self.n {
            let mut t = !self.adj[u] & all_bits(self.n) & !all_bits(u + 1);
            while t != 0 {
                let v = t.trailing_zeros() as usize;
                t &= t - 1;
                out.push((u, v));
            }
        }
        out
    }

    /// Returns whether the graph is connected (a single BFS over bitset
    /// frontiers reaching all `n` nodes).
    pub fn is_connected(&self) -> bool {
        let full = all_bits(self.n);
        let mut visited = bit(0);
        let mut frontier = bit(0);
        while frontier != 0 {
            let mut next = 0u64;
            let mut t = frontier;
            while t != 0 {
                let v = t.trailing_zeros() as usize;
                t &= t - 1;
                next |= self.adj[v];
            }
            frontier = next & !visited;
            visited |= next;
        }
        visited & full == full
    }

    /// Removes the edge `remove` and adds the edge `add`, returning the
    /// resulting graph as a new value. The receiver is never mutated;
    /// committing or discarding the result is the caller's decision.
    ///
    /// Both pairs are unordered; endpoints may be given in either order.
    ///
    /// # Errors
    /// Fails with a [`SwapError`] if `remove` is not currently an edge,
    /// `add` already is an edge, either pair is a self-loop, the two
    /// pairs are identical, or an endpoint is out of range.
    pub fn swap_edge(
        &self,
        remove: (usize, usize),
        add: (usize, usize),
    ) -> Result<Self, SwapError> {
        for &node in &[remove.0, remove.1, add.0, add.1] {
            if node >= self.n {
                return Err(SwapError::NodeOutOfRange {
                    node,
                    order: self.n,
                });
            }
        }
        if remove.0 == remove.1 {
            return Err(SwapError::SelfLoop { node: remove.0 });
        }
        if add.0 == add.1 {
            return Err(SwapError::SelfLoop { node: add.0 });
        }
        let remove = ordered(remove.0, remove.1);
        let add = ordered(add.0, add.1);
        if remove == add {
            return Err(SwapError::IdenticalPair {
                u: remove.0,
                v: remove.1,
            });
        }
        if !self.has_edge(remove.0, remove.1) {
            return Err(SwapError::MissingEdge {
                u: remove.0,
                v: remove.1,
            });
        }
        if self.has_edge(add.0, add.1) {
            return Err(SwapError::EdgeAlreadyPresent { u: add.0, v: add.1 });
        }

        let mut next = self.clone();
        next.adj[remove.0] &= !bit(remove.1);
        next.adj[remove.1] &= !bit(remove.0);
        next.adj[add.0] |= bit(add.1);
        next.adj[add.1] |= bit(add.0);
        Ok(next)
    }

    /// Writes the adjacency matrix to a writer as an `n x n` matrix of
    /// `0/1` characters.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        for i in 0..self.n {
            for j in 0..self.n {
                let edge = (self.adj[i] >> j) & 1;
                write!(w, "{edge}")?;
            }
            writeln!(w)?;
        }
        Ok(())
    }

    /// Saves the adjacency matrix to a file as an `n x n` matrix of `0/1`
    /// characters.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn save_to_file(&self, filename: impl AsRef<Path>) -> io::Result<()> {
        let mut f = File::create(filename)?;
        self.write_to(&mut f)
    }

    /// Loads a graph from a file containing an adjacency matrix.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the matrix is
    /// malformed.
    pub fn load_from_file(filename: impl AsRef<Path>) -> Result<Self, GraphError> {
        let file = File::open(filename).map_err(|e| GraphError::Io(e.to_string()))?;
        let reader = BufReader::new(file);
        let mut text = String::new();
        for line in reader.lines() {
            let line = line.map_err(|e| GraphError::Io(e.to_string()))?;
            text.push_str(&line);
            text.push('\n');
        }
        parse_adjacency_matrix(&text)
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parses a `0/1` adjacency matrix from text.
///
/// Rules:
/// - Blank lines are ignored.
/// - The matrix must be square, symmetric, and have a zero diagonal.
/// - `n` must be at most [`MAX_NODES`].
///
/// # Errors
/// Returns an error if the input is empty, non-square, contains invalid
/// characters, has self-loops, or is not symmetric.
pub fn parse_adjacency_matrix(text: &str) -> Result<GraphState, GraphError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(GraphError::Empty);
    }
    let n = lines.len();
    if n > MAX_NODES {
        return Err(GraphError::TooManyNodes { n });
    }

    let mut adj = Vec::with_capacity(n);
    for (i, line) in lines.iter().enumerate() {
        let bytes = line.as_bytes();
        if bytes.len() != n {
            return Err(GraphError::NonSquare {
                row: i,
                expected: n,
                got: bytes.len(),
            });
        }
        let mut mask = 0u64;
        for (j, &b) in bytes.iter().enumerate() {
            match b {
                b'0' => {}
                b'1' => mask |= bit(j),
                _ => {
                    return Err(GraphError::InvalidChar {
                        row: i,
                        col: j,
                        ch: b as char,
                    })
                }
            }
        }
        adj.push(mask);
    }

    for i in 0..n {
        if (adj[i] >> i) & 1 != 0 {
            return Err(GraphError::SelfLoop { node: i });
        }
    }
    for i in 0..n {
        for j in (i + 1)..n {
            if (adj[i] >> j) & 1 != (adj[j] >> i) & 1 {
                return Err(GraphError::NotSymmetric { i, j });
            }
        }
    }

    Ok(GraphState { n, adj })
}

// ============================================================================
// Errors
// ============================================================================

/// Errors from [`GraphState::swap_edge`].
///
/// A swap built from the graph's own `edges()`/`non_edges()` enumeration
/// can never fail; these errors exist so a manually constructed swap fails
/// fast instead of corrupting state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapError {
    /// The pair to remove is not currently an edge.
    MissingEdge {
        /// Smaller endpoint.
        u: usize,
        /// Larger endpoint.
        v: usize,
    },
    /// The pair to add already is an edge.
    EdgeAlreadyPresent {
        /// Smaller endpoint.
        u: usize,
        /// Larger endpoint.
        v: usize,
    },
    /// A pair references the same node twice.
    SelfLoop {
        /// The repeated node.
        node: usize,
    },
    /// The remove and add pairs are identical; the no-op swap is rejected.
    IdenticalPair {
        /// Smaller endpoint.
        u: usize,
        /// Larger endpoint.
        v: usize,
    },
    /// A pair references a node outside `0..n`.
    NodeOutOfRange {
        /// The offending node.
        node: usize,
        /// The graph order.
        order: usize,
    },
}

impl fmt::Display for SwapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapError::MissingEdge { u, v } => {
                write!(f, "cannot remove ({u}, {v}): not an edge")
            }
            SwapError::EdgeAlreadyPresent { u, v } => {
                write!(f, "cannot add ({u}, {v}): already an edge")
            }
            SwapError::SelfLoop { node } => write!(f, "self-loop at node {node}"),
            SwapError::IdenticalPair { u, v } => {
                write!(f, "swap removes and adds the same pair ({u}, {v})")
            }
            SwapError::NodeOutOfRange { node, order } => {
                write!(f, "node {node} out of range for order {order}")
            }
        }
    }
}

impl std::error::Error for SwapError {}

/// Errors from graph construction and adjacency-matrix parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphError {
    /// A graph must have at least one node.
    ZeroNodes,
    /// The order exceeds [`MAX_NODES`].
    TooManyNodes {
        /// Requested order.
        n: usize,
    },
    /// An edge endpoint is outside `0..n`.
    NodeOutOfRange {
        /// The offending node.
        node: usize,
        /// The graph order.
        order: usize,
    },
    /// An edge appears twice in an edge list.
    DuplicateEdge {
        /// First endpoint.
        u: usize,
        /// Second endpoint.
        v: usize,
    },
    /// A self-loop in an edge list or on the parsed diagonal.
    SelfLoop {
        /// The offending node.
        node: usize,
    },
    /// No connected simple graph with `n` nodes and `m` edges exists.
    ImpossibleEdgeCount {
        /// Requested order.
        n: usize,
        /// Requested size.
        m: usize,
    },
    /// No connected random sample was found within the attempt budget.
    GenerationFailed {
        /// Number of draws made before giving up.
        attempts: usize,
    },
    /// The parsed text contains no rows.
    Empty,
    /// The parsed matrix is not square.
    NonSquare {
        /// Row index with the wrong length.
        row: usize,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },
    /// The parsed text contains a non-`0/1` character.
    InvalidChar {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// The invalid character.
        ch: char,
    },
    /// `A[i][j] != A[j][i]`.
    NotSymmetric {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
    },
    /// I/O error (file not found, etc.).
    Io(String),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::ZeroNodes => write!(f, "graph must have at least one node"),
            GraphError::TooManyNodes { n } => {
                write!(f, "order {n} exceeds the supported maximum of {MAX_NODES}")
            }
            GraphError::NodeOutOfRange { node, order } => {
                write!(f, "node {node} out of range for order {order}")
            }
            GraphError::DuplicateEdge { u, v } => {
                write!(f, "edge ({u}, {v}) appears more than once")
            }
            GraphError::SelfLoop { node } => write!(f, "self-loop at node {node}"),
            GraphError::ImpossibleEdgeCount { n, m } => {
                write!(f, "no connected simple graph with {n} nodes and {m} edges")
            }
            GraphError::GenerationFailed { attempts } => {
                write!(f, "no connected random graph found in {attempts} draws")
            }
            GraphError::Empty => write!(f, "adjacency matrix is empty"),
            GraphError::NonSquare { row, expected, got } => write!(
                f,
                "adjacency matrix is not square: row {row} has length {got}, expected {expected}"
            ),
            GraphError::InvalidChar { row, col, ch } => write!(
                f,
                "invalid character at ({row}, {col}): {ch:?} (expected '0' or '1')"
            ),
            GraphError::NotSymmetric { i, j } => {
                write!(f, "matrix is not symmetric at ({i}, {j})")
            }
            GraphError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for GraphError {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    // -------------------------------------------------------------------------
    // Constructors
    // -------------------------------------------------------------------------

    #[test]
    fn path_graph_shape() {
        let g = GraphState::path(4).unwrap();
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 3);
        assert!(g.is_connected());
        assert_eq!(g.degree(0), 1);
        assert_eq!(g.degree(1), 2);
        assert_eq!(g.degree(2), 2);
        assert_eq!(g.degree(3), 1);
    }

    #[test]
    fn cycle_graph_is_regular() {
        let g = GraphState::cycle(5).unwrap();
        assert_eq!(g.edge_count(), 5);
        assert!(g.is_connected());
        for v in 0..5 {
            assert_eq!(g.degree(v), 2);
        }
    }

    #[test]
    fn complete_graph_shape() {
        let g = GraphState::complete(5).unwrap();
        assert_eq!(g.edge_count(), 10);
        assert!(g.non_edges().is_empty());
        assert!(g.is_connected());
    }

    #[test]
    fn from_edges_rejects_self_loop_and_duplicate() {
        assert_eq!(
            GraphState::from_edges(3, &[(0, 0)]).unwrap_err(),
            GraphError::SelfLoop { node: 0 }
        );
        assert_eq!(
            GraphState::from_edges(3, &[(0, 1), (1, 0)]).unwrap_err(),
            GraphError::DuplicateEdge { u: 1, v: 0 }
        );
    }

    #[test]
    fn order_bounds_are_enforced() {
        assert_eq!(GraphState::empty(0).unwrap_err(), GraphError::ZeroNodes);
        assert_eq!(
            GraphState::empty(65).unwrap_err(),
            GraphError::TooManyNodes { n: 65 }
        );
        assert!(GraphState::empty(64).is_ok());
    }

    // -------------------------------------------------------------------------
    // Edge / non-edge enumeration
    // -------------------------------------------------------------------------

    #[test]
    fn edges_and_non_edges_partition_all_pairs() {
        let mut rng = XorShiftRng::seed_from_u64(0xC0FFEE);
        for _ in 0..20 {
            let g = GraphState::random_connected(10, 14, &mut rng).unwrap();
            let edges = g.edges();
            let non_edges = g.non_edges();
            assert_eq!(edges.len(), 14);
            assert_eq!(edges.len() + non_edges.len(), 10 * 9 / 2);
            for &(u, v) in &edges {
                assert!(u < v);
                assert!(g.has_edge(u, v));
            }
            for &(u, v) in &non_edges {
                assert!(u < v);
                assert!(!g.has_edge(u, v));
            }
        }
    }

    #[test]
    fn handshaking_lemma_holds() {
        let mut rng = XorShiftRng::seed_from_u64(42);
        for _ in 0..10 {
            let g = GraphState::random_connected(12, 20, &mut rng).unwrap();
            let sum_deg: u32 = (0..12).map(|v| g.degree(v)).sum();
            assert_eq!(sum_deg as usize, 2 * g.edge_count());
        }
    }

    // -------------------------------------------------------------------------
    // Connectivity
    // -------------------------------------------------------------------------

    #[test]
    fn connectivity_detects_split_graph() {
        // Triangle 0-1-2 plus isolated edge 3-4.
        let g = GraphState::from_edges(5, &[(0, 1), (1, 2), (0, 2), (3, 4)]).unwrap();
        assert!(!g.is_connected());
    }

    #[test]
    fn single_node_is_connected() {
        let g = GraphState::empty(1).unwrap();
        assert!(g.is_connected());
    }

    #[test]
    fn random_connected_has_requested_shape() {
        let mut rng = XorShiftRng::seed_from_u64(0xFACE);
        for &(n, m) in &[(5, 4), (8, 10), (12, 30)] {
            let g = GraphState::random_connected(n, m, &mut rng).unwrap();
            assert_eq!(g.node_count(), n);
            assert_eq!(g.edge_count(), m);
            assert!(g.is_connected());
        }
    }

    #[test]
    fn random_connected_rejects_impossible_counts() {
        let mut rng = XorShiftRng::seed_from_u64(1);
        assert!(matches!(
            GraphState::random_connected(5, 3, &mut rng),
            Err(GraphError::ImpossibleEdgeCount { .. })
        ));
        assert!(matches!(
            GraphState::random_connected(5, 11, &mut rng),
            Err(GraphError::ImpossibleEdgeCount { .. })
        ));
    }

    // -------------------------------------------------------------------------
    // swap_edge
    // -------------------------------------------------------------------------

    #[test]
    fn swap_edge_returns_new_graph_and_preserves_receiver() {
        let g = GraphState::path(4).unwrap();
        let before = g.clone();
        let h = g.swap_edge((1, 2), (0, 3)).unwrap();
        assert_eq!(g, before, "receiver must not change");
        assert!(!h.has_edge(1, 2));
        assert!(h.has_edge(0, 3));
        assert_eq!(h.edge_count(), g.edge_count());
        assert!(h.is_connected());
    }

    #[test]
    fn swap_edge_accepts_either_endpoint_order() {
        let g = GraphState::path(4).unwrap();
        let h1 = g.swap_edge((1, 2), (0, 3)).unwrap();
        let h2 = g.swap_edge((2, 1), (3, 0)).unwrap();
        assert_eq!(h1, h2);
    }

    #[test]
    fn swap_edge_rejects_missing_edge() {
        let g = GraphState::path(4).unwrap();
        assert_eq!(
            g.swap_edge((0, 2), (0, 3)).unwrap_err(),
            SwapError::MissingEdge { u: 0, v: 2 }
        );
    }

    #[test]
    fn swap_edge_rejects_present_edge_as_addition() {
        let g = GraphState::path(4).unwrap();
        assert_eq!(
            g.swap_edge((0, 1), (2, 3)).unwrap_err(),
            SwapError::EdgeAlreadyPresent { u: 2, v: 3 }
        );
    }

    #[test]
    fn swap_edge_rejects_noop_pair() {
        // Removing and re-adding the same pair in one atomic call is
        // invalid: after removal it is no longer an edge.
        let g = GraphState::path(4).unwrap();
        assert_eq!(
            g.swap_edge((0, 1), (0, 1)).unwrap_err(),
            SwapError::IdenticalPair { u: 0, v: 1 }
        );
        assert_eq!(
            g.swap_edge((0, 1), (1, 0)).unwrap_err(),
            SwapError::IdenticalPair { u: 0, v: 1 }
        );
    }

    #[test]
    fn swap_edge_rejects_self_loop_and_out_of_range() {
        let g = GraphState::path(4).unwrap();
        assert_eq!(
            g.swap_edge((0, 1), (2, 2)).unwrap_err(),
            SwapError::SelfLoop { node: 2 }
        );
        assert_eq!(
            g.swap_edge((0, 1), (0, 7)).unwrap_err(),
            SwapError::NodeOutOfRange { node: 7, order: 4 }
        );
    }

    #[test]
    fn disconnecting_swap_is_visible_to_connectivity_check() {
        // Removing (0, 1) from the path and closing the triangle 1-2-3
        // isolates node 0.
        let g = GraphState::path(4).unwrap();
        let h = g.swap_edge((0, 1), (1, 3)).unwrap();
        assert!(!h.is_connected());
    }

    #[test]
    fn random_swaps_preserve_counts() {
        let mut rng = XorShiftRng::seed_from_u64(0xBEEF);
        let mut g = GraphState::random_connected(9, 13, &mut rng).unwrap();
        for _ in 0..500 {
            let edges = g.edges();
            let non_edges = g.non_edges();
            let remove = edges[rng.random_range(0..edges.len())];
            let add = non_edges[rng.random_range(0..non_edges.len())];
            let h = g.swap_edge(remove, add).unwrap();
            assert_eq!(h.node_count(), 9);
            assert_eq!(h.edge_count(), 13);
            if h.is_connected() {
                g = h;
            }
        }
    }

    // -------------------------------------------------------------------------
    // Round-trip save/load
    // -------------------------------------------------------------------------

    #[test]
    fn write_and_parse_roundtrip() {
        let mut rng = XorShiftRng::seed_from_u64(0x1234);
        let g = GraphState::random_connected(10, 15, &mut rng).unwrap();

        let mut buf = Vec::new();
        g.write_to(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let parsed = parse_adjacency_matrix(&text).unwrap();
        assert_eq!(g, parsed);
    }

    // -------------------------------------------------------------------------
    // Parser errors
    // -------------------------------------------------------------------------

    #[test]
    fn parse_rejects_non_square() {
        assert!(matches!(
            parse_adjacency_matrix("010\n10\n").unwrap_err(),
            GraphError::NonSquare { .. }
        ));
    }

    #[test]
    fn parse_rejects_invalid_char() {
        assert!(matches!(
            parse_adjacency_matrix("0a\n00\n").unwrap_err(),
            GraphError::InvalidChar { .. }
        ));
    }

    #[test]
    fn parse_rejects_self_loop() {
        assert_eq!(
            parse_adjacency_matrix("10\n01\n").unwrap_err(),
            GraphError::SelfLoop { node: 0 }
        );
    }

    #[test]
    fn parse_rejects_non_symmetric() {
        assert!(matches!(
            parse_adjacency_matrix("01\n00\n").unwrap_err(),
            GraphError::NotSymmetric { .. }
        ));
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(parse_adjacency_matrix("").unwrap_err(), GraphError::Empty);
        assert_eq!(
            parse_adjacency_matrix("  \n\n ").unwrap_err(),
            GraphError::Empty
        );
    }

    // -------------------------------------------------------------------------
    // Bit helpers
    // -------------------------------------------------------------------------

    #[test]
    fn all_bits_mask_correctness() {
        assert_eq!(all_bits(0), 0);
        assert_eq!(all_bits(1), 1);
        assert_eq!(all_bits(32), 0xFFFF_FFFF);
        assert_eq!(all_bits(64), u64::MAX);
    }
}
