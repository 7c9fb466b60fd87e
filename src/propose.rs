//! Candidate-swap proposal strategies.
//!
//! A proposal picks one edge to remove and one non-edge to add, holding
//! node and edge counts fixed. Three strategies exist: a cheap
//! degree-biased heuristic that judges each half of the swap on its own,
//! and two exhaustive variants that score every `(edge, non-edge)`
//! combination by its exact energy change and sample the joint pair with
//! Metropolis weights. Both halves always come back together from one
//! [`ProposalStrategy::propose_swap`] call, so no state leaks across
//! iterations.

use crate::energy::swap_delta;
use crate::graph::GraphState;
use rand::Rng;
use rayon::prelude::*;
use std::fmt;

/// Scale applied to the degree sum in the degree-biased weights
/// (`exp(±SCALE * (deg u + deg v) / (T + OFFSET))`).
const DEGREE_WEIGHT_SCALE: f64 = 100.0;

/// Temperature offset in the degree-biased weights; keeps the bias mild
/// at every temperature the cooling schedule visits.
const DEGREE_WEIGHT_OFFSET: f64 = 10_000.0;

// ============================================================================
// Types
// ============================================================================

/// One proposed mutation: remove an edge, add a non-edge.
///
/// Ephemeral — produced and consumed within a single iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CandidateSwap {
    /// The edge to remove, `(u, v)` with `u < v`.
    pub remove: (usize, usize),
    /// The non-edge to add, `(u, v)` with `u < v`.
    pub add: (usize, usize),
}

/// The closed set of proposal strategies.
///
/// Exactly three behaviors exist and no plugin extensibility is required,
/// so this is an enum dispatched by the driver rather than a trait object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProposalStrategy {
    /// Degree-biased proxy heuristic for minimization: sheds an edge
    /// between high-degree nodes and adds a non-edge between low-degree
    /// nodes, each half drawn independently and without ever consulting
    /// the resulting energy change.
    DegreeWeightedMin,
    /// Scores every `(edge, non-edge)` combination by its exact energy
    /// delta and samples the joint pair with weight `exp(-delta / T)`.
    ExhaustiveWeightedMin,
    /// Scores every `(edge, non-edge)` combination by its exact energy
    /// delta and samples the joint pair with weight `exp(+delta / T)`.
    ExhaustiveWeightedMax,
}

/// Failure modes of a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProposeError {
    /// No swap exists: the graph has no non-edge (it is complete) or no
    /// edge. The driver treats this as a no-op iteration.
    NoCandidateSwap,
    /// The candidate weights summed to zero or to a non-finite value; a
    /// weighted draw would be meaningless, so the proposal fails instead
    /// of silently returning an arbitrary candidate.
    ZeroTotalWeight,
}

impl fmt::Display for ProposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProposeError::NoCandidateSwap => write!(f, "no candidate swap exists"),
            ProposeError::ZeroTotalWeight => {
                write!(f, "candidate weights sum to zero; cannot sample")
            }
        }
    }
}

impl std::error::Error for ProposeError {}

/// Reusable buffers for candidate enumeration and scoring.
///
/// The exhaustive strategies score `|edges| x |non_edges|` candidates per
/// iteration; keeping the pair lists and the weight vector alive across
/// iterations avoids reallocating them every step.
#[derive(Debug, Default)]
pub struct ProposalScratch {
    edges: Vec<(usize, usize)>,
    non_edges: Vec<(usize, usize)>,
    weights: Vec<f64>,
}

impl ProposalScratch {
    /// Creates empty buffers; they grow to fit on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Refills the pair buffers from `g`, in the same row-major order
    /// `GraphState::edges`/`non_edges` use.
    fn fill(&mut self, g: &GraphState) {
        self.edges.clear();
        self.non_edges.clear();
        let n = g.node_count();
        for u in 0..n {
            for v in (u + 1)..n {
                if g.has_edge(u, v) {
                    self.edges.push((u, v));
                } else {
                    self.non_edges.push((u, v));
                }
            }
        }
    }
}

// ============================================================================
// Proposal
// ============================================================================

impl ProposalStrategy {
    /// Proposes one candidate swap for the current graph.
    ///
    /// Every random draw comes from `rng`, so a fixed seed reproduces the
    /// proposal sequence exactly. The exhaustive variants fan candidate
    /// scoring out over rayon, but the scores land in index order and the
    /// single weighted draw happens afterwards on `rng` — observable
    /// behavior is identical to sequential scoring.
    ///
    /// # Errors
    /// [`ProposeError::NoCandidateSwap`] when the graph has no non-edge
    /// (or no edge); [`ProposeError::ZeroTotalWeight`] when the weights
    /// cannot be sampled from.
    pub fn propose_swap<R: Rng>(
        self,
        g: &GraphState,
        temperature: f64,
        rng: &mut R,
        scratch: &mut ProposalScratch,
    ) -> Result<CandidateSwap, ProposeError> {
        scratch.fill(g);
        if scratch.edges.is_empty() || scratch.non_edges.is_empty() {
            return Err(ProposeError::NoCandidateSwap);
        }
        match self {
            ProposalStrategy::DegreeWeightedMin => degree_weighted(g, temperature, rng, scratch),
            ProposalStrategy::ExhaustiveWeightedMin => {
                exhaustive(g, temperature, -1.0, rng, scratch)
            }
            ProposalStrategy::ExhaustiveWeightedMax => exhaustive(g, temperature, 1.0, rng, scratch),
        }
    }
}

/// Degree-biased proposal: the removal half is drawn from the edges with
/// weight `exp(+c * (deg u + deg v) / (T + k))` (high-degree edges go
/// first) and the addition half from the non-edges with weight
/// `exp(-c * (deg u + deg v) / (T + k))` (low-degree pairs fill in),
/// pushing the degree sequence toward uniformity.
fn degree_weighted<R: Rng>(
    g: &GraphState,
    temperature: f64,
    rng: &mut R,
    scratch: &mut ProposalScratch,
) -> Result<CandidateSwap, ProposeError> {
    let scale = DEGREE_WEIGHT_SCALE / (temperature + DEGREE_WEIGHT_OFFSET);

    scratch.weights.clear();
    scratch.weights.extend(
        scratch
            .edges
            .iter()
            .map(|&(u, v)| (scale * f64::from(g.degree(u) + g.degree(v))).exp()),
    );
    let remove = scratch.edges[weighted_draw(rng, &scratch.weights)?];

    scratch.weights.clear();
    scratch.weights.extend(
        scratch
            .non_edges
            .iter()
            .map(|&(u, v)| (-scale * f64::from(g.degree(u) + g.degree(v))).exp()),
    );
    let add = scratch.non_edges[weighted_draw(rng, &scratch.weights)?];

    Ok(CandidateSwap { remove, add })
}

/// Exhaustive Metropolis-weighted proposal over the full cross-product.
///
/// `sign` is `-1.0` for minimization (`exp(-delta / T)`) and `+1.0` for
/// maximization (`exp(+delta / T)`). Exponents are shifted by their
/// maximum before exponentiation: the sampled distribution is unchanged
/// and the largest weight is exactly 1, so `exp` cannot overflow no
/// matter how large `|delta| / T` grows.
fn exhaustive<R: Rng>(
    g: &GraphState,
    temperature: f64,
    sign: f64,
    rng: &mut R,
    scratch: &mut ProposalScratch,
) -> Result<CandidateSwap, ProposeError> {
    let ProposalScratch {
        edges,
        non_edges,
        weights,
    } = scratch;
    let edges: &[(usize, usize)] = edges;
    let non_edges: &[(usize, usize)] = non_edges;
    let ne = non_edges.len();
    let total = edges.len() * ne;

    (0..total)
        .into_par_iter()
        .map(|i| {
            let delta = swap_delta(g, edges[i / ne], non_edges[i % ne]) as f64;
            sign * delta / temperature
        })
        .collect_into_vec(weights);

    let max_exponent = weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    for w in weights.iter_mut() {
        *w = (*w - max_exponent).exp();
    }

    let idx = weighted_draw(rng, weights)?;
    Ok(CandidateSwap {
        remove: edges[idx / ne],
        add: non_edges[idx % ne],
    })
}

/// Draws one index proportionally to `weights` by a cumulative scan.
///
/// # Errors
/// Fails when the total weight is zero or non-finite.
fn weighted_draw<R: Rng>(rng: &mut R, weights: &[f64]) -> Result<usize, ProposeError> {
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(ProposeError::ZeroTotalWeight);
    }
    let mut r = rng.random::<f64>() * total;
    for (i, &w) in weights.iter().enumerate() {
        r -= w;
        if r < 0.0 {
            return Ok(i);
        }
    }
    // Floating round-off can leave a sliver; it belongs to the last slot.
    Ok(weights.len() - 1)
}

// ============================================================================
// Tests
// ============================================================================
