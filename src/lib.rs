//! # Zagreb Extremal Graph Search
//!
//! A library for exploring a conjecture about the complementary second
//! Zagreb index
//! \(cM_2(G) = \sum_{(u,v) \in E} |deg(u)^2 - deg(v)^2|\)
//! over connected simple graphs of fixed order \(n\) and fixed size
//! \(m = n - 1 + \nu\) (\(\nu\) = cyclomatic number).
//!
//! This crate provides:
//! - A compact bitset graph state with an immutable edge-swap primitive
//!   that preserves node and edge counts.
//! - The `cM_2` energy function with an exact **incremental** delta for a
//!   single swap.
//! - Three weighted proposal strategies (degree-biased and two exhaustive
//!   Metropolis-weighted variants) drawing from one seeded RNG.
//! - A simulated-annealing driver with geometric cooling and best-so-far
//!   tracking.
//! - Closed-form conjectured extremal values and witness constructions to
//!   compare search results against.
//!
//! ## Quick Start
//!
//! ```no_run
//! use zagreb::anneal::{AnnealConfig, Annealer, Direction};
//! use zagreb::graph::GraphState;
//! use zagreb::propose::ProposalStrategy;
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! // Search for a minimal-cM2 graph with n = 8 nodes, cyclomatic number 3.
//! let mut rng = SmallRng::seed_from_u64(12345);
//! let start = GraphState::random_connected(8, 10, &mut rng).unwrap();
//! let cfg = AnnealConfig {
//!     direction: Direction::Minimize,
//!     strategy: ProposalStrategy::ExhaustiveWeightedMin,
//!     seed: Some(12345),
//!     ..Default::default()
//! };
//! let outcome = Annealer::new(start, &cfg).unwrap().run();
//! println!("best energy: {}", outcome.best_energy);
//! ```
//!
//! ## Modules
//!
//! - [`graph`]: Graph state, constructors, and adjacency-matrix text I/O.
//! - [`energy`]: The `cM_2` objective and its incremental swap delta.
//! - [`propose`]: Candidate-swap proposal strategies.
//! - [`anneal`]: Metropolis acceptance and the annealing driver.
//! - [`conjecture`]: Closed-form conjectured extremal values and graphs.
//!
//! ## Performance Notes
//!
//! - The graph representation uses `u64` bitsets, limiting graphs to 64
//!   nodes — comfortably above the few dozen this search targets.
//! - The exhaustive strategies score every `(edge, non-edge)` pair per
//!   iteration; scoring uses the O(degree) incremental delta and fans out
//!   over rayon, and the weighted draw itself stays on the single seeded
//!   RNG so runs are reproducible.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::inline_always)] // Intentional for hot-path code
#![allow(clippy::many_single_char_names)] // Mathematical variable names
#![allow(clippy::needless_range_loop)] // Often clearer for pair enumeration
#![allow(clippy::doc_markdown)] // LaTeX-style notation in docs

pub mod anneal;
pub mod conjecture;
pub mod energy;
pub mod graph;
pub mod propose;

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::anneal::{AnnealConfig, AnnealOutcome, Annealer, Direction};
    pub use crate::energy::{cm2, swap_delta};
    pub use crate::graph::GraphState;
    pub use crate::propose::{CandidateSwap, ProposalStrategy};
}
