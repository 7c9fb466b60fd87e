//! Metropolis acceptance and the simulated-annealing driver.
//!
//! The driver advances a single sequential Markov chain: propose a swap,
//! gate it on connectivity, evaluate the tentative energy, accept or
//! reject with the Metropolis criterion, cool geometrically, repeat until
//! the temperature falls to 1. The best state seen is tracked throughout
//! and returned at the end; the final current state may be worse.

use crate::energy::cm2;
use crate::graph::GraphState;
use crate::propose::{CandidateSwap, ProposalScratch, ProposalStrategy, ProposeError};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

// ============================================================================
// Configuration
// ============================================================================

/// Optimization direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Seek the smallest energy.
    Minimize,
    /// Seek the largest energy.
    Maximize,
}

impl Direction {
    /// Whether `delta = E' - E` is a strict improvement in this direction.
    #[inline]
    fn improves(self, delta: i64) -> bool {
        match self {
            Direction::Minimize => delta < 0,
            Direction::Maximize => delta > 0,
        }
    }

    /// The Metropolis exponent for a non-improving move.
    #[inline]
    fn metropolis_exponent(self, delta: i64, temperature: f64) -> f64 {
        match self {
            Direction::Minimize => -(delta as f64) / temperature,
            Direction::Maximize => delta as f64 / temperature,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Minimize => write!(f, "min"),
            Direction::Maximize => write!(f, "max"),
        }
    }
}

/// Annealing parameters.
#[derive(Clone, Debug)]
pub struct AnnealConfig {
    /// Optimization direction.
    pub direction: Direction,
    /// Proposal strategy driving the candidate swaps.
    pub strategy: ProposalStrategy,
    /// Starting temperature; must exceed the stopping temperature of 1.
    pub initial_temperature: f64,
    /// Geometric cooling factor in (0, 1), applied once per iteration.
    pub cooling_factor: f64,
    /// How many candidate redraws one iteration may spend looking for a
    /// connectivity-preserving swap before giving up as a no-op.
    pub connect_retries: usize,
    /// Print a progress line every this many iterations; 0 disables
    /// reporting entirely.
    pub report_every: u64,
    /// Seed for the run's single RNG; `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Minimize,
            strategy: ProposalStrategy::ExhaustiveWeightedMin,
            initial_temperature: 10_000.0,
            cooling_factor: 0.995,
            connect_retries: 64,
            report_every: 0,
            seed: None,
        }
    }
}

impl AnnealConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 1.0 {
            return Err(format!(
                "initial_temperature must exceed the stopping temperature 1, got {}",
                self.initial_temperature
            ));
        }
        if !(self.cooling_factor > 0.0 && self.cooling_factor < 1.0) {
            return Err(format!(
                "cooling_factor must be in (0, 1), got {}",
                self.cooling_factor
            ));
        }
        if self.connect_retries == 0 {
            return Err("connect_retries must be at least 1".into());
        }
        Ok(())
    }
}

// ============================================================================
// Errors and outcomes
// ============================================================================

/// Errors from [`Annealer::new`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnnealError {
    /// The starting graph is not connected.
    NotConnected,
    /// The configuration failed validation.
    InvalidConfig(String),
}

impl fmt::Display for AnnealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnealError::NotConnected => write!(f, "starting graph is not connected"),
            AnnealError::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for AnnealError {}

/// What a single iteration did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The tentative state replaced the current state.
    Accepted {
        /// The committed energy.
        energy: u64,
        /// Whether it also improved on the best state seen so far.
        new_best: bool,
    },
    /// The tentative state was discarded.
    Rejected,
    /// No usable candidate this iteration (complete graph, or every drawn
    /// swap disconnected the graph); the state is unchanged.
    NoOp,
}

/// Result of a completed annealing run.
#[derive(Clone, Debug)]
pub struct AnnealOutcome {
    /// The best graph observed at any point during the run.
    pub best: GraphState,
    /// Its energy.
    pub best_energy: u64,
    /// Total iterations (each cools the temperature once).
    pub iterations: u64,
    /// Accepted transitions, including non-improving ones.
    pub accepted_moves: u64,
    /// Accepted transitions that improved on the best state.
    pub improving_moves: u64,
    /// Iterations that found no usable candidate.
    pub no_op_iterations: u64,
    /// Temperature when the run stopped.
    pub final_temperature: f64,
}

// ============================================================================
// Annealer
// ============================================================================

/// The annealing search state: current graph and energy, temperature,
/// best-so-far, and the run's single RNG.
///
/// The current and best graphs are independently owned copies — an
/// accepted tentative graph is moved into `current`, and `best` is only
/// ever a clone taken at improvement time, so discarding either never
/// affects the other.
#[derive(Debug)]
pub struct Annealer {
    current: GraphState,
    current_energy: u64,
    best: GraphState,
    best_energy: u64,
    temperature: f64,
    direction: Direction,
    strategy: ProposalStrategy,
    cooling_factor: f64,
    connect_retries: usize,
    report_every: u64,
    rng: SmallRng,
    scratch: ProposalScratch,
    iterations: u64,
    accepted_moves: u64,
    improving_moves: u64,
    no_op_iterations: u64,
}

impl Annealer {
    /// Creates a run from a connected starting graph.
    ///
    /// # Errors
    /// Fails if the configuration is invalid or the graph is not
    /// connected.
    pub fn new(start: GraphState, config: &AnnealConfig) -> Result<Self, AnnealError> {
        config.validate().map_err(AnnealError::InvalidConfig)?;
        if !start.is_connected() {
            return Err(AnnealError::NotConnected);
        }
        let seed = config.seed.unwrap_or_else(rand::random);
        let current_energy = cm2(&start);
        Ok(Self {
            best: start.clone(),
            best_energy: current_energy,
            current: start,
            current_energy,
            temperature: config.initial_temperature,
            direction: config.direction,
            strategy: config.strategy,
            cooling_factor: config.cooling_factor,
            connect_retries: config.connect_retries,
            report_every: config.report_every,
            rng: SmallRng::seed_from_u64(seed),
            scratch: ProposalScratch::new(),
            iterations: 0,
            accepted_moves: 0,
            improving_moves: 0,
            no_op_iterations: 0,
        })
    }

    /// The current graph.
    pub fn graph(&self) -> &GraphState {
        &self.current
    }

    /// The current (cached) energy.
    pub fn current_energy(&self) -> u64 {
        self.current_energy
    }

    /// The best graph observed so far.
    pub fn best(&self) -> &GraphState {
        &self.best
    }

    /// The best energy observed so far.
    pub fn best_energy(&self) -> u64 {
        self.best_energy
    }

    /// The current temperature.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Whether the run has reached the stopping temperature.
    pub fn finished(&self) -> bool {
        self.temperature <= 1.0
    }

    /// Runs one iteration: propose, gate on connectivity, evaluate,
    /// accept or reject, then cool. The temperature drops by the cooling
    /// factor regardless of what the iteration did.
    pub fn step(&mut self) -> StepOutcome {
        self.iterations += 1;

        let outcome = match self.propose_connected() {
            Some(tentative) => {
                let tentative_energy = cm2(&tentative);
                if self.accepts(tentative_energy) {
                    self.current = tentative;
                    self.current_energy = tentative_energy;
                    self.accepted_moves += 1;
                    let new_best = self
                        .direction
                        .improves(tentative_energy as i64 - self.best_energy as i64);
                    if new_best {
                        self.best = self.current.clone();
                        self.best_energy = tentative_energy;
                        self.improving_moves += 1;
                    }
                    StepOutcome::Accepted {
                        energy: tentative_energy,
                        new_best,
                    }
                } else {
                    StepOutcome::Rejected
                }
            }
            None => {
                self.no_op_iterations += 1;
                StepOutcome::NoOp
            }
        };

        self.temperature *= self.cooling_factor;

        if self.report_every > 0 && self.iterations.is_multiple_of(self.report_every) {
            println!(
                "[anneal] iter {} | T = {:.3} | E = {} | best = {}",
                self.iterations, self.temperature, self.current_energy, self.best_energy
            );
        }
        outcome
    }

    /// Runs to completion and returns the best state discovered.
    pub fn run(mut self) -> AnnealOutcome {
        while !self.finished() {
            self.step();
        }
        if self.report_every > 0 {
            println!(
                "[anneal] done: {} iterations, {} accepted, best energy {}",
                self.iterations, self.accepted_moves, self.best_energy
            );
        }
        AnnealOutcome {
            best: self.best,
            best_energy: self.best_energy,
            iterations: self.iterations,
            accepted_moves: self.accepted_moves,
            improving_moves: self.improving_moves,
            no_op_iterations: self.no_op_iterations,
            final_temperature: self.temperature,
        }
    }

    /// Draws candidates until one preserves connectivity, up to the retry
    /// budget. Returns the tentative graph, or `None` when the iteration
    /// must be a no-op.
    ///
    /// # Panics
    /// Panics if the strategy reports a zero total weight or produces an
    /// invalid swap; both are programming-contract violations, and
    /// failing fast beats corrupting the chain.
    fn propose_connected(&mut self) -> Option<GraphState> {
        for _ in 0..self.connect_retries {
            let CandidateSwap { remove, add } = match self.strategy.propose_swap(
                &self.current,
                self.temperature,
                &mut self.rng,
                &mut self.scratch,
            ) {
                Ok(swap) => swap,
                Err(ProposeError::NoCandidateSwap) => return None,
                Err(err @ ProposeError::ZeroTotalWeight) => {
                    panic!("candidate sampling failed: {err}")
                }
            };
            let tentative = self
                .current
                .swap_edge(remove, add)
                .expect("strategy proposed an invalid swap");
            if tentative.is_connected() {
                return Some(tentative);
            }
        }
        None
    }

    /// The Metropolis acceptance rule: strict improvements always pass;
    /// anything else passes with probability `exp(-|exponent|)` scaled by
    /// temperature, which lets equal-or-worse moves through and so allows
    /// escape from local optima.
    fn accepts(&mut self, tentative_energy: u64) -> bool {
        let delta = tentative_energy as i64 - self.current_energy as i64;
        if self.direction.improves(delta) {
            return true;
        }
        let probability = self
            .direction
            .metropolis_exponent(delta, self.temperature)
            .exp();
        self.rng.random::<f64>() < probability
    }
}

// ============================================================================
// Tests
// ============================================================================
