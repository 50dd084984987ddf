//Sidsat
//Copyright (C) 2024-2025 The sidsat developers
//
//This program is free software: you can redistribute it and/or modify
//it under the terms of the GNU Affero General Public License as published by
//the Free Software Foundation, either version 3 of the License, or
//(at your option) any later version.
//
//This program is distributed in the hope that it will be useful,
//but WITHOUT ANY WARRANTY; without even the implied warranty of
//MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//GNU Affero General Public License for more details.
//
//You should have received a copy of the GNU Affero General Public License
//along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Survey inspired decimation. The solver owns the factor graph and
//! alternates survey propagation with decimation rounds: evaluate the bias of
//! every unassigned variable, fix the most polarized fraction of them, let
//! unit propagation simplify the graph, and start over on the residual
//! formula. When the surveys stop carrying information (trivial fixed point
//! or paramagnetic bias profile) the residual formula is handed to WalkSAT.

mod statistics;
mod surveys;
pub mod walksat;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::common::{
    Parameters, SidResult, SpResult, WalksatResult, WALKSAT_FLIPS_PER_VARIABLE,
};
use crate::core::graph::{EdgeIndex, FactorGraph, VariableIndex};
use crate::propagator::Propagator;
use crate::PEAK_ALLOC;
use statistics::Statistics;

/// A solver that collects and prints statistics
pub type DefaultSolver = Solver<true>;
/// A solver that skips all statistics bookkeeping
pub type QuietSolver = Solver<false>;

/// This structure represents the decimation solver. It stores the factor
/// graph of the formula and the various structures used while solving it
pub struct Solver<const S: bool> {
    /// Factor graph of the input formula
    graph: FactorGraph,
    /// Runs the unit propagation cascade after each decimation assignment
    propagator: Propagator,
    /// The tunables of the run
    parameters: Parameters,
    /// Sole source of randomness of the solver; a given seed reproduces the
    /// run exactly
    rng: ChaCha8Rng,
    /// The seed actually used, after auto-seeding
    seed: u64,
    /// Statistics gathered during the solving
    statistics: Statistics<S>,
    /// Scratch buffer of per-edge subsurveys, reused across clause updates
    subsurveys: Vec<f64>,
    /// Scratch buffer of the enabled edges of the clause being updated
    scratch_edges: Vec<EdgeIndex>,
}

impl<const S: bool> Solver<S> {

    pub fn new(graph: FactorGraph, mut parameters: Parameters) -> Self {
        if parameters.seed() == 0 {
            parameters.set_seed(rand::random());
        }
        let seed = parameters.seed();
        Self {
            graph,
            propagator: Propagator::new(),
            parameters,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            statistics: Statistics::default(),
            subsurveys: vec![],
            scratch_edges: vec![],
        }
    }

    /// Returns the seed driving this run
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn graph(&self) -> &FactorGraph {
        &self.graph
    }

    /// Fixes a variable and propagates. Exposed so that embedders can apply
    /// external knowledge before or between decimation runs
    pub fn assign(&mut self, variable: VariableIndex, value: bool) -> crate::propagator::PropagationResult {
        self.propagator.assign(variable, value, &mut self.graph)
    }

    /// Solves the formula by survey inspired decimation
    pub fn solve(&mut self) -> SidResult {
        self.initialize_surveys();
        loop {
            match self.survey_propagation() {
                SpResult::Unconverged => return SidResult::Unconverged,
                SpResult::Trivial => return SidResult::WalksatRequested,
                SpResult::Converged => (),
            }

            let mut unassigned: Vec<VariableIndex> = self
                .graph
                .variables_iter()
                .filter(|&v| !self.graph[v].is_assigned())
                .collect();
            if unassigned.is_empty() {
                debug_assert!(self.graph.is_sat());
                return SidResult::Sat;
            }

            let mut sum_max_bias = 0.0;
            for &variable in &unassigned {
                self.evaluate_variable(variable);
                sum_max_bias += self.graph[variable].h_plus().max(self.graph[variable].h_minus());
            }
            if sum_max_bias / (unassigned.len() as f64) < self.parameters.paramagnetic_threshold() {
                return SidResult::WalksatRequested;
            }

            unassigned.sort_unstable_by(|&a, &b| {
                self.graph[b]
                    .eval_value()
                    .partial_cmp(&self.graph[a].eval_value())
                    .unwrap()
            });

            self.statistics.decimation_round();
            let assigned_before = self.propagator.number_assigned();
            let to_fix = ((unassigned.len() as f64 * self.parameters.sid_fraction()) as usize).max(1);
            let mut fixed = 0;
            for &variable in &unassigned {
                if fixed == to_fix {
                    break;
                }
                // Unit propagation from an earlier fix of this round may have
                // reached the variable; the skip does not count towards the
                // quota
                if self.graph[variable].is_assigned() {
                    continue;
                }
                // Earlier fixes also shifted the graph under the cached
                // biases, so re-evaluate before choosing the value
                self.evaluate_variable(variable);
                let value = self.graph[variable].h_plus() > self.graph[variable].h_minus();
                if self.propagator.assign(variable, value, &mut self.graph).is_err() {
                    return SidResult::Contradiction;
                }
                fixed += 1;
            }
            self.statistics.decimated(fixed);
            self.statistics
                .propagated(self.propagator.number_assigned() - assigned_before - fixed);

            if self.graph.is_sat() {
                return SidResult::Sat;
            }
        }
    }

    /// Runs the WalkSAT fallback on the residual formula, with the configured
    /// flip budget (by default 100 flips per variable of the formula)
    pub fn run_walksat(&mut self) -> WalksatResult {
        let max_flips = if self.parameters.walksat_max_flips() == 0 {
            WALKSAT_FLIPS_PER_VARIABLE * self.graph.number_variables()
        } else {
            self.parameters.walksat_max_flips()
        };
        self.statistics.walksat_call();
        let (result, flips) = walksat::walksat(
            &self.graph,
            max_flips,
            self.parameters.walksat_noise(),
            &mut self.rng,
        );
        self.statistics.walksat_flips(flips);
        result
    }

    /// Prints the statistics gathered so far, if the solver collects them
    pub fn print_statistics(&mut self) {
        self.statistics.peak_memory(PEAK_ALLOC.peak_usage_as_mb());
        self.statistics.print();
    }
}
