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

//! The survey propagation fixed point iteration. Surveys are updated clause
//! by clause, in an order reshuffled at every sweep, until the largest change
//! of a sweep drops below the convergence threshold or the sweep budget runs
//! out.
//!
//! The update of one clause works on "subsurveys": for each of its enabled
//! edges, the probability that the variable on the other end is currently
//! being pushed by its other clauses away from satisfying this one. Those are
//! derived from the per-variable subproduct caches in O(1) per edge, with
//! the saturated-survey counters standing in for the factors that cannot be
//! divided out of a floating-point product. Every survey written back is
//! immediately folded into the caches of its variable, so the caches stay
//! consistent across the whole sweep without ever being rebuilt mid-run.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::common::{SpResult, ZERO_EPSILON};
use crate::core::graph::{ClauseIndex, VariableIndex};
use super::Solver;

impl<const S: bool> Solver<S> {

    /// Draws a uniform random survey on every edge of the graph
    pub fn initialize_surveys(&mut self) {
        for edge in self.graph.edges_iter() {
            let survey = self.rng.gen::<f64>();
            self.graph[edge].set_survey(survey);
        }
    }

    /// Iterates survey updates over the enabled clauses until convergence,
    /// the trivial fixed point, or the sweep budget is exhausted
    pub fn survey_propagation(&mut self) -> SpResult {
        self.statistics.sp_run();
        self.graph.compute_subproducts();
        let mut enabled_clauses = self.graph.enabled_clauses();
        for _ in 0..self.parameters.sp_max_iterations() {
            self.statistics.sp_sweep();
            enabled_clauses.shuffle(&mut self.rng);
            let mut max_diff = 0.0_f64;
            for &clause in &enabled_clauses {
                let clause_diff = self.update_surveys(clause);
                if clause_diff > max_diff {
                    max_diff = clause_diff;
                }
            }
            if max_diff <= self.parameters.sp_epsilon() {
                // An exact fixed point is read as the all-zero, paramagnetic
                // one
                return if max_diff < ZERO_EPSILON {
                    SpResult::Trivial
                } else {
                    SpResult::Converged
                };
            }
        }
        SpResult::Unconverged
    }

    /// Recomputes the surveys of all enabled edges of the given clause from
    /// the surveys of the other edges, and returns the largest change
    pub fn update_surveys(&mut self, clause: ClauseIndex) -> f64 {
        self.scratch_edges.clear();
        self.scratch_edges.extend(self.graph.clause_enabled_edges(clause));
        self.subsurveys.clear();

        // First pass: the subsurvey of each edge, i.e. the probability that
        // its variable is warned away from satisfying this clause by the
        // rest of the graph. Zero subsurveys are counted apart so the
        // product over the others stays divisible
        let mut zeros = 0_usize;
        let mut all_subsurveys = 1.0_f64;
        for i in 0..self.scratch_edges.len() {
            let edge = self.scratch_edges[i];
            let variable = self.graph[edge].variable();
            let polarity = self.graph[edge].polarity();
            let survey = self.graph[edge].survey();
            let var = &self.graph[variable];
            // Full product on the satisfying side, cavity product on the
            // opposing side (this clause's own warning divided out)
            let satisfying = var.subproduct(!polarity);
            let cavity = var.cavity_subproduct(polarity, survey);
            let warn = cavity * (1.0 - satisfying);
            let total = warn + satisfying;
            let subsurvey = if total > 0.0 { warn / total } else { 0.0 };
            self.subsurveys.push(subsurvey);
            if subsurvey < ZERO_EPSILON {
                zeros += 1;
            } else {
                all_subsurveys *= subsurvey;
            }
        }

        // Second pass: each edge receives the product of the subsurveys of
        // the other edges. Its own factor is divided back out, unless it is
        // the lone zero, in which case the plain product is exactly the
        // cavity value; two zeros force every survey to zero
        let mut max_diff = 0.0_f64;
        for i in 0..self.scratch_edges.len() {
            let edge = self.scratch_edges[i];
            let subsurvey = self.subsurveys[i];
            let new_survey = if zeros == 0 {
                all_subsurveys / subsurvey
            } else if zeros == 1 && subsurvey < ZERO_EPSILON {
                all_subsurveys
            } else {
                0.0
            };
            let old_survey = self.graph[edge].survey();
            let variable = self.graph[edge].variable();
            let polarity = self.graph[edge].polarity();
            self.graph[variable].update_survey(polarity, old_survey, new_survey);
            self.graph[edge].set_survey(new_survey);
            let diff = (old_survey - new_survey).abs();
            if diff > max_diff {
                max_diff = diff;
            }
        }
        max_diff
    }

    /// Computes the normalized magnetizations of an unassigned variable from
    /// its subproducts, together with the polarization score that orders the
    /// decimation. A degenerate variable (both sides fully warned) gets a
    /// zero score so that its assignment is deferred
    pub fn evaluate_variable(&mut self, variable: VariableIndex) {
        let var = &self.graph[variable];
        let p = var.subproduct(true);
        let m = var.subproduct(false);
        let h_zero = p * m;
        let h_plus = m - h_zero;
        let h_minus = p - h_zero;
        let sum = h_plus + h_minus + h_zero;
        if sum > 0.0 {
            self.graph[variable].set_magnetizations(h_plus / sum, h_minus / sum, h_zero / sum);
        } else {
            self.graph[variable].set_magnetizations(0.0, 0.0, 1.0);
        }
    }
}
